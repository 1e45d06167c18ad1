use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{BuildServerService, NotifierService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub build_server: Arc<dyn BuildServerService>,
    pub notifier: Arc<dyn NotifierService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        build_server: Arc<dyn BuildServerService>,
        notifier: Arc<dyn NotifierService>,
    ) -> Self {
        Self {
            config,
            build_server,
            notifier,
        }
    }
}
