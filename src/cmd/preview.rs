use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::config::AppConfig;
use crate::domain::build::BuildRecord;
use crate::error::AppResult;
use crate::workflow::notify::{DescribeOverrides, PreparedNotification, prepare_notification};

/// Renders a saved `api/json` document without touching the network.
/// A path of `-` reads the document from stdin.
pub fn run(
    config: &AppConfig,
    path: &Path,
    overrides: &DescribeOverrides,
) -> AppResult<PreparedNotification> {
    let contents = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(path)?
    };
    let record: BuildRecord = serde_json::from_str(&contents)?;
    prepare_notification(&record, None, overrides, config)
}
