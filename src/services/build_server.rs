use async_trait::async_trait;

use crate::domain::build::BuildRecord;
use crate::error::AppResult;

#[async_trait]
pub trait BuildServerService: Send + Sync {
    async fn fetch_build(&self, build_url: &str) -> AppResult<BuildRecord>;
}

/// Joins a possibly relative build URL onto the server root and appends the
/// `artifact/` segment, leaving exactly one slash between the parts.
pub fn artifact_base_url(server_root: Option<&str>, build_url: &str) -> String {
    let absolute = match server_root {
        Some(root) if !is_absolute(build_url) => format!(
            "{}/{}",
            root.trim_end_matches('/'),
            build_url.trim_start_matches('/')
        ),
        _ => build_url.to_string(),
    };
    format!("{}/artifact/", absolute.trim_end_matches('/'))
}

pub fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
