use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION},
};
use tracing::debug;

use crate::domain::build::BuildRecord;
use crate::error::{AppError, AppResult};
use crate::services::BuildServerService;
use crate::services::build_server::is_absolute;

pub struct JenkinsClient {
    http: Client,
    base_url: Option<String>,
    user: Option<String>,
    token: Option<String>,
}

impl JenkinsClient {
    pub fn new(base_url: Option<String>, user: Option<String>, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            user,
            token,
        }
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        match (self.user.as_deref(), self.token.as_deref()) {
            (Some(user), Some(token)) if !user.is_empty() && !token.is_empty() => {
                Some((user, token))
            }
            _ => None,
        }
    }

    fn auth_header(user: &str, token: &str) -> String {
        let credentials = format!("{user}:{token}");
        let encoded = BASE64_STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }

    fn api_endpoint(&self, build_url: &str) -> AppResult<String> {
        let absolute = if is_absolute(build_url) {
            build_url.to_string()
        } else {
            let base_url = self.base_url.as_deref().ok_or_else(|| {
                AppError::Configuration(format!(
                    "Jenkins URL not configured; cannot resolve relative build URL '{build_url}'"
                ))
            })?;
            format!(
                "{}/{}",
                base_url.trim_end_matches('/'),
                build_url.trim_start_matches('/')
            )
        };
        Ok(format!("{}/api/json", absolute.trim_end_matches('/')))
    }
}

#[async_trait]
impl BuildServerService for JenkinsClient {
    async fn fetch_build(&self, build_url: &str) -> AppResult<BuildRecord> {
        let build_url = build_url.trim();
        if build_url.is_empty() {
            return Err(AppError::BuildServer(
                "build URL must not be empty".to_string(),
            ));
        }

        let endpoint = self.api_endpoint(build_url)?;
        debug!(%endpoint, "fetching build");

        let mut request = self.http.get(&endpoint).header(ACCEPT, "application/json");
        if let Some((user, token)) = self.credentials() {
            request = request.header(AUTHORIZATION, Self::auth_header(user, token));
        }

        let response = request
            .send()
            .await
            .map_err(|err| AppError::BuildServer(format!("failed to call Jenkins: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::BuildServer(format!(
                "Jenkins responded with {status}: {body}"
            )));
        }

        response
            .json::<BuildRecord>()
            .await
            .map_err(|err| AppError::BuildServer(format!("failed to parse Jenkins response: {err}")))
    }
}
