use tracing::{debug, info};

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::describe::Description;
use crate::describe::truncate::Stage;
use crate::domain::build::BuildRecord;
use crate::domain::embed::WebhookPayload;
use crate::error::{AppError, AppResult};
use crate::services::build_server::artifact_base_url;

/// Per-invocation adjustments on top of the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct DescribeOverrides {
    pub prefix: Option<String>,
    /// `None` keeps the configured setting.
    pub include_artifacts: Option<bool>,
}

pub struct PreparedNotification {
    pub payload: WebhookPayload,
    pub stage: Stage,
}

pub struct NotifyOutcome {
    pub prepared: PreparedNotification,
    pub delivered: bool,
}

pub fn prepare_notification(
    record: &BuildRecord,
    fallback_url: Option<&str>,
    overrides: &DescribeOverrides,
    config: &AppConfig,
) -> AppResult<PreparedNotification> {
    let build_url = if record.url.is_empty() {
        fallback_url.unwrap_or_default()
    } else {
        record.url.as_str()
    };
    let mut options = config.description.clone();
    if let Some(include) = overrides.include_artifacts {
        options.include_artifacts = include;
    }

    if build_url.trim().is_empty() && options.include_artifacts {
        return Err(AppError::BuildServer(
            "build record has no URL; artifact links cannot be built".to_string(),
        ));
    }
    let base_url = artifact_base_url(config.jenkins_url.as_deref(), build_url);
    let prefix = overrides.prefix.as_deref().unwrap_or(&config.prefix);

    let description = Description::for_record(prefix, record, &base_url, &options)?;
    let stage = description.stage();
    debug!(
        stage = stage.as_str(),
        prefix_chars = description.prefix().chars().count(),
        change_lines = description.change_lines().len(),
        artifact_lines = description.artifact_lines().len(),
        "description built"
    );

    let payload = WebhookPayload::for_build(
        &record.title(),
        Some(build_url.to_string()),
        record.status(),
        description.into_string(),
    )
    .with_identity(
        config.webhook_username.clone(),
        config.webhook_avatar_url.clone(),
    );

    Ok(PreparedNotification { payload, stage })
}

pub async fn notify_build(
    ctx: &AppContext,
    build_url: &str,
    overrides: &DescribeOverrides,
    dry_run: bool,
) -> AppResult<NotifyOutcome> {
    let record = ctx.build_server.fetch_build(build_url).await?;
    let prepared = prepare_notification(&record, Some(build_url), overrides, &ctx.config)?;

    if dry_run {
        return Ok(NotifyOutcome {
            prepared,
            delivered: false,
        });
    }

    ctx.notifier.send(&prepared.payload).await?;
    info!(build = %record.title(), "build notification sent");

    Ok(NotifyOutcome {
        prepared,
        delivered: true,
    })
}
