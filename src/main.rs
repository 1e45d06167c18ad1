mod cmd;
mod config;
mod context;
mod describe;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::notify::{self, NotifyCommandArgs};
use crate::cmd::preview;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::discord::DiscordWebhook;
use crate::infra::jenkins::JenkinsClient;
use crate::workflow::notify::{DescribeOverrides, PreparedNotification};

#[derive(Parser)]
#[command(
    name = "buildping",
    author,
    version,
    about = "Post build summaries to chat webhooks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a build from Jenkins and post its summary to the webhook.
    Notify(NotifyArgs),
    /// Render the summary for a saved build JSON document.
    Preview(PreviewArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct DescribeArgs {
    /// Text placed before the change list.
    #[arg(short, long)]
    prefix: Option<String>,
    /// List build artifacts below the changes.
    #[arg(short, long, conflicts_with = "no_artifacts")]
    artifacts: bool,
    /// Leave the artifact list out even when configured.
    #[arg(long)]
    no_artifacts: bool,
}

impl DescribeArgs {
    fn into_overrides(self) -> DescribeOverrides {
        let include_artifacts = match (self.artifacts, self.no_artifacts) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        DescribeOverrides {
            prefix: self.prefix,
            include_artifacts,
        }
    }
}

#[derive(Args)]
struct NotifyArgs {
    /// Build URL, absolute or relative to the configured Jenkins URL.
    build_url: String,
    #[command(flatten)]
    describe: DescribeArgs,
    /// Print the payload instead of sending it.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct PreviewArgs {
    /// Path to a saved `api/json` document, or `-` for stdin.
    file: PathBuf,
    #[command(flatten)]
    describe: DescribeArgs,
    /// Print the full webhook payload as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => {
            config_cmd::run(args.command)?;
            Ok(())
        }
        Commands::Preview(args) => run_preview(args),
        Commands::Notify(args) => run_notify(args).await,
    }
}

fn run_preview(args: PreviewArgs) -> AppResult<()> {
    let config = AppConfig::load()?;
    let prepared = preview::run(&config, &args.file, &args.describe.into_overrides())?;
    print_prepared(&prepared, args.json)
}

async fn run_notify(args: NotifyArgs) -> AppResult<()> {
    let config = AppConfig::load()?;

    if config.jenkins_url.is_none() {
        warn!("Jenkins URL not configured; relative build URLs will fail.");
    }
    if config.webhook_url.is_none() && !args.dry_run {
        warn!("webhook URL not configured; delivery will fail.");
    }

    let build_server = Arc::new(JenkinsClient::new(
        config.jenkins_url.clone(),
        config.jenkins_user.clone(),
        config.jenkins_token.clone(),
    ));
    let notifier = Arc::new(DiscordWebhook::new(config.webhook_url.clone()));
    let context = AppContext::new(config, build_server, notifier);

    let outcome = notify::run(
        &context,
        NotifyCommandArgs {
            build_url: args.build_url,
            overrides: args.describe.into_overrides(),
            dry_run: args.dry_run,
        },
    )
    .await?;

    if outcome.delivered {
        println!(
            "Notification sent ({} description).",
            outcome.prepared.stage.as_str()
        );
        Ok(())
    } else {
        print_prepared(&outcome.prepared, true)
    }
}

fn print_prepared(prepared: &PreparedNotification, as_json: bool) -> AppResult<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&prepared.payload)?);
    } else {
        println!("{}", prepared.payload.description().unwrap_or_default());
    }
    Ok(())
}
