use std::io::{self, Write};

use clap::{Args, Subcommand};

use crate::config::{AppConfig, StoredConfig, config_file_path};
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(),
        ConfigCommand::Show => run_show(),
    }
}

fn run_init() -> AppResult<()> {
    let mut cfg = StoredConfig::load()?;

    println!("Configuring buildping.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!("Secrets are stored in the local config file; protect your filesystem accordingly.");
    println!();

    apply_prompt(
        "Jenkins URL (e.g., https://ci.example.com)",
        &mut cfg.jenkins_url,
        false,
    )?;
    apply_prompt("Jenkins user", &mut cfg.jenkins_user, false)?;
    apply_prompt("Jenkins API token", &mut cfg.jenkins_token, true)?;

    apply_prompt("Webhook URL", &mut cfg.webhook_url, true)?;
    apply_prompt("Webhook username override", &mut cfg.webhook_username, false)?;
    apply_prompt("Webhook avatar URL", &mut cfg.webhook_avatar_url, false)?;

    apply_prompt("Description prefix", &mut cfg.prefix, false)?;
    apply_prompt(
        "List artifacts (true/false)",
        &mut cfg.enable_artifacts,
        false,
    )?;
    apply_prompt("Maximum description length", &mut cfg.max_length, false)?;
    apply_prompt(
        "VCS kind with full revision ids",
        &mut cfg.preserve_id_kind,
        false,
    )?;

    // Reject values the loader would refuse before they reach disk.
    AppConfig::resolve(cfg.clone(), |_| None)?;
    cfg.save()?;

    let path = config_file_path()?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let cfg = StoredConfig::load()?;
    let path = config_file_path()?;

    println!("Configuration file: {}", path.display());
    println!("Jenkins URL: {}", display_value(&cfg.jenkins_url));
    println!("Jenkins user: {}", display_value(&cfg.jenkins_user));
    println!("Jenkins API token: {}", mask_secret(&cfg.jenkins_token));
    println!("Webhook URL: {}", mask_secret(&cfg.webhook_url));
    println!(
        "Webhook username: {}",
        display_value(&cfg.webhook_username)
    );
    println!(
        "Webhook avatar URL: {}",
        display_value(&cfg.webhook_avatar_url)
    );
    println!("Description prefix: {}", display_value(&cfg.prefix));
    println!("List artifacts: {}", display_value(&cfg.enable_artifacts));
    println!("Maximum length: {}", display_value(&cfg.max_length));
    println!(
        "Full revision ids for: {}",
        display_value(&cfg.preserve_id_kind)
    );

    Ok(())
}

fn apply_prompt(field: &str, target: &mut Option<String>, secret: bool) -> AppResult<()> {
    match prompt(field, target.as_deref(), secret)? {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => *target = Some(value),
    }
    Ok(())
}

fn prompt(field: &str, current: Option<&str>, secret: bool) -> AppResult<PromptAction> {
    let mut stdout = io::stdout();

    match (current, secret) {
        (Some(_), true) => write!(stdout, "{field} [****] (Enter to keep, '-' to clear): ")?,
        (Some(value), false) => {
            write!(stdout, "{field} [{value}] (Enter to keep, '-' to clear): ")?
        }
        (None, _) => write!(stdout, "{field} (Enter to skip): ")?,
    }
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(PromptAction::parse(&input))
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.chars().count() > 6 => {
            let chars = token.chars().collect::<Vec<_>>();
            let prefix = chars[..3].iter().collect::<String>();
            let suffix = chars[chars.len() - 3..].iter().collect::<String>();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}

impl PromptAction {
    fn parse(input: &str) -> Self {
        match input.trim() {
            "" => PromptAction::Keep,
            "-" => PromptAction::Clear,
            value => PromptAction::Set(value.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_long_secrets() {
        assert_eq!(
            mask_secret(&Some("https://hook/abcdef".to_string())),
            "htt***def"
        );
        assert_eq!(mask_secret(&Some("short".to_string())), "***");
        assert_eq!(mask_secret(&None), "<not set>");
    }

    #[test]
    fn parses_prompt_answers() {
        assert_eq!(PromptAction::parse("\n"), PromptAction::Keep);
        assert_eq!(PromptAction::parse(" - \n"), PromptAction::Clear);
        assert_eq!(
            PromptAction::parse("https://ci.example.com\n"),
            PromptAction::Set("https://ci.example.com".to_string())
        );
    }

    #[test]
    fn displays_unset_values() {
        assert_eq!(display_value(&Some(String::new())), "<not set>");
        assert_eq!(display_value(&Some("svn".to_string())), "svn");
    }
}
