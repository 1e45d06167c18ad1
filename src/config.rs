use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::describe::{DEFAULT_MAX_LENGTH, DEFAULT_PRESERVE_ID_KIND, DescriptionOptions};
use crate::error::{AppError, AppResult};

const CONFIG_DIR_NAME: &str = "buildping";
const CONFIG_FILE_NAME: &str = "config.json";

/// Settings persisted by `buildping config init`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredConfig {
    pub jenkins_url: Option<String>,
    pub jenkins_user: Option<String>,
    pub jenkins_token: Option<String>,
    pub webhook_url: Option<String>,
    pub webhook_username: Option<String>,
    pub webhook_avatar_url: Option<String>,
    pub prefix: Option<String>,
    pub enable_artifacts: Option<String>,
    pub max_length: Option<String>,
    pub preserve_id_kind: Option<String>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        let path = config_file_path()?;
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|err| {
                AppError::Configuration(format!("invalid config file {}: {err}", path.display()))
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        let path = config_file_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(&path, data)?;
        Ok(())
    }
}

pub fn config_directory() -> AppResult<PathBuf> {
    if let Some(dir) = env::var_os("XDG_CONFIG_HOME").filter(|dir| !dir.is_empty()) {
        return Ok(PathBuf::from(dir).join(CONFIG_DIR_NAME));
    }
    env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(".config").join(CONFIG_DIR_NAME))
        .ok_or_else(|| {
            AppError::Configuration("neither XDG_CONFIG_HOME nor HOME is set".to_string())
        })
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jenkins_url: Option<String>,
    pub jenkins_user: Option<String>,
    pub jenkins_token: Option<String>,
    pub webhook_url: Option<String>,
    pub webhook_username: Option<String>,
    pub webhook_avatar_url: Option<String>,
    pub prefix: String,
    pub description: DescriptionOptions,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        Self::resolve(stored, |key| env::var(key).ok())
    }

    /// Layers `BUILDPING_*` overrides from `lookup` on top of the stored file.
    pub fn resolve(
        stored: StoredConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> AppResult<Self> {
        let pick = |key: &str, fallback: Option<String>| {
            lookup(key)
                .or(fallback)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let enable_artifacts = pick("BUILDPING_ARTIFACTS", stored.enable_artifacts)
            .map(|value| parse_bool("BUILDPING_ARTIFACTS", &value))
            .transpose()?
            .unwrap_or(false);

        let max_length = pick("BUILDPING_MAX_LENGTH", stored.max_length)
            .map(|value| parse_length(&value))
            .transpose()?
            .unwrap_or(DEFAULT_MAX_LENGTH);

        let preserve_id_kind = pick("BUILDPING_PRESERVE_ID_KIND", stored.preserve_id_kind)
            .unwrap_or_else(|| DEFAULT_PRESERVE_ID_KIND.to_string());

        // The prefix is taken verbatim so leading newlines and spacing survive.
        let prefix = lookup("BUILDPING_PREFIX")
            .or(stored.prefix)
            .unwrap_or_default();

        Ok(Self {
            jenkins_url: pick("BUILDPING_JENKINS_URL", stored.jenkins_url),
            jenkins_user: pick("BUILDPING_JENKINS_USER", stored.jenkins_user),
            jenkins_token: pick("BUILDPING_JENKINS_TOKEN", stored.jenkins_token),
            webhook_url: pick("BUILDPING_WEBHOOK_URL", stored.webhook_url),
            webhook_username: pick("BUILDPING_WEBHOOK_USERNAME", stored.webhook_username),
            webhook_avatar_url: pick("BUILDPING_WEBHOOK_AVATAR_URL", stored.webhook_avatar_url),
            prefix,
            description: DescriptionOptions {
                max_length,
                preserve_id_kind,
                include_artifacts: enable_artifacts,
                ..DescriptionOptions::default()
            },
        })
    }
}

fn parse_bool(key: &str, value: &str) -> AppResult<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::Configuration(format!(
            "{key} must be a boolean, got '{other}'"
        ))),
    }
}

fn parse_length(value: &str) -> AppResult<usize> {
    match value.parse::<usize>() {
        Ok(length) if length > 0 => Ok(length),
        _ => Err(AppError::Configuration(format!(
            "BUILDPING_MAX_LENGTH must be a positive integer, got '{value}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_any_source() {
        let config = AppConfig::resolve(StoredConfig::default(), env_of(&[])).unwrap();
        assert_eq!(config.description, DescriptionOptions::default());
        assert_eq!(config.prefix, "");
        assert!(config.webhook_url.is_none());
    }

    #[test]
    fn environment_overrides_stored_values() {
        let stored = StoredConfig {
            webhook_url: Some("https://stored".to_string()),
            jenkins_url: Some("https://ci.stored".to_string()),
            enable_artifacts: Some("no".to_string()),
            ..StoredConfig::default()
        };
        let config = AppConfig::resolve(
            stored,
            env_of(&[
                ("BUILDPING_WEBHOOK_URL", " https://env "),
                ("BUILDPING_ARTIFACTS", "TRUE"),
                ("BUILDPING_MAX_LENGTH", "4096"),
                ("BUILDPING_PRESERVE_ID_KIND", "hg"),
            ]),
        )
        .unwrap();
        assert_eq!(config.webhook_url.as_deref(), Some("https://env"));
        assert_eq!(config.jenkins_url.as_deref(), Some("https://ci.stored"));
        assert!(config.description.include_artifacts);
        assert_eq!(config.description.max_length, 4096);
        assert_eq!(config.description.preserve_id_kind, "hg");
    }

    #[test]
    fn prefix_is_kept_verbatim() {
        let config =
            AppConfig::resolve(StoredConfig::default(), env_of(&[("BUILDPING_PREFIX", "  hi\n")]))
                .unwrap();
        assert_eq!(config.prefix, "  hi\n");
    }

    #[test]
    fn rejects_invalid_values() {
        let err = AppConfig::resolve(
            StoredConfig::default(),
            env_of(&[("BUILDPING_MAX_LENGTH", "0")]),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));

        let err = AppConfig::resolve(
            StoredConfig::default(),
            env_of(&[("BUILDPING_ARTIFACTS", "maybe")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("BUILDPING_ARTIFACTS"));
    }

    #[test]
    fn reads_stored_config_json() {
        let stored: StoredConfig =
            serde_json::from_str(r#"{ "webhook_url": "https://hook", "max_length": "1500" }"#)
                .unwrap();
        let config = AppConfig::resolve(stored, env_of(&[])).unwrap();
        assert_eq!(config.description.max_length, 1500);
    }
}
