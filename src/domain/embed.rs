use serde::Serialize;

use crate::domain::build::BuildStatus;

pub const FOOTER_TEXT: &str = "buildping";

/// Body of a Discord-compatible webhook execution request.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Embed {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub description: String,
    pub color: u32,
    pub footer: EmbedFooter,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

impl WebhookPayload {
    pub fn for_build(
        title: &str,
        url: Option<String>,
        status: BuildStatus,
        description: String,
    ) -> Self {
        Self {
            username: None,
            avatar_url: None,
            embeds: vec![Embed {
                title: format!("{title} ({})", status.as_str()),
                url: url.filter(|url| !url.is_empty()),
                description,
                color: status.color(),
                footer: EmbedFooter {
                    text: FOOTER_TEXT.to_string(),
                },
            }],
        }
    }

    pub fn with_identity(mut self, username: Option<String>, avatar_url: Option<String>) -> Self {
        self.username = username;
        self.avatar_url = avatar_url;
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.embeds.first().map(|embed| embed.description.as_str())
    }
}
