use serde::Deserialize;

/// One change-log item as the build server reports it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawChange {
    #[serde(default)]
    pub commit_id: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub author: RawAuthor,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAuthor {
    #[serde(default)]
    pub full_name: String,
}

/// An ordered list of changes recorded by a single SCM checkout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeSet {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub items: Vec<RawChange>,
}

impl ChangeSet {
    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEntry {
    pub commit_id: String,
    pub vcs_kind: String,
    /// First line of the commit message, trimmed.
    pub message: String,
    pub author_full_name: String,
}

impl ChangeEntry {
    pub fn from_raw(vcs_kind: &str, raw: &RawChange) -> Self {
        let message = if raw.msg.trim().is_empty() {
            raw.comment.as_deref().unwrap_or_default()
        } else {
            raw.msg.as_str()
        };

        Self {
            commit_id: raw.commit_id.clone(),
            vcs_kind: vcs_kind.to_string(),
            message: first_line(message).to_string(),
            author_full_name: raw.author.full_name.clone(),
        }
    }
}

pub fn first_line(message: &str) -> &str {
    let trimmed = message.trim();
    match trimmed.find('\n') {
        Some(nl) => trimmed[..nl].trim(),
        None => trimmed,
    }
}
