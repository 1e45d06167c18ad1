use tracing::debug;

use crate::describe::assemble::{Sections, assemble, char_len};

/// Change section size (header included) kept once changes are limited.
pub const CHANGE_LINE_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Full,
    ChangesLimited,
    ArtifactsCollapsed,
    HardTruncated,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Full => "full",
            Stage::ChangesLimited => "changes-limited",
            Stage::ArtifactsCollapsed => "artifacts-collapsed",
            Stage::HardTruncated => "hard-truncated",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Truncated {
    pub stage: Stage,
    pub sections: Sections,
    pub text: String,
}

/// Keeps the header and the earliest changes, dropping the most recent ones.
pub fn limit_changes(sections: &Sections) -> Sections {
    Sections {
        change_lines: sections
            .change_lines
            .iter()
            .take(CHANGE_LINE_LIMIT)
            .cloned()
            .collect(),
        artifact_lines: sections.artifact_lines.clone(),
    }
}

/// Replaces the whole artifact section, header included, with the bare base URL.
pub fn collapse_artifacts(sections: &Sections, base_url: &str) -> Sections {
    Sections {
        change_lines: sections.change_lines.clone(),
        artifact_lines: vec![base_url.to_string()],
    }
}

pub fn hard_truncate(text: &str, max_length: usize) -> String {
    text.chars().take(max_length.saturating_sub(1)).collect()
}

/// Degrades `sections` stage by stage until the assembled text fits `max_length`.
pub fn apply(prefix: &str, sections: Sections, base_url: &str, max_length: usize) -> Truncated {
    let mut stage = Stage::Full;
    let mut current = sections;

    loop {
        let text = assemble(prefix, &current);
        let length = char_len(&text);
        if length <= max_length {
            return Truncated {
                stage,
                sections: current,
                text,
            };
        }

        if current.change_lines.len() > CHANGE_LINE_LIMIT {
            debug!(length, max_length, "limiting change list");
            current = limit_changes(&current);
            stage = Stage::ChangesLimited;
        } else if current.artifact_lines.len() > 1 {
            debug!(length, max_length, "collapsing artifact list");
            current = collapse_artifacts(&current, base_url);
            stage = Stage::ArtifactsCollapsed;
        } else {
            debug!(length, max_length, "hard truncating description");
            return Truncated {
                stage: Stage::HardTruncated,
                sections: current,
                text: hard_truncate(&text, max_length),
            };
        }
    }
}
