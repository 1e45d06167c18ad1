use crate::describe::DescriptionOptions;
use crate::domain::artifact::ArtifactRef;
use crate::domain::change::{ChangeEntry, first_line};

pub const CHANGES_HEADER: &str = "\n**Changes:**\n";
pub const NO_CHANGES: &str = "*No changes.*";
pub const ARTIFACTS_HEADER: &str = "\n**Artifacts:**\n";
pub const NO_ARTIFACTS: &str = "\n*No artifacts saved.*";

/// Backslash-escapes `*`, `_` and `~`. Backticks pass through untouched.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '*' | '_' | '~') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

pub fn display_commit_id<'a>(entry: &'a ChangeEntry, options: &DescriptionOptions) -> &'a str {
    if entry.vcs_kind.eq_ignore_ascii_case(&options.preserve_id_kind) {
        return &entry.commit_id;
    }
    match entry.commit_id.char_indices().nth(options.short_id_len) {
        Some((end, _)) => &entry.commit_id[..end],
        None => &entry.commit_id,
    }
}

pub fn change_line(entry: &ChangeEntry, options: &DescriptionOptions) -> String {
    format!(
        "   - ``{}`` *{} - {}*\n",
        display_commit_id(entry, options),
        escape_markdown(first_line(&entry.message)),
        entry.author_full_name
    )
}

pub fn artifact_line(base_url: &str, artifact: &ArtifactRef) -> String {
    format!(" - {base_url}{}\n", artifact.relative_href)
}

/// Header followed by one line per change, or the placeholder when there are none.
pub fn change_lines(entries: &[ChangeEntry], options: &DescriptionOptions) -> Vec<String> {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(CHANGES_HEADER.to_string());
    if entries.is_empty() {
        lines.push(NO_CHANGES.to_string());
    } else {
        lines.extend(entries.iter().map(|entry| change_line(entry, options)));
    }
    lines
}

pub fn artifact_lines(base_url: &str, artifacts: &[ArtifactRef]) -> Vec<String> {
    let mut lines = Vec::with_capacity(artifacts.len() + 1);
    lines.push(ARTIFACTS_HEADER.to_string());
    if artifacts.is_empty() {
        lines.push(NO_ARTIFACTS.to_string());
    } else {
        lines.extend(
            artifacts
                .iter()
                .map(|artifact| artifact_line(base_url, artifact)),
        );
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(commit_id: &str, kind: &str, message: &str) -> ChangeEntry {
        ChangeEntry {
            commit_id: commit_id.to_string(),
            vcs_kind: kind.to_string(),
            message: message.to_string(),
            author_full_name: "Linus".to_string(),
        }
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_markdown("a*b_c~d"), "a\\*b\\_c\\~d");
        assert_eq!(escape_markdown("`tick`"), "`tick`");
    }

    #[test]
    fn shortens_commit_ids_except_for_preserving_kind() {
        let options = DescriptionOptions::default();
        assert_eq!(display_commit_id(&entry("0123456789", "git", ""), &options), "012345");
        assert_eq!(
            display_commit_id(&entry("0123456789", "SVN", ""), &options),
            "0123456789"
        );
    }

    #[test]
    fn short_commit_ids_render_whole() {
        let options = DescriptionOptions::default();
        assert_eq!(display_commit_id(&entry("abc", "git", ""), &options), "abc");
        assert_eq!(display_commit_id(&entry("", "hg", ""), &options), "");
    }

    #[test]
    fn renders_change_line() {
        let options = DescriptionOptions::default();
        let line = change_line(&entry("deadbeefcafe", "git", "fix bug\nmore detail"), &options);
        assert_eq!(line, "   - ``deadbe`` *fix bug - Linus*\n");
    }

    #[test]
    fn renders_artifact_line() {
        let artifact = ArtifactRef {
            relative_href: "target/app.jar".to_string(),
        };
        assert_eq!(
            artifact_line("http://ci/job/x/1/artifact/", &artifact),
            " - http://ci/job/x/1/artifact/target/app.jar\n"
        );
    }

    #[test]
    fn placeholders_for_empty_sections() {
        let options = DescriptionOptions::default();
        assert_eq!(change_lines(&[], &options), vec![CHANGES_HEADER, NO_CHANGES]);
        assert_eq!(artifact_lines("u/", &[]), vec![ARTIFACTS_HEADER, NO_ARTIFACTS]);
    }
}
