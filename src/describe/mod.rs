//! Bounded-length build summaries for chat embeds.
//!
//! Changes and artifacts are rendered into ordered line sections, assembled
//! behind a caller prefix and degraded stage by stage until the text fits
//! the endpoint's character limit.

pub mod assemble;
pub mod format;
pub mod truncate;

use std::fmt;

use crate::domain::artifact::ArtifactRef;
use crate::domain::build::{BuildRecord, BuildResult, ChangeSource};
use crate::domain::change::ChangeEntry;
use crate::error::AppResult;

use self::assemble::Sections;
use self::truncate::Stage;

/// Discord rejects embed descriptions above this many characters.
pub const DEFAULT_MAX_LENGTH: usize = 2000;
pub const DEFAULT_PRESERVE_ID_KIND: &str = "svn";
pub const DEFAULT_SHORT_ID_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionOptions {
    pub max_length: usize,
    /// VCS kind whose revision ids are rendered whole, compared case-insensitively.
    pub preserve_id_kind: String,
    pub short_id_len: usize,
    pub include_artifacts: bool,
}

impl Default for DescriptionOptions {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            preserve_id_kind: DEFAULT_PRESERVE_ID_KIND.to_string(),
            short_id_len: DEFAULT_SHORT_ID_LEN,
            include_artifacts: false,
        }
    }
}

pub fn normalize(source: &dyn ChangeSource) -> Vec<ChangeEntry> {
    source
        .change_records()
        .into_iter()
        .map(|(kind, raw)| ChangeEntry::from_raw(kind, raw))
        .collect()
}

#[derive(Debug, Clone)]
pub struct Description {
    prefix: String,
    sections: Sections,
    stage: Stage,
    final_text: String,
}

impl Description {
    pub fn build(
        prefix: &str,
        source: &dyn ChangeSource,
        artifacts: &[ArtifactRef],
        artifact_base_url: &str,
        options: &DescriptionOptions,
    ) -> Self {
        let entries = normalize(source);
        let sections = Sections {
            change_lines: format::change_lines(&entries, options),
            artifact_lines: if options.include_artifacts {
                format::artifact_lines(artifact_base_url, artifacts)
            } else {
                Vec::new()
            },
        };

        let truncated = truncate::apply(prefix, sections, artifact_base_url, options.max_length);

        Self {
            prefix: prefix.to_string(),
            sections: truncated.sections,
            stage: truncated.stage,
            final_text: truncated.text,
        }
    }

    /// Builds the description for a build server record, rejecting unsupported
    /// build shapes before any formatting happens.
    pub fn for_record(
        prefix: &str,
        record: &BuildRecord,
        artifact_base_url: &str,
        options: &DescriptionOptions,
    ) -> AppResult<Self> {
        let build = BuildResult::try_from(record)?;
        let artifacts = record
            .artifacts
            .iter()
            .map(ArtifactRef::from_record)
            .collect::<Vec<_>>();
        Ok(Self::build(
            prefix,
            &build,
            &artifacts,
            artifact_base_url,
            options,
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.final_text
    }

    pub fn into_string(self) -> String {
        self.final_text
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn change_lines(&self) -> &[String] {
        &self.sections.change_lines
    }

    pub fn artifact_lines(&self) -> &[String] {
        &self.sections.artifact_lines
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.final_text)
    }
}
