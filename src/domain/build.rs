use serde::Deserialize;

use crate::domain::artifact::ArtifactRecord;
use crate::domain::change::{ChangeSet, RawChange};
use crate::error::{AppError, AppResult};

/// The `api/json` document the build server returns for one build.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRecord {
    #[serde(rename = "_class", default)]
    pub class: Option<String>,
    #[serde(default)]
    pub full_display_name: String,
    #[serde(default)]
    pub number: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub building: bool,
    #[serde(default)]
    pub change_set: Option<ChangeSet>,
    #[serde(default)]
    pub change_sets: Option<Vec<ChangeSet>>,
    #[serde(default)]
    pub artifacts: Vec<ArtifactRecord>,
}

impl BuildRecord {
    pub fn status(&self) -> BuildStatus {
        if self.building {
            return BuildStatus::Building;
        }
        self.result
            .as_deref()
            .map(BuildStatus::from_str)
            .unwrap_or(BuildStatus::NotBuilt)
    }

    pub fn title(&self) -> String {
        if self.full_display_name.is_empty() {
            format!("Build #{}", self.number)
        } else {
            self.full_display_name.clone()
        }
    }
}

/// Anything that can hand out its change-log items in encounter order.
pub trait ChangeSource {
    fn change_records(&self) -> Vec<(&str, &RawChange)>;
}

#[derive(Debug, Clone)]
pub enum BuildResult {
    /// Freestyle-style builds with exactly one change set.
    SingleChangeSet(ChangeSet),
    /// Pipeline runs, one change set per checkout.
    MultipleChangeSets(Vec<ChangeSet>),
}

impl TryFrom<&BuildRecord> for BuildResult {
    type Error = AppError;

    fn try_from(record: &BuildRecord) -> AppResult<Self> {
        if let Some(sets) = &record.change_sets {
            return Ok(BuildResult::MultipleChangeSets(sets.clone()));
        }
        if let Some(set) = &record.change_set {
            return Ok(BuildResult::SingleChangeSet(set.clone()));
        }
        Err(AppError::UnsupportedBuildShape(format!(
            "{} has neither a change set nor change sets",
            record.class.as_deref().unwrap_or("build")
        )))
    }
}

impl ChangeSource for BuildResult {
    fn change_records(&self) -> Vec<(&str, &RawChange)> {
        match self {
            BuildResult::SingleChangeSet(set) => {
                set.items.iter().map(|item| (set.kind(), item)).collect()
            }
            BuildResult::MultipleChangeSets(sets) => sets
                .iter()
                .flat_map(|set| set.items.iter().map(move |item| (set.kind(), item)))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    Success,
    Unstable,
    Failure,
    NotBuilt,
    Aborted,
    Building,
}

impl BuildStatus {
    pub fn from_str(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "SUCCESS" => BuildStatus::Success,
            "UNSTABLE" => BuildStatus::Unstable,
            "FAILURE" => BuildStatus::Failure,
            "ABORTED" => BuildStatus::Aborted,
            _ => BuildStatus::NotBuilt,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStatus::Success => "success",
            BuildStatus::Unstable => "unstable",
            BuildStatus::Failure => "failure",
            BuildStatus::NotBuilt => "not built",
            BuildStatus::Aborted => "aborted",
            BuildStatus::Building => "building",
        }
    }

    pub fn color(&self) -> u32 {
        match self {
            BuildStatus::Success => 0x1fd552,
            BuildStatus::Unstable => 0xffc300,
            BuildStatus::Failure => 0xe8311e,
            BuildStatus::NotBuilt | BuildStatus::Aborted => 0x6d6d6d,
            BuildStatus::Building => 0x3498db,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> BuildRecord {
        serde_json::from_str(json).unwrap()
    }

    fn commit_ids(result: &BuildResult) -> Vec<String> {
        result
            .change_records()
            .into_iter()
            .map(|(kind, change)| format!("{kind}:{}", change.commit_id))
            .collect()
    }

    #[test]
    fn reads_single_change_set() {
        let build = record(
            r#"{
                "_class": "hudson.model.FreeStyleBuild",
                "changeSet": { "kind": "git", "items": [
                    { "commitId": "aaaaaaa1", "msg": "one" },
                    { "commitId": "bbbbbbb2", "msg": "two" }
                ]}
            }"#,
        );
        let result = BuildResult::try_from(&build).unwrap();
        assert!(matches!(result, BuildResult::SingleChangeSet(_)));
        assert_eq!(commit_ids(&result), vec!["git:aaaaaaa1", "git:bbbbbbb2"]);
    }

    #[test]
    fn flattens_multiple_change_sets_in_order() {
        let build = record(
            r#"{
                "_class": "org.jenkinsci.plugins.workflow.job.WorkflowRun",
                "changeSets": [
                    { "kind": "git", "items": [{ "commitId": "c1" }, { "commitId": "c2" }] },
                    { "kind": "svn", "items": [] },
                    { "kind": "svn", "items": [{ "commitId": "42" }, { "commitId": "c2" }] }
                ]
            }"#,
        );
        let result = BuildResult::try_from(&build).unwrap();
        assert_eq!(
            commit_ids(&result),
            vec!["git:c1", "git:c2", "svn:42", "svn:c2"]
        );
    }

    #[test]
    fn empty_change_sets_are_supported() {
        let build = record(r#"{ "changeSets": [] }"#);
        let result = BuildResult::try_from(&build).unwrap();
        assert!(result.change_records().is_empty());
    }

    #[test]
    fn rejects_build_without_change_sets() {
        let build = record(r#"{ "_class": "hudson.matrix.MatrixRun", "number": 3 }"#);
        let err = BuildResult::try_from(&build).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedBuildShape(_)));
        assert!(err.to_string().contains("hudson.matrix.MatrixRun"));
    }

    #[test]
    fn derives_status() {
        let mut build = record(r#"{ "result": "FAILURE" }"#);
        assert_eq!(build.status(), BuildStatus::Failure);
        build.building = true;
        assert_eq!(build.status(), BuildStatus::Building);
        build.building = false;
        build.result = None;
        assert_eq!(build.status(), BuildStatus::NotBuilt);
    }

    #[test]
    fn title_falls_back_to_number() {
        let build = record(r#"{ "number": 17 }"#);
        assert_eq!(build.title(), "Build #17");
    }
}
