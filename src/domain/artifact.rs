use serde::Deserialize;

/// Artifact listing entry from the build server's JSON API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRecord {
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub relative_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRef {
    pub relative_href: String,
}

impl ArtifactRef {
    pub fn from_record(record: &ArtifactRecord) -> Self {
        let path = if record.relative_path.is_empty() {
            &record.file_name
        } else {
            &record.relative_path
        };
        Self {
            relative_href: encode_path(path),
        }
    }
}

/// Percent-encodes each path segment, keeping the `/` separators.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_relative_path() {
        let record = ArtifactRecord {
            file_name: "app.jar".to_string(),
            relative_path: "target/app.jar".to_string(),
        };
        assert_eq!(ArtifactRef::from_record(&record).relative_href, "target/app.jar");
    }

    #[test]
    fn falls_back_to_file_name_and_encodes_spaces() {
        let record = ArtifactRecord {
            file_name: "release notes (draft).txt".to_string(),
            relative_path: String::new(),
        };
        assert_eq!(
            ArtifactRef::from_record(&record).relative_href,
            "release%20notes%20%28draft%29.txt"
        );
    }

    #[test]
    fn encodes_fragment_query_and_percent_per_segment() {
        let record = ArtifactRecord {
            file_name: "report#1 100%?.html".to_string(),
            relative_path: "build/report#1 100%?.html".to_string(),
        };
        assert_eq!(
            ArtifactRef::from_record(&record).relative_href,
            "build/report%231%20100%25%3F.html"
        );
    }
}
