/// The ordered line sequences that make up a description body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    pub change_lines: Vec<String>,
    pub artifact_lines: Vec<String>,
}

pub fn assemble(prefix: &str, sections: &Sections) -> String {
    let capacity = prefix.len()
        + sections.change_lines.iter().map(String::len).sum::<usize>()
        + sections.artifact_lines.iter().map(String::len).sum::<usize>();
    let mut description = String::with_capacity(capacity);
    description.push_str(prefix);
    for line in sections
        .change_lines
        .iter()
        .chain(sections.artifact_lines.iter())
    {
        description.push_str(line);
    }
    description
}

/// Length as the chat endpoint counts it: in characters, not bytes.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenates_prefix_changes_then_artifacts() {
        let sections = Sections {
            change_lines: vec!["C1".to_string(), "C2".to_string()],
            artifact_lines: vec!["A1".to_string()],
        };
        assert_eq!(assemble("P:", &sections), "P:C1C2A1");
        assert_eq!(assemble("P:", &sections), "P:C1C2A1");
    }

    #[test]
    fn counts_characters() {
        assert_eq!(char_len("héllo"), 5);
        assert_eq!(char_len(""), 0);
    }
}
