use std::fs;
use std::path::Path;

use crate::parse::TaskRecord;

/// Always prepended to annotated task content, ahead of any user rules.
/// User rules can extend this preamble but never replace it.
pub const SAFETY_PREAMBLE: &str = "\
# Workspace safety rules (always applied)
# - Never delete the .tasklane directory or the files inside it
# - tasks.txt, state.json and rules.txt must be preserved
# - Prefer editing file contents or creating new files over removing anything
";

/// Load the rule text: the fixed safety preamble plus the user rule file if
/// present and non-empty. A missing or empty rule file is not an error.
pub fn load_rules(path: &Path) -> String {
    let user_rules = fs::read_to_string(path)
        .map(|raw| raw.trim().to_string())
        .unwrap_or_default();
    if user_rules.is_empty() {
        SAFETY_PREAMBLE.to_string()
    } else {
        format!("{SAFETY_PREAMBLE}\n{user_rules}")
    }
}

/// Prefix every record's content with the rule text. Purely cosmetic:
/// count and indices are unchanged.
pub fn annotate(records: &[TaskRecord], rules: &str) -> Vec<TaskRecord> {
    records
        .iter()
        .map(|record| TaskRecord {
            index: record.index,
            content: format!("{rules}\n\n{content}", content = record.content),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_rule_file_yields_preamble_only() {
        let temp = TempDir::new().expect("tempdir");
        let rules = load_rules(&temp.path().join("rules.txt"));
        assert_eq!(rules, SAFETY_PREAMBLE);
    }

    #[test]
    fn user_rules_are_appended_after_the_preamble() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("rules.txt");
        std::fs::write(&path, "Use conventional commits\n").expect("write");
        let rules = load_rules(&path);
        assert!(rules.starts_with(SAFETY_PREAMBLE));
        assert!(rules.ends_with("Use conventional commits"));
    }

    #[test]
    fn annotate_keeps_count_and_indices() {
        let records = vec![
            TaskRecord {
                index: 0,
                content: "Task A".to_string(),
            },
            TaskRecord {
                index: 1,
                content: "Task B".to_string(),
            },
        ];
        let annotated = annotate(&records, "rules here");
        assert_eq!(annotated.len(), 2);
        assert_eq!(annotated[1].index, 1);
        assert_eq!(annotated[1].content, "rules here\n\nTask B");
    }
}
