use crate::error::{ChangelogError, Result};
use regex::Regex;

/// A commit read from the repository log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitEntry {
    /// Full commit hash
    pub hash: String,
    /// Full commit message
    pub message: String,
    /// Author time in seconds since the unix epoch
    pub author_date: i64,
    /// Whether the commit has more than one parent
    pub is_merge: bool,
}

impl CommitEntry {
    pub fn new(hash: impl Into<String>, message: impl Into<String>, author_date: i64) -> Self {
        CommitEntry {
            hash: hash.into(),
            message: message.into(),
            author_date,
            is_merge: false,
        }
    }

    /// First line of the message, trimmed
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("").trim()
    }
}

/// A commit reduced to what the changelog shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub raw_message: String,
    pub issue_key: Option<String>,
}

impl ChangelogEntry {
    /// Key used to merge entries: the issue key, or the message itself
    pub fn dedup_key(&self) -> &str {
        self.issue_key.as_deref().unwrap_or(&self.raw_message)
    }
}

/// Commit message key: the pattern locating an issue identifier in a subject
/// line (e.g. `([A-Z][A-Z0-9]+-\d+)`)
///
/// The first capture group is the issue key when the pattern has one,
/// otherwise the whole match.
#[derive(Debug, Clone)]
pub struct IssueKeyPattern {
    regex: Regex,
}

impl IssueKeyPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.trim().is_empty() {
            return Err(ChangelogError::invalid_pattern(
                "Commit message key must not be empty",
            ));
        }
        let regex = Regex::new(pattern)
            .map_err(|e| ChangelogError::invalid_pattern(format!("{}: {}", pattern, e)))?;
        Ok(IssueKeyPattern { regex })
    }

    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }

    /// Extract the issue key from a subject line
    pub fn extract(&self, subject: &str) -> Option<String> {
        let captures = self.regex.captures(subject)?;
        let key = captures.get(1).or_else(|| captures.get(0))?.as_str().trim();
        if key.is_empty() {
            None
        } else {
            Some(key.to_string())
        }
    }

    /// Turn a commit into a changelog entry; a subject without a key keeps its text only
    pub fn to_entry(&self, commit: &CommitEntry) -> ChangelogEntry {
        let subject = commit.subject();
        ChangelogEntry {
            raw_message: subject.to_string(),
            issue_key: self.extract(subject),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_pattern() -> IssueKeyPattern {
        IssueKeyPattern::new(r"([A-Z][A-Z0-9]+-\d+)").unwrap()
    }

    #[test]
    fn test_subject_is_first_line() {
        let commit = CommitEntry::new("abc", "PROJ-1: add login\n\nlong body", 0);
        assert_eq!(commit.subject(), "PROJ-1: add login");
    }

    #[test]
    fn test_subject_of_empty_message() {
        let commit = CommitEntry::new("abc", "", 0);
        assert_eq!(commit.subject(), "");
    }

    #[test]
    fn test_extract_with_capture_group() {
        assert_eq!(
            key_pattern().extract("PROJ-12: fix crash"),
            Some("PROJ-12".to_string())
        );
        assert_eq!(
            key_pattern().extract("fix crash [MOB-301]"),
            Some("MOB-301".to_string())
        );
    }

    #[test]
    fn test_extract_without_capture_group_uses_whole_match() {
        let pattern = IssueKeyPattern::new(r"#\d+").unwrap();
        assert_eq!(pattern.extract("fix #42 again"), Some("#42".to_string()));
    }

    #[test]
    fn test_extract_no_match() {
        assert_eq!(key_pattern().extract("chore: bump"), None);
    }

    #[test]
    fn test_to_entry() {
        let commit = CommitEntry::new("abc", "PROJ-7: speed up sync\n\ndetails", 0);
        let entry = key_pattern().to_entry(&commit);
        assert_eq!(entry.raw_message, "PROJ-7: speed up sync");
        assert_eq!(entry.issue_key.as_deref(), Some("PROJ-7"));
        assert_eq!(entry.dedup_key(), "PROJ-7");
    }

    #[test]
    fn test_dedup_key_falls_back_to_message() {
        let entry = ChangelogEntry {
            raw_message: "chore: bump".to_string(),
            issue_key: None,
        };
        assert_eq!(entry.dedup_key(), "chore: bump");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(IssueKeyPattern::new("([A-Z").is_err());
        assert!(IssueKeyPattern::new("  ").is_err());
    }
}
