use crate::error::{ChangelogError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One completed build, identified by its git tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTag {
    pub name: String,
    pub build_number: u32,
    pub variant: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_sha: Option<String>,
}

impl BuildTag {
    /// Create a new build tag without a recorded commit
    pub fn new(name: impl Into<String>, build_number: u32, variant: impl Into<String>) -> Self {
        BuildTag {
            name: name.into(),
            build_number,
            variant: variant.into(),
            commit_sha: None,
        }
    }

    /// Attach the commit the tag points to
    pub fn with_commit_sha(mut self, sha: impl Into<String>) -> Self {
        self.commit_sha = Some(sha.into());
        self
    }
}

/// The pair of tags bounding the commits summarized by one changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRange {
    pub previous_build_tag: Option<BuildTag>,
    pub current_build_tag: BuildTag,
}

impl TagRange {
    pub fn new(previous_build_tag: Option<BuildTag>, current_build_tag: BuildTag) -> Self {
        TagRange {
            previous_build_tag,
            current_build_tag,
        }
    }

    /// Name of the previous tag, if there is one
    pub fn previous_name(&self) -> Option<&str> {
        self.previous_build_tag.as_ref().map(|tag| tag.name.as_str())
    }
}

/// Tag naming pattern (e.g., "v{version}.{build}-{variant}")
///
/// `{build}` and `{variant}` are required, `{version}` is optional.
#[derive(Debug, Clone)]
pub struct BuildTagPattern {
    pattern: String,
    regex: Regex,
}

impl BuildTagPattern {
    /// Compile a tag naming pattern
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();

        for placeholder in ["{build}", "{variant}"] {
            if !pattern.contains(placeholder) {
                return Err(ChangelogError::invalid_pattern(format!(
                    "Tag pattern '{}' must contain {} placeholder",
                    pattern, placeholder
                )));
            }
        }

        // Escape everything, then swap the escaped placeholders for capture groups
        let regex_pattern = regex::escape(&pattern)
            .replace(r"\{version\}", r"(?P<version>\d+(?:\.\d+)*)")
            .replace(r"\{build\}", r"(?P<build>\d+)")
            .replace(r"\{variant\}", r"(?P<variant>[A-Za-z0-9_][A-Za-z0-9_.\-]*)");

        let regex = Regex::new(&format!("^{}$", regex_pattern))
            .map_err(|e| ChangelogError::invalid_pattern(format!("{}: {}", pattern, e)))?;

        Ok(BuildTagPattern { pattern, regex })
    }

    /// The pattern as written in configuration
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Parse a tag name into a build tag, or `None` if it does not follow the pattern
    pub fn parse(&self, tag_name: &str) -> Option<BuildTag> {
        let captures = self.regex.captures(tag_name)?;
        let build_number: u32 = captures.name("build")?.as_str().parse().ok()?;
        if build_number == 0 {
            return None;
        }
        let variant = captures.name("variant")?.as_str();

        Some(BuildTag::new(tag_name, build_number, variant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_tag_new() {
        let tag = BuildTag::new("v1.5-release", 5, "release");
        assert_eq!(tag.name, "v1.5-release");
        assert_eq!(tag.build_number, 5);
        assert_eq!(tag.variant, "release");
        assert_eq!(tag.commit_sha, None);
    }

    #[test]
    fn test_tag_range_previous_name() {
        let current = BuildTag::new("v1.2.0", 5, "release");
        let range = TagRange::new(Some(BuildTag::new("v1.1.0", 4, "release")), current.clone());
        assert_eq!(range.previous_name(), Some("v1.1.0"));

        let first = TagRange::new(None, current);
        assert_eq!(first.previous_name(), None);
    }

    #[test]
    fn test_pattern_parses_default_layout() {
        let pattern = BuildTagPattern::new("v{version}.{build}-{variant}").unwrap();
        let tag = pattern.parse("v1.2.34-release").unwrap();
        assert_eq!(tag.build_number, 34);
        assert_eq!(tag.variant, "release");
        assert_eq!(tag.name, "v1.2.34-release");
    }

    #[test]
    fn test_pattern_parses_compound_variant() {
        let pattern = BuildTagPattern::new("v{version}.{build}-{variant}").unwrap();
        let tag = pattern.parse("v0.12-googleStaging-debug").unwrap();
        assert_eq!(tag.build_number, 12);
        assert_eq!(tag.variant, "googleStaging-debug");
    }

    #[test]
    fn test_pattern_without_version() {
        let pattern = BuildTagPattern::new("{variant}/build-{build}").unwrap();
        let tag = pattern.parse("staging/build-7").unwrap();
        assert_eq!(tag.build_number, 7);
        assert_eq!(tag.variant, "staging");
    }

    #[test]
    fn test_pattern_rejects_foreign_tags() {
        let pattern = BuildTagPattern::new("v{version}.{build}-{variant}").unwrap();
        assert!(pattern.parse("release-1.0").is_none());
        assert!(pattern.parse("v1.2.3").is_none());
        assert!(pattern.parse("v1.0-").is_none());
    }

    #[test]
    fn test_pattern_rejects_build_zero() {
        let pattern = BuildTagPattern::new("v{version}.{build}-{variant}").unwrap();
        assert!(pattern.parse("v1.0-release").is_none());
    }

    #[test]
    fn test_pattern_requires_placeholders() {
        assert!(BuildTagPattern::new("v{version}").is_err());
        assert!(BuildTagPattern::new("build-{build}").is_err());
    }

    #[test]
    fn test_build_tag_json_field_names() {
        let tag = BuildTag::new("v1.5-release", 5, "release");
        let json = serde_json::to_string(&tag).unwrap();
        assert_eq!(
            json,
            r#"{"name":"v1.5-release","buildNumber":5,"variant":"release"}"#
        );
    }
}
