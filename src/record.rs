//! Persisted build tag records (`tag-build-<variant>.json`)

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::BuildTag;
use crate::error::{ChangelogError, Result};

/// Conventional record file name for a variant
pub fn record_file_name(variant: &str) -> PathBuf {
    PathBuf::from(format!("tag-build-{}.json", variant))
}

/// Read a build tag record
pub fn read_tag_record<P: AsRef<Path>>(path: P) -> Result<BuildTag> {
    let content = fs::read_to_string(path)?;
    let tag: BuildTag = serde_json::from_str(&content)?;
    if tag.build_number == 0 {
        return Err(ChangelogError::config(format!(
            "tag record '{}' has build number 0",
            tag.name
        )));
    }
    Ok(tag)
}

/// Write a build tag record, replacing any existing one
pub fn write_tag_record<P: AsRef<Path>>(path: P, tag: &BuildTag) -> Result<()> {
    let content = serde_json::to_string_pretty(tag)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_file_name() {
        assert_eq!(
            record_file_name("googleRelease"),
            PathBuf::from("tag-build-googleRelease.json")
        );
    }

    #[test]
    fn test_read_record_with_extra_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tag-build-release.json");
        fs::write(
            &path,
            r#"{"name":"v1.2.0","buildNumber":5,"variant":"release","buildVersion":"1.2"}"#,
        )
        .unwrap();

        let tag = read_tag_record(&path).unwrap();
        assert_eq!(tag, BuildTag::new("v1.2.0", 5, "release"));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tag-build-release.json");
        let tag = BuildTag::new("v1.6-release", 6, "release").with_commit_sha("abc123");

        write_tag_record(&path, &tag).unwrap();
        assert_eq!(read_tag_record(&path).unwrap(), tag);
    }

    #[test]
    fn test_missing_field_is_record_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, r#"{"name":"v1.2.0","variant":"release"}"#).unwrap();

        assert!(matches!(
            read_tag_record(&path),
            Err(ChangelogError::TagRecord(_))
        ));
    }

    #[test]
    fn test_build_number_zero_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tag-build-release.json");
        fs::write(
            &path,
            r#"{"name":"v1.0-release","buildNumber":0,"variant":"release"}"#,
        )
        .unwrap();

        assert!(matches!(
            read_tag_record(&path),
            Err(ChangelogError::Config(msg)) if msg.contains("v1.0-release")
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_tag_record(dir.path().join("absent.json")),
            Err(ChangelogError::Io(_))
        ));
    }
}
