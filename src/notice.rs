use std::fmt;

use crate::domain::TagRange;

/// Non-fatal outcomes of changelog generation that end in the fallback text.
/// These are reported to the user, never raised as errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangelogNotice {
    /// First build of the variant set, and its history had nothing to show
    NoPreviousTag { current_tag: String },
    /// A previous build exists but nothing between it and the current build made it into the changelog
    EmptyChangelog {
        previous_tag: String,
        current_tag: String,
    },
}

impl ChangelogNotice {
    /// Notice describing why `range` produced no changelog entries
    pub fn for_range(range: &TagRange) -> Self {
        let current_tag = range.current_build_tag.name.clone();
        match range.previous_name() {
            Some(previous) => ChangelogNotice::EmptyChangelog {
                previous_tag: previous.to_string(),
                current_tag,
            },
            None => ChangelogNotice::NoPreviousTag { current_tag },
        }
    }
}

impl fmt::Display for ChangelogNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangelogNotice::NoPreviousTag { current_tag } => {
                write!(
                    f,
                    "No previous build tag for '{}' and no changes in its history",
                    current_tag
                )
            }
            ChangelogNotice::EmptyChangelog {
                previous_tag,
                current_tag,
            } => {
                write!(
                    f,
                    "No changes between '{}' and '{}'",
                    previous_tag, current_tag
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BuildTag;

    #[test]
    fn test_notice_for_first_build() {
        let range = TagRange::new(None, BuildTag::new("v1.1-release", 1, "release"));
        let notice = ChangelogNotice::for_range(&range);
        assert_eq!(
            notice,
            ChangelogNotice::NoPreviousTag {
                current_tag: "v1.1-release".to_string()
            }
        );
        assert!(notice.to_string().contains("v1.1-release"));
    }

    #[test]
    fn test_notice_for_empty_range() {
        let range = TagRange::new(
            Some(BuildTag::new("v1.1.0", 4, "release")),
            BuildTag::new("v1.2.0", 5, "release"),
        );
        let notice = ChangelogNotice::for_range(&range);
        assert_eq!(
            notice.to_string(),
            "No changes between 'v1.1.0' and 'v1.2.0'"
        );
    }
}
