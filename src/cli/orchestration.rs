//! Command workflows
//!
//! The logic behind each subcommand, kept apart from argument parsing so the
//! workflows can be called programmatically without depending on clap.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::changelog::ChangelogBuilder;
use crate::config::Config;
use crate::domain::{BuildTag, TagRange};
use crate::git::Git2Executor;
use crate::notice::ChangelogNotice;
use crate::record::{read_tag_record, write_tag_record};
use crate::resolver::TagResolver;
use crate::text::ellipsize_at_line;

/// Arguments for the generate workflow
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateArgs {
    /// Repository path (discovered upwards)
    pub repo: PathBuf,

    /// Build tag record of the current build
    pub tag_file: PathBuf,

    /// Variant to compare against; defaults to the record's variant
    pub variant: Option<String>,

    /// Where to write the changelog; printed only when absent
    pub output: Option<PathBuf>,

    /// Overrides the configured length cap
    pub max_length: Option<usize>,
}

/// Result of the generate workflow
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResult {
    /// The length-limited changelog, `None` when nothing was produced
    pub changelog: Option<String>,

    /// Set when the fallback text was used
    pub notice: Option<ChangelogNotice>,

    /// The file the changelog was written to
    pub written_to: Option<PathBuf>,
}

/// Arguments for the last-tag workflow
#[derive(Debug, Clone, PartialEq)]
pub struct LastTagArgs {
    pub repo: PathBuf,
    pub variant: String,

    /// Where to write the tag record
    pub output: Option<PathBuf>,
}

/// Fallback text used when a build has nothing to list
pub fn default_changelog_message(range: &TagRange) -> String {
    match range.previous_name() {
        Some(previous) => format!(
            "No changes in comparison with a previous build (**{}**)",
            previous
        ),
        None => "No changes in comparison with a previous build".to_string(),
    }
}

/// Generate the changelog for the build described by `args.tag_file`
///
/// 1. Read the current build tag record
/// 2. Open the repository with the configured tag pattern
/// 3. Build the changelog against the previous tag of the variant set
/// 4. Cap its length and write it out when an output path is given
pub fn run_generate(args: &GenerateArgs, config: &Config) -> Result<GenerateResult> {
    let current = read_tag_record(&args.tag_file).with_context(|| {
        format!("Failed to read tag record {}", args.tag_file.display())
    })?;
    let variant = args.variant.as_deref().unwrap_or(current.variant.as_str());
    let filter = config.variant_filter(variant);

    let git = Git2Executor::open(&args.repo, config.tags.to_pattern()?)?;
    let builder = ChangelogBuilder::new(&git, filter, config.changelog.to_settings()?);

    let mut notice = None;
    let max_length = args.max_length.unwrap_or(config.changelog.max_length);
    let changelog = builder
        .build_for_build_tag(&current, |range| {
            notice = Some(ChangelogNotice::for_range(range));
            default_changelog_message(range)
        })
        .with_context(|| format!("Failed to build changelog for {}", current.name))?
        .map(|text| ellipsize_at_line(&text, max_length))
        .filter(|text| !text.trim().is_empty());

    let written_to = match (&changelog, &args.output) {
        (Some(text), Some(path)) => {
            fs::write(path, text)
                .with_context(|| format!("Failed to write changelog {}", path.display()))?;
            log::debug!("changelog written to {}", path.display());
            Some(path.clone())
        }
        (None, _) => {
            log::debug!("changelog not generated");
            None
        }
        _ => None,
    };

    Ok(GenerateResult {
        changelog,
        notice,
        written_to,
    })
}

/// Find the most recent build tag of a variant and optionally persist it
pub fn run_last_tag(args: &LastTagArgs, config: &Config) -> Result<Option<BuildTag>> {
    let git = Git2Executor::open(&args.repo, config.tags.to_pattern()?)?;
    let filter = config.variant_filter(&args.variant);

    let last = TagResolver::new(&git).find_last_tag(&filter)?;
    if let (Some(tag), Some(path)) = (&last, &args.output) {
        write_tag_record(path, tag)
            .with_context(|| format!("Failed to write tag record {}", path.display()))?;
    }

    Ok(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_message_names_previous_build() {
        let range = TagRange::new(
            Some(BuildTag::new("v1.1.0", 4, "release")),
            BuildTag::new("v1.2.0", 5, "release"),
        );
        assert_eq!(
            default_changelog_message(&range),
            "No changes in comparison with a previous build (**v1.1.0**)"
        );
    }

    #[test]
    fn test_default_message_for_first_build() {
        let range = TagRange::new(None, BuildTag::new("v1.2.0", 5, "release"));
        assert_eq!(
            default_changelog_message(&range),
            "No changes in comparison with a previous build"
        );
    }
}
