use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use regex::Regex;

use crate::changelog::{ChangelogSettings, IssueLinker, LinkFormat};
use crate::domain::{BuildTagPattern, IssueKeyPattern, VariantFilter};
use crate::error::{ChangelogError, Result};

/// Tag naming used when none is configured, e.g. `v1.42-release`
pub const DEFAULT_TAG_PATTERN: &str = "v{version}.{build}-{variant}";

/// Issue keys such as `PROJ-123`
pub const DEFAULT_COMMIT_MESSAGE_KEY: &str = r"([A-Z][A-Z0-9]+-\d+)";

/// Character cap applied to generated changelogs
pub const DEFAULT_MAX_LENGTH: usize = 2000;

const CONFIG_FILE_NAME: &str = "changelog.toml";
const USER_CONFIG_FILE_NAME: &str = "variant-changelog.toml";

/// Represents the complete configuration for variant-changelog.
///
/// Contains changelog rendering settings, the build tag naming pattern and
/// variant groups that share tag history.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub tags: TagsConfig,

    /// Variant name -> extra variants compared together with it
    #[serde(default)]
    pub variants: HashMap<String, Vec<String>>,
}

fn default_commit_message_key() -> String {
    DEFAULT_COMMIT_MESSAGE_KEY.to_string()
}

fn default_bullet() -> String {
    "- ".to_string()
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

fn default_skip_merge_commits() -> bool {
    true
}

/// Configuration for extracting and rendering changelog entries.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChangelogConfig {
    #[serde(default = "default_commit_message_key")]
    pub commit_message_key: String,

    /// Issue tracker URL the issue number is appended to; no links when absent
    #[serde(default)]
    pub issue_url_prefix: Option<String>,

    /// Pattern locating issue numbers to link; defaults to `commit_message_key`
    #[serde(default)]
    pub issue_number_pattern: Option<String>,

    #[serde(default)]
    pub link_format: LinkFormat,

    #[serde(default = "default_bullet")]
    pub bullet: String,

    #[serde(default = "default_max_length")]
    pub max_length: usize,

    #[serde(default = "default_skip_merge_commits")]
    pub skip_merge_commits: bool,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            commit_message_key: default_commit_message_key(),
            issue_url_prefix: None,
            issue_number_pattern: None,
            link_format: LinkFormat::default(),
            bullet: default_bullet(),
            max_length: default_max_length(),
            skip_merge_commits: default_skip_merge_commits(),
        }
    }
}

impl ChangelogConfig {
    /// Compile the patterns into builder settings
    pub fn to_settings(&self) -> Result<ChangelogSettings> {
        let key = IssueKeyPattern::new(&self.commit_message_key)?;

        let mut settings = ChangelogSettings::new(key.clone())
            .with_bullet(self.bullet.clone())
            .with_skip_merge_commits(self.skip_merge_commits);

        if let Some(prefix) = self
            .issue_url_prefix
            .as_deref()
            .filter(|p| !p.trim().is_empty())
        {
            let number_pattern = match self.issue_number_pattern.as_deref() {
                Some(pattern) => Regex::new(pattern).map_err(|e| {
                    ChangelogError::invalid_pattern(format!("{}: {}", pattern, e))
                })?,
                None => key.as_regex().clone(),
            };
            settings = settings.with_linker(IssueLinker::new(
                prefix,
                number_pattern,
                self.link_format,
            ));
        }

        Ok(settings)
    }
}

/// Configuration for build tag naming.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TagsConfig {
    #[serde(default = "default_tag_pattern")]
    pub pattern: String,
}

fn default_tag_pattern() -> String {
    DEFAULT_TAG_PATTERN.to_string()
}

impl Default for TagsConfig {
    fn default() -> Self {
        TagsConfig {
            pattern: default_tag_pattern(),
        }
    }
}

impl TagsConfig {
    pub fn to_pattern(&self) -> Result<BuildTagPattern> {
        BuildTagPattern::new(self.pattern.clone())
    }
}

impl Config {
    /// Variants compared against each other when building `variant`
    pub fn variant_filter(&self, variant: &str) -> VariantFilter {
        VariantFilter::for_variant(variant, &self.variants)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `changelog.toml` in current directory
/// 3. `variant-changelog.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config =
        toml::from_str(&config_str).map_err(|e| ChangelogError::config(e.to_string()))?;
    log::debug!("loaded configuration: {:?}", config);
    Ok(config)
}
