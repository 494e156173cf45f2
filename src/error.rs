use thiserror::Error;

/// Unified error type for changelog generation
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Tag not found: {0}")]
    TagNotFound(String),

    #[error("Repository access failed: {0}")]
    RepositoryAccess(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Tag record error: {0}")]
    TagRecord(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in variant-changelog
pub type Result<T> = std::result::Result<T, ChangelogError>;

impl ChangelogError {
    /// Create a tag-not-found error for the given tag name
    pub fn tag_not_found(name: impl Into<String>) -> Self {
        ChangelogError::TagNotFound(name.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangelogError::Config(msg.into())
    }

    /// Create a pattern error with context
    pub fn invalid_pattern(msg: impl Into<String>) -> Self {
        ChangelogError::InvalidPattern(msg.into())
    }
}
