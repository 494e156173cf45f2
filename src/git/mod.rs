//! Read-only git access layer
//!
//! This module provides a trait-based abstraction over the few version-control
//! queries changelog generation needs, allowing for a real git2-backed
//! implementation and an in-memory one for tests.
//!
//! # Overview
//!
//! - [repository::Git2Executor]: reads a real repository through the `git2` crate
//! - [mock::MockExecutor]: an in-memory commit graph with tags
//!
//! Code that builds changelogs depends on the [GitCommandExecutor] trait only.
//!
//! ```rust
//! # use variant_changelog::git::GitCommandExecutor;
//! # use variant_changelog::domain::VariantFilter;
//! # fn example<E: GitCommandExecutor>(git: &E) -> variant_changelog::Result<()> {
//! let tags = git.list_tags(&VariantFilter::single("release"))?;
//! if let Some(latest) = tags.first() {
//!     let head = git.resolve_commit(&latest.name)?;
//!     let commits = git.log_between(None, head)?;
//!     println!("{} commits up to {}", commits.len(), latest.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockExecutor;
pub use repository::Git2Executor;

use crate::domain::{BuildTag, CommitEntry, VariantFilter};
use crate::error::Result;
use git2::Oid;

/// Read-only version-control queries
///
/// Implementations never mutate the repository. They are `Send` so that
/// separate variants can be processed on separate threads, each with its own
/// executor.
pub trait GitCommandExecutor: Send {
    /// Resolve a tag name to the commit it points to
    ///
    /// Annotated tags are peeled to their target commit.
    ///
    /// # Returns
    /// * `Ok(Oid)` - The tagged commit
    /// * `Err(ChangelogError::TagNotFound)` - If no such tag exists
    /// * `Err(ChangelogError::RepositoryAccess)` - If the repository cannot be read
    fn resolve_commit(&self, tag_name: &str) -> Result<Oid>;

    /// Commits reachable from `to` and not reachable from `from`, newest first
    ///
    /// With `from` absent the whole history reachable from `to` is returned.
    /// The range excludes `from` and includes `to`.
    fn log_between(&self, from: Option<Oid>, to: Oid) -> Result<Vec<CommitEntry>>;

    /// Build tags whose variant is in `filter`
    ///
    /// Ordered by build number descending; equal build numbers are ordered by
    /// tag name descending. Tags that do not follow the build tag pattern are
    /// skipped.
    fn list_tags(&self, filter: &VariantFilter) -> Result<Vec<BuildTag>>;
}

/// Order tags most recent build first, ties by lexically greatest name
pub(crate) fn sort_most_recent_first(tags: &mut [BuildTag]) {
    tags.sort_by(|a, b| {
        b.build_number
            .cmp(&a.build_number)
            .then_with(|| b.name.cmp(&a.name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_most_recent_first() {
        let mut tags = vec![
            BuildTag::new("v1.3-release", 3, "release"),
            BuildTag::new("v1.9-release", 9, "release"),
            BuildTag::new("a-dup", 5, "release"),
            BuildTag::new("b-dup", 5, "release"),
        ];
        sort_most_recent_first(&mut tags);

        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["v1.9-release", "b-dup", "a-dup", "v1.3-release"]);
    }
}
