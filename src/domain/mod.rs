//! Domain types - build tags, variants and commits, independent of git access

pub mod commit;
pub mod tag;
pub mod variant;

pub use commit::{ChangelogEntry, CommitEntry, IssueKeyPattern};
pub use tag::{BuildTag, BuildTagPattern, TagRange};
pub use variant::VariantFilter;
