//! Changelog generation: commit collection, deduplication and rendering

pub mod builder;
pub mod render;

pub use builder::{ChangelogBuilder, ChangelogSettings};
pub use render::{render_entries, IssueLinker, LinkFormat};
