//! User interface module - terminal output for the command line tool.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_build_tag, display_changelog, display_error, display_notice, display_status,
    display_success,
};
