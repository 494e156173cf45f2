pub mod changelog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod notice;
pub mod record;
pub mod resolver;
pub mod text;
pub mod ui;

pub use error::{ChangelogError, Result};
