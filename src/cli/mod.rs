pub mod orchestration;

pub use orchestration::{
    default_changelog_message, run_generate, run_last_tag, GenerateArgs, GenerateResult,
    LastTagArgs,
};
