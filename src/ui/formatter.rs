//! Pure formatting functions for terminal output.
//!
//! Functions here only print; they hold no state and make no decisions.

use console::style;

use crate::domain::BuildTag;
use crate::notice::ChangelogNotice;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a notice explaining why the fallback text was used.
pub fn display_notice(notice: &ChangelogNotice) {
    eprintln!("{} {}", style("⚠ NOTICE:").yellow(), notice);
}

/// Display the last build tag of a variant set.
pub fn display_build_tag(tag: &BuildTag) {
    println!("{}", style("Last build tag:").bold());
    println!("  Name:    {}", style(&tag.name).green());
    println!("  Build:   {}", tag.build_number);
    println!("  Variant: {}", tag.variant);
}

/// Print a generated changelog under a heading.
pub fn display_changelog(changelog: &str) {
    println!("\n{}", style("Changelog:").bold().underlined());
    println!("{}", changelog);
}
