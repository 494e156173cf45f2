//! Turning changelog entries into text, with optional issue links

use crate::domain::ChangelogEntry;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// How an issue reference is written as a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkFormat {
    /// `[KEY](url)`
    #[default]
    Markdown,
    /// `<url|KEY>`
    Slack,
    /// `<a href="url">KEY</a>`
    Html,
}

/// Substitutes issue numbers in text with links to the issue tracker
#[derive(Debug, Clone)]
pub struct IssueLinker {
    url_prefix: String,
    number_pattern: Regex,
    format: LinkFormat,
}

impl IssueLinker {
    /// `number_pattern` locates issue numbers; its first capture group, when
    /// present, is the part appended to `url_prefix`
    pub fn new(url_prefix: impl Into<String>, number_pattern: Regex, format: LinkFormat) -> Self {
        IssueLinker {
            url_prefix: url_prefix.into(),
            number_pattern,
            format,
        }
    }

    /// Link for one issue, shown as `text` and pointing at `prefix + number`
    pub fn link(&self, text: &str, number: &str) -> String {
        let url = format!("{}{}", self.url_prefix, number);
        match self.format {
            LinkFormat::Markdown => format!("[{}]({})", text, url),
            LinkFormat::Slack => format!("<{}|{}>", url, text),
            LinkFormat::Html => format!("<a href=\"{}\">{}</a>", url, text),
        }
    }

    /// Replace every issue number in `text` with a link
    pub fn linkify(&self, text: &str) -> String {
        self.number_pattern
            .replace_all(text, |caps: &Captures| {
                let whole = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
                let number = caps.get(1).map(|m| m.as_str()).unwrap_or(whole);
                self.link(whole, number)
            })
            .into_owned()
    }
}

/// Render entries one per line, in the given order
///
/// Entries carrying an issue key get their issue numbers linked when a
/// linker is configured; all others are written as plain text.
pub fn render_entries(
    entries: &[ChangelogEntry],
    bullet: &str,
    linker: Option<&IssueLinker>,
) -> String {
    entries
        .iter()
        .map(|entry| {
            let text = match (&entry.issue_key, linker) {
                (Some(_), Some(linker)) => linker.linkify(&entry.raw_message),
                _ => entry.raw_message.clone(),
            };
            format!("{}{}", bullet, text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
