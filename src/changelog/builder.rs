use std::collections::HashSet;

use crate::changelog::render::{render_entries, IssueLinker};
use crate::domain::{BuildTag, ChangelogEntry, CommitEntry, IssueKeyPattern, TagRange, VariantFilter};
use crate::error::Result;
use crate::git::GitCommandExecutor;
use crate::notice::ChangelogNotice;
use crate::resolver::TagResolver;

/// How commits are turned into changelog lines
#[derive(Debug, Clone)]
pub struct ChangelogSettings {
    pub commit_message_key: IssueKeyPattern,
    pub linker: Option<IssueLinker>,
    pub bullet: String,
    pub skip_merge_commits: bool,
}

impl ChangelogSettings {
    /// Settings with plain-text rendering, `"- "` bullets and merge commits skipped
    pub fn new(commit_message_key: IssueKeyPattern) -> Self {
        ChangelogSettings {
            commit_message_key,
            linker: None,
            bullet: "- ".to_string(),
            skip_merge_commits: true,
        }
    }

    pub fn with_linker(mut self, linker: IssueLinker) -> Self {
        self.linker = Some(linker);
        self
    }

    pub fn with_bullet(mut self, bullet: impl Into<String>) -> Self {
        self.bullet = bullet.into();
        self
    }

    pub fn with_skip_merge_commits(mut self, skip: bool) -> Self {
        self.skip_merge_commits = skip;
        self
    }

    /// Reduce commits (newest first) to unique entries, keeping commit order
    ///
    /// Commits sharing an issue key collapse into the first, most recent one.
    /// Commits without a key are deduplicated by subject text.
    pub fn collect_entries(&self, commits: &[CommitEntry]) -> Vec<ChangelogEntry> {
        let mut seen_issues = HashSet::new();
        let mut seen_messages = HashSet::new();
        let mut entries = Vec::new();

        for commit in commits {
            if self.skip_merge_commits && commit.is_merge {
                continue;
            }
            let entry = self.commit_message_key.to_entry(commit);
            if entry.raw_message.is_empty() {
                continue;
            }

            let is_new = match &entry.issue_key {
                Some(key) => seen_issues.insert(key.clone()),
                None => seen_messages.insert(entry.raw_message.clone()),
            };
            if is_new {
                entries.push(entry);
            }
        }

        entries
    }
}

/// Builds the changelog of one build from the commits since the previous build of its variant set
pub struct ChangelogBuilder<'a, E: GitCommandExecutor> {
    git: &'a E,
    resolver: TagResolver<'a, E>,
    variants: VariantFilter,
    settings: ChangelogSettings,
}

impl<'a, E: GitCommandExecutor> ChangelogBuilder<'a, E> {
    pub fn new(git: &'a E, variants: VariantFilter, settings: ChangelogSettings) -> Self {
        ChangelogBuilder {
            git,
            resolver: TagResolver::new(git),
            variants,
            settings,
        }
    }

    /// Build the changelog for `current`
    ///
    /// When the range holds nothing worth listing, the text from
    /// `default_value` is returned instead; a blank fallback yields `None`.
    /// Repository failures propagate and are never reported as "no changes".
    /// The result is not length-limited.
    pub fn build_for_build_tag<F>(&self, current: &BuildTag, default_value: F) -> Result<Option<String>>
    where
        F: FnOnce(&TagRange) -> String,
    {
        let previous = self.resolver.find_previous_tag(current, &self.variants)?;
        let range = TagRange::new(previous, current.clone());

        let to = self.git.resolve_commit(&current.name)?;
        let from = match &range.previous_build_tag {
            Some(tag) => Some(self.git.resolve_commit(&tag.name)?),
            None => None,
        };

        let commits = self.git.log_between(from, to)?;
        if commits.is_empty() {
            return Ok(fallback(&range, default_value));
        }

        let entries = self.settings.collect_entries(&commits);
        log::debug!(
            "{} commits reduced to {} changelog entries for {}",
            commits.len(),
            entries.len(),
            current.name
        );

        let rendered = render_entries(
            &entries,
            &self.settings.bullet,
            self.settings.linker.as_ref(),
        );
        if rendered.trim().is_empty() {
            return Ok(fallback(&range, default_value));
        }

        Ok(Some(rendered))
    }
}

fn fallback<F>(range: &TagRange, default_value: F) -> Option<String>
where
    F: FnOnce(&TagRange) -> String,
{
    log::debug!("{}", ChangelogNotice::for_range(range));
    let text = default_value(range);
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
