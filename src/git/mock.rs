use crate::domain::{BuildTag, BuildTagPattern, CommitEntry, VariantFilter};
use crate::error::{ChangelogError, Result};
use crate::git::GitCommandExecutor;
use git2::Oid;
use std::collections::{HashMap, HashSet};

struct MockCommit {
    entry: CommitEntry,
    parents: Vec<Oid>,
    sequence: usize,
}

/// In-memory commit graph for exercising changelog generation without a repository
pub struct MockExecutor {
    commits: HashMap<Oid, MockCommit>,
    tags: HashMap<String, Oid>,
    build_tags: HashMap<String, BuildTag>,
    pattern: BuildTagPattern,
    head: Option<Oid>,
}

impl MockExecutor {
    /// Create a new empty mock repository using the given tag pattern
    pub fn new(pattern: BuildTagPattern) -> Self {
        MockExecutor {
            commits: HashMap::new(),
            tags: HashMap::new(),
            build_tags: HashMap::new(),
            pattern,
            head: None,
        }
    }

    /// Append a commit on top of the current head and return its id
    ///
    /// Ids are derived from the insertion sequence, so later commits are newer.
    pub fn commit(&mut self, message: impl Into<String>) -> Oid {
        let parents: Vec<Oid> = self.head.into_iter().collect();
        self.add_commit(message, parents)
    }

    /// Add a commit with explicit parents; it becomes the new head
    pub fn add_commit(&mut self, message: impl Into<String>, parents: Vec<Oid>) -> Oid {
        let sequence = self.commits.len() + 1;
        let oid = oid_for(sequence);
        let entry = CommitEntry {
            hash: oid.to_string(),
            message: message.into(),
            author_date: 1_700_000_000 + sequence as i64 * 60,
            is_merge: parents.len() > 1,
        };

        self.commits.insert(
            oid,
            MockCommit {
                entry,
                parents,
                sequence,
            },
        );
        self.head = Some(oid);
        oid
    }

    /// Move the head to an existing commit, e.g. to start a side branch
    pub fn checkout(&mut self, oid: Oid) {
        self.head = Some(oid);
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.insert(name.into(), oid);
    }

    /// Add a tag with explicit build metadata, bypassing the tag pattern
    pub fn add_build_tag(&mut self, tag: BuildTag, oid: Oid) {
        self.tags.insert(tag.name.clone(), oid);
        self.build_tags.insert(tag.name.clone(), tag);
    }

    fn reachable_from(&self, start: Oid) -> HashSet<Oid> {
        let mut seen = HashSet::new();
        let mut stack = vec![start];
        while let Some(oid) = stack.pop() {
            if !seen.insert(oid) {
                continue;
            }
            if let Some(commit) = self.commits.get(&oid) {
                stack.extend(commit.parents.iter().copied());
            }
        }
        seen
    }
}

fn oid_for(sequence: usize) -> Oid {
    let mut bytes = [0u8; 20];
    bytes[12..20].copy_from_slice(&(sequence as u64).to_be_bytes());
    // 20 bytes is always a valid object id
    Oid::from_bytes(&bytes).unwrap_or_else(|_| Oid::zero())
}

impl GitCommandExecutor for MockExecutor {
    fn resolve_commit(&self, tag_name: &str) -> Result<Oid> {
        self.tags
            .get(tag_name)
            .copied()
            .ok_or_else(|| ChangelogError::tag_not_found(tag_name))
    }

    fn log_between(&self, from: Option<Oid>, to: Oid) -> Result<Vec<CommitEntry>> {
        if !self.commits.contains_key(&to) {
            return Err(git2::Error::from_str(&format!("object not found - {}", to)).into());
        }

        let hidden = from
            .map(|oid| self.reachable_from(oid))
            .unwrap_or_default();

        let mut range: Vec<&MockCommit> = self
            .reachable_from(to)
            .into_iter()
            .filter(|oid| !hidden.contains(oid))
            .filter_map(|oid| self.commits.get(&oid))
            .collect();
        range.sort_by(|a, b| b.sequence.cmp(&a.sequence));

        Ok(range.into_iter().map(|c| c.entry.clone()).collect())
    }

    fn list_tags(&self, filter: &VariantFilter) -> Result<Vec<BuildTag>> {
        let mut tags: Vec<BuildTag> = self
            .tags
            .iter()
            .filter_map(|(name, oid)| {
                self.build_tags
                    .get(name)
                    .cloned()
                    .or_else(|| self.pattern.parse(name))
                    .map(|tag| tag.with_commit_sha(oid.to_string()))
            })
            .filter(|tag| filter.contains(&tag.variant))
            .collect();

        super::sort_most_recent_first(&mut tags);
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock() -> MockExecutor {
        MockExecutor::new(BuildTagPattern::new("v{version}.{build}-{variant}").unwrap())
    }

    #[test]
    fn test_mock_resolve_tag() {
        let mut repo = mock();
        let oid = repo.commit("initial");
        repo.add_tag("v1.1-release", oid);

        assert_eq!(repo.resolve_commit("v1.1-release").unwrap(), oid);
        assert!(matches!(
            repo.resolve_commit("v1.2-release"),
            Err(ChangelogError::TagNotFound(_))
        ));
    }

    #[test]
    fn test_mock_log_between_linear() {
        let mut repo = mock();
        let first = repo.commit("first");
        repo.commit("second");
        let third = repo.commit("third");

        let all = repo.log_between(None, third).unwrap();
        let messages: Vec<&str> = all.iter().map(|c| c.message.as_str()).collect();
        assert_eq!(messages, vec!["third", "second", "first"]);

        let range = repo.log_between(Some(first), third).unwrap();
        assert_eq!(range.len(), 2);
        assert!(repo.log_between(Some(third), third).unwrap().is_empty());
    }

    #[test]
    fn test_mock_log_between_excludes_merged_side_branch_history() {
        let mut repo = mock();
        let base = repo.commit("base");
        let side = repo.commit("side work");
        repo.checkout(base);
        let main = repo.commit("main work");
        let merge = repo.add_commit("Merge branch 'side'", vec![main, side]);

        let range = repo.log_between(Some(side), merge).unwrap();
        let messages: Vec<&str> = range.iter().map(|c| c.message.as_str()).collect();
        assert_eq!(messages, vec!["Merge branch 'side'", "main work"]);
        assert!(range[0].is_merge);
    }

    #[test]
    fn test_mock_unknown_commit_is_access_error() {
        let repo = mock();
        let result = repo.log_between(None, Oid::zero());
        assert!(matches!(result, Err(ChangelogError::RepositoryAccess(_))));
    }

    #[test]
    fn test_mock_list_tags() {
        let mut repo = mock();
        let oid = repo.commit("initial");
        repo.add_tag("v1.1-release", oid);
        repo.add_tag("v1.2-release", oid);
        repo.add_tag("v1.5-staging", oid);

        let tags = repo.list_tags(&VariantFilter::single("release")).unwrap();
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["v1.2-release", "v1.1-release"]);
    }

    #[test]
    fn test_mock_explicit_build_tag() {
        let mut repo = mock();
        let oid = repo.commit("initial");
        repo.add_build_tag(BuildTag::new("v1.1.0", 4, "release"), oid);

        let tags = repo.list_tags(&VariantFilter::single("release")).unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].build_number, 4);
        assert_eq!(repo.resolve_commit("v1.1.0").unwrap(), oid);
    }
}
