use crate::domain::{BuildTag, BuildTagPattern, CommitEntry, VariantFilter};
use crate::error::{ChangelogError, Result};
use git2::{Oid, Repository as Git2Repo};
use std::path::Path;

/// Read-only wrapper around git2::Repository with our trait interface
pub struct Git2Executor {
    repo: Git2Repo,
    pattern: BuildTagPattern,
}

impl Git2Executor {
    /// Open or discover a git repository at or above `path`
    pub fn open<P: AsRef<Path>>(path: P, pattern: BuildTagPattern) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        log::debug!("opened repository at {}", repo.path().display());

        Ok(Git2Executor { repo, pattern })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo, pattern: BuildTagPattern) -> Self {
        Git2Executor { repo, pattern }
    }
}

impl super::GitCommandExecutor for Git2Executor {
    fn resolve_commit(&self, tag_name: &str) -> Result<Oid> {
        let reference_name = format!("refs/tags/{}", tag_name);

        match self.repo.find_reference(&reference_name) {
            Ok(reference) => Ok(reference.peel_to_commit()?.id()),
            Err(e)
                if e.code() == git2::ErrorCode::NotFound
                    || e.code() == git2::ErrorCode::InvalidSpec =>
            {
                Err(ChangelogError::tag_not_found(tag_name))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn log_between(&self, from: Option<Oid>, to: Oid) -> Result<Vec<CommitEntry>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;
        revwalk.push(to)?;
        if let Some(from) = from {
            revwalk.hide(from)?;
        }

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;

            commits.push(CommitEntry {
                hash: oid.to_string(),
                message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
                author_date: commit.author().when().seconds(),
                is_merge: commit.parent_count() > 1,
            });
        }

        log::debug!(
            "read {} commits between {} and {}",
            commits.len(),
            from.map(|oid| oid.to_string())
                .unwrap_or_else(|| "root".to_string()),
            to
        );
        Ok(commits)
    }

    fn list_tags(&self, filter: &VariantFilter) -> Result<Vec<BuildTag>> {
        let names = self.repo.tag_names(None)?;

        let mut tags = Vec::new();
        for name in names.iter().flatten() {
            let Some(tag) = self.pattern.parse(name) else {
                log::debug!(
                    "skipping tag '{}': does not match '{}'",
                    name,
                    self.pattern.as_str()
                );
                continue;
            };
            if !filter.contains(&tag.variant) {
                continue;
            }

            match self.resolve_commit(name) {
                Ok(oid) => tags.push(tag.with_commit_sha(oid.to_string())),
                Err(ChangelogError::TagNotFound(_)) => {
                    log::debug!("skipping tag '{}': reference vanished", name)
                }
                Err(e) => log::warn!("ignoring build tag '{}': {}", name, e),
            }
        }

        super::sort_most_recent_first(&mut tags);
        Ok(tags)
    }
}
