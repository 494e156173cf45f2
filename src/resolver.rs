//! Previous-tag resolution for a build variant

use crate::domain::{BuildTag, VariantFilter};
use crate::error::Result;
use crate::git::GitCommandExecutor;

/// Finds the tag a build is compared against
///
/// Resolution is by build number within the variant filter, not by commit
/// ancestry.
pub struct TagResolver<'a, E: GitCommandExecutor> {
    git: &'a E,
}

impl<'a, E: GitCommandExecutor> TagResolver<'a, E> {
    pub fn new(git: &'a E) -> Self {
        TagResolver { git }
    }

    /// The tag with the highest build number strictly below the current one
    ///
    /// Returns `Ok(None)` when there is no earlier build for the variant set.
    /// Among tags sharing a build number the lexically greatest name wins.
    pub fn find_previous_tag(
        &self,
        current: &BuildTag,
        filter: &VariantFilter,
    ) -> Result<Option<BuildTag>> {
        let previous = self
            .git
            .list_tags(filter)?
            .into_iter()
            .filter(|tag| tag.name != current.name)
            .find(|tag| tag.build_number < current.build_number);

        match &previous {
            Some(tag) => log::debug!(
                "previous tag for {} in {} is {} (build {})",
                current.name,
                filter,
                tag.name,
                tag.build_number
            ),
            None => log::debug!("no previous tag for {} in {}", current.name, filter),
        }
        Ok(previous)
    }

    /// The most recent build tag of the variant set
    pub fn find_last_tag(&self, filter: &VariantFilter) -> Result<Option<BuildTag>> {
        Ok(self.git.list_tags(filter)?.into_iter().next())
    }
}
