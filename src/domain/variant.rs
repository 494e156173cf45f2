use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Set of build variants whose tags are compared with each other
///
/// Normally holds only the variant being built; configured variant groups
/// add the variants that share its tag history.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariantFilter {
    variants: BTreeSet<String>,
}

impl VariantFilter {
    /// Filter matching exactly one variant
    pub fn single(variant: impl Into<String>) -> Self {
        let mut variants = BTreeSet::new();
        variants.insert(variant.into());
        VariantFilter { variants }
    }

    /// Filter for `variant` plus any variants grouped with it in configuration
    pub fn for_variant(variant: &str, groups: &HashMap<String, Vec<String>>) -> Self {
        let mut filter = VariantFilter::single(variant);
        if let Some(extra) = groups.get(variant) {
            filter.variants.extend(extra.iter().cloned());
        }
        filter
    }

    pub fn contains(&self, variant: &str) -> bool {
        self.variants.contains(variant)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for VariantFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        VariantFilter {
            variants: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for VariantFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
