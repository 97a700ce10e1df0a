//! Item sets - ordered, deduplicated collections of item identifiers

use std::collections::BTreeSet;
use std::fmt;

/// An ordered, deduplicated set of item identifiers
///
/// Items are kept sorted so that iteration order is deterministic
/// regardless of how the set was built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ItemSet(BTreeSet<String>);

impl ItemSet {
    /// Create an empty item set
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct items
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no items
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the set contains `item`
    pub fn contains(&self, item: &str) -> bool {
        self.0.contains(item)
    }

    /// Add an item, returning `false` if it was already present
    pub fn insert(&mut self, item: impl Into<String>) -> bool {
        self.0.insert(item.into())
    }

    /// Whether every item of `self` is also in `other`
    ///
    /// The empty set is a subset of every set.
    pub fn is_subset(&self, other: &ItemSet) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Whether `self` and `other` share no items
    pub fn is_disjoint(&self, other: &ItemSet) -> bool {
        self.0.is_disjoint(&other.0)
    }

    /// Items present in both sets, in order
    pub fn intersection<'a>(&'a self, other: &'a ItemSet) -> impl Iterator<Item = &'a str> {
        self.0.intersection(&other.0).map(String::as_str)
    }

    /// Iterate over items in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Collect items into an ordered `Vec`
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ItemSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for ItemSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ItemSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "}}")
    }
}
