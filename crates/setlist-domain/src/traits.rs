//! Trait definitions for rule storage
//!
//! These traits define the boundary between recommendation logic and
//! rule storage. Implementations live in other crates.

use crate::{ItemSet, Rule};

/// Read-only access to a loaded rule corpus
///
/// Implemented by the storage layer (setlist-store)
pub trait RuleLookup {
    /// All rules whose antecedent is a subset of `seeds`, in corpus order
    ///
    /// Each call starts a fresh, finite pass over the corpus and has no
    /// side effects.
    fn rules_matching<'a>(&'a self, seeds: &'a ItemSet) -> Box<dyn Iterator<Item = &'a Rule> + 'a>;

    /// Number of rules in the corpus
    fn rule_count(&self) -> usize;

    /// The first `k` rules of the corpus (fewer if the corpus is smaller)
    fn sample(&self, k: usize) -> &[Rule];
}
