//! Inverted index over rule antecedents
//!
//! Maps every antecedent item to the sorted list of rule positions whose
//! antecedent contains it. A lookup walks the postings of each seed item
//! and counts hits per rule; a rule is a candidate exactly when its hit
//! count reaches its antecedent size, i.e. every antecedent item was seen
//! among the seeds.
//!
//! # Complexity
//!
//! - Build: O(total antecedent items)
//! - Lookup: O(sum of posting lengths for the seed items), independent of
//!   the number of rules whose antecedents share no item with the seeds
//!
//! Seeds are an [`ItemSet`] and therefore deduplicated, which is what makes
//! the hit count exact.

use setlist_domain::{ItemSet, Rule};
use std::collections::HashMap;

/// Inverted index from antecedent item to rule positions
#[derive(Debug, Clone, Default)]
pub struct RuleIndex {
    /// Item -> ascending rule positions whose antecedent contains the item
    postings: HashMap<String, Vec<usize>>,

    /// Antecedent size per rule position
    arity: Vec<usize>,
}

impl RuleIndex {
    /// Build an index over `rules`, addressing them by slice position
    pub fn build(rules: &[Rule]) -> Self {
        let mut postings: HashMap<String, Vec<usize>> = HashMap::new();
        let mut arity = Vec::with_capacity(rules.len());

        for (position, rule) in rules.iter().enumerate() {
            arity.push(rule.antecedent().len());
            for item in rule.antecedent().iter() {
                // Positions are visited in ascending order, so each list stays sorted
                postings.entry(item.to_string()).or_default().push(position);
            }
        }

        Self { postings, arity }
    }

    /// Positions of rules whose antecedent is a subset of `seeds`, ascending
    pub fn candidates(&self, seeds: &ItemSet) -> Vec<usize> {
        let mut hits: HashMap<usize, usize> = HashMap::new();

        for item in seeds.iter() {
            if let Some(positions) = self.postings.get(item) {
                for &position in positions {
                    *hits.entry(position).or_insert(0) += 1;
                }
            }
        }

        let mut matched: Vec<usize> = hits
            .into_iter()
            .filter(|&(position, count)| count == self.arity[position])
            .map(|(position, _)| position)
            .collect();
        matched.sort_unstable();
        matched
    }

    /// Number of distinct antecedent items
    pub fn item_count(&self) -> usize {
        self.postings.len()
    }

    /// Number of indexed rules
    pub fn len(&self) -> usize {
        self.arity.len()
    }

    /// Whether the index covers no rules
    pub fn is_empty(&self) -> bool {
        self.arity.is_empty()
    }

    /// Number of rules whose antecedent contains `item`
    pub fn posting_len(&self, item: &str) -> usize {
        self.postings.get(item).map_or(0, Vec::len)
    }
}
