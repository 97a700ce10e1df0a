//! Recommendation ranking

use crate::{EngineConfig, SeedSet};
use serde::Serialize;
use setlist_domain::{Confidence, RuleLookup};
use std::collections::HashMap;
use tracing::{debug, warn};

/// A recommended item with the confidence of its strongest supporting rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredItem {
    /// Item identifier
    pub item: String,

    /// Highest confidence among the matched rules recommending this item
    pub confidence: f64,
}

/// Stateless recommender over a rule corpus
///
/// The engine holds only configuration; every call is a pure function of
/// the corpus and the request, so one engine can serve any number of
/// concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: EngineConfig,
}

impl RecommendationEngine {
    /// Create an engine with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Recommend up to `top_n` items for `seeds`
    ///
    /// Collects the consequents of every rule whose antecedent is covered by
    /// the seeds, ranks them by the best confidence among those rules
    /// (descending), breaks ties by identifier (ascending) and truncates.
    /// An empty seed set or `top_n == 0` yields an empty list.
    pub fn recommend<L>(&self, lookup: &L, seeds: &SeedSet, top_n: usize) -> Vec<String>
    where
        L: RuleLookup + ?Sized,
    {
        self.recommend_scored(lookup, seeds, top_n)
            .into_iter()
            .map(|scored| scored.item)
            .collect()
    }

    /// Like [`RecommendationEngine::recommend`], keeping each item's score
    pub fn recommend_scored<L>(&self, lookup: &L, seeds: &SeedSet, top_n: usize) -> Vec<ScoredItem>
    where
        L: RuleLookup + ?Sized,
    {
        let top_n = top_n.min(self.config.max_top_n);
        if seeds.is_empty() || top_n == 0 {
            return Vec::new();
        }

        let mut best: HashMap<&str, Confidence> = HashMap::new();
        let mut matched_rules = 0usize;

        for rule in lookup.rules_matching(seeds.items()) {
            matched_rules += 1;
            let confidence = rule.confidence();
            for item in rule.consequent().iter() {
                if self.config.exclude_seed_items && seeds.contains(item) {
                    continue;
                }
                best.entry(item)
                    .and_modify(|current| *current = (*current).max(confidence))
                    .or_insert(confidence);
            }
        }

        let candidates = best.len();
        let mut ranked: Vec<(&str, Confidence)> = best.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(top_n);

        debug!(
            seeds = seeds.len(),
            matched_rules,
            candidates,
            returned = ranked.len(),
            "Ranked recommendations"
        );

        ranked
            .into_iter()
            .map(|(item, confidence)| ScoredItem {
                item: item.to_string(),
                confidence: confidence.value(),
            })
            .collect()
    }

    /// Recommend from raw JSON seed input
    ///
    /// Malformed input is recovered here: it is logged and answered with an
    /// empty list instead of an error.
    pub fn recommend_json<L>(&self, lookup: &L, seeds: &serde_json::Value, top_n: usize) -> Vec<String>
    where
        L: RuleLookup + ?Sized,
    {
        match SeedSet::from_json(seeds) {
            Ok(seeds) => self.recommend(lookup, &seeds, top_n),
            Err(e) => {
                warn!("Ignoring malformed seed items: {}", e);
                Vec::new()
            }
        }
    }
}
