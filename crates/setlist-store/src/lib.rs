//! Setlist Storage Layer
//!
//! Holds a validated association-rule corpus in a query-optimized,
//! read-only form and answers "which rules fire for these seed items?".
//!
//! # Architecture
//!
//! - Rules are kept in corpus order in a flat `Vec`
//! - An inverted index over antecedent items narrows each lookup to the
//!   rules that share an item with the seeds
//! - Corpora are read from JSON, JSON Lines or SQLite (see [`loader`])
//!
//! # Examples
//!
//! ```no_run
//! use setlist_domain::ItemSet;
//! use setlist_store::RuleStore;
//!
//! let store = RuleStore::load("rules.json").unwrap();
//! let seeds: ItemSet = ["Song A", "Song C"].into_iter().collect();
//! for rule in store.rules_matching(&seeds) {
//!     println!("{}", rule);
//! }
//! ```

#![warn(missing_docs)]

pub mod index;
pub mod loader;

pub use index::RuleIndex;
pub use loader::{CorpusFormat, RuleRecord};

use setlist_domain::{ItemSet, Rule, RuleLookup};
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while loading a corpus
#[derive(Error, Debug)]
pub enum StoreError {
    /// The corpus source does not exist
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// A record failed schema validation
    #[error("Corrupt model: record {record}: {reason}")]
    CorruptModel {
        /// Zero-based record position
        record: usize,
        /// What was wrong with it
        reason: String,
    },

    /// The corpus as a whole could not be parsed
    #[error("Corrupt model: {0}")]
    CorruptCorpus(String),

    /// The file extension names no known corpus format
    #[error("Unsupported corpus format: {0}")]
    UnsupportedFormat(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether the corpus was reachable but failed validation
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::CorruptModel { .. } | StoreError::CorruptCorpus(_))
    }
}

/// An immutable, indexed rule corpus
///
/// The store is built once and never mutated. It is `Send + Sync`, so a
/// single instance can serve concurrent lookups behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    rules: Vec<Rule>,
    index: RuleIndex,
}

impl RuleStore {
    /// Build a store over already-validated rules, preserving their order
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        let index = RuleIndex::build(&rules);
        Self { rules, index }
    }

    /// Load and validate the corpus at `path`
    ///
    /// # Errors
    ///
    /// - [`StoreError::ModelNotFound`] if the file does not exist
    /// - [`StoreError::CorruptModel`] / [`StoreError::CorruptCorpus`] if any
    ///   record is malformed or violates a rule invariant
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let started = Instant::now();

        let rules = loader::read_corpus(path)?;
        let store = Self::from_rules(rules);

        info!(
            path = %path.display(),
            rules = store.len(),
            items = store.index.item_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Loaded rule corpus"
        );

        Ok(store)
    }

    /// All rules in corpus order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the corpus is empty
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of distinct items appearing in any antecedent
    pub fn antecedent_item_count(&self) -> usize {
        self.index.item_count()
    }

    /// The first `k` rules
    pub fn sample(&self, k: usize) -> &[Rule] {
        &self.rules[..k.min(self.rules.len())]
    }

    /// Rules whose antecedent is a subset of `seeds`, via the inverted index
    ///
    /// Yields rules in corpus order. Each call is a fresh lookup.
    pub fn rules_matching<'a>(&'a self, seeds: &'a ItemSet) -> impl Iterator<Item = &'a Rule> + 'a {
        self.index
            .candidates(seeds)
            .into_iter()
            .map(move |position| &self.rules[position])
            .filter(move |rule| rule.matches(seeds))
    }

    /// Rules whose antecedent is a subset of `seeds`, by scanning every rule
    ///
    /// Reference implementation of [`RuleStore::rules_matching`]; same
    /// results, O(rules) per call.
    pub fn scan_matching<'a>(&'a self, seeds: &'a ItemSet) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |rule| rule.matches(seeds))
    }
}

impl RuleLookup for RuleStore {
    fn rules_matching<'a>(&'a self, seeds: &'a ItemSet) -> Box<dyn Iterator<Item = &'a Rule> + 'a> {
        Box::new(RuleStore::rules_matching(self, seeds))
    }

    fn rule_count(&self) -> usize {
        self.len()
    }

    fn sample(&self, k: usize) -> &[Rule] {
        RuleStore::sample(self, k)
    }
}
