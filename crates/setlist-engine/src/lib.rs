//! Setlist Recommendation Engine
//!
//! Turns a seed item set into a bounded, deterministically ranked list of
//! recommended items, using the rules of a loaded corpus.
//!
//! The engine provides:
//! - Consequent aggregation over every rule whose antecedent the seeds cover
//! - Ranking by best supporting confidence, ties broken by item identifier
//! - Optional exclusion of items the caller already supplied
//! - Atomic snapshot swapping for corpus reloads ([`ModelHandle`])
//!
//! # Examples
//!
//! ```no_run
//! use setlist_engine::{EngineConfig, ModelHandle, RecommendationEngine, SeedSet};
//!
//! let handle = ModelHandle::load("rules.json", "0.1").unwrap();
//! let engine = RecommendationEngine::new(EngineConfig::default());
//!
//! let seeds: SeedSet = ["Toxic", "Hey Ya!"].into_iter().collect();
//! let snapshot = handle.current();
//! let result = snapshot.recommend(&engine, &seeds, None);
//! println!("{:?} (model {})", result.items, result.version);
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod request;
mod snapshot;

pub use config::EngineConfig;
pub use engine::{RecommendationEngine, ScoredItem};
pub use error::EngineError;
pub use request::SeedSet;
pub use snapshot::{ModelHandle, ModelMetadata, ModelSnapshot, RecommendationResult};

/// Recommendations returned when the caller does not ask for a count
pub const DEFAULT_TOP_N: usize = 5;

/// Upper bound on any requested count
pub const DEFAULT_MAX_TOP_N: usize = 100;

/// Rules exposed by diagnostic sampling
pub const DEFAULT_DEBUG_SAMPLE_SIZE: usize = 5;
