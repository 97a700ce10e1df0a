//! Engine configuration

use crate::{DEFAULT_DEBUG_SAMPLE_SIZE, DEFAULT_MAX_TOP_N, DEFAULT_TOP_N};
use serde::{Deserialize, Serialize};

/// Configuration for ranking and truncation
///
/// # Examples
///
/// ```
/// use setlist_engine::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.default_top_n, 5);
/// assert!(!config.exclude_seed_items);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Result length when the caller does not specify one
    pub default_top_n: usize,

    /// Requested lengths above this are clamped to it
    pub max_top_n: usize,

    /// Drop recommendations the caller already supplied as seeds
    ///
    /// Off by default: rules never recommend their own antecedent, but a
    /// consequent of one matching rule can still be a seed consumed by
    /// another.
    pub exclude_seed_items: bool,

    /// Number of rules exposed by diagnostic sampling
    pub debug_sample_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_top_n: DEFAULT_TOP_N,
            max_top_n: DEFAULT_MAX_TOP_N,
            exclude_seed_items: false,
            debug_sample_size: DEFAULT_DEBUG_SAMPLE_SIZE,
        }
    }
}

impl EngineConfig {
    /// Resolve the effective result length for a request
    pub fn effective_top_n(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_top_n).min(self.max_top_n)
    }
}
