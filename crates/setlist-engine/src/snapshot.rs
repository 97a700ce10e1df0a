//! Loaded-model snapshots and atomic replacement
//!
//! Serving reads one immutable [`ModelSnapshot`] per request. A reload
//! builds a complete new snapshot off to the side and then swaps the shared
//! pointer, so in-flight requests keep the snapshot they started with and
//! never observe a partially loaded corpus.

use crate::{EngineError, RecommendationEngine, SeedSet};
use chrono::{DateTime, Utc};
use serde::Serialize;
use setlist_store::RuleStore;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{error, info};

/// Provenance of a loaded corpus
///
/// Set once at load time and threaded through to callers unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelMetadata {
    /// Operator-assigned corpus version, not interpreted
    pub version: String,

    /// When the corpus finished loading
    pub loaded_at: DateTime<Utc>,

    /// Where the corpus was read from
    pub source: String,
}

/// Result of one recommendation request, with provenance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    /// Ranked recommendations
    #[serde(rename = "songs")]
    pub items: Vec<String>,

    /// Corpus version
    pub version: String,

    /// Corpus load time
    pub model_date: DateTime<Utc>,
}

/// An immutable corpus together with its provenance
#[derive(Debug)]
pub struct ModelSnapshot {
    store: RuleStore,
    metadata: ModelMetadata,
}

impl ModelSnapshot {
    /// Pair a store with its metadata
    pub fn new(store: RuleStore, metadata: ModelMetadata) -> Self {
        Self { store, metadata }
    }

    /// Load a corpus from `path`, stamping it with `version` and the current time
    pub fn load<P: AsRef<Path>>(path: P, version: impl Into<String>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let store = RuleStore::load(path)?;
        let metadata = ModelMetadata {
            version: version.into(),
            loaded_at: Utc::now(),
            source: path.display().to_string(),
        };
        Ok(Self::new(store, metadata))
    }

    /// The rule corpus
    pub fn store(&self) -> &RuleStore {
        &self.store
    }

    /// Corpus provenance
    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Recommend for `seeds` and attach this snapshot's provenance
    ///
    /// `top_n` of `None` uses the engine's configured default.
    pub fn recommend(
        &self,
        engine: &RecommendationEngine,
        seeds: &SeedSet,
        top_n: Option<usize>,
    ) -> RecommendationResult {
        let top_n = engine.config().effective_top_n(top_n);
        self.result(engine.recommend(&self.store, seeds, top_n))
    }

    /// Wrap already-ranked items with this snapshot's provenance
    pub fn result(&self, items: Vec<String>) -> RecommendationResult {
        RecommendationResult {
            items,
            version: self.metadata.version.clone(),
            model_date: self.metadata.loaded_at,
        }
    }
}

/// Shared, swappable handle to the current snapshot
///
/// Readers take a cheap `Arc` clone; the lock is held only for the pointer
/// copy, never across a lookup.
#[derive(Debug)]
pub struct ModelHandle {
    current: RwLock<Arc<ModelSnapshot>>,
}

impl ModelHandle {
    /// Start serving `snapshot`
    pub fn new(snapshot: ModelSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Load the initial snapshot
    ///
    /// Failure here is fatal to startup: there is nothing to fall back to.
    pub fn load<P: AsRef<Path>>(path: P, version: impl Into<String>) -> Result<Self, EngineError> {
        Ok(Self::new(ModelSnapshot::load(path, version)?))
    }

    /// The snapshot currently being served
    pub fn current(&self) -> Arc<ModelSnapshot> {
        // Snapshots are immutable, so a poisoned lock still guards a valid pointer
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Replace the served snapshot, returning the previous one
    pub fn swap(&self, snapshot: ModelSnapshot) -> Arc<ModelSnapshot> {
        self.install(Arc::new(snapshot))
    }

    fn install(&self, next: Arc<ModelSnapshot>) -> Arc<ModelSnapshot> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    /// Load a new snapshot from `path` and swap it in
    ///
    /// On any load error the current snapshot stays live and the error is
    /// returned.
    pub fn reload<P: AsRef<Path>>(
        &self,
        path: P,
        version: impl Into<String>,
    ) -> Result<Arc<ModelSnapshot>, EngineError> {
        let path = path.as_ref();
        match ModelSnapshot::load(path, version) {
            Ok(snapshot) => {
                // Return the snapshot built here, not whatever a concurrent reload installed since
                let next = Arc::new(snapshot);
                let previous = self.install(Arc::clone(&next));
                info!(
                    path = %path.display(),
                    previous_version = %previous.metadata().version,
                    version = %next.metadata().version,
                    rules = next.store().len(),
                    "Swapped in reloaded rule corpus"
                );
                Ok(next)
            }
            Err(e) => {
                error!(
                    path = %path.display(),
                    "Rejected reloaded corpus, keeping current snapshot: {}", e
                );
                Err(e)
            }
        }
    }
}
