//! Setlist Domain Layer
//!
//! This crate contains the core domain model for Setlist, a recommender that
//! serves item suggestions from a precomputed corpus of association rules.
//! It has ZERO external dependencies and defines the value objects and trait
//! interfaces that the storage, engine and serving layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Rule**: one mined association `antecedent => consequent` with a confidence
//! - **Confidence**: mined probability in `(0, 1]`, totally ordered for ranking
//! - **ItemSet**: an ordered, deduplicated set of item identifiers
//! - **RuleLookup**: the seam between rule matching and rule storage
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Rules are validated on construction and immutable afterwards
//! - Storage and indexing live in `setlist-store`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod confidence;
pub mod item;
pub mod rule;
pub mod traits;

// Re-exports for convenience
pub use confidence::Confidence;
pub use item::ItemSet;
pub use rule::{Rule, RuleError};
pub use traits::RuleLookup;
