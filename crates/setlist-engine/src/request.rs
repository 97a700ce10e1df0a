//! Seed item parsing

use crate::EngineError;
use serde_json::Value;
use setlist_domain::ItemSet;

/// The caller-supplied seed items of one recommendation request
///
/// Duplicates collapse and order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSet(ItemSet);

impl SeedSet {
    /// Parse seeds from a JSON value, which must be an array of strings
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use setlist_engine::SeedSet;
    ///
    /// let seeds = SeedSet::from_json(&json!(["A", "B", "A"])).unwrap();
    /// assert_eq!(seeds.len(), 2);
    /// assert!(SeedSet::from_json(&json!(["A", 7])).is_err());
    /// ```
    pub fn from_json(value: &Value) -> Result<Self, EngineError> {
        let entries = value.as_array().ok_or_else(|| {
            EngineError::InvalidRequest(format!("expected a list of items, got {}", kind(value)))
        })?;

        entries
            .iter()
            .enumerate()
            .map(|(position, entry)| {
                entry.as_str().map(str::to_string).ok_or_else(|| {
                    EngineError::InvalidRequest(format!(
                        "item {} is {}, expected a string",
                        position,
                        kind(entry)
                    ))
                })
            })
            .collect::<Result<ItemSet, _>>()
            .map(Self)
    }

    /// The seeds as an item set
    pub fn items(&self) -> &ItemSet {
        &self.0
    }

    /// Whether `item` is one of the seeds
    pub fn contains(&self, item: &str) -> bool {
        self.0.contains(item)
    }

    /// Number of distinct seeds
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no seeds were supplied
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ItemSet> for SeedSet {
    fn from(items: ItemSet) -> Self {
        Self(items)
    }
}

impl<S: Into<String>> FromIterator<S> for SeedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
