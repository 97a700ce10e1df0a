//! Validate command implementation.

use crate::error::Result;
use crate::output::Formatter;
use setlist_store::RuleStore;
use std::path::Path;

/// Execute the validate command.
///
/// Loading enforces every rule invariant, so a successful load is a
/// successful validation. Load errors propagate to the caller.
pub fn execute_validate(model: &Path, formatter: &Formatter) -> Result<String> {
    let store = RuleStore::load(model)?;
    Ok(formatter.success(&format!(
        "{}: {} valid rules over {} antecedent items",
        model.display(),
        store.len(),
        store.antecedent_item_count()
    )))
}
