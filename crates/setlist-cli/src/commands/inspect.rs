//! Inspect command implementation.

use crate::cli::InspectArgs;
use crate::error::Result;
use crate::output::Formatter;
use setlist_store::RuleStore;

/// Execute the inspect command.
pub fn execute_inspect(args: InspectArgs, store: &RuleStore, formatter: &Formatter) -> Result<String> {
    formatter.format_summary(store, store.sample(args.sample))
}
