//! Convert command implementation.

use crate::cli::ConvertArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use setlist_store::loader::{write_json, write_json_lines, write_sqlite};
use setlist_store::{CorpusFormat, RuleStore};

/// Execute the convert command.
pub fn execute_convert(args: ConvertArgs, store: &RuleStore, formatter: &Formatter) -> Result<String> {
    let format = CorpusFormat::from_path(&args.output)
        .map_err(|_| CliError::InvalidInput(format!(
            "cannot infer a corpus format from '{}' (use .json, .jsonl or .db)",
            args.output.display()
        )))?;

    match format {
        CorpusFormat::Json => write_json(&args.output, store.rules())?,
        CorpusFormat::JsonLines => write_json_lines(&args.output, store.rules())?,
        CorpusFormat::Sqlite => write_sqlite(&args.output, store.rules())?,
    }

    Ok(formatter.success(&format!(
        "Wrote {} rules to {}",
        store.len(),
        args.output.display()
    )))
}
