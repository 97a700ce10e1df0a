//! Setlist CLI - offline tooling for association-rule corpora.

use clap::Parser;
use setlist_cli::{commands, Cli, CliError, Command, Formatter};
use setlist_store::RuleStore;

fn main() {
    let cli = Cli::parse();
    let formatter = Formatter::new(cli.format, !cli.no_color);

    match run(cli, &formatter) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli, formatter: &Formatter) -> setlist_cli::Result<String> {
    let model = cli.model.ok_or(CliError::NoModel)?;

    match cli.command {
        Command::Validate => commands::execute_validate(&model, formatter),
        Command::Recommend(args) => commands::execute_recommend(args, &RuleStore::load(&model)?, formatter),
        Command::Inspect(args) => commands::execute_inspect(args, &RuleStore::load(&model)?, formatter),
        Command::Convert(args) => commands::execute_convert(args, &RuleStore::load(&model)?, formatter),
    }
}
