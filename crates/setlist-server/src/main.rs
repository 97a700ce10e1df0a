//! Setlist Server CLI
//!
//! Starts the recommendation HTTP server.

use setlist_server::{config::ServerConfig, init_tracing, start_server, ServerError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        ServerConfig::from_env()?
    };

    init_tracing();
    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Setlist Server - association-rule recommendations over HTTP");
    println!();
    println!("USAGE:");
    println!("    setlist-server [--config <path-to-config.toml>]");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    MODEL_PATH         Rule corpus to serve (default: /model/rules.json)");
    println!("    MODEL_VERSION      Version label reported to callers (default: 0.1)");
    println!("    RUST_LOG           Log filter (default: info)");
    println!();
    println!("ENDPOINTS:");
    println!("    POST /api/recommend      {{\"songs\": [...], \"top_n\": 5}}");
    println!("    GET  /api/debug          Rule count and sample rules");
    println!("    GET  /health             Snapshot status");
    println!("    POST /api/admin/reload   Re-read MODEL_PATH and swap it in");
    println!();
}
