//! # Lumberly CLI
//!
//! Terminal front end for the takeoff engine: calculates material lists
//! from project files, creates starter projects, and runs a quick
//! interactive takeoff for a single room.

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("LUMBERLY_LOG")
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let json_errors = cli.wants_json_errors();
    if let Err(e) = commands::execute(cli.command) {
        eprintln!("Error: {}", e);
        if json_errors {
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                println!("{}", json);
            }
        }
        std::process::exit(1);
    }
}
