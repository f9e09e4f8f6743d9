//! linequery client CLI
//!
//! Sends queries to a running linequery server over TCP and prints
//! the verdicts.

use clap::Parser;
use linequery::cli::{self, output::colors, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli::run(cli).await {
        eprintln!("{}", colors::error(&format!("Error: {e}")));
        std::process::exit(1);
    }
}
