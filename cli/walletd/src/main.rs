//! walletd CLI
//!
//! Talks to a walletd daemon and prints each result as pretty JSON.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use clap::Parser;
use client::WalletClient;
use walletd_cli::{run, Cli};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    logging::init(&config.logging.level, config.logging.json);

    let client = WalletClient::connect(config.endpoint());
    let output = match run(&client, &cli.command).await {
        Ok(value) => serde_json::to_string_pretty(&value),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    match output {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error: failed to render result: {}", e);
            std::process::exit(1);
        }
    }
}
