//! # Bionic Reader
//!
//! Bionic reading for plain text and markdown: emphasizes the leading letters of
//! each word, strips markdown while keeping bold and code intact, and offers a
//! terminal reader that toggles between standard and bionic rendering.

mod cli;
mod core;
mod output;
mod run;
mod tui;

use clap::Parser;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let args = cli::Args::parse();
    run::init_logger(&args);

    // Print a user-friendly message; exit uses Display not Debug
    let config = core::config::load().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    run::dispatch(args, config).await
}
