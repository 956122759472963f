//! Binary crate for the `infodash` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Driving the dashboard controller interactively
//! - Human-friendly output formatting

use clap::Parser;

mod cli;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cmd = cli::Cli::parse();
    cmd.run().await
}
