//! layoutmap CLI: normalize form-layout exports into a cross-referenced model.
//!
//! Reads a combined layout/schema XML export and prints the extracted field,
//! profile, card, button and database registries as a JSON response envelope.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
