//! Rute Wisata CLI
//!
//! Generates, reconciles and draws tourism routes from the command line.

#![allow(clippy::print_stdout)]

use clap::Parser;
use infrastructure::{LoggingConfig, init_logging};
use presentation_cli::{Cli, Commands, commands, log_filter_from_verbosity};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;

    init_logging(&LoggingConfig {
        filter: log_filter_from_verbosity(cli.verbose).to_string(),
        json: config.logging.json,
    })?;

    let text = match cli.command {
        Commands::Generate { origin, json } => commands::generate(&config, &origin, json).await?,
        Commands::Show {
            origin,
            rank,
            mode,
            output,
        } => commands::show(&config, &origin, rank, mode, output.as_deref()).await?,
        Commands::Destinations { category, place_id } => {
            commands::destinations(&config, category.as_deref(), place_id.as_deref()).await?
        },
        Commands::Config { validate } => commands::show_config(&config, validate)?,
    };

    if !text.is_empty() {
        print!("{text}");
        if !text.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}
