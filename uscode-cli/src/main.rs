//! `uscode` CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uscode_cli::{commands, config::Config, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if let Some(path) = &cli.config {
        Config::from_file(std::path::Path::new(path))?
    } else {
        Config::load()
    };

    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(log_level))
        .init();

    match &cli.command {
        Commands::Init { titles, bootstrap_date } => {
            commands::handle_init(&config, titles.clone(), bootstrap_date)?;
        }
        Commands::Advance { count, until_tag } => {
            commands::handle_advance(&config, *count, until_tag.clone()).await?;
        }
        Commands::Validate { tag } => {
            commands::handle_validate(&config, tag)?;
        }
        Commands::Section { title, section, at_revision } => {
            commands::handle_section(&config, *title, section, *at_revision, &cli.format)?;
        }
        Commands::History { title, section } => {
            commands::handle_history(&config, *title, section, &cli.format)?;
        }
        Commands::Diff { old, new } => {
            commands::handle_diff(&config, *old, *new)?;
        }
        Commands::Timeline { from_congress, to_congress } => {
            commands::handle_timeline(&config, *from_congress, *to_congress).await?;
        }
    }

    Ok(())
}
