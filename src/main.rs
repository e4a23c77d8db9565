//! gaspm - a package-fetching shim for Google Apps Script projects
//!
//! This is the main entry point for the gaspm binary.

use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;

use cli::{Cli, Commands};
use gaspm::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute the command
    match &cli.command {
        Some(Commands::Install(args)) => commands::install::run(args, &cli).await,
        Some(Commands::Fetch(args)) => commands::fetch::run(args, &cli).await,
        Some(Commands::List(args)) => commands::list::run(args, &cli).await,
        None => {
            // Default: install if a project file exists, otherwise show help
            if cli.project.exists() {
                commands::install::run(&cli::InstallArgs::default(), &cli).await
            } else {
                println!("{}", "Usage: gaspm <command> [options]".yellow());
                println!();
                println!("Run {} for more information", "gaspm --help".cyan());
                Ok(())
            }
        }
    }
}
