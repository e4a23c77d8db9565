//! List command implementation.

use owo_colors::OwoColorize;

use gaspm::error::Result;

use crate::cli::{Cli, ListArgs};
use crate::commands::CommandContext;

/// Run the list command.
pub async fn run(_args: &ListArgs, cli: &Cli) -> Result<()> {
    let ctx = CommandContext::new(cli)?;
    let packages = ctx.project.packages()?;

    if packages.is_empty() {
        println!("{}", "No packages declared in gaspm.toml.".yellow());
        return Ok(());
    }

    println!(
        "{} (project {})",
        "Declared packages".bold(),
        ctx.project.project.script_id.cyan()
    );
    for package in &packages {
        println!(
            "  {} {}",
            package.name().cyan(),
            format!("← {}", package.describe_source()).dimmed()
        );
    }

    Ok(())
}
