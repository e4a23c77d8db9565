//! Install command implementation.

use std::time::Instant;

use owo_colors::OwoColorize;

use gaspm::error::Result;
use gaspm::sync::{CopySource, SyncOptions, Syncer};

use crate::cli::{Cli, InstallArgs};
use crate::commands::CommandContext;

/// Run the install command: fetch every declared package, then copy the
/// sources into the project's library through the content API.
pub async fn run(args: &InstallArgs, cli: &Cli) -> Result<()> {
    let start = Instant::now();
    let ctx = CommandContext::new(cli)?;

    let mut packages = ctx.project.packages()?;
    if packages.is_empty() {
        println!("{}", "No packages declared in gaspm.toml.".yellow());
        return Ok(());
    }

    let fetcher = ctx.fetcher()?;
    let cdn = ctx.cdn();

    for package in packages.iter_mut() {
        if !cli.quiet {
            println!(
                "  {} {} {}",
                "Fetching".dimmed(),
                package.name().cyan(),
                format!("({})", package.describe_source()).dimmed()
            );
        }
        package.fetch_cached(&fetcher, &cdn).await?;
    }

    let api = ctx.api()?;
    let settings = &ctx.project.project;
    let opts = SyncOptions {
        script_id: settings.script_id.clone(),
        user_symbol: settings.user_symbol.clone(),
        base_library_id: settings.base_library_id.clone(),
        bootstrap_file: settings.bootstrap_file().to_string(),
        copy_from: if args.from_upstream {
            Some(CopySource::Upstream)
        } else {
            args.from.clone().map(CopySource::Script)
        },
    };

    let outcome = Syncer::new(&api).install(&opts, &packages).await?;

    if !cli.quiet {
        if outcome.created {
            println!(
                "  {} {}",
                "Created project".green(),
                outcome.target.cyan()
            );
        }
        println!(
            "{} {} package(s), {} file(s) written to {} in {:.1}s",
            "Installed".green().bold(),
            packages.len(),
            outcome.files_written,
            outcome.target.cyan(),
            start.elapsed().as_secs_f64()
        );
    }

    Ok(())
}
