//! Fetch command implementation.

use owo_colors::OwoColorize;
use tokio::fs;

use gaspm::error::Result;

use crate::cli::{Cli, FetchArgs};
use crate::commands::CommandContext;

/// Run the fetch command: resolve and download every declared package
/// without touching any remote project.
pub async fn run(args: &FetchArgs, cli: &Cli) -> Result<()> {
    let ctx = CommandContext::new(cli)?;

    let mut packages = ctx.project.packages()?;
    let fetcher = ctx.fetcher()?;
    let cdn = ctx.cdn();

    if let Some(ref out) = args.out {
        fs::create_dir_all(out).await?;
    }

    for package in packages.iter_mut() {
        let source = package.fetch_cached(&fetcher, &cdn).await?.to_string();

        if !cli.quiet {
            println!(
                "  {} {} {}",
                "Fetched".green(),
                package.name().cyan(),
                format!("({} bytes)", source.len()).dimmed()
            );
        }

        if let Some(ref out) = args.out {
            let path = out.join(format!("{}.js", package.name()));
            fs::write(&path, source).await?;
            if !cli.quiet {
                println!("    {} {}", "Wrote".dimmed(), path.display());
            }
        }
    }

    Ok(())
}
