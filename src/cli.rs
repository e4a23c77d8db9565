//! CLI argument parsing for gaspm.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// gaspm - a package-fetching shim for Google Apps Script projects
#[derive(Parser, Debug)]
#[command(name = "gaspm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the project file
    #[arg(long, global = true, default_value = "gaspm.toml")]
    pub project: PathBuf,

    /// Apps Script API bearer token
    #[arg(long, global = true, env = "GASPM_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Override the Apps Script API base URL
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Skip SSL certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch all packages and install them into the project's library
    #[command(alias = "i")]
    Install(InstallArgs),

    /// Fetch package sources without touching any project
    Fetch(FetchArgs),

    /// List declared packages
    #[command(alias = "ls")]
    List(ListArgs),
}

#[derive(Args, Debug, Default)]
pub struct InstallArgs {
    /// Copy the manifest and bootstrap from this script ID instead of the
    /// currently linked library
    #[arg(long, conflicts_with = "from_upstream")]
    pub from: Option<String>,

    /// Copy the manifest and bootstrap from the upstream base library
    #[arg(long)]
    pub from_upstream: bool,
}

#[derive(Args, Debug, Default)]
pub struct FetchArgs {
    /// Write fetched sources into this directory as <name>.js
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {}
