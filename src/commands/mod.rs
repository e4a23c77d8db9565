//! Command implementations for gaspm.

pub mod fetch;
pub mod install;
pub mod list;

use gaspm::cdn::CdnClient;
use gaspm::config::Config;
use gaspm::downloader::HttpFetcher;
use gaspm::error::Result;
use gaspm::project::GaspmToml;
use gaspm::script_api::ScriptApiClient;

use crate::cli::Cli;

/// Common context for command execution.
pub struct CommandContext {
    pub config: Config,
    pub project: GaspmToml,
    pub insecure: bool,
}

impl CommandContext {
    /// Create a new command context.
    pub fn new(cli: &Cli) -> Result<Self> {
        let mut config = Config::load()?;

        // Override config with CLI options
        if let Some(ref token) = cli.token {
            config.token = Some(token.clone());
        }
        if let Some(ref api_base) = cli.api_base {
            config.api_base = api_base.clone();
        }

        let insecure = cli.insecure || !config.strict_ssl;
        let project = GaspmToml::read(&cli.project)?;

        Ok(Self {
            config,
            project,
            insecure,
        })
    }

    /// Create a source fetcher.
    pub fn fetcher(&self) -> Result<HttpFetcher> {
        HttpFetcher::new(self.config.timeout, self.insecure)
    }

    /// Create a CDN client against the configured endpoints.
    pub fn cdn(&self) -> CdnClient {
        CdnClient::with_endpoints(&self.config.cdn_api, &self.config.cdn_base)
    }

    /// Create an Apps Script API client. Fails without a token.
    pub fn api(&self) -> Result<ScriptApiClient> {
        ScriptApiClient::new(
            Some(&self.config.api_base),
            self.config.token.as_deref().unwrap_or_default(),
            self.config.timeout,
            self.insecure,
        )
    }
}
