//! Package descriptors and the source-text cache.

use url::Url;

use crate::cdn::CdnClient;
use crate::downloader::SourceFetcher;
use crate::error::{GaspmError, Result};

/// Where a package's source text comes from.
#[derive(Debug, Clone)]
pub enum PackageSource {
    /// A direct HTTPS URL to a single source file.
    Direct { url: Url },
    /// A cdnjs library, optionally pinned to a version and a file within it.
    Cdn {
        version: Option<String>,
        file: Option<String>,
    },
}

/// A declared dependency: a name, a source descriptor, and the memoized
/// source text.
///
/// The cached text is populated on first fetch and reused unconditionally
/// afterwards; there is no staleness check and no invalidation.
#[derive(Debug, Clone)]
pub struct Package {
    name: String,
    source: PackageSource,
    cached: Option<String>,
}

impl Package {
    /// Declare a package fetched from a direct URL.
    ///
    /// The URL is required and must use HTTPS; both are checked here, before
    /// any network access.
    pub fn direct(name: &str, url: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(GaspmError::Config(
                "a package name is required".to_string(),
            ));
        }
        if url.is_empty() {
            return Err(GaspmError::Config(format!(
                "a URL is required to download \"{}\"",
                name
            )));
        }

        let url = Url::parse(url)
            .map_err(|e| GaspmError::Config(format!("invalid URL for \"{}\": {}", name, e)))?;
        if url.scheme() != "https" {
            return Err(GaspmError::Config(format!(
                "only the HTTPS protocol is supported (got \"{}\" for \"{}\")",
                url.scheme(),
                name
            )));
        }

        Ok(Self {
            name: name.to_string(),
            source: PackageSource::Direct { url },
            cached: None,
        })
    }

    /// Declare a package fetched from cdnjs.
    pub fn cdn(name: &str, version: Option<String>, file: Option<String>) -> Result<Self> {
        if name.is_empty() {
            return Err(GaspmError::Config(
                "a name is required to use cdnjs".to_string(),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            source: PackageSource::Cdn { version, file },
            cached: None,
        })
    }

    /// The package's declared name, also its registry key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The source descriptor.
    pub fn source(&self) -> &PackageSource {
        &self.source
    }

    /// The memoized source text, if fetched.
    pub fn cached_source(&self) -> Option<&str> {
        self.cached.as_deref()
    }

    /// Fetch the package's source text, once.
    ///
    /// The first call resolves the descriptor and performs the fetch; later
    /// calls return the stored text without touching the network.
    pub async fn fetch_cached(
        &mut self,
        fetcher: &dyn SourceFetcher,
        cdn: &CdnClient,
    ) -> Result<&str> {
        if self.cached.is_none() {
            let source = self.get_source(fetcher, cdn).await?;
            self.cached = Some(source);
        }
        // Populated just above when it was empty
        Ok(self.cached.as_deref().unwrap_or_default())
    }

    /// Resolve the descriptor to a URL and fetch the body.
    async fn get_source(&self, fetcher: &dyn SourceFetcher, cdn: &CdnClient) -> Result<String> {
        match &self.source {
            PackageSource::Direct { url } => fetcher.fetch_text(url.as_str()).await,
            PackageSource::Cdn { version, file } => match version {
                Some(version) => {
                    let file = match file {
                        Some(file) => file.clone(),
                        None => {
                            let files = cdn.version_files(fetcher, &self.name, version).await?;
                            cdn.pick_source_file(&self.name, version, &files)?
                        }
                    };
                    fetcher
                        .fetch_text(&cdn.file_url(&self.name, version, &file))
                        .await
                }
                None => {
                    tracing::warn!(
                        "Loading latest version of \"{}\". Consider specifying a version and a file.",
                        self.name
                    );
                    let latest = cdn.latest_url(fetcher, &self.name).await?;
                    fetcher.fetch_text(&latest).await
                }
            },
        }
    }

    /// Human-readable description of the source, for listings.
    pub fn describe_source(&self) -> String {
        match &self.source {
            PackageSource::Direct { url } => url.to_string(),
            PackageSource::Cdn { version, file } => match (version, file) {
                (Some(v), Some(f)) => format!("cdnjs: {}@{} ({})", self.name, v, f),
                (Some(v), None) => format!("cdnjs: {}@{}", self.name, v),
                _ => format!("cdnjs: {} (latest)", self.name),
            },
        }
    }
}
