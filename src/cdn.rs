//! cdnjs client.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::downloader::SourceFetcher;
use crate::error::{GaspmError, Result};

/// Default cdnjs API endpoint.
pub const DEFAULT_CDN_API: &str = "https://api.cdnjs.com/libraries";

/// Default cdnjs asset base URL.
pub const DEFAULT_CDN_BASE: &str = "https://cdnjs.cloudflare.com/ajax/libs";

/// cdnjs API client.
///
/// Knows the two metadata endpoints (a version's file listing and a
/// library's latest-version URL) and how asset URLs are laid out. All
/// transfers go through the supplied [`SourceFetcher`].
pub struct CdnClient {
    api_url: String,
    base_url: String,
}

impl CdnClient {
    /// Create a client against the default cdnjs endpoints.
    pub fn new() -> Self {
        Self {
            api_url: DEFAULT_CDN_API.to_string(),
            base_url: DEFAULT_CDN_BASE.to_string(),
        }
    }

    /// Create a client against custom endpoints.
    pub fn with_endpoints(api_url: &str, base_url: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL of one asset file within a pinned library version.
    pub fn file_url(&self, name: &str, version: &str, file: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url,
            urlencoding::encode(name),
            version,
            file
        )
    }

    /// List the files available for a library version.
    pub async fn version_files(
        &self,
        fetcher: &dyn SourceFetcher,
        name: &str,
        version: &str,
    ) -> Result<Vec<String>> {
        let url = format!(
            "{}/{}/{}?fields=files",
            self.api_url,
            urlencoding::encode(name),
            version
        );
        debug!("Listing cdnjs files from {}", url);

        let body = fetcher.fetch_text(&url).await?;
        let listing: VersionFiles = serde_json::from_str(&body)?;
        Ok(listing.files)
    }

    /// Resolve the latest-version asset URL for a library.
    pub async fn latest_url(&self, fetcher: &dyn SourceFetcher, name: &str) -> Result<String> {
        let url = format!("{}/{}/?fields=latest", self.api_url, urlencoding::encode(name));
        debug!("Resolving latest version from {}", url);

        let body = fetcher.fetch_text(&url).await?;
        let latest: LatestVersion = serde_json::from_str(&body)?;

        latest.latest.ok_or_else(|| GaspmError::Cdn {
            package: name.to_string(),
            reason: "cdnjs reported no latest version".to_string(),
        })
    }

    /// Pick a source file from a version's listing when none was declared.
    ///
    /// Best-effort fallback: takes the first file with a `.js` extension and
    /// warns, since there is no guarantee it is the library's entry point.
    pub fn pick_source_file(&self, name: &str, version: &str, files: &[String]) -> Result<String> {
        let file = files
            .iter()
            .find(|f| f.ends_with(".js"))
            .cloned()
            .ok_or_else(|| GaspmError::Cdn {
                package: name.to_string(),
                reason: format!("no .js file in the {} listing", version),
            })?;

        warn!(
            "Loading \"{}\" for \"{}@{}\". Consider specifying a file.",
            file, name, version
        );

        Ok(file)
    }
}

impl Default for CdnClient {
    fn default() -> Self {
        Self::new()
    }
}

/// `?fields=files` response.
#[derive(Debug, Deserialize)]
struct VersionFiles {
    #[serde(default)]
    files: Vec<String>,
}

/// `?fields=latest` response.
#[derive(Debug, Deserialize)]
struct LatestVersion {
    latest: Option<String>,
}
