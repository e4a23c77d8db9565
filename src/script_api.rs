//! Apps Script REST content API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{GaspmError, Result};

/// The narrow slice of the Apps Script REST API the sync workflow consumes.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Fetch a project's file set.
    async fn get_content(&self, script_id: &str) -> Result<ProjectContent>;

    /// Overwrite a project's file set.
    async fn put_content(&self, script_id: &str, files: &[ProjectFile]) -> Result<()>;

    /// Create a new project; returns its script ID.
    async fn create_project(&self, title: &str) -> Result<String>;
}

/// Default Apps Script API endpoint.
pub const DEFAULT_API_BASE: &str = "https://script.googleapis.com/v1";

/// One file in a project's content.
///
/// The API reports more fields (update times, user info); only the trio that
/// `PUT` accepts back is kept, so a file deserialized from one project can be
/// uploaded to another as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    /// File name, without extension
    pub name: String,
    /// File type
    #[serde(rename = "type")]
    pub file_type: FileType,
    /// Source text
    pub source: String,
}

/// Apps Script file types.
///
/// Types the API grows beyond these are carried through [`FileType::Other`]
/// verbatim rather than failing deserialization, so a project containing
/// one can still be listed and re-uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FileType {
    ServerJs,
    Json,
    Html,
    Other(String),
}

impl From<String> for FileType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "SERVER_JS" => FileType::ServerJs,
            "JSON" => FileType::Json,
            "HTML" => FileType::Html,
            _ => FileType::Other(s),
        }
    }
}

impl From<FileType> for String {
    fn from(file_type: FileType) -> Self {
        match file_type {
            FileType::ServerJs => "SERVER_JS".to_string(),
            FileType::Json => "JSON".to_string(),
            FileType::Html => "HTML".to_string(),
            FileType::Other(s) => s,
        }
    }
}

/// A project's content listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContent {
    /// The project's script ID
    #[serde(default)]
    pub script_id: Option<String>,
    /// The project's files
    pub files: Vec<ProjectFile>,
}

#[derive(Debug, Serialize)]
struct PutContentBody<'a> {
    files: &'a [ProjectFile],
}

#[derive(Debug, Serialize)]
struct CreateProjectBody<'a> {
    title: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProjectResponse {
    script_id: String,
}

/// Client for the Apps Script content API.
///
/// Authorization is a bearer token supplied by the environment. Any status
/// ≥ 400 logs the parsed response body for diagnostics and fails with
/// [`GaspmError::RemoteApi`]; nothing is retried.
#[derive(Debug)]
pub struct ScriptApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ScriptApiClient {
    /// Create a new client.
    pub fn new(
        base_url: Option<&str>,
        token: &str,
        timeout_secs: u64,
        insecure: bool,
    ) -> Result<Self> {
        let base_url = base_url
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        if token.is_empty() {
            return Err(GaspmError::Config(
                "an Apps Script API token is required (set GASPM_TOKEN)".to_string(),
            ));
        }

        let mut builder = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(30))
            .user_agent(format!("gaspm/{}", env!("CARGO_PKG_VERSION")));

        if insecure {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            base_url,
            token: token.to_string(),
        })
    }

    /// Enforce the error policy: log the parsed body and fail on ≥ 400.
    async fn check(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;

        if status.as_u16() >= 400 {
            // Log the full body; the API packs diagnostics into it
            match serde_json::from_str::<serde_json::Value>(&body) {
                Ok(json) => error!(
                    "{}",
                    serde_json::to_string_pretty(&json).unwrap_or(body.clone())
                ),
                Err(_) => error!("{}", body),
            }

            return Err(GaspmError::RemoteApi {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("API request failed")
                    .to_string(),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl ContentApi for ScriptApiClient {
    async fn get_content(&self, script_id: &str) -> Result<ProjectContent> {
        let url = format!("{}/projects/{}/content", self.base_url, script_id);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let body = Self::check(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn put_content(&self, script_id: &str, files: &[ProjectFile]) -> Result<()> {
        let url = format!("{}/projects/{}/content", self.base_url, script_id);
        debug!("PUT {} ({} files)", url, files.len());

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.token)
            .json(&PutContentBody { files })
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    async fn create_project(&self, title: &str) -> Result<String> {
        let url = format!("{}/projects", self.base_url);
        debug!("POST {} (title: {})", url, title);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&CreateProjectBody { title })
            .send()
            .await?;

        let body = Self::check(response).await?;
        let created: CreateProjectResponse = serde_json::from_str(&body)?;
        Ok(created.script_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_file_round_trip() {
        // Extra fields the API reports must not survive a round trip
        let raw = json!({
            "name": "appsscript",
            "type": "JSON",
            "source": "{}",
            "updateTime": "2024-01-01T00:00:00Z"
        });

        let file: ProjectFile = serde_json::from_value(raw).unwrap();
        assert_eq!(file.file_type, FileType::Json);

        let back = serde_json::to_value(&file).unwrap();
        assert_eq!(
            back,
            json!({"name": "appsscript", "type": "JSON", "source": "{}"})
        );
    }

    #[test]
    fn test_file_type_wire_names() {
        assert_eq!(
            serde_json::to_value(FileType::ServerJs).unwrap(),
            json!("SERVER_JS")
        );
        assert_eq!(serde_json::to_value(FileType::Html).unwrap(), json!("HTML"));
    }

    #[test]
    fn test_unknown_file_type_round_trips() {
        let file: ProjectFile = serde_json::from_value(json!({
            "name": "notes",
            "type": "MARKDOWN",
            "source": "# hi"
        }))
        .unwrap();
        assert_eq!(file.file_type, FileType::Other("MARKDOWN".to_string()));

        // An unknown type must go back on the wire unchanged
        let back = serde_json::to_value(&file).unwrap();
        assert_eq!(back["type"], json!("MARKDOWN"));
    }

    #[test]
    fn test_create_project_response() {
        let created: CreateProjectResponse =
            serde_json::from_str(r#"{"scriptId": "abc123"}"#).unwrap();
        assert_eq!(created.script_id, "abc123");
    }

    #[test]
    fn test_empty_token_rejected() {
        let err = ScriptApiClient::new(None, "", 60, false).unwrap_err();
        assert!(matches!(err, GaspmError::Config(_)));
    }
}
