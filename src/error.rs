//! Error types for gaspm.

use thiserror::Error;

/// Result type for gaspm operations.
pub type Result<T> = std::result::Result<T, GaspmError>;

/// Main error type for gaspm.
#[derive(Error, Debug)]
pub enum GaspmError {
    /// Invalid or missing descriptor/config fields
    #[error("Configuration error: {0}")]
    Config(String),

    /// A module key was registered twice
    #[error("Module \"{0}\" is already registered")]
    DuplicateModule(String),

    /// require() of an unregistered key
    #[error("Module \"{0}\" has not been registered")]
    ModuleNotFound(String),

    /// Malformed relative-path traversal
    #[error("Cannot resolve \"{specifier}\" from \"{importer}\": {reason}")]
    Resolution {
        specifier: String,
        importer: String,
        reason: String,
    },

    /// Apps Script REST API failure
    #[error("Apps Script API error: HTTP {status}: {message}")]
    RemoteApi { status: u16, message: String },

    /// cdnjs lookup failure
    #[error("cdnjs error for {package}: {reason}")]
    Cdn { package: String, reason: String },

    /// Evaluated package source threw
    #[error("Evaluation of \"{package}\" failed: {reason}")]
    Eval { package: String, reason: String },

    /// Missing or malformed gaspm.toml
    #[error("Invalid gaspm.toml: {0}")]
    InvalidProjectFile(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// General error with message
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for GaspmError {
    fn from(err: anyhow::Error) -> Self {
        GaspmError::Other(err.to_string())
    }
}

impl From<&str> for GaspmError {
    fn from(s: &str) -> Self {
        GaspmError::Other(s.to_string())
    }
}

impl From<String> for GaspmError {
    fn from(s: String) -> Self {
        GaspmError::Other(s)
    }
}
