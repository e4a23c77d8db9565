//! `appsscript.json` manifest model.
//!
//! The sync workflow rewrites a library's `libraryId` and uploads the
//! manifest back, so every struct keeps unrecognized fields through a
//! `#[serde(flatten)]` catch-all rather than dropping them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{GaspmError, Result};

/// A project manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Declared dependencies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
    /// Everything else in the manifest, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `dependencies` block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dependencies {
    /// Library dependencies
    #[serde(default)]
    pub libraries: Vec<Library>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One library dependency entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    /// The identifier the library is bound to in user code
    pub user_symbol: String,
    /// Script ID of the library project
    pub library_id: String,
    /// Pinned library version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Manifest {
    /// Parse a manifest from its file source.
    pub fn parse(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Serialize back to file source (pretty, two-space indent, as the
    /// editor writes it).
    pub fn to_source(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Find the library entry bound to `user_symbol`.
    pub fn find_library(&self, user_symbol: &str) -> Result<&Library> {
        self.dependencies
            .as_ref()
            .and_then(|d| d.libraries.iter().find(|l| l.user_symbol == user_symbol))
            .ok_or_else(|| {
                GaspmError::Config(format!(
                    "no library dependency with userSymbol \"{}\" in the manifest",
                    user_symbol
                ))
            })
    }

    /// Mutable variant of [`find_library`](Self::find_library).
    pub fn find_library_mut(&mut self, user_symbol: &str) -> Result<&mut Library> {
        self.dependencies
            .as_mut()
            .and_then(|d| {
                d.libraries
                    .iter_mut()
                    .find(|l| l.user_symbol == user_symbol)
            })
            .ok_or_else(|| {
                GaspmError::Config(format!(
                    "no library dependency with userSymbol \"{}\" in the manifest",
                    user_symbol
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: &str = r#"{
  "timeZone": "Europe/Madrid",
  "dependencies": {
    "libraries": [
      {
        "userSymbol": "Pkg",
        "libraryId": "1M5wAAAA",
        "version": "3",
        "developmentMode": true
      }
    ]
  },
  "exceptionLogging": "STACKDRIVER"
}"#;

    #[test]
    fn test_find_library_by_user_symbol() {
        let manifest = Manifest::parse(SAMPLE).unwrap();
        let lib = manifest.find_library("Pkg").unwrap();
        assert_eq!(lib.library_id, "1M5wAAAA");
        assert_eq!(lib.version.as_deref(), Some("3"));

        assert!(manifest.find_library("Nope").is_err());
    }

    #[test]
    fn test_rewrite_preserves_unknown_fields() {
        let mut manifest = Manifest::parse(SAMPLE).unwrap();
        manifest.find_library_mut("Pkg").unwrap().library_id = "NEW_ID".to_string();

        let out: Value = serde_json::from_str(&manifest.to_source().unwrap()).unwrap();
        assert_eq!(out["timeZone"], "Europe/Madrid");
        assert_eq!(out["exceptionLogging"], "STACKDRIVER");
        assert_eq!(
            out["dependencies"]["libraries"][0]["developmentMode"],
            json!(true)
        );
        assert_eq!(out["dependencies"]["libraries"][0]["libraryId"], "NEW_ID");
    }

    #[test]
    fn test_manifest_without_dependencies() {
        let manifest = Manifest::parse(r#"{"timeZone": "UTC"}"#).unwrap();
        assert!(manifest.dependencies.is_none());
        assert!(manifest.find_library("Pkg").is_err());
    }
}
