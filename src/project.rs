//! `gaspm.toml` project file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{GaspmError, Result};
use crate::package::Package;
use crate::sync::DEFAULT_BOOTSTRAP_FILE;

/// The declarative project file a script keeps next to its sources:
///
/// ```toml
/// [project]
/// script_id = "1AbCd..."
/// user_symbol = "Pkg"
/// base_library_id = "1M5wPq..."
///
/// [[packages]]
/// name = "foo"
/// url = "https://example.com/foo.js"
///
/// [[packages]]
/// name = "moment"
/// version = "2.29.4"
/// file = "moment.min.js"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaspmToml {
    /// Project settings
    pub project: ProjectSettings,
    /// Declared packages, in install order
    #[serde(default)]
    pub packages: Vec<PackageSpec>,
}

/// The `[project]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Script ID of the driving project
    pub script_id: String,
    /// The user symbol the package library is bound to
    pub user_symbol: String,
    /// Script ID of the upstream base library, if installing from one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_library_id: Option<String>,
    /// Name of the runtime bootstrap file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootstrap_file: Option<String>,
}

impl ProjectSettings {
    /// The bootstrap file name, defaulted.
    pub fn bootstrap_file(&self) -> &str {
        self.bootstrap_file
            .as_deref()
            .unwrap_or(DEFAULT_BOOTSTRAP_FILE)
    }
}

/// One `[[packages]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSpec {
    /// Package name (its module key)
    pub name: String,
    /// Direct HTTPS URL; mutually exclusive with the cdnjs fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// cdnjs version pin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// File within the cdnjs version listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl GaspmToml {
    /// Read and parse a project file.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GaspmError::InvalidProjectFile(format!(
                "{} not found",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Turn the declared specs into package descriptors, in order.
    pub fn packages(&self) -> Result<Vec<Package>> {
        self.packages
            .iter()
            .map(|spec| match &spec.url {
                Some(url) => {
                    if spec.version.is_some() || spec.file.is_some() {
                        return Err(GaspmError::Config(format!(
                            "package \"{}\" declares both a URL and cdnjs fields",
                            spec.name
                        )));
                    }
                    Package::direct(&spec.name, url)
                }
                None => Package::cdn(&spec.name, spec.version.clone(), spec.file.clone()),
            })
            .collect()
    }
}
