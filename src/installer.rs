//! Runtime package installation.

use tracing::{debug, info};

use crate::cdn::CdnClient;
use crate::downloader::SourceFetcher;
use crate::error::{GaspmError, Result};
use crate::module_system::{Evaluator, ModuleRegistry, ModuleScope};
use crate::package::Package;

/// Installs declared packages into a module registry.
///
/// Packages are installed strictly in the order given, each fully completing
/// (fetch + evaluate) before the next begins. A later package may therefore
/// `require()` an earlier one during its own evaluation, but never the
/// reverse. A package whose name is already registered is skipped without
/// fetching or evaluating anything.
pub struct Installer {
    registry: ModuleRegistry,
}

/// Outcome of an installation run.
#[derive(Debug, Default)]
pub struct InstallReport {
    /// Names evaluated and registered on this run
    pub installed: Vec<String>,
    /// Names skipped because they were already registered
    pub skipped: Vec<String>,
}

impl Installer {
    /// Create an installer with a fresh registry.
    pub fn new() -> Self {
        Self {
            registry: ModuleRegistry::new(),
        }
    }

    /// Create an installer over an existing registry.
    pub fn with_registry(registry: ModuleRegistry) -> Self {
        Self { registry }
    }

    /// The registry backing this installer.
    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Take the registry back out of the installer.
    pub fn into_registry(self) -> ModuleRegistry {
        self.registry
    }

    /// Install each package in order.
    ///
    /// Errors (fetch failures, evaluation failures, duplicate registrations
    /// performed by the evaluated code) propagate immediately; packages after
    /// the failing one are not touched.
    pub async fn install_all(
        &mut self,
        packages: &mut [Package],
        fetcher: &dyn SourceFetcher,
        cdn: &CdnClient,
        evaluator: &mut dyn Evaluator,
    ) -> Result<InstallReport> {
        let mut report = InstallReport::default();

        for package in packages.iter_mut() {
            if self.registry.contains(package.name()) {
                debug!("Package \"{}\" already registered, skipping", package.name());
                report.skipped.push(package.name().to_string());
                continue;
            }

            let source = package.fetch_cached(fetcher, cdn).await?.to_string();

            let mut scope = ModuleScope::new(&mut self.registry, package.name());
            evaluator
                .evaluate(&source, &mut scope)
                .map_err(|err| match err {
                    // Module-system failures keep their own taxonomy
                    err @ (GaspmError::DuplicateModule(_)
                    | GaspmError::ModuleNotFound(_)
                    | GaspmError::Resolution { .. }) => err,
                    // Anything else the engine reports is an evaluation failure
                    other => GaspmError::Eval {
                        package: package.name().to_string(),
                        reason: other.to_string(),
                    },
                })?;

            info!("Installed package \"{}\"", package.name());
            report.installed.push(package.name().to_string());
        }

        Ok(report)
    }
}

impl Default for Installer {
    fn default() -> Self {
        Self::new()
    }
}
