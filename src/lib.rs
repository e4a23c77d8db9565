//! # gaspm
//!
//! A module-registration and package-fetching shim for Google Apps Script
//! projects.
//!
//! Apps Script has no package ecosystem: scripts that want an external
//! JavaScript library either paste it in or fetch it at runtime. gaspm lets
//! a project declare its dependencies (by direct HTTPS URL or by cdnjs
//! name/version), fetches their source text, and exposes a minimal
//! CommonJS-style `require` / `module.exports` pair so fetched code is
//! addressable as named modules. The install workflow then copies the
//! fetched sources into the project's own file storage through the Apps
//! Script REST content API, so a deployed script carries its dependencies
//! as local files instead of re-fetching them on every run.
//!
//! ## Library layout
//!
//! - [`module_system`]: the write-once module registry, specifier
//!   resolution, per-evaluation scopes, and the [`module_system::Evaluator`]
//!   seam an embedding host implements with its JS engine
//! - [`package`]: package descriptors with one-shot source memoization
//! - [`cdn`]: cdnjs metadata client
//! - [`installer`]: ordered fetch-and-evaluate installation into a registry
//! - [`script_api`] / [`manifest`] / [`sync`]: the REST install workflow
//! - [`project`] / [`config`]: `gaspm.toml` and tool configuration
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use gaspm::installer::Installer;
//! use gaspm::package::Package;
//!
//! # async fn run(fetcher: &dyn gaspm::downloader::SourceFetcher,
//! #              evaluator: &mut dyn gaspm::module_system::Evaluator)
//! #              -> gaspm::error::Result<()> {
//! let mut packages = vec![
//!     Package::direct("foo", "https://example.com/foo.js")?,
//!     Package::cdn("moment", Some("2.29.4".into()), Some("moment.min.js".into()))?,
//! ];
//!
//! let cdn = gaspm::cdn::CdnClient::new();
//! let mut installer = Installer::new();
//! installer.install_all(&mut packages, fetcher, &cdn, evaluator).await?;
//!
//! let exports = installer.registry().lookup("foo")?;
//! # Ok(())
//! # }
//! ```

pub mod cdn;
pub mod config;
pub mod downloader;
pub mod error;
pub mod installer;
pub mod manifest;
pub mod module_system;
pub mod package;
pub mod project;
pub mod script_api;
pub mod sync;

pub use error::{GaspmError, Result};
