//! Install/sync workflow: copy fetched package sources into a project's
//! file storage through the content API.
//!
//! The driving project declares the package library as a dependency in its
//! manifest. Syncing replaces the target library project's file set with the
//! manifest, the runtime bootstrap file, and one `SERVER_JS` file per
//! package, so the deployed script carries its dependencies as local files
//! instead of re-fetching them at runtime. When the manifest still points at
//! the upstream base library, a fresh project is created and the manifest is
//! relinked to it.

use tracing::info;

use crate::error::{GaspmError, Result};
use crate::manifest::Manifest;
use crate::package::Package;
use crate::script_api::{ContentApi, FileType, ProjectFile};

/// Name of the bootstrap file expected in the source project.
pub const DEFAULT_BOOTSTRAP_FILE: &str = "__package_management";

/// Options for a sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Script ID of the driving project (whose manifest names the library)
    pub script_id: String,
    /// The user symbol the library is bound to in the driving project
    pub user_symbol: String,
    /// Script ID of the upstream base library, when known
    pub base_library_id: Option<String>,
    /// Name of the bootstrap file to carry over
    pub bootstrap_file: String,
    /// Copy the manifest and bootstrap from this project instead of the
    /// currently linked library
    pub copy_from: Option<CopySource>,
}

/// Where the manifest and bootstrap files are copied from.
#[derive(Debug, Clone)]
pub enum CopySource {
    /// The upstream base library
    Upstream,
    /// An explicit project
    Script(String),
}

/// Outcome of a sync run.
#[derive(Debug)]
pub struct SyncOutcome {
    /// Script ID of the project the packages were written to
    pub target: String,
    /// Whether a new project was created (and the manifest relinked)
    pub created: bool,
    /// Number of files written to the target
    pub files_written: usize,
}

/// Build the replacement file set for a target project.
///
/// Takes the manifest (the JSON file) and the bootstrap file from the
/// existing set unchanged, then appends one `SERVER_JS` file per package
/// from its cached source. Every package must have been fetched first.
pub fn build_file_set(
    existing: &[ProjectFile],
    bootstrap_file: &str,
    packages: &[Package],
) -> Result<Vec<ProjectFile>> {
    let manifest = existing
        .iter()
        .find(|f| f.file_type == FileType::Json)
        .ok_or_else(|| GaspmError::Other("source project has no manifest file".to_string()))?;

    let bootstrap = existing
        .iter()
        .find(|f| f.name == bootstrap_file)
        .ok_or_else(|| {
            GaspmError::Other(format!(
                "source project has no \"{}\" bootstrap file",
                bootstrap_file
            ))
        })?;

    let mut files = vec![manifest.clone(), bootstrap.clone()];

    for package in packages {
        let source = package.cached_source().ok_or_else(|| {
            GaspmError::Other(format!(
                "package \"{}\" has not been fetched",
                package.name()
            ))
        })?;

        files.push(ProjectFile {
            name: package.name().to_string(),
            file_type: FileType::ServerJs,
            source: source.to_string(),
        });
    }

    Ok(files)
}

/// Sync workflow over a [`ContentApi`].
pub struct Syncer<'a> {
    api: &'a dyn ContentApi,
}

impl<'a> Syncer<'a> {
    /// Create a syncer.
    pub fn new(api: &'a dyn ContentApi) -> Self {
        Self { api }
    }

    /// Copy `src`'s manifest and bootstrap plus the package files into
    /// `dest`, overwriting its content. Returns the number of files written.
    pub async fn push(
        &self,
        src: &str,
        dest: &str,
        bootstrap_file: &str,
        packages: &[Package],
    ) -> Result<usize> {
        let content = self.api.get_content(src).await?;
        let files = build_file_set(&content.files, bootstrap_file, packages)?;
        self.api.put_content(dest, &files).await?;
        Ok(files.len())
    }

    /// Run the full install workflow against the driving project.
    pub async fn install(&self, opts: &SyncOptions, packages: &[Package]) -> Result<SyncOutcome> {
        info!("Install: getting information");

        let content = self.api.get_content(&opts.script_id).await?;
        let manifest_file = content
            .files
            .iter()
            .find(|f| f.file_type == FileType::Json)
            .ok_or_else(|| {
                GaspmError::Other("driving project has no manifest file".to_string())
            })?;
        let mut manifest = Manifest::parse(&manifest_file.source)?;
        let linked_id = manifest.find_library(&opts.user_symbol)?.library_id.clone();

        // Still pointing at the upstream base library: give this project its
        // own copy to install into.
        let (target, created) = if opts.base_library_id.as_deref() == Some(linked_id.as_str()) {
            info!("Install: creating new project");
            let id = self.api.create_project(&opts.user_symbol).await?;
            (id, true)
        } else {
            (linked_id.clone(), false)
        };

        info!("Install: downloading files");
        let copy_src = match &opts.copy_from {
            Some(CopySource::Upstream) => opts.base_library_id.clone().ok_or_else(|| {
                GaspmError::Config(
                    "copying from upstream requires base_library_id in gaspm.toml".to_string(),
                )
            })?,
            Some(CopySource::Script(id)) => id.clone(),
            None => linked_id.clone(),
        };
        let files_written = self
            .push(&copy_src, &target, &opts.bootstrap_file, packages)
            .await?;

        if created {
            info!("Install: linking new library");
            manifest.find_library_mut(&opts.user_symbol)?.library_id = target.clone();

            let mut files = content.files.clone();
            for file in files.iter_mut() {
                if file.file_type == FileType::Json {
                    file.source = manifest.to_source()?;
                }
            }
            self.api.put_content(&opts.script_id, &files).await?;
        }

        info!("Install: done");

        Ok(SyncOutcome {
            target,
            created,
            files_written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cdn::CdnClient;
    use crate::downloader::SourceFetcher;
    use crate::script_api::ProjectContent;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn manifest_file(source: &str) -> ProjectFile {
        ProjectFile {
            name: "appsscript".to_string(),
            file_type: FileType::Json,
            source: source.to_string(),
        }
    }

    fn bootstrap_file() -> ProjectFile {
        ProjectFile {
            name: DEFAULT_BOOTSTRAP_FILE.to_string(),
            file_type: FileType::ServerJs,
            source: "// bootstrap".to_string(),
        }
    }

    async fn fetched_package(name: &str, body: &str) -> Package {
        struct OneShot(String, String);

        #[async_trait]
        impl SourceFetcher for OneShot {
            async fn fetch_text(&self, url: &str) -> Result<String> {
                assert_eq!(url, self.0);
                Ok(self.1.clone())
            }
        }

        let url = format!("https://example.com/{}.js", name);
        let mut pkg = Package::direct(name, &url).unwrap();
        pkg.fetch_cached(&OneShot(url, body.to_string()), &CdnClient::new())
            .await
            .unwrap();
        pkg
    }

    #[tokio::test]
    async fn test_build_file_set_layout() {
        let existing = vec![manifest_file("{}"), bootstrap_file()];
        let packages = vec![fetched_package("foo", "module.exports = 42").await];

        let files = build_file_set(&existing, DEFAULT_BOOTSTRAP_FILE, &packages).unwrap();

        assert_eq!(files.len(), 3);
        assert_eq!(files[0].file_type, FileType::Json);
        assert_eq!(files[1].name, DEFAULT_BOOTSTRAP_FILE);
        assert_eq!(files[2].name, "foo");
        assert_eq!(files[2].file_type, FileType::ServerJs);
        assert_eq!(files[2].source, "module.exports = 42");
    }

    #[tokio::test]
    async fn test_build_file_set_requires_bootstrap_and_fetch() {
        let packages = vec![fetched_package("foo", "x").await];
        let err =
            build_file_set(&[manifest_file("{}")], DEFAULT_BOOTSTRAP_FILE, &packages).unwrap_err();
        assert!(matches!(err, GaspmError::Other(_)));

        let existing = vec![manifest_file("{}"), bootstrap_file()];
        let unfetched = vec![Package::direct("bar", "https://example.com/bar.js").unwrap()];
        let err = build_file_set(&existing, DEFAULT_BOOTSTRAP_FILE, &unfetched).unwrap_err();
        assert!(matches!(err, GaspmError::Other(_)));
    }

    /// In-memory content API.
    struct MockApi {
        projects: Mutex<HashMap<String, Vec<ProjectFile>>>,
        next_id: String,
    }

    impl MockApi {
        fn new(next_id: &str) -> Self {
            Self {
                projects: Mutex::new(HashMap::new()),
                next_id: next_id.to_string(),
            }
        }

        fn seed(&self, id: &str, files: Vec<ProjectFile>) {
            self.projects.lock().unwrap().insert(id.to_string(), files);
        }

        fn files(&self, id: &str) -> Vec<ProjectFile> {
            self.projects.lock().unwrap().get(id).cloned().unwrap()
        }
    }

    #[async_trait]
    impl ContentApi for MockApi {
        async fn get_content(&self, script_id: &str) -> Result<ProjectContent> {
            let files = self
                .projects
                .lock()
                .unwrap()
                .get(script_id)
                .cloned()
                .ok_or(GaspmError::RemoteApi {
                    status: 404,
                    message: "Not Found".to_string(),
                })?;
            Ok(ProjectContent {
                script_id: Some(script_id.to_string()),
                files,
            })
        }

        async fn put_content(&self, script_id: &str, files: &[ProjectFile]) -> Result<()> {
            self.projects
                .lock()
                .unwrap()
                .insert(script_id.to_string(), files.to_vec());
            Ok(())
        }

        async fn create_project(&self, _title: &str) -> Result<String> {
            self.projects
                .lock()
                .unwrap()
                .insert(self.next_id.clone(), Vec::new());
            Ok(self.next_id.clone())
        }
    }

    const UPSTREAM: &str = "UPSTREAM_LIB";

    fn driving_manifest(library_id: &str) -> String {
        format!(
            r#"{{"dependencies": {{"libraries": [{{"userSymbol": "Pkg", "libraryId": "{}", "version": "1"}}]}}}}"#,
            library_id
        )
    }

    fn options() -> SyncOptions {
        SyncOptions {
            script_id: "DRIVER".to_string(),
            user_symbol: "Pkg".to_string(),
            base_library_id: Some(UPSTREAM.to_string()),
            bootstrap_file: DEFAULT_BOOTSTRAP_FILE.to_string(),
            copy_from: None,
        }
    }

    #[tokio::test]
    async fn test_install_creates_and_relinks_when_on_upstream() {
        let api = MockApi::new("FRESH");
        api.seed("DRIVER", vec![manifest_file(&driving_manifest(UPSTREAM))]);
        api.seed(UPSTREAM, vec![manifest_file("{}"), bootstrap_file()]);

        let packages = vec![fetched_package("foo", "module.exports = 42").await];
        let outcome = Syncer::new(&api)
            .install(&options(), &packages)
            .await
            .unwrap();

        assert!(outcome.created);
        assert_eq!(outcome.target, "FRESH");
        assert_eq!(outcome.files_written, 3);

        // The new project carries the package file
        let fresh = api.files("FRESH");
        assert!(fresh.iter().any(|f| f.name == "foo"));

        // The driving manifest now points at the new project
        let driver = api.files("DRIVER");
        let manifest = Manifest::parse(&driver[0].source).unwrap();
        assert_eq!(manifest.find_library("Pkg").unwrap().library_id, "FRESH");
    }

    #[tokio::test]
    async fn test_install_reuses_existing_library_project() {
        let api = MockApi::new("UNUSED");
        api.seed("DRIVER", vec![manifest_file(&driving_manifest("MINE"))]);
        api.seed("MINE", vec![manifest_file("{}"), bootstrap_file()]);

        let packages = vec![fetched_package("foo", "module.exports = 42").await];
        let outcome = Syncer::new(&api)
            .install(&options(), &packages)
            .await
            .unwrap();

        assert!(!outcome.created);
        assert_eq!(outcome.target, "MINE");

        // The driving manifest is untouched
        let driver = api.files("DRIVER");
        let manifest = Manifest::parse(&driver[0].source).unwrap();
        assert_eq!(manifest.find_library("Pkg").unwrap().library_id, "MINE");
    }

    #[tokio::test]
    async fn test_install_copy_from_upstream() {
        let api = MockApi::new("UNUSED");
        api.seed("DRIVER", vec![manifest_file(&driving_manifest("MINE"))]);
        // The linked project is stale; upstream carries a newer bootstrap
        api.seed("MINE", Vec::new());
        let mut upstream_bootstrap = bootstrap_file();
        upstream_bootstrap.source = "// v2 bootstrap".to_string();
        api.seed(UPSTREAM, vec![manifest_file("{}"), upstream_bootstrap]);

        let mut opts = options();
        opts.copy_from = Some(CopySource::Upstream);

        let packages = vec![fetched_package("foo", "x").await];
        Syncer::new(&api).install(&opts, &packages).await.unwrap();

        let mine = api.files("MINE");
        assert!(mine.iter().any(|f| f.source == "// v2 bootstrap"));
    }
}
