// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed instance fixture and a map-backed
// fetcher so each integration test can run the full apply pipeline in an
// isolated environment without touching the network.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use modpack_patcher::cli::{ApplyOpts, GlobalOpts};
use modpack_patcher::commands::apply;
use modpack_patcher::error::FetchError;
use modpack_patcher::http::Fetcher;
use modpack_patcher::logging::Logger;

/// Map-backed [`Fetcher`] that serves canned bodies and records every
/// requested URL. Unknown URLs answer with a 404 status error.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `body` as the response for `url`.
    #[must_use]
    pub fn with_body(mut self, url: &str, body: &[u8]) -> Self {
        self.bodies.insert(url.to_string(), body.to_vec());
        self
    }

    /// Number of times `url` was requested.
    pub fn request_count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .iter()
            .filter(|u| u.as_str() == url)
            .count()
    }

    /// Total number of requests made, regardless of URL.
    pub fn total_requests(&self) -> usize {
        self.requests.lock().expect("requests lock poisoned").len()
    }
}

impl Fetcher for StaticFetcher {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .push(url.to_string());
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

/// An isolated modpack instance backed by temporary directories.
///
/// The instance directory and the directory holding the local manifest are
/// separate, so tests can assert that the pipeline created nothing in the
/// instance beyond `mods/` and `config/`.
pub struct InstanceFixture {
    instance: tempfile::TempDir,
    manifests: tempfile::TempDir,
}

impl InstanceFixture {
    pub fn new() -> Self {
        Self {
            instance: tempfile::tempdir().expect("create instance dir"),
            manifests: tempfile::tempdir().expect("create manifest dir"),
        }
    }

    /// Path to the instance root.
    pub fn path(&self) -> &Path {
        self.instance.path()
    }

    pub fn mods_dir(&self) -> PathBuf {
        self.instance.path().join("mods")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.instance.path().join("config")
    }

    /// Write a manifest JSON document and return its path.
    pub fn write_manifest(&self, json: &str) -> PathBuf {
        let path = self.manifests.path().join("manifest.json");
        std::fs::write(&path, json).expect("write manifest");
        path
    }

    /// Create a mod file inside `mods/`.
    pub fn write_mod(&self, name: &str, content: &[u8]) {
        std::fs::create_dir_all(self.mods_dir()).expect("create mods dir");
        std::fs::write(self.mods_dir().join(name), content).expect("write mod file");
    }

    /// Create a config file inside `config/` (parents created as needed).
    pub fn write_config(&self, file: &str, content: &str) {
        let path = self.config_dir().join(file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create config parent");
        }
        std::fs::write(&path, content).expect("write config file");
    }

    /// Read a config file from `config/`.
    pub fn read_config(&self, file: &str) -> String {
        std::fs::read_to_string(self.config_dir().join(file)).expect("read config file")
    }

    /// Names of the entries directly inside the instance root.
    pub fn root_entries(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.instance.path())
            .expect("read instance dir")
            .map(|e| {
                e.expect("dir entry")
                    .file_name()
                    .to_string_lossy()
                    .to_string()
            })
            .collect();
        names.sort();
        names
    }
}

/// Run `apply` against the fixture with a local manifest and the given
/// fetcher, returning the pipeline result and the logger for inspection.
pub fn run_apply(
    fixture: &InstanceFixture,
    manifest_json: &str,
    fetcher: &Arc<StaticFetcher>,
) -> (anyhow::Result<()>, Arc<Logger>) {
    run_apply_with_opts(
        fixture,
        manifest_json,
        fetcher,
        false,
        &ApplyOpts {
            skip: vec![],
            only: vec![],
        },
    )
}

/// [`run_apply`] with control over dry-run and task filtering.
pub fn run_apply_with_opts(
    fixture: &InstanceFixture,
    manifest_json: &str,
    fetcher: &Arc<StaticFetcher>,
    dry_run: bool,
    opts: &ApplyOpts,
) -> (anyhow::Result<()>, Arc<Logger>) {
    let manifest_path = fixture.write_manifest(manifest_json);
    let global = GlobalOpts {
        local: Some(manifest_path),
        remote: None,
        instance_dir: Some(fixture.path().to_path_buf()),
        dry_run,
    };
    let log = Arc::new(Logger::new());
    let result = apply::run_with_fetcher(
        &global,
        opts,
        &log,
        Arc::clone(fetcher) as Arc<dyn Fetcher>,
    );
    (result, log)
}
