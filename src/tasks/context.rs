use std::path::PathBuf;
use std::sync::Arc;

use crate::config::manifest::Manifest;
use crate::http::Fetcher;
use crate::logging::Log;

/// Shared context for task execution.
pub struct Context {
    /// The loaded manifest driving all patch operations.
    pub manifest: Manifest,
    /// Root of the modpack instance being patched.
    pub instance_dir: PathBuf,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Whether to perform a dry run (preview changes without applying).
    pub dry_run: bool,
    /// HTTP fetcher (injectable for testing).
    pub fetcher: Arc<dyn Fetcher>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("manifest", &self.manifest)
            .field("instance_dir", &self.instance_dir)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .field("fetcher", &"<dyn Fetcher>")
            .finish()
    }
}

impl Context {
    /// Create a new context for task execution.
    #[must_use]
    pub fn new(
        manifest: Manifest,
        instance_dir: PathBuf,
        log: Arc<dyn Log>,
        dry_run: bool,
        fetcher: Arc<dyn Fetcher>,
    ) -> Self {
        Self {
            manifest,
            instance_dir,
            log,
            dry_run,
            fetcher,
        }
    }

    /// The `mods/` subdirectory of the instance.
    #[must_use]
    pub fn mods_dir(&self) -> PathBuf {
        self.instance_dir.join("mods")
    }

    /// The `config/` subdirectory of the instance.
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.instance_dir.join("config")
    }

    /// Destination under `config/` for a manifest-relative file path.
    ///
    /// Nested paths are allowed; parent directories are created by the
    /// tasks that write there.
    #[must_use]
    pub fn config_path(&self, file: &str) -> PathBuf {
        self.config_dir().join(file)
    }
}
