//! The JSON manifest driving all patch operations, and its loader.
//!
//! A manifest is fetched from a local file (`--local`), a remote URL
//! (`--remote`), or the built-in default URL, in that order of precedence.
//! All top-level fields are optional; absent fields are treated as empty.
//! There is no further schema validation.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ManifestError;
use crate::http::Fetcher;

/// Default remote manifest URL, used when neither `--local` nor `--remote`
/// is given. Explicit arguments are the only recognized override points.
pub const DEFAULT_MANIFEST_URL: &str =
    "https://raw.githubusercontent.com/wrldmap/gtnhpatcher/refs/heads/main/manifest.json";

/// A parsed manifest.
///
/// # Examples
///
/// ```
/// use modpack_patcher::config::manifest::Manifest;
///
/// let manifest: Manifest = serde_json::from_str("{}").unwrap();
/// assert!(manifest.remove_mods.is_empty());
/// assert!(manifest.add_mods.is_empty());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Filenames to delete from `mods/` (missing files are silently skipped).
    pub remove_mods: Vec<String>,
    /// Mods to download into `mods/` (existing files are never overwritten).
    pub add_mods: Vec<ModDownload>,
    /// Key=value overlays for text config files under `config/`.
    pub config_patches: Vec<ConfigPatch>,
    /// Whole config files to fetch verbatim into `config/`.
    pub config_downloads: Vec<ConfigDownload>,
    /// Structured overlays for TOML config files under `config/`.
    ///
    /// Applied only when the `toml-patches` feature is compiled in;
    /// otherwise skipped with a single warning.
    pub toml_patches: Vec<TomlPatch>,
}

/// A mod to download, identified solely by its URL.
#[derive(Debug, Clone, Deserialize)]
pub struct ModDownload {
    /// Direct download URL; the destination filename is its last path segment.
    pub url: String,
}

impl ModDownload {
    /// Destination filename derived from the last path segment of the URL.
    ///
    /// Returns `None` when the URL ends in `/` (no usable segment).
    ///
    /// # Examples
    ///
    /// ```
    /// use modpack_patcher::config::manifest::ModDownload;
    ///
    /// let m = ModDownload { url: "https://example.com/mods/gregtech.jar".into() };
    /// assert_eq!(m.file_name(), Some("gregtech.jar"));
    /// ```
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.url.rsplit('/').next().filter(|s| !s.is_empty())
    }
}

/// A key=value overlay for one text config file.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigPatch {
    /// Config path relative to `config/` (path separators allowed).
    pub file: String,
    /// Key → value overrides, applied in manifest order.
    pub changes: serde_json::Map<String, serde_json::Value>,
}

/// A config file to fetch verbatim, always overwriting the destination.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigDownload {
    /// Config path relative to `config/` (path separators allowed).
    pub file: String,
    /// Direct download URL for the file content.
    pub url: String,
}

/// A structured overlay for one TOML config file.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlPatch {
    /// Config path relative to `config/` (path separators allowed).
    pub file: String,
    /// JSON object deep-merged into the TOML document.
    pub changes: serde_json::Map<String, serde_json::Value>,
}

/// Where the manifest is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// A file on the local filesystem.
    Local(PathBuf),
    /// A remote URL fetched over HTTP.
    Remote(String),
}

impl ManifestSource {
    /// Resolve the manifest source from CLI arguments.
    ///
    /// A local path takes precedence; otherwise the given remote URL or,
    /// failing that, [`DEFAULT_MANIFEST_URL`].
    #[must_use]
    pub fn resolve(local: Option<&Path>, remote: Option<&str>) -> Self {
        local.map_or_else(
            || Self::Remote(remote.unwrap_or(DEFAULT_MANIFEST_URL).to_string()),
            |path| Self::Local(path.to_path_buf()),
        )
    }
}

impl std::fmt::Display for ManifestSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local(path) => write!(f, "local file {}", path.display()),
            Self::Remote(url) => write!(f, "{url}"),
        }
    }
}

/// Load and parse the manifest from `source`.
///
/// # Errors
///
/// Returns [`ManifestError::NotFound`] if a local path does not exist,
/// [`ManifestError::Fetch`] if a remote fetch fails, and
/// [`ManifestError::Parse`] if the content is not valid JSON.
pub fn load(source: &ManifestSource, fetcher: &dyn Fetcher) -> Result<Manifest, ManifestError> {
    match source {
        ManifestSource::Local(path) => {
            if !path.exists() {
                return Err(ManifestError::NotFound {
                    path: path.display().to_string(),
                });
            }
            let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
                path: path.display().to_string(),
                source,
            })?;
            Ok(serde_json::from_str(&content)?)
        }
        ManifestSource::Remote(url) => {
            let bytes = fetcher
                .fetch_bytes(url)
                .map_err(|source| ManifestError::Fetch {
                    url: url.clone(),
                    source,
                })?;
            Ok(serde_json::from_slice(&bytes)?)
        }
    }
}
