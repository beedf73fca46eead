//! Domain-specific error types for the patcher.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Internal modules return typed errors ([`ManifestError`], [`FetchError`],
//! [`PatchError`]) while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! ManifestError — manifest loading (missing file, fetch, JSON parse)
//! FetchError    — blocking HTTP layer (status, transport, body read)
//! PatchError    — mod and config downloads during the patch pipeline
//! ```
//!
//! None of these are caught or retried anywhere: the pipeline stops at the
//! first failure, the process exits non-zero, and earlier steps stay applied.

use thiserror::Error;

/// Errors from the blocking HTTP layer.
///
/// Carried as the source of [`ManifestError::Fetch`] and both
/// [`PatchError`] variants.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The server answered with a non-success status code.
    #[error("GET {url} returned status {status}")]
    Status {
        /// URL that was requested.
        url: String,
        /// HTTP status code from the response.
        status: u16,
    },

    /// The request could not be completed (DNS, connect, TLS, ...).
    #[error("GET {url} failed: {source}")]
    Transport {
        /// URL that was requested.
        url: String,
        /// Underlying transport error.
        #[source]
        source: Box<ureq::Error>,
    },

    /// The response body could not be read to completion.
    #[error("failed to read response body from {url}: {source}")]
    Body {
        /// URL that was requested.
        url: String,
        /// Underlying read error.
        #[source]
        source: Box<ureq::Error>,
    },
}

/// Errors that arise while loading the manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// A `--local` manifest path does not exist.
    #[error("local manifest not found: {path}")]
    NotFound {
        /// Path that was given on the command line.
        path: String,
    },

    /// An I/O error occurred while reading a local manifest file.
    #[error("failed to read local manifest {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The remote manifest could not be fetched.
    #[error("failed to fetch remote manifest {url}: {source}")]
    Fetch {
        /// Manifest URL that was requested.
        url: String,
        /// Underlying HTTP error.
        #[source]
        source: FetchError,
    },

    /// The manifest content is not valid JSON.
    #[error("manifest is not valid JSON: {source}")]
    Parse {
        /// Underlying JSON parse error.
        #[from]
        source: serde_json::Error,
    },
}

/// Errors that arise while applying the manifest to the instance directory.
#[derive(Error, Debug)]
pub enum PatchError {
    /// A mod file could not be downloaded.
    #[error("failed to download mod '{name}': {source}")]
    ModDownload {
        /// Destination filename derived from the mod URL.
        name: String,
        /// Underlying HTTP error.
        #[source]
        source: FetchError,
    },

    /// A config file could not be downloaded.
    #[error("failed to download config '{file}': {source}")]
    ConfigDownload {
        /// Relative config path from the manifest entry.
        file: String,
        /// Underlying HTTP error.
        #[source]
        source: FetchError,
    },
}
