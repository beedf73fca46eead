//! Manifest loading and config-file parsing/rendering.

pub mod kv;
pub mod manifest;
#[cfg(feature = "toml-patches")]
pub mod toml_patch;
