//! Instance-local modpack patcher.
//!
//! Applies a declarative JSON manifest — mod removals, mod downloads,
//! key=value config patches, and verbatim config downloads — to a modpack
//! instance directory. Execution is a single sequential pipeline: the first
//! failure aborts the run and leaves earlier steps applied.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]** — manifest loading and config-file parsing/rendering
//! - **[`http`]** — blocking fetch primitives behind the [`http::Fetcher`] seam
//! - **[`tasks`]** — named units of work executed in a fixed order
//! - **[`commands`]** — top-level subcommand orchestration (`apply`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod tasks;
