//! Command: apply the manifest to the instance directory.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::{ApplyOpts, GlobalOpts};
use crate::config::manifest::{self, ManifestSource};
use crate::http::{Fetcher, UreqFetcher};
use crate::logging::{Log, Logger};
use crate::tasks::{self, Context, Task};

/// Run the apply command with the production HTTP fetcher.
///
/// # Errors
///
/// Returns an error if the instance directory cannot be resolved, the
/// manifest fails to load, or any task fails. The first task failure stops
/// the pipeline; earlier tasks stay applied.
pub fn run(global: &GlobalOpts, opts: &ApplyOpts, log: &Arc<Logger>) -> Result<()> {
    run_with_fetcher(global, opts, log, Arc::new(UreqFetcher::new()))
}

/// Run the apply command with an injected [`Fetcher`].
///
/// Split out from [`run`] so the full pipeline can be exercised in tests
/// without a network.
///
/// # Errors
///
/// Same as [`run`].
pub fn run_with_fetcher(
    global: &GlobalOpts,
    opts: &ApplyOpts,
    log: &Arc<Logger>,
    fetcher: Arc<dyn Fetcher>,
) -> Result<()> {
    let instance_dir = resolve_instance_dir(global)?;

    let version = option_env!("MODPATCHER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("modpatcher {version}"));
    log.info(&format!("instance directory: {}", instance_dir.display()));

    log.stage("Loading manifest");
    let source = ManifestSource::resolve(global.local.as_deref(), global.remote.as_deref());
    let manifest = manifest::load(&source, fetcher.as_ref())?;
    log.info(&format!("loaded manifest from {source}"));
    log.debug(&format!("{} mod removals", manifest.remove_mods.len()));
    log.debug(&format!("{} mod additions", manifest.add_mods.len()));
    log.debug(&format!("{} config patches", manifest.config_patches.len()));
    log.debug(&format!(
        "{} config downloads",
        manifest.config_downloads.len()
    ));

    #[cfg(not(feature = "toml-patches"))]
    if !manifest.toml_patches.is_empty() {
        log.warn(&format!(
            "compiled without TOML config patching; skipping {} toml patch(es)",
            manifest.toml_patches.len()
        ));
    }

    if global.dry_run {
        log.dry_run("would ensure mods/ and config/ directories exist");
    } else {
        std::fs::create_dir_all(instance_dir.join("mods"))
            .context("creating mods directory")?;
        std::fs::create_dir_all(instance_dir.join("config"))
            .context("creating config directory")?;
    }

    let ctx = Context::new(
        manifest,
        instance_dir,
        Arc::clone(log) as Arc<dyn Log>,
        global.dry_run,
        fetcher,
    );

    let all_tasks = tasks::all_apply_tasks();
    let tasks_to_run: Vec<&dyn Task> = all_tasks
        .iter()
        .filter(|t| {
            let name = t.name().to_lowercase();
            if !opts.only.is_empty() {
                return opts.only.iter().any(|o| name.contains(&o.to_lowercase()));
            }
            if !opts.skip.is_empty() {
                return !opts.skip.iter().any(|s| name.contains(&s.to_lowercase()));
            }
            true
        })
        .map(AsRef::as_ref)
        .collect();

    let result = run_tasks(&tasks_to_run, &ctx);
    log.print_summary();
    result
}

/// Execute tasks in order, stopping at the first failure.
fn run_tasks(tasks_to_run: &[&dyn Task], ctx: &Context) -> Result<()> {
    for task in tasks_to_run {
        tasks::execute(*task, ctx)?;
    }
    Ok(())
}

/// Resolve the instance directory from CLI arguments or the environment.
///
/// Precedence: `--instance-dir`, then `MODPATCHER_INSTANCE_DIR`, then the
/// current working directory.
///
/// # Errors
///
/// Returns an error if an explicitly given directory does not exist, or the
/// current directory cannot be determined.
pub fn resolve_instance_dir(global: &GlobalOpts) -> Result<PathBuf> {
    let explicit = global
        .instance_dir
        .clone()
        .or_else(|| std::env::var("MODPATCHER_INSTANCE_DIR").ok().map(PathBuf::from));

    if let Some(dir) = explicit {
        if !dir.is_dir() {
            anyhow::bail!("instance directory does not exist: {}", dir.display());
        }
        return Ok(dir);
    }

    std::env::current_dir().context("resolving current directory")
}
