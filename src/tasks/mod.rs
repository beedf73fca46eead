//! Named tasks executed in a fixed, strictly sequential order.
//!
//! There is no dependency graph, no parallelism, and no retry: `apply` runs
//! the list from [`all_apply_tasks`] front to back and stops at the first
//! failure, leaving earlier tasks applied.

pub mod config_downloads;
pub mod config_patches;
mod context;
pub mod mods;
#[cfg(feature = "toml-patches")]
pub mod toml_patches;

pub use context::Context;

use anyhow::Result;

use crate::logging::TaskStatus;

/// Outcome of a successfully executed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskResult {
    /// Task ran and applied its changes (or had nothing left to change).
    Ok,
    /// Task ran in dry-run mode; nothing was written.
    DryRun,
}

/// A named, executable unit of the patch pipeline.
pub trait Task: Send + Sync {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Whether this task has any work for the loaded manifest.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task fails, such as when a download fails or
    /// a file cannot be written. The error aborts the whole pipeline.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// Execute a single task, record its result, and propagate the first error.
///
/// A task whose `should_run` returns `false` is recorded as skipped. A
/// failing task is recorded before its error is returned, so the summary
/// shows where the pipeline stopped.
///
/// # Errors
///
/// Returns the task's error unchanged.
pub fn execute(task: &dyn Task, ctx: &Context) -> Result<()> {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping {} (nothing to do)", task.name()));
        ctx.log.record_task(task.name(), TaskStatus::Skipped, None);
        return Ok(());
    }

    ctx.log.stage(task.name());
    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
            Ok(())
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record_task(task.name(), TaskStatus::DryRun, None);
            Ok(())
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&e.to_string()));
            Err(e)
        }
    }
}

/// The ordered task list for the `apply` command.
#[must_use]
pub fn all_apply_tasks() -> Vec<Box<dyn Task>> {
    let mut tasks: Vec<Box<dyn Task>> = vec![
        Box::new(mods::RemoveMods),
        Box::new(mods::DownloadMods),
        Box::new(config_patches::PatchConfigs),
    ];
    #[cfg(feature = "toml-patches")]
    tasks.push(Box::new(toml_patches::PatchTomlConfigs));
    tasks.push(Box::new(config_downloads::DownloadConfigs));
    tasks
}
