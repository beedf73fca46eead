//! Logging infrastructure: the [`Log`] trait, task summary collection, and
//! tracing subscriber setup.
//!
//! All console output goes through [`tracing`]; [`init_subscriber`] installs
//! a formatter whose level is controlled by `--verbose` or the
//! `MODPATCHER_LOG` environment filter.

use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Task execution result for summary reporting.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Human-readable task name.
    pub name: String,
    /// Final status of the task.
    pub status: TaskStatus,
    /// Optional detail message (e.g., skip reason or error description).
    pub message: Option<String>,
}

/// Status of a completed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Task completed successfully.
    Ok,
    /// Task was skipped (e.g., no matching manifest entries).
    Skipped,
    /// Task ran in dry-run mode; no changes were applied.
    DryRun,
    /// Task encountered an error and could not complete.
    Failed,
}

/// Abstraction over logging backends.
///
/// Task code logs through `Arc<dyn Log>` so that tests can substitute a
/// capturing logger without touching the tracing pipeline.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (suppressed on console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a task result for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}

/// Structured logger with dry-run awareness and summary collection.
#[derive(Debug, Default)]
pub struct Logger {
    tasks: Mutex<Vec<TaskEntry>>,
}

impl Logger {
    /// Create a new logger with an empty task summary.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Number of recorded tasks that failed.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.tasks.lock().map_or(0, |g| {
            g.iter().filter(|t| t.status == TaskStatus::Failed).count()
        })
    }

    /// Return a clone of all recorded task entries.
    #[must_use]
    pub fn task_entries(&self) -> Vec<TaskEntry> {
        self.tasks.lock().map_or_else(|_| Vec::new(), |g| g.clone())
    }

    /// Print a one-line-per-task run summary followed by totals.
    pub fn print_summary(&self) {
        let tasks = match self.tasks.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => return,
        };
        if tasks.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut ok = 0u32;
        let mut skipped = 0u32;
        let mut dry_run = 0u32;
        let mut failed = 0u32;

        for task in &tasks {
            let icon = match task.status {
                TaskStatus::Ok => {
                    ok += 1;
                    "✓"
                }
                TaskStatus::Skipped => {
                    skipped += 1;
                    "○"
                }
                TaskStatus::DryRun => {
                    dry_run += 1;
                    "~"
                }
                TaskStatus::Failed => {
                    failed += 1;
                    "✗"
                }
            };

            let suffix = task
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{icon} {}{suffix}", task.name));
        }

        let total = ok + skipped + dry_run + failed;
        self.info(&format!(
            "{total} tasks: {ok} ok, {skipped} skipped, {dry_run} dry-run, {failed} failed"
        ));
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: "modpatcher::stage", "==> {msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!(target: "modpatcher::dry_run", "[dry run] {msg}");
    }

    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.tasks.lock() {
            guard.push(TaskEntry {
                name: name.to_string(),
                status,
                message: message.map(ToString::to_string),
            });
        }
    }
}

/// Install the global tracing subscriber.
///
/// Console verbosity defaults to `info`, raised to `debug` by `--verbose`;
/// the `MODPATCHER_LOG` environment variable overrides both. Calling this
/// more than once is harmless (subsequent installs are ignored).
pub fn init_subscriber(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("MODPATCHER_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}
