//! Structured TOML config patching (feature `toml-patches`).

use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};
use crate::config::toml_patch;

/// Deep-merge `toml_patches` changes into TOML config files under `config/`.
///
/// Missing files are created from the changes alone. The document is
/// rewritten on every patch, so original formatting and comments are lost,
/// same as the key=value editor.
#[derive(Debug)]
pub struct PatchTomlConfigs;

impl Task for PatchTomlConfigs {
    fn name(&self) -> &str {
        "Patch TOML configs"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.manifest.toml_patches.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        for patch in &ctx.manifest.toml_patches {
            let path = ctx.config_path(&patch.file);
            if ctx.dry_run {
                ctx.log.dry_run(&format!(
                    "would patch {} ({} changes)",
                    patch.file,
                    patch.changes.len()
                ));
                continue;
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }

            let mut table = toml_patch::load_table(&path)?;
            toml_patch::merge_changes(&mut table, &patch.changes)
                .with_context(|| format!("patching {}", patch.file))?;
            std::fs::write(&path, toml_patch::render(&table)?)
                .with_context(|| format!("writing {}", path.display()))?;

            ctx.log.info(&format!(
                "patched {} ({} changes)",
                patch.file,
                patch.changes.len()
            ));
        }

        if ctx.dry_run {
            return Ok(TaskResult::DryRun);
        }
        Ok(TaskResult::Ok)
    }
}
