//! Key=value config patching: overlay manifest changes and rewrite in full.

use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};
use crate::config::kv;

/// Merge `config_patches` changes into text config files under `config/`.
///
/// The whole file is always rewritten: existing pairs are read, changes are
/// overlaid (existing keys keep their position, new keys append in patch
/// order), and every pair is written back. Keys not mentioned in a patch
/// persist unchanged; comments and non-`key=value` lines do not survive.
#[derive(Debug)]
pub struct PatchConfigs;

impl Task for PatchConfigs {
    fn name(&self) -> &str {
        "Patch configs"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.manifest.config_patches.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        for patch in &ctx.manifest.config_patches {
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

            let mut pairs = kv::load(&path)?;
            for (key, value) in &patch.changes {
                kv::upsert(&mut pairs, key, &kv::render_value(value));
            }
            std::fs::write(&path, kv::render(&pairs))
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
