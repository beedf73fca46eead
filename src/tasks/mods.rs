//! Mod patching: delete named files from `mods/`, download missing ones.

use anyhow::{Context as _, Result, bail};

use super::{Context, Task, TaskResult};
use crate::error::PatchError;

/// Delete the mod files named by `remove_mods` from `mods/`.
///
/// A name with no matching file is silently skipped, so removal is
/// idempotent across runs.
#[derive(Debug)]
pub struct RemoveMods;

impl Task for RemoveMods {
    fn name(&self) -> &str {
        "Remove mods"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.manifest.remove_mods.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let mods_dir = ctx.mods_dir();
        let mut removed = 0u32;
        let mut absent = 0u32;

        for name in &ctx.manifest.remove_mods {
            let target = mods_dir.join(name);
            if target.exists() {
                if ctx.dry_run {
                    ctx.log.dry_run(&format!("would remove {name}"));
                    continue;
                }
                std::fs::remove_file(&target)
                    .with_context(|| format!("removing {}", target.display()))?;
                ctx.log.info(&format!("removed {name}"));
                removed += 1;
            } else {
                ctx.log.debug(&format!("not present: {name}"));
                absent += 1;
            }
        }

        if ctx.dry_run {
            return Ok(TaskResult::DryRun);
        }
        ctx.log
            .info(&format!("{removed} removed, {absent} already absent"));
        Ok(TaskResult::Ok)
    }
}

/// Download the mods named by `add_mods` into `mods/`.
///
/// The destination filename is the last path segment of each URL. Existing
/// files are never overwritten or re-verified, so a second run with the
/// same manifest downloads nothing.
#[derive(Debug)]
pub struct DownloadMods;

impl Task for DownloadMods {
    fn name(&self) -> &str {
        "Download mods"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.manifest.add_mods.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let mods_dir = ctx.mods_dir();
        if !ctx.dry_run {
            std::fs::create_dir_all(&mods_dir)
                .with_context(|| format!("creating {}", mods_dir.display()))?;
        }

        let mut downloaded = 0u32;
        let mut present = 0u32;

        for entry in &ctx.manifest.add_mods {
            let Some(name) = entry.file_name() else {
                bail!("cannot derive a file name from mod url '{}'", entry.url);
            };
            let dest = mods_dir.join(name);
            if dest.exists() {
                ctx.log.debug(&format!("already present: {name}"));
                present += 1;
                continue;
            }
            if ctx.dry_run {
                ctx.log
                    .dry_run(&format!("would download {name} from {}", entry.url));
                continue;
            }

            let bytes = ctx
                .fetcher
                .fetch_bytes(&entry.url)
                .map_err(|source| PatchError::ModDownload {
                    name: name.to_string(),
                    source,
                })?;
            std::fs::write(&dest, bytes)
                .with_context(|| format!("writing {}", dest.display()))?;
            ctx.log.info(&format!("downloaded {name}"));
            downloaded += 1;
        }

        if ctx.dry_run {
            return Ok(TaskResult::DryRun);
        }
        ctx.log
            .info(&format!("{downloaded} downloaded, {present} already present"));
        Ok(TaskResult::Ok)
    }
}
