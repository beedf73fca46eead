//! Verbatim config downloads into `config/`, always overwriting.

use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};
use crate::error::PatchError;

/// Fetch whole config files named by `config_downloads` into `config/`.
///
/// Unlike mod downloads there is no existence check: the destination is
/// overwritten unconditionally on every run.
#[derive(Debug)]
pub struct DownloadConfigs;

impl Task for DownloadConfigs {
    fn name(&self) -> &str {
        "Download configs"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.manifest.config_downloads.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        for entry in &ctx.manifest.config_downloads {
            let path = ctx.config_path(&entry.file);
            if ctx.dry_run {
                ctx.log
                    .dry_run(&format!("would download {} from {}", entry.file, entry.url));
                continue;
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }

            let bytes =
                ctx.fetcher
                    .fetch_bytes(&entry.url)
                    .map_err(|source| PatchError::ConfigDownload {
                        file: entry.file.clone(),
                        source,
                    })?;
            std::fs::write(&path, bytes)
                .with_context(|| format!("writing {}", path.display()))?;
            ctx.log.info(&format!("saved {}", entry.file));
        }

        if ctx.dry_run {
            return Ok(TaskResult::DryRun);
        }
        Ok(TaskResult::Ok)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::manifest::{ConfigDownload, Manifest};
    use crate::http::MockFetcher;
    use crate::logging::Logger;
    use mockall::predicate::eq;
    use std::path::Path;
    use std::sync::Arc;

    fn context_with_download(
        instance: &Path,
        file: &str,
        url: &str,
        fetcher: MockFetcher,
    ) -> Context {
        let manifest = Manifest {
            config_downloads: vec![ConfigDownload {
                file: file.to_string(),
                url: url.to_string(),
            }],
            ..Manifest::default()
        };
        Context::new(
            manifest,
            instance.to_path_buf(),
            Arc::new(Logger::new()),
            false,
            Arc::new(fetcher),
        )
    }

    #[test]
    fn download_writes_fetched_bytes_to_nested_path() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut fetcher = MockFetcher::new();
        fetcher
            .expect_fetch_bytes()
            .with(eq("https://example.com/main.cfg"))
            .times(1)
            .returning(|_| Ok(b"fresh content".to_vec()));

        let ctx = context_with_download(
            dir.path(),
            "gregtech/main.cfg",
            "https://example.com/main.cfg",
            fetcher,
        );
        DownloadConfigs.run(&ctx).expect("download should succeed");

        let written =
            std::fs::read(dir.path().join("config/gregtech/main.cfg")).expect("read config");
        assert_eq!(written, b"fresh content");
    }

    #[test]
    fn download_overwrites_existing_file_unconditionally() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = dir.path().join("config");
        std::fs::create_dir_all(&config).expect("create config dir");
        std::fs::write(config.join("main.cfg"), b"stale").expect("write config");

        let mut fetcher = MockFetcher::new();
        fetcher
            .expect_fetch_bytes()
            .times(1)
            .returning(|_| Ok(b"stale".to_vec()));

        let ctx = context_with_download(
            dir.path(),
            "main.cfg",
            "https://example.com/main.cfg",
            fetcher,
        );
        DownloadConfigs.run(&ctx).expect("download should succeed");

        // Content identical, but the fetch still happened (times(1) above).
        let written = std::fs::read(config.join("main.cfg")).expect("read config");
        assert_eq!(written, b"stale");
    }

    #[test]
    fn download_failure_aborts_with_config_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut fetcher = MockFetcher::new();
        fetcher.expect_fetch_bytes().returning(|url| {
            Err(crate::error::FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        });

        let ctx = context_with_download(
            dir.path(),
            "main.cfg",
            "https://example.com/main.cfg",
            fetcher,
        );
        let err = DownloadConfigs
            .run(&ctx)
            .expect_err("fetch failure should abort");
        assert!(format!("{err:#}").contains("main.cfg"));
    }

    #[test]
    fn download_dry_run_does_not_fetch() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut fetcher = MockFetcher::new();
        fetcher.expect_fetch_bytes().times(0);

        let mut ctx = context_with_download(
            dir.path(),
            "main.cfg",
            "https://example.com/main.cfg",
            fetcher,
        );
        ctx.dry_run = true;

        let result = DownloadConfigs.run(&ctx).expect("dry run should succeed");
        assert_eq!(result, TaskResult::DryRun);
        assert!(!dir.path().join("config/main.cfg").exists());
    }
}
