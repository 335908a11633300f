// SPDX-License-Identifier: GPL-3.0-only

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::Context;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_PREFIX: &str = "megaraid-inventory.log";
const MAX_LOG_AGE: Duration = Duration::from_secs(7 * 24 * 60 * 60);
const DEFAULT_DIRECTIVES: &str = "megaraid_inventory=info,raid_sys=info,warn";

/// Log to stderr, and to a daily rolling file under `log_dir` when given.
///
/// stdout is reserved for the report.
pub(crate) fn init(log_dir: Option<&Path>) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    let file_layer = match log_dir.map(file_writer) {
        Some(Ok((writer, guard))) => {
            // The worker flushes the file until the process exits.
            let _ = LOG_GUARD.set(guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_target(true)
                    .with_ansi(false),
            )
        }
        Some(Err(e)) => {
            eprintln!("megaraid-inventory: file logging disabled: {e:#}");
            None
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
}

fn file_writer(dir: &Path) -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("create log directory failed: {}", dir.display()))?;

    for stale in stale_logs(dir, MAX_LOG_AGE) {
        let _ = fs::remove_file(stale);
    }

    let appender = tracing_appender::rolling::daily(dir, LOG_PREFIX);
    Ok(tracing_appender::non_blocking(appender))
}

/// Rolled inventory logs in `dir` last written more than `max_age` ago.
fn stale_logs(dir: &Path, max_age: Duration) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    entries
        .flatten()
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(LOG_PREFIX))
        .filter_map(|entry| {
            let metadata = entry.metadata().ok()?;
            let age = metadata.modified().ok()?.elapsed().ok()?;
            (metadata.is_file() && age > max_age).then(|| entry.path())
        })
        .collect()
}
