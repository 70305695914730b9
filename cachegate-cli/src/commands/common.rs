//! Common types and utilities shared across CLI commands.

use std::path::Path;
use std::sync::Arc;

use cachegate::arbiter::{Arbiter, SeedReport};
use cachegate::cache::CacheStorage;
use cachegate::config::ConfigFile;
use cachegate::logging::{self, LoggingGuard};
use cachegate::network::ReqwestFetcher;
use cachegate::notification::LogNotifier;
use cachegate::worker::{EventOutcome, ServiceWorker, WorkerEvent};
use tracing::info;

use crate::error::CliError;

/// Worker as wired by the CLI: live HTTP, notifications go to the log.
pub type CliWorker = ServiceWorker<ReqwestFetcher, LogNotifier>;

/// Initialize logging to ~/.cachegate/logs/cachegate.log and stderr.
pub fn init_logging() -> Result<LoggingGuard, CliError> {
    logging::init_logging(&logging::default_log_dir(), logging::default_log_file())
        .map_err(|e| CliError::LoggingInit(e.to_string()))
}

/// Load the config file at `path`, falling back to defaults if absent.
pub fn load_config(path: &Path) -> Result<ConfigFile, CliError> {
    Ok(ConfigFile::load_from(path)?)
}

pub fn build_runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)
}

/// Build a fresh worker generation from configuration.
///
/// Storage lives only for this process, so activation never finds an older
/// generation to retire.
pub fn build_worker(config: &ConfigFile) -> Result<CliWorker, CliError> {
    let fetcher =
        ReqwestFetcher::with_timeout(config.network.timeout_secs).map_err(CliError::HttpClient)?;
    let arbiter = Arbiter::new(
        config.to_arbiter_config(),
        Arc::new(CacheStorage::in_memory()),
        fetcher,
    );
    Ok(ServiceWorker::new(arbiter, LogNotifier::new()))
}

/// Run install then activate. Returns the seed report from install.
pub async fn start_worker(worker: &CliWorker) -> Result<Option<SeedReport>, CliError> {
    let seeded = match worker.dispatch(WorkerEvent::Install).await? {
        EventOutcome::Installed(report) => Some(report),
        _ => None,
    };
    worker.dispatch(WorkerEvent::Activate).await?;

    info!(state = %worker.state(), "Worker ready");
    Ok(seeded)
}

/// Format a byte count for display.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
