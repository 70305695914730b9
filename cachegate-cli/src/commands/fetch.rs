//! Fetch command - arbitrate requests through a freshly seeded generation.

use cachegate::config::ConfigFile;
use cachegate::resource::Request;
use cachegate::worker::{EventOutcome, WorkerError, WorkerEvent};
use tracing::warn;

use super::common::{build_runtime, build_worker, format_bytes, start_worker, CliWorker};
use crate::error::CliError;

/// Run the fetch command.
pub fn run(config: &ConfigFile, paths: &[String]) -> Result<(), CliError> {
    build_runtime()?.block_on(fetch_all(config, paths))
}

async fn fetch_all(config: &ConfigFile, paths: &[String]) -> Result<(), CliError> {
    let worker = build_worker(config)?;
    if let Some(report) = start_worker(&worker).await? {
        println!("Seeded {} entries into {}", report.entries, report.cache_name);
    }

    let mut failed = 0;
    for path in paths {
        if !fetch_one(&worker, config, path).await? {
            failed += 1;
        }
    }

    worker.arbiter().flush_refills().await;
    if let Some(cache) = worker.arbiter().current_cache() {
        match cache.keys().await {
            Ok(keys) => println!("{} now holds {} entries", cache.name(), keys.len()),
            Err(e) => warn!(cache = %cache.name(), error = %e, "Failed to list cache entries"),
        }
    }

    if failed > 0 {
        return Err(CliError::Unanswered {
            failed,
            total: paths.len(),
        });
    }
    Ok(())
}

/// Arbitrate one path and print the result. Returns false if unanswered.
async fn fetch_one(worker: &CliWorker, config: &ConfigFile, path: &str) -> Result<bool, CliError> {
    let url = config
        .origin
        .url
        .join(path)
        .map_err(|e| CliError::InvalidPath {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

    match worker.dispatch(WorkerEvent::Fetch(Request::get(url.clone()))).await {
        Ok(EventOutcome::Responded(arbitration)) => {
            let response = &arbitration.response;
            println!(
                "{:<16} {} {} ({})",
                arbitration.source.to_string(),
                response.status().as_u16(),
                url,
                format_bytes(response.body().len() as u64)
            );
            Ok(true)
        }
        Ok(_) => {
            println!("{:<16} {}", "not intercepted", url);
            Ok(true)
        }
        Err(WorkerError::Fetch(e)) => {
            println!("{:<16} {} ({})", "failed", url, e);
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}
