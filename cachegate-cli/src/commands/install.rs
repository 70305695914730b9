//! Install command - seed and activate a worker generation.

use cachegate::config::ConfigFile;

use super::common::{build_runtime, build_worker, format_bytes, start_worker};
use crate::error::CliError;

/// Run the install command.
pub fn run(config: &ConfigFile) -> Result<(), CliError> {
    build_runtime()?.block_on(install(config))
}

async fn install(config: &ConfigFile) -> Result<(), CliError> {
    println!("Origin:     {}", config.origin.url);
    println!("Generation: {}", config.cache.name);
    println!("Seeding {} assets...", config.seed.assets.len());

    let worker = build_worker(config)?;
    if let Some(report) = start_worker(&worker).await? {
        println!(
            "Seeded {} entries ({}) into {}",
            report.entries,
            format_bytes(report.bytes),
            report.cache_name
        );
    }
    println!("Worker state: {}", worker.state());
    Ok(())
}
