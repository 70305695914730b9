//! Configuration management CLI commands.
//!
//! Provides `config show`, `config init`, and `config path`.

use std::path::Path;

use cachegate::config::ConfigFile;
use clap::Subcommand;

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Write a config file with default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, path: &Path) -> Result<(), CliError> {
    match command {
        ConfigCommands::Show => run_show(path),
        ConfigCommands::Init { force } => run_init(path, force),
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn run_show(path: &Path) -> Result<(), CliError> {
    let config = ConfigFile::load_from(path)?;

    if path.exists() {
        println!("# {}", path.display());
    } else {
        println!("# {} (not found, showing defaults)", path.display());
    }
    println!();
    println!("[cache]");
    println!("  name = {}", config.cache.name);
    println!();
    println!("[origin]");
    println!("  url = {}", config.origin.url);
    println!();
    println!("[seed]");
    if config.seed.assets.is_empty() {
        println!("  assets = (none)");
    }
    for asset in &config.seed.assets {
        println!("  {}", asset);
    }
    println!();
    println!("[network]");
    println!("  timeout_secs = {}", config.network.timeout_secs);

    Ok(())
}

fn run_init(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        println!("Configuration file already exists: {}", path.display());
        println!("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    ConfigFile::default().save_to(path)?;
    println!("Configuration file: {}", path.display());
    println!();
    println!("Edit this file to point cachegate at your origin and seed assets.");
    Ok(())
}
