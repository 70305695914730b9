//! cachegate CLI - Command-line interface
//!
//! Drives the cachegate library against a live origin: seeds a cache
//! generation, arbitrates requests through it, and manages the config file.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::config::ConfigCommands;
use error::CliError;

#[derive(Parser)]
#[command(name = "cachegate")]
#[command(version, about = "Offline-first resource cache arbiter", long_about = None)]
struct Cli {
    /// Config file to use (default: ~/.cachegate/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install and activate a worker generation, seeding its cache
    Install,

    /// Install, activate, then arbitrate each path through the cache
    Fetch {
        /// Origin-relative paths to request (e.g., / or /static/icon-72.png)
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// View or initialize the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli
        .config
        .unwrap_or_else(cachegate::config::config_file_path);

    match cli.command {
        Commands::Install => {
            let _guard = commands::common::init_logging()?;
            let config = commands::common::load_config(&config_path)?;
            commands::install::run(&config)
        }
        Commands::Fetch { paths } => {
            let _guard = commands::common::init_logging()?;
            let config = commands::common::load_config(&config_path)?;
            commands::fetch::run(&config, &paths)
        }
        Commands::Config { command } => commands::config::run(command, &config_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fetch_requires_paths() {
        assert!(Cli::try_parse_from(["cachegate", "fetch"]).is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::try_parse_from(["cachegate", "fetch", "/", "--config", "/tmp/c.ini"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.ini")));
        match cli.command {
            Commands::Fetch { paths } => assert_eq!(paths, vec!["/"]),
            _ => panic!("expected fetch"),
        }
    }
}
