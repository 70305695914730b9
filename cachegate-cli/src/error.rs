//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use cachegate::arbiter::ArbiterError;
use cachegate::config::ConfigFileError;
use cachegate::network::FetchError;
use cachegate::worker::WorkerError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Configuration file could not be read or written
    ConfigFile(ConfigFileError),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// Failed to create the HTTP client
    HttpClient(FetchError),
    /// A worker event failed
    Worker(WorkerError),
    /// A requested path could not be resolved against the origin
    InvalidPath { path: String, reason: String },
    /// Some requests could be answered neither from cache nor network
    Unanswered { failed: usize, total: usize },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Worker(WorkerError::Install(ArbiterError::Seed { .. }))
            | CliError::Worker(WorkerError::Install(ArbiterError::Network(_))) => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. The origin server is not running (check [origin] url)");
                eprintln!("  2. A path in [seed] assets does not exist on the server");
            }
            CliError::ConfigFile(ConfigFileError::InvalidValue { .. }) => {
                eprintln!();
                eprintln!("Run 'cachegate config init --force' to restore the defaults.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::HttpClient(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Worker(e) => write!(f, "{}", e),
            CliError::InvalidPath { path, reason } => {
                write!(f, "Invalid request path '{}': {}", path, reason)
            }
            CliError::Unanswered { failed, total } => {
                write!(f, "{} of {} requests could not be answered", failed, total)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::HttpClient(e) => Some(e),
            CliError::Worker(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<WorkerError> for CliError {
    fn from(e: WorkerError) -> Self {
        CliError::Worker(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unanswered_message() {
        let err = CliError::Unanswered {
            failed: 2,
            total: 5,
        };
        assert_eq!(err.to_string(), "2 of 5 requests could not be answered");
    }

    #[test]
    fn test_invalid_path_message() {
        let err = CliError::InvalidPath {
            path: "http://[".to_string(),
            reason: "invalid IPv6 address".to_string(),
        };
        assert!(err.to_string().contains("http://["));
    }
}
