//! User configuration loaded from `~/.cachegate/config.ini`.
//!
//! # Example
//!
//! ```no_run
//! use cachegate::config::ConfigFile;
//!
//! let config = ConfigFile::load()?;
//! let arbiter_config = config.to_arbiter_config();
//! # Ok::<(), cachegate::config::ConfigFileError>(())
//! ```

mod file;
mod parser;
mod settings;
mod writer;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{CacheSettings, ConfigFile, NetworkSettings, OriginSettings, SeedSettings};
