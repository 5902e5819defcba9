//! # Configuration Management
//!
//! Two pieces of configuration drive a run:
//!
//! - [`BackupConfig`]: what to back up and where to write it, built by the CLI
//! - [`VaultConfig`]: how to reach Vault, resolved from the standard `VAULT_*`
//!   environment variables

pub mod vault;

use std::path::PathBuf;

pub use vault::VaultConfig;

/// Default destination of the backup document
pub const DEFAULT_BACKUP_FILE: &str = "vault_kv_backup.json";

/// Parameters of a single backup run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupConfig {
    /// KV v2 mount to back up (e.g. "secret")
    pub mount_path: String,

    /// Print one dot per secret instead of one line per secret
    pub quiet: bool,

    /// File the JSON document is written to
    pub output_file: PathBuf,
}

impl BackupConfig {
    /// Create a configuration with default progress mode and output file
    pub fn new(mount_path: impl Into<String>) -> Self {
        Self {
            mount_path: mount_path.into(),
            quiet: false,
            output_file: PathBuf::from(DEFAULT_BACKUP_FILE),
        }
    }

    /// Set quiet progress
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Set the output file
    pub fn with_output_file(mut self, output_file: impl Into<PathBuf>) -> Self {
        self.output_file = output_file.into();
        self
    }
}

/// Errors raised while building the Vault client configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be used
    #[error("invalid value for {variable}: {reason}")]
    InvalidValue { variable: &'static str, reason: String },

    /// A file named by the configuration could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client rejected the resolved settings
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid(variable: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue { variable, reason: reason.into() }
    }

    /// Create a file read error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
