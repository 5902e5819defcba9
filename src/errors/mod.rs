//! # Error Handling
//!
//! Every failure in the backup pipeline is terminal. Errors are propagated up
//! through the walker as [`BackupError`] and the CLI driver is the single place
//! that reports them and picks the exit code.

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::secrets::StoreError;

/// Result type for backup operations
pub type Result<T> = std::result::Result<T, BackupError>;

/// Errors that abort a backup run
#[derive(thiserror::Error, Debug)]
pub enum BackupError {
    /// The Vault client could not be built from the environment
    #[error("Error creating vault client: {0}")]
    ClientConstruction(#[from] ConfigError),

    /// A listing or read call failed at some path
    #[error("error occurred while {operation} at path `{path}`: {source}")]
    Traversal {
        operation: Operation,
        path: String,
        #[source]
        source: StoreError,
    },

    /// The store answered, but not in the shape a KV v2 mount must have
    #[error("invalid response at path `{path}`: {reason}")]
    InvalidStoreResponse { path: String, reason: String },

    /// The backup document could not be encoded
    #[error("error converting vault kv backup to json: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backup file could not be written
    #[error("error writing vault kv backup to json file `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Store call that was in flight when a traversal error happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListMetadata,
    ReadLatestVersion,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::ListMetadata => write!(f, "listing metadata"),
            Operation::ReadLatestVersion => write!(f, "getting latest version of the secret"),
        }
    }
}

impl BackupError {
    /// Create a traversal error for a failed store call
    pub fn traversal(operation: Operation, path: impl Into<String>, source: StoreError) -> Self {
        Self::Traversal { operation, path: path.into(), source }
    }

    /// Create an invalid store response error
    pub fn invalid_response(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidStoreResponse { path: path.into(), reason: reason.into() }
    }

    /// Create an I/O error for the given destination
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Process exit code the CLI reports for this error
    pub fn exit_code(&self) -> u8 {
        1
    }
}
