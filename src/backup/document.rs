//! The backup document and its file output.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::walker::SecretMap;
use crate::errors::{BackupError, Result};

/// Top-level JSON written to the backup file: `{"secrets": {...}}`.
///
/// Secrets are keyed by their path relative to the mount and sorted, so two
/// runs over an unchanged mount produce identical bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupDocument {
    pub secrets: SecretMap,
}

impl BackupDocument {
    pub fn new(secrets: SecretMap) -> Self {
        Self { secrets }
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    /// Encode as compact JSON.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode a previously written document.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Create or truncate `path` and write `bytes` to it.
pub fn write_backup_file(bytes: &[u8], path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|e| BackupError::io(path, e))?;
    file.write_all(bytes).map_err(|e| BackupError::io(path, e))?;
    file.flush().map_err(|e| BackupError::io(path, e))?;
    Ok(())
}
