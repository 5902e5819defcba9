//! # Backup Pipeline
//!
//! Walks a KV v2 mount, collects the latest version of every secret and
//! writes them as one JSON document:
//!
//! ```text
//! list/read via KvStore -> SecretMap -> BackupDocument -> file
//! ```
//!
//! The file is only created once the whole walk has succeeded. A failed run
//! leaves no file behind and never overwrites an existing backup.

pub mod document;
pub mod path;
pub mod progress;
pub mod walker;

use std::io::Write;
use std::path::PathBuf;

use tracing::info;

pub use document::{write_backup_file, BackupDocument};
pub use progress::{Progress, ProgressMode};
pub use walker::{SecretMap, SecretRecord, Walker};

use crate::config::BackupConfig;
use crate::errors::Result;
use crate::secrets::KvStore;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupSummary {
    pub secret_count: usize,
    pub bytes_written: usize,
    pub output_file: PathBuf,
}

/// Back up every secret under `config.mount_path` into `config.output_file`.
pub async fn run_backup<S, W>(
    config: &BackupConfig,
    store: &S,
    progress: &mut Progress<W>,
) -> Result<BackupSummary>
where
    S: KvStore + ?Sized,
    W: Write + Send,
{
    info!(mount = %config.mount_path, "Starting backup");

    let secrets = Walker::new(store, &config.mount_path, progress).walk_all().await?;
    let document = BackupDocument::new(secrets);
    let bytes = document.to_json()?;

    write_backup_file(&bytes, &config.output_file)?;

    info!(
        secrets = document.len(),
        bytes = bytes.len(),
        file = %config.output_file.display(),
        "Backup written"
    );

    Ok(BackupSummary {
        secret_count: document.len(),
        bytes_written: bytes.len(),
        output_file: config.output_file.clone(),
    })
}
