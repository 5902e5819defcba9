//! # vault-kv-backup
//!
//! Backs up a HashiCorp Vault KV v2 secrets engine into a single JSON file.
//!
//! The mount is walked depth-first through its metadata listings. Every path
//! that has no listing is a secret, and the latest version of its data is
//! recorded under its path relative to the mount:
//!
//! ```text
//! {"secrets": {"app/db": {"user": "admin", "password": "..."}, "top": {...}}}
//! ```
//!
//! ## Layout
//!
//! ```text
//! cli -> config -> secrets::VaultClient -> backup::Walker -> BackupDocument -> file
//! ```
//!
//! - [`cli`]: argument parsing and the process exit code
//! - [`config`]: run settings and Vault client settings from `VAULT_*`
//! - [`secrets`]: the [`KvStore`] seam and its Vault HTTP implementation
//! - [`backup`]: the walker, the document and the file writer
//! - [`errors`]: the error taxonomy shared by all of the above
//!
//! ## Example
//!
//! ```rust,no_run
//! use vault_kv_backup::backup::{run_backup, Progress};
//! use vault_kv_backup::config::BackupConfig;
//! use vault_kv_backup::secrets::VaultClient;
//!
//! # async fn example() -> vault_kv_backup::Result<()> {
//! let client = VaultClient::from_env()?;
//! let config = BackupConfig::new("secret").with_quiet(true);
//! let summary = run_backup(&config, &client, &mut Progress::stdout(config.quiet)).await?;
//! println!("{} secrets written to {}", summary.secret_count, summary.output_file.display());
//! # Ok(())
//! # }
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod errors;
pub mod observability;
pub mod secrets;

pub use backup::{run_backup, BackupDocument, BackupSummary, SecretMap};
pub use config::{BackupConfig, VaultConfig};
pub use errors::{BackupError, Result};
pub use secrets::{KvStore, VaultClient};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
