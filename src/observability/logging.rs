//! Structured logging setup.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{BackupConfig, VaultConfig};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Install the global subscriber writing to stderr.
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        // Already installed (e.g. by a test harness).
    }
}

/// Log the resolved run settings. The token is never included.
pub fn log_config_info(backup: &BackupConfig, vault: &VaultConfig) {
    tracing::info!(
        mount = %backup.mount_path,
        output_file = %backup.output_file.display(),
        quiet = backup.quiet,
        vault_address = %vault.address,
        namespace = vault.namespace.as_deref().unwrap_or(""),
        token_set = !vault.token.is_empty(),
        skip_verify = vault.skip_verify,
        timeout_secs = vault.timeout.as_secs(),
        "vault-kv-backup configuration"
    );
}
