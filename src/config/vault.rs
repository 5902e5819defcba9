//! Vault client settings resolved from the environment.
//!
//! The variables and their defaults follow the official Vault client
//! libraries, so a shell that works with the `vault` CLI works here:
//!
//! - `VAULT_ADDR`: server address (default `https://127.0.0.1:8200`)
//! - `VAULT_TOKEN`: token, falling back to the `~/.vault-token` helper file
//! - `VAULT_NAMESPACE`: Enterprise namespace
//! - `VAULT_CACERT`: PEM file of additional trusted CA certificates
//! - `VAULT_SKIP_VERIFY`: disable TLS certificate verification
//! - `VAULT_CLIENT_TIMEOUT`: request timeout (`60`, `60s`, `1m30s`, `1.5s`)

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use super::ConfigError;
use crate::secrets::SecretString;

pub const VAULT_ADDR: &str = "VAULT_ADDR";
pub const VAULT_TOKEN: &str = "VAULT_TOKEN";
pub const VAULT_NAMESPACE: &str = "VAULT_NAMESPACE";
pub const VAULT_CACERT: &str = "VAULT_CACERT";
pub const VAULT_SKIP_VERIFY: &str = "VAULT_SKIP_VERIFY";
pub const VAULT_CLIENT_TIMEOUT: &str = "VAULT_CLIENT_TIMEOUT";

/// Default Vault API address.
pub const DEFAULT_ADDRESS: &str = "https://127.0.0.1:8200";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Name of the token helper file in the user's home directory.
const TOKEN_HELPER_FILE: &str = ".vault-token";

/// Settings for reaching a Vault server.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Vault server address (e.g., "https://vault.example.com:8200")
    pub address: Url,

    /// Authentication token; may be empty, in which case requests are unauthenticated
    pub token: SecretString,

    /// Vault namespace (for Enterprise multi-tenancy)
    pub namespace: Option<String>,

    /// Additional CA bundle to trust
    pub ca_cert: Option<PathBuf>,

    /// Accept any server certificate
    pub skip_verify: bool,

    /// Per-request timeout
    pub timeout: Duration,
}

impl VaultConfig {
    /// Resolve the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let address = parse_address(get(VAULT_ADDR).as_deref().unwrap_or(DEFAULT_ADDRESS))?;

        let token = match get(VAULT_TOKEN) {
            Some(token) => SecretString::new(token),
            None => read_token_helper(get("HOME").map(PathBuf::from))?,
        };

        let skip_verify = match get(VAULT_SKIP_VERIFY) {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                ConfigError::invalid(VAULT_SKIP_VERIFY, format!("expected a boolean, got {raw:?}"))
            })?,
            None => false,
        };

        let timeout = match get(VAULT_CLIENT_TIMEOUT) {
            Some(raw) => parse_timeout(&raw).ok_or_else(|| {
                ConfigError::invalid(
                    VAULT_CLIENT_TIMEOUT,
                    format!("expected seconds or a duration like 30s or 1m30s, got {raw:?}"),
                )
            })?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            address,
            token,
            namespace: get(VAULT_NAMESPACE),
            ca_cert: get(VAULT_CACERT).map(PathBuf::from),
            skip_verify,
            timeout,
        })
    }
}

fn parse_address(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::invalid(VAULT_ADDR, e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::invalid(
            VAULT_ADDR,
            format!("unsupported scheme {other:?}, expected http or https"),
        )),
    }
}

/// Read `~/.vault-token`, treating a missing file as "no token".
fn read_token_helper(home: Option<PathBuf>) -> Result<SecretString, ConfigError> {
    let Some(home) = home else {
        return Ok(SecretString::default());
    };

    let path = home.join(TOKEN_HELPER_FILE);
    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(SecretString::new(contents.trim())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SecretString::default()),
        Err(e) => Err(ConfigError::io(path, e)),
    }
}

/// Boolean spellings accepted by the Vault CLI.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Parse a bare number of seconds or a duration such as `30s`, `1m30s` or `1.5s`.
fn parse_timeout(raw: &str) -> Option<Duration> {
    if let Ok(secs) = raw.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }

    humantime::parse_duration(raw).ok().or_else(|| fractional_duration(raw))
}

/// A single decimal amount followed by a unit, e.g. `1.5s` or `0.25h`.
fn fractional_duration(raw: &str) -> Option<Duration> {
    let split = raw.find(|c: char| !(c.is_ascii_digit() || c == '.'))?;
    let (amount, unit) = raw.split_at(split);
    let amount: f64 = amount.parse().ok()?;
    let unit = humantime::parse_duration(&format!("1{unit}")).ok()?;
    Duration::try_from_secs_f64(unit.as_secs_f64() * amount).ok()
}
