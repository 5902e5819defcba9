//! Access to the secrets store being backed up.
//!
//! The backup walker only needs two calls from a KV v2 mount, a metadata
//! listing and a latest-version read, both captured by [`KvStore`].
//! [`VaultClient`] implements it over the Vault HTTP API.
//!
//! Both calls return `Ok(None)` when Vault reports the path as absent. The
//! walker treats an absent listing as "this path is a secret".

pub mod client;
pub mod error;
#[cfg(test)]
pub mod memory;
pub mod types;
pub mod vault;

pub use client::{KvStore, StoreResponse};
pub use error::{Result, StoreError};
pub use types::SecretString;
pub use vault::VaultClient;
