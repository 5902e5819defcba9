//! Depth-first walk of a KV v2 mount.
//!
//! For every sub-path the walker lists `<mount>/metadata/<sub-path>`:
//!
//! - no listing: the sub-path is a secret; its latest version is read from
//!   `<mount>/data/<sub-path>` and returned as a single entry
//! - a listing: every name in its `keys` field is walked in turn and the
//!   results are merged
//!
//! Calls are issued strictly one after another. The first failure aborts the
//! walk and is returned unchanged to the caller; nothing is retried and no
//! partial result escapes.

use std::collections::BTreeMap;
use std::io::Write;

use futures::future::BoxFuture;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::path;
use super::progress::Progress;
use crate::errors::{BackupError, Operation, Result};
use crate::secrets::{KvStore, StoreResponse};

/// Field/value payload of the latest version of one secret.
pub type SecretRecord = Map<String, Value>;

/// Secrets keyed by their path relative to the mount.
///
/// `None` marks a secret whose latest version has been deleted or destroyed.
pub type SecretMap = BTreeMap<String, Option<SecretRecord>>;

/// Walks a KV v2 mount and collects the latest version of every secret.
pub struct Walker<'a, S: ?Sized, W> {
    store: &'a S,
    mount_path: &'a str,
    progress: &'a mut Progress<W>,
}

impl<'a, S, W> Walker<'a, S, W>
where
    S: KvStore + ?Sized,
    W: Write + Send,
{
    pub fn new(store: &'a S, mount_path: &'a str, progress: &'a mut Progress<W>) -> Self {
        Self { store, mount_path, progress }
    }

    /// Collect every secret under the mount root.
    pub async fn walk_all(&mut self) -> Result<SecretMap> {
        self.walk(String::new()).await
    }

    /// Collect every secret at or below `sub_path`.
    pub fn walk(&mut self, sub_path: String) -> BoxFuture<'_, Result<SecretMap>> {
        Box::pin(async move {
            let list_path = path::join(&[self.mount_path, "metadata", &sub_path]);

            let listing = self
                .store
                .list(&list_path)
                .await
                .map_err(|e| BackupError::traversal(Operation::ListMetadata, &list_path, e))?;

            let Some(listing) = listing else {
                self.progress.leaf(&sub_path);
                let record = Self::read_latest(self.store, self.mount_path, &sub_path).await?;
                return Ok(SecretMap::from([(sub_path, record)]));
            };

            let children = child_segments(&list_path, listing)?;
            debug!(path = %list_path, children = children.len(), "Listed folder");

            let mut combined = SecretMap::new();
            for child in children {
                let child_path = path::join(&[&sub_path, &child]);
                let secrets = self.walk(child_path).await?;
                combined.extend(secrets);
            }

            Ok(combined)
        })
    }

    /// Read the latest version of the secret at `sub_path`.
    async fn read_latest(
        store: &S,
        mount_path: &str,
        sub_path: &str,
    ) -> Result<Option<SecretRecord>> {
        let read_path = path::join(&[mount_path, "data", sub_path]);

        let response = store
            .read(&read_path)
            .await
            .map_err(|e| BackupError::traversal(Operation::ReadLatestVersion, &read_path, e))?
            .ok_or_else(|| BackupError::invalid_response(&read_path, "no secret found"))?;

        version_data(&read_path, response)
    }
}

/// Validate a listing and return its child names.
fn child_segments(list_path: &str, listing: StoreResponse) -> Result<Vec<String>> {
    let mut data = listing
        .data
        .ok_or_else(|| BackupError::invalid_response(list_path, "listing returned no data"))?;

    let keys = data
        .remove("keys")
        .ok_or_else(|| BackupError::invalid_response(list_path, "listing has no `keys` field"))?;

    let Value::Array(keys) = keys else {
        return Err(BackupError::invalid_response(
            list_path,
            format!("`keys` must be a list of strings, got {}", json_kind(&keys)),
        ));
    };

    keys.into_iter()
        .enumerate()
        .map(|(index, key)| match key {
            Value::String(name) => Ok(name),
            other => Err(BackupError::invalid_response(
                list_path,
                format!("`keys[{index}]` must be a string, got {}", json_kind(&other)),
            )),
        })
        .collect()
}

/// Unwrap the `data` object of a KV v2 version envelope.
///
/// A response without any payload (for example a 404 that only carries
/// warnings) is a version without data, like an explicit `data: null`.
fn version_data(read_path: &str, response: StoreResponse) -> Result<Option<SecretRecord>> {
    let Some(mut version) = response.data else {
        warn!(path = %read_path, warnings = ?response.warnings, "Latest version returned no payload");
        return Ok(None);
    };

    match version.remove("data") {
        Some(Value::Object(record)) => Ok(Some(record)),
        Some(Value::Null) => {
            warn!(path = %read_path, "Latest version has no data (deleted or destroyed)");
            Ok(None)
        }
        Some(other) => Err(BackupError::invalid_response(
            read_path,
            format!("unexpected type for `data` element: {}", json_kind(&other)),
        )),
        None => Err(BackupError::invalid_response(read_path, "missing expected `data` element")),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
