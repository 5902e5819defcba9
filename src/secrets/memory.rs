//! In-memory [`KvStore`] for tests.
//!
//! Serves canned Vault envelopes keyed by logical path and records every
//! call so tests can assert on the exact request sequence.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use super::client::{KvStore, StoreResponse};
use super::error::{Result, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    listings: HashMap<String, StoreResponse>,
    reads: HashMap<String, StoreResponse>,
    failures: HashMap<String, u16>,
    queued_reads: Mutex<HashMap<String, VecDeque<StoreResponse>>>,
    calls: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the listings and reads a KV v2 mount holding `secrets` would serve.
    pub fn kv2(mount: &str, secrets: &[(&str, Value)]) -> Self {
        let mut folders: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut store = Self::new();

        for (path, data) in secrets {
            let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
            for depth in 0..segments.len() {
                let folder = segments[..depth].join("/");
                let is_leaf = depth + 1 == segments.len();
                let key = if is_leaf {
                    segments[depth].to_string()
                } else {
                    format!("{}/", segments[depth])
                };
                folders.entry(folder).or_default().insert(key);
            }

            let version = json!({ "data": data, "metadata": { "version": 1 } });
            store = store.with_read(&logical(mount, "data", path), envelope(version));
        }

        for (folder, keys) in folders {
            let listing = json!({ "keys": keys.into_iter().collect::<Vec<_>>() });
            store = store.with_listing(&logical(mount, "metadata", &folder), envelope(listing));
        }

        store
    }

    pub fn with_listing(mut self, path: &str, response: StoreResponse) -> Self {
        self.listings.insert(path.to_string(), response);
        self
    }

    pub fn with_read(mut self, path: &str, response: StoreResponse) -> Self {
        self.reads.insert(path.to_string(), response);
        self
    }

    /// Serve `responses` to successive reads of `path`, then fall back to
    /// [`with_read`](Self::with_read).
    pub fn with_read_sequence(mut self, path: &str, responses: Vec<StoreResponse>) -> Self {
        if let Ok(queued) = self.queued_reads.get_mut() {
            queued.insert(path.to_string(), responses.into());
        }
        self
    }

    /// Make any call on `path` fail with the given HTTP status.
    pub fn with_failure(mut self, path: &str, status: u16) -> Self {
        self.failures.insert(path.to_string(), status);
        self
    }

    /// Calls made so far, as `LIST <path>` / `READ <path>`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, verb: &str, path: &str) -> Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(format!("{verb} {path}"));
        }
        match self.failures.get(path) {
            Some(status) => Err(StoreError::api(*status, vec!["injected failure".to_string()])),
            None => Ok(()),
        }
    }
}

/// Wrap a JSON object as a response envelope.
pub fn envelope(data: Value) -> StoreResponse {
    match data {
        Value::Object(map) => StoreResponse::with_data(map),
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            StoreResponse::with_data(map)
        }
    }
}

fn logical(mount: &str, kind: &str, path: &str) -> String {
    crate::backup::path::join(&[mount, kind, path])
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn list(&self, path: &str) -> Result<Option<StoreResponse>> {
        self.record("LIST", path)?;
        Ok(self.listings.get(path).cloned())
    }

    async fn read(&self, path: &str) -> Result<Option<StoreResponse>> {
        self.record("READ", path)?;
        let mut queued = None;
        if let Ok(mut reads) = self.queued_reads.lock() {
            queued = reads.get_mut(path).and_then(VecDeque::pop_front);
        }
        Ok(queued.or_else(|| self.reads.get(path).cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_kv2_builds_folder_listings() {
        let store = MemoryStore::kv2(
            "secret",
            &[("app/db", json!({ "user": "a" })), ("app/api", json!({})), ("top", json!({}))],
        );

        let root = store.list("secret/metadata").await.unwrap().unwrap();
        assert_eq!(root.data.unwrap()["keys"], json!(["app/", "top"]));

        let app = store.list("secret/metadata/app").await.unwrap().unwrap();
        assert_eq!(app.data.unwrap()["keys"], json!(["api", "db"]));

        assert!(store.list("secret/metadata/app/db").await.unwrap().is_none());

        let db = store.read("secret/data/app/db").await.unwrap().unwrap();
        assert_eq!(db.data.unwrap()["data"], json!({ "user": "a" }));
    }

    #[tokio::test]
    async fn test_failures_and_call_log() {
        let store = MemoryStore::new().with_failure("secret/metadata", 503);

        let err = store.list("secret/metadata").await.unwrap_err();
        assert_eq!(err.status(), Some(503));
        assert_eq!(store.calls(), vec!["LIST secret/metadata".to_string()]);
    }
}
