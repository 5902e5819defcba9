//! Core secret store trait and response envelope.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::Result;

/// The generic envelope Vault wraps every logical response in.
///
/// Only the fields the backup needs are kept. `data` holds the listing
/// (`{"keys": [...]}`) for a LIST call, or the KV v2 version
/// (`{"data": {...}, "metadata": {...}}`) for a read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreResponse {
    /// Response payload
    #[serde(default)]
    pub data: Option<Map<String, Value>>,

    /// Warnings Vault attached to the response
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
}

impl StoreResponse {
    /// Create a response carrying the given payload.
    pub fn with_data(data: Map<String, Value>) -> Self {
        Self { data: Some(data), warnings: None }
    }

    /// True when the response carries a non-empty payload or any warning.
    ///
    /// A 404 that still carries content is how Vault reports a soft-deleted
    /// KV v2 version, so such a response counts as present.
    pub fn has_content(&self) -> bool {
        self.data.as_ref().is_some_and(|d| !d.is_empty())
            || self.warnings.as_ref().is_some_and(|w| !w.is_empty())
    }
}

/// Read-only access to a Vault-style logical path space.
///
/// Paths are full logical paths relative to the API root (for example
/// `secret/metadata/app`), never URLs. `Ok(None)` means the store has
/// nothing at that path.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use vault_kv_backup::secrets::{KvStore, Result, StoreResponse};
/// use async_trait::async_trait;
///
/// struct EmptyStore;
///
/// #[async_trait]
/// impl KvStore for EmptyStore {
///     async fn list(&self, _path: &str) -> Result<Option<StoreResponse>> {
///         Ok(None)
///     }
///
///     async fn read(&self, _path: &str) -> Result<Option<StoreResponse>> {
///         Ok(None)
///     }
/// }
/// ```
#[async_trait]
pub trait KvStore: Send + Sync {
    /// List the immediate children beneath a path.
    async fn list(&self, path: &str) -> Result<Option<StoreResponse>>;

    /// Read the value stored at a path.
    async fn read(&self, path: &str) -> Result<Option<StoreResponse>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_list_response() {
        let body = json!({
            "request_id": "1f3c",
            "lease_duration": 0,
            "data": { "keys": ["app/", "db"] },
            "warnings": null
        });

        let response: StoreResponse = serde_json::from_value(body).unwrap();
        let keys = response.data.as_ref().and_then(|d| d.get("keys")).unwrap();
        assert_eq!(keys, &json!(["app/", "db"]));
        assert!(response.warnings.is_none());
        assert!(response.has_content());
    }

    #[test]
    fn test_empty_response_has_no_content() {
        let response: StoreResponse = serde_json::from_value(json!({ "errors": [] })).unwrap();
        assert!(!response.has_content());

        let response = StoreResponse::with_data(Map::new());
        assert!(!response.has_content());
    }

    #[test]
    fn test_warnings_count_as_content() {
        let response = StoreResponse { data: None, warnings: Some(vec!["deleted".to_string()]) };
        assert!(response.has_content());
    }
}
