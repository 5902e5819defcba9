//! Shared fixtures for integration tests.
//!
//! [`FakeVault`] serves a KV v2 mount over wiremock: folder listings answer
//! `GET /v1/<mount>/metadata/<folder>?list=true` and secrets answer
//! `GET /v1/<mount>/data/<path>`. Anything not mounted gets wiremock's empty
//! 404, which is exactly how Vault reports a path with no children.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "root-token";

pub struct FakeVault {
    pub server: MockServer,
}

impl FakeVault {
    pub async fn start() -> Self {
        Self { server: MockServer::start().await }
    }

    /// Start a server holding `secrets` in the KV v2 mount `mount`.
    pub async fn with_secrets(mount: &str, secrets: &[(&str, Value)]) -> Self {
        let vault = Self::start().await;
        let mut folders: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for (secret_path, data) in secrets {
            let segments: Vec<&str> = secret_path.split('/').collect();
            for depth in 0..segments.len() {
                let key = if depth + 1 == segments.len() {
                    segments[depth].to_string()
                } else {
                    format!("{}/", segments[depth])
                };
                folders.entry(segments[..depth].join("/")).or_default().insert(key);
            }

            vault
                .mount_read(&format!("{mount}/data/{secret_path}"), 200, version(data.clone()))
                .await;
        }

        for (folder, keys) in folders {
            let logical = if folder.is_empty() {
                format!("{mount}/metadata")
            } else {
                format!("{mount}/metadata/{folder}")
            };
            vault.mount_listing(&logical, 200, json!({ "data": { "keys": keys } })).await;
        }

        vault
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Answer `LIST <logical>` with the given status and body.
    pub async fn mount_listing(&self, logical: &str, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/v1/{logical}")))
            .and(query_param("list", "true"))
            .and(header("X-Vault-Token", TOKEN))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer a read of `<logical>` with the given status and body.
    pub async fn mount_read(&self, logical: &str, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/v1/{logical}")))
            .and(header("X-Vault-Token", TOKEN))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Number of requests the server has seen.
    pub async fn request_count(&self) -> usize {
        self.server.received_requests().await.map_or(0, |requests| requests.len())
    }
}

/// KV v2 read envelope around a version's data.
pub fn version(data: Value) -> Value {
    json!({
        "request_id": "00000000-0000-0000-0000-000000000000",
        "data": {
            "data": data,
            "metadata": { "version": 1, "deletion_time": "", "destroyed": false }
        },
        "warnings": null
    })
}

/// Vault error body.
pub fn errors(messages: &[&str]) -> Value {
    json!({ "errors": messages })
}
