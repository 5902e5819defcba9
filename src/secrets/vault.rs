//! HashiCorp Vault HTTP client.
//!
//! Implements [`KvStore`] over Vault's logical HTTP API. The client is
//! thin: it knows how to LIST and read a logical path and how to
//! turn the HTTP answer into a [`StoreResponse`]. KV v2 conventions (the
//! `metadata/` and `data/` prefixes) are applied by the caller.
//!
//! # Response handling
//!
//! - 2xx with a JSON body: the parsed envelope
//! - 2xx with no body (204): `None`
//! - 404 with data or warnings in the body: the parsed envelope (this is how
//!   KV v2 answers a read of a soft-deleted version)
//! - 404 otherwise: `None`
//! - anything else: [`StoreError::Api`] with Vault's `errors` array
//!
//! # Security
//!
//! - The token is held in a [`SecretString`] and sent only as `X-Vault-Token`
//! - Neither the token nor response bodies of successful calls are logged

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;
use tracing::{debug, trace};
use url::Url;

use super::client::{KvStore, StoreResponse};
use super::error::{Result, StoreError};
use super::types::SecretString;
use crate::config::{ConfigError, VaultConfig};

/// Vault REST API client.
#[derive(Debug, Clone)]
pub struct VaultClient {
    http: reqwest::Client,
    address: Url,
    token: SecretString,
    namespace: Option<String>,
}

impl VaultClient {
    /// Build the user-agent string from crate version.
    fn user_agent() -> String {
        format!("vault-kv-backup/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Creates a client from resolved settings.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Io`] if the CA bundle cannot be read
    /// - [`ConfigError::HttpClient`] if the CA bundle is not PEM or the TLS
    ///   stack rejects the settings
    pub fn new(config: VaultConfig) -> std::result::Result<Self, ConfigError> {
        let mut builder =
            reqwest::Client::builder().user_agent(Self::user_agent()).timeout(config.timeout);

        if let Some(ref ca_cert) = config.ca_cert {
            let pem = std::fs::read(ca_cert).map_err(|e| ConfigError::io(ca_cert, e))?;
            let certificate =
                reqwest::Certificate::from_pem(&pem).map_err(ConfigError::HttpClient)?;
            builder = builder.add_root_certificate(certificate);
        }

        if config.skip_verify {
            tracing::warn!("TLS certificate verification is disabled (VAULT_SKIP_VERIFY)");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder.build().map_err(ConfigError::HttpClient)?;

        debug!(
            address = %config.address,
            namespace = ?config.namespace,
            authenticated = !config.token.is_empty(),
            "Created Vault client"
        );

        Ok(Self { http, address: config.address, token: config.token, namespace: config.namespace })
    }

    /// Creates a client from the process environment.
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        Self::new(VaultConfig::from_env()?)
    }

    /// The server address this client talks to.
    pub fn address(&self) -> &Url {
        &self.address
    }

    /// Build the API URL of a logical path.
    ///
    /// Each segment is percent-encoded; a path prefix on the address is kept.
    fn endpoint(&self, path: &str) -> Result<Url> {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Err(StoreError::invalid_path(path, "empty logical path"));
        }

        let mut url = self.address.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::invalid_path(path, "Vault address cannot be a base URL"))?
            .pop_if_empty()
            .extend(std::iter::once("v1").chain(trimmed.split('/')));
        Ok(url)
    }

    /// Attach authentication and namespace headers.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let mut request = request.header("Accept", "application/json");
        if !self.token.is_empty() {
            request = request.header("X-Vault-Token", self.token.expose_secret());
        }
        if let Some(ref namespace) = self.namespace {
            request = request.header("X-Vault-Namespace", namespace);
        }
        request
    }

    /// Send a request and interpret the answer.
    async fn execute(&self, path: &str, request: RequestBuilder) -> Result<Option<StoreResponse>> {
        let response = self.authorize(request).send().await.map_err(StoreError::Network)?;
        let status = response.status();
        let body = response.text().await.map_err(StoreError::Network)?;

        debug!(path = %path, status = status.as_u16(), "Vault responded");

        if status == StatusCode::NOT_FOUND {
            if body.trim().is_empty() {
                return Ok(None);
            }
            let parsed = parse_envelope(&body)?;
            return Ok(Some(parsed).filter(StoreResponse::has_content));
        }

        if !status.is_success() {
            trace!(path = %path, body = %body, "Vault error response");
            return Err(StoreError::api(status.as_u16(), parse_api_errors(&body)));
        }

        if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
            return Ok(None);
        }

        parse_envelope(&body).map(Some)
    }
}

#[async_trait]
impl KvStore for VaultClient {
    async fn list(&self, path: &str) -> Result<Option<StoreResponse>> {
        let url = self.endpoint(path)?;
        debug!(path = %path, "LIST");
        self.execute(path, self.http.get(url).query(&[("list", "true")])).await
    }

    async fn read(&self, path: &str) -> Result<Option<StoreResponse>> {
        let url = self.endpoint(path)?;
        debug!(path = %path, "GET");
        self.execute(path, self.http.get(url)).await
    }
}

fn parse_envelope(body: &str) -> Result<StoreResponse> {
    serde_json::from_str(body).map_err(|e| StoreError::malformed(e.to_string()))
}

/// Extract Vault's `errors` array, falling back to the raw body.
fn parse_api_errors(body: &str) -> Vec<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        errors: Vec<String>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.errors,
        Err(_) if body.trim().is_empty() => Vec::new(),
        Err(_) => vec![body.trim().to_string()],
    }
}
