//! # HTTP Probe Gateway
//!
//! Talks to the daemon's JSON API:
//!
//! - `GET /v1/version` → `{"version": "...", "revision": "...", "uuid": "..."}`
//! - `GET /v1/plugins` → `{"plugins": [{"id": "...", "type": "...", "init_err": null}]}`
//!
//! Host facts describe the machine the CLI runs on, so they are read locally.

use ctrctl_core::{HostFacts, PluginRecord, VersionInfo};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

use super::{ProbeError, ProbeGateway};
use crate::host;

/// Body of `GET /v1/plugins`.
#[derive(Debug, Deserialize)]
struct PluginsResponse {
    plugins: Vec<PluginRecord>,
}

/// Gateway backed by the daemon's HTTP API.
#[derive(Clone)]
pub struct HttpProbe {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    host_root: PathBuf,
    rootless_state_dir: Option<String>,
}

impl HttpProbe {
    /// Create a new probe pointing at the given daemon URL.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            host_root: PathBuf::from("/"),
            rootless_state_dir: std::env::var(host::ROOTLESS_STATE_DIR_ENV).ok(),
        }
    }

    /// Read host facts below `root` instead of `/`.
    #[must_use]
    pub fn with_host_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.host_root = root.into();
        self
    }

    /// Override rootless detection.
    #[must_use]
    pub fn with_rootless_state_dir(mut self, dir: Option<String>) -> Self {
        self.rootless_state_dir = dir;
        self
    }

    /// The daemon URL this probe talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a GET request with optional Bearer auth.
    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.get(&url);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }
        req
    }

    /// Send a GET and decode the JSON body.
    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProbeError> {
        tracing::debug!(url = %self.base_url, path, "probing daemon");

        let resp = self
            .get(path)
            .send()
            .await
            .map_err(|e| ProbeError::ConnectionFailed(format!("{}: {e}", self.base_url)))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProbeError::Unauthorized);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProbeError::ServerError(status.as_u16(), body));
        }

        resp.json::<T>()
            .await
            .map_err(|e| ProbeError::ParseError(e.to_string()))
    }
}

impl ProbeGateway for HttpProbe {
    async fn version(&self) -> Result<VersionInfo, ProbeError> {
        self.fetch("/v1/version").await
    }

    async fn plugins(&self) -> Result<Vec<PluginRecord>, ProbeError> {
        let body: PluginsResponse = self.fetch("/v1/plugins").await?;
        Ok(body.plugins)
    }

    async fn host_facts(&self) -> Result<HostFacts, ProbeError> {
        Ok(host::detect(&self.host_root, self.rootless_state_dir.as_deref()).await)
    }
}
