/*!
 * Control API client for the host's JSON interface.
 *
 * The host exposes a JSON control API at `/json.htm`; plugin code reaches for
 * it for the few things the in-process primitives do not cover, such as user
 * variables. Calls are plain GETs with an optional Basic auth header; a reply
 * is only good when it is HTTP 200 and carries `"status": "OK"`. There is no
 * retry policy; callers fall back to defaults.
 */
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use homelink_core::config::ApiConfig;
use homelink_core::error::{Error, Result};
use homelink_host::params::PluginParameters;

/// Client for the host's JSON control API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    address: String,
    port: String,
    username: String,
    password: String,
}

impl ApiClient {
    /// Create a client from the host-supplied plugin parameters
    pub fn new(params: &PluginParameters) -> Result<Self> {
        Self::with_config(params, &ApiConfig::default())
    }

    /// Create a client with explicit API configuration
    pub fn with_config(params: &PluginParameters, config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            address: params.address.clone(),
            port: params.port.clone(),
            username: params.username.clone(),
            password: params.password.clone(),
        })
    }

    /// The URL a query string resolves to
    pub fn url_for(&self, query: &str) -> String {
        format!("http://{}:{}/json.htm?{}", self.address, self.port, query)
    }

    /// Issue a control API call
    ///
    /// # Arguments
    ///
    /// * `query` - The raw query string, e.g. `type=command&param=getversion`.
    ///   Values must already be percent-encoded.
    ///
    /// # Returns
    ///
    /// The parsed JSON body when the host reports `"status": "OK"`.
    pub async fn call(&self, query: &str) -> Result<serde_json::Value> {
        let url = self.url_for(query);
        debug!("Calling host API: {}", url);

        let mut request = self.client.get(&url);
        if !self.username.is_empty() {
            debug!("Adding authentication for user {}", self.username);
            request = request.basic_auth(&self.username, Some(&self.password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::http(format!("Error calling '{}': {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http(format!(
                "Host API: http error = {}",
                status.as_u16()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::http(format!("Invalid JSON from '{}': {}", url, e)))?;

        match body.get("status").and_then(|s| s.as_str()) {
            Some("OK") => Ok(body),
            Some(other) => Err(Error::api(format!(
                "Host API returned an error: status = {}",
                other
            ))),
            None => Err(Error::api("Host API response has no status field")),
        }
    }

    /// Fetch the host's version information
    pub async fn version(&self) -> Result<HostVersion> {
        let body = self.call("type=command&param=getversion").await?;
        let version: HostVersion = serde_json::from_value(body)?;
        Ok(version)
    }
}

/// Version information reported by the host
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostVersion {
    /// The host's own version string
    #[serde(default)]
    pub version: String,
    /// The version of the host's scripting API
    ///
    /// Gates the user-variable creation command; the host renamed it in
    /// scripting API 2.4.9.
    #[serde(rename = "dzvents_version", default)]
    pub script_api_version: String,
}
