//! Host intelligence lookups against the Shodan host API.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use std::time::Duration;

use recon_common::config::SHODAN_API_KEY_ENV;
use recon_common::error::ConfigError;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tokio::net::lookup_host;
use tracing::debug;

use crate::probe::http;

pub const SHODAN_API: &str = "https://api.shodan.io";
const INTEL_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum IntelError {
    #[error("could not resolve {host}: {reason}")]
    Resolve { host: String, reason: String },

    #[error("no IPv4 address found for {0}")]
    NoIpv4(String),

    #[error("request to host intelligence API failed")]
    Request(#[from] reqwest::Error),

    #[error("host intelligence API answered {0}")]
    Status(StatusCode),

    #[error("failed to parse host intelligence response")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HostIntel {
    #[serde(default)]
    pub ip_str: String,
    #[serde(default)]
    pub ports: Vec<u16>,
    #[serde(default)]
    vulns: Option<Vulns>,
    #[serde(default)]
    pub isp: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub hostnames: Vec<String>,
}

/// The API sends either a bare id list or an id -> details object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum Vulns {
    Ids(Vec<String>),
    Described(BTreeMap<String, Value>),
}

impl HostIntel {
    /// `(id, description)` pairs, ordered by id. The description is empty when
    /// the API only listed the id.
    pub fn vulnerabilities(&self) -> Vec<(String, String)> {
        let mut vulns: Vec<(String, String)> = match &self.vulns {
            None => Vec::new(),
            Some(Vulns::Ids(ids)) => ids.iter().map(|id| (id.clone(), String::new())).collect(),
            Some(Vulns::Described(map)) => map
                .iter()
                .map(|(id, value)| (id.clone(), describe(value)))
                .collect(),
        };
        vulns.sort();
        vulns
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(obj) => obj
            .get("summary")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

pub fn api_key_from_env() -> Result<String, ConfigError> {
    std::env::var(SHODAN_API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or(ConfigError::MissingCredential(SHODAN_API_KEY_ENV))
}

pub async fn resolve_ipv4(host: &str) -> Result<Ipv4Addr, IntelError> {
    let addrs = lookup_host((host, 0))
        .await
        .map_err(|e| IntelError::Resolve {
            host: host.to_string(),
            reason: e.to_string(),
        })?;

    addrs
        .filter_map(|addr| match addr.ip() {
            std::net::IpAddr::V4(v4) => Some(v4),
            std::net::IpAddr::V6(_) => None,
        })
        .next()
        .ok_or_else(|| IntelError::NoIpv4(host.to_string()))
}

#[derive(Debug, Clone)]
pub struct IntelClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl IntelClient {
    pub fn new(api_key: String) -> Result<Self, IntelError> {
        Ok(Self::with_client(http::client(INTEL_TIMEOUT)?, SHODAN_API, api_key))
    }

    pub fn with_client(client: Client, base_url: &str, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub async fn fetch(&self, ip: Ipv4Addr) -> Result<HostIntel, IntelError> {
        let url = format!("{}/shodan/host/{ip}", self.base_url);
        debug!(ip = %ip, "querying host intelligence");

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(IntelError::Status(response.status()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Resolves `host` and fetches the intelligence for its first IPv4 address.
    pub async fn lookup(&self, host: &str) -> Result<HostIntel, IntelError> {
        let ip = resolve_ipv4(host).await?;
        self.fetch(ip).await
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
