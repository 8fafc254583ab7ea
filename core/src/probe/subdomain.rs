use std::time::Duration;

use async_trait::async_trait;
use recon_common::config::SUBDOMAIN_TIMEOUT;
use recon_common::outcome::ProbeOutcome;
use recon_common::target::Target;
use reqwest::Client;

use super::{Probe, http};

/// GETs `{scheme}://{label}.{domain}` where the domain is the target's authority.
#[derive(Debug, Clone)]
pub struct SubdomainProbe {
    client: Client,
    scheme: &'static str,
}

impl SubdomainProbe {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(http::client(timeout)?, "https"))
    }

    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(SUBDOMAIN_TIMEOUT)
    }

    pub fn with_client(client: Client, scheme: &'static str) -> Self {
        Self { client, scheme }
    }

    pub fn url_for(&self, target: &Target, label: &str) -> String {
        format!("{}://{}.{}", self.scheme, label, target.authority())
    }
}

#[async_trait]
impl Probe for SubdomainProbe {
    type Candidate = String;

    async fn probe(&self, target: &Target, label: &String) -> ProbeOutcome {
        http::get(&self.client, &self.url_for(target, label)).await
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
