use std::time::Duration;

use async_trait::async_trait;
use recon_common::config::DIRECTORY_TIMEOUT;
use recon_common::outcome::ProbeOutcome;
use recon_common::target::Target;
use reqwest::Client;

use super::{Probe, http};

/// GETs `{target}/{segment}`.
#[derive(Debug, Clone)]
pub struct DirectoryProbe {
    client: Client,
}

impl DirectoryProbe {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(http::client(timeout)?))
    }

    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(DIRECTORY_TIMEOUT)
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Probe for DirectoryProbe {
    type Candidate = String;

    async fn probe(&self, target: &Target, segment: &String) -> ProbeOutcome {
        http::get(&self.client, &target.join_path(segment)).await
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
