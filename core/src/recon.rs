//! Use cases: each one pairs a probe adapter with its candidates and runs it
//! through a [`ProbeEngine`].

use std::sync::Arc;

use recon_common::config::EngineSettings;
use recon_common::error::{ConfigError, EngineError};
use recon_common::report::Report;
use recon_common::target::Target;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::engine::ProbeEngine;
use crate::probe::{DirectoryProbe, PortProbe, SubdomainProbe};
use crate::vulncheck::{VulnScanner, VulnerabilityMap};

#[derive(Debug, Error)]
pub enum ReconError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client")]
    Client(#[from] reqwest::Error),
}

/// Runs the reconnaissance use cases. All runs share one cancellation token.
#[derive(Debug, Clone, Default)]
pub struct Recon {
    cancel: CancellationToken,
}

impl Recon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancellation(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn engine(&self, settings: EngineSettings) -> ProbeEngine {
        ProbeEngine::new(settings).with_cancellation(self.cancel.clone())
    }

    pub async fn scan_ports(
        &self,
        target: &Target,
        ports: Vec<u16>,
        settings: EngineSettings,
    ) -> Result<Report<u16>, ReconError> {
        info!("Scanning {} ports on {}", ports.len(), target.host());
        let probe = Arc::new(PortProbe::new(settings.probe_timeout()));
        Ok(self.engine(settings).run(target, ports, probe).await?)
    }

    pub async fn enumerate_subdomains(
        &self,
        target: &Target,
        labels: Vec<String>,
        settings: EngineSettings,
    ) -> Result<Report<String>, ReconError> {
        info!("Enumerating {} subdomains of {}", labels.len(), target.authority());
        let probe = Arc::new(SubdomainProbe::new(settings.probe_timeout())?);
        Ok(self.engine(settings).run(target, labels, probe).await?)
    }

    pub async fn discover_directories(
        &self,
        target: &Target,
        segments: Vec<String>,
        settings: EngineSettings,
    ) -> Result<Report<String>, ReconError> {
        info!("Discovering {} directories under {}", segments.len(), target);
        let probe = Arc::new(DirectoryProbe::new(settings.probe_timeout())?);
        Ok(self.engine(settings).run(target, segments, probe).await?)
    }

    /// Runs `scanner` over the open ports, stopping early once the run is cancelled.
    pub async fn check_vulnerabilities(
        &self,
        scanner: &VulnScanner,
        target: &Target,
        open_ports: &[u16],
    ) -> VulnerabilityMap {
        scanner.check_ports(target.host(), open_ports, &self.cancel).await
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
