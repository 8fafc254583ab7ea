use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use recon_common::report::Report;
use recon_common::target::Target;
use recon_common::{info, success, warn};
use recon_core::markdown::ReconReport;
use recon_core::vulncheck::VulnerabilityMap;

use crate::commands::{Session, dir, portscan, subdomain, vulncheck};

/// Everything one report covers. Steps skipped after a cancellation leave
/// their report empty.
pub struct Gathered {
    pub ports: Report<u16>,
    pub subdomains: Report<String>,
    pub directories: Report<String>,
    pub vulnerabilities: VulnerabilityMap,
}

impl Gathered {
    fn new(target: &Target, ports: Report<u16>) -> Self {
        Self {
            ports,
            subdomains: Report::new(target.clone(), Vec::new(), Duration::ZERO),
            directories: Report::new(target.clone(), Vec::new(), Duration::ZERO),
            vulnerabilities: VulnerabilityMap::new(),
        }
    }

    pub fn as_report<'a>(&'a self, target: &'a Target) -> ReconReport<'a> {
        ReconReport {
            target,
            subdomains: &self.subdomains,
            ports: &self.ports,
            vulnerabilities: &self.vulnerabilities,
            directories: &self.directories,
        }
    }
}

/// Every scan in turn, then the Markdown report. A cancelled run still
/// writes the report with whatever was gathered.
pub async fn report(target: &Target, session: &Session) -> anyhow::Result<()> {
    info!("Generating report for target {target}");

    let gathered = gather(target, session).await?;
    let recon = gathered.as_report(target);
    let path = write(&recon, Path::new(&recon.file_name())).await?;

    if session.recon.is_cancelled() {
        warn!("Partial report written to {}", path.display());
    } else {
        success!("Report written to {}", path.display());
    }
    Ok(())
}

/// Runs the scans in report order, stopping at the first cancelled step.
pub async fn gather(target: &Target, session: &Session) -> anyhow::Result<Gathered> {
    let ports = portscan::portscan(target, session).await?;
    let mut gathered = Gathered::new(target, ports);
    if session.stop_requested() {
        return Ok(gathered);
    }

    gathered.subdomains = subdomain::subdomain(target, None, session).await?;
    if session.stop_requested() {
        return Ok(gathered);
    }

    gathered.directories = dir::dir(target, None, session).await?;
    if session.stop_requested() {
        return Ok(gathered);
    }

    let open = gathered.ports.open_ports();
    if !open.is_empty() {
        gathered.vulnerabilities = vulncheck::scan_open_ports(target, &open, session).await;
    }
    Ok(gathered)
}

async fn write(recon: &ReconReport<'_>, path: &Path) -> anyhow::Result<PathBuf> {
    tokio::fs::write(path, recon.render())
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path.to_path_buf())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
