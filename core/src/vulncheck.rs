//! Vulnerability scan of open ports through `nmap`'s `vuln` script category.
//!
//! Every open port gets its own `nmap -sV --script vuln -p <port> <host>` run.
//! A port whose scan fails is logged and skipped; it never aborts the others.
//! Cancelling the run kills the scan in progress and leaves the remaining
//! ports unscanned.

use std::collections::BTreeMap;
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const NMAP: &str = "nmap";

#[derive(Debug, Error)]
pub enum VulnScanError {
    #[error("failed to launch {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Exited { program: String, status: std::process::ExitStatus },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vulnerability {
    pub description: String,
    pub details: String,
}

/// Findings per port, ascending. Ports without findings are absent.
pub type VulnerabilityMap = BTreeMap<u16, Vec<Vulnerability>>;

#[derive(Debug, Clone)]
pub struct VulnScanner {
    program: String,
}

impl Default for VulnScanner {
    fn default() -> Self {
        Self::with_program(NMAP)
    }
}

impl VulnScanner {
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Scans each port in turn until done or `cancel` fires. Findings of the
    /// ports scanned before cancellation are kept.
    pub async fn check_ports(
        &self,
        host: &str,
        open_ports: &[u16],
        cancel: &CancellationToken,
    ) -> VulnerabilityMap {
        let mut found = VulnerabilityMap::new();

        for &port in open_ports {
            debug!(host, port, "running vulnerability scripts");
            let scanned = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(host, port, "vulnerability scan cancelled");
                    break;
                }
                scanned = self.scan_port(host, port) => scanned,
            };
            let output = match scanned {
                Ok(output) => output,
                Err(e) => {
                    warn!("Vulnerability scan of port {port} failed: {e}");
                    continue;
                }
            };

            let vulns = parse_nmap_output(&output);
            if !vulns.is_empty() {
                found.insert(port, vulns);
            }
        }

        found
    }

    /// Raw stdout of one scan.
    pub async fn scan_port(&self, host: &str, port: u16) -> Result<String, VulnScanError> {
        let output = Command::new(&self.program)
            .args(["-sV", "--script", "vuln", "-p", &port.to_string(), host])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| VulnScanError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(VulnScanError::Exited {
                program: self.program.clone(),
                status: output.status,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Splits nmap output into findings.
///
/// A line containing `VULNERABLE` opens a finding and becomes its description.
/// Lines containing `PORT` or `SERVICE` are appended to the details of the
/// finding being built, including header lines seen before the first one.
pub fn parse_nmap_output(output: &str) -> Vec<Vulnerability> {
    let mut vulns = Vec::new();
    let mut current = Vulnerability::default();

    for line in output.split('\n') {
        if line.contains("VULNERABLE") {
            if !current.description.is_empty() {
                vulns.push(std::mem::take(&mut current));
            }
            current.description = line.to_string();
        } else if line.contains("PORT") || line.contains("SERVICE") {
            current.details.push_str(line);
            current.details.push('\n');
        }
    }

    if !current.description.is_empty() {
        vulns.push(current);
    }

    vulns
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
