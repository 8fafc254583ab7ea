use colored::*;
use recon_common::target::Target;
use recon_common::{error, info, success, warn};
use recon_core::intel::{self, HostIntel, IntelClient};
use recon_core::vulncheck::{VulnScanner, VulnerabilityMap};
use tracing::Instrument;

use crate::commands::{Session, portscan};
use crate::terminal::{colors, print, spinner};

/// Port scan followed by a vulnerability scan of whatever is open.
pub async fn vulncheck(target: &Target, session: &Session) -> anyhow::Result<VulnerabilityMap> {
    let ports = portscan::portscan(target, session).await?;
    if session.stop_requested() {
        return Ok(VulnerabilityMap::new());
    }

    let open = ports.open_ports();
    if open.is_empty() {
        warn!("No open ports detected. Skipping vulnerability check.");
        return Ok(VulnerabilityMap::new());
    }

    Ok(scan_open_ports(target, &open, session).await)
}

pub async fn scan_open_ports(target: &Target, open: &[u16], session: &Session) -> VulnerabilityMap {
    print::header("vulnerability scan", session.cfg.quiet);
    info!("Checking {} open ports for known vulnerabilities", open.len());

    let span = spinner::run_span("Running vulnerability scripts against", target.host());
    let vulns = session
        .recon
        .check_vulnerabilities(&VulnScanner::default(), target, open)
        .instrument(span)
        .await;

    print_vulnerabilities(&vulns);
    if session.stop_requested() {
        return vulns;
    }
    host_intel(target).await;
    vulns
}

fn print_vulnerabilities(vulns: &VulnerabilityMap) {
    if vulns.is_empty() {
        info!("No vulnerabilities identified");
        return;
    }

    for (port, findings) in vulns {
        success!(
            "Port {}: {} potential vulnerabilities",
            port.to_string().color(colors::ACCENT).bold(),
            findings.len()
        );
        let lines: Vec<String> = findings
            .iter()
            .map(|v| v.description.trim().color(colors::VULNERABLE).to_string())
            .collect();
        print::as_tree_one_level(&lines);
    }
}

async fn host_intel(target: &Target) {
    let api_key = match intel::api_key_from_env() {
        Ok(key) => key,
        Err(e) => {
            warn!("{e}, skipping host intelligence");
            return;
        }
    };

    let lookup = async {
        let client = IntelClient::new(api_key)?;
        client.lookup(target.host()).await
    };

    match lookup.await {
        Ok(host) => print_intel(&host),
        Err(e) => error!("Host intelligence lookup failed: {e}"),
    }
}

fn print_intel(host: &HostIntel) {
    const KEY_WIDTH: usize = 9;
    let none = || "-".to_string();

    print::header(&format!("shodan report for {}", host.ip_str), 0);
    print::aligned_line("ISP", KEY_WIDTH, host.isp.clone().unwrap_or_else(none));
    print::aligned_line("Org", KEY_WIDTH, host.org.clone().unwrap_or_else(none));
    print::aligned_line("Hostnames", KEY_WIDTH, host.hostnames.join(", "));
    let ports: Vec<String> = host.ports.iter().map(u16::to_string).collect();
    print::aligned_line("Ports", KEY_WIDTH, ports.join(", ").color(colors::FOUND));

    let vulns = host.vulnerabilities();
    if vulns.is_empty() {
        warn!("No vulnerabilities listed for {}", host.ip_str);
        return;
    }
    let lines: Vec<String> = vulns
        .iter()
        .map(|(id, description)| {
            if description.is_empty() {
                id.color(colors::NO_RESPONSE).to_string()
            } else {
                format!("{}: {}", id.color(colors::NO_RESPONSE), description)
            }
        })
        .collect();
    print::as_tree_one_level(&lines);
}
