use std::str::FromStr;

use recon_common::candidate::wordlist;
use recon_common::config::EngineSettings;
use recon_common::target::Target;
use recon_core::markdown::ReconReport;
use recon_core::recon::Recon;
use recon_core::vulncheck::{VulnerabilityMap, parse_nmap_output};
use tokio::net::TcpListener;

use crate::support::http_stub;

/// Directory discovery and a port scan against loopback, rendered into one report.
#[tokio::test]
async fn scans_feed_the_markdown_report() -> anyhow::Result<()> {
    let addr = http_stub(|_, path| match path {
        "/admin" | "/login" => 200,
        "/backup" => 403,
        _ => 404,
    })
    .await?;
    let extra = TcpListener::bind("127.0.0.1:0").await?;
    let extra_port = extra.local_addr()?.port();

    let target = Target::from_str(&addr.to_string())?;
    let recon = Recon::new();

    let segments = wordlist::parse("admin\nlogin\n# comment\nbackup\n\nadmin\nmissing\n");
    assert_eq!(segments, ["admin", "login", "backup", "missing"]);
    let directories = recon
        .discover_directories(&target, segments, EngineSettings::directory())
        .await?;

    let ports = recon
        .scan_ports(&target, vec![addr.port(), extra_port], EngineSettings::port_scan())
        .await?;
    let subdomains = recon
        .enumerate_subdomains(&target, Vec::new(), EngineSettings::subdomain())
        .await?;

    let mut vulnerabilities = VulnerabilityMap::new();
    vulnerabilities.insert(
        addr.port(),
        parse_nmap_output("PORT STATE SERVICE\n| http-vuln: VULNERABLE\n"),
    );

    let rendered = ReconReport {
        target: &target,
        subdomains: &subdomains,
        ports: &ports,
        vulnerabilities: &vulnerabilities,
        directories: &directories,
    }
    .render();

    assert!(rendered.starts_with("# Report for 127.0.0.1\n\n## Subdomain Enumeration:\n\n## Open Ports:\n"));
    assert!(rendered.contains(&format!("- Port {}: open\n", addr.port())));
    assert!(rendered.contains(&format!("- Port {extra_port}: open\n")));
    assert!(rendered.contains("  * | http-vuln: VULNERABLE\n    Details: PORT STATE SERVICE\n"));
    assert!(rendered.contains(&format!("- Found directory: http://{addr}/admin\n")));
    assert!(rendered.contains(&format!("- Found directory: http://{addr}/login\n")));

    let not_found = rendered
        .split("### Directories Not Found:\n")
        .nth(1)
        .unwrap_or_default();
    assert!(not_found.contains("- backup\n"));
    assert!(not_found.contains("- missing\n"));
    assert!(!not_found.contains("admin"));
    Ok(())
}
