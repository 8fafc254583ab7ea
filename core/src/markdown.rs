//! Markdown rendering of a complete reconnaissance pass.

use std::fmt;

use recon_common::report::Report;
use recon_common::target::Target;

use crate::vulncheck::VulnerabilityMap;

/// Everything one report file is made of. Rendering goes through [`fmt::Display`].
#[derive(Debug, Clone, Copy)]
pub struct ReconReport<'a> {
    pub target: &'a Target,
    pub subdomains: &'a Report<String>,
    pub ports: &'a Report<u16>,
    pub vulnerabilities: &'a VulnerabilityMap,
    pub directories: &'a Report<String>,
}

impl ReconReport<'_> {
    /// `{host}_report.md`
    pub fn file_name(&self) -> String {
        format!("{}_report.md", self.target.host())
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ReconReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let host = self.target.host();
        writeln!(f, "# Report for {host}\n")?;

        writeln!(f, "## Subdomain Enumeration:")?;
        for finding in self.subdomains.findings() {
            writeln!(f, "- {}.{}: {}", finding.candidate, host, finding.outcome)?;
        }

        writeln!(f, "\n## Open Ports:")?;
        for port in self.ports.open_ports() {
            writeln!(f, "- Port {port}: open")?;
        }

        writeln!(f, "\n## Vulnerabilities:")?;
        for (port, vulns) in self.vulnerabilities {
            writeln!(f, "\n- Port {port}:")?;
            for vuln in vulns {
                writeln!(f, "  * {}", vuln.description)?;
                writeln!(f, "    Details: {}", vuln.details)?;
            }
        }

        writeln!(f, "\n## Directory Discovery:")?;
        let found = self.directories.found();
        if found.is_empty() {
            writeln!(f, "- No directories found.")?;
        }
        for dir in &found {
            writeln!(f, "- Found directory: {}", self.target.join_path(dir))?;
        }

        let rejected: Vec<&String> = self
            .directories
            .not_found()
            .map(|finding| &finding.candidate)
            .collect();
        if !rejected.is_empty() {
            writeln!(f, "\n### Directories Not Found:")?;
            for dir in rejected {
                writeln!(f, "- {dir}")?;
            }
        }

        Ok(())
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
