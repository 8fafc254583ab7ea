use anyhow::Context;
use recon_common::candidate::well_known_ports;
use recon_common::config::EngineSettings;
use recon_common::report::Report;
use recon_common::target::Target;
use tracing::Instrument;

use crate::commands::Session;
use crate::terminal::{format, print, spinner};

pub async fn portscan(target: &Target, session: &Session) -> anyhow::Result<Report<u16>> {
    print::header("port scan", session.cfg.quiet);
    let settings = session.settings(EngineSettings::port_scan())?;

    let span = spinner::run_span("Scanning ports on", target.host());
    let report = session
        .recon
        .scan_ports(target, well_known_ports(), settings)
        .instrument(span)
        .await
        .with_context(|| format!("port scan of {} failed", target.host()))?;

    format::present_hits(&report, |port| format!("Port {port}"), &session.cfg);
    Ok(report)
}
