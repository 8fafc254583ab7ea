use std::path::PathBuf;

use anyhow::Context;
use recon_common::candidate::wordlist;
use recon_common::config::EngineSettings;
use recon_common::report::Report;
use recon_common::target::Target;
use tracing::Instrument;

use crate::commands::{Session, candidates};
use crate::terminal::{format, print, spinner};

pub async fn subdomain(
    target: &Target,
    wordlist: Option<&PathBuf>,
    session: &Session,
) -> anyhow::Result<Report<String>> {
    print::header("subdomain enumeration", session.cfg.quiet);
    let settings = session.settings(EngineSettings::subdomain())?;
    let labels = candidates(wordlist, wordlist::subdomains)?;

    let span = spinner::run_span("Enumerating subdomains of", target.authority());
    let report = session
        .recon
        .enumerate_subdomains(target, labels, settings)
        .instrument(span)
        .await
        .with_context(|| format!("subdomain enumeration of {} failed", target.authority()))?;

    format::present(
        &report,
        |label| format!("{label}.{}", target.authority()),
        &session.cfg,
    );
    Ok(report)
}
