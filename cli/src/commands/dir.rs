use std::path::PathBuf;

use anyhow::Context;
use recon_common::candidate::wordlist;
use recon_common::config::EngineSettings;
use recon_common::report::Report;
use recon_common::target::Target;
use tracing::Instrument;

use crate::commands::{Session, candidates};
use crate::terminal::{format, print, spinner};

pub async fn dir(
    target: &Target,
    wordlist: Option<&PathBuf>,
    session: &Session,
) -> anyhow::Result<Report<String>> {
    print::header("directory discovery", session.cfg.quiet);
    let settings = session.settings(EngineSettings::directory())?;
    let segments = candidates(wordlist, wordlist::directories)?;

    let span = spinner::run_span("Discovering directories under", target.url());
    let report = session
        .recon
        .discover_directories(target, segments, settings)
        .instrument(span)
        .await
        .with_context(|| format!("directory discovery under {target} failed"))?;

    format::present(&report, |segment| target.join_path(segment), &session.cfg);
    Ok(report)
}
