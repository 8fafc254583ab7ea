use recon_common::target::Target;
use recon_common::{error, info, success, warn};
use recon_core::httpcheck::{self, HttpCheck, StatusCategory};
use tracing::Instrument;

use crate::commands::Session;
use crate::terminal::{print, spinner};

/// A failed request is reported, not returned: later steps still run.
pub async fn httpcheck(target: &Target, session: &Session) -> Option<HttpCheck> {
    print::header("http response check", session.cfg.quiet);
    info!("Starting HTTP response check for {target}");

    let span = spinner::run_span("Requesting", target.url());
    match httpcheck::check(target).instrument(span).await {
        Ok(result) => {
            let line = format!("{}: {}", result.category, result.status_line());
            match result.category {
                StatusCategory::Success => success!("{line}"),
                StatusCategory::Redirection | StatusCategory::Unknown => warn!("{line}"),
                StatusCategory::ClientError | StatusCategory::ServerError => error!("{line}"),
            }
            Some(result)
        }
        Err(e) => {
            error!("Unable to reach {target}: {e}");
            None
        }
    }
}
