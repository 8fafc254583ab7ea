use recon_common::target::Target;
use recon_common::{info, success, warn};

use crate::commands::{ReconMode, Session, httpcheck, report, vulncheck};

pub async fn mode(mode: ReconMode, host: &Target, session: &Session) -> anyhow::Result<()> {
    match mode {
        ReconMode::Full => {
            info!("Running full recon mode against {host}");
            httpcheck::httpcheck(host, session).await;
            report::report(host, session).await?;
        }
        ReconMode::Less => {
            info!("Running less recon mode against {host}");
            vulncheck::vulncheck(host, session).await?;
        }
    }

    if session.recon.is_cancelled() {
        warn!("Recon stopped early, results are partial");
    } else {
        success!("{mode:?} recon completed");
    }
    Ok(())
}
