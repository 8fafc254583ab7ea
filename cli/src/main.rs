mod commands;
mod terminal;

use std::time::Duration;

use commands::{CommandLine, Commands, Session, dir, httpcheck, mode, portscan, report, subdomain, vulncheck};
use recon_common::warn;
use recon_core::recon::Recon;
use terminal::{logging, print};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    let cfg = commands.config();
    print::banner(cfg.no_banner, cfg.quiet);

    let cancel = CancellationToken::new();
    stop_on_interrupt(cancel.clone(), cfg.max_duration);
    let session = Session::new(cfg, commands.tuning.clone(), Recon::with_cancellation(cancel));

    let result = match &commands.command {
        Commands::Portscan { target } => portscan::portscan(target, &session).await.map(drop),
        Commands::Subdomain { target, wordlist } => {
            subdomain::subdomain(target, wordlist.as_ref(), &session).await.map(drop)
        }
        Commands::Dir { target, wordlist } => dir::dir(target, wordlist.as_ref(), &session).await.map(drop),
        Commands::Httpcheck { target } => {
            httpcheck::httpcheck(target, &session).await;
            Ok(())
        }
        Commands::Vulncheck { target } => vulncheck::vulncheck(target, &session).await.map(drop),
        Commands::Report { target } => report::report(target, &session).await,
        Commands::Mode { mode: recon_mode, host } => mode::mode(*recon_mode, host, &session).await,
    };

    if session.cfg.quiet == 0 {
        print::end_of_program();
    }
    result
}

/// Cancels every run on Ctrl-C or once `max_duration` has passed.
fn stop_on_interrupt(cancel: CancellationToken, max_duration: Option<Duration>) {
    tokio::spawn(async move {
        let deadline = async {
            match max_duration {
                Some(limit) => tokio::time::sleep(limit).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => warn!("Interrupted, finishing with partial results"),
            _ = deadline => warn!("Maximum run time reached, finishing with partial results"),
        }
        cancel.cancel();
    });
}
