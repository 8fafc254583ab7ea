use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use recon_common::config::EngineSettings;
use recon_common::error::UnreachableCause;
use recon_common::outcome::{Evidence, ProbeOutcome};
use recon_common::target::Target;
use recon_core::engine::ProbeEngine;
use recon_core::probe::{PortProbe, SubdomainProbe, http, probe_fn};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::support::{closed_port, http_stub};

/// Runs the real TCP probe over a mix of listening and released loopback ports.
#[tokio::test]
async fn port_probe_through_engine() -> anyhow::Result<()> {
    let mut listeners = Vec::new();
    for _ in 0..5 {
        listeners.push(TcpListener::bind("127.0.0.1:0").await?);
    }
    let mut open: Vec<u16> = listeners
        .iter()
        .map(|l| l.local_addr().map(|a| a.port()))
        .collect::<Result<_, _>>()?;
    open.sort_unstable();

    let mut candidates = open.clone();
    for _ in 0..20 {
        let port = closed_port().await?;
        if !candidates.contains(&port) {
            candidates.push(port);
        }
    }

    let target = Target::from_str("127.0.0.1")?;
    let settings = EngineSettings::new(4, Duration::from_secs(2))?;
    let report = ProbeEngine::new(settings)
        .run(&target, candidates.clone(), Arc::new(PortProbe::new(Duration::from_secs(2))))
        .await?;

    assert_eq!(report.len(), candidates.len());
    let found = report.open_ports();
    assert!(open.iter().all(|port| found.contains(port)));
    let counts = report.counts();
    assert_eq!(counts.success + counts.not_found + counts.unreachable, candidates.len());
    assert!(
        report
            .unreachable()
            .all(|(_, cause)| *cause == UnreachableCause::Refused)
    );
    Ok(())
}

/// One label answers 200, the other resolves to an address nobody listens on.
#[tokio::test]
async fn subdomain_probe_separates_live_and_dead_labels() -> anyhow::Result<()> {
    let addr = http_stub(|host, _| if host.starts_with("www.") { 200 } else { 404 }).await?;
    let dead: SocketAddr = format!("127.0.0.2:{}", addr.port()).parse()?;

    let client = http::builder(Duration::from_secs(2))
        .resolve("www.example.com", addr)
        .resolve("doesnotexist123.example.com", dead)
        .build()?;
    let probe = Arc::new(SubdomainProbe::with_client(client, "http"));
    let target = Target::from_str(&format!("example.com:{}", addr.port()))?;

    let report = ProbeEngine::new(EngineSettings::subdomain())
        .run(
            &target,
            vec!["www".to_string(), "doesnotexist123".to_string()],
            probe,
        )
        .await?;

    assert_eq!(report.len(), 2);
    assert_eq!(
        report.outcome_of(&"www".to_string()),
        Some(&ProbeOutcome::Success {
            evidence: Evidence::Status(200)
        })
    );
    assert!(matches!(
        report.outcome_of(&"doesnotexist123".to_string()),
        Some(ProbeOutcome::Unreachable { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn cancelling_mid_run_keeps_one_outcome_per_candidate() -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let slow = Arc::new(probe_fn(|_, _port: u16| async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        ProbeOutcome::open()
    }));
    let engine = ProbeEngine::new(EngineSettings::new(2, Duration::from_secs(5))?)
        .with_cancellation(cancel.clone());

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(260)).await;
        trigger.cancel();
    });

    let target = Target::from_str("127.0.0.1")?;
    let report = engine.run(&target, (1..=100).collect(), slow).await?;

    assert_eq!(report.len(), 100);
    let counts = report.counts();
    assert!(counts.success > 0);
    assert!(counts.success < 100);
    assert_eq!(counts.success + counts.unreachable, 100);
    Ok(())
}
