use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use recon_common::config::PORT_SCAN_TIMEOUT;
use recon_common::error::UnreachableCause;
use recon_common::outcome::ProbeOutcome;
use recon_common::target::Target;
use tokio::net::{TcpStream, lookup_host};
use tokio::time::timeout;

use super::Probe;

/// TCP connect probe. The connection is dropped as soon as the handshake completes.
#[derive(Debug, Clone)]
pub struct PortProbe {
    timeout: Duration,
}

impl PortProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for PortProbe {
    fn default() -> Self {
        Self::new(PORT_SCAN_TIMEOUT)
    }
}

#[async_trait]
impl Probe for PortProbe {
    type Candidate = u16;

    async fn probe(&self, target: &Target, port: &u16) -> ProbeOutcome {
        match timeout(self.timeout, handshake(target.host(), *port)).await {
            Ok(Ok(())) => ProbeOutcome::open(),
            Ok(Err(cause)) => ProbeOutcome::unreachable(cause),
            Err(_elapsed) => ProbeOutcome::unreachable(UnreachableCause::Timeout),
        }
    }
}

async fn handshake(host: &str, port: u16) -> Result<(), UnreachableCause> {
    let addrs: Vec<SocketAddr> = lookup_host((host, port))
        .await
        .map_err(|e| UnreachableCause::Dns(e.to_string()))?
        .collect();

    if addrs.is_empty() {
        return Err(UnreachableCause::Dns(format!("no addresses for {host}")));
    }

    let stream = TcpStream::connect(&addrs[..])
        .await
        .map_err(|e| UnreachableCause::from_io(&e))?;
    drop(stream);
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
