//! Shared plumbing for the HTTP based probes.

use std::error::Error as _;
use std::time::Duration;

use recon_common::error::UnreachableCause;
use recon_common::outcome::ProbeOutcome;
use reqwest::{Client, ClientBuilder};

const USER_AGENT: &str = concat!("recon/", env!("CARGO_PKG_VERSION"));

/// Probes talk to the target directly, never through a proxy from the environment.
pub fn builder(timeout: Duration) -> ClientBuilder {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .no_proxy()
}

/// Builds the client every HTTP probe in a run shares. `timeout` bounds the whole request.
pub fn client(timeout: Duration) -> Result<Client, reqwest::Error> {
    builder(timeout).build()
}

/// Issues one GET and classifies the answer: `200` is a hit, any other status a rejection.
pub async fn get(client: &Client, url: &str) -> ProbeOutcome {
    match client.get(url).send().await {
        Ok(response) => ProbeOutcome::from_status(response.status().as_u16()),
        Err(err) => ProbeOutcome::unreachable(classify(&err)),
    }
}

/// Maps a request failure to the cause recorded on its outcome.
///
/// hyper-util exposes resolver failures only through their message, so DNS errors
/// are recognised by the text "dns error". If that wording changes they fall
/// through to `Transport`, which is still an unreachable outcome.
pub fn classify(err: &reqwest::Error) -> UnreachableCause {
    if err.is_timeout() {
        return UnreachableCause::Timeout;
    }

    let mut source = err.source();
    while let Some(inner) = source {
        if let Some(io) = inner.downcast_ref::<std::io::Error>() {
            match UnreachableCause::from_io(io) {
                UnreachableCause::Transport(_) => {}
                cause => return cause,
            }
        }
        if inner.to_string().contains("dns error") {
            return UnreachableCause::Dns(root_message(inner));
        }
        source = inner.source();
    }

    UnreachableCause::Transport(root_message(err))
}

fn root_message(err: &(dyn std::error::Error + 'static)) -> String {
    let mut current = err;
    while let Some(next) = current.source() {
        current = next;
    }
    current.to_string()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

/// Minimal HTTP/1.1 responder for tests: answers every request with the status
/// the route returns for its `Host` header and path, then closes the connection.
#[cfg(test)]
pub(crate) mod stub_server {
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    pub async fn serve<F>(route: F) -> SocketAddr
    where
        F: Fn(&str, &str) -> u16 + Send + Sync + 'static,
    {
        serve_with_delay(route, Duration::ZERO).await
    }

    pub async fn serve_with_delay<F>(route: F, delay: Duration) -> SocketAddr
    where
        F: Fn(&str, &str) -> u16 + Send + Sync + 'static,
    {
        let route = Arc::new(route);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let route = Arc::clone(&route);
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 4096];
                    let mut read = 0;
                    while read < buf.len() {
                        match stream.read(&mut buf[read..]).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => read += n,
                        }
                        if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }

                    let request = String::from_utf8_lossy(&buf[..read]);
                    let path = request.split_whitespace().nth(1).unwrap_or("/");
                    let host = request
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("host").then(|| value.trim())
                        })
                        .unwrap_or("");

                    let status = route(host, path);
                    tokio::time::sleep(delay).await;
                    let response = format!(
                        "HTTP/1.1 {status} Stub\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        addr
    }
}

#[cfg(test)]
pub(crate) fn test_client(timeout: Duration) -> Client {
    builder(timeout).build().unwrap()
}
