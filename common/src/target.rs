//! # Scan Target Model
//!
//! A [`Target`] is the host a run is pointed at. It is parsed once from user input
//! and stays immutable for the lifetime of every run that uses it.
//!
//! Accepted inputs:
//! * A bare host (`example.com`, `10.0.0.5`), which defaults to `http://`.
//! * A host with a port (`example.com:8080`).
//! * A scheme-qualified URL (`https://example.com/app`).
//! * A bracketed IPv6 literal (`[::1]`).
//!
//! Any query string or fragment is dropped.

use std::fmt;
use std::str::FromStr;

use url::{Host, Url};

use crate::error::ConfigError;

const DEFAULT_SCHEME: &str = "http://";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    url: Url,
    host: String,
    authority: String,
}

impl Target {
    /// The normalised base URL, without a trailing slash.
    pub fn url(&self) -> &str {
        self.url.as_str().trim_end_matches('/')
    }

    /// The bare host: usable as a subdomain root and as a TCP connect address.
    ///
    /// IPv6 literals are returned without brackets.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Host plus any explicitly given port (`example.com:8443`), as typed by the user.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Appends a path segment to the base URL (`{target}/{segment}`).
    pub fn join_path(&self, segment: &str) -> String {
        format!("{}/{}", self.url(), segment.trim_start_matches('/'))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url())
    }
}

impl FromStr for Target {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(invalid(s, "target is empty"));
        }

        let qualified = with_default_scheme(trimmed);
        let mut url = Url::parse(&qualified).map_err(|e| invalid(s, &e.to_string()))?;
        // Paths are appended to the base URL, so a query or fragment would end up in front of them.
        url.set_query(None);
        url.set_fragment(None);

        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(s, &format!("unsupported scheme '{}'", url.scheme())));
        }

        let host = match url.host() {
            Some(Host::Domain(domain)) => domain.to_string(),
            Some(Host::Ipv4(addr)) => addr.to_string(),
            Some(Host::Ipv6(addr)) => addr.to_string(),
            None => return Err(invalid(s, "missing host")),
        };

        let host_str = url.host_str().unwrap_or(host.as_str());
        let authority = match url.port() {
            Some(port) => format!("{host_str}:{port}"),
            None => host_str.to_string(),
        };

        Ok(Self {
            url,
            host,
            authority,
        })
    }
}

fn with_default_scheme(s: &str) -> String {
    if s.contains("://") {
        s.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{s}")
    }
}

fn invalid(input: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidTarget {
        input: input.to_string(),
        reason: reason.to_string(),
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
