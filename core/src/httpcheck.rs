//! Single-request reachability check against the target's base URL.

use std::fmt;

use recon_common::config::HTTP_CHECK_TIMEOUT;
use recon_common::outcome::status_line;
use recon_common::target::Target;
use reqwest::Client;
use tracing::debug;

use crate::probe::http;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Success,
    Redirection,
    ClientError,
    ServerError,
    Unknown,
}

impl StatusCategory {
    pub fn of(status: u16) -> Self {
        match status {
            200..=299 => Self::Success,
            300..=399 => Self::Redirection,
            400..=499 => Self::ClientError,
            500.. => Self::ServerError,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Success => "Success",
            Self::Redirection => "Redirection",
            Self::ClientError => "Client Error",
            Self::ServerError => "Server Error",
            Self::Unknown => "Unknown Status",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpCheck {
    pub url: String,
    pub status: u16,
    pub category: StatusCategory,
}

impl HttpCheck {
    /// `"200 OK"` style line for the received status.
    pub fn status_line(&self) -> String {
        status_line(self.status)
    }
}

/// GETs the target once with the default 10 s timeout.
pub async fn check(target: &Target) -> Result<HttpCheck, reqwest::Error> {
    let client = http::client(HTTP_CHECK_TIMEOUT)?;
    check_with(&client, target).await
}

pub async fn check_with(client: &Client, target: &Target) -> Result<HttpCheck, reqwest::Error> {
    let url = target.url().to_string();
    let response = client.get(&url).send().await?;
    let status = response.status().as_u16();
    debug!(url = %url, status, "http check answered");

    Ok(HttpCheck {
        url,
        status,
        category: StatusCategory::of(status),
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
