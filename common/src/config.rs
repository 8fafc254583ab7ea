use std::time::Duration;

use crate::error::ConfigError;

pub const PORT_SCAN_CONCURRENCY: usize = 512;
pub const PORT_SCAN_TIMEOUT: Duration = Duration::from_millis(500);

pub const SUBDOMAIN_CONCURRENCY: usize = 20;
pub const SUBDOMAIN_TIMEOUT: Duration = Duration::from_secs(5);

pub const DIRECTORY_CONCURRENCY: usize = 30;
pub const DIRECTORY_TIMEOUT: Duration = Duration::from_secs(5);

pub const HTTP_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// How many "no response" lines the console shows before it starts summarising.
pub const NO_RESPONSE_DISPLAY_LIMIT: usize = 50;

/// Credential for the host intelligence lookup.
pub const SHODAN_API_KEY_ENV: &str = "SHODAN_API_KEY";

/// Front-end options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// 0 prints everything, 1 drops headers, 2 prints only findings.
    pub quiet: u8,
    /// Skips the start-up banner.
    pub no_banner: bool,
    /// Stops every run after this long, marking unfinished candidates as cancelled.
    pub max_duration: Option<Duration>,
}

/// The knobs of a single engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    concurrency: usize,
    probe_timeout: Duration,
}

impl EngineSettings {
    pub fn new(concurrency: usize, probe_timeout: Duration) -> Result<Self, ConfigError> {
        if concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if probe_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Self {
            concurrency,
            probe_timeout,
        })
    }

    pub const fn port_scan() -> Self {
        Self {
            concurrency: PORT_SCAN_CONCURRENCY,
            probe_timeout: PORT_SCAN_TIMEOUT,
        }
    }

    pub const fn subdomain() -> Self {
        Self {
            concurrency: SUBDOMAIN_CONCURRENCY,
            probe_timeout: SUBDOMAIN_TIMEOUT,
        }
    }

    pub const fn directory() -> Self {
        Self {
            concurrency: DIRECTORY_CONCURRENCY,
            probe_timeout: DIRECTORY_TIMEOUT,
        }
    }

    /// Applies optional overrides on top of a default, validating the result.
    pub fn with_overrides(
        self,
        concurrency: Option<usize>,
        probe_timeout: Option<Duration>,
    ) -> Result<Self, ConfigError> {
        Self::new(
            concurrency.unwrap_or(self.concurrency),
            probe_timeout.unwrap_or(self.probe_timeout),
        )
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
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
