//! Error taxonomy.
//!
//! Per-candidate failures are never errors: they travel as
//! [`UnreachableCause`] inside a [`ProbeOutcome`](crate::outcome::ProbeOutcome).
//! The enums here cover what can actually stop a run: bad setup
//! ([`ConfigError`]) and misuse of the engine itself ([`EngineError`]).

use std::path::PathBuf;

use thiserror::Error;

/// Setup-time failures, surfaced before any probe is dispatched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid target '{input}': {reason}")]
    InvalidTarget { input: String, reason: String },

    #[error("concurrency ceiling must be at least 1")]
    ZeroConcurrency,

    #[error("probe timeout must be greater than zero")]
    ZeroTimeout,

    #[error("failed to read wordlist {path}")]
    Wordlist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("environment variable {0} is not set")]
    MissingCredential(&'static str),
}

/// Programming errors inside the engine. Any of these is fatal to the run.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("outcome for '{candidate}' recorded after the report was finalized")]
    RecordAfterFinalize { candidate: String },

    #[error("report has already been finalized")]
    AlreadyFinalized,

    #[error("concurrency limiter was closed while work was pending")]
    LimiterClosed,

    #[error("worker task was lost: {0}")]
    WorkerLost(String),

    #[error("{recorded} outcomes recorded for {expected} candidates")]
    MissingOutcomes { expected: usize, recorded: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Why a probe could not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnreachableCause {
    #[error("timed out")]
    Timeout,

    #[error("connection refused")]
    Refused,

    #[error("name resolution failed: {0}")]
    Dns(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("probe panicked: {0}")]
    Panicked(String),

    #[error("run cancelled before the probe completed")]
    Cancelled,
}

impl UnreachableCause {
    /// Maps an I/O error from a connect attempt onto a cause.
    pub fn from_io(err: &std::io::Error) -> Self {
        use std::io::ErrorKind;

        match err.kind() {
            ErrorKind::ConnectionRefused => Self::Refused,
            ErrorKind::TimedOut => Self::Timeout,
            _ => Self::Transport(err.to_string()),
        }
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
