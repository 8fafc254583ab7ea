use std::fmt;

use http::StatusCode;

use crate::error::UnreachableCause;

/// What a successful probe observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evidence {
    /// The remote answered with this HTTP status.
    Status(u16),
    /// A TCP handshake completed.
    Open,
}

/// The classified result of probing one candidate against one target.
///
/// Exactly one variant is produced per candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success { evidence: Evidence },
    NotFound { status: u16 },
    Unreachable { cause: UnreachableCause },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Success,
    NotFound,
    Unreachable,
}

impl ProbeOutcome {
    pub fn open() -> Self {
        Self::Success {
            evidence: Evidence::Open,
        }
    }

    /// Only `200 OK` counts as found; every other status is an explicit rejection.
    pub fn from_status(status: u16) -> Self {
        if status == 200 {
            Self::Success {
                evidence: Evidence::Status(status),
            }
        } else {
            Self::NotFound { status }
        }
    }

    pub fn unreachable(cause: UnreachableCause) -> Self {
        Self::Unreachable { cause }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Success { .. } => OutcomeKind::Success,
            Self::NotFound { .. } => OutcomeKind::NotFound,
            Self::Unreachable { .. } => OutcomeKind::Unreachable,
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind() == OutcomeKind::Success
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Success {
                evidence: Evidence::Status(status),
            }
            | Self::NotFound { status } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success {
                evidence: Evidence::Open,
            } => f.write_str("open"),
            Self::Success {
                evidence: Evidence::Status(status),
            }
            | Self::NotFound { status } => write!(f, "{}", status_line(*status)),
            Self::Unreachable { .. } => f.write_str("No Response"),
        }
    }
}

/// `200 OK`, `404 Not Found`, ... as printed by most HTTP clients.
pub fn status_line(status: u16) -> String {
    match StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
    {
        Some(reason) => format!("{status} {reason}"),
        None => status.to_string(),
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
