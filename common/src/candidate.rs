//! # Candidate Sources
//!
//! A candidate is one discrete thing to probe: a port, a subdomain label or a
//! path segment. Sources are finite, ordered and read-only, and never yield the
//! same candidate twice within one run.

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::RangeInclusive;

pub mod wordlist;

/// Anything the engine can fan out over.
pub trait Candidate: Clone + Eq + Hash + Display + Debug + Send + Sync + 'static {}

impl<T> Candidate for T where T: Clone + Eq + Hash + Display + Debug + Send + Sync + 'static {}

pub const WELL_KNOWN_PORTS: RangeInclusive<u16> = 1..=1024;

/// Ports 1 through 1024, in ascending order.
pub fn well_known_ports() -> Vec<u16> {
    WELL_KNOWN_PORTS.collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_ports_cover_one_to_1024() {
        let ports = well_known_ports();
        assert_eq!(ports.len(), 1024);
        assert_eq!(ports.first(), Some(&1));
        assert_eq!(ports.last(), Some(&1024));
    }
}
