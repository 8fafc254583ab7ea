//! # Run Report
//!
//! The immutable snapshot of one finished run. Findings are kept in the order
//! their outcomes arrived, which is not the order candidates were submitted in;
//! callers that care about ordering sort for themselves.

use std::time::Duration;

use crate::candidate::Candidate;
use crate::error::UnreachableCause;
use crate::outcome::{OutcomeKind, ProbeOutcome};
use crate::target::Target;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding<C> {
    pub candidate: C,
    pub outcome: ProbeOutcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub success: usize,
    pub not_found: usize,
    pub unreachable: usize,
}

impl OutcomeCounts {
    pub fn total(&self) -> usize {
        self.success + self.not_found + self.unreachable
    }
}

#[derive(Debug, Clone)]
pub struct Report<C> {
    target: Target,
    findings: Vec<Finding<C>>,
    elapsed: Duration,
}

impl<C: Candidate> Report<C> {
    pub fn new(target: Target, findings: Vec<Finding<C>>, elapsed: Duration) -> Self {
        Self {
            target,
            findings,
            elapsed,
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Every finding, in arrival order.
    pub fn findings(&self) -> &[Finding<C>] {
        &self.findings
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn successes(&self) -> impl Iterator<Item = &Finding<C>> {
        self.of_kind(OutcomeKind::Success)
    }

    pub fn not_found(&self) -> impl Iterator<Item = &Finding<C>> {
        self.of_kind(OutcomeKind::NotFound)
    }

    pub fn unreachable(&self) -> impl Iterator<Item = (&C, &UnreachableCause)> {
        self.findings.iter().filter_map(|f| match &f.outcome {
            ProbeOutcome::Unreachable { cause } => Some((&f.candidate, cause)),
            _ => None,
        })
    }

    pub fn counts(&self) -> OutcomeCounts {
        self.findings
            .iter()
            .fold(OutcomeCounts::default(), |mut counts, f| {
                match f.outcome.kind() {
                    OutcomeKind::Success => counts.success += 1,
                    OutcomeKind::NotFound => counts.not_found += 1,
                    OutcomeKind::Unreachable => counts.unreachable += 1,
                }
                counts
            })
    }

    pub fn outcome_of(&self, candidate: &C) -> Option<&ProbeOutcome> {
        self.findings
            .iter()
            .find(|f| &f.candidate == candidate)
            .map(|f| &f.outcome)
    }

    /// Successful candidates, in arrival order.
    pub fn found(&self) -> Vec<C> {
        self.successes().map(|f| f.candidate.clone()).collect()
    }

    fn of_kind(&self, kind: OutcomeKind) -> impl Iterator<Item = &Finding<C>> {
        self.findings
            .iter()
            .filter(move |f| f.outcome.kind() == kind)
    }
}

impl Report<u16> {
    /// Open ports in ascending order.
    pub fn open_ports(&self) -> Vec<u16> {
        let mut ports = self.found();
        ports.sort_unstable();
        ports
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
