use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use recon_common::candidate::Candidate;
use recon_common::error::EngineError;
use recon_common::outcome::ProbeOutcome;
use recon_common::report::{Finding, Report};
use recon_common::target::Target;

/// Thread-safe collector for the outcomes of one run.
///
/// Workers share it behind an `Arc` and call [`record`](Self::record) once per
/// candidate. The lock is held only for the append. Once
/// [`finalize`](Self::finalize) has taken the findings, any further record is
/// rejected instead of being dropped.
#[derive(Debug)]
pub struct Aggregator<C> {
    findings: Mutex<Option<Vec<Finding<C>>>>,
}

impl<C: Candidate> Aggregator<C> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            findings: Mutex::new(Some(Vec::with_capacity(capacity))),
        }
    }

    pub fn record(&self, candidate: C, outcome: ProbeOutcome) -> Result<(), EngineError> {
        match self.lock().as_mut() {
            Some(findings) => {
                findings.push(Finding { candidate, outcome });
                Ok(())
            }
            None => Err(EngineError::RecordAfterFinalize {
                candidate: candidate.to_string(),
            }),
        }
    }

    /// Number of outcomes recorded so far, or `None` once finalized.
    pub fn recorded(&self) -> Option<usize> {
        self.lock().as_ref().map(Vec::len)
    }

    /// Seals the aggregator and hands the findings over as a [`Report`].
    ///
    /// Must only be called after every worker has been joined.
    pub fn finalize(&self, target: Target, elapsed: Duration) -> Result<Report<C>, EngineError> {
        let findings = self.lock().take().ok_or(EngineError::AlreadyFinalized)?;
        Ok(Report::new(target, findings, elapsed))
    }

    // A poisoned lock still holds a consistent Vec: the only critical section is a push.
    fn lock(&self) -> MutexGuard<'_, Option<Vec<Finding<C>>>> {
        self.findings.lock().unwrap_or_else(PoisonError::into_inner)
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
