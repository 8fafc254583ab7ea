//! The bounded-concurrency **probe engine**.
//!
//! One engine serves every use case: it fans a finite candidate list out over
//! at most `N` concurrent workers, applies the per-probe timeout, and collects
//! every outcome into a [`Report`].
//!
//! **Lifecycle of one candidate:**
//! 1. The orchestrator acquires a [`Slot`](limiter::Slot) from the
//!    [`ConcurrencyLimiter`]. Nothing is spawned until capacity is free.
//! 2. A worker task runs the [`Probe`] under the timeout, catching panics.
//! 3. The slot is dropped, then the outcome is handed to the [`Aggregator`].
//!
//! Individual probe failures are data, never errors. [`ProbeEngine::run`] only
//! returns `Err` for engine misuse, which aborts the whole run.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::FutureExt;
use recon_common::config::EngineSettings;
use recon_common::error::{EngineError, UnreachableCause};
use recon_common::outcome::ProbeOutcome;
use recon_common::report::Report;
use recon_common::target::Target;
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::probe::Probe;

pub mod aggregator;
pub mod limiter;

pub use aggregator::Aggregator;
pub use limiter::{ConcurrencyLimiter, Slot};

#[derive(Debug, Clone)]
pub struct ProbeEngine {
    settings: EngineSettings,
    cancel: CancellationToken,
}

impl ProbeEngine {
    /// An engine that always runs to completion.
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            cancel: CancellationToken::new(),
        }
    }

    /// Lets the caller stop a run early. Candidates that have not produced an
    /// outcome by then are recorded as [`UnreachableCause::Cancelled`].
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub async fn run<P: Probe>(
        &self,
        target: &Target,
        candidates: Vec<P::Candidate>,
        probe: Arc<P>,
    ) -> Result<Report<P::Candidate>, EngineError> {
        let started = Instant::now();
        let expected = candidates.len();
        let limiter = ConcurrencyLimiter::new(self.settings.concurrency())?;
        let aggregator = Arc::new(Aggregator::with_capacity(expected));
        let shared_target = Arc::new(target.clone());

        debug!(
            host = %target,
            candidates = expected,
            ceiling = limiter.ceiling(),
            "starting probe run"
        );

        let mut workers: JoinSet<Result<(), EngineError>> = JoinSet::new();
        let mut queue = candidates.into_iter();

        for candidate in queue.by_ref() {
            let slot = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => None,
                slot = limiter.acquire() => Some(slot),
            };
            let Some(slot) = slot else {
                aggregator.record(candidate, cancelled())?;
                break;
            };
            let slot = slot?;

            workers.spawn(work(
                Arc::clone(&probe),
                Arc::clone(&shared_target),
                candidate,
                slot,
                self.settings.probe_timeout(),
                self.cancel.clone(),
                Arc::clone(&aggregator),
            ));

            while let Some(joined) = workers.try_join_next() {
                settle(joined)?;
            }
        }

        for candidate in queue {
            aggregator.record(candidate, cancelled())?;
        }

        while let Some(joined) = workers.join_next().await {
            settle(joined)?;
        }

        let report = aggregator.finalize(target.clone(), started.elapsed())?;
        if report.len() != expected {
            return Err(EngineError::MissingOutcomes {
                expected,
                recorded: report.len(),
            });
        }

        let counts = report.counts();
        debug!(
            host = %target,
            success = counts.success,
            not_found = counts.not_found,
            unreachable = counts.unreachable,
            elapsed_ms = report.elapsed().as_millis() as u64,
            "probe run finished"
        );

        Ok(report)
    }
}

async fn work<P: Probe>(
    probe: Arc<P>,
    target: Arc<Target>,
    candidate: P::Candidate,
    slot: Slot,
    probe_timeout: Duration,
    cancel: CancellationToken,
    aggregator: Arc<Aggregator<P::Candidate>>,
) -> Result<(), EngineError> {
    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => cancelled(),
        outcome = guarded(probe.probe(&target, &candidate), probe_timeout) => outcome,
    };
    drop(slot);

    trace!(candidate = %candidate, outcome = ?outcome, "probe finished");
    aggregator.record(candidate, outcome)
}

/// Runs a probe under the timeout and turns a panic into an outcome.
async fn guarded<F>(probe: F, probe_timeout: Duration) -> ProbeOutcome
where
    F: Future<Output = ProbeOutcome>,
{
    match tokio::time::timeout(probe_timeout, AssertUnwindSafe(probe).catch_unwind()).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(payload)) => ProbeOutcome::unreachable(UnreachableCause::Panicked(
            panic_message(payload.as_ref()),
        )),
        Err(_elapsed) => ProbeOutcome::unreachable(UnreachableCause::Timeout),
    }
}

fn settle(joined: Result<Result<(), EngineError>, JoinError>) -> Result<(), EngineError> {
    joined.map_err(|e| EngineError::WorkerLost(e.to_string()))?
}

fn cancelled() -> ProbeOutcome {
    ProbeOutcome::unreachable(UnreachableCause::Cancelled)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::probe_fn;
    use recon_common::outcome::Evidence;
    use std::collections::HashMap;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn target() -> Target {
        Target::from_str("example.com").unwrap()
    }

    fn settings(concurrency: usize) -> EngineSettings {
        EngineSettings::new(concurrency, Duration::from_secs(5)).unwrap()
    }

    fn parity_probe() -> Arc<impl Probe<Candidate = u16>> {
        Arc::new(probe_fn(|_, port: u16| async move {
            if port % 2 == 0 {
                ProbeOutcome::open()
            } else {
                ProbeOutcome::unreachable(UnreachableCause::Refused)
            }
        }))
    }

    #[tokio::test]
    async fn every_candidate_yields_exactly_one_outcome() {
        let engine = ProbeEngine::new(settings(7));
        let candidates: Vec<u16> = (1..=200).collect();

        let report = engine.run(&target(), candidates, parity_probe()).await.unwrap();

        assert_eq!(report.len(), 200);
        let counts = report.counts();
        assert_eq!(counts.success + counts.not_found + counts.unreachable, 200);
        assert_eq!(counts.success, 100);
        assert_eq!(counts.unreachable, 100);
    }

    #[tokio::test]
    async fn repeated_runs_agree_per_candidate() {
        let engine = ProbeEngine::new(settings(16));
        let candidates: Vec<u16> = (1..=64).collect();

        let first = engine.run(&target(), candidates.clone(), parity_probe()).await.unwrap();
        let second = engine.run(&target(), candidates.clone(), parity_probe()).await.unwrap();

        let index = |report: &Report<u16>| -> HashMap<u16, ProbeOutcome> {
            report
                .findings()
                .iter()
                .map(|f| (f.candidate, f.outcome.clone()))
                .collect()
        };
        assert_eq!(index(&first), index(&second));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn in_flight_never_exceeds_ceiling() {
        for ceiling in [1, 3, 20] {
            let active = Arc::new(AtomicUsize::new(0));
            let peak = Arc::new(AtomicUsize::new(0));
            let (a, p) = (Arc::clone(&active), Arc::clone(&peak));
            let probe = Arc::new(probe_fn(move |_, _port: u16| {
                let (active, peak) = (Arc::clone(&a), Arc::clone(&p));
                async move {
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(2)).await;
                    active.fetch_sub(1, Ordering::SeqCst);
                    ProbeOutcome::open()
                }
            }));

            let engine = ProbeEngine::new(settings(ceiling));
            let report = engine
                .run(&target(), (1..=120).collect(), probe)
                .await
                .unwrap();

            assert_eq!(report.len(), 120);
            let observed = peak.load(Ordering::SeqCst);
            assert!(observed <= ceiling, "peak {observed} exceeded ceiling {ceiling}");
            assert!(observed >= 1);
        }
    }

    #[tokio::test]
    async fn panicking_probes_release_their_slots() {
        let exploding = Arc::new(probe_fn(|_, port: u16| async move {
            if port > 0 {
                panic!("probe for {port} failed internally");
            }
            ProbeOutcome::open()
        }));
        let engine = ProbeEngine::new(settings(4));
        let report = engine
            .run(&target(), (1..=32).collect(), exploding)
            .await
            .unwrap();

        assert_eq!(report.len(), 32);
        assert_eq!(report.counts().unreachable, 32);
        assert!(report.unreachable().all(|(_, cause)| matches!(cause, UnreachableCause::Panicked(msg) if msg.contains("failed internally"))));

        let serial = ProbeEngine::new(settings(1));
        let follow_up = tokio::time::timeout(
            Duration::from_secs(5),
            serial.run(&target(), (1..=10).collect(), parity_probe()),
        )
        .await
        .expect("run with ceiling 1 should not deadlock")
        .unwrap();
        assert_eq!(follow_up.len(), 10);
    }

    #[tokio::test]
    async fn single_open_port_among_refusals() {
        let stub = Arc::new(probe_fn(|_, port: u16| async move {
            match port {
                2 => ProbeOutcome::open(),
                _ => ProbeOutcome::unreachable(UnreachableCause::Refused),
            }
        }));

        let report = ProbeEngine::new(settings(3))
            .run(&target(), vec![1, 2, 3], stub)
            .await
            .unwrap();

        assert_eq!(report.len(), 3);
        assert_eq!(report.open_ports(), vec![2]);
        assert_eq!(report.outcome_of(&1), Some(&ProbeOutcome::unreachable(UnreachableCause::Refused)));
        assert_eq!(report.outcome_of(&3), Some(&ProbeOutcome::unreachable(UnreachableCause::Refused)));
    }

    #[tokio::test]
    async fn empty_candidate_list_returns_empty_report() {
        let engine = ProbeEngine::new(settings(1));
        let report = engine.run(&target(), Vec::new(), parity_probe()).await.unwrap();

        assert!(report.is_empty());
        assert_eq!(report.counts().total(), 0);
        assert_eq!(report.target(), &target());
    }

    #[tokio::test(start_paused = true)]
    async fn ceiling_of_one_serialises_probes() {
        let delay = Duration::from_millis(40);
        let slow = Arc::new(probe_fn(move |_, _port: u16| async move {
            tokio::time::sleep(delay).await;
            ProbeOutcome::open()
        }));

        let started = tokio::time::Instant::now();
        let report = ProbeEngine::new(settings(1))
            .run(&target(), (1..=50).collect(), slow)
            .await
            .unwrap();
        let elapsed = started.elapsed();

        assert_eq!(report.counts().success, 50);
        assert!(elapsed >= delay * 50, "finished in {elapsed:?}");
        assert!(elapsed < delay * 51, "finished in {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn slow_probe_is_cut_off_by_the_engine_timeout() {
        let stuck = Arc::new(probe_fn(|_, port: u16| async move {
            if port == 2 {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            ProbeOutcome::open()
        }));
        let engine = ProbeEngine::new(EngineSettings::new(4, Duration::from_millis(500)).unwrap());

        let report = engine.run(&target(), vec![1, 2, 3], stuck).await.unwrap();

        assert_eq!(report.outcome_of(&2), Some(&ProbeOutcome::unreachable(UnreachableCause::Timeout)));
        assert_eq!(
            report.outcome_of(&1),
            Some(&ProbeOutcome::Success { evidence: Evidence::Open })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_marks_unfinished_candidates() {
        let cancel = CancellationToken::new();
        let slow = Arc::new(probe_fn(|_, _port: u16| async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            ProbeOutcome::open()
        }));
        let engine = ProbeEngine::new(EngineSettings::new(2, Duration::from_secs(60)).unwrap())
            .with_cancellation(cancel.clone());

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(2500)).await;
            trigger.cancel();
        });

        let report = engine.run(&target(), (1..=20).collect(), slow).await.unwrap();

        assert_eq!(report.len(), 20);
        let counts = report.counts();
        assert_eq!(counts.success, 4);
        assert_eq!(counts.unreachable, 16);
        assert!(report
            .unreachable()
            .all(|(_, cause)| *cause == UnreachableCause::Cancelled));
    }
}
