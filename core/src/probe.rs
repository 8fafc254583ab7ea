//! Probe functions: the only part of a run that differs between use cases.
//!
//! A probe maps one candidate against one target to one [`ProbeOutcome`]. It
//! performs a single network operation, never touches shared state, and never
//! fails: transport problems come back as [`ProbeOutcome::Unreachable`].

use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;
use recon_common::candidate::Candidate;
use recon_common::outcome::ProbeOutcome;
use recon_common::target::Target;

pub mod directory;
pub mod http;
pub mod port;
pub mod subdomain;

pub use directory::DirectoryProbe;
pub use port::PortProbe;
pub use subdomain::SubdomainProbe;

#[async_trait]
pub trait Probe: Send + Sync + 'static {
    type Candidate: Candidate;

    async fn probe(&self, target: &Target, candidate: &Self::Candidate) -> ProbeOutcome;
}

/// Adapts a plain async closure into a [`Probe`].
pub struct FnProbe<C, F> {
    f: F,
    _candidate: PhantomData<fn() -> C>,
}

pub fn probe_fn<C, F, Fut>(f: F) -> FnProbe<C, F>
where
    C: Candidate,
    F: Fn(Target, C) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ProbeOutcome> + Send + 'static,
{
    FnProbe {
        f,
        _candidate: PhantomData,
    }
}

#[async_trait]
impl<C, F, Fut> Probe for FnProbe<C, F>
where
    C: Candidate,
    F: Fn(Target, C) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ProbeOutcome> + Send + 'static,
{
    type Candidate = C;

    async fn probe(&self, target: &Target, candidate: &C) -> ProbeOutcome {
        (self.f)(target.clone(), candidate.clone()).await
    }
}
