//! # recon-core
//!
//! The probe engine and everything that runs on top of it.
//!
//! * [`engine`] fans candidates out over a bounded pool of workers and
//!   collects one outcome per candidate.
//! * [`probe`] holds the per-use-case probe adapters (TCP connect, subdomain
//!   GET, directory GET).
//! * [`recon`] wires adapters, candidates and engine into the three scans.
//! * [`httpcheck`], [`vulncheck`], [`intel`] and [`markdown`] are the
//!   collaborators that consume finished reports.

pub mod engine;
pub mod httpcheck;
pub mod intel;
pub mod markdown;
pub mod probe;
pub mod recon;
pub mod vulncheck;
