//! # Recon Common
//!
//! Domain types shared by the probe engine and the command line front end.
//!
//! * [`target`]: the normalised host a run is pointed at.
//! * [`candidate`]: the finite sets of ports, labels and path segments to probe.
//! * [`outcome`]: the classified result of one probe.
//! * [`report`]: the immutable snapshot produced once a run has finished.

pub mod candidate;
pub mod config;
pub mod error;
pub mod log;
pub mod outcome;
pub mod report;
pub mod target;

#[doc(hidden)]
pub use tracing;
