//! Status-line logging macros.
//!
//! Console output picks its status symbol from the level and target of each
//! event: `success!` lines get `[+]`, `info!` lines `[*]`, `warn!` lines `[!]`
//! and `error!` lines `[-]`.

/// Target used by [`success!`](crate::success) so formatters can tell a positive
/// finding apart from a plain informational line.
pub const SUCCESS_TARGET: &str = "recon::success";

/// Target used for raw console lines that must be printed without a status symbol.
pub const PRINT_TARGET: &str = "recon::print";

/// Emits an `INFO` event tagged as a positive finding.
#[macro_export]
macro_rules! success {
    ($($arg:tt)+) => {
        $crate::tracing::info!(target: "recon::success", $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::tracing::info!(target: "recon::status", $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::tracing::warn!(target: "recon::status", $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::tracing::error!(target: "recon::status", $($arg)+)
    };
}
