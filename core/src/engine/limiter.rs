//! Counting semaphore that caps how many probes are in flight.
//!
//! A [`Slot`] is the only way to hold capacity. It goes back to the pool when
//! dropped, so a slot is released exactly once on every path: normal return,
//! early `?`, cancellation, or a panic unwinding through the worker.

use std::sync::Arc;

use recon_common::error::{ConfigError, EngineError};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    ceiling: usize,
}

/// One unit of in-flight capacity.
#[derive(Debug)]
pub struct Slot {
    _permit: OwnedSemaphorePermit,
}

impl ConcurrencyLimiter {
    pub fn new(ceiling: usize) -> Result<Self, ConfigError> {
        if ceiling == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(Self {
            semaphore: Arc::new(Semaphore::new(ceiling)),
            ceiling,
        })
    }

    /// Waits until fewer than `ceiling` slots are held. Admission is FIFO.
    pub async fn acquire(&self) -> Result<Slot, EngineError> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| EngineError::LimiterClosed)?;
        Ok(Slot { _permit: permit })
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    pub fn in_flight(&self) -> usize {
        self.ceiling - self.semaphore.available_permits()
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
    use std::time::Duration;
    use tokio::time::timeout;

    #[test]
    fn zero_ceiling_is_rejected() {
        assert!(matches!(
            ConcurrencyLimiter::new(0),
            Err(ConfigError::ZeroConcurrency)
        ));
    }

    #[tokio::test]
    async fn acquire_blocks_at_ceiling_and_resumes_on_drop() {
        let limiter = ConcurrencyLimiter::new(2).unwrap();
        let first = limiter.acquire().await.unwrap();
        let _second = limiter.acquire().await.unwrap();
        assert_eq!(limiter.in_flight(), 2);

        let blocked = timeout(Duration::from_millis(20), limiter.acquire()).await;
        assert!(blocked.is_err(), "third acquire should wait for a free slot");

        drop(first);
        assert_eq!(limiter.in_flight(), 1);
        let third = timeout(Duration::from_millis(20), limiter.acquire()).await;
        assert!(third.is_ok());
    }

    #[tokio::test]
    async fn slot_is_released_when_holder_panics() {
        let limiter = ConcurrencyLimiter::new(1).unwrap();
        let worker = limiter.clone();
        let handle = tokio::spawn(async move {
            let _slot = worker.acquire().await.unwrap();
            panic!("probe blew up");
        });
        assert!(handle.await.unwrap_err().is_panic());

        assert_eq!(limiter.in_flight(), 0);
        assert!(timeout(Duration::from_millis(20), limiter.acquire()).await.is_ok());
    }
}
