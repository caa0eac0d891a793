//! Dispatch rate limiting
//!
//! An exclusive lock with a cooldown. A [`RatePermit`] covers one whole
//! dispatch sequence, retries included; the next permit is granted no
//! earlier than `interval` after the previous one was released.

use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// Limits dispatch sequences to one per interval across every holder of the limiter
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

/// Exclusive right to dispatch, released on drop
#[derive(Debug)]
pub struct RatePermit<'a> {
    next_slot: MutexGuard<'a, Option<Instant>>,
    interval: Duration,
    started: Instant,
}

impl RatePermit<'_> {
    /// When the permit became usable
    pub fn started(&self) -> Instant {
        self.started
    }
}

impl Drop for RatePermit<'_> {
    fn drop(&mut self) {
        *self.next_slot = Some(Instant::now() + self.interval);
    }
}

impl RateLimiter {
    /// Limiter granting one permit per `interval`
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    /// One dispatch per second
    pub fn per_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    /// Minimum gap between one release and the next grant
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait until no other permit is held and the interval has passed
    pub async fn acquire(&self) -> RatePermit<'_> {
        let next_slot = self.next_slot.lock().await;

        if let Some(slot) = *next_slot {
            let wait = slot.saturating_duration_since(Instant::now());
            if !wait.is_zero() {
                debug!("Rate limited, waiting {:?}", wait);
                sleep_until(slot).await;
            }
        }

        RatePermit {
            next_slot,
            interval: self.interval,
            started: Instant::now(),
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::per_second()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_first_permit_is_immediate() {
        let limiter = RateLimiter::per_second();
        let start = Instant::now();

        let permit = limiter.acquire().await;
        assert_eq!(permit.started(), start);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_permits_are_spaced() {
        let limiter = RateLimiter::per_second();

        let first = limiter.acquire().await.started();
        let second = limiter.acquire().await.started();
        let third = limiter.acquire().await.started();

        assert_eq!(second - first, Duration::from_secs(1));
        assert_eq!(third - second, Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_permit_waits_for_release() {
        let limiter = RateLimiter::per_second();

        let permit = limiter.acquire().await;
        tokio::time::sleep(Duration::from_millis(2500)).await;
        let released = Instant::now();
        drop(permit);

        let next = limiter.acquire().await.started();
        assert_eq!(next - released, Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_holders_never_overlap() {
        let limiter = Arc::new(RateLimiter::per_second());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let limiter = limiter.clone();
                tokio::spawn(async move {
                    let permit = limiter.acquire().await;
                    let start = permit.started();
                    tokio::time::sleep(Duration::from_millis(300)).await;
                    (start, Instant::now())
                })
            })
            .collect();

        let mut windows = Vec::new();
        for handle in handles {
            windows.push(handle.await.unwrap());
        }
        windows.sort();

        for pair in windows.windows(2) {
            let (_, prev_end) = pair[0];
            let (next_start, _) = pair[1];
            assert!(next_start - prev_end >= Duration::from_secs(1));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_limiter_does_not_bank_permits() {
        let limiter = RateLimiter::new(Duration::from_millis(500));
        drop(limiter.acquire().await);

        tokio::time::advance(Duration::from_secs(10)).await;

        let a = limiter.acquire().await.started();
        let b = limiter.acquire().await.started();
        assert_eq!(b - a, Duration::from_millis(500));
    }
}
