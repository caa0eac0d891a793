//! Bounded retry that resolves to a fallback instead of an error

use std::fmt::Display;
use std::future::Future;
use tracing::{debug, warn};

/// Attempts made when the caller does not choose a count
pub const DEFAULT_RETRY_COUNT: u32 = 3;

/// Call `func` up to `count` times and return the first success.
///
/// Failures are logged and retried immediately. Once every attempt has
/// failed, `fallback` is returned; `count == 0` returns it without calling
/// `func` at all.
pub async fn retry<F, Fut, T, E>(func: F, fallback: T, count: u32) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    retry_with(func, fallback, count, |_| true).await
}

/// Like [`retry`], but stops early when `should_retry` rejects an error.
pub async fn retry_with<F, Fut, T, E, P>(mut func: F, fallback: T, count: u32, should_retry: P) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    P: Fn(&E) -> bool,
{
    for attempt in 1..=count {
        match func().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!("Succeeded on attempt {}/{}", attempt, count);
                }
                return value;
            }
            Err(e) => {
                warn!("Retry attempt {}/{} failed: {}", attempt, count, e);

                if !should_retry(&e) {
                    warn!("Error is not retryable, giving up");
                    break;
                }
            }
        }
    }

    fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn failing_until(
        succeed_on: u32,
        calls: &AtomicU32,
    ) -> impl FnMut() -> std::future::Ready<Result<String, String>> + '_ {
        move || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n >= succeed_on {
                std::future::ready(Ok("Y".to_string()))
            } else {
                std::future::ready(Err(format!("failure {}", n)))
            }
        }
    }

    #[tokio::test]
    async fn test_succeeds_on_third_attempt() {
        let calls = AtomicU32::new(0);
        let result = retry(failing_until(3, &calls), "X".to_string(), 3).await;

        assert_eq!(result, "Y");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausted_attempts_return_fallback() {
        let calls = AtomicU32::new(0);
        let result = retry(failing_until(u32::MAX, &calls), "X".to_string(), 3).await;

        assert_eq!(result, "X");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_count_never_calls() {
        let calls = AtomicU32::new(0);
        let result = retry(failing_until(1, &calls), "X".to_string(), 0).await;

        assert_eq!(result, "X");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_first_success_stops_loop() {
        let calls = AtomicU32::new(0);
        let result = retry(failing_until(1, &calls), "X".to_string(), DEFAULT_RETRY_COUNT).await;

        assert_eq!(result, "Y");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_permanent_error_short_circuits() {
        let calls = AtomicU32::new(0);
        let result = retry_with(
            failing_until(u32::MAX, &calls),
            "X".to_string(),
            3,
            |e: &String| !e.starts_with("failure"),
        )
        .await;

        assert_eq!(result, "X");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_retry_outside_runtime() {
        let calls = AtomicU32::new(0);
        let result = tokio_test::block_on(retry(failing_until(2, &calls), String::new(), 3));

        assert_eq!(result, "Y");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
