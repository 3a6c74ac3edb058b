//! Retry policy for fallible async operations.
//!
//! A [`RetryPolicy`] is plain data: how many attempts to make and how long to
//! wait between them. It knows nothing about the operation it drives. Attempts
//! run strictly one after another and an attempt in flight is never cancelled.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, warn};

/// Terminal failure of a retried operation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RetryError<E> {
    #[error("failed after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: E },
    /// The predicate passed to [`RetryPolicy::run_while`] refused to retry.
    #[error("{0}")]
    Permanent(E),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(500))
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts, delay }
    }

    /// Wrap `op` so that every [`Retry::call`] goes through this policy.
    pub fn wrap<F>(self, op: F) -> Retry<F> {
        Retry { op, policy: self }
    }

    /// Run `op` until it succeeds or the attempts are used up.
    pub async fn run<F, Fut, T, E>(&self, op: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.run_while(op, |_| true).await
    }

    /// Like [`run`](Self::run), but gives up at once on errors for which
    /// `should_retry` returns false.
    pub async fn run_while<F, Fut, T, E, P>(
        &self,
        mut op: F,
        should_retry: P,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
        P: Fn(&E) -> bool,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if !should_retry(&e) => return Err(RetryError::Permanent(e)),
                Err(e) if attempt >= max_attempts => {
                    error!(attempts = attempt, error = %e, "Retries exhausted");
                    return Err(RetryError::Exhausted { attempts: attempt, last: e });
                }
                Err(e) => {
                    warn!(attempt, max_attempts, error = %e, "Attempt failed, retrying");
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// An operation bound to a [`RetryPolicy`].
///
/// `call` takes the same argument and yields the same success value as the
/// wrapped operation; the argument is cloned for each attempt.
pub struct Retry<F> {
    op: F,
    policy: RetryPolicy,
}

impl<F> Retry<F> {
    pub async fn call<A, Fut, T, E>(&self, args: A) -> Result<T, RetryError<E>>
    where
        F: Fn(A) -> Fut,
        A: Clone,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.policy.run(|| (self.op)(args.clone())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    type Attempt = std::future::Ready<Result<&'static str, String>>;

    fn fail_times(failures: u32, calls: Arc<AtomicU32>) -> impl FnMut() -> Attempt {
        move || {
            let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= failures {
                std::future::ready(Err(format!("failure {call}")))
            } else {
                std::future::ready(Ok("done"))
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_two_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::default();

        let result = policy.run(fail_times(2, calls.clone())).await;

        assert_eq!(result, Ok("done"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausts_after_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::default();

        let result = policy.run(fail_times(u32::MAX, calls.clone())).await;

        assert_eq!(
            result,
            Err(RetryError::Exhausted { attempts: 3, last: "failure 3".to_string() })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            result.unwrap_err().to_string(),
            "failed after 3 attempts: failure 3"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_success_stops_immediately() {
        let calls = Arc::new(AtomicU32::new(0));
        let start = tokio::time::Instant::now();

        let result = RetryPolicy::default().run(fail_times(0, calls.clone())).await;

        assert_eq!(result, Ok("done"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_between_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new(3, Duration::from_millis(500));
        let start = tokio::time::Instant::now();

        let _ = policy.run(fail_times(u32::MAX, calls)).await;

        // Two waits: after the first and second attempts, none after the last.
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1000));
        assert!(elapsed < Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_error_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));

        let result = RetryPolicy::default()
            .run_while(fail_times(u32::MAX, calls.clone()), |_| false)
            .await;

        assert_eq!(result, Err(RetryError::Permanent("failure 1".to_string())));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_still_runs_once() {
        let calls = Arc::new(AtomicU32::new(0));

        let result = RetryPolicy::new(0, Duration::ZERO)
            .run(fail_times(u32::MAX, calls.clone()))
            .await;

        assert!(matches!(result, Err(RetryError::Exhausted { attempts: 1, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrapped_operation_receives_original_arguments() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let recorder = seen.clone();
        let retrying = RetryPolicy::new(3, Duration::from_millis(10)).wrap(move |n: u32| {
            let mut seen = recorder.lock().unwrap();
            seen.push(n);
            let attempt = seen.len();
            async move {
                if attempt < 2 {
                    Err(format!("attempt {attempt} failed"))
                } else {
                    Ok(n * 2)
                }
            }
        });

        assert_eq!(retrying.call(21).await, Ok(42));
        assert_eq!(*seen.lock().unwrap(), vec![21, 21]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrapped_operation_exhausts_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let retrying = RetryPolicy::default().wrap(move |name: &'static str| {
            let call = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Err::<(), String>(format!("{name} failed on call {call}")) }
        });

        let result = retrying.call("save").await;

        assert_eq!(
            result,
            Err(RetryError::Exhausted { attempts: 3, last: "save failed on call 3".to_string() })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
