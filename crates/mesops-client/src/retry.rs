//! Retry orchestration for a single call.
//!
//! Attempts run sequentially on a spawned task. The caller races that task
//! against the call's [`CallContext`]; whichever finishes first decides the
//! outcome, and the task is aborted if the context wins.

use std::future::Future;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::backoff::RetryState;
use crate::context::CallContext;
use crate::error::{ClientError, ClientResult};

/// Aborts the wrapped task when dropped, so an abandoned call never keeps
/// its request in flight.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Runs `attempt` up to `max_retries + 1` times.
///
/// Only retryable errors (see [`ClientError::is_retryable`]) trigger another
/// attempt; an HTTP status error or a decode error is returned as is. When
/// every attempt fails the last error is wrapped in
/// [`ClientError::RetriesExhausted`]. Cancellation or the deadline of `ctx`
/// override whatever the attempts produce.
pub async fn run<T, F, Fut>(ctx: &CallContext, max_retries: u32, attempt: F) -> ClientResult<T>
where
    T: Send + 'static,
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ClientResult<T>> + Send + 'static,
{
    ctx.check()?;

    let mut task = AbortOnDrop(tokio::spawn(retry_loop(max_retries, attempt)));
    tokio::select! {
        biased;
        err = ctx.done() => {
            debug!(error = %err, "Call abandoned");
            Err(err)
        }
        joined = &mut task.0 => match joined {
            Ok(result) => result,
            Err(e) => Err(ClientError::Task(e.to_string())),
        },
    }
}

async fn retry_loop<T, F, Fut>(max_retries: u32, mut attempt: F) -> ClientResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ClientResult<T>>,
{
    let mut state = RetryState::new(max_retries);
    loop {
        if let Some(delay) = state.delay() {
            debug!(
                attempt = state.attempt(),
                max = state.max_retries(),
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Scheduling retry"
            );
            tokio::time::sleep(delay).await;
        }

        let started = Instant::now();
        let result = attempt().await;
        state.record_rtt(started.elapsed());

        match result {
            Ok(value) => {
                trace!(attempt = state.attempt(), "Attempt succeeded");
                return Ok(value);
            }
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) => {
                debug!(attempt = state.attempt(), error = %e, "Attempt failed");
                if !state.advance() {
                    return Err(ClientError::RetriesExhausted {
                        retries: max_retries,
                        source: Box::new(e),
                    });
                }
            }
        }
    }
}
