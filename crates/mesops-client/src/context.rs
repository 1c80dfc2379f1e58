//! Per-call cancellation and deadlines.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::ClientError;

/// Governs one call: every attempt, every backoff wait and, for streams,
/// every frame read.
///
/// Cloning shares the cancellation token.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    token: CancellationToken,
    deadline: Option<(Instant, Duration)>,
}

impl CallContext {
    /// A context that never times out and is never cancelled unless
    /// [`CallContext::cancel`] is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context that times out `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new().timeout(timeout)
    }

    /// A context driven by an existing token.
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Sets the deadline to `timeout` from now.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some((Instant::now() + timeout, timeout));
        self
    }

    /// A context cancelled together with this one, but cancellable on its own.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// The error this context ends with, if it has already ended.
    pub fn check(&self) -> Result<(), ClientError> {
        if self.token.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        match self.deadline {
            Some((deadline, timeout)) if Instant::now() >= deadline => {
                Err(ClientError::TimedOut(timeout))
            }
            _ => Ok(()),
        }
    }

    /// Resolves once the context is cancelled or its deadline passes.
    pub async fn done(&self) -> ClientError {
        match self.deadline {
            Some((deadline, timeout)) => tokio::select! {
                biased;
                _ = self.token.cancelled() => ClientError::Cancelled,
                _ = tokio::time::sleep_until(deadline) => ClientError::TimedOut(timeout),
            },
            None => {
                self.token.cancelled().await;
                ClientError::Cancelled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancel() {
        let ctx = CallContext::new();
        assert!(ctx.check().is_ok());

        let clone = ctx.clone();
        clone.cancel();
        assert!(matches!(ctx.check(), Err(ClientError::Cancelled)));
        assert!(matches!(ctx.done().await, ClientError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline() {
        let ctx = CallContext::with_timeout(Duration::from_secs(5));
        let err = ctx.done().await;
        assert!(matches!(err, ClientError::TimedOut(t) if t == Duration::from_secs(5)));
        assert!(matches!(ctx.check(), Err(ClientError::TimedOut(_))));
    }

    #[tokio::test]
    async fn test_child_follows_parent() {
        let parent = CallContext::new();
        let child = parent.child();
        child.cancel();
        assert!(parent.check().is_ok());

        let child = parent.child();
        parent.cancel();
        assert!(matches!(child.check(), Err(ClientError::Cancelled)));
    }
}
