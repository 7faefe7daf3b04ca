//! Liveness guard for in-flight backend calls
//!
//! A flow keeps issuing requests on behalf of whoever is driving it. Once
//! that owner goes away (the user quit, pressed Ctrl+C, or started over) any
//! response still on its way must be dropped without touching state.

use crate::error::{ExpertosyError, ExpertosyResult};
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Cloneable handle telling whether the flow's owner is still around
#[derive(Debug, Clone, Default)]
pub struct LivenessGuard {
    token: CancellationToken,
}

impl LivenessGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the owner as gone; pending and future calls resolve to `Cancelled`
    pub fn teardown(&self) {
        if !self.token.is_cancelled() {
            debug!("Liveness guard torn down");
        }
        self.token.cancel();
    }

    pub fn is_alive(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Fail with `Cancelled` once the owner is gone
    pub fn ensure_alive(&self) -> ExpertosyResult<()> {
        if self.is_alive() {
            Ok(())
        } else {
            Err(ExpertosyError::Cancelled)
        }
    }

    /// Race `future` against teardown.
    ///
    /// The result is only handed back if the owner is still alive when it
    /// arrives.
    pub async fn run<F, T>(&self, future: F) -> ExpertosyResult<T>
    where
        F: Future<Output = ExpertosyResult<T>>,
    {
        self.ensure_alive()?;

        let result = tokio::select! {
            result = future => result,
            _ = self.token.cancelled() => {
                debug!("Discarding in-flight request after teardown");
                return Err(ExpertosyError::Cancelled);
            }
        };

        self.ensure_alive()?;
        result
    }

    /// A guard that is torn down together with this one but can also be
    /// torn down on its own
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_returns_result_while_alive() {
        let guard = LivenessGuard::new();
        let value = guard.run(async { Ok(42) }).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_run_after_teardown_is_cancelled() {
        let guard = LivenessGuard::new();
        guard.teardown();
        let result = guard.run(async { Ok(1) }).await;
        assert!(matches!(result, Err(ExpertosyError::Cancelled)));
        assert!(!guard.is_alive());
    }

    #[tokio::test]
    async fn test_teardown_during_request_discards_response() {
        let guard = LivenessGuard::new();
        let remote = guard.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            remote.teardown();
        });

        let result = guard
            .run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok("late response")
            })
            .await;
        assert!(matches!(result, Err(ExpertosyError::Cancelled)));
    }

    #[tokio::test]
    async fn test_errors_pass_through() {
        let guard = LivenessGuard::new();
        let result: ExpertosyResult<()> = guard
            .run(async { Err(ExpertosyError::network("offline")) })
            .await;
        assert!(matches!(result, Err(ExpertosyError::Network { .. })));
    }

    #[test]
    fn test_child_follows_parent() {
        let parent = LivenessGuard::new();
        let child = parent.child();
        child.teardown();
        assert!(parent.is_alive());

        let child = parent.child();
        parent.teardown();
        assert!(child.ensure_alive().is_err());
    }
}
