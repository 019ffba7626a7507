use popcorn_sources::ProviderError;
use std::future::Future;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A provider request running on its own task, owned by whoever issued it.
///
/// Dropping the value aborts the task, so a request superseded by a newer
/// one can never deliver its result. Aborting is cooperative: the task stops
/// at its next await point.
pub struct InFlight<T> {
    label: String,
    handle: JoinHandle<Result<T, ProviderError>>,
}

impl<T: Send + 'static> InFlight<T> {
    /// Spawn `request` on the current Tokio runtime
    pub fn spawn<F>(label: impl Into<String>, request: F) -> Self
    where
        F: Future<Output = Result<T, ProviderError>> + Send + 'static,
    {
        let label = label.into();
        debug!("Request started: {}", label);
        Self {
            label,
            handle: tokio::spawn(request),
        }
    }
}

impl<T> InFlight<T> {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Wait for the request to settle.
    ///
    /// Cancel-safe: dropping this future leaves the request running and a
    /// later call picks it up again. Must not be called again once it has
    /// returned `Some`. `None` means the task was cancelled.
    pub async fn join(&mut self) -> Option<Result<T, ProviderError>> {
        match (&mut self.handle).await {
            Ok(outcome) => {
                debug!("Request settled: {}", self.label);
                Some(outcome)
            }
            Err(e) if e.is_cancelled() => {
                debug!("Request cancelled: {}", self.label);
                None
            }
            Err(e) => {
                warn!("Request task failed: {}: {}", self.label, e);
                Some(Err(ProviderError::transport(None, format!("request task failed: {}", e))))
            }
        }
    }
}

impl<T> Drop for InFlight<T> {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            debug!("Cancelling request: {}", self.label);
        }
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::Notify;

    #[tokio::test]
    async fn test_join_returns_outcome() {
        let mut request = InFlight::spawn("ok", async { Ok::<_, ProviderError>(42) });
        assert_eq!(request.join().await, Some(Ok(42)));
    }

    #[tokio::test]
    async fn test_drop_cancels_task() {
        let gate = Arc::new(Notify::new());
        let finished = Arc::new(AtomicBool::new(false));

        let request = {
            let gate = Arc::clone(&gate);
            let finished = Arc::clone(&finished);
            InFlight::spawn("gated", async move {
                gate.notified().await;
                finished.store(true, Ordering::SeqCst);
                Ok::<_, ProviderError>(())
            })
        };
        tokio::task::yield_now().await;
        drop(request);

        gate.notify_one();
        tokio::task::yield_now().await;
        assert!(!finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_join_is_cancel_safe() {
        let gate = Arc::new(Notify::new());
        let mut request = {
            let gate = Arc::clone(&gate);
            InFlight::spawn("slow", async move {
                gate.notified().await;
                Ok::<_, ProviderError>("done")
            })
        };

        // Give up waiting once, then wait again
        tokio::select! {
            _ = request.join() => panic!("request should still be pending"),
            _ = tokio::task::yield_now() => {}
        }

        gate.notify_one();
        assert_eq!(request.join().await, Some(Ok("done")));
    }

    #[tokio::test]
    async fn test_panicking_task_becomes_transport_error() {
        let mut request = InFlight::spawn("boom", async {
            if true {
                panic!("provider exploded");
            }
            Ok::<(), ProviderError>(())
        });

        let outcome = request.join().await.unwrap();
        assert!(matches!(outcome, Err(ProviderError::Transport { status: None, .. })));
    }
}
