//! Owned handles for periodic background loops.
//!
//! Every loop (breathing ticks, blob frames) is spawned through
//! [`ScheduledTask`], which owns the single [`CancellationToken`] for that
//! loop. Cancelling happens on `shutdown()`, on `cancel()`, and when the
//! handle is dropped, so a loop never outlives the component that owns it.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Shortest period a loop may tick at. `tokio::time::interval` rejects zero.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

pub struct ScheduledTask {
    name: &'static str,
    token: CancellationToken,
    join: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    /// Spawn `body` with a fresh cancellation token. The body is expected to
    /// select on `token.cancelled()` and return promptly once it fires.
    pub fn spawn<F, Fut>(name: &'static str, body: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let join = tokio::spawn(body(token.child_token()));
        tracing::debug!(task = name, "Scheduled task started");

        Self {
            name,
            token,
            join: Some(join),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.join.as_ref().map_or(true, |join| join.is_finished())
    }

    /// Cancel the loop and wait for it to exit.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(join) = self.join.take() {
            if let Err(e) = join.await {
                tracing::error!(task = self.name, error = %e, "Scheduled task panicked");
            }
        }
        tracing::debug!(task = self.name, "Scheduled task stopped");
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    async fn count_until_cancelled(token: CancellationToken, counter: Arc<AtomicUsize>) {
        let mut interval = tokio::time::interval(Duration::from_millis(10));
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = interval.tick() => {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_the_loop() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task = ScheduledTask::spawn("counter", {
            let counter = counter.clone();
            move |token| count_until_cancelled(token, counter)
        });

        tokio::time::sleep(Duration::from_millis(55)).await;
        task.shutdown().await;
        let after_shutdown = counter.load(Ordering::SeqCst);
        assert!(after_shutdown > 0);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(counter.load(Ordering::SeqCst), after_shutdown);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_the_loop() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task = ScheduledTask::spawn("counter", {
            let counter = counter.clone();
            move |token| count_until_cancelled(token, counter)
        });
        tokio::time::sleep(Duration::from_millis(25)).await;

        drop(task);
        // Let the loop observe cancellation.
        tokio::time::sleep(Duration::from_millis(1)).await;
        let after_drop = counter.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(counter.load(Ordering::SeqCst), after_drop);
    }
}
