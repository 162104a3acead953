//! Debounced scheduling of search requests.
//!
//! Every keystroke replaces the pending timer, so only the last input within
//! the quiet window reaches the option source.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Default quiet window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Owns at most one pending timer task.
///
/// Scheduling aborts the previous timer. Dropping the debouncer aborts the
/// pending timer too, so nothing fires after the owner is gone.
#[derive(Debug)]
pub struct Debouncer {
    /// Quiet window.
    delay: Duration,
    /// The pending timer, if any.
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet window.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The quiet window.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `action` once the quiet window elapses, replacing any pending one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        }));
    }

    /// Cancel the pending timer. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    /// Whether a timer is still waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn send(tx: &mpsc::UnboundedSender<&'static str>, value: &'static str) -> impl Future<Output = ()> {
        let tx = tx.clone();
        async move {
            let _ = tx.send(value);
        }
    }

    fn debouncer() -> Debouncer {
        Debouncer::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }

    #[test]
    fn test_delay() {
        assert_eq!(debouncer().delay(), Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_quiet_window() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = debouncer();

        debouncer.schedule(send(&tx, "ru"));
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().unwrap(), "ru");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_schedules_coalesce_to_last() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = debouncer();

        debouncer.schedule(send(&tx, "r"));
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule(send(&tx, "ru"));
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule(send(&tx, "rus"));

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(rx.try_recv().unwrap(), "rus");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = debouncer();

        debouncer.schedule(send(&tx, "ru"));
        assert!(debouncer.cancel());
        assert!(!debouncer.is_pending());
        assert!(!debouncer.cancel());

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let mut debouncer = debouncer();
            debouncer.schedule(send(&tx, "ru"));
        }

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(rx.try_recv().is_err());
    }
}
