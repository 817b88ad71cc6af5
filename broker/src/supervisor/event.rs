use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

/// The manual-reset event `E` ("trader-should-be-cancelled") shared between Observer and
/// Restarter (§4.5). Set by the observer on every snapshot read while `Provisioning`, waited on
/// by the restarter, cleared only by the restarter.
#[derive(Debug, Default)]
pub struct ManualResetEvent {
    flag: AtomicBool,
    notify: Notify,
}

impl ManualResetEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.flag.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Suspends until [`Self::set`] has been called since the last [`Self::reset`]. Registers
    /// for notification before checking the flag so a `set` racing with `wait` is never missed.
    pub async fn wait(&self) {
        loop {
            let notified = self.notify.notified();
            if self.is_set() {
                return;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn wait_returns_immediately_once_set() {
        let event = ManualResetEvent::new();
        event.set();
        event.wait().await;
    }

    #[tokio::test]
    async fn wait_blocks_until_set_from_another_task() {
        let event = Arc::new(ManualResetEvent::new());
        let waiter = Arc::clone(&event);
        let handle = tokio::spawn(async move {
            waiter.wait().await;
        });
        tokio::task::yield_now().await;
        event.set();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn reset_clears_the_flag() {
        let event = ManualResetEvent::new();
        event.set();
        event.reset();
        assert!(!event.is_set());
    }
}
