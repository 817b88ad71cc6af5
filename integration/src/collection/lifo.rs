use tokio::sync::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Notify;

/// An async last-in-first-out queue with an atomic [`Self::clear`].
///
/// Used to publish the desired-position snapshot (C7) onto a single-slot-like channel that a
/// broker's trader task drains: only the newest snapshot matters, so `clear` lets a new push
/// invalidate everything queued ahead of it without the producer and consumer racing.
#[derive(Debug)]
pub struct ClearableLifoQueue<T> {
    inner: Mutex<VecDeque<T>>,
    notify: Notify,
}

impl<T> Default for ClearableLifoQueue<T> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(VecDeque::new()),
            notify: Notify::new(),
        }
    }
}

impl<T> ClearableLifoQueue<T> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn push(&self, item: T) {
        let mut guard = self.inner.lock().await;
        guard.push_back(item);
        drop(guard);
        self.notify.notify_one();
    }

    /// Remove everything currently queued, without waking any waiter.
    pub async fn clear(&self) {
        self.inner.lock().await.clear();
    }

    /// Pop the most recently pushed item, waiting if the queue is empty.
    pub async fn pop(&self) -> T {
        loop {
            {
                let mut guard = self.inner.lock().await;
                if let Some(item) = guard.pop_back() {
                    return item;
                }
            }
            self.notify.notified().await;
        }
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pop_returns_most_recent_push() {
        let queue = ClearableLifoQueue::new();
        queue.push(1).await;
        queue.push(2).await;
        assert_eq!(queue.pop().await, 2);
        assert_eq!(queue.pop().await, 1);
    }

    #[tokio::test]
    async fn clear_drops_everything_queued() {
        let queue = ClearableLifoQueue::new();
        queue.push(1).await;
        queue.push(2).await;
        queue.clear().await;
        assert!(queue.is_empty().await);
    }
}
