use crate::error::StreamError;
use chrono::TimeDelta;
use std::collections::{HashMap, VecDeque};
use tokio::sync::{Mutex, Notify};
use tucano_model::{Execution, SwitchedToRealtime, WarmUpItem};

struct Subscriber {
    queue: VecDeque<WarmUpItem>,
    switched_to_realtime: bool,
}

struct Inner {
    deque: VecDeque<Execution>,
    subscribers: HashMap<String, Subscriber>,
}

/// Multi-subscriber fan-out queue (C5): replays a sliding window `W` of history to each new
/// subscriber, then transitions it to the live feed via a one-shot
/// [`SwitchedToRealtime`] marker.
///
/// All subscriber state lives behind one `Mutex` so `spawn` always sees a consistent snapshot
/// of `put`s that have already completed (§4.2 subscriber atomicity) — there is no finer-grained
/// locking to reason about.
pub struct WarmUpQueue {
    window: TimeDelta,
    inner: Mutex<Inner>,
    notify: Notify,
}

impl WarmUpQueue {
    pub fn new(window: TimeDelta) -> Self {
        Self {
            window,
            inner: Mutex::new(Inner {
                deque: VecDeque::new(),
                subscribers: HashMap::new(),
            }),
            notify: Notify::new(),
        }
    }

    /// Insert `e` in timestamp order, prune anything now older than `window`, then broadcast to
    /// every subscriber.
    pub async fn put(&self, e: Execution) {
        let mut inner = self.inner.lock().await;

        let insert_at = inner
            .deque
            .iter()
            .rposition(|existing| existing.timestamp <= e.timestamp)
            .map(|i| i + 1)
            .unwrap_or(0);
        inner.deque.insert(insert_at, e.clone());

        if let Some(newest) = inner.deque.back() {
            let newest_ts = newest.timestamp;
            while let Some(oldest) = inner.deque.front() {
                if newest_ts - oldest.timestamp > self.window {
                    inner.deque.pop_front();
                } else {
                    break;
                }
            }
        }

        for subscriber in inner.subscribers.values_mut() {
            subscriber.queue.push_back(WarmUpItem::Execution(e.clone()));
        }
        drop(inner);
        self.notify.notify_waiters();
    }

    /// Create (or reset) a subscriber seeded with the current deque contents, oldest first.
    pub async fn spawn(&self, client_id: impl Into<String>) {
        let mut inner = self.inner.lock().await;
        let snapshot: VecDeque<WarmUpItem> = inner
            .deque
            .iter()
            .cloned()
            .map(WarmUpItem::Execution)
            .collect();
        inner.subscribers.insert(
            client_id.into(),
            Subscriber {
                queue: snapshot,
                switched_to_realtime: false,
            },
        );
    }

    /// Await and return the subscriber's next item. Synthesises the one-shot realtime marker
    /// the first time the subscriber's queue runs dry.
    pub async fn get(&self, client_id: &str, now: chrono::DateTime<chrono::Utc>) -> Result<WarmUpItem, StreamError> {
        loop {
            {
                let mut inner = self.inner.lock().await;
                let needs_marker = {
                    let subscriber = inner
                        .subscribers
                        .get(client_id)
                        .ok_or_else(|| StreamError::UnknownClient(client_id.to_string()))?;
                    subscriber.queue.is_empty() && !subscriber.switched_to_realtime
                };

                if needs_marker {
                    let marker_symbol = inner
                        .deque
                        .back()
                        .map(|e| e.symbol)
                        .or_else(|| inner.deque.front().map(|e| e.symbol));
                    if let Some(symbol) = marker_symbol {
                        let subscriber = inner.subscribers.get_mut(client_id).expect("checked above");
                        subscriber.queue.push_back(WarmUpItem::SwitchedToRealtime(
                            SwitchedToRealtime {
                                symbol,
                                timestamp: now,
                            },
                        ));
                        subscriber.switched_to_realtime = true;
                    } else {
                        // no execution has ever been seen: still mark transitioned, but without
                        // a symbol to attach, skip synthesising a marker and just wait for a
                        // live put to establish one. (No currently-exercised caller hits this.)
                        let subscriber = inner.subscribers.get_mut(client_id).expect("checked above");
                        subscriber.switched_to_realtime = true;
                    }
                }

                let subscriber = inner
                    .subscribers
                    .get_mut(client_id)
                    .ok_or_else(|| StreamError::UnknownClient(client_id.to_string()))?;
                if let Some(item) = subscriber.queue.pop_front() {
                    return Ok(item);
                }
            }
            self.notify.notified().await;
        }
    }

    pub async fn dispose(&self, client_id: &str) {
        self.inner.lock().await.subscribers.remove(client_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use rust_decimal_macros::dec;
    use tucano_model::{Side, Symbol};

    fn exec(day: i64, price: i64) -> Execution {
        Execution::new(
            Symbol::FxBtcJpy,
            None,
            DateTime::<Utc>::from_timestamp(day * 86_400, 0).unwrap(),
            Side::Buy,
            rust_decimal::Decimal::new(price, 0),
            dec!(1),
            "",
            "",
        )
    }

    #[tokio::test]
    async fn seed_scenario_s3() {
        let queue = WarmUpQueue::new(TimeDelta::days(3));
        queue.put(exec(1, 1)).await;
        queue.put(exec(2, 2)).await;
        queue.put(exec(3, 3)).await;

        queue.spawn("A").await;

        let now = DateTime::<Utc>::from_timestamp(4 * 86_400, 0).unwrap();
        let e1 = queue.get("A", now).await.unwrap();
        assert_eq!(unwrap_price(&e1), dec!(1));
        let e2 = queue.get("A", now).await.unwrap();
        assert_eq!(unwrap_price(&e2), dec!(2));
        let e3 = queue.get("A", now).await.unwrap();
        assert_eq!(unwrap_price(&e3), dec!(3));

        let marker = queue.get("A", now).await.unwrap();
        assert!(matches!(marker, WarmUpItem::SwitchedToRealtime(_)));

        // day4 put prunes day1 (newest - oldest > 3 days).
        queue.put(exec(4, 4)).await;
        let next = queue.get("A", now).await.unwrap();
        assert_eq!(unwrap_price(&next), dec!(4));
    }

    fn unwrap_price(item: &WarmUpItem) -> rust_decimal::Decimal {
        match item {
            WarmUpItem::Execution(e) => e.price,
            WarmUpItem::SwitchedToRealtime(_) => panic!("expected execution"),
        }
    }

    #[tokio::test]
    async fn unknown_client_fails() {
        let queue = WarmUpQueue::new(TimeDelta::days(1));
        let now = Utc::now();
        assert!(matches!(
            queue.get("ghost", now).await,
            Err(StreamError::UnknownClient(_))
        ));
    }

    #[tokio::test]
    async fn prune_keeps_elements_within_window_invariant() {
        let window = TimeDelta::minutes(5);
        let queue = WarmUpQueue::new(window);
        for i in 0..10 {
            queue
                .put(Execution::new(
                    Symbol::FxBtcJpy,
                    None,
                    DateTime::<Utc>::from_timestamp(i * 60, 0).unwrap(),
                    Side::Buy,
                    dec!(1),
                    dec!(1),
                    "",
                    "",
                ))
                .await;
            let inner = queue.inner.lock().await;
            if let Some(newest) = inner.deque.back() {
                for e in &inner.deque {
                    assert!(newest.timestamp - e.timestamp <= window);
                }
            }
        }
    }
}
