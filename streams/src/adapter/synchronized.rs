use crate::adapter::ExecutionStream;
use async_trait::async_trait;
use tucano_model::{Execution, SynchronizedCompanion};

/// Aligns a secondary stream's nearest-prior event to each primary event. Both upstreams must
/// already be non-decreasing in timestamp (caller contract); emits one element per primary
/// element, paired with the secondary element of largest timestamp `<=` the primary's, or
/// `None` if no such secondary element has been seen yet.
pub struct SynchronizedStream<P, S> {
    primary: P,
    secondary: S,
    next_p: Option<Execution>,
    next_s: Option<Execution>,
    prev_s: Option<Execution>,
    s_exhausted: bool,
    primed: bool,
}

impl<P, S> SynchronizedStream<P, S>
where
    P: ExecutionStream<Item = Execution>,
    S: ExecutionStream<Item = Execution>,
{
    pub fn new(primary: P, secondary: S) -> Self {
        Self {
            primary,
            secondary,
            next_p: None,
            next_s: None,
            prev_s: None,
            s_exhausted: false,
            primed: false,
        }
    }

    async fn prime(&mut self) {
        self.next_p = self.primary.next().await;
        self.next_s = self.secondary.next().await;
        if self.next_s.is_none() {
            self.s_exhausted = true;
        }
        self.primed = true;
    }
}

#[async_trait]
impl<P, S> ExecutionStream for SynchronizedStream<P, S>
where
    P: ExecutionStream<Item = Execution> + Send,
    S: ExecutionStream<Item = Execution> + Send,
{
    type Item = (Execution, Option<SynchronizedCompanion>);

    async fn next(&mut self) -> Option<Self::Item> {
        if !self.primed {
            self.prime().await;
        }

        let p = self.next_p.take()?;

        if !self.s_exhausted {
            loop {
                match &self.next_s {
                    Some(s) if s.timestamp <= p.timestamp => {
                        self.prev_s = self.next_s.take();
                        self.next_s = self.secondary.next().await;
                        if self.next_s.is_none() {
                            self.s_exhausted = true;
                        }
                    }
                    _ => break,
                }
            }
        } else if let Some(prev) = &self.prev_s {
            if prev.timestamp > p.timestamp {
                // rule 4: secondary exhausted and stale; terminate without emitting p.
                self.next_p = None;
                return None;
            }
        }

        let companion = self.prev_s.as_ref().map(SynchronizedCompanion::from);
        self.next_p = self.primary.next().await;
        Some((p, companion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::VecStream;
    use chrono::DateTime;
    use rust_decimal_macros::dec;
    use tucano_model::{Side, Symbol};

    fn exec(ts_secs: i64, price: i64) -> Execution {
        Execution::new(
            Symbol::FxBtcJpy,
            None,
            DateTime::from_timestamp(ts_secs, 0).unwrap(),
            Side::Buy,
            rust_decimal::Decimal::new(price, 0),
            dec!(1),
            "",
            "",
        )
    }

    #[tokio::test]
    async fn seed_scenario_s2() {
        let primary = VecStream::new(vec![exec(0, 0), exec(1, 2), exec(2, 4)]);
        let secondary = VecStream::new(vec![
            exec(1, 1),
            exec(1, 3),
            exec(1, 5),
            exec(2, 6),
            exec(3, 7),
        ]);
        let mut stream = SynchronizedStream::new(primary, secondary);

        let (p0, c0) = stream.next().await.unwrap();
        assert_eq!(p0.price, dec!(0));
        assert!(c0.is_none());

        let (p1, c1) = stream.next().await.unwrap();
        assert_eq!(p1.price, dec!(2));
        assert_eq!(c1.unwrap().price, dec!(5));

        let (p2, c2) = stream.next().await.unwrap();
        assert_eq!(p2.price, dec!(4));
        assert_eq!(c2.unwrap().price, dec!(6));

        assert!(stream.next().await.is_none());
    }
}
