use crate::adapter::ExecutionStream;
use async_trait::async_trait;
use chrono::TimeDelta;
use std::collections::VecDeque;
use tucano_model::Execution;

/// Accumulates elements of the current bucket of duration `W` and, when a new bucket starts,
/// emits exactly four elements for the just-closed bucket: open, then (high, low) ordered by
/// timestamp, then close. The bucket still open when the upstream ends is dropped, not emitted.
pub struct OHLCStream<S> {
    upstream: S,
    window_ns: i64,
    bucket: Option<i64>,
    open: Option<Execution>,
    high: Option<Execution>,
    low: Option<Execution>,
    close: Option<Execution>,
    pending: VecDeque<Execution>,
}

impl<S> OHLCStream<S>
where
    S: ExecutionStream<Item = Execution>,
{
    pub fn new(upstream: S, window: TimeDelta) -> Self {
        Self {
            upstream,
            window_ns: window.num_nanoseconds().expect("window too large for i64 nanoseconds"),
            bucket: None,
            open: None,
            high: None,
            low: None,
            close: None,
            pending: VecDeque::new(),
        }
    }

    fn bucket_index(&self, execution: &Execution) -> i64 {
        let ts_ns = execution
            .timestamp
            .timestamp_nanos_opt()
            .expect("timestamp out of range for nanosecond precision");
        ts_ns.div_euclid(self.window_ns)
    }

    fn start_bucket(&mut self, bucket: i64, execution: Execution) {
        self.bucket = Some(bucket);
        self.open = Some(execution.clone());
        self.high = Some(execution.clone());
        self.low = Some(execution.clone());
        self.close = Some(execution);
    }

    fn close_bucket(&mut self) {
        let (Some(open), Some(high), Some(low), Some(close)) =
            (self.open.take(), self.high.take(), self.low.take(), self.close.take())
        else {
            return;
        };

        self.pending.push_back(open);
        if high.timestamp <= low.timestamp {
            self.pending.push_back(high);
            self.pending.push_back(low);
        } else {
            self.pending.push_back(low);
            self.pending.push_back(high);
        }
        self.pending.push_back(close);
    }
}

#[async_trait]
impl<S> ExecutionStream for OHLCStream<S>
where
    S: ExecutionStream<Item = Execution> + Send,
{
    type Item = Execution;

    async fn next(&mut self) -> Option<Execution> {
        loop {
            if let Some(e) = self.pending.pop_front() {
                return Some(e);
            }

            match self.upstream.next().await {
                Some(execution) => {
                    let bucket = self.bucket_index(&execution);
                    match self.bucket {
                        Some(current) if current == bucket => {
                            if execution.price > self.high.as_ref().expect("bucket seeded").price {
                                self.high = Some(execution.clone());
                            }
                            if execution.price < self.low.as_ref().expect("bucket seeded").price {
                                self.low = Some(execution.clone());
                            }
                            self.close = Some(execution);
                        }
                        Some(_) => {
                            self.close_bucket();
                            self.start_bucket(bucket, execution);
                        }
                        None => self.start_bucket(bucket, execution),
                    }
                }
                None => {
                    // final open bucket is dropped, not emitted.
                    self.open = None;
                    self.high = None;
                    self.low = None;
                    self.close = None;
                    return None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::VecStream;
    use chrono::DateTime;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tucano_model::{Side, Symbol};

    fn exec(ts_secs: i64, price: i64) -> Execution {
        Execution::new(
            Symbol::FxBtcJpy,
            None,
            DateTime::from_timestamp(ts_secs, 0).unwrap(),
            Side::Buy,
            Decimal::new(price, 0),
            dec!(1),
            "",
            "",
        )
    }

    #[tokio::test]
    async fn seed_scenario_s1() {
        let inputs = vec![
            exec(58, 90),
            exec(59, 80),
            exec(60, 110),
            exec(60, 100),
            exec(61, 200),
            exec(62, 199),
            exec(62, 101),
            exec(119, 100),
            exec(120, 210),
        ];
        let upstream = VecStream::new(inputs);
        let mut stream = OHLCStream::new(upstream, TimeDelta::seconds(60));

        let mut prices = Vec::new();
        while let Some(e) = stream.next().await {
            prices.push(e.price);
        }
        // bucket 0 closes on e2 arrival: [e0(open), e0(high), e1(low), e1(close)]
        // bucket 1 closes on e8 arrival: [e2(open), e3(low), e4(high), e7(close)]
        // final bucket (e8 alone) is still open at stream end and dropped.
        assert_eq!(
            prices,
            vec![
                dec!(90),
                dec!(90),
                dec!(80),
                dec!(80),
                dec!(110),
                dec!(100),
                dec!(200),
                dec!(100),
            ]
        );
    }
}
