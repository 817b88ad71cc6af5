use crate::adapter::ExecutionStream;
use async_trait::async_trait;
use chrono::TimeDelta;
use rust_decimal::Decimal;
use tucano_model::Execution;

/// Partitions the stream into disjoint buckets of duration `W` aligned at epoch. Within a
/// bucket, emits an element iff it is the bucket's first element, or strictly above the
/// running high, or strictly below the running low. Running extremes reset at each bucket
/// boundary; exact ties at the current high/low are not re-emitted.
pub struct NewPricesStream<S> {
    upstream: S,
    window_ns: i64,
    current_bucket: Option<i64>,
    high: Option<Decimal>,
    low: Option<Decimal>,
}

impl<S> NewPricesStream<S>
where
    S: ExecutionStream<Item = Execution>,
{
    pub fn new(upstream: S, window: TimeDelta) -> Self {
        Self {
            upstream,
            window_ns: window.num_nanoseconds().expect("window too large for i64 nanoseconds"),
            current_bucket: None,
            high: None,
            low: None,
        }
    }

    fn bucket_index(&self, execution: &Execution) -> i64 {
        let ts_ns = execution
            .timestamp
            .timestamp_nanos_opt()
            .expect("timestamp out of range for nanosecond precision");
        ts_ns.div_euclid(self.window_ns)
    }
}

#[async_trait]
impl<S> ExecutionStream for NewPricesStream<S>
where
    S: ExecutionStream<Item = Execution> + Send,
{
    type Item = Execution;

    async fn next(&mut self) -> Option<Execution> {
        loop {
            let execution = self.upstream.next().await?;
            let bucket = self.bucket_index(&execution);

            if self.current_bucket != Some(bucket) {
                self.current_bucket = Some(bucket);
                self.high = Some(execution.price);
                self.low = Some(execution.price);
                return Some(execution);
            }

            let mut emit = false;
            if execution.price > self.high.expect("bucket always seeds high") {
                self.high = Some(execution.price);
                emit = true;
            }
            if execution.price < self.low.expect("bucket always seeds low") {
                self.low = Some(execution.price);
                emit = true;
            }
            if emit {
                return Some(execution);
            }
        }
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
            Decimal::new(price, 0),
            dec!(1),
            "",
            "",
        )
    }

    #[tokio::test]
    async fn emits_first_element_and_breakouts_only() {
        let upstream = VecStream::new(vec![
            exec(0, 100),
            exec(10, 105),
            exec(20, 95),
            exec(30, 100),
            exec(65, 50),
        ]);
        let mut stream = NewPricesStream::new(upstream, TimeDelta::seconds(60));

        let mut prices = Vec::new();
        while let Some(e) = stream.next().await {
            prices.push(e.price);
        }
        assert_eq!(prices, vec![dec!(100), dec!(105), dec!(95), dec!(50)]);
    }
}
