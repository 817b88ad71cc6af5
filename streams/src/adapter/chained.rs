use crate::{adapter::ExecutionStream, error::StreamError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use tucano_model::Execution;

/// Concatenates a fixed ordered list of upstreams. Once an upstream is exhausted, moves to the
/// next; the first element drawn from each subsequent upstream must not precede the last
/// element emitted so far, or the stream fails permanently with [`StreamError::OrderViolation`].
pub struct ChainedStream {
    upstreams: VecDeque<Box<dyn ExecutionStream<Item = Execution> + Send>>,
    last_timestamp: Option<DateTime<Utc>>,
    failed: bool,
}

impl ChainedStream {
    pub fn new(upstreams: Vec<Box<dyn ExecutionStream<Item = Execution> + Send>>) -> Self {
        Self {
            upstreams: upstreams.into(),
            last_timestamp: None,
            failed: false,
        }
    }
}

#[async_trait]
impl ExecutionStream for ChainedStream {
    type Item = Result<Execution, StreamError>;

    async fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let front = self.upstreams.front_mut()?;
            match front.next().await {
                Some(execution) => {
                    if let Some(previous) = self.last_timestamp {
                        if execution.timestamp < previous {
                            self.failed = true;
                            return Some(Err(StreamError::OrderViolation {
                                previous,
                                next: execution.timestamp,
                            }));
                        }
                    }
                    self.last_timestamp = Some(execution.timestamp);
                    return Some(Ok(execution));
                }
                None => {
                    self.upstreams.pop_front();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::VecStream;
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
    async fn concatenates_upstreams_in_order() {
        let a: Box<dyn ExecutionStream<Item = Execution> + Send> =
            Box::new(VecStream::new(vec![exec(0, 1), exec(1, 2)]));
        let b: Box<dyn ExecutionStream<Item = Execution> + Send> =
            Box::new(VecStream::new(vec![exec(2, 3)]));
        let mut chained = ChainedStream::new(vec![a, b]);

        let mut prices = Vec::new();
        while let Some(item) = chained.next().await {
            prices.push(item.unwrap().price);
        }
        assert_eq!(prices, vec![dec!(1), dec!(2), dec!(3)]);
    }

    #[tokio::test]
    async fn boundary_going_backwards_fails() {
        let a: Box<dyn ExecutionStream<Item = Execution> + Send> =
            Box::new(VecStream::new(vec![exec(10, 1)]));
        let b: Box<dyn ExecutionStream<Item = Execution> + Send> =
            Box::new(VecStream::new(vec![exec(5, 2)]));
        let mut chained = ChainedStream::new(vec![a, b]);

        assert!(chained.next().await.unwrap().is_ok());
        assert!(matches!(
            chained.next().await,
            Some(Err(StreamError::OrderViolation { .. }))
        ));
        assert!(chained.next().await.is_none());
    }
}
