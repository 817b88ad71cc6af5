use crate::adapter::ExecutionStream;
use async_trait::async_trait;

/// Discards elements while `predicate` holds; from the first element where it fails, that
/// element and every subsequent one pass through unconditionally. The predicate is evaluated at
/// most once per element.
pub struct DropWhileStream<S, F> {
    upstream: S,
    predicate: F,
    dropping: bool,
}

impl<S, F> DropWhileStream<S, F>
where
    S: ExecutionStream,
    F: FnMut(&S::Item) -> bool + Send,
{
    pub fn new(upstream: S, predicate: F) -> Self {
        Self {
            upstream,
            predicate,
            dropping: true,
        }
    }
}

#[async_trait]
impl<S, F> ExecutionStream for DropWhileStream<S, F>
where
    S: ExecutionStream + Send,
    F: FnMut(&S::Item) -> bool + Send,
{
    type Item = S::Item;

    async fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.upstream.next().await?;
            if self.dropping {
                if (self.predicate)(&item) {
                    continue;
                }
                self.dropping = false;
            }
            return Some(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::VecStream;

    #[tokio::test]
    async fn drops_while_predicate_holds_then_passes_everything() {
        let upstream = VecStream::new(vec![1, 2, 3, 0, 4, 0]);
        let mut stream = DropWhileStream::new(upstream, |v: &i32| *v < 3);

        let mut out = Vec::new();
        while let Some(v) = stream.next().await {
            out.push(v);
        }
        assert_eq!(out, vec![3, 0, 4, 0]);
    }
}
