use crate::adapter::ExecutionStream;
use async_trait::async_trait;
use std::collections::VecDeque;

/// An in-memory upstream used in adapter tests: replays a fixed `Vec<T>` then exhausts.
#[derive(Debug)]
pub struct VecStream<T> {
    items: VecDeque<T>,
}

impl<T> VecStream<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into(),
        }
    }
}

#[async_trait]
impl<T: Send> ExecutionStream for VecStream<T> {
    type Item = T;

    async fn next(&mut self) -> Option<T> {
        self.items.pop_front()
    }
}
