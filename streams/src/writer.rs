use tucano_model::{Chunk, Exchange, Execution, Symbol};

/// Abstraction over the persisted row store an [`ExecutionWriter`] rotates through. Concrete
/// schema/engine (SQLite in the original) is out of scope (§1); this is the seam the rotation
/// mechanism needs.
#[async_trait::async_trait]
pub trait RowStore: Send {
    type Error;

    async fn append(&mut self, execution: &Execution) -> Result<(), Self::Error>;
    async fn flush(&mut self) -> Result<(), Self::Error>;

    /// Open a fresh store for the next chunk, e.g. a new file.
    async fn rotate(&mut self) -> Result<Self, Self::Error>
    where
        Self: Sized;

    /// `(first_id, first_timestamp, last_id, last_timestamp)` of everything written to the
    /// store being closed, used to name the outgoing [`Chunk`].
    fn bounds(&self) -> Option<(Option<i64>, chrono::DateTime<chrono::Utc>, Option<i64>, chrono::DateTime<chrono::Utc>)>;
}

/// Appends executions into a rotating [`RowStore`]: rotates every `rotate_every` rows, flushes
/// every `flush_every` rows. On rotation, builds the outgoing [`Chunk`] from the closed store's
/// bounds (§4.6, §10.3).
pub struct ExecutionWriter<S> {
    exchange: Exchange,
    symbol: Symbol,
    store: S,
    rotate_every: usize,
    flush_every: usize,
    rows_since_flush: usize,
    rows_since_rotate: usize,
}

impl<S> ExecutionWriter<S>
where
    S: RowStore,
{
    pub fn new(exchange: Exchange, symbol: Symbol, store: S, rotate_every: usize, flush_every: usize) -> Self {
        Self {
            exchange,
            symbol,
            store,
            rotate_every,
            flush_every,
            rows_since_flush: 0,
            rows_since_rotate: 0,
        }
    }

    /// Appends `execution`, flushing/rotating as thresholds are crossed. Returns the outgoing
    /// [`Chunk`] if a rotation happened on this call.
    pub async fn write(&mut self, execution: &Execution) -> Result<Option<Chunk>, S::Error> {
        self.store.append(execution).await?;
        self.rows_since_flush += 1;
        self.rows_since_rotate += 1;

        if self.rows_since_flush >= self.flush_every {
            self.store.flush().await?;
            self.rows_since_flush = 0;
        }

        if self.rows_since_rotate >= self.rotate_every {
            return self.rotate().await.map(Some);
        }

        Ok(None)
    }

    async fn rotate(&mut self) -> Result<Chunk, S::Error> {
        self.store.flush().await?;
        let bounds = self.store.bounds();
        let fresh = self.store.rotate().await?;
        self.store = fresh;
        self.rows_since_rotate = 0;
        self.rows_since_flush = 0;

        let (first_id, first_timestamp, last_id, last_timestamp) =
            bounds.unwrap_or((None, chrono::Utc::now(), None, chrono::Utc::now()));

        Ok(Chunk {
            exchange: self.exchange,
            symbol: self.symbol,
            first_id: first_id.unwrap_or_default(),
            first_timestamp,
            last_id: last_id.unwrap_or_default(),
            last_timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tucano_model::Side;

    #[derive(Default)]
    struct InMemoryStore {
        rows: Vec<Execution>,
        flushed: bool,
    }

    #[async_trait::async_trait]
    impl RowStore for InMemoryStore {
        type Error = std::convert::Infallible;

        async fn append(&mut self, execution: &Execution) -> Result<(), Self::Error> {
            self.rows.push(execution.clone());
            Ok(())
        }

        async fn flush(&mut self) -> Result<(), Self::Error> {
            self.flushed = true;
            Ok(())
        }

        async fn rotate(&mut self) -> Result<Self, Self::Error> {
            Ok(Self::default())
        }

        fn bounds(&self) -> Option<(Option<i64>, chrono::DateTime<chrono::Utc>, Option<i64>, chrono::DateTime<chrono::Utc>)> {
            let first = self.rows.first()?;
            let last = self.rows.last()?;
            Some((first.id, first.timestamp, last.id, last.timestamp))
        }
    }

    fn exec(id: i64, ts_secs: i64) -> Execution {
        Execution::new(
            Symbol::FxBtcJpy,
            Some(id),
            chrono::DateTime::from_timestamp(ts_secs, 0).unwrap(),
            Side::Buy,
            dec!(1),
            dec!(1),
            "",
            "",
        )
    }

    #[tokio::test]
    async fn rotates_after_configured_row_count() {
        let mut writer = ExecutionWriter::new(Exchange::BitFlyer, Symbol::FxBtcJpy, InMemoryStore::default(), 2, 1);

        assert!(writer.write(&exec(1, 0)).await.unwrap().is_none());
        let chunk = writer.write(&exec(2, 1)).await.unwrap().unwrap();
        assert_eq!(chunk.first_id, 1);
        assert_eq!(chunk.last_id, 2);
    }
}
