/// [`indexed::IndexedStream`] attaches a caller-supplied index/transform to each stream item.
pub mod indexed;

pub use indexed::{IndexedStream, Indexer};
