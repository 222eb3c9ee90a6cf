//! Error type shared by lookups and bucket introspection.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChainHashError {
    /// No entry with an equal key lives in the key's bucket.
    #[error("key not found")]
    NotFound,
    /// A bucket index was negative or not below the current capacity.
    #[error("bucket index out of range for a table with {capacity} buckets")]
    IndexOutOfRange { capacity: usize },
}
