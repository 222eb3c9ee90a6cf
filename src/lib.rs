//! chain-hash: a single-threaded separate-chaining hash table with
//! fill-factor driven growth and a caller-selected merge policy.
//!
//! Internal Design:
//!
//! Storage
//! - Entries live in a `slotmap` arena. Each entry caches its `u64` hash
//!   and links to the next entry of its bucket by arena key.
//! - The table keeps a bucket-head array, a parallel bucket-size array,
//!   the live entry count and the number of non-empty buckets. All four
//!   are updated incrementally on every insert and removal.
//!
//! Growth
//! - Before each `set`, if non-empty buckets / capacity exceeds the
//!   maximum fill factor (0.8 by default), the bucket arrays double and
//!   every entry is relinked at `cached_hash % new_capacity`. Entries do
//!   not move in the arena and `K: Hash` is never called during a rehash.
//! - The check uses the fill factor before the call, so an update of an
//!   existing key may still grow the table.
//! - Capacity never shrinks.
//!
//! Merge policy
//! - `ChainHash<K, V, P>` takes a zero-sized policy type. `Overwrite`
//!   (default) replaces the value of an existing key; `AppendFirst`
//!   pushes the head of an incoming `Vec` onto the stored one, which is
//!   what an inverted index needs.
//!
//! Errors
//! - `get` fails with `ChainHashError::NotFound`; bucket introspection
//!   fails with `ChainHashError::IndexOutOfRange`. `contains` and
//!   `remove` report absence as `false`.
//!
//! Notes and non-goals
//! - No internal synchronization. Mutation takes `&mut self` and bucket
//!   cursors borrow the table, so a cursor cannot outlive a mutation.
//! - Whole-table iteration is in bucket order, not key order.
//! - Keys hash through `Hash` with `hashbrown`'s default hasher.
//!
//! The `bag_of_words` module builds a token -> document index on top of
//! the table.

pub mod bag_of_words;
pub mod chain_hash;
mod chain_hash_proptest;
pub mod config;
pub mod error;
pub mod policy;

// Public surface
pub use bag_of_words::{bag_of_words, tokenize, BagOfWordsDisplay, DocumentIndex};
pub use chain_hash::{BucketIter, ChainHash, Iter};
pub use config::ChainHashConfig;
pub use error::ChainHashError;
pub use policy::{AppendFirst, MergePolicy, Overwrite};
