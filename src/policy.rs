//! Merge policies: what `ChainHash::set` does when the key already exists.
//!
//! The policy is a zero-sized type parameter of the table, chosen once at
//! construction. New keys always store the incoming value as-is; the policy
//! only runs on a key collision.

/// Combines an incoming value into the value already stored for a key.
pub trait MergePolicy<V> {
    fn merge(existing: &mut V, incoming: V);
}

/// Replace the stored value. The default policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overwrite;

impl<V> MergePolicy<V> for Overwrite {
    #[inline]
    fn merge(existing: &mut V, incoming: V) {
        *existing = incoming;
    }
}

/// Push the first element of the incoming list onto the stored list.
///
/// Built for inverted indexes where each `set` carries a one-element list
/// holding a document position. Any elements after the first are dropped;
/// an empty incoming list leaves the stored list untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppendFirst;

impl<T> MergePolicy<Vec<T>> for AppendFirst {
    #[inline]
    fn merge(existing: &mut Vec<T>, incoming: Vec<T>) {
        if let Some(first) = incoming.into_iter().next() {
            existing.push(first);
        }
    }
}
