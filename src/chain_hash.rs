//! ChainHash: separate-chaining table over an entry arena with fill-factor growth.

use crate::config::ChainHashConfig;
use crate::error::ChainHashError;
use crate::policy::{MergePolicy, Overwrite};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::marker::PhantomData;
use hashbrown::hash_map::DefaultHashBuilder;
use log::{debug, trace};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Arena slot of one entry. Bucket heads and chain links store these.
    struct EntryKey;
}

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    hash: u64,
    next: Option<EntryKey>,
}

/// A hash table resolving collisions with per-bucket singly linked chains.
///
/// Entries live in an arena and are linked by arena key, so growing the
/// table relinks entries in place instead of moving them. Every entry caches
/// its hash; the hasher runs once per `set`/`get`/`remove` call and never
/// during a rehash.
///
/// `P` decides what `set` does with an existing key (see [`MergePolicy`]).
///
/// The table performs no internal synchronization. Mutation needs
/// `&mut self`, and bucket cursors borrow the table, so a cursor can never
/// observe a concurrent insert, removal or rehash.
pub struct ChainHash<K, V, P = Overwrite, S = DefaultHashBuilder> {
    hasher: S,
    slots: SlotMap<EntryKey, Entry<K, V>>,
    buckets: Vec<Option<EntryKey>>,
    bucket_sizes: Vec<usize>,
    len: usize,
    used_buckets: usize,
    max_fill_factor: f64,
    _policy: PhantomData<fn() -> P>,
}

impl<K, V, P> ChainHash<K, V, P>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_config(ChainHashConfig::default())
    }

    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self::with_config(ChainHashConfig::new().initial_capacity(initial_capacity))
    }

    pub fn with_config(config: ChainHashConfig) -> Self {
        Self::with_config_and_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K, V, P> Default for ChainHash<K, V, P>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Cursor over one bucket's chain, newest entry first.
pub struct BucketIter<'a, K, V> {
    slots: &'a SlotMap<EntryKey, Entry<K, V>>,
    current: Option<EntryKey>,
}

// Manual impl: `K`/`V` sit behind references and need not be `Clone`.
impl<K, V> Clone for BucketIter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots,
            current: self.current,
        }
    }
}

impl<'a, K, V> Iterator for BucketIter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let slots = self.slots;
        let e = &slots[self.current?];
        self.current = e.next;
        Some((&e.key, &e.value))
    }
}

/// Iterator over every entry, bucket by bucket in index order.
pub struct Iter<'a, K, V> {
    heads: core::slice::Iter<'a, Option<EntryKey>>,
    chain: BucketIter<'a, K, V>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            heads: self.heads.clone(),
            chain: self.chain.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.chain.next() {
                return Some(item);
            }
            self.chain.current = *self.heads.next()?;
        }
    }
}

// Structural accessors; none of these hash or compare keys.
impl<K, V, P, S> ChainHash<K, V, P, S> {
    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of buckets (the table's capacity).
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of buckets holding at least one entry.
    pub fn used_buckets(&self) -> usize {
        self.used_buckets
    }

    pub fn fill_factor(&self) -> f64 {
        self.used_buckets as f64 / self.buckets.len() as f64
    }

    /// Entry count of bucket `index`. Negative indices and indices at or past
    /// `bucket_count()` are rejected.
    pub fn bucket_size<I>(&self, index: I) -> Result<usize, ChainHashError>
    where
        I: TryInto<usize>,
    {
        let i = self.check_bucket(index)?;
        Ok(self.bucket_sizes[i])
    }

    /// Cursor over bucket `index`, from its head to the end of its chain.
    pub fn bucket<I>(&self, index: I) -> Result<BucketIter<'_, K, V>, ChainHashError>
    where
        I: TryInto<usize>,
    {
        let i = self.check_bucket(index)?;
        Ok(BucketIter {
            slots: &self.slots,
            current: self.buckets[i],
        })
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            heads: self.buckets.iter(),
            chain: BucketIter {
                slots: &self.slots,
                current: None,
            },
        }
    }

    fn check_bucket<I>(&self, index: I) -> Result<usize, ChainHashError>
    where
        I: TryInto<usize>,
    {
        let capacity = self.buckets.len();
        match index.try_into() {
            Ok(i) if i < capacity => Ok(i),
            _ => Err(ChainHashError::IndexOutOfRange { capacity }),
        }
    }

    #[inline]
    fn bucket_index(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    /// Push `k` onto the head of bucket `idx` and count it.
    fn attach(&mut self, idx: usize, k: EntryKey) {
        self.slots[k].next = self.buckets[idx];
        self.buckets[idx] = Some(k);
        self.bucket_sizes[idx] += 1;
        if self.bucket_sizes[idx] == 1 {
            self.used_buckets += 1;
        }
        self.len += 1;
    }

    /// Double the bucket array and relink every entry by its cached hash.
    ///
    /// Old buckets are walked in index order, each chain head to tail. Since
    /// relinking prepends, two entries that share an old and a new bucket
    /// end up in reverse order.
    fn rehash(&mut self) {
        let old_capacity = self.buckets.len();
        let new_capacity = old_capacity * 2;
        let old_buckets = core::mem::replace(&mut self.buckets, vec![None; new_capacity]);
        self.bucket_sizes = vec![0; new_capacity];
        let len_before = self.len;
        self.len = 0;
        self.used_buckets = 0;

        for head in old_buckets {
            let mut cur = head;
            while let Some(k) = cur {
                let e = &mut self.slots[k];
                cur = e.next.take();
                let hash = e.hash;
                let idx = self.bucket_index(hash);
                self.attach(idx, k);
            }
        }
        debug_assert_eq!(self.len, len_before);

        debug!(
            "rehash: {} -> {} buckets, {} entries in {} buckets",
            old_capacity, new_capacity, self.len, self.used_buckets
        );
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert_eq!(self.buckets.len(), self.bucket_sizes.len());
        assert_eq!(self.len, self.bucket_sizes.iter().sum::<usize>());
        assert_eq!(self.len, self.slots.len());
        assert_eq!(
            self.used_buckets,
            self.bucket_sizes.iter().filter(|&&n| n > 0).count()
        );
        for (i, head) in self.buckets.iter().enumerate() {
            let mut cur = *head;
            let mut walked = 0;
            while let Some(k) = cur {
                let e = &self.slots[k];
                assert_eq!(self.bucket_index(e.hash), i, "entry in wrong bucket");
                walked += 1;
                cur = e.next;
            }
            assert_eq!(walked, self.bucket_sizes[i]);
        }
    }
}

impl<K, V, P, S> ChainHash<K, V, P, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_config_and_hasher(ChainHashConfig::default(), hasher)
    }

    pub fn with_config_and_hasher(config: ChainHashConfig, hasher: S) -> Self {
        let config = config.sanitized();
        let capacity = config.initial_capacity;
        Self {
            hasher,
            slots: SlotMap::with_capacity_and_key(capacity),
            buckets: vec![None; capacity],
            bucket_sizes: vec![0; capacity],
            len: 0,
            used_buckets: 0,
            max_fill_factor: config.max_fill_factor,
            _policy: PhantomData,
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    fn find<Q>(&self, hash: u64, q: &Q) -> Option<EntryKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut cur = self.buckets[self.bucket_index(hash)];
        while let Some(k) = cur {
            let e = &self.slots[k];
            if e.hash == hash && e.key.borrow() == q {
                return Some(k);
            }
            cur = e.next;
        }
        None
    }

    pub fn get<Q>(&self, key: &Q) -> Result<&V, ChainHashError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(key);
        self.find(hash, key)
            .map(|k| &self.slots[k].value)
            .ok_or(ChainHashError::NotFound)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, ChainHashError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(key);
        match self.find(hash, key) {
            Some(k) => Ok(&mut self.slots[k].value),
            None => Err(ChainHashError::NotFound),
        }
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).is_ok()
    }

    /// Unlink and return the entry for `key`, if present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(key);
        let idx = self.bucket_index(hash);
        let mut prev: Option<EntryKey> = None;
        let mut cur = self.buckets[idx];
        while let Some(k) = cur {
            let e = &self.slots[k];
            let next = e.next;
            if e.hash == hash && e.key.borrow() == key {
                // Take the entry out of the arena before touching links or
                // counters, so a missing slot leaves the chain untouched.
                let removed = self.slots.remove(k)?;
                match prev {
                    None => self.buckets[idx] = next,
                    Some(p) => self.slots[p].next = next,
                }
                self.bucket_sizes[idx] -= 1;
                if self.bucket_sizes[idx] == 0 {
                    self.used_buckets -= 1;
                }
                self.len -= 1;
                return Some((removed.key, removed.value));
            }
            prev = cur;
            cur = next;
        }
        None
    }

    /// Remove `key`. Returns false when it was absent.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(key).is_some()
    }
}

impl<K, V, P, S> ChainHash<K, V, P, S>
where
    K: Eq + Hash,
    S: BuildHasher,
    P: MergePolicy<V>,
{
    /// Insert `key`, or merge `value` into its entry according to `P`.
    ///
    /// The growth check runs first and looks at the fill factor before this
    /// call, so updating an existing key can still trigger a rehash.
    pub fn set(&mut self, key: K, value: V) {
        if self.fill_factor() > self.max_fill_factor {
            self.rehash();
        }

        let hash = self.make_hash(&key);
        if let Some(k) = self.find(hash, &key) {
            P::merge(&mut self.slots[k].value, value);
            return;
        }

        let idx = self.bucket_index(hash);
        let k = self.slots.insert(Entry {
            key,
            value,
            hash,
            next: None,
        });
        self.attach(idx, k);
        trace!(
            "set: new entry in bucket {} (chain length {})",
            idx,
            self.bucket_sizes[idx]
        );
    }
}

impl<K, V, P, S> Extend<(K, V)> for ChainHash<K, V, P, S>
where
    K: Eq + Hash,
    S: BuildHasher,
    P: MergePolicy<V>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<'a, K, V, P, S> IntoIterator for &'a ChainHash<K, V, P, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, P, S> fmt::Debug for ChainHash<K, V, P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
