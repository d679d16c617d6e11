//! Hash set with a fixed number of buckets.
//!
//! Every item is routed to one bucket by a caller-supplied hash function and looked up
//! inside it by a linear scan with a caller-supplied comparator. The number of buckets never
//! changes on its own, so the average bucket length (and with it the cost of `enter` and
//! `lookup`) grows linearly with the number of items. Pick a bucket count proportional to
//! the expected load, or call [`HashSet::rehash`] explicitly.

use crate::{
    alloc::{Alloc, Global},
    error::{Error, InvalidArgument},
    vector::{Vector, DEFAULT_GROWTH},
};
use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    mem,
};
use log::trace;
use snafu::ensure;
use std::collections::hash_map::DefaultHasher;

/// Hash function used by [`HashSet::with_buckets`].
pub type DefaultHashFn<T> = fn(&T, usize) -> usize;

/// Comparator used by [`HashSet::with_buckets`].
pub type DefaultCompareFn<T> = fn(&T, &T) -> Ordering;

/// A set of `T` split into a fixed number of buckets.
///
/// * `hash(item, bucket_count)` must return a bucket index below `bucket_count` and must
///   return the same index for items `compare` considers equal.
/// * `compare(a, b)` returns `Ordering::Equal` iff `a` and `b` have the same key.
///
/// At most one item per key is stored: [`HashSet::enter`] replaces an existing item with
/// the same key.
pub struct HashSet<T, H, C, A = Global>
where
    A: Alloc + Clone,
{
    buckets: Vector<Vector<T, A>, A>,
    hash: H,
    compare: C,
}

impl<T: Hash + Ord> HashSet<T, DefaultHashFn<T>, DefaultCompareFn<T>> {
    /// Creates a set that hashes with std's `DefaultHasher` and compares with `Ord`.
    pub fn with_buckets(bucket_count: usize) -> Result<Self, Error> {
        let hash: DefaultHashFn<T> = default_hash::<T>;
        let compare: DefaultCompareFn<T> = T::cmp;
        HashSet::new(bucket_count, hash, compare)
    }
}

impl<T, H, C> HashSet<T, H, C>
where
    H: Fn(&T, usize) -> usize,
    C: Fn(&T, &T) -> Ordering,
{
    /// Creates a set with `bucket_count` empty buckets on the global heap.
    pub fn new(bucket_count: usize, hash: H, compare: C) -> Result<Self, Error> {
        Self::new_in(bucket_count, hash, compare, Global)
    }
}

impl<T, H, C, A> HashSet<T, H, C, A>
where
    A: Alloc + Clone,
{
    /// Iterates over all items in the same order as [`HashSet::map`].
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.buckets.iter().flat_map(|bucket| bucket.iter())
    }
}

impl<T, H, C, A> HashSet<T, H, C, A>
where
    H: Fn(&T, usize) -> usize,
    C: Fn(&T, &T) -> Ordering,
    A: Alloc + Clone,
{
    /// Creates a set with `bucket_count` empty buckets using a given allocator.
    ///
    /// Fails with [`Error::InvalidArgument`] if `bucket_count` is zero or `T` is
    /// zero-sized, and with [`Error::OutOfMemory`] if the buckets can't be allocated.
    pub fn new_in(bucket_count: usize, hash: H, compare: C, alloc: A) -> Result<Self, Error> {
        let buckets = allocate_buckets(bucket_count, alloc)?;
        Ok(HashSet {
            buckets,
            hash,
            compare,
        })
    }

    /// Number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of items, summed over all buckets.
    pub fn count(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|bucket| bucket.is_empty())
    }

    /// Average number of items per bucket.
    pub fn load_factor(&self) -> f64 {
        self.count() as f64 / self.bucket_count() as f64
    }

    /// Index of the bucket `item` belongs to.
    ///
    /// # Panics
    ///
    /// Panics if the hash function returns an index outside `0..bucket_count`.
    pub fn bucket_of(&self, item: &T) -> usize {
        bucket_index(&self.hash, item, self.bucket_count())
    }

    /// Adds `item`, or replaces the stored item with the same key.
    ///
    /// A replaced item is dropped. If a new item doesn't fit and its bucket can't grow, it
    /// is dropped and `Error::OutOfMemory` is returned, leaving the set as it was.
    pub fn enter(&mut self, item: T) -> Result<(), Error> {
        let index = self.bucket_of(&item);
        let bucket = &mut self.buckets[index];
        match bucket.find(&item, &self.compare, 0, false) {
            Some(position) => {
                bucket.replace(position, item);
                Ok(())
            }
            None => bucket.push(item),
        }
    }

    /// Returns the stored item with the same key as `item`, if any.
    pub fn lookup(&self, item: &T) -> Option<&T> {
        let bucket = &self.buckets[self.bucket_of(item)];
        bucket
            .find(item, &self.compare, 0, false)
            .map(|position| bucket.at(position))
    }

    /// Returns the stored item with the same key as `item`, if any.
    ///
    /// Changing the key through the returned reference breaks the set.
    pub fn lookup_mut(&mut self, item: &T) -> Option<&mut T> {
        let index = self.bucket_of(item);
        let bucket = &mut self.buckets[index];
        match bucket.find(item, &self.compare, 0, false) {
            Some(position) => Some(bucket.at_mut(position)),
            None => None,
        }
    }

    /// Takes the stored item with the same key as `item` out of the set.
    pub fn remove(&mut self, item: &T) -> Option<T> {
        let index = self.bucket_of(item);
        let bucket = &mut self.buckets[index];
        bucket
            .find(item, &self.compare, 0, false)
            .map(|position| bucket.remove(position))
    }

    /// Calls `visit` on every item, bucket by bucket, in the order items sit in a bucket.
    ///
    /// Changing an item's key from inside `visit` breaks the set.
    pub fn map<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut T),
    {
        for bucket in self.buckets.iter_mut() {
            bucket.map(&mut visit);
        }
    }

    /// Drops every item. The buckets keep their capacity.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
    }

    /// Redistributes all items over `bucket_count` new buckets.
    ///
    /// All the memory the new layout needs is allocated before any item moves, so on
    /// `Err` the set is left as it was.
    ///
    /// # Panics
    ///
    /// Panics if the hash function returns an index outside `0..bucket_count`.
    pub fn rehash(&mut self, bucket_count: usize) -> Result<(), Error> {
        let alloc = self.buckets.allocator().clone();
        let mut fresh = allocate_buckets::<T, A>(bucket_count, alloc.clone())?;

        let mut sizes = Vector::<usize, A>::with_growth_in(bucket_count, alloc)?;
        sizes.resize(bucket_count, 0)?;
        for item in self.iter() {
            sizes[bucket_index(&self.hash, item, bucket_count)] += 1;
        }
        for (bucket, size) in fresh.iter_mut().zip(sizes.iter()) {
            bucket.try_reserve(*size)?;
        }

        let old = mem::replace(&mut self.buckets, fresh);
        trace!(
            "Rehashing {} buckets into {}",
            old.len(),
            self.buckets.len()
        );
        for bucket in old {
            for item in bucket {
                let index = bucket_index(&self.hash, &item, bucket_count);
                self.buckets[index].push_reserved(item);
            }
        }
        Ok(())
    }
}

fn allocate_buckets<T, A>(bucket_count: usize, alloc: A) -> Result<Vector<Vector<T, A>, A>, Error>
where
    A: Alloc + Clone,
{
    ensure!(
        bucket_count > 0,
        InvalidArgument {
            reason: "bucket count must be positive"
        }
    );
    let mut buckets = Vector::with_growth_in(bucket_count, alloc.clone())?;
    for _ in 0..bucket_count {
        buckets.push(Vector::with_growth_in(DEFAULT_GROWTH, alloc.clone())?)?;
    }
    Ok(buckets)
}

fn bucket_index<T, H>(hash: &H, item: &T, bucket_count: usize) -> usize
where
    H: Fn(&T, usize) -> usize,
{
    let index = hash(item, bucket_count);
    assert!(
        index < bucket_count,
        "Hash function returned bucket {} (bucket count = {})",
        index,
        bucket_count
    );
    index
}

fn default_hash<T: Hash>(item: &T, bucket_count: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    item.hash(&mut hasher);
    (hasher.finish() % bucket_count as u64) as usize
}

impl<T, H, C, A> fmt::Debug for HashSet<T, H, C, A>
where
    T: fmt::Debug,
    A: Alloc + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter())
            .finish()
    }
}
