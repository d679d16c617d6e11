//! Growable contiguous vector with linear growth.

use crate::{
    alloc::{Alloc, Global},
    error::{Error, InvalidArgument, OutOfMemory},
    raw_vec::RawVec,
};
use core::{
    cmp::Ordering,
    fmt, mem,
    ops::{Deref, DerefMut},
    ptr, slice,
};
use snafu::{ensure, ResultExt};

pub mod iter;
#[macro_use]
pub mod macros;

/// Number of slots added per growth event when no growth increment is given.
pub const DEFAULT_GROWTH: usize = 4;

/// A contiguous, growable sequence of `T`.
///
/// Storage grows by a fixed number of slots (the growth increment) whenever it is full and
/// never shrinks. Items always occupy slots `0..len()` with no gaps: removing an item shifts
/// the tail toward the front right away.
///
/// Items are dropped exactly when they are replaced, deleted, cleared, or when the vector
/// itself is dropped. Items moved around by `insert` and `delete` are never dropped.
pub struct Vector<T, A: Alloc = Global> {
    buf: RawVec<T, A>,
    len: usize,
    growth: usize,
}

unsafe impl<T: Send, A: Alloc + Send> Send for Vector<T, A> {}
unsafe impl<T: Sync, A: Alloc + Sync> Sync for Vector<T, A> {}

impl<T> Vector<T> {
    /// Creates an empty vector with the default growth increment.
    pub fn new() -> Result<Self, Error> {
        Self::with_growth_in(DEFAULT_GROWTH, <_>::default())
    }

    /// Creates an empty vector that grows by `growth` slots at a time.
    ///
    /// A `growth` of zero selects [`DEFAULT_GROWTH`].
    pub fn with_growth(growth: usize) -> Result<Self, Error> {
        Self::with_growth_in(growth, <_>::default())
    }

    /// Tries to construct a vector from a given iterator.
    pub fn try_from_iter<I>(i: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
    {
        Self::try_from_iter_in(i, <_>::default())
    }
}

impl<T, A: Alloc> Vector<T, A> {
    /// Creates an empty vector with the default growth increment using a given allocator.
    pub fn new_in(alloc: A) -> Result<Self, Error> {
        Self::with_growth_in(DEFAULT_GROWTH, alloc)
    }

    /// Creates an empty vector that grows by `growth` slots at a time, using a given
    /// allocator. Room for `growth` items is allocated right away.
    ///
    /// Fails with [`Error::InvalidArgument`] for zero-sized `T`.
    pub fn with_growth_in(growth: usize, alloc: A) -> Result<Self, Error> {
        ensure!(
            mem::size_of::<T>() != 0,
            InvalidArgument {
                reason: "element size must be positive"
            }
        );
        let growth = if growth == 0 { DEFAULT_GROWTH } else { growth };
        let buf = RawVec::with_capacity_in(growth, alloc).context(OutOfMemory)?;
        Ok(Vector { buf, len: 0, growth })
    }

    /// Tries to construct a vector from a given iterator using a given allocator.
    pub fn try_from_iter_in<I>(i: I, alloc: A) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
    {
        let mut v = Vector::new_in(alloc)?;
        v.try_extend(i)?;
        Ok(v)
    }

    /// Number of items in the vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Number of slots added per growth event.
    #[inline]
    pub fn growth(&self) -> usize {
        self.growth
    }

    /// Returns a shared reference to the allocator backing this vector.
    pub fn allocator(&self) -> &A {
        self.buf.alloc()
    }

    /// Extracts a slice containing the entire vector.
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.len) }
    }

    /// Appends an item to the end of the vector, growing the storage first if it is full.
    ///
    /// If the storage can't be grown, the item is dropped and the vector stays as it was.
    pub fn push(&mut self, item: T) -> Result<(), Error> {
        self.grow_if_full()?;
        unsafe { self.buf.as_ptr().add(self.len).write(item) };
        self.len += 1;
        Ok(())
    }

    /// Writes an item into spare capacity reserved up front.
    pub(crate) fn push_reserved(&mut self, item: T) {
        assert!(self.len < self.capacity(), "No spare capacity reserved");
        unsafe { self.buf.as_ptr().add(self.len).write(item) };
        self.len += 1;
    }

    /// Inserts an item at `position`, shifting every item at or after it one slot toward
    /// the end.
    ///
    /// # Panics
    ///
    /// Panics if `position > len`.
    pub fn insert(&mut self, position: usize, item: T) -> Result<(), Error> {
        assert!(
            position <= self.len,
            "Insert position {} is out of bounds (length = {})",
            position,
            self.len
        );
        self.grow_if_full()?;
        unsafe {
            let slot = self.buf.as_ptr().add(position);
            // The ranges overlap, so this has to be a `memmove`.
            ptr::copy(slot, slot.add(1), self.len - position);
            slot.write(item);
        }
        self.len += 1;
        Ok(())
    }

    /// Overwrites the item at `position`, dropping the previous one.
    ///
    /// # Panics
    ///
    /// Panics if `position >= len`.
    pub fn replace(&mut self, position: usize, item: T) {
        drop(self.swap_out(position, item));
    }

    /// Puts `item` at `position` and hands back the item that was there.
    ///
    /// # Panics
    ///
    /// Panics if `position >= len`.
    pub fn swap_out(&mut self, position: usize, item: T) -> T {
        mem::replace(self.at_mut(position), item)
    }

    /// Drops the item at `position` and closes the gap.
    ///
    /// # Panics
    ///
    /// Panics if `position >= len`.
    pub fn delete(&mut self, position: usize) {
        drop(self.remove(position));
    }

    /// Takes the item at `position` out of the vector and closes the gap.
    ///
    /// # Panics
    ///
    /// Panics if `position >= len`.
    pub fn remove(&mut self, position: usize) -> T {
        self.check_position(position);
        unsafe {
            let slot = self.buf.as_ptr().add(position);
            let item = slot.read();
            ptr::copy(slot.add(1), slot, self.len - position - 1);
            self.len -= 1;
            item
        }
    }

    /// Takes the last item out of the vector, if any.
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            self.len -= 1;
            unsafe { Some(self.buf.as_ptr().add(self.len).read()) }
        }
    }

    /// Returns a reference to the item at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position >= len`.
    pub fn at(&self, position: usize) -> &T {
        self.check_position(position);
        unsafe { &*self.buf.as_ptr().add(position) }
    }

    /// Returns a mutable reference to the item at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position >= len`.
    pub fn at_mut(&mut self, position: usize) -> &mut T {
        self.check_position(position);
        unsafe { &mut *self.buf.as_ptr().add(position) }
    }

    /// Looks for an item equal to `key` according to `compare`.
    ///
    /// With `sorted == false` the items are scanned one by one starting at `start`. With
    /// `sorted == true` the vector must already be ordered by `compare` (this is not
    /// checked) and a binary search over `start..len` is used instead. Both strategies
    /// return the lowest matching index at or after `start`.
    ///
    /// `compare` receives the key first and an item second.
    ///
    /// # Panics
    ///
    /// Panics if `start > len`.
    pub fn find<K, F>(&self, key: &K, mut compare: F, start: usize, sorted: bool) -> Option<usize>
    where
        K: ?Sized,
        F: FnMut(&K, &T) -> Ordering,
    {
        assert!(
            start <= self.len,
            "Start index {} is out of bounds (length = {})",
            start,
            self.len
        );
        let tail = &self.as_slice()[start..];
        let found = if sorted {
            let first = tail.partition_point(|item| compare(key, item) == Ordering::Greater);
            match tail.get(first) {
                Some(item) if compare(key, item) == Ordering::Equal => Some(first),
                _ => None,
            }
        } else {
            tail.iter()
                .position(|item| compare(key, item) == Ordering::Equal)
        };
        found.map(|idx| idx + start)
    }

    /// Sorts the items in place. Equal items may be reordered.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.as_mut_slice().sort_unstable_by(compare)
    }

    /// Calls `visit` on every item in index order.
    ///
    /// Any auxiliary state the visitor needs is simply captured by the closure.
    pub fn map<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut T),
    {
        for item in self.iter_mut() {
            visit(item);
        }
    }

    /// Drops every item past the first `len`. Capacity is kept.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail_len = self.len - len;
        // Shrink first so a panicking `drop` can't lead to a double drop.
        self.len = len;
        unsafe {
            let tail = slice::from_raw_parts_mut(self.buf.as_ptr().add(len), tail_len);
            ptr::drop_in_place(tail);
        }
    }

    /// Drops all the items in the vector.
    pub fn clear(&mut self) {
        self.truncate(0)
    }

    /// Makes sure `additional` more items fit without any further allocation.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        self.buf
            .try_reserve(self.len, additional, self.growth)
            .context(OutOfMemory)
    }

    /// Tries to extend the vector with a given iterator.
    ///
    /// On `Err` every item taken from the iterator is dropped again, so the vector holds
    /// exactly what it held before. Capacity gained along the way is kept.
    pub fn try_extend<I>(&mut self, i: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = i.into_iter();
        let (lower, _) = iter.size_hint();
        self.try_reserve(lower)?;
        let len = self.len;
        for item in iter {
            if let Err(e) = self.push(item) {
                self.truncate(len);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Resizes the vector to `new_len` items, filling new slots with clones of `value`.
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<(), Error>
    where
        T: Clone,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }
        self.try_reserve(new_len - self.len)?;
        while self.len + 1 < new_len {
            self.push_reserved(value.clone());
        }
        self.push_reserved(value);
        Ok(())
    }

    /// Tries to clone the vector.
    pub fn try_clone(&self) -> Result<Self, Error>
    where
        A: Clone,
        T: Clone,
    {
        let alloc = A::clone(self.allocator());
        self.try_clone_in(alloc)
    }

    /// Tries to clone the vector into a given allocator. The growth increment is kept.
    pub fn try_clone_in<NewAlloc>(&self, alloc: NewAlloc) -> Result<Vector<T, NewAlloc>, Error>
    where
        NewAlloc: Alloc,
        T: Clone,
    {
        let mut new_vec = Vector::with_growth_in(self.growth, alloc)?;
        new_vec.try_reserve(self.len)?;
        for item in self.iter() {
            new_vec.push_reserved(T::clone(item));
        }
        Ok(new_vec)
    }

    fn grow_if_full(&mut self) -> Result<(), Error> {
        if self.len == self.buf.capacity() {
            self.buf.grow_by(self.growth).context(OutOfMemory)?;
        }
        Ok(())
    }

    #[inline]
    fn check_position(&self, position: usize) {
        if position >= self.len {
            panic!(
                "Index {} is out of bounds (length = {})",
                position, self.len
            )
        }
    }
}

impl<T, A: Alloc> Drop for Vector<T, A> {
    fn drop(&mut self) {
        unsafe {
            // use drop for [T]
            ptr::drop_in_place(self.as_mut_slice());
        }
    }
}

impl<T, A: Alloc> Deref for Vector<T, A> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, A: Alloc> DerefMut for Vector<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<'a, T, A: Alloc> IntoIterator for &'a Vector<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: Alloc> IntoIterator for &'a mut Vector<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, A: Alloc> IntoIterator for Vector<T, A> {
    type Item = T;
    type IntoIter = iter::IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        iter::IntoIter::new(self)
    }
}

impl<T: fmt::Debug, A: Alloc> fmt::Debug for Vector<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T1, T2, A> PartialEq<[T1]> for Vector<T2, A>
where
    T2: PartialEq<T1>,
    A: Alloc,
{
    fn eq(&self, other: &[T1]) -> bool {
        self.as_slice() == other
    }
}

impl<T1, T2, A1, A2> PartialEq<Vector<T1, A1>> for Vector<T2, A2>
where
    T2: PartialEq<T1>,
    A1: Alloc,
    A2: Alloc,
{
    fn eq(&self, other: &Vector<T1, A1>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Clone, A: Alloc + Clone> Clone for Vector<T, A> {
    fn clone(&self) -> Self {
        self.try_clone().expect("Unable to clone a vector")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::alloc::{Limited, NoOp};
    use core::fmt::Debug;
    use quickcheck::{Arbitrary, TestResult};
    use quickcheck_macros::quickcheck;
    use rand::Rng;
    use std::{cell::Cell, rc::Rc};

    /// Counts how many times values sharing the same counter were dropped.
    #[derive(Debug)]
    struct Tracked {
        id: u32,
        drops: Rc<Cell<usize>>,
    }

    impl Tracked {
        fn new(id: u32, drops: &Rc<Cell<usize>>) -> Self {
            Tracked {
                id,
                drops: Rc::clone(drops),
            }
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    fn ids(v: &Vector<Tracked>) -> std::vec::Vec<u32> {
        v.iter().map(|t| t.id).collect()
    }

    #[test]
    fn append_five_grows_once() {
        let mut v = Vector::<u32>::new().unwrap();
        assert_eq!(v.capacity(), 4);
        for i in 0..5 {
            v.push(i).unwrap();
        }
        assert_eq!(v.len(), 5);
        assert_eq!(v.capacity(), 8);
        for i in 0..5 {
            assert_eq!(*v.at(i), i as u32);
        }
    }

    #[test]
    fn zero_growth_means_default() {
        let v = Vector::<u8>::with_growth(0).unwrap();
        assert_eq!(v.growth(), DEFAULT_GROWTH);
        assert_eq!(v.capacity(), DEFAULT_GROWTH);
        assert!(v.is_empty());
    }

    #[test]
    fn zero_sized_items_are_rejected() {
        let err = Vector::<()>::new().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn insert_shifts_tail() {
        let mut v = Vector::try_from_iter(vec![10, 20, 30, 40]).unwrap();
        v.insert(1, 15).unwrap();
        v.insert(0, 5).unwrap();
        v.insert(6, 45).unwrap();
        v.insert(4, 25).unwrap();
        assert_eq!(&v[..], &[5, 10, 15, 20, 25, 30, 40, 45]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn insert_past_end_panics() {
        let mut v = Vector::try_from_iter(vec![1, 2]).unwrap();
        let _ = v.insert(3, 0);
    }

    #[test]
    fn delete_closes_gap() {
        let mut v = Vector::try_from_iter(0..10u8).unwrap();
        let cap = v.capacity();
        v.delete(3);
        assert_eq!(v.len(), 9);
        assert_eq!(&v[..], &[0, 1, 2, 4, 5, 6, 7, 8, 9]);
        v.delete(8);
        v.delete(0);
        assert_eq!(&v[..], &[1, 2, 4, 5, 6, 7, 8]);
        assert_eq!(v.capacity(), cap);
    }

    #[test]
    #[should_panic(expected = "Index 2 is out of bounds (length = 2)")]
    fn at_past_end_panics() {
        let v = Vector::try_from_iter(vec![1, 2]).unwrap();
        v.at(2);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn delete_on_empty_panics() {
        let mut v = Vector::<u32>::new().unwrap();
        v.delete(0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn find_start_past_end_panics() {
        let v = Vector::try_from_iter(vec![1u32]).unwrap();
        v.find(&1, u32::cmp, 2, false);
    }

    #[test]
    fn replace_drops_exactly_once() {
        let drops = Rc::new(Cell::new(0));
        let mut v = Vector::new().unwrap();
        for id in 0..3 {
            v.push(Tracked::new(id, &drops)).unwrap();
        }

        v.replace(1, Tracked::new(7, &drops));
        assert_eq!(drops.get(), 1);
        assert_eq!(ids(&v), [0, 7, 2]);

        let old = v.swap_out(0, Tracked::new(8, &drops));
        assert_eq!(old.id, 0);
        assert_eq!(drops.get(), 1);
        drop(old);
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn shifting_never_drops() {
        let drops = Rc::new(Cell::new(0));
        let mut v = Vector::with_growth(2).unwrap();
        for id in 0..5 {
            v.insert(0, Tracked::new(id, &drops)).unwrap();
        }
        assert_eq!(drops.get(), 0);
        assert_eq!(ids(&v), [4, 3, 2, 1, 0]);

        v.delete(1);
        assert_eq!(drops.get(), 1);
        assert_eq!(ids(&v), [4, 2, 1, 0]);

        let taken = v.remove(0);
        assert_eq!(drops.get(), 1);
        assert_eq!(taken.id, 4);
        drop(taken);

        drop(v);
        assert_eq!(drops.get(), 5);
    }

    #[test]
    fn truncate_and_clear_drop_tail() {
        let r = Rc::new(0);
        let mut v = Vector::new().unwrap();
        v.resize(6, Rc::clone(&r)).unwrap();
        assert_eq!(Rc::strong_count(&r), 7);
        v.truncate(2);
        assert_eq!(Rc::strong_count(&r), 3);
        v.clear();
        assert_eq!(Rc::strong_count(&r), 1);
        assert!(v.is_empty());
    }

    #[test]
    fn pop_returns_last() {
        let mut v = Vector::try_from_iter(vec!["a", "b"]).unwrap();
        assert_eq!(v.pop(), Some("b"));
        assert_eq!(v.pop(), Some("a"));
        assert_eq!(v.pop(), None);
    }

    #[test]
    fn sort_and_search() {
        let mut v = Vector::try_from_iter(vec![9, 3, 7, 1, 3, 5]).unwrap();
        let (len, cap) = (v.len(), v.capacity());
        v.sort_by(i32::cmp);
        assert_eq!(&v[..], &[1, 3, 3, 5, 7, 9]);
        assert_eq!(v.len(), len);
        assert_eq!(v.capacity(), cap);
        assert_eq!(v.find(&3, i32::cmp, 0, true), Some(1));
        assert_eq!(v.find(&3, i32::cmp, 2, true), Some(2));
        assert_eq!(v.find(&3, i32::cmp, 3, true), None);
        assert_eq!(v.find(&4, i32::cmp, 0, true), None);
        assert_eq!(v.find(&9, i32::cmp, 6, false), None);
    }

    #[test]
    fn find_by_key() {
        let v = Vector::try_from_iter(vec![(1, "one"), (2, "two"), (3, "three")]).unwrap();
        let by_key = |key: &i32, item: &(i32, &'static str)| key.cmp(&item.0);
        assert_eq!(v.find(&2, by_key, 0, false), Some(1));
        assert_eq!(v.find(&4, by_key, 0, false), None);
    }

    #[test]
    fn map_mutates_in_place() {
        let mut v = Vector::try_from_iter(1..=4u32).unwrap();
        let mut visited = 0;
        v.map(|item| {
            *item *= 10;
            visited += 1;
        });
        assert_eq!(visited, 4);
        assert_eq!(&v[..], &[10, 20, 30, 40]);
    }

    #[test]
    fn creation_out_of_memory() {
        let err = Vector::<u64, _>::new_in(NoOp).unwrap_err();
        assert!(matches!(err, Error::OutOfMemory { .. }));
    }

    #[test]
    fn push_out_of_memory_leaves_vector_intact() {
        let alloc = Limited::new(Global, 4 * mem::size_of::<u64>());
        let mut v = Vector::<u64, _>::new_in(alloc.clone()).unwrap();
        for i in 0..4 {
            v.push(i).unwrap();
        }

        let err = v.push(4).unwrap_err();
        assert!(matches!(err, Error::OutOfMemory { .. }));
        let err = v.insert(0, 4).unwrap_err();
        assert!(matches!(err, Error::OutOfMemory { .. }));

        assert_eq!(v.len(), 4);
        assert_eq!(v.capacity(), 4);
        assert_eq!(&v[..], &[0, 1, 2, 3]);

        drop(v);
        assert_eq!(alloc.remaining(), 4 * mem::size_of::<u64>());
    }

    #[test]
    fn extend_out_of_memory_rolls_back() {
        let alloc = Limited::new(Global, 4 * mem::size_of::<u64>());
        let mut v = Vector::<u64, _>::new_in(alloc).unwrap();
        v.push(100).unwrap();

        // `filter` reports a lower bound of zero, so nothing is reserved up front.
        let err = v.try_extend((0..10u64).filter(|_| true)).unwrap_err();
        assert!(matches!(err, Error::OutOfMemory { .. }));
        assert_eq!(&v[..], &[100]);
    }

    #[test]
    fn extend_rollback_drops_taken_items() {
        let drops = Rc::new(Cell::new(0));
        let alloc = Limited::new(Global, 2 * mem::size_of::<Tracked>());
        let mut v = Vector::<Tracked, _>::with_growth_in(2, alloc).unwrap();
        v.push(Tracked::new(0, &drops)).unwrap();

        let more = (1..5).map(|id| Tracked::new(id, &drops)).filter(|_| true);
        assert!(v.try_extend(more).is_err());
        assert_eq!(v.len(), 1);
        assert_eq!(v.at(0).id, 0);
        // Item 1 was pushed and rolled back, item 2 was dropped by the failed push.
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn clone_keeps_growth() {
        let mut v = Vector::<String>::with_growth(3).unwrap();
        v.try_extend(vec!["x".to_string(), "y".to_string()]).unwrap();
        let c = v.clone();
        assert_eq!(c, v);
        assert_eq!(c.growth(), 3);
    }

    #[quickcheck]
    fn growth_is_transparent(items: std::vec::Vec<u32>, growth: u8) {
        let mut v = Vector::with_growth(usize::from(growth)).unwrap();
        for (idx, item) in items.iter().enumerate() {
            v.push(*item).unwrap();
            assert_eq!(v.len(), idx + 1);
        }
        assert_eq!(&v[..], &items[..]);
        assert!(v.capacity() >= v.len());
        assert_eq!(v.capacity() % v.growth(), 0);
        assert!(v.capacity() - v.len() <= v.growth());
    }

    #[quickcheck]
    fn sorted_and_linear_find_agree(mut items: std::vec::Vec<u8>, key: u8, start: usize) {
        items.sort();
        let v = Vector::try_from_iter(items.iter().cloned()).unwrap();
        let start = start % (v.len() + 1);
        assert_eq!(
            v.find(&key, u8::cmp, start, true),
            v.find(&key, u8::cmp, start, false)
        );
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Action<T> {
        Push(T),
        Insert(usize, T),
        Replace(usize, T),
        Delete(usize),
        Pop,
        Get(usize),
    }

    impl<T: Arbitrary> Arbitrary for Action<T> {
        fn arbitrary<G: quickcheck::Gen>(g: &mut G) -> Self {
            match g.gen_range(0, 6) {
                0 => Action::Push(T::arbitrary(g)),
                1 => Action::Insert(g.gen(), T::arbitrary(g)),
                2 => Action::Replace(g.gen(), T::arbitrary(g)),
                3 => Action::Delete(g.gen()),
                4 => Action::Pop,
                5 => Action::Get(g.gen_range(0, 1000)),
                _ => unreachable!(),
            }
        }
    }

    fn check_actions<T, I>(initial: &[T], growth: usize, actions: I) -> TestResult
    where
        T: Clone + Debug + PartialEq,
        I: IntoIterator<Item = Action<T>>,
    {
        let mut result = Vector::with_growth(growth).unwrap();
        result.try_extend(initial.iter().cloned()).unwrap();
        let mut reference: std::vec::Vec<T> = initial.to_vec();

        for action in actions {
            match action {
                Action::Push(item) => {
                    result.push(item.clone()).expect("Push failed");
                    reference.push(item);
                }
                Action::Insert(idx, item) => {
                    let idx = idx % (reference.len() + 1);
                    result.insert(idx, item.clone()).expect("Insert failed");
                    reference.insert(idx, item);
                }
                Action::Replace(idx, item) if !reference.is_empty() => {
                    let idx = idx % reference.len();
                    result.replace(idx, item.clone());
                    reference[idx] = item;
                }
                Action::Delete(idx) if !reference.is_empty() => {
                    let idx = idx % reference.len();
                    result.delete(idx);
                    reference.remove(idx);
                }
                Action::Replace(..) | Action::Delete(_) => {}
                Action::Pop => assert_eq!(result.pop(), reference.pop()),
                Action::Get(idx) => assert_eq!(result.get(idx), reference.get(idx)),
            }
            assert_eq!(result.len(), reference.len());
        }

        assert_eq!(&result[..], &reference[..]);
        TestResult::passed()
    }

    #[quickcheck]
    fn check_actions_u8(
        initial: std::vec::Vec<u8>,
        growth: u8,
        actions: std::vec::Vec<Action<u8>>,
    ) -> TestResult {
        check_actions(&initial, usize::from(growth), actions)
    }

    #[quickcheck]
    fn check_actions_string(
        initial: std::vec::Vec<String>,
        growth: u8,
        actions: std::vec::Vec<Action<String>>,
    ) -> TestResult {
        check_actions(&initial, usize::from(growth), actions)
    }
}
