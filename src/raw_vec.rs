//! Raw storage for the growable containers.

use crate::alloc::{self, Alloc, Global};
use core::{marker::PhantomData, mem, ptr::NonNull};
use log::trace;
use snafu::{ensure, OptionExt, ResultExt, Snafu};
use std::alloc::Layout;

/// Owns an allocation of `capacity` slots of `T` and nothing else.
///
/// * Grows linearly: every growth event adds a caller-chosen number of slots.
/// * Never shrinks.
/// * Uses a dangling pointer for zero-length allocations and zero-sized types.
/// * Catches all overflows in capacity computations and reports them as
///   [`Error::CapacityOverflow`].
/// * Leaves the current allocation untouched if growing fails.
///
/// This type does not in anyway inspect the memory that it manages. When dropped it *will*
/// free its memory, but it *won't* try to drop its contents. It is up to the user of
/// `RawVec` to handle the actual things *stored* inside of it.
pub struct RawVec<T, A: Alloc = Global> {
    ptr: NonNull<T>,
    cap: usize,
    a: A,
    _marker: PhantomData<T>,
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Capacity overflow"))]
    CapacityOverflow,

    #[snafu(display("Allocation failed for: {}", source))]
    Allocation { source: alloc::Error },
}

impl<T> RawVec<T, Global> {
    /// Allocates room for exactly `capacity` items on the global heap.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        RawVec::with_capacity_in(capacity, Global)
    }
}

impl<T, A: Alloc> RawVec<T, A> {
    /// Allocates room for exactly `capacity` items using the given allocator.
    pub fn with_capacity_in(capacity: usize, mut a: A) -> Result<Self, Error> {
        let layout = array_layout::<T>(capacity)?;

        // Handles ZSTs and `capacity == 0` alike.
        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            a.alloc_array::<T>(capacity).context(Allocation)?
        };

        Ok(RawVec {
            ptr,
            cap: capacity,
            a,
            _marker: PhantomData,
        })
    }

    /// Gets a raw pointer to the start of the allocation.
    #[inline]
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Number of slots in the allocation.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns a shared reference to the allocator backing this `RawVec`.
    pub fn alloc(&self) -> &A {
        &self.a
    }

    /// Adds exactly `increment` slots.
    pub fn grow_by(&mut self, increment: usize) -> Result<(), Error> {
        let new_cap = self.cap.checked_add(increment).context(CapacityOverflow)?;
        self.grow_to(new_cap)
    }

    /// Makes sure there is room for `used + extra` items, growing in whole multiples of
    /// `increment` slots.
    pub fn try_reserve(&mut self, used: usize, extra: usize, increment: usize) -> Result<(), Error> {
        debug_assert!(increment > 0);
        let required = used.checked_add(extra).context(CapacityOverflow)?;
        if required <= self.cap {
            return Ok(());
        }
        let shortage = required - self.cap;
        let steps = shortage / increment + (shortage % increment != 0) as usize;
        let new_cap = steps
            .checked_mul(increment)
            .and_then(|extra_slots| self.cap.checked_add(extra_slots))
            .context(CapacityOverflow)?;
        self.grow_to(new_cap)
    }

    fn grow_to(&mut self, new_cap: usize) -> Result<(), Error> {
        debug_assert!(new_cap >= self.cap);
        let new_layout = array_layout::<T>(new_cap)?;

        if new_layout.size() != 0 {
            let ptr = if self.cap == 0 {
                self.a.alloc_array::<T>(new_cap)
            } else {
                unsafe { self.a.realloc_array(self.ptr, self.cap, new_cap) }
            }
            .context(Allocation)?;
            self.ptr = ptr;
        }

        trace!("RawVec grown from {} to {} slots", self.cap, new_cap);
        self.cap = new_cap;
        Ok(())
    }
}

impl<T, A: Alloc> Drop for RawVec<T, A> {
    /// Frees the memory owned by the `RawVec` *without* trying to drop its contents.
    fn drop(&mut self) {
        if mem::size_of::<T>() != 0 && self.cap != 0 {
            unsafe { self.a.dealloc_array(self.ptr, self.cap) }
        }
    }
}

// We need to guarantee the following:
// * We don't ever allocate `> isize::MAX` byte-size objects.
// * We don't overflow `usize::MAX` and actually allocate too little.
fn array_layout<T>(capacity: usize) -> Result<Layout, Error> {
    let layout = Layout::array::<T>(capacity).ok().context(CapacityOverflow)?;
    ensure!(layout.size() <= isize::MAX as usize, CapacityOverflow);
    Ok(layout)
}
