//! Allocator abstraction the containers are parameterized over.
//!
//! The trait follows the shape of the unstable `std::alloc::Alloc`, reduced to what a
//! linearly growing buffer needs.

use snafu::{OptionExt, Snafu};
use std::{
    alloc::Layout,
    cell::Cell,
    cmp,
    ptr::{self, NonNull},
    rc::Rc,
};

#[derive(Debug, Snafu)]
#[snafu(visibility = "pub")]
pub enum Error {
    #[snafu(display("Allocation of {:?} failed", layout))]
    AllocationError { layout: Layout },

    #[snafu(display("Allocation of {} items of {:?} has failed", items, layout))]
    ArrayAllocationError { layout: Layout, items: usize },

    #[snafu(display("Reallocation of {:?} to size {} failed", layout, new_size))]
    ReallocationError { layout: Layout, new_size: usize },

    #[snafu(display(
        "Reallocation of {} items of {:?} to {} items has failed",
        items,
        layout,
        new_items
    ))]
    ArrayReallocationError {
        layout: Layout,
        items: usize,
        new_items: usize,
    },

    #[snafu(display("Can't allocate space for zero-sized elements"))]
    ZeroSize,
}

/// A memory allocator.
///
/// # Safety
///
/// Implementors must hand out blocks that are valid for the requested layout and stay valid
/// until they are passed back to `dealloc` or `realloc`.
pub unsafe trait Alloc {
    /// Returns a pointer meeting the size and alignment guarantees of `layout`.
    ///
    /// # Safety
    ///
    /// `layout` must have a non-zero size.
    unsafe fn alloc(&mut self, layout: Layout) -> Result<NonNull<u8>, Error>;

    /// Deallocates the memory referenced by `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must denote a block currently allocated via this allocator with `layout`.
    unsafe fn dealloc(&mut self, ptr: NonNull<u8>, layout: Layout);

    /// Resizes the block at `ptr` to `new_size` bytes, keeping `layout`'s alignment.
    ///
    /// On `Err` the original block is still owned by the caller and its contents are
    /// unaltered. Growing containers rely on that to stay intact when memory runs out.
    ///
    /// # Safety
    ///
    /// `ptr` must be currently allocated via this allocator with `layout`, and `new_size`
    /// must be non-zero.
    unsafe fn realloc(
        &mut self,
        ptr: NonNull<u8>,
        layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, Error> {
        let new_layout = Layout::from_size_align_unchecked(new_size, layout.align());
        let new_ptr = self.alloc(new_layout)?;
        ptr::copy_nonoverlapping(
            ptr.as_ptr(),
            new_ptr.as_ptr(),
            cmp::min(layout.size(), new_size),
        );
        self.dealloc(ptr, layout);
        Ok(new_ptr)
    }

    /// Allocates a block suitable for holding `n` instances of `T`.
    ///
    /// Always returns `Err` on arithmetic overflow and for zero-sized requests.
    fn alloc_array<T>(&mut self, n: usize) -> Result<NonNull<T>, Error>
    where
        Self: Sized,
    {
        match Layout::array::<T>(n) {
            Ok(layout) if layout.size() > 0 => unsafe { self.alloc(layout).map(NonNull::cast) },
            _ => Err(Error::ArrayAllocationError {
                layout: Layout::new::<T>(),
                items: n,
            }),
        }
    }

    /// Resizes a block holding `n_old` instances of `T` to hold `n_new` of them.
    ///
    /// # Safety
    ///
    /// `ptr` must be currently allocated via this allocator for exactly `n_old` items.
    unsafe fn realloc_array<T>(
        &mut self,
        ptr: NonNull<T>,
        n_old: usize,
        n_new: usize,
    ) -> Result<NonNull<T>, Error>
    where
        Self: Sized,
    {
        match (Layout::array::<T>(n_old), Layout::array::<T>(n_new)) {
            (Ok(k_old), Ok(k_new)) if k_old.size() > 0 && k_new.size() > 0 => self
                .realloc(ptr.cast(), k_old, k_new.size())
                .map(NonNull::cast),
            _ => Err(Error::ArrayReallocationError {
                layout: Layout::new::<T>(),
                items: n_old,
                new_items: n_new,
            }),
        }
    }

    /// Deallocates a block holding `n` instances of `T`.
    ///
    /// # Safety
    ///
    /// `ptr` must be currently allocated via this allocator for exactly `n` items.
    unsafe fn dealloc_array<T>(&mut self, ptr: NonNull<T>, n: usize)
    where
        Self: Sized,
    {
        if let Ok(layout) = Layout::array::<T>(n) {
            if layout.size() > 0 {
                self.dealloc(ptr.cast(), layout)
            }
        }
    }
}

/// The global (std) heap.
#[derive(Debug, Default, Clone, Copy)]
pub struct Global;

unsafe impl Alloc for Global {
    unsafe fn alloc(&mut self, layout: Layout) -> Result<NonNull<u8>, Error> {
        let ptr = std::alloc::alloc(layout);
        NonNull::new(ptr).context(AllocationError { layout })
    }

    unsafe fn dealloc(&mut self, ptr: NonNull<u8>, layout: Layout) {
        std::alloc::dealloc(ptr.as_ptr(), layout)
    }

    unsafe fn realloc(
        &mut self,
        ptr: NonNull<u8>,
        layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, Error> {
        let ptr = std::alloc::realloc(ptr.as_ptr(), layout, new_size);
        NonNull::new(ptr).context(ReallocationError { layout, new_size })
    }
}

/// An allocator that refuses every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOp;

unsafe impl Alloc for NoOp {
    unsafe fn alloc(&mut self, layout: Layout) -> Result<NonNull<u8>, Error> {
        Err(Error::AllocationError { layout })
    }

    unsafe fn dealloc(&mut self, _ptr: NonNull<u8>, _layout: Layout) {
        /* No op */
    }
}

/// Wraps another allocator and refuses requests once a byte budget is spent.
///
/// Clones share the same budget, so every bucket of a hash set draws from one pool.
#[derive(Debug, Clone)]
pub struct Limited<A> {
    inner: A,
    remaining: Rc<Cell<usize>>,
}

impl<A: Alloc> Limited<A> {
    /// Creates an allocator that hands out at most `budget` bytes at a time.
    pub fn new(inner: A, budget: usize) -> Self {
        Limited {
            inner,
            remaining: Rc::new(Cell::new(budget)),
        }
    }

    /// Bytes that can still be allocated.
    pub fn remaining(&self) -> usize {
        self.remaining.get()
    }
}

unsafe impl<A: Alloc> Alloc for Limited<A> {
    unsafe fn alloc(&mut self, layout: Layout) -> Result<NonNull<u8>, Error> {
        let remaining = self.remaining.get();
        if layout.size() > remaining {
            return Err(Error::AllocationError { layout });
        }
        let ptr = self.inner.alloc(layout)?;
        self.remaining.set(remaining - layout.size());
        Ok(ptr)
    }

    unsafe fn dealloc(&mut self, ptr: NonNull<u8>, layout: Layout) {
        self.inner.dealloc(ptr, layout);
        self.remaining.set(self.remaining.get() + layout.size());
    }

    unsafe fn realloc(
        &mut self,
        ptr: NonNull<u8>,
        layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, Error> {
        let remaining = self.remaining.get();
        let old_size = layout.size();
        if new_size > old_size && new_size - old_size > remaining {
            return Err(Error::ReallocationError { layout, new_size });
        }
        let new_ptr = self.inner.realloc(ptr, layout, new_size)?;
        self.remaining.set(remaining + old_size - new_size);
        Ok(new_ptr)
    }
}
