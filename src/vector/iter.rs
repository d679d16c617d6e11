//! Owning iterator over a `Vector`.

use super::Vector;
use crate::{alloc::Alloc, raw_vec::RawVec};
use core::{iter::ExactSizeIterator, mem::ManuallyDrop, ptr, slice};

/// Moves items out of a vector front to back.
///
/// Items that were not yielded are dropped together with the iterator.
pub struct IntoIter<T, A: Alloc> {
    buf: RawVec<T, A>,
    head: usize,
    tail: usize,
}

unsafe impl<T: Send, A: Alloc + Send> Send for IntoIter<T, A> {}
unsafe impl<T: Sync, A: Alloc + Sync> Sync for IntoIter<T, A> {}

impl<T, A: Alloc> IntoIter<T, A> {
    pub(super) fn new(vec: Vector<T, A>) -> Self {
        let vec = ManuallyDrop::new(vec);
        // The vector is never dropped, so its storage moves into the iterator.
        let buf = unsafe { ptr::read(&vec.buf) };
        IntoIter {
            buf,
            head: 0,
            tail: vec.len,
        }
    }

    /// Items that were not yielded yet.
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.as_ptr().add(self.head), self.len()) }
    }
}

impl<T, A: Alloc> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            None
        } else {
            let item = unsafe { self.buf.as_ptr().add(self.head).read() };
            self.head += 1;
            Some(item)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<T, A: Alloc> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            None
        } else {
            self.tail -= 1;
            unsafe { Some(self.buf.as_ptr().add(self.tail).read()) }
        }
    }
}

impl<T, A: Alloc> ExactSizeIterator for IntoIter<T, A> {
    fn len(&self) -> usize {
        self.tail - self.head
    }
}

impl<T, A: Alloc> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        let rest = unsafe {
            slice::from_raw_parts_mut(self.buf.as_ptr().add(self.head), self.tail - self.head)
        };
        self.head = self.tail;
        unsafe { ptr::drop_in_place(rest) };
    }
}
