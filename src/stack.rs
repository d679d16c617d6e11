//! LIFO stack on top of [`Vector`].

use crate::{
    alloc::{Alloc, Global},
    error::Error,
    vector::{Vector, DEFAULT_GROWTH},
};
use core::fmt;

/// Last-in, first-out stack. Growth and item cleanup are the underlying vector's.
pub struct Stack<T, A: Alloc = Global> {
    items: Vector<T, A>,
}

impl<T> Stack<T> {
    /// Creates an empty stack with the default growth increment.
    pub fn new() -> Result<Self, Error> {
        Self::with_growth_in(DEFAULT_GROWTH, Global)
    }

    /// Creates an empty stack that grows by `growth` slots at a time.
    pub fn with_growth(growth: usize) -> Result<Self, Error> {
        Self::with_growth_in(growth, Global)
    }
}

impl<T, A: Alloc> Stack<T, A> {
    /// Creates an empty stack that grows by `growth` slots at a time, using a given allocator.
    pub fn with_growth_in(growth: usize, alloc: A) -> Result<Self, Error> {
        let items = Vector::with_growth_in(growth, alloc)?;
        Ok(Stack { items })
    }

    /// Pushes an item on top. On `Err` the item is dropped and the stack is unchanged.
    pub fn push(&mut self, item: T) -> Result<(), Error> {
        self.items.push(item)
    }

    /// Takes the most recently pushed item off the stack.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// The most recently pushed item.
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }

    /// Number of items on the stack.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: fmt::Debug, A: Alloc> fmt::Debug for Stack<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.items, f)
    }
}
