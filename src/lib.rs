//! Growable containers that do not rely on the global allocator: a linearly growing
//! vector, a hash set with a fixed number of buckets, and a stack.

pub mod alloc;
pub mod error;
pub mod hashset;
pub mod raw_vec;
pub mod stack;
#[macro_use]
pub mod vector;

pub use alloc::Alloc;
pub use error::Error;
pub use hashset::HashSet;
pub use stack::Stack;
pub use vector::Vector;
