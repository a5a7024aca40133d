#![no_std]
#![warn(missing_docs)]

//! A contiguous vector whose capacity is fixed at construction, generic over
//! the allocator providing its storage.
//!
//! ```
//! use fixvec::{Error, FixedVec};
//!
//! let mut vec = FixedVec::<u32>::with_capacity(2)?;
//! vec.push(1);
//! vec.push(2);
//! assert!(vec.is_full());
//! assert_eq!(vec.try_push(3), Err(Error::CapacityExceeded { capacity: 2 }));
//! assert_eq!(vec.at(2), Err(Error::IndexOutOfRange { index: 2, len: 2 }));
//! # Ok::<(), Error>(())
//! ```

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod logging;

pub mod allocator;
pub mod error;
pub mod memory;
pub mod vec;

pub use crate::allocator::{AlignedAllocator, Allocator, DefaultAllocator};
pub use crate::error::{AllocError, Error};
pub use crate::vec::FixedVec;
