//! Error types reported by allocators and fixed vectors.

use thiserror::Error;

/// The platform could not supply a block of the requested size and alignment.
///
/// Also reported when the byte size of a request does not fit in `isize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("failed to allocate {size} bytes aligned to {align}")]
pub struct AllocError {
    /// The number of bytes requested, or `usize::MAX` if computing it overflowed.
    pub size: usize,
    /// The alignment requested.
    pub align: usize,
}

/// The ways an operation on a [`FixedVec`](crate::FixedVec) can fail.
///
/// None of these leave the vector in an unusable state: a failed construction
/// releases everything it acquired, and a failed append or checked access
/// leaves the vector unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Error {
    /// The allocator could not provide the backing block.
    #[error(transparent)]
    Alloc(#[from] AllocError),
    /// An element was appended to a vector that was already full.
    #[error("adding element after end of fixed vector (capacity is {capacity})")]
    CapacityExceeded {
        /// The capacity of the vector.
        capacity: usize,
    },
    /// A checked access named a slot outside the live prefix.
    #[error("index out of range in fixed vector (is {index}, len is {len})")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The number of live elements at the time of the access.
        len: usize,
    },
}
