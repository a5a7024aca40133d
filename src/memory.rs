//! Raw block acquisition for the allocator strategies.
//!
//! Two pairs of primitives are provided. The unaligned pair requests blocks
//! with the natural alignment of the element type, like `malloc` would. The
//! aligned pair requests an explicit power-of-two alignment and rounds the
//! byte size up to a multiple of it first, which is what `aligned_alloc`
//! style primitives expect.
//!
//! Requests for zero bytes never reach the global allocator: they succeed with
//! a dangling pointer carrying the requested alignment, and releasing such a
//! block is a no-op.

use crate::error::AllocError;

use alloc::alloc::{alloc, dealloc, Layout};
use core::cmp;
use core::mem::{align_of, size_of};
use core::ptr::NonNull;

/// The largest alignment the unaligned primitives are guaranteed to satisfy
/// for any type, mirroring the guarantee of a C `malloc`.
///
/// Types aligned beyond this are considered over-aligned.
pub const MAX_FUNDAMENTAL_ALIGN: usize = 2 * size_of::<usize>();

/// Returns `true` if `alignment` is a non-zero power of two.
#[inline]
pub const fn is_power_of_two(alignment: usize) -> bool {
    alignment != 0 && (alignment & (alignment - 1)) == 0
}

/// Rounds `size_in_bytes` up to the next multiple of `alignment`.
///
/// Returns [`None`] if the result does not fit in a `usize`.
///
/// # Examples
/// ```
/// use fixvec::memory::round_allocation_size;
/// assert_eq!(round_allocation_size(64, 24), Some(64));
/// assert_eq!(round_allocation_size(64, 64), Some(64));
/// assert_eq!(round_allocation_size(64, 65), Some(128));
/// assert_eq!(round_allocation_size(8, 0), Some(0));
/// ```
#[inline]
pub const fn round_allocation_size(alignment: usize, size_in_bytes: usize) -> Option<usize> {
    debug_assert!(is_power_of_two(alignment));
    match size_in_bytes.checked_add(alignment - 1) {
        Some(padded) => Some(padded / alignment * alignment),
        None => None,
    }
}

#[inline]
fn array_bytes<T>(num_elements: usize, align: usize) -> Result<usize, AllocError> {
    size_of::<T>()
        .checked_mul(num_elements)
        .ok_or(AllocError { size: usize::MAX, align })
}

fn dangling<T>(align: usize) -> NonNull<T> {
    // Any non-zero multiple of `align` is suitably aligned for a zero-byte block.
    unsafe { NonNull::new_unchecked(align as *mut T) }
}

fn aligned_layout<T>(alignment: usize, num_elements: usize) -> Result<Layout, AllocError> {
    assert!(
        is_power_of_two(alignment),
        "alignment must be a power of two (is {})",
        alignment
    );

    // Never below the natural alignment of `T`.
    let alignment = cmp::max(alignment, align_of::<T>());
    let bytes = array_bytes::<T>(num_elements, alignment)?;
    let rounded = round_allocation_size(alignment, bytes).ok_or(AllocError {
        size: usize::MAX,
        align: alignment,
    })?;
    Layout::from_size_align(rounded, alignment).map_err(|_| AllocError {
        size: rounded,
        align: alignment,
    })
}

fn unaligned_layout<T>(num_elements: usize) -> Result<Layout, AllocError> {
    Layout::array::<T>(num_elements).map_err(|_| AllocError {
        size: size_of::<T>().saturating_mul(num_elements),
        align: align_of::<T>(),
    })
}

fn acquire<T>(layout: Layout) -> Result<NonNull<T>, AllocError> {
    if layout.size() == 0 {
        return Ok(dangling(layout.align()));
    }

    let ptr = unsafe { alloc(layout) };
    match NonNull::new(ptr as *mut T) {
        Some(ptr) => {
            trace!(
                "acquired {} bytes aligned to {} at {:p}",
                layout.size(),
                layout.align(),
                ptr
            );
            Ok(ptr)
        }
        None => {
            debug!(
                "failed to acquire {} bytes aligned to {}",
                layout.size(),
                layout.align()
            );
            Err(AllocError {
                size: layout.size(),
                align: layout.align(),
            })
        }
    }
}

unsafe fn release<T>(ptr: NonNull<T>, layout: Layout) {
    if layout.size() == 0 {
        return;
    }

    trace!(
        "releasing {} bytes aligned to {} at {:p}",
        layout.size(),
        layout.align(),
        ptr
    );
    dealloc(ptr.as_ptr() as *mut u8, layout);
}

/// Allocates uninitialized storage for `num_elements` values of type `T`,
/// starting at an address that is a multiple of `alignment`.
///
/// An `alignment` smaller than that of `T` is raised to `align_of::<T>()`.
/// The byte size is rounded up to a multiple of the effective alignment
/// before the block is requested.
///
/// # Panics
/// Panics if `alignment` is not a power of two.
///
/// # Examples
/// ```
/// use fixvec::memory::{allocate_aligned, free_aligned};
///
/// let ptr = allocate_aligned::<u64>(64, 3).unwrap();
/// assert_eq!(ptr.as_ptr() as usize % 64, 0);
/// unsafe { free_aligned(ptr, 64, 3) };
/// ```
pub fn allocate_aligned<T>(alignment: usize, num_elements: usize) -> Result<NonNull<T>, AllocError> {
    acquire(aligned_layout::<T>(alignment, num_elements)?)
}

/// Releases a block obtained from [`allocate_aligned`].
///
/// # Safety
/// `ptr` must have been returned by `allocate_aligned::<T>(alignment,
/// num_elements)` with the same arguments, and must not have been released
/// already.
pub unsafe fn free_aligned<T>(ptr: NonNull<T>, alignment: usize, num_elements: usize) {
    // Cannot fail: the same computation succeeded when the block was acquired.
    if let Ok(layout) = aligned_layout::<T>(alignment, num_elements) {
        release(ptr, layout);
    }
}

/// Allocates uninitialized storage for `num_elements` values of type `T`
/// with the natural alignment of `T`.
///
/// This is the general-purpose path; callers route over-aligned types through
/// [`allocate_aligned`] instead.
pub fn allocate_unaligned<T>(num_elements: usize) -> Result<NonNull<T>, AllocError> {
    acquire(unaligned_layout::<T>(num_elements)?)
}

/// Releases a block obtained from [`allocate_unaligned`].
///
/// # Safety
/// `ptr` must have been returned by `allocate_unaligned::<T>(num_elements)`
/// with the same `num_elements`, and must not have been released already.
pub unsafe fn free_unaligned<T>(ptr: NonNull<T>, num_elements: usize) {
    if let Ok(layout) = unaligned_layout::<T>(num_elements) {
        release(ptr, layout);
    }
}
