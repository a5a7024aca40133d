//! The allocator capability a [`FixedVec`](crate::FixedVec) is generic over.
//!
//! An [`Allocator<T>`] hands out raw, uninitialized blocks sized for some
//! number of `T`s and takes them back. It knows nothing about which slots
//! hold live values; that bookkeeping belongs to the container.
//!
//! Two strategies are provided:
//!
//! * [`DefaultAllocator`] requests blocks with the natural alignment of `T`,
//!   switching to the aligned primitive only for over-aligned types.
//! * [`AlignedAllocator`] always requests an explicit alignment, either given
//!   as a const parameter or derived from `T`.
//!
//! Both are zero-sized, and any two instances compare equal regardless of
//! their element type, so memory acquired through one instance may be
//! released through any other instance of the same strategy.

use crate::error::AllocError;
use crate::memory::{
    allocate_aligned, allocate_unaligned, free_aligned, free_unaligned, is_power_of_two,
    MAX_FUNDAMENTAL_ALIGN,
};

use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;
use core::mem::align_of;
use core::ptr::NonNull;

/// A strategy for acquiring and releasing raw storage for values of type `T`.
///
/// # Safety
/// Implementors must ensure that
/// * a block returned by [`allocate(n)`](Allocator::allocate) is valid for
///   reads and writes of `n` consecutive `T`s, is aligned for `T`, and stays
///   valid until it is passed to [`deallocate`](Allocator::deallocate),
/// * a block may be released through any instance that compares equal to the
///   one that allocated it, including clones and
///   [`select_on_copy`](Allocator::select_on_copy) results.
pub unsafe trait Allocator<T>: Clone + PartialEq {
    /// The same strategy, specialized for elements of type `U`.
    type Rebind<U>: Allocator<U>;

    /// `true` if every two instances of this strategy compare equal.
    ///
    /// When `false`, containers handing a block over to a clone of their
    /// allocator check in debug builds that the clone compares equal.
    const IS_ALWAYS_EQUAL: bool = false;

    /// Acquires uninitialized storage for `count` values of type `T`.
    ///
    /// Never returns a null pointer; failure is reported as an [`AllocError`].
    fn allocate(&self, count: usize) -> Result<NonNull<T>, AllocError>;

    /// Releases a block previously returned by [`allocate`](Allocator::allocate).
    ///
    /// # Safety
    /// `ptr` must have been returned by `allocate(count)` on this allocator or
    /// one that compares equal to it, with the same `count`, and must not have
    /// been released already. Any values in the block must already have been
    /// dropped or moved out.
    unsafe fn deallocate(&self, ptr: NonNull<T>, count: usize);

    /// Produces the equivalent allocator for elements of type `U`.
    fn rebind<U>(&self) -> Self::Rebind<U>;

    /// Chooses the allocator a copy of a container should use.
    ///
    /// Defaults to a clone of `self`.
    #[inline]
    fn select_on_copy(&self) -> Self {
        self.clone()
    }
}

/// The general-purpose allocation strategy.
///
/// Types whose alignment does not exceed
/// [`MAX_FUNDAMENTAL_ALIGN`](crate::memory::MAX_FUNDAMENTAL_ALIGN) are
/// allocated with the unaligned primitive; over-aligned types are routed
/// through the aligned one with `align_of::<T>()`.
///
/// # Examples
/// ```
/// use fixvec::{Allocator, DefaultAllocator};
///
/// let alloc = DefaultAllocator::<u32>::new();
/// let block = alloc.allocate(4).unwrap();
/// unsafe { alloc.deallocate(block, 4) };
///
/// assert!(alloc == alloc.rebind::<String>());
/// ```
pub struct DefaultAllocator<T> {
    elem: PhantomData<fn() -> T>,
}

impl<T> DefaultAllocator<T> {
    const IS_OVERALIGNED: bool = align_of::<T>() > MAX_FUNDAMENTAL_ALIGN;

    /// Constructs a new `DefaultAllocator`.
    #[inline]
    pub const fn new() -> Self {
        DefaultAllocator { elem: PhantomData }
    }

    /// Returns `true` if blocks for `T` are requested through the aligned
    /// primitive.
    ///
    /// # Examples
    /// ```
    /// use fixvec::DefaultAllocator;
    ///
    /// #[repr(align(128))]
    /// struct CacheLines([u8; 128]);
    ///
    /// assert!(!DefaultAllocator::<u64>::is_overaligned());
    /// assert!(DefaultAllocator::<CacheLines>::is_overaligned());
    /// ```
    #[inline]
    pub const fn is_overaligned() -> bool {
        Self::IS_OVERALIGNED
    }
}

unsafe impl<T> Allocator<T> for DefaultAllocator<T> {
    type Rebind<U> = DefaultAllocator<U>;

    const IS_ALWAYS_EQUAL: bool = true;

    #[inline]
    fn allocate(&self, count: usize) -> Result<NonNull<T>, AllocError> {
        if Self::IS_OVERALIGNED {
            allocate_aligned(align_of::<T>(), count)
        } else {
            allocate_unaligned(count)
        }
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<T>, count: usize) {
        if Self::IS_OVERALIGNED {
            free_aligned(ptr, align_of::<T>(), count)
        } else {
            free_unaligned(ptr, count)
        }
    }

    #[inline]
    fn rebind<U>(&self) -> DefaultAllocator<U> {
        DefaultAllocator::new()
    }
}

/// An allocation strategy that always requests an explicit alignment.
///
/// With `ALIGN == 0` (the default) the alignment is derived from `T`.
/// Otherwise `ALIGN` must be a power of two, which is checked at compile
/// time, and the effective alignment is the larger of `ALIGN` and
/// `align_of::<T>()`.
///
/// The byte size of every request is rounded up to a multiple of the
/// alignment.
///
/// # Examples
/// ```
/// use fixvec::{AlignedAllocator, Allocator};
///
/// let alloc = AlignedAllocator::<u64, 64>::new();
/// let block = alloc.allocate(3).unwrap();
/// assert_eq!(block.as_ptr() as usize % 64, 0);
/// unsafe { alloc.deallocate(block, 3) };
/// ```
pub struct AlignedAllocator<T, const ALIGN: usize = 0> {
    elem: PhantomData<fn() -> T>,
}

impl<T, const ALIGN: usize> AlignedAllocator<T, ALIGN> {
    /// The alignment every block is requested with.
    pub const ALIGNMENT: usize = {
        assert!(
            ALIGN == 0 || is_power_of_two(ALIGN),
            "AlignedAllocator alignment must be a power of two"
        );
        if ALIGN > align_of::<T>() {
            ALIGN
        } else {
            align_of::<T>()
        }
    };

    /// Constructs a new `AlignedAllocator`.
    #[inline]
    pub const fn new() -> Self {
        AlignedAllocator { elem: PhantomData }
    }

    /// Returns the alignment every block is requested with.
    #[inline]
    pub const fn alignment(&self) -> usize {
        Self::ALIGNMENT
    }
}

unsafe impl<T, const ALIGN: usize> Allocator<T> for AlignedAllocator<T, ALIGN> {
    type Rebind<U> = AlignedAllocator<U>;

    const IS_ALWAYS_EQUAL: bool = true;

    #[inline]
    fn allocate(&self, count: usize) -> Result<NonNull<T>, AllocError> {
        allocate_aligned(Self::ALIGNMENT, count)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<T>, count: usize) {
        free_aligned(ptr, Self::ALIGNMENT, count)
    }

    #[inline]
    fn rebind<U>(&self) -> AlignedAllocator<U> {
        AlignedAllocator::new()
    }
}

// The strategies are zero-sized markers; derives would put needless bounds on `T`.

macro_rules! _impl_marker_traits {
    ($name:ident $(, $align:ident)?) => {
        impl<T $(, const $align: usize)?> Clone for $name<T $(, $align)?> {
            #[inline]
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T $(, const $align: usize)?> Copy for $name<T $(, $align)?> {}

        impl<T $(, const $align: usize)?> Default for $name<T $(, $align)?> {
            #[inline]
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T $(, const $align: usize)?> Debug for $name<T $(, $align)?> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(stringify!($name))
            }
        }

        impl<T $(, const $align: usize)?> Eq for $name<T $(, $align)?> {}
    };
}

_impl_marker_traits! { DefaultAllocator }
_impl_marker_traits! { AlignedAllocator, ALIGN }

impl<T, U> PartialEq<DefaultAllocator<U>> for DefaultAllocator<T> {
    #[inline]
    fn eq(&self, _: &DefaultAllocator<U>) -> bool {
        true
    }
}

impl<T, U, const A: usize, const B: usize> PartialEq<AlignedAllocator<U, B>>
    for AlignedAllocator<T, A>
{
    #[inline]
    fn eq(&self, _: &AlignedAllocator<U, B>) -> bool {
        true
    }
}
