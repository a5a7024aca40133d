//! A contiguous array type whose capacity is fixed when it is constructed.
//!
//! A [`FixedVec`] acquires exactly one block from its [`Allocator`] when it
//! is constructed, and gives it back when it is dropped. Values are written
//! into the leading slots of that block one at a time; the vector tracks how
//! many of them are live, and never touches the rest.
//!
//! Because the block is never reallocated, operations that grow the vector
//! may fail. Checked versions returning a [`Result`] are provided for all of
//! them ([`try_push`](FixedVec::try_push),
//! [`try_emplace_with`](FixedVec::try_emplace_with)); the plain versions
//! panic instead.
//!
//! A vector can be cloned, which allocates a fresh block sized to the live
//! elements, or [taken](FixedVec::take), which moves the block out and leaves
//! the source without any storage. There is deliberately no way to reassign
//! the contents of one vector to another in place.

use crate::allocator::{Allocator, DefaultAllocator};
use crate::error::Error;

use core::convert::TryFrom;
use core::fmt::{self, Debug, Formatter};
use core::hash::{Hash, Hasher};
use core::iter::{FusedIterator, IntoIterator as IntoIter};
use core::marker::PhantomData;
use core::mem::ManuallyDrop;
use core::ops::{Deref, DerefMut, Index, IndexMut};
use core::ptr::{self, NonNull};
use core::slice::{self, SliceIndex};

/// A contiguous array type with a capacity fixed at construction.
///
/// Generic over the element type `T` and the allocator `A` providing the
/// backing block.
///
/// See the [module-level documentation](crate::vec) for more.
pub struct FixedVec<T, A = DefaultAllocator<T>>
where
    A: Allocator<T>,
{
    // `None` once the block has been moved out by `take`.
    buf: Option<NonNull<T>>,
    len: usize,
    cap: usize,
    alloc: A,
    elem: PhantomData<T>,
}

unsafe impl<T: Send, A: Allocator<T> + Send> Send for FixedVec<T, A> {}
unsafe impl<T: Sync, A: Allocator<T> + Sync> Sync for FixedVec<T, A> {}

/// Releases a block when dropped, even while unwinding out of element destructors.
struct ReleaseOnDrop<'a, T, A: Allocator<T>> {
    alloc: &'a A,
    ptr: NonNull<T>,
    cap: usize,
}

impl<T, A: Allocator<T>> Drop for ReleaseOnDrop<'_, T, A> {
    fn drop(&mut self) {
        unsafe { self.alloc.deallocate(self.ptr, self.cap) }
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn capacity_failed(capacity: usize) -> ! {
    panic!(
        "adding element after end of fixed vector (capacity is {})",
        capacity
    )
}

#[cold]
#[inline(never)]
#[track_caller]
fn empty_failed(method: &str) -> ! {
    panic!("called `FixedVec::{}` on an empty vector", method)
}

impl<T> FixedVec<T> {
    /// Constructs a new, empty vector able to hold exactly `capacity` elements.
    ///
    /// # Examples
    /// ```
    /// use fixvec::FixedVec;
    ///
    /// let vec = FixedVec::<u32>::with_capacity(10).unwrap();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.capacity(), 10);
    /// assert!(vec.is_empty());
    /// assert!(!vec.is_full());
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        Self::with_capacity_in(capacity, DefaultAllocator::new())
    }

    /// Constructs a full vector holding `capacity` copies of `value`.
    ///
    /// # Examples
    /// ```
    /// use fixvec::FixedVec;
    ///
    /// let vec = FixedVec::from_elem(14, 10).unwrap();
    /// assert!(vec.is_full());
    /// assert!(vec.iter().all(|&x| x == 14));
    /// ```
    #[inline]
    pub fn from_elem(value: T, capacity: usize) -> Result<Self, Error>
    where
        T: Clone,
    {
        Self::from_elem_in(value, capacity, DefaultAllocator::new())
    }

    /// Constructs a vector from an iterator of known length, with a capacity
    /// equal to that length.
    ///
    /// # Examples
    /// ```
    /// use fixvec::FixedVec;
    ///
    /// let vec = FixedVec::<u32>::from_exact_iter(1..11).unwrap();
    /// assert_eq!(vec.capacity(), 10);
    /// assert!(vec.iter().rev().copied().eq((1..11).rev()));
    /// ```
    #[inline]
    pub fn from_exact_iter<I>(iter: I) -> Result<Self, Error>
    where
        I: IntoIter<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        Self::from_exact_iter_in(iter, DefaultAllocator::new())
    }

    /// Constructs a full vector holding clones of the elements of `source`.
    #[inline]
    pub fn from_slice(source: &[T]) -> Result<Self, Error>
    where
        T: Clone,
    {
        Self::from_exact_iter_in(source.iter().cloned(), DefaultAllocator::new())
    }
}

impl<T, A> FixedVec<T, A>
where
    A: Allocator<T>,
{
    /// Constructs a new, empty vector able to hold exactly `capacity` elements,
    /// acquiring its storage from `alloc`.
    ///
    /// # Examples
    /// ```
    /// use fixvec::{AlignedAllocator, FixedVec};
    ///
    /// let vec = FixedVec::<u64, _>::with_capacity_in(3, AlignedAllocator::<u64, 64>::new()).unwrap();
    /// assert_eq!(vec.as_ptr() as usize % 64, 0);
    /// ```
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, Error> {
        let ptr = alloc.allocate(capacity)?;
        Ok(FixedVec {
            buf: Some(ptr),
            len: 0,
            cap: capacity,
            alloc,
            elem: PhantomData,
        })
    }

    /// Constructs a full vector holding `capacity` copies of `value`,
    /// acquiring its storage from `alloc`.
    ///
    /// If cloning `value` panics, the copies made so far are dropped and the
    /// block is released before the panic propagates.
    pub fn from_elem_in(value: T, capacity: usize, alloc: A) -> Result<Self, Error>
    where
        T: Clone,
    {
        let mut vec = Self::with_capacity_in(capacity, alloc)?;
        if capacity > 0 {
            for _ in 1..capacity {
                unsafe { vec.push_unchecked(value.clone()) };
            }
            unsafe { vec.push_unchecked(value) };
        }
        Ok(vec)
    }

    /// Constructs a vector from an iterator of known length, acquiring its
    /// storage from `alloc`.
    ///
    /// The capacity is taken from [`ExactSizeIterator::len`]. Should the
    /// iterator then yield more elements than it reported, the elements
    /// collected so far are dropped, the block is released, and
    /// [`Error::CapacityExceeded`] is returned.
    pub fn from_exact_iter_in<I>(iter: I, alloc: A) -> Result<Self, Error>
    where
        I: IntoIter<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        let mut vec = Self::with_capacity_in(iter.len(), alloc)?;
        for element in iter {
            vec.try_push(element)?;
        }
        Ok(vec)
    }

    /// Clones the vector into a new block sized to its current length,
    /// reporting allocation failure instead of panicking.
    ///
    /// The new block is acquired from [`select_on_copy`](Allocator::select_on_copy).
    ///
    /// # Examples
    /// ```
    /// use fixvec::FixedVec;
    ///
    /// let mut vec = FixedVec::<u32>::with_capacity(8).unwrap();
    /// vec.push(1); vec.push(2); vec.push(3);
    ///
    /// let copy = vec.try_clone().unwrap();
    /// assert_eq!(copy, vec);
    /// assert_eq!(copy.capacity(), 3);
    /// ```
    pub fn try_clone(&self) -> Result<Self, Error>
    where
        T: Clone,
    {
        Self::from_exact_iter_in(self.iter().cloned(), self.alloc.select_on_copy())
    }

    /// Moves the contents and storage out of `self` into a new vector,
    /// leaving `self` empty and without storage.
    ///
    /// No elements are moved or copied. Afterwards `self` has a capacity of
    /// zero, its [`as_ptr`](FixedVec::as_ptr) is null, and dropping it does
    /// nothing.
    ///
    /// # Examples
    /// ```
    /// use fixvec::FixedVec;
    ///
    /// let mut vec = FixedVec::from_elem(1, 10).unwrap();
    /// let moved = vec.take();
    ///
    /// assert_eq!(moved.len(), 10);
    /// assert!(vec.as_ptr().is_null());
    /// assert_eq!(vec.capacity(), 0);
    /// ```
    pub fn take(&mut self) -> Self {
        let len = self.len;
        let cap = self.cap;
        self.len = 0;
        self.cap = 0;

        let moved = FixedVec {
            buf: self.buf.take(),
            len,
            cap,
            alloc: self.alloc.clone(),
            elem: PhantomData,
        };

        // The block is now released through the clone.
        debug_assert!(
            A::IS_ALWAYS_EQUAL || moved.alloc == self.alloc,
            "allocator clone does not compare equal to its source"
        );
        moved
    }

    /// Exchanges the contents, storage and allocators of two vectors.
    ///
    /// This is O(1); no elements are moved or copied.
    ///
    /// # Examples
    /// ```
    /// use fixvec::FixedVec;
    ///
    /// let mut a = FixedVec::from_elem('a', 2).unwrap();
    /// let mut b = FixedVec::from_elem('b', 5).unwrap();
    /// a.swap_with(&mut b);
    ///
    /// assert_eq!(a, &['b'; 5][..]);
    /// assert_eq!(b.capacity(), 2);
    /// ```
    #[inline]
    pub fn swap_with(&mut self, other: &mut Self) {
        core::mem::swap(self, other)
    }

    /// Returns a reference to the allocator backing this vector.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns the number of elements the vector can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns the number of elements in the vector, also referred to as its 'length'.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the vector contains the maximum number of elements.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.cap
    }

    /// Returns `true` unless the storage has been moved out by [`take`](FixedVec::take).
    #[inline]
    pub fn has_storage(&self) -> bool {
        self.buf.is_some()
    }

    /// Returns a raw pointer to the first slot of the block, or a null pointer
    /// if the vector has no storage.
    ///
    /// Only the first [`len`](FixedVec::len) slots hold live values.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        match self.buf {
            Some(ptr) => ptr.as_ptr(),
            None => ptr::null(),
        }
    }

    /// Returns a raw mutable pointer to the first slot of the block, or a null
    /// pointer if the vector has no storage.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        match self.buf {
            Some(ptr) => ptr.as_ptr(),
            None => ptr::null_mut(),
        }
    }

    /// Extracts a slice containing the entire vector.
    ///
    /// Equivalent to `&s[..]`.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match self.buf {
            Some(ptr) => unsafe { slice::from_raw_parts(ptr.as_ptr(), self.len) },
            None => &[],
        }
    }

    /// Extracts a mutable slice of the entire vector.
    ///
    /// Equivalent to `&mut s[..]`.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self.buf {
            Some(ptr) => unsafe { slice::from_raw_parts_mut(ptr.as_ptr(), self.len) },
            None => &mut [],
        }
    }

    /// Returns a reference to the element at `index`, or
    /// [`Error::IndexOutOfRange`] if `index` is not less than the length.
    ///
    /// Only live elements are reachable, regardless of capacity. Indexing with
    /// `[]` panics instead; access without any check is available through the
    /// slice's unsafe `get_unchecked`.
    ///
    /// # Examples
    /// ```
    /// use fixvec::{Error, FixedVec};
    ///
    /// let mut vec = FixedVec::<u32>::with_capacity(4).unwrap();
    /// vec.push(1); vec.push(2);
    /// assert_eq!(vec.at(1), Ok(&2));
    /// assert_eq!(vec.at(2), Err(Error::IndexOutOfRange { index: 2, len: 2 }));
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Returns a mutable reference to the element at `index`, or
    /// [`Error::IndexOutOfRange`] if `index` is not less than the length.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Returns a reference to the first element.
    ///
    /// # Panics
    /// Panics if the vector is empty. The slice's `first` is a checked version.
    #[inline]
    #[track_caller]
    pub fn front(&self) -> &T {
        match self.as_slice().first() {
            Some(first) => first,
            None => empty_failed("front"),
        }
    }

    /// Returns a mutable reference to the first element.
    ///
    /// # Panics
    /// Panics if the vector is empty.
    #[inline]
    #[track_caller]
    pub fn front_mut(&mut self) -> &mut T {
        match self.as_mut_slice().first_mut() {
            Some(first) => first,
            None => empty_failed("front_mut"),
        }
    }

    /// Returns a reference to the last element.
    ///
    /// # Panics
    /// Panics if the vector is empty. The slice's `last` is a checked version.
    #[inline]
    #[track_caller]
    pub fn back(&self) -> &T {
        match self.as_slice().last() {
            Some(last) => last,
            None => empty_failed("back"),
        }
    }

    /// Returns a mutable reference to the last element.
    ///
    /// # Panics
    /// Panics if the vector is empty.
    #[inline]
    #[track_caller]
    pub fn back_mut(&mut self) -> &mut T {
        match self.as_mut_slice().last_mut() {
            Some(last) => last,
            None => empty_failed("back_mut"),
        }
    }

    /// Overwrites every live element with a clone of `value`.
    ///
    /// The length does not change, and slots past it are left untouched.
    ///
    /// # Examples
    /// ```
    /// use fixvec::FixedVec;
    ///
    /// let mut vec = FixedVec::<u32>::with_capacity(4).unwrap();
    /// vec.push(1); vec.push(2);
    /// vec.assign(&7);
    /// assert_eq!(vec, &[7, 7][..]);
    /// ```
    pub fn assign(&mut self, value: &T)
    where
        T: Clone,
    {
        for slot in self.as_mut_slice() {
            slot.clone_from(value);
        }
    }

    /// Writes `value` into the first free slot and returns a reference to it.
    ///
    /// # Safety
    /// The vector must not be full.
    #[inline]
    unsafe fn push_unchecked(&mut self, value: T) -> &mut T {
        debug_assert!(!self.is_full());
        let slot = self.as_mut_ptr().add(self.len);
        slot.write(value);
        self.len += 1;
        &mut *slot
    }

    /// Constructs a new element at the back of the vector from the result of
    /// `f`, returning a reference to it.
    ///
    /// If the vector is already full, `f` is not called, the vector is left
    /// unchanged, and [`Error::CapacityExceeded`] is returned.
    ///
    /// # Examples
    /// ```
    /// use fixvec::{Error, FixedVec};
    ///
    /// struct Pair { sum: i32 }
    ///
    /// let mut vec = FixedVec::<Pair>::with_capacity(1).unwrap();
    /// assert_eq!(vec.try_emplace_with(|| Pair { sum: 1 + 2 }).unwrap().sum, 3);
    /// assert_eq!(
    ///     vec.try_emplace_with(|| unreachable!()).err(),
    ///     Some(Error::CapacityExceeded { capacity: 1 })
    /// );
    /// ```
    #[inline]
    pub fn try_emplace_with<F>(&mut self, f: F) -> Result<&mut T, Error>
    where
        F: FnOnce() -> T,
    {
        if self.is_full() {
            return Err(Error::CapacityExceeded { capacity: self.cap });
        }

        Ok(unsafe { self.push_unchecked(f()) })
    }

    /// Constructs a new element at the back of the vector from the result of
    /// `f`, returning a reference to it.
    ///
    /// # Panics
    /// Panics if the vector is already full. See
    /// [`try_emplace_with`](FixedVec::try_emplace_with) for a checked version
    /// that never panics.
    #[inline]
    #[track_caller]
    pub fn emplace_with<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        if self.is_full() {
            capacity_failed(self.cap);
        }

        unsafe { self.push_unchecked(f()) }
    }

    /// Appends an element to the back of the vector, returning a reference to it.
    ///
    /// Returns [`Error::CapacityExceeded`] if the vector is already full, in
    /// which case `value` is dropped and the vector is left unchanged.
    ///
    /// # Examples
    /// ```
    /// use fixvec::{Error, FixedVec};
    ///
    /// let mut vec = FixedVec::<u32>::with_capacity(3).unwrap();
    /// assert!(vec.try_push(1).is_ok());
    /// assert!(vec.try_push(2).is_ok());
    /// assert!(vec.try_push(3).is_ok());
    /// assert_eq!(vec.try_push(4), Err(Error::CapacityExceeded { capacity: 3 }));
    /// assert_eq!(vec, &[1, 2, 3][..]);
    /// ```
    #[inline]
    pub fn try_push(&mut self, value: T) -> Result<&mut T, Error> {
        self.try_emplace_with(|| value)
    }

    /// Appends an element to the back of the vector, returning a reference to it.
    ///
    /// # Panics
    /// Panics if the vector is already full. See [`try_push`](FixedVec::try_push)
    /// for a checked version that never panics.
    #[inline]
    #[track_caller]
    pub fn push(&mut self, value: T) -> &mut T {
        if self.is_full() {
            capacity_failed(self.cap);
        }

        unsafe { self.push_unchecked(value) }
    }

    /// Removes the last element from the vector and returns it, or [`None`] if it is empty.
    ///
    /// The freed slot can be filled again; capacity never changes.
    ///
    /// # Examples
    /// ```
    /// use fixvec::FixedVec;
    ///
    /// let mut vec = FixedVec::<u32>::from_exact_iter(1..4).unwrap();
    /// assert_eq!(vec.pop(), Some(3));
    /// assert_eq!(vec, &[1, 2][..]);
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        self.len -= 1;
        unsafe { Some(self.as_ptr().add(self.len).read()) }
    }

    /// Shortens the vector, keeping the first `len` elements and dropping the rest.
    ///
    /// If `len` is greater than the vector's current length, this has no effect.
    ///
    /// # Examples
    /// ```
    /// use fixvec::FixedVec;
    ///
    /// let mut vec = FixedVec::<u32>::from_exact_iter(1..5).unwrap();
    ///
    /// vec.truncate(6);
    /// assert_eq!(vec, &[1, 2, 3, 4][..]);
    ///
    /// vec.truncate(2);
    /// assert_eq!(vec, &[1, 2][..]);
    /// assert_eq!(vec.capacity(), 4);
    /// ```
    pub fn truncate(&mut self, len: usize) {
        let old_len = self.len;
        if len >= old_len {
            return;
        }

        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.as_mut_ptr().add(len), old_len - len);
            self.len = len;
            ptr::drop_in_place(tail);
        }
    }

    /// Clears the vector, dropping all values.
    ///
    /// The block stays allocated and the capacity is unchanged, so the vector
    /// can be filled again. Equivalent to `s.truncate(0)`.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0)
    }
}

impl<T, A> Drop for FixedVec<T, A>
where
    A: Allocator<T>,
{
    fn drop(&mut self) {
        if let Some(ptr) = self.buf.take() {
            let _release = ReleaseOnDrop {
                alloc: &self.alloc,
                ptr,
                cap: self.cap,
            };
            unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr.as_ptr(), self.len)) }
        }
    }
}

impl<T, A> Clone for FixedVec<T, A>
where
    T: Clone,
    A: Allocator<T>,
{
    /// Clones the live elements into a new block sized to the current length.
    ///
    /// # Panics
    /// Panics if the new block cannot be allocated. See
    /// [`try_clone`](FixedVec::try_clone) for a checked version.
    #[track_caller]
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(copy) => copy,
            Err(err) => panic!("failed to clone fixed vector: {}", err),
        }
    }
}

impl<T, A> TryFrom<&[T]> for FixedVec<T, A>
where
    T: Clone,
    A: Allocator<T> + Default,
{
    type Error = Error;

    fn try_from(source: &[T]) -> Result<Self, Error> {
        Self::from_exact_iter_in(source.iter().cloned(), A::default())
    }
}

impl<T, A> Deref for FixedVec<T, A>
where
    A: Allocator<T>,
{
    type Target = [T];
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A> DerefMut for FixedVec<T, A>
where
    A: Allocator<T>,
{
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A, I> Index<I> for FixedVec<T, A>
where
    A: Allocator<T>,
    I: SliceIndex<[T]>,
{
    type Output = I::Output;
    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, A, I> IndexMut<I> for FixedVec<T, A>
where
    A: Allocator<T>,
    I: SliceIndex<[T]>,
{
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T, A> AsRef<[T]> for FixedVec<T, A>
where
    A: Allocator<T>,
{
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T, A> AsMut<[T]> for FixedVec<T, A>
where
    A: Allocator<T>,
{
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T, A> Debug for FixedVec<T, A>
where
    T: Debug,
    A: Allocator<T>,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt(f)
    }
}

impl<T, A> Hash for FixedVec<T, A>
where
    T: Hash,
    A: Allocator<T>,
{
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(self.as_slice(), state)
    }
}

impl<AT, AA, BT, BA> PartialEq<FixedVec<BT, BA>> for FixedVec<AT, AA>
where
    AT: PartialEq<BT>,
    AA: Allocator<AT>,
    BA: Allocator<BT>,
{
    #[inline]
    fn eq(&self, other: &FixedVec<BT, BA>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, A> Eq for FixedVec<T, A>
where
    T: Eq,
    A: Allocator<T>,
{
}

impl<V, T, A> PartialEq<&[V]> for FixedVec<T, A>
where
    T: PartialEq<V>,
    A: Allocator<T>,
{
    #[inline]
    fn eq(&self, other: &&[V]) -> bool {
        self.as_slice() == &other[..]
    }
}

impl<V, T, A> PartialEq<&mut [V]> for FixedVec<T, A>
where
    T: PartialEq<V>,
    A: Allocator<T>,
{
    #[inline]
    fn eq(&self, other: &&mut [V]) -> bool {
        self.as_slice() == &other[..]
    }
}

impl<V, T, A, const N: usize> PartialEq<[V; N]> for FixedVec<T, A>
where
    T: PartialEq<V>,
    A: Allocator<T>,
{
    #[inline]
    fn eq(&self, other: &[V; N]) -> bool {
        self.as_slice() == &other[..]
    }
}

impl<V, T, A> PartialEq<FixedVec<T, A>> for &[V]
where
    V: PartialEq<T>,
    A: Allocator<T>,
{
    #[inline]
    fn eq(&self, other: &FixedVec<T, A>) -> bool {
        &self[..] == other.as_slice()
    }
}

impl<T, A> PartialOrd for FixedVec<T, A>
where
    T: PartialOrd,
    A: Allocator<T>,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T, A> Ord for FixedVec<T, A>
where
    T: Ord,
    A: Allocator<T>,
{
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T, A> Extend<T> for FixedVec<T, A>
where
    A: Allocator<T>,
{
    /// Appends every element of `iter`.
    ///
    /// # Panics
    /// Panics if the vector runs out of capacity; elements appended before
    /// that point remain in the vector.
    #[track_caller]
    fn extend<I: IntoIter<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.push(element);
        }
    }
}

/// An iterator that moves out of a vector.
///
/// This `struct` is created by the `into_iter` method on [`FixedVec`]
/// (provided by the [`IntoIterator`] trait). The block is released through
/// the vector's allocator once the iterator is dropped.
///
/// # Example
/// ```
/// use fixvec::FixedVec;
///
/// let vec = FixedVec::<u32>::from_exact_iter(1..3).unwrap();
/// let mut iter: fixvec::vec::IntoIterator<_, _> = vec.into_iter();
/// assert_eq!(iter.next(), Some(1));
/// assert_eq!(iter.next_back(), Some(2));
/// assert_eq!(iter.next(), None);
/// ```
pub struct IntoIterator<T, A = DefaultAllocator<T>>
where
    A: Allocator<T>,
{
    buf: Option<NonNull<T>>,
    cap: usize,
    start: usize,
    end: usize,
    alloc: A,
    elems: PhantomData<T>,
}

unsafe impl<T: Send, A: Allocator<T> + Send> Send for IntoIterator<T, A> {}
unsafe impl<T: Sync, A: Allocator<T> + Sync> Sync for IntoIterator<T, A> {}

impl<T, A> IntoIterator<T, A>
where
    A: Allocator<T>,
{
    /// Returns the remaining items of this iterator as a slice.
    pub fn as_slice(&self) -> &[T] {
        match self.buf {
            Some(ptr) => unsafe {
                slice::from_raw_parts(ptr.as_ptr().add(self.start), self.end - self.start)
            },
            None => &[],
        }
    }
}

impl<T, A> Iterator for IntoIterator<T, A>
where
    A: Allocator<T>,
{
    type Item = T;

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.end - self.start;
        (size, Some(size))
    }

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.start >= self.end {
            return None;
        }

        let ptr = self.buf?;
        let ret = unsafe { ptr.as_ptr().add(self.start).read() };
        self.start += 1;

        Some(ret)
    }
}

impl<T, A> DoubleEndedIterator for IntoIterator<T, A>
where
    A: Allocator<T>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start >= self.end {
            return None;
        }

        let ptr = self.buf?;
        self.end -= 1;
        Some(unsafe { ptr.as_ptr().add(self.end).read() })
    }
}

impl<T, A> ExactSizeIterator for IntoIterator<T, A> where A: Allocator<T> {}

impl<T, A> FusedIterator for IntoIterator<T, A> where A: Allocator<T> {}

impl<T, A> Drop for IntoIterator<T, A>
where
    A: Allocator<T>,
{
    fn drop(&mut self) {
        if let Some(ptr) = self.buf.take() {
            let _release = ReleaseOnDrop {
                alloc: &self.alloc,
                ptr,
                cap: self.cap,
            };
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                    ptr.as_ptr().add(self.start),
                    self.end - self.start,
                ))
            }
        }
    }
}

impl<T, A> IntoIter for FixedVec<T, A>
where
    A: Allocator<T>,
{
    type Item = T;
    type IntoIter = IntoIterator<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        let mut this = ManuallyDrop::new(self);
        // `this` is never dropped, so the allocator is moved out exactly once.
        let alloc = unsafe { ptr::read(&this.alloc) };

        IntoIterator {
            buf: this.buf.take(),
            cap: this.cap,
            start: 0,
            end: this.len,
            alloc,
            elems: PhantomData,
        }
    }
}

impl<'a, T, A> IntoIter for &'a FixedVec<T, A>
where
    A: Allocator<T>,
{
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, A> IntoIter for &'a mut FixedVec<T, A>
where
    A: Allocator<T>,
{
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
