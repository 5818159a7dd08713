use crate::fmt::hex;
use crate::storage::BitStorage;
use core::fmt::{self, Debug, Display, Formatter};
use core::iter::FusedIterator;
use core::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A `ByteArray` with capacity for 0 elements.
pub type ByteArray8 = ByteArray<u8>;
/// A `ByteArray` with capacity for 1 element.
pub type ByteArray16 = ByteArray<u16>;
/// A `ByteArray` with capacity for 3 elements.
pub type ByteArray32 = ByteArray<u32>;
/// A `ByteArray` with capacity for 7 elements.
pub type ByteArray64 = ByteArray<u64>;

/// A variable-length sequence of bytes packed into a single unsigned
/// integer, with the element count held in band in the low byte.
///
/// Element `i` lives in byte position `i + 1` of the raw value (counting
/// from the least significant byte), so the capacity is one less than the
/// storage's byte width. Bits above the last element are always zero;
/// every shrinking operation re-masks the storage so stale bytes cannot
/// resurface.
///
/// ```
/// use regpack::ByteArray32;
///
/// let mut array = ByteArray32::from_slice(&[2, 3]);
/// assert_eq!(array.capacity(), 3);
/// assert_eq!(array.len(), 2);
/// array.push(5);
/// assert_eq!(array.raw_value(), 0x0503_0203);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ByteArray<T: BitStorage> {
    raw: T,
}

impl<T: BitStorage> ByteArray<T> {
    /// Creates a new, empty array.
    pub fn new() -> Self {
        Self { raw: T::ZERO }
    }

    /// Creates an array over the supplied raw value. The low byte of
    /// `raw` is the element count.
    pub fn from_raw(raw: T) -> Self {
        Self { raw }
    }

    /// Creates an array holding the bytes of the slice, in order.
    ///
    /// # Panics
    /// Panics if the slice holds more than `capacity()` bytes.
    pub fn from_slice(bytes: &[u8]) -> Self {
        bytes.iter().copied().collect()
    }

    /// Creates an array holding `count` copies of `byte`.
    ///
    /// # Panics
    /// Panics if `count > capacity()`.
    pub fn repeating(byte: u8, count: usize) -> Self {
        let capacity = T::BITS / 8 - 1;
        assert!(count <= capacity, "Element count {count} exceeds capacity {capacity}");
        let mut raw = T::ZERO;
        for _ in 0..count {
            raw = (raw | T::from(byte)) << 8;
        }
        Self { raw: raw | T::from(count as u8) }
    }

    /// The underlying storage.
    pub fn raw_value(&self) -> T {
        self.raw
    }

    /// The largest number of elements the array can hold: one byte of the
    /// storage is reserved for the count.
    pub fn capacity(&self) -> usize {
        T::BITS / 8 - 1
    }

    /// The number of elements in the array.
    #[inline]
    pub fn len(&self) -> usize {
        (self.raw & T::from(0xff)).to_usize()
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at the given index.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    #[inline]
    pub fn byte(&self, index: usize) -> u8 {
        assert!(index < self.len(), "Byte index {index} out of bounds");
        (self.raw >> ((index + 1) * 8)).to_u8()
    }

    /// Replaces the element at the given index.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    #[inline]
    pub fn set_byte(&mut self, index: usize, value: u8) {
        assert!(index < self.len(), "Byte index {index} out of bounds");
        let shift = (index + 1) * 8;
        self.raw &= !(T::from(0xff) << shift);
        self.raw |= T::from(value) << shift;
    }

    /// Appends an element to the end of the array.
    ///
    /// # Panics
    /// Panics if the array is full.
    pub fn push(&mut self, value: u8) {
        let index = self.len();
        assert!(index < self.capacity(), "Array is full");
        self.raw = self.raw + T::ONE;
        self.set_byte(index, value);
    }

    /// Inserts an element at the given index, shifting every element at or
    /// above it one position up.
    ///
    /// # Panics
    /// Panics if `index > len()` or the array is full.
    pub fn insert(&mut self, index: usize, value: u8) {
        assert!(index <= self.len(), "Byte index {index} out of bounds");
        assert!(self.len() < self.capacity(), "Array is full");

        let shift = (index + 1) * 8;
        let upper_mask = T::MAX << shift;
        let lower_bits = self.raw & !upper_mask;
        let upper_bits = (self.raw & upper_mask) << 8;

        self.raw = lower_bits | (T::from(value) << shift) | upper_bits;
        self.raw = self.raw + T::ONE;
    }

    /// Inserts the bytes of the slice at the given index, preserving their
    /// order.
    ///
    /// # Panics
    /// Panics if `index > len()` or the result would exceed `capacity()`.
    pub fn insert_slice(&mut self, index: usize, bytes: &[u8]) {
        for (offset, &byte) in bytes.iter().enumerate() {
            self.insert(index + offset, byte);
        }
    }

    /// Removes and returns the element at the given index, shifting every
    /// element above it one position down.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> u8 {
        let element = self.byte(index);

        let shift = (index + 1) * 8;
        let upper_mask = T::MAX << shift;
        let upper_bits = (self.raw >> 8) & upper_mask;
        let lower_bits = self.raw & !upper_mask;

        self.raw = (upper_bits | lower_bits) - T::ONE;
        element
    }

    /// Removes and returns the first element, or `None` if the array is
    /// empty. O(1): the whole register shifts down one byte position.
    pub fn pop_first(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let new_count = self.len() - 1;
        self.raw >>= 8;
        let element = self.raw.to_u8();
        self.mask_data_bits(new_count);
        Some(element)
    }

    /// Removes and returns the last element, or `None` if the array is
    /// empty. O(1).
    pub fn pop_last(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let new_count = self.len() - 1;
        let element = self.byte(new_count);
        self.mask_data_bits(new_count);
        Some(element)
    }

    /// Removes the first `count` elements.
    ///
    /// # Panics
    /// Panics if `count > len()`.
    pub fn remove_first(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        assert!(count <= self.len(), "Cannot remove {count} elements");
        let new_count = self.len() - count;
        self.raw >>= count * 8;
        self.mask_data_bits(new_count);
    }

    /// Removes the last `count` elements.
    ///
    /// # Panics
    /// Panics if `count > len()`.
    pub fn remove_last(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        assert!(count <= self.len(), "Cannot remove {count} elements");
        self.mask_data_bits(self.len() - count);
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.raw = T::ZERO;
    }

    /// Returns the elements in the half-open range as a new array with its
    /// own count.
    ///
    /// # Panics
    /// Panics if `range.start > range.end` or `range.end > len()`.
    ///
    /// # Examples
    /// ```
    /// use regpack::ByteArray64;
    ///
    /// let array = ByteArray64::from_slice(&[1, 2, 3, 4, 5, 6]);
    /// assert_eq!(array.slice(2..4), ByteArray64::from_slice(&[3, 4]));
    /// ```
    pub fn slice(&self, range: Range<usize>) -> Self {
        assert!(range.end <= self.len(), "Range end {} out of bounds", range.end);
        assert!(range.start <= range.end, "Range start {} out of bounds", range.start);

        let new_count = range.end - range.start;
        if new_count == 0 {
            return Self::new();
        }
        let mask = T::mask_from(new_count * 8) << 8;
        let raw = ((self.raw >> (range.start * 8)) & mask) | T::from(new_count as u8);
        Self { raw }
    }

    /// Replaces the elements in the half-open range with the bytes of the
    /// slice, which need not have the same length.
    ///
    /// # Panics
    /// Panics if the range is out of bounds or the resulting length would
    /// exceed `capacity()`.
    pub fn replace_subrange(&mut self, range: Range<usize>, bytes: &[u8]) {
        assert!(range.end <= self.len(), "Range end {} out of bounds", range.end);
        assert!(range.start <= range.end, "Range start {} out of bounds", range.start);
        let new_count = self.len() + bytes.len() - (range.end - range.start);
        assert!(new_count <= self.capacity(), "Element count {new_count} exceeds capacity");

        for _ in range.clone() {
            self.remove(range.start);
        }
        self.insert_slice(range.start, bytes);
    }

    /// Returns an iterator over the elements in order.
    #[inline]
    pub fn iter(&self) -> ByteArrayIter<T> {
        ByteArrayIter { array: *self }
    }

    // Clears the data bits above the last element, then writes the new
    // count into the low byte.
    fn mask_data_bits(&mut self, new_count: usize) {
        let mask = T::mask_from(new_count * 8) << 8;
        self.raw &= mask;
        self.raw |= T::from(new_count as u8);
    }
}

impl<T: BitStorage> FromIterator<u8> for ByteArray<T> {
    /// # Panics
    /// Panics if the iterator yields more than `capacity()` elements.
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let capacity = T::BITS / 8 - 1;
        let mut raw = T::ZERO;
        let mut count = 0;
        for byte in iter {
            count += 1;
            assert!(count <= capacity, "Iterator yielded more than {capacity} elements");
            raw |= T::from(byte) << (count * 8);
        }
        Self { raw: raw | T::from(count as u8) }
    }
}

impl<T: BitStorage> IntoIterator for &ByteArray<T> {
    type Item = u8;
    type IntoIter = ByteArrayIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: BitStorage> Display for ByteArray<T> {
    /// Bracketed, comma-separated elements in order, e.g. `[1, 2, 3]`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (position, byte) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{byte}")?;
        }
        f.write_str("]")
    }
}

impl<T: BitStorage> Debug for ByteArray<T> {
    /// Grouped hex of the raw storage, count byte included.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ByteArray({})", hex(self.raw).grouped())
    }
}

/// Iterator over the elements of a [`ByteArray`], first element first.
///
/// Pops the front of a private copy of the array; the array itself is
/// untouched.
#[derive(Clone, Copy)]
pub struct ByteArrayIter<T: BitStorage> {
    array: ByteArray<T>,
}

impl<T: BitStorage> Iterator for ByteArrayIter<T> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        self.array.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.array.len();
        (remaining, Some(remaining))
    }
}

impl<T: BitStorage> ExactSizeIterator for ByteArrayIter<T> {}

impl<T: BitStorage> FusedIterator for ByteArrayIter<T> {}
