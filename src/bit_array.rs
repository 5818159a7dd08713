use crate::fmt::bin;
use crate::storage::BitStorage;
use core::fmt::{self, Debug, Display, Formatter};
use core::iter::FusedIterator;
use core::ops::{Range, RangeInclusive};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A `BitArray` with 8 elements.
pub type BitArray8 = BitArray<u8>;
/// A `BitArray` with 16 elements.
pub type BitArray16 = BitArray<u16>;
/// A `BitArray` with 32 elements.
pub type BitArray32 = BitArray<u32>;
/// A `BitArray` with 64 elements.
pub type BitArray64 = BitArray<u64>;

/// A fixed-width array of booleans stored in the bits of a single unsigned
/// integer. Element `i` is bit `i` of the raw value.
///
/// Bitfield-like data structures fall out of the range accessors. An 8-bit
/// register holding
///
/// ```text
/// +---------+---------+-------+-------+
/// | b7:4    | b3:2    | b1    | b0    |
/// | value 2 | value 1 | flag2 | flag1 |
/// +---------+---------+-------+-------+
/// ```
///
/// reads as
///
/// ```
/// use regpack::BitArray8;
///
/// let bits = BitArray8::from_raw(0b1011_0101);
/// assert!(bits.bit(0));            // flag1
/// assert!(!bits.bit(1));           // flag2
/// assert_eq!(bits.field(2..=3), 1);  // value 1
/// assert_eq!(bits.field(4..=7), 11); // value 2
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BitArray<T: BitStorage> {
    raw: T,
}

impl<T: BitStorage> BitArray<T> {
    /// Creates a new array with every element false.
    pub fn new() -> Self {
        Self { raw: T::ZERO }
    }

    /// Creates an array over the supplied raw value.
    pub fn from_raw(raw: T) -> Self {
        Self { raw }
    }

    /// The underlying storage.
    pub fn raw_value(&self) -> T {
        self.raw
    }

    /// The number of elements, fixed at the width of the storage.
    pub fn bit_count(&self) -> usize {
        T::BITS
    }

    /// Returns the element at the given index.
    ///
    /// # Panics
    /// Panics if `index >= bit_count()`.
    ///
    /// # Examples
    /// ```
    /// use regpack::BitArray8;
    ///
    /// let bits = BitArray8::from_raw(0b0000_0100);
    /// assert!(bits.bit(2));
    /// assert!(!bits.bit(3));
    /// ```
    #[inline]
    pub fn bit(&self, index: usize) -> bool {
        self.raw.bit(index)
    }

    /// Sets the element at the given index.
    ///
    /// # Panics
    /// Panics if `index >= bit_count()`.
    #[inline]
    pub fn set_bit(&mut self, index: usize, value: bool) {
        self.raw.set_bit(index, value);
    }

    /// Returns the elements in the half-open range as a new array, moved
    /// down into the low bits.
    ///
    /// # Panics
    /// Panics if `range.start > range.end` or `range.end > bit_count()`.
    ///
    /// # Examples
    /// ```
    /// use regpack::BitArray16;
    ///
    /// let bits = BitArray16::from_raw(0x0A50);
    /// assert_eq!(bits.slice(8..16).raw_value(), 0x000A);
    /// ```
    pub fn slice(&self, range: Range<usize>) -> Self {
        assert!(range.end <= T::BITS, "Range end {} out of bounds", range.end);
        assert!(range.start <= range.end, "Range start {} out of bounds", range.start);

        let bit_count = range.end - range.start;
        if bit_count == 0 {
            return Self::new();
        }
        let mask = T::mask_from(bit_count);
        Self::from_raw((self.raw >> range.start) & mask)
    }

    /// Replaces the elements in the half-open range with the low bits of
    /// `bits`.
    ///
    /// # Panics
    /// Panics if `range.start > range.end` or `range.end > bit_count()`.
    pub fn set_slice(&mut self, range: Range<usize>, bits: Self) {
        assert!(range.end <= T::BITS, "Range end {} out of bounds", range.end);
        assert!(range.start <= range.end, "Range start {} out of bounds", range.start);

        let bit_count = range.end - range.start;
        if bit_count == 0 {
            return;
        }
        let mask = T::mask_from(bit_count);
        self.raw &= !(mask << range.start);
        self.raw |= (bits.raw & mask) << range.start;
    }

    /// Returns the integer value of the elements in the closed range.
    ///
    /// # Panics
    /// Panics if `range.start() > range.end()` or `range.end() >= bit_count()`.
    ///
    /// # Examples
    /// ```
    /// use regpack::BitArray16;
    ///
    /// let bits = BitArray16::from_raw(0x0A50);
    /// assert_eq!(bits.field(8..=15), 0xA);
    /// ```
    pub fn field(&self, range: RangeInclusive<usize>) -> T {
        let (start, end) = (*range.start(), *range.end());
        assert!(end < T::BITS, "Range end {end} out of bounds");
        assert!(start <= end, "Range start {start} out of bounds");

        let mask = T::mask_from(end - start + 1);
        (self.raw >> start) & mask
    }

    /// Replaces the elements in the closed range with the integer value,
    /// masked to the field width.
    ///
    /// # Panics
    /// Panics if `range.start() > range.end()` or `range.end() >= bit_count()`.
    pub fn set_field(&mut self, range: RangeInclusive<usize>, value: T) {
        let (start, end) = (*range.start(), *range.end());
        assert!(end < T::BITS, "Range end {end} out of bounds");
        assert!(start <= end, "Range start {start} out of bounds");

        let mask = T::mask_from(end - start + 1);
        self.raw &= !(mask << start);
        self.raw |= (value & mask) << start;
    }

    /// Returns an iterator over the elements, index 0 first.
    #[inline]
    pub fn iter(&self) -> BitArrayIter<T> {
        BitArrayIter { raw: self.raw, index: 0 }
    }
}

impl<T: BitStorage> IntoIterator for &BitArray<T> {
    type Item = bool;
    type IntoIter = BitArrayIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: BitStorage> Display for BitArray<T> {
    /// Full-width binary, most significant bit first, nibbles joined by `_`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&bin(self.raw).grouped(), f)
    }
}

impl<T: BitStorage> Debug for BitArray<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "BitArray({})", bin(self.raw).grouped())
    }
}

/// Iterator over the elements of a [`BitArray`], index 0 first.
///
/// Iterates a copy of the raw value, so the array itself is untouched.
#[derive(Clone, Copy)]
pub struct BitArrayIter<T> {
    raw: T,
    index: usize,
}

impl<T: BitStorage> Iterator for BitArrayIter<T> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= T::BITS {
            return None;
        }
        let bit = self.raw.bit(self.index);
        self.index += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = T::BITS - self.index;
        (remaining, Some(remaining))
    }
}

impl<T: BitStorage> ExactSizeIterator for BitArrayIter<T> {}

impl<T: BitStorage> FusedIterator for BitArrayIter<T> {}
