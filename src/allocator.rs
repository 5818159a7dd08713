//! First-fit bitmap allocators handing out integer entries.
//!
//! A set bit means the entry is free; allocation clears the lowest set bit,
//! so entries are handed out lowest index first and freed entries are reused
//! immediately.

use crate::fmt::bin;
use crate::storage::BitStorage;
use core::fmt::{self, Debug, Display, Formatter};

/// A bitmap allocator with capacity for 8 entries.
pub type BitmapAllocator8 = BitmapAllocator<u8>;
/// A bitmap allocator with capacity for 16 entries.
pub type BitmapAllocator16 = BitmapAllocator<u16>;
/// A bitmap allocator with capacity for 32 entries.
pub type BitmapAllocator32 = BitmapAllocator<u32>;
/// A bitmap allocator with capacity for 64 entries.
pub type BitmapAllocator64 = BitmapAllocator<u64>;
/// A bitmap allocator with capacity for 128 entries.
pub type BitmapAllocator128 = DoubleBitmapAllocator<u64>;

/// A type that hands out integer entries from a fixed pool and takes them
/// back for reuse.
pub trait EntryAllocator {
    /// The total number of entries the allocator manages.
    fn entry_count(&self) -> usize;
    /// The number of entries not currently allocated.
    fn free_entry_count(&self) -> usize;
    /// Returns `true` if at least one entry is free.
    fn has_space(&self) -> bool;
    /// Allocates the lowest free entry, or returns `None` if every entry is
    /// taken.
    fn allocate(&mut self) -> Option<usize>;
    /// Returns an entry to the pool.
    ///
    /// # Panics
    /// Panics if the entry is not currently allocated.
    fn free(&mut self, entry: usize);
}

/// An allocator managing one entry per bit of a single unsigned integer.
///
/// ```
/// use regpack::BitmapAllocator8;
///
/// let mut allocator = BitmapAllocator8::new();
/// assert_eq!(allocator.allocate(), Some(0));
/// assert_eq!(allocator.allocate(), Some(1));
/// allocator.free(0);
/// assert_eq!(allocator.allocate(), Some(0));
/// assert_eq!(allocator.free_entry_count(), 6);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitmapAllocator<T: BitStorage> {
    // Bit per entry, 1: free, 0: allocated.
    bitmap: T,
}

impl<T: BitStorage> BitmapAllocator<T> {
    /// Creates a new allocator with every entry free.
    pub fn new() -> Self {
        Self { bitmap: T::MAX }
    }

    /// The total number of entries the allocator manages.
    pub fn entry_count(&self) -> usize {
        T::BITS
    }

    /// The number of entries not currently allocated.
    pub fn free_entry_count(&self) -> usize {
        self.bitmap.count_ones()
    }

    /// Returns `true` if at least one entry is free.
    pub fn has_space(&self) -> bool {
        self.bitmap != T::ZERO
    }

    /// Allocates the lowest free entry, or returns `None` if every entry is
    /// taken.
    pub fn allocate(&mut self) -> Option<usize> {
        self.bitmap.clear_lowest_bit_set()
    }

    /// Returns an entry to the pool.
    ///
    /// # Panics
    /// Panics if `entry >= entry_count()` or the entry is not currently
    /// allocated.
    pub fn free(&mut self, entry: usize) {
        assert!(!self.bitmap.bit(entry), "Entry {entry} is not allocated");
        self.bitmap.set_bit(entry, true);
    }
}

impl<T: BitStorage> EntryAllocator for BitmapAllocator<T> {
    fn entry_count(&self) -> usize {
        self.entry_count()
    }

    fn free_entry_count(&self) -> usize {
        self.free_entry_count()
    }

    fn has_space(&self) -> bool {
        self.has_space()
    }

    fn allocate(&mut self) -> Option<usize> {
        self.allocate()
    }

    fn free(&mut self, entry: usize) {
        self.free(entry)
    }
}

impl<T: BitStorage> Default for BitmapAllocator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: BitStorage> Display for BitmapAllocator<T> {
    /// The bitmap as zero-padded binary, free entries shown as `1`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&bin(self.bitmap), f)
    }
}

impl<T: BitStorage> Debug for BitmapAllocator<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "BitmapAllocator({self})")
    }
}

/// An allocator managing one entry per bit of two unsigned integers,
/// doubling the capacity of [`BitmapAllocator`] for a given width.
///
/// Entries `0..BITS` live in the low register, `BITS..2 * BITS` in the high
/// one. The low register is exhausted before the high one is touched.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DoubleBitmapAllocator<T: BitStorage> {
    bitmap_low: T,
    bitmap_high: T,
}

impl<T: BitStorage> DoubleBitmapAllocator<T> {
    /// Creates a new allocator with every entry free.
    pub fn new() -> Self {
        Self { bitmap_low: T::MAX, bitmap_high: T::MAX }
    }

    /// The total number of entries the allocator manages.
    pub fn entry_count(&self) -> usize {
        2 * T::BITS
    }

    /// The number of entries not currently allocated.
    pub fn free_entry_count(&self) -> usize {
        self.bitmap_low.count_ones() + self.bitmap_high.count_ones()
    }

    /// Returns `true` if at least one entry is free.
    pub fn has_space(&self) -> bool {
        self.bitmap_low != T::ZERO || self.bitmap_high != T::ZERO
    }

    /// Allocates the lowest free entry, or returns `None` if every entry is
    /// taken.
    pub fn allocate(&mut self) -> Option<usize> {
        if let Some(entry) = self.bitmap_low.clear_lowest_bit_set() {
            return Some(entry);
        }
        self.bitmap_high.clear_lowest_bit_set().map(|entry| entry + T::BITS)
    }

    /// Returns an entry to the pool.
    ///
    /// # Panics
    /// Panics if `entry >= entry_count()` or the entry is not currently
    /// allocated.
    pub fn free(&mut self, entry: usize) {
        let (bitmap, bit) = if entry < T::BITS {
            (&mut self.bitmap_low, entry)
        } else {
            (&mut self.bitmap_high, entry - T::BITS)
        };
        assert!(!bitmap.bit(bit), "Entry {entry} is not allocated");
        bitmap.set_bit(bit, true);
    }
}

impl<T: BitStorage> EntryAllocator for DoubleBitmapAllocator<T> {
    fn entry_count(&self) -> usize {
        self.entry_count()
    }

    fn free_entry_count(&self) -> usize {
        self.free_entry_count()
    }

    fn has_space(&self) -> bool {
        self.has_space()
    }

    fn allocate(&mut self) -> Option<usize> {
        self.allocate()
    }

    fn free(&mut self, entry: usize) {
        self.free(entry)
    }
}

impl<T: BitStorage> Default for DoubleBitmapAllocator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: BitStorage> Display for DoubleBitmapAllocator<T> {
    /// Both bitmaps as zero-padded binary, high register first, joined by
    /// `-`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", bin(self.bitmap_high), bin(self.bitmap_low))
    }
}

impl<T: BitStorage> Debug for DoubleBitmapAllocator<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DoubleBitmapAllocator({self})")
    }
}
