//! Fixed-capacity containers packed into a single unsigned integer.
//! `no_std`, no heap / `alloc`, no `unsafe`, just `core`.
//!
//! Every container in this crate stores all of its state in one `u8`,
//! `u16`, `u32` or `u64` register, so the types are `Copy`, comparison is a
//! single integer compare, and nothing ever allocates. Designed for
//! embedded and systems code where small sets, flags registers and byte
//! buffers live in device registers or on-wire words.
//!
//! # Examples
//! ```
//! use regpack::{BitArray8, NumberSet8};
//!
//! let mut bits = BitArray8::new();
//! bits.set_bit(0, true);
//! bits.set_bit(7, true);
//! assert_eq!(bits.raw_value(), 129);
//! assert_eq!(format!("{bits}"), "1000_0001");
//!
//! let union = NumberSet8::from_members([1, 2, 3]) | NumberSet8::from_members([3, 4, 5]);
//! assert_eq!(format!("{union}"), "[1, 2, 3, 4, 5]");
//! ```
//!
//! # Containers
//!
//! - [`BitArray`]: a fixed-width array of booleans, one per bit, with
//!   bit-range slicing and integer field extraction
//! - [`NumberSet`]: a set of small integers, one bit per member, with the
//!   full set algebra as O(1) bitwise operations
//! - [`ByteArray`]: a variable-length byte sequence with its element count
//!   held in the low byte of the same register
//! - [`BitmapAllocator`] / [`DoubleBitmapAllocator`]: first-fit entry
//!   allocators, one entry per bit
//!
//! The [`BitStorage`] trait is the common footing: it is sealed over the
//! four unsigned widths and supplies mask construction, bit access and
//! set-bit scans, plus little/big-endian byte assembly and BCD conversion.
//! The [`fmt`] module renders values as fixed-width binary, octal or hex
//! and as multi-line hex dumps, all without `alloc`.

#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![no_std]

mod allocator;
mod bit_array;
mod byte_array;
pub mod fmt;
mod number_set;
mod storage;

pub use allocator::{
    BitmapAllocator, BitmapAllocator8, BitmapAllocator16, BitmapAllocator32, BitmapAllocator64,
    BitmapAllocator128, DoubleBitmapAllocator, EntryAllocator,
};
pub use bit_array::{BitArray, BitArray8, BitArray16, BitArray32, BitArray64, BitArrayIter};
pub use byte_array::{ByteArray, ByteArray8, ByteArray16, ByteArray32, ByteArray64, ByteArrayIter};
pub use number_set::{
    NumberSet, NumberSet8, NumberSet16, NumberSet32, NumberSet64, NumberSetIter,
};
pub use storage::BitStorage;
