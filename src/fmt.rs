//! `Display` adapters for fixed-width binary, octal and hex renderings and
//! for multi-line hex dumps.
//!
//! Everything here writes straight into a `core::fmt` formatter, so the
//! adapters work without `alloc` and can target any `core::fmt::Write` sink.

use crate::storage::BitStorage;
use core::fmt::{self, Display, Formatter, Write};

const BYTES_PER_LINE: usize = 16;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

// Digits are written most significant first; `position` counts down to 0.
// Grouped output gets a '_' every four digits from the least significant end.
fn digit_separator(f: &mut Formatter<'_>, grouped: bool, position: usize) -> fmt::Result {
    if grouped && position != 0 && position % 4 == 0 {
        f.write_str("_")?;
    }
    Ok(())
}

/// Fixed-width binary rendering of a value, zero padded. Created by [`bin`].
#[derive(Clone, Copy)]
pub struct Bin<T> {
    value: T,
    grouped: bool,
}

/// Renders a value as full-width binary, most significant bit first.
///
/// # Examples
/// ```
/// use regpack::fmt::bin;
///
/// assert_eq!(format!("{}", bin(0x81u8)), "10000001");
/// assert_eq!(format!("{}", bin(0x81u8).grouped()), "1000_0001");
/// ```
pub fn bin<T: BitStorage>(value: T) -> Bin<T> {
    Bin { value, grouped: false }
}

impl<T> Bin<T> {
    /// Inserts a `_` between nibbles.
    pub fn grouped(mut self) -> Self {
        self.grouped = true;
        self
    }
}

impl<T: BitStorage> Display for Bin<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for position in (0..T::BITS).rev() {
            f.write_char(if self.value.bit(position) { '1' } else { '0' })?;
            digit_separator(f, self.grouped, position)?;
        }
        Ok(())
    }
}

/// Fixed-width octal rendering of a value, zero padded. Created by [`oct`].
#[derive(Clone, Copy)]
pub struct Oct<T> {
    value: T,
    grouped: bool,
}

/// Renders a value as fixed-width octal, enough digits for the full width.
///
/// # Examples
/// ```
/// use regpack::fmt::oct;
///
/// assert_eq!(format!("{}", oct(u8::MAX)), "377");
/// assert_eq!(format!("{}", oct(u16::MAX).grouped()), "17_7777");
/// ```
pub fn oct<T: BitStorage>(value: T) -> Oct<T> {
    Oct { value, grouped: false }
}

impl<T> Oct<T> {
    /// Inserts a `_` every four digits.
    pub fn grouped(mut self) -> Self {
        self.grouped = true;
        self
    }
}

impl<T: BitStorage> Display for Oct<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let digits = T::BITS.div_ceil(3);
        for position in (0..digits).rev() {
            let digit = (self.value >> (position * 3)).to_u8() & 0o7;
            f.write_char((b'0' + digit) as char)?;
            digit_separator(f, self.grouped, position)?;
        }
        Ok(())
    }
}

/// Fixed-width hex rendering of a value, zero padded. Created by [`hex`].
#[derive(Clone, Copy)]
pub struct Hex<T> {
    value: T,
    grouped: bool,
}

/// Renders a value as fixed-width lowercase hex, one digit per nibble.
///
/// # Examples
/// ```
/// use regpack::fmt::hex;
///
/// assert_eq!(format!("{}", hex(0x0au8)), "0a");
/// assert_eq!(format!("{}", hex(u32::MAX).grouped()), "ffff_ffff");
/// ```
pub fn hex<T: BitStorage>(value: T) -> Hex<T> {
    Hex { value, grouped: false }
}

impl<T> Hex<T> {
    /// Inserts a `_` every four digits.
    pub fn grouped(mut self) -> Self {
        self.grouped = true;
        self
    }
}

impl<T: BitStorage> Display for Hex<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let digits = T::BITS / 4;
        for position in (0..digits).rev() {
            let nibble = (self.value >> (position * 4)).to_u8() & 0xf;
            write_hex_byte_digit(f, nibble)?;
            digit_separator(f, self.grouped, position)?;
        }
        Ok(())
    }
}

fn write_hex_byte_digit(f: &mut Formatter<'_>, nibble: u8) -> fmt::Result {
    f.write_char(HEX_DIGITS[usize::from(nibble & 0xf)] as char)
}

fn write_hex_byte(f: &mut Formatter<'_>, byte: u8) -> fmt::Result {
    write_hex_byte_digit(f, byte >> 4)?;
    write_hex_byte_digit(f, byte & 0xf)
}

/// Multi-line hex dump of a byte slice. Created by [`hex_dump`] and
/// [`hex_dump_from`].
///
/// Sixteen bytes per line with a `-` instead of a space between the eighth
/// and ninth column. With an address, each line is labelled with the
/// address of its 16-byte row, zero padded to the address type's hex width,
/// and the first line is indented to the start address's offset within its
/// row.
#[derive(Clone, Copy)]
pub struct HexDump<'a, A: BitStorage = u64> {
    bytes: &'a [u8],
    start_address: Option<A>,
    show_ascii: bool,
}

/// Creates a hex dump of the bytes with no address column.
///
/// # Examples
/// ```
/// use regpack::fmt::hex_dump;
///
/// assert_eq!(format!("{}", hex_dump(&[0x30, 0x31])), "30 31");
/// ```
pub fn hex_dump(bytes: &[u8]) -> HexDump<'_> {
    HexDump { bytes, start_address: None, show_ascii: false }
}

/// Creates a hex dump of the bytes labelled with addresses starting at
/// `start_address`. The address type sets the label width.
///
/// # Examples
/// ```
/// use regpack::fmt::hex_dump_from;
///
/// assert_eq!(format!("{}", hex_dump_from(&[0x30, 0x31], 1u8)), "01:    30 31");
/// ```
pub fn hex_dump_from<A: BitStorage>(bytes: &[u8], start_address: A) -> HexDump<'_, A> {
    HexDump { bytes, start_address: Some(start_address), show_ascii: false }
}

impl<A: BitStorage> HexDump<'_, A> {
    /// Appends an ASCII column, rendering non-printable bytes as `.`.
    pub fn show_ascii(mut self) -> Self {
        self.show_ascii = true;
        self
    }
}

impl<A: BitStorage> Display for HexDump<'_, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.bytes.is_empty() {
            return Ok(());
        }

        let first_offset = match self.start_address {
            Some(address) => (address % A::from(BYTES_PER_LINE as u8)).to_usize(),
            None => 0,
        };
        // Address of the 16-byte row the dump starts in.
        let mut row_address = self
            .start_address
            .map(|address| address - A::from(first_offset as u8));

        let mut offset = first_offset;
        let mut remaining = self.bytes;
        let mut first_line = true;
        while !remaining.is_empty() {
            if !first_line {
                f.write_str("\n")?;
                if let Some(address) = row_address {
                    row_address = Some(address + A::from(BYTES_PER_LINE as u8));
                }
            }
            if let Some(address) = row_address {
                // The first line is labelled with the start address itself.
                let label = if first_line { self.start_address.unwrap_or(address) } else { address };
                write!(f, "{}: ", hex(label))?;
            }

            let count = (BYTES_PER_LINE - offset).min(remaining.len());
            let (line, rest) = remaining.split_at(count);
            dump_line(f, line, offset, self.show_ascii)?;
            remaining = rest;
            offset = 0;
            first_line = false;
        }
        Ok(())
    }
}

// One dump line: `offset` leading blank columns then up to 16 - offset bytes.
fn dump_line(f: &mut Formatter<'_>, bytes: &[u8], offset: usize, show_ascii: bool) -> fmt::Result {
    for _ in 0..offset {
        f.write_str("   ")?;
    }

    let last = offset + bytes.len() - 1;
    for (position, &byte) in (offset..).zip(bytes) {
        write_hex_byte(f, byte)?;
        if position == last && !show_ascii {
            break;
        }
        // '-' marks the boundary between columns 8 and 9.
        if position == 7 && bytes.len() > 1 {
            f.write_str("-")?;
        } else {
            f.write_str(" ")?;
        }
    }

    if show_ascii {
        for _ in 0..(BYTES_PER_LINE - (offset + bytes.len())) {
            f.write_str("   ")?;
        }
        for _ in 0..offset {
            f.write_str(" ")?;
        }
        for &byte in bytes {
            let printable = if (32..127).contains(&byte) { byte } else { b'.' };
            f.write_char(printable as char)?;
        }
    }
    Ok(())
}
