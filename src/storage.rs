use core::fmt::Debug;
use core::hash::Hash;
use core::ops::{
    Add, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div, Mul, Not, Rem, Shl,
    ShlAssign, Shr, ShrAssign, Sub,
};

mod private {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// An unsigned integer usable as the backing register of the container types.
///
/// This trait is sealed and implemented for `u8`, `u16`, `u32` and `u64`.
/// It bundles the operator set the containers need with the bit-scan
/// primitives they are built on: mask construction, single-bit access and
/// lowest/highest set-bit queries.
///
/// # Examples
/// ```
/// use regpack::BitStorage;
///
/// let mut value = 0u8;
/// value.set_bit(0, true);
/// value.set_bit(7, true);
/// assert_eq!(value, 0b1000_0001);
/// assert_eq!(value.lowest_bit_set(), Some(0));
/// assert_eq!(value.clear_highest_bit_set(), Some(7));
/// assert_eq!(value, 0b0000_0001);
/// ```
pub trait BitStorage:
    private::Sealed
    + Copy
    + Eq
    + Ord
    + Hash
    + Debug
    + Default
    + From<u8>
    + Not<Output = Self>
    + BitAnd<Output = Self>
    + BitAndAssign
    + BitOr<Output = Self>
    + BitOrAssign
    + BitXor<Output = Self>
    + BitXorAssign
    + Shl<usize, Output = Self>
    + ShlAssign<usize>
    + Shr<usize, Output = Self>
    + ShrAssign<usize>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Rem<Output = Self>
{
    /// The width of the register in bits.
    const BITS: usize;
    /// The value with no bits set.
    const ZERO: Self;
    /// The value with only bit 0 set.
    const ONE: Self;
    /// The value with every bit set.
    const MAX: Self;

    /// Returns the number of set bits.
    fn count_ones(self) -> usize;
    /// Returns the number of trailing zero bits, `BITS` for zero.
    fn trailing_zeros(self) -> usize;
    /// Returns the number of leading zero bits, `BITS` for zero.
    fn leading_zeros(self) -> usize;
    /// Truncates to the low 8 bits.
    fn to_u8(self) -> u8;
    /// Truncates to a `usize`.
    fn to_usize(self) -> usize;

    /// Returns a value with the low `bit_count` bits set.
    ///
    /// `bit_count == BITS` is handled explicitly: the shift-based
    /// construction would overflow at full width.
    ///
    /// # Examples
    /// ```
    /// use regpack::BitStorage;
    ///
    /// assert_eq!(u8::mask_from(3), 0b0000_0111);
    /// assert_eq!(u8::mask_from(8), u8::MAX);
    /// assert_eq!(u16::mask_from(0), 0);
    /// ```
    fn mask_from(bit_count: usize) -> Self {
        debug_assert!(bit_count <= Self::BITS, "Bit count {bit_count} out of bounds");
        if bit_count == Self::BITS {
            Self::MAX
        } else {
            (Self::ONE << bit_count) - Self::ONE
        }
    }

    /// Returns the bit at the given index.
    ///
    /// # Panics
    /// Panics if `index >= BITS`.
    fn bit(self, index: usize) -> bool {
        assert!(index < Self::BITS, "Bit index {index} out of bounds");
        self & (Self::ONE << index) != Self::ZERO
    }

    /// Sets or clears the bit at the given index.
    ///
    /// # Panics
    /// Panics if `index >= BITS`.
    fn set_bit(&mut self, index: usize, value: bool) {
        assert!(index < Self::BITS, "Bit index {index} out of bounds");
        let mask = Self::ONE << index;
        if value {
            *self |= mask;
        } else {
            *self &= !mask;
        }
    }

    /// Returns the position of the least significant set bit, or `None` if
    /// no bit is set.
    fn lowest_bit_set(self) -> Option<usize> {
        if self == Self::ZERO {
            None
        } else {
            Some(self.trailing_zeros())
        }
    }

    /// Returns the position of the most significant set bit, or `None` if
    /// no bit is set.
    fn highest_bit_set(self) -> Option<usize> {
        if self == Self::ZERO {
            None
        } else {
            Some(Self::BITS - self.leading_zeros() - 1)
        }
    }

    /// Clears the least significant set bit and returns its position, or
    /// `None` if no bit is set.
    fn clear_lowest_bit_set(&mut self) -> Option<usize> {
        let bit = self.lowest_bit_set()?;
        self.set_bit(bit, false);
        Some(bit)
    }

    /// Clears the most significant set bit and returns its position, or
    /// `None` if no bit is set.
    fn clear_highest_bit_set(&mut self) -> Option<usize> {
        let bit = self.highest_bit_set()?;
        self.set_bit(bit, false);
        Some(bit)
    }

    /// Builds a value from the first `BITS / 8` bytes, least significant
    /// byte first.
    ///
    /// # Panics
    /// Panics if the slice holds fewer than `BITS / 8` bytes.
    ///
    /// # Examples
    /// ```
    /// use regpack::BitStorage;
    ///
    /// assert_eq!(u16::from_little_endian_bytes(&[0x34, 0x12]), 0x1234);
    /// ```
    fn from_little_endian_bytes(bytes: &[u8]) -> Self {
        let count = Self::BITS / 8;
        assert!(bytes.len() >= count, "Need at least {count} bytes");
        let mut value = Self::ZERO;
        for (index, &byte) in bytes[..count].iter().enumerate() {
            value |= Self::from(byte) << (index * 8);
        }
        value
    }

    /// Builds a value from the first `BITS / 8` bytes, most significant
    /// byte first.
    ///
    /// # Panics
    /// Panics if the slice holds fewer than `BITS / 8` bytes.
    fn from_big_endian_bytes(bytes: &[u8]) -> Self {
        let count = Self::BITS / 8;
        assert!(bytes.len() >= count, "Need at least {count} bytes");
        let mut value = Self::ZERO;
        for &byte in &bytes[..count] {
            value = (value << 8) | Self::from(byte);
        }
        value
    }

    /// Decodes a binary-coded-decimal value, one digit per nibble.
    ///
    /// Returns `None` if any nibble is greater than 9.
    ///
    /// # Examples
    /// ```
    /// use regpack::BitStorage;
    ///
    /// assert_eq!(u8::from_bcd(0x42), Some(42));
    /// assert_eq!(u8::from_bcd(0x4a), None);
    /// ```
    fn from_bcd(bcd: Self) -> Option<Self> {
        let mut bcd = bcd;
        let mut value = Self::ZERO;
        let mut multiplier = Self::ONE;
        for _ in 0..Self::BITS / 4 {
            let nibble = bcd & Self::from(0xf);
            if nibble > Self::from(9) {
                return None;
            }
            bcd >>= 4;
            value = value + nibble * multiplier;
            multiplier = multiplier * Self::from(10);
        }
        Some(value)
    }

    /// Encodes a value as binary-coded decimal, one digit per nibble.
    ///
    /// Returns `None` if the decimal digits do not fit the width.
    ///
    /// # Examples
    /// ```
    /// use regpack::BitStorage;
    ///
    /// assert_eq!(42u8.to_bcd(), Some(0x42));
    /// assert_eq!(123u8.to_bcd(), None); // three digits need 12 bits
    /// ```
    fn to_bcd(self) -> Option<Self> {
        let mut value = self;
        let mut shift = 0;
        let mut result = Self::ZERO;
        let ten = Self::from(10);
        while value > Self::ZERO {
            if Self::BITS - shift < 4 {
                return None;
            }
            result |= (value % ten) << shift;
            value = value / ten;
            shift += 4;
        }
        Some(result)
    }
}

macro_rules! impl_bit_storage {
    ($($int:ty),+ $(,)?) => {
        $(
            impl BitStorage for $int {
                const BITS: usize = <$int>::BITS as usize;
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const MAX: Self = <$int>::MAX;

                #[inline]
                fn count_ones(self) -> usize {
                    <$int>::count_ones(self) as usize
                }

                #[inline]
                fn trailing_zeros(self) -> usize {
                    <$int>::trailing_zeros(self) as usize
                }

                #[inline]
                fn leading_zeros(self) -> usize {
                    <$int>::leading_zeros(self) as usize
                }

                #[inline]
                fn to_u8(self) -> u8 {
                    self as u8
                }

                #[inline]
                fn to_usize(self) -> usize {
                    self as usize
                }
            }
        )+
    };
}

impl_bit_storage!(u8, u16, u32, u64);
