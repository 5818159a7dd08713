use crate::storage::BitStorage;
use core::fmt::{self, Debug, Display, Formatter};
use core::iter::FusedIterator;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A `NumberSet` holding members `0..=7`.
pub type NumberSet8 = NumberSet<u8>;
/// A `NumberSet` holding members `0..=15`.
pub type NumberSet16 = NumberSet<u16>;
/// A `NumberSet` holding members `0..=31`.
pub type NumberSet32 = NumberSet<u32>;
/// A `NumberSet` holding members `0..=63`.
pub type NumberSet64 = NumberSet<u64>;

/// A set of small integers stored one bit per member in a single unsigned
/// integer: bit `x` set means `x` is a member. Membership, insertion,
/// removal and the set algebra are all O(1) bitwise operations, and
/// iteration yields members in ascending order.
///
/// ```
/// use regpack::NumberSet8;
///
/// let set = NumberSet8::from_raw(0b1001_0001);
/// assert!(set.contains(4));
/// assert_eq!(set.len(), 3);
/// let mut members = set.iter();
/// assert_eq!(members.next(), Some(0));
/// assert_eq!(members.next(), Some(4));
/// assert_eq!(members.next(), Some(7));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumberSet<T: BitStorage> {
    raw: T,
}

impl<T: BitStorage> NumberSet<T> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self { raw: T::ZERO }
    }

    /// Creates a set over the supplied raw value; member `x` corresponds
    /// to bit `x`.
    ///
    /// # Examples
    /// ```
    /// use regpack::NumberSet8;
    ///
    /// let set = NumberSet8::from_raw(0b0010_0010);
    /// assert_eq!(format!("{set}"), "[1, 5]");
    /// ```
    pub fn from_raw(raw: T) -> Self {
        Self { raw }
    }

    /// Creates a set with the members yielded by the iterator.
    ///
    /// # Panics
    /// Panics if any member is out of bounds (i.e., `>= capacity()`).
    pub fn from_members<I: IntoIterator<Item = usize>>(members: I) -> Self {
        let mut set = Self::new();
        for member in members {
            set.insert(member);
        }
        set
    }

    /// The underlying storage.
    pub fn raw_value(&self) -> T {
        self.raw
    }

    /// Returns `true` if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.raw == T::ZERO
    }

    /// The number of members in the set.
    pub fn len(&self) -> usize {
        self.raw.count_ones()
    }

    /// The largest number of members the set can hold, fixed at the width
    /// of the storage.
    pub fn capacity(&self) -> usize {
        T::BITS
    }

    /// The smallest member, or `None` if the set is empty.
    #[inline]
    pub fn first(&self) -> Option<usize> {
        self.raw.lowest_bit_set()
    }

    /// Returns `true` if `member` is in the set.
    ///
    /// # Panics
    /// Panics if `member >= capacity()`.
    #[inline]
    pub fn contains(&self, member: usize) -> bool {
        self.raw.bit(member)
    }

    /// The smallest member, or `None` if the set is empty.
    #[inline]
    pub fn min(&self) -> Option<usize> {
        self.raw.lowest_bit_set()
    }

    /// The largest member, or `None` if the set is empty.
    #[inline]
    pub fn max(&self) -> Option<usize> {
        self.raw.highest_bit_set()
    }

    /// Adds `member` to the set.
    ///
    /// Returns `true` if the member was not already present.
    ///
    /// # Panics
    /// Panics if `member >= capacity()`.
    pub fn insert(&mut self, member: usize) -> bool {
        if self.raw.bit(member) {
            return false;
        }
        self.raw.set_bit(member, true);
        true
    }

    /// Adds `member` to the set unconditionally.
    ///
    /// Returns the member if it was already present, `None` otherwise.
    ///
    /// # Panics
    /// Panics if `member >= capacity()`.
    pub fn replace(&mut self, member: usize) -> Option<usize> {
        if self.raw.bit(member) {
            return Some(member);
        }
        self.raw.set_bit(member, true);
        None
    }

    /// Removes `member` from the set.
    ///
    /// Returns `true` if the member was present.
    ///
    /// # Panics
    /// Panics if `member >= capacity()`.
    pub fn remove(&mut self, member: usize) -> bool {
        if !self.raw.bit(member) {
            return false;
        }
        self.raw.set_bit(member, false);
        true
    }

    /// Removes and returns the smallest member, or `None` if the set is
    /// empty. O(1).
    pub fn pop_first(&mut self) -> Option<usize> {
        self.raw.clear_lowest_bit_set()
    }

    /// Removes and returns the member at `position` in ascending order.
    ///
    /// The storage keeps no ordering structure beyond the bits themselves,
    /// so this is an O(capacity) scan over the set bits, unlike the O(1)
    /// membership operations.
    ///
    /// # Panics
    /// Panics if `position >= len()`.
    pub fn remove_at(&mut self, position: usize) -> usize {
        let mut position = position;
        for bit_index in 0..T::BITS {
            if self.raw.bit(bit_index) {
                if position == 0 {
                    self.raw.set_bit(bit_index, false);
                    return bit_index;
                }
                position -= 1;
            }
        }
        panic!("Position out of bounds");
    }

    /// Removes all members.
    pub fn clear(&mut self) {
        self.raw = T::ZERO;
    }

    /// Returns `true` if the two sets have no members in common.
    #[inline]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.raw & other.raw == T::ZERO
    }

    /// Returns `true` if every member of `self` is in `other`.
    #[inline]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.raw & other.raw == self.raw
    }

    /// Returns `true` if every member of `other` is in `self`.
    #[inline]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns a new set with the members of both sets.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self::from_raw(self.raw | other.raw)
    }

    /// Returns a new set with the members common to both sets.
    #[inline]
    pub fn intersection(&self, other: &Self) -> Self {
        Self::from_raw(self.raw & other.raw)
    }

    /// Returns a new set with the members of `self` that are not in
    /// `other`.
    #[inline]
    pub fn difference(&self, other: &Self) -> Self {
        Self::from_raw(self.raw & !other.raw)
    }

    /// Returns a new set with the members that are in exactly one of the
    /// two sets.
    #[inline]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        Self::from_raw(self.raw ^ other.raw)
    }

    /// Adds the members of `other` to `self`.
    #[inline]
    pub fn in_place_union(&mut self, other: &Self) {
        self.raw |= other.raw;
    }

    /// Removes the members of `self` that are not in `other`.
    #[inline]
    pub fn in_place_intersection(&mut self, other: &Self) {
        self.raw &= other.raw;
    }

    /// Removes the members of `other` from `self`.
    #[inline]
    pub fn in_place_difference(&mut self, other: &Self) {
        self.raw &= !other.raw;
    }

    /// Keeps the members that are in exactly one of the two sets.
    #[inline]
    pub fn in_place_symmetric_difference(&mut self, other: &Self) {
        self.raw ^= other.raw;
    }

    /// Returns an iterator over the members in ascending order.
    ///
    /// The iterator works on its own copy of the storage: iterating never
    /// mutates the set, and a fresh call restarts from the smallest member.
    #[inline]
    pub fn iter(&self) -> NumberSetIter<T> {
        NumberSetIter { raw: self.raw }
    }
}

impl<T: BitStorage> FromIterator<usize> for NumberSet<T> {
    /// # Panics
    /// Panics if any member is out of bounds (i.e., `>= capacity()`).
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self::from_members(iter)
    }
}

impl<T: BitStorage> IntoIterator for &NumberSet<T> {
    type Item = usize;
    type IntoIter = NumberSetIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: BitStorage> BitOr for NumberSet<T> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(&rhs)
    }
}

impl<T: BitStorage> BitOrAssign for NumberSet<T> {
    fn bitor_assign(&mut self, rhs: Self) {
        self.in_place_union(&rhs)
    }
}

impl<T: BitStorage> BitAnd for NumberSet<T> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(&rhs)
    }
}

impl<T: BitStorage> BitAndAssign for NumberSet<T> {
    fn bitand_assign(&mut self, rhs: Self) {
        self.in_place_intersection(&rhs)
    }
}

impl<T: BitStorage> Sub for NumberSet<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(&rhs)
    }
}

impl<T: BitStorage> SubAssign for NumberSet<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.in_place_difference(&rhs)
    }
}

impl<T: BitStorage> BitXor for NumberSet<T> {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.symmetric_difference(&rhs)
    }
}

impl<T: BitStorage> BitXorAssign for NumberSet<T> {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.in_place_symmetric_difference(&rhs)
    }
}

impl<T: BitStorage> Display for NumberSet<T> {
    /// Bracketed, comma-separated members in ascending order, e.g.
    /// `[1, 3, 5, 7]`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (position, member) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{member}")?;
        }
        f.write_str("]")
    }
}

impl<T: BitStorage> Debug for NumberSet<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "NumberSet({self})")
    }
}

/// Iterator over the members of a [`NumberSet`] in ascending order.
///
/// Repeatedly clears the lowest set bit of a private copy of the storage;
/// the set being iterated is unaffected.
#[derive(Clone, Copy)]
pub struct NumberSetIter<T> {
    raw: T,
}

impl<T: BitStorage> Iterator for NumberSetIter<T> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        self.raw.clear_lowest_bit_set()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.raw.count_ones();
        (remaining, Some(remaining))
    }
}

impl<T: BitStorage> ExactSizeIterator for NumberSetIter<T> {}

impl<T: BitStorage> FusedIterator for NumberSetIter<T> {}
