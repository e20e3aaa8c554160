use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use core::iter::{FusedIterator, Iterator};
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::copy::{Source, copy_bits, vacated};
use crate::error::{Error, Result};
use crate::render::{RenderOptions, render};
use crate::validate::{check_index, check_range, check_same_len, check_width, range_end};
use crate::word::{
    BITS, Word, bit_offset, idxs, mask_below, mask_between, mask_from, read_bits, word_count,
    word_index, write_bits,
};

/// A growable, word-packed bit vector.
///
/// Bits are stored least-significant-bit first in [`Word`]s. The storage holds
/// exactly `len.div_ceil(64)` words and only ever grows. Every public method
/// leaves all bits at or beyond [`len`](BitVec::len) zero, including calls
/// that end up doing nothing.
///
/// # Examples
/// ```
/// use bitgrid::BitVec;
///
/// let mut bits = BitVec::with_len(100);
/// bits.set_range(10, 20).unwrap();
/// assert_eq!(bits.count(), 20);
/// bits.move_range(10, 70, 20).unwrap();
/// assert!(!bits.test(10).unwrap());
/// assert!(bits.test(70).unwrap());
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Default)]
pub struct BitVec {
    words: Vec<Word>,
    len: usize,
}

impl BitVec {
    /// Creates an empty bit vector without allocating.
    #[inline]
    pub const fn new() -> Self {
        Self {
            words: Vec::new(),
            len: 0,
        }
    }

    /// Creates a bit vector of `len` unset bits.
    ///
    /// # Examples
    /// ```
    /// use bitgrid::BitVec;
    ///
    /// let bits = BitVec::with_len(130);
    /// assert_eq!(bits.len(), 130);
    /// assert_eq!(bits.as_words().len(), 3);
    /// assert!(!bits.any());
    /// ```
    pub fn with_len(len: usize) -> Self {
        Self {
            words: alloc::vec![0; word_count(len)],
            len,
        }
    }

    /// Creates a bit vector of `len` bits with only the given indices set.
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] if any index is `>= len`.
    ///
    /// # Examples
    /// ```
    /// use bitgrid::BitVec;
    ///
    /// let bits = BitVec::from_ones_iter(5, [0, 2, 4]).unwrap();
    /// assert!(bits.test(2).unwrap());
    /// assert!(!bits.test(1).unwrap());
    /// assert!(BitVec::from_ones_iter(5, [5]).is_err());
    /// ```
    pub fn from_ones_iter<I: IntoIterator<Item = usize>>(len: usize, iter: I) -> Result<Self> {
        let mut bits = Self::with_len(len);
        for idx in iter {
            bits.set_bit(idx)?;
        }
        Ok(bits)
    }

    /// Returns the number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the bit vector holds no bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns how many bits the current allocation holds before the next
    /// reallocation.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.words.capacity() * BITS
    }

    /// Returns the underlying words, least-significant-bit first.
    ///
    /// Bits at or beyond [`len`](BitVec::len) in the last word are always zero.
    #[inline]
    pub fn as_words(&self) -> &[Word] {
        &self.words
    }

    /// Overwrites the whole storage from `words` and clears any bits beyond
    /// [`len`](BitVec::len) in the last word.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `words.len()` differs from
    /// `as_words().len()`.
    ///
    /// # Examples
    /// ```
    /// use bitgrid::BitVec;
    ///
    /// let mut bits = BitVec::with_len(4);
    /// bits.load_words(&[0xff]).unwrap();
    /// assert_eq!(bits.as_words(), &[0x0f]);
    /// ```
    pub fn load_words(&mut self, words: &[Word]) -> Result<()> {
        if words.len() != self.words.len() {
            return Err(Error::InvalidArgument("word count does not match length"));
        }
        self.words.copy_from_slice(words);
        self.clean_unused_bits();
        Ok(())
    }

    /// Grows the bit vector to `len` bits, filling new positions with zeros.
    /// Never shrinks.
    ///
    /// # Examples
    /// ```
    /// use bitgrid::BitVec;
    ///
    /// let mut bits = BitVec::with_len(10);
    /// bits.ensure_len(100);
    /// assert_eq!(bits.len(), 100);
    /// bits.ensure_len(50);
    /// assert_eq!(bits.len(), 100);
    /// ```
    pub fn ensure_len(&mut self, len: usize) {
        if len <= self.len {
            return;
        }
        let needed = word_count(len);
        if needed > self.words.len() {
            self.reserve_words(needed);
            self.words.resize(needed, 0);
        }
        self.len = len;
        // the old last word may no longer be the last one
        self.clean_unused_bits();
    }

    /// Grows the bit vector by `additional` zero bits.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if the new length overflows `usize`.
    pub fn add_len(&mut self, additional: usize) -> Result<()> {
        let len = range_end(self.len, additional)?;
        self.ensure_len(len);
        Ok(())
    }

    /// Appends one bit.
    pub fn push(&mut self, bit: bool) {
        let idx = self.len;
        self.ensure_len(idx + 1);
        if bit {
            let (word, offset) = idxs(idx);
            self.words[word] |= 1 << offset;
        }
    }

    // Grows the allocation by at least half its size so repeated growth stays
    // amortized.
    fn reserve_words(&mut self, needed: usize) {
        let capacity = self.words.capacity();
        if needed <= capacity {
            return;
        }
        let target = needed.max(capacity + capacity / 2);
        self.words.reserve_exact(target - self.words.len());
        tracing::trace!(
            from = capacity,
            to = self.words.capacity(),
            "bit storage reallocated"
        );
    }

    /// Returns `true` if the bit at `pos` is set.
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] if `pos >= len`.
    ///
    /// # Examples
    /// ```
    /// use bitgrid::BitVec;
    ///
    /// let mut bits = BitVec::with_len(8);
    /// bits.set_bit(1).unwrap();
    /// assert!(bits.test(1).unwrap());
    /// assert!(!bits.test(0).unwrap());
    /// assert!(bits.test(8).is_err());
    /// ```
    #[inline]
    pub fn test(&self, pos: usize) -> Result<bool> {
        check_index(pos, self.len)?;
        let (word, offset) = idxs(pos);
        Ok(self.words[word] & 1 << offset != 0)
    }

    /// Sets the bit at `pos`.
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] if `pos >= len`.
    #[inline]
    pub fn set_bit(&mut self, pos: usize) -> Result<()> {
        check_index(pos, self.len)?;
        let (word, offset) = idxs(pos);
        self.words[word] |= 1 << offset;
        Ok(())
    }

    /// Clears the bit at `pos`.
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] if `pos >= len`.
    #[inline]
    pub fn clear_bit(&mut self, pos: usize) -> Result<()> {
        check_index(pos, self.len)?;
        let (word, offset) = idxs(pos);
        self.words[word] &= !(1 << offset);
        Ok(())
    }

    /// Toggles the bit at `pos` and returns its previous value.
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] if `pos >= len`.
    ///
    /// # Examples
    /// ```
    /// use bitgrid::BitVec;
    ///
    /// let mut bits = BitVec::with_len(8);
    /// assert_eq!(bits.flip_bit(4).unwrap(), false); // flipped from false to true
    /// assert_eq!(bits.flip_bit(4).unwrap(), true);  // flipped from true to false
    /// ```
    #[inline]
    pub fn flip_bit(&mut self, pos: usize) -> Result<bool> {
        check_index(pos, self.len)?;
        let (word, offset) = idxs(pos);
        let bit = self.words[word] & 1 << offset != 0;
        self.words[word] ^= 1 << offset;
        Ok(bit)
    }

    /// Reads `n` bits starting at `pos` and returns them right-aligned, bit
    /// `pos` in the least significant position. The range may straddle two
    /// words.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `n` is not in `1..=64` and
    /// [`Error::OutOfRange`] if `pos + n > len`.
    ///
    /// # Examples
    /// ```
    /// use bitgrid::BitVec;
    ///
    /// let mut bits = BitVec::with_len(200);
    /// bits.set_range(62, 4).unwrap();
    /// assert_eq!(bits.get_bits(62, 4).unwrap(), 0b1111);
    /// assert_eq!(bits.get_bits(60, 8).unwrap(), 0b0011_1100);
    /// ```
    pub fn get_bits(&self, pos: usize, n: usize) -> Result<Word> {
        check_width(n)?;
        check_range(pos, n, self.len)?;
        Ok(read_bits(&self.words, pos, n))
    }

    /// Writes the low `n` bits of `value` at `pos`. Higher bits of `value` are
    /// ignored and every bit outside `[pos, pos + n)` is left untouched.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `n` is not in `1..=64` and
    /// [`Error::OutOfRange`] if `pos + n > len`.
    ///
    /// # Examples
    /// ```
    /// use bitgrid::BitVec;
    ///
    /// let mut bits = BitVec::with_len(128);
    /// bits.set_bits(60, 8, 0xfa5).unwrap();
    /// assert_eq!(bits.get_bits(60, 8).unwrap(), 0xa5);
    /// assert_eq!(bits.count(), 4);
    /// ```
    pub fn set_bits(&mut self, pos: usize, n: usize, value: Word) -> Result<()> {
        check_width(n)?;
        check_range(pos, n, self.len)?;
        write_bits(&mut self.words, pos, n, value);
        Ok(())
    }

    /// Returns `true` if any bit is set.
    #[inline]
    pub fn any(&self) -> bool {
        self.range_words(0, self.len).any(|word| word != 0)
    }

    /// Returns the number of set bits.
    #[inline]
    pub fn count(&self) -> usize {
        self.range_words(0, self.len)
            .map(|word| word.count_ones() as usize)
            .sum()
    }

    /// Returns `true` if any bit in `[start, start + count)` is set.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `start + count` overflows and
    /// [`Error::OutOfRange`] if it exceeds `len`.
    pub fn any_in_range(&self, start: usize, count: usize) -> Result<bool> {
        let end = check_range(start, count, self.len)?;
        Ok(self.range_words(start, end).any(|word| word != 0))
    }

    /// Returns the number of set bits in `[start, start + count)`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `start + count` overflows and
    /// [`Error::OutOfRange`] if it exceeds `len`.
    pub fn count_range(&self, start: usize, count: usize) -> Result<usize> {
        let end = check_range(start, count, self.len)?;
        Ok(self
            .range_words(start, end)
            .map(|word| word.count_ones() as usize)
            .sum())
    }

    /// Returns the index of the first set bit or `None` if all bits are unset.
    ///
    /// # Examples
    /// ```
    /// use bitgrid::BitVec;
    ///
    /// let mut bits = BitVec::with_len(300);
    /// assert_eq!(bits.first_set_bit(), None);
    /// bits.set_bit(257).unwrap();
    /// assert_eq!(bits.first_set_bit(), Some(257));
    /// ```
    pub fn first_set_bit(&self) -> Option<usize> {
        self.iter_ones().next()
    }

    // Words overlapping `[start, end)`, each masked down to the part inside
    // the range.
    fn range_words(&self, start: usize, end: usize) -> impl Iterator<Item = Word> {
        let first = word_index(start);
        let stop = word_count(end);
        let lo = bit_offset(start);
        (first..stop).map(move |i| {
            let mut word = self.words[i];
            if i == first {
                word &= mask_from(lo);
            }
            if i + 1 == stop {
                word &= mask_below(end - i * BITS);
            }
            word
        })
    }

    /// Sets every bit in `[start, start + count)`, growing the bit vector to
    /// `start + count` bits if it is shorter. A zero `count` changes nothing.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `start + count` overflows.
    ///
    /// # Examples
    /// ```
    /// use bitgrid::BitVec;
    ///
    /// let mut bits = BitVec::with_len(8);
    /// bits.set_range(2, 4).unwrap();
    /// assert!(bits.test(2).unwrap());
    /// assert!(bits.test(5).unwrap());
    /// assert!(!bits.test(6).unwrap());
    ///
    /// bits.set_range(6, 10).unwrap();
    /// assert_eq!(bits.len(), 16);
    /// ```
    pub fn set_range(&mut self, start: usize, count: usize) -> Result<()> {
        let end = range_end(start, count)?;
        if count == 0 {
            self.clean_unused_bits();
            return Ok(());
        }
        self.ensure_len(end);
        self.fill_range(start, end, true);
        Ok(())
    }

    /// Clears every bit in `[start, start + count)`. Never grows.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `start + count` overflows and
    /// [`Error::OutOfRange`] if it exceeds `len`.
    ///
    /// # Examples
    /// ```
    /// use bitgrid::BitVec;
    ///
    /// let mut bits = BitVec::with_len(8);
    /// bits.set_all();
    /// bits.clear_range(2, 4).unwrap();
    /// assert!(!bits.test(2).unwrap());
    /// assert!(!bits.test(5).unwrap());
    /// assert!(bits.test(6).unwrap());
    /// assert!(bits.clear_range(6, 3).is_err());
    /// ```
    pub fn clear_range(&mut self, start: usize, count: usize) -> Result<()> {
        let end = check_range(start, count, self.len)?;
        if count == 0 {
            self.clean_unused_bits();
            return Ok(());
        }
        self.fill_range(start, end, false);
        Ok(())
    }

    // `start < end <= len`
    fn fill_range(&mut self, start: usize, end: usize, value: bool) {
        let (start_word, start_bit) = idxs(start);
        let (end_word, end_bit) = idxs(end - 1);

        let apply = |word: &mut Word, mask: Word| {
            if value {
                *word |= mask;
            } else {
                *word &= !mask;
            }
        };

        // all within one word
        if start_word == end_word {
            apply(
                &mut self.words[start_word],
                mask_between(start_bit, end_bit + 1),
            );
            self.clean_unused_bits();
            return;
        }

        // head word
        apply(&mut self.words[start_word], mask_from(start_bit));

        // full words in between
        self.words[start_word + 1..end_word].fill(if value { !0 } else { 0 });

        // tail word
        apply(&mut self.words[end_word], mask_below(end_bit + 1));

        self.clean_unused_bits();
    }

    /// Sets all bits.
    pub fn set_all(&mut self) {
        self.words.fill(!0);
        self.clean_unused_bits();
    }

    /// Clears all bits.
    pub fn clear_all(&mut self) {
        self.words.fill(0);
    }

    /// Copies `count` bits of `src` starting at `src_start` into `self` at
    /// `dst_start`, growing `self` to `dst_start + count` bits if needed.
    ///
    /// To copy inside one bit vector use [`copy_within`](BitVec::copy_within).
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if either range end overflows and
    /// [`Error::OutOfRange`] if the source range exceeds `src.len()`.
    ///
    /// # Examples
    /// ```
    /// use bitgrid::BitVec;
    ///
    /// let src = BitVec::from_ones_iter(10, [1, 3]).unwrap();
    /// let mut dst = BitVec::new();
    /// dst.copy_from(&src, 1, 100, 3).unwrap();
    /// assert_eq!(dst.len(), 103);
    /// assert_eq!(dst.get_bits(100, 3).unwrap(), 0b101);
    /// ```
    pub fn copy_from(
        &mut self,
        src: &BitVec,
        src_start: usize,
        dst_start: usize,
        count: usize,
    ) -> Result<()> {
        check_range(src_start, count, src.len)?;
        let dst_end = range_end(dst_start, count)?;
        if count == 0 {
            self.clean_unused_bits();
            return Ok(());
        }
        self.ensure_len(dst_end);
        copy_bits(
            &mut self.words,
            Source::Other(&src.words),
            src_start,
            dst_start,
            count,
        );
        self.clean_unused_bits();
        Ok(())
    }

    /// Copies `count` bits from `src_start` to `dst_start` inside `self`, with
    /// the semantics of `memmove`: overlapping ranges are handled as if the
    /// source were read completely before the destination is written. Grows
    /// `self` to `dst_start + count` bits if needed.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if either range end overflows and
    /// [`Error::OutOfRange`] if the source range exceeds `len`.
    ///
    /// # Examples
    /// ```
    /// use bitgrid::BitVec;
    ///
    /// let mut bits = BitVec::from_ones_iter(8, [0, 1, 2]).unwrap();
    /// bits.copy_within(0, 2, 3).unwrap();
    /// assert_eq!(bits.get_bits(0, 8).unwrap(), 0b0001_1111);
    /// ```
    pub fn copy_within(&mut self, src_start: usize, dst_start: usize, count: usize) -> Result<()> {
        check_range(src_start, count, self.len)?;
        let dst_end = range_end(dst_start, count)?;
        if count == 0 {
            self.clean_unused_bits();
            return Ok(());
        }
        self.ensure_len(dst_end);
        copy_bits(&mut self.words, Source::Within, src_start, dst_start, count);
        self.clean_unused_bits();
        Ok(())
    }

    /// Moves `count` bits from `src_start` to `dst_start`: copies them like
    /// [`copy_within`](BitVec::copy_within), then clears the part of the source
    /// range the destination does not cover.
    ///
    /// # Errors
    /// Same as [`copy_within`](BitVec::copy_within).
    ///
    /// # Examples
    /// ```
    /// use bitgrid::BitVec;
    ///
    /// let mut bits = BitVec::from_ones_iter(8, [0, 1, 2]).unwrap();
    /// bits.move_range(0, 2, 3).unwrap();
    /// assert_eq!(bits.get_bits(0, 8).unwrap(), 0b0001_1100);
    /// ```
    pub fn move_range(&mut self, src_start: usize, dst_start: usize, count: usize) -> Result<()> {
        check_range(src_start, count, self.len)?;
        range_end(dst_start, count)?;
        if count == 0 || src_start == dst_start {
            self.clean_unused_bits();
            return Ok(());
        }
        self.copy_within(src_start, dst_start, count)?;
        let (start, count) = vacated(src_start, dst_start, count);
        if count > 0 {
            self.fill_range(start, start + count, false);
        }
        Ok(())
    }

    /// Performs an in-place bitwise AND with another bit vector of the same
    /// length.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if the lengths differ.
    ///
    /// # Examples
    /// ```
    /// use bitgrid::BitVec;
    ///
    /// let mut a = BitVec::from_ones_iter(4, [0, 2]).unwrap();
    /// let b = BitVec::from_ones_iter(4, [1, 2]).unwrap();
    /// a.in_place_bit_and(&b).unwrap();
    /// assert_eq!(a, BitVec::from_ones_iter(4, [2]).unwrap());
    /// ```
    pub fn in_place_bit_and(&mut self, other: &Self) -> Result<()> {
        check_same_len(self.len, other.len)?;
        self.zip_words(other, |a, b| a & b);
        Ok(())
    }

    /// Performs an in-place bitwise OR with another bit vector of the same
    /// length.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if the lengths differ.
    pub fn in_place_bit_or(&mut self, other: &Self) -> Result<()> {
        check_same_len(self.len, other.len)?;
        self.zip_words(other, |a, b| a | b);
        Ok(())
    }

    /// Performs an in-place bitwise XOR with another bit vector of the same
    /// length.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if the lengths differ.
    pub fn in_place_bit_xor(&mut self, other: &Self) -> Result<()> {
        check_same_len(self.len, other.len)?;
        self.zip_words(other, |a, b| a ^ b);
        Ok(())
    }

    /// Inverts every bit in `[0, len)`.
    ///
    /// # Examples
    /// ```
    /// use bitgrid::BitVec;
    ///
    /// let mut bits = BitVec::from_ones_iter(4, [0, 2]).unwrap();
    /// bits.in_place_bit_not();
    /// assert_eq!(bits.as_words(), &[0b1010]);
    /// ```
    pub fn in_place_bit_not(&mut self) {
        for word in &mut self.words {
            *word = !*word;
        }
        self.clean_unused_bits();
    }

    // lengths already checked
    fn zip_words(&mut self, other: &Self, op: impl Fn(Word, Word) -> Word) {
        for (word, other) in self.words.iter_mut().zip(other.words.iter()) {
            *word = op(*word, *other);
        }
        self.clean_unused_bits();
    }

    #[inline]
    fn clean_unused_bits(&mut self) {
        let bits_in_last = bit_offset(self.len);
        if bits_in_last != 0
            && let Some(last) = self.words.last_mut()
        {
            *last &= mask_below(bits_in_last);
        }
    }

    /// Returns an iterator over all bits as `bool`, in index order.
    ///
    /// # Examples
    /// ```
    /// use bitgrid::BitVec;
    ///
    /// let bits = BitVec::from_ones_iter(4, [0, 2]).unwrap();
    /// let all: Vec<bool> = bits.iter().collect();
    /// assert_eq!(all, [true, false, true, false]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter { bits: self, idx: 0 }
    }

    /// Returns an iterator over the indices of all set bits, in ascending
    /// order. Runs in O(max(k, w)) where k is the number of set bits and w the
    /// number of words.
    ///
    /// # Examples
    /// ```
    /// use bitgrid::BitVec;
    ///
    /// let bits = BitVec::from_ones_iter(130, [3, 64, 129]).unwrap();
    /// let ones: Vec<usize> = bits.iter_ones().collect();
    /// assert_eq!(ones, [3, 64, 129]);
    /// ```
    #[inline]
    pub fn iter_ones(&self) -> IterOnes<'_> {
        IterOnes {
            words: &self.words,
            len: self.len,
            word_idx: 0,
            current: self.words.first().copied().unwrap_or(0),
            base_bit_idx: 0,
        }
    }

    /// Returns an iterator over the indices of all unset bits, in ascending
    /// order.
    ///
    /// # Examples
    /// ```
    /// use bitgrid::BitVec;
    ///
    /// let bits = BitVec::from_ones_iter(5, [0, 2, 4]).unwrap();
    /// let zeros: Vec<usize> = bits.iter_zeros().collect();
    /// assert_eq!(zeros, [1, 3]);
    /// ```
    #[inline]
    pub fn iter_zeros(&self) -> IterZeros<'_> {
        IterZeros {
            words: &self.words,
            len: self.len,
            word_idx: 0,
            current: !self.words.first().copied().unwrap_or(!0),
            base_bit_idx: 0,
        }
    }
}

impl<'bits> IntoIterator for &'bits BitVec {
    type Item = bool;
    type IntoIter = Iter<'bits>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Debug for BitVec {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "LSB -> ")?;
        let options = RenderOptions::default();
        for start in (0..self.len).step_by(8) {
            if start > 0 {
                write!(f, " ")?;
            }
            let byte = render(self, start, (self.len - start).min(8), &options)
                .map_err(|_| core::fmt::Error)?;
            write!(f, "{start}: {byte}")?;
        }
        write!(f, " <- MSB")
    }
}

/// Collects bits in order, one bit per item.
impl FromIterator<bool> for BitVec {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let mut bits = Self::new();
        for bit in iter {
            bits.push(bit);
        }
        bits
    }
}

impl BitAnd for &BitVec {
    type Output = BitVec;

    /// # Panics
    /// Panics if the operands have different lengths.
    fn bitand(self, rhs: Self) -> Self::Output {
        let mut out = self.clone();
        out &= rhs;
        out
    }
}

impl BitAndAssign<&BitVec> for BitVec {
    /// # Panics
    /// Panics if the operands have different lengths.
    fn bitand_assign(&mut self, rhs: &BitVec) {
        assert_eq!(self.len, rhs.len, "operand lengths differ");
        self.zip_words(rhs, |a, b| a & b);
    }
}

impl BitOr for &BitVec {
    type Output = BitVec;

    /// # Panics
    /// Panics if the operands have different lengths.
    fn bitor(self, rhs: Self) -> Self::Output {
        let mut out = self.clone();
        out |= rhs;
        out
    }
}

impl BitOrAssign<&BitVec> for BitVec {
    /// # Panics
    /// Panics if the operands have different lengths.
    fn bitor_assign(&mut self, rhs: &BitVec) {
        assert_eq!(self.len, rhs.len, "operand lengths differ");
        self.zip_words(rhs, |a, b| a | b);
    }
}

impl BitXor for &BitVec {
    type Output = BitVec;

    /// # Panics
    /// Panics if the operands have different lengths.
    fn bitxor(self, rhs: Self) -> Self::Output {
        let mut out = self.clone();
        out ^= rhs;
        out
    }
}

impl BitXorAssign<&BitVec> for BitVec {
    /// # Panics
    /// Panics if the operands have different lengths.
    fn bitxor_assign(&mut self, rhs: &BitVec) {
        assert_eq!(self.len, rhs.len, "operand lengths differ");
        self.zip_words(rhs, |a, b| a ^ b);
    }
}

impl Not for &BitVec {
    type Output = BitVec;

    fn not(self) -> Self::Output {
        let mut out = self.clone();
        out.in_place_bit_not();
        out
    }
}

impl Not for BitVec {
    type Output = Self;

    fn not(mut self) -> Self::Output {
        self.in_place_bit_not();
        self
    }
}

/// Iterator over all bits in the bit vector as `bool` values.
///
/// Returned by [`BitVec::iter()`].
#[derive(Clone, Copy)]
pub struct Iter<'bits> {
    bits: &'bits BitVec,
    idx: usize,
}

impl Iterator for Iter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.bits.len {
            return None;
        }
        let (word, offset) = idxs(self.idx);
        self.idx += 1;
        Some(self.bits.words[word] & 1 << offset != 0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits.len.saturating_sub(self.idx);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

/// Iterator over the indices of set bits.
///
/// Returned by [`BitVec::iter_ones()`].
#[derive(Clone, Copy)]
pub struct IterOnes<'bits> {
    words: &'bits [Word],
    len: usize,
    word_idx: usize,
    current: Word,
    base_bit_idx: usize,
}

impl Iterator for IterOnes<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.word_idx < self.words.len() {
            if self.current != 0 {
                let tz = self.current.trailing_zeros() as usize;
                let idx = self.base_bit_idx + tz;
                if idx >= self.len {
                    self.current = 0;
                    return None;
                }
                self.current &= self.current - 1; // unset LSB
                return Some(idx);
            }

            self.word_idx += 1;
            self.base_bit_idx += BITS;
            self.current = self.words.get(self.word_idx).copied().unwrap_or(0);
        }
        None
    }
}

impl FusedIterator for IterOnes<'_> {}

/// Iterator over the indices of unset bits.
///
/// Returned by [`BitVec::iter_zeros()`].
#[derive(Clone, Copy)]
pub struct IterZeros<'bits> {
    words: &'bits [Word],
    len: usize,
    word_idx: usize,
    current: Word,
    base_bit_idx: usize,
}

impl Iterator for IterZeros<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.word_idx < self.words.len() {
            if self.current != 0 {
                let tz = self.current.trailing_zeros() as usize;
                let idx = self.base_bit_idx + tz;
                if idx >= self.len {
                    self.current = 0; // avoid entering if block once exhausted
                    return None;
                }
                self.current &= self.current - 1; // unset LSB
                return Some(idx);
            }

            self.word_idx += 1;
            self.base_bit_idx += BITS;
            self.current = !self.words.get(self.word_idx).copied().unwrap_or(!0);
        }
        None
    }
}

impl FusedIterator for IterZeros<'_> {}
