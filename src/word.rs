//! Bit index to `(word, offset)` conversion and sub-word mask construction.
//!
//! Bits are packed least-significant-bit first: bit `i` lives in word
//! `i / BITS` at offset `i % BITS`. This layout is what [`BitVec::as_words`]
//! exposes.
//!
//! [`BitVec::as_words`]: crate::BitVec::as_words

/// The storage unit bits are packed into.
pub type Word = u64;

/// Number of bits per [`Word`].
pub const BITS: usize = Word::BITS as usize;

/// Returns the index of the word holding bit `idx`.
#[inline]
pub const fn word_index(idx: usize) -> usize {
    idx / BITS
}

/// Returns the offset of bit `idx` inside its word.
#[inline]
pub const fn bit_offset(idx: usize) -> usize {
    idx % BITS
}

/// Splits a bit index into `(word, offset)`.
#[inline]
pub const fn idxs(idx: usize) -> (usize, usize) {
    (word_index(idx), bit_offset(idx))
}

/// Number of words needed to hold `len` bits.
#[inline]
pub const fn word_count(len: usize) -> usize {
    len.div_ceil(BITS)
}

/// All ones below `offset`. `offset == 0` gives an empty mask and
/// `offset >= BITS` a full one.
#[inline]
pub const fn mask_below(offset: usize) -> Word {
    if offset >= BITS {
        // shift would overflow
        !0
    } else {
        (1 << offset) - 1
    }
}

/// All ones from `offset` upward. `offset >= BITS` gives an empty mask.
#[inline]
pub const fn mask_from(offset: usize) -> Word {
    !mask_below(offset)
}

/// All ones in `[lo, hi)`, with `lo <= hi <= BITS`.
#[inline]
pub const fn mask_between(lo: usize, hi: usize) -> Word {
    mask_below(hi) & mask_from(lo)
}

/// Reads `n` bits (`1..=BITS`) starting at `pos`, right-aligned.
///
/// A read straddling two words takes its low bits from the first word and
/// shifts the high bits in from the second. The caller guarantees the range
/// lies inside `words`.
#[inline]
pub(crate) fn read_bits(words: &[Word], pos: usize, n: usize) -> Word {
    debug_assert!((1..=BITS).contains(&n));
    let (w, o) = idxs(pos);
    let mut value = words[w] >> o;
    if o + n > BITS {
        // o > 0 here, so the shift is in range
        value |= words[w + 1] << (BITS - o);
    }
    value & mask_below(n)
}

/// Writes the low `n` bits (`1..=BITS`) of `value` at `pos`, leaving every
/// other bit untouched. Higher bits of `value` are ignored.
#[inline]
pub(crate) fn write_bits(words: &mut [Word], pos: usize, n: usize, value: Word) {
    debug_assert!((1..=BITS).contains(&n));
    let value = value & mask_below(n);
    let (w, o) = idxs(pos);
    let first = n.min(BITS - o);
    let mask = mask_between(o, o + first);
    words[w] = (words[w] & !mask) | ((value << o) & mask);
    if first < n {
        let rest = n - first;
        let mask = mask_below(rest);
        words[w + 1] = (words[w + 1] & !mask) | (value >> first);
    }
}
