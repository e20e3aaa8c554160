//! Overlap-safe bit range copy, the `memmove` of the bit vector.
//!
//! The traversal direction is picked from the two ranges alone before any word
//! is written. A copy whose destination overlaps the tail of its own source
//! walks backward from the end; every other copy walks forward. Either way a
//! chunk is fully read before it is written, and a write never lands on a
//! source bit that is still to be read.
//!
//! Both directions align on the destination: a partial chunk brings the
//! destination cursor onto a word boundary, after which whole destination words
//! are assembled from (at most) two source words and stored directly.

use crate::word::{BITS, Word, bit_offset, read_bits, word_index, write_bits};

/// Traversal order for a range copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Traversal {
    Forward,
    Backward,
}

/// Picks the traversal order for a copy of `count` bits from `src_start` to
/// `dst_start` inside one buffer.
///
/// Backward is only needed when the destination starts after the source and
/// the two ranges overlap; a forward walk would then overwrite source bits it
/// has not read yet.
pub(crate) fn traversal(src_start: usize, dst_start: usize, count: usize) -> Traversal {
    if dst_start > src_start && dst_start - src_start < count {
        Traversal::Backward
    } else {
        Traversal::Forward
    }
}

/// Where the bits being copied come from.
#[derive(Clone, Copy)]
pub(crate) enum Source<'a> {
    /// The destination buffer itself.
    Within,
    /// A distinct buffer.
    Other(&'a [Word]),
}

#[inline]
fn fetch(dst: &[Word], src: Source<'_>, pos: usize, n: usize) -> Word {
    match src {
        Source::Within => read_bits(dst, pos, n),
        Source::Other(words) => read_bits(words, pos, n),
    }
}

/// Copies `count` bits from `src` at `src_start` into `dst` at `dst_start`.
///
/// Both ranges must already lie inside their buffers. The caller is
/// responsible for the tail mask of `dst`.
pub(crate) fn copy_bits(
    dst: &mut [Word],
    src: Source<'_>,
    src_start: usize,
    dst_start: usize,
    count: usize,
) {
    if count == 0 {
        return;
    }
    let direction = match src {
        Source::Within if src_start == dst_start => return,
        Source::Within => traversal(src_start, dst_start, count),
        // distinct buffers cannot overlap
        Source::Other(_) => Traversal::Forward,
    };
    tracing::trace!(src_start, dst_start, count, ?direction, "copy bits");
    match direction {
        Traversal::Forward => copy_forward(dst, src, src_start, dst_start, count),
        Traversal::Backward => copy_backward(dst, src, src_start, dst_start, count),
    }
}

fn copy_forward(dst: &mut [Word], src: Source<'_>, src_start: usize, dst_start: usize, count: usize) {
    let mut done = 0;

    // head: bring the destination onto a word boundary
    let head = ((BITS - bit_offset(dst_start)) % BITS).min(count);
    if head > 0 {
        let value = fetch(dst, src, src_start, head);
        write_bits(dst, dst_start, head, value);
        done = head;
    }

    // body: whole destination words
    while count - done >= BITS {
        let value = fetch(dst, src, src_start + done, BITS);
        dst[word_index(dst_start + done)] = value;
        done += BITS;
    }

    // tail
    let rest = count - done;
    if rest > 0 {
        let value = fetch(dst, src, src_start + done, rest);
        write_bits(dst, dst_start + done, rest, value);
    }
}

fn copy_backward(dst: &mut [Word], src: Source<'_>, src_start: usize, dst_start: usize, count: usize) {
    let mut remaining = count;

    // tail: bring the destination end onto a word boundary
    let tail = bit_offset(dst_start + count).min(count);
    if tail > 0 {
        remaining -= tail;
        let value = fetch(dst, src, src_start + remaining, tail);
        write_bits(dst, dst_start + remaining, tail, value);
    }

    // body: whole destination words, last to first
    while remaining >= BITS {
        remaining -= BITS;
        let value = fetch(dst, src, src_start + remaining, BITS);
        dst[word_index(dst_start + remaining)] = value;
    }

    // head
    if remaining > 0 {
        let value = fetch(dst, src, src_start, remaining);
        write_bits(dst, dst_start, remaining, value);
    }
}

/// Returns the part of the source range a move leaves behind, as
/// `(start, count)`: the whole source when the ranges are disjoint, otherwise
/// the slice of it the destination does not cover.
pub(crate) fn vacated(src_start: usize, dst_start: usize, count: usize) -> (usize, usize) {
    if dst_start > src_start {
        let gap = dst_start - src_start;
        (src_start, gap.min(count))
    } else {
        let gap = src_start - dst_start;
        if gap >= count {
            (src_start, count)
        } else {
            (dst_start + count, gap)
        }
    }
}
