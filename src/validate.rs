//! Guard clauses shared by every public entry point.

use crate::error::{Error, Result};
use crate::word::BITS;

/// Returns `start + count`, failing on overflow.
#[inline]
pub(crate) fn range_end(start: usize, count: usize) -> Result<usize> {
    start
        .checked_add(count)
        .ok_or(Error::InvalidArgument("start + count overflows"))
}

/// Checks that `[start, start + count)` lies inside `[0, len)` and returns
/// the exclusive end.
#[inline]
pub(crate) fn check_range(start: usize, count: usize, len: usize) -> Result<usize> {
    let end = range_end(start, count)?;
    if end > len {
        return Err(Error::OutOfRange { start, end, len });
    }
    Ok(end)
}

/// Checks that a single position lies inside `[0, len)`.
#[inline]
pub(crate) fn check_index(pos: usize, len: usize) -> Result<()> {
    if pos >= len {
        return Err(Error::OutOfRange {
            start: pos,
            end: pos.saturating_add(1),
            len,
        });
    }
    Ok(())
}

/// Checks that a multi-bit access width is in `1..=BITS`.
#[inline]
pub(crate) fn check_width(n: usize) -> Result<()> {
    if n == 0 || n > BITS {
        return Err(Error::InvalidArgument("bit count must be between 1 and 64"));
    }
    Ok(())
}

/// Checks that two operands have the same length.
#[inline]
pub(crate) fn check_same_len(a: usize, b: usize) -> Result<()> {
    if a != b {
        return Err(Error::InvalidArgument("operand lengths differ"));
    }
    Ok(())
}

/// Checks that `n` is non-zero; `what` names the argument in the error.
#[inline]
pub(crate) fn check_positive(n: usize, what: &'static str) -> Result<()> {
    if n == 0 {
        return Err(Error::InvalidArgument(what));
    }
    Ok(())
}

/// Returns `cols * rows`, failing on overflow.
#[inline]
pub(crate) fn checked_area(cols: usize, rows: usize) -> Result<usize> {
    cols.checked_mul(rows)
        .ok_or(Error::InvalidArgument("rows * cols overflows"))
}
