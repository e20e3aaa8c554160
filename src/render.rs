//! Text rendering of bit ranges.

use alloc::string::String;

use crate::bitvec::BitVec;
use crate::error::Result;
use crate::validate::{check_positive, check_range};
use crate::word::BITS;

/// Digit base used by [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Radix {
    /// One `0`/`1` digit per bit.
    #[default]
    Binary,
    /// One hex digit per 4 bits.
    Hex,
}

/// How [`render`] lays out its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Digit base.
    pub radix: Radix,
    /// Insert [`separator`](RenderOptions::separator) after every `group`
    /// digits. `None` renders one unbroken run.
    pub group: Option<usize>,
    /// Group separator.
    pub separator: char,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            radix: Radix::Binary,
            group: None,
            separator: ' ',
        }
    }
}

/// Renders `count` bits of `bits` starting at `start`.
///
/// Digits come out in index order, lowest index first. In hex each digit
/// covers four consecutive bits with the lowest index in the digit's least
/// significant position; a trailing partial nibble uses the bits that remain.
///
/// # Errors
/// Returns [`Error::InvalidArgument`] if `group` is `Some(0)` or
/// `start + count` overflows, and [`Error::OutOfRange`] if the range exceeds
/// `bits.len()`.
///
/// # Examples
/// ```
/// use bitgrid::{BitVec, Radix, RenderOptions, render};
///
/// let bits = BitVec::from_ones_iter(12, [0, 1, 5, 8]).unwrap();
/// assert_eq!(render(&bits, 0, 12, &RenderOptions::default()).unwrap(), "110001001000");
///
/// let hex = RenderOptions { radix: Radix::Hex, group: Some(2), separator: '_' };
/// assert_eq!(render(&bits, 0, 12, &hex).unwrap(), "32_1");
/// ```
///
/// [`Error::InvalidArgument`]: crate::Error::InvalidArgument
/// [`Error::OutOfRange`]: crate::Error::OutOfRange
pub fn render(bits: &BitVec, start: usize, count: usize, options: &RenderOptions) -> Result<String> {
    if let Some(group) = options.group {
        check_positive(group, "group size must be positive")?;
    }
    let end = check_range(start, count, bits.len())?;

    let mut out = String::new();
    let mut digits = 0;
    let mut push = |digit: char| {
        if let Some(group) = options.group
            && digits > 0
            && digits % group == 0
        {
            out.push(options.separator);
        }
        out.push(digit);
        digits += 1;
    };

    let step = match options.radix {
        Radix::Binary => 1,
        Radix::Hex => 4,
    };
    let mut pos = start;
    while pos < end {
        let n = (end - pos).min(BITS);
        let chunk = bits.get_bits(pos, n)?;
        for shift in (0..n).step_by(step) {
            let digit = ((chunk >> shift) & 0xf) as u32;
            let digit = match options.radix {
                Radix::Binary => digit & 1,
                Radix::Hex => digit,
            };
            // digit < 16
            push(char::from_digit(digit, 16).unwrap_or('?'));
        }
        pos += n;
    }
    Ok(out)
}
