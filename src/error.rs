use crate::grid::{Direction, Rect};

/// Result alias used by every fallible operation in this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised by [`BitVec`](crate::BitVec) and [`BitGrid`](crate::BitGrid).
///
/// Every fallible operation validates its arguments before touching storage,
/// so an `Err` leaves the receiver unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An argument is malformed: an overflowing `start + count` or
    /// `rows * cols`, a bit width outside `1..=64`, a zero delta or group
    /// size, or operands of different lengths.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// A linear range reaches past the current length.
    #[error("range {start}..{end} out of range for length {len}")]
    OutOfRange {
        /// First position of the offending range.
        start: usize,
        /// Exclusive end of the offending range.
        end: usize,
        /// Length of the bit vector at the time of the call.
        len: usize,
    },
    /// A rectangle is empty or does not fit inside the grid.
    #[error("rectangle {rect} out of range for a {rows}x{cols} grid")]
    RectOutOfRange {
        /// The offending rectangle.
        rect: Rect,
        /// Row count of the grid.
        rows: usize,
        /// Column count of the grid.
        cols: usize,
    },
    /// The strip a rectangle would shift into is occupied or outside the grid.
    #[error("cannot shift {direction}: target strip is occupied or outside the grid")]
    ShiftBlocked {
        /// Direction of the refused shift.
        direction: Direction,
    },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An argument is malformed regardless of the receiver's state.
    InvalidArgument,
    /// A position or range lies beyond the current length or grid extent.
    OutOfRange,
    /// A shift target is occupied or outside the grid.
    ShiftPrecondition,
}

impl Error {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::OutOfRange { .. } | Self::RectOutOfRange { .. } => ErrorKind::OutOfRange,
            Self::ShiftBlocked { .. } => ErrorKind::ShiftPrecondition,
        }
    }
}
