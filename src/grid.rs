//! A row-major 2D view over a [`BitVec`].
//!
//! Cell `(row, col)` lives at bit `row * cols + col`. The grid only ever goes
//! through the bit vector's range operations, so every relocation and shift
//! below is a sequence of [`BitVec::move_range`] calls ordered so that no move
//! overwrites bits another pending move still has to read.

use core::borrow::{Borrow, BorrowMut};
use core::fmt::{self, Debug, Display, Formatter};
use core::ops::Range;

use crate::bitvec::BitVec;
use crate::error::{Error, Result};
use crate::render::{RenderOptions, render};
use crate::validate::{check_positive, checked_area, range_end};


/// Direction of a one-step rectangle shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    /// Towards higher column indices.
    Right,
    /// Towards lower column indices.
    Left,
    /// Towards lower row indices.
    Up,
    /// Towards higher row indices.
    Down,
}

/// An axis-aligned block of cells: `height` rows starting at `row`, `width`
/// columns starting at `col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Top row.
    pub row: usize,
    /// Leftmost column.
    pub col: usize,
    /// Number of rows.
    pub height: usize,
    /// Number of columns.
    pub width: usize,
}

impl Rect {
    /// Creates a rectangle.
    #[inline]
    pub const fn new(row: usize, col: usize, height: usize, width: usize) -> Self {
        Self {
            row,
            col,
            height,
            width,
        }
    }

    /// Row indices covered by the rectangle.
    #[inline]
    pub fn rows(&self) -> Range<usize> {
        self.row..self.row.saturating_add(self.height)
    }

    // Only called once the shift has been checked to stay inside the grid.
    fn shifted(self, direction: Direction) -> Self {
        let (row, col) = match direction {
            Direction::Right => (self.row, self.col + 1),
            Direction::Left => (self.row, self.col - 1),
            Direction::Up => (self.row - 1, self.col),
            Direction::Down => (self.row + 1, self.col),
        };
        Self { row, col, ..self }
    }
}

impl Display for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.height, self.width, self.row, self.col
        )
    }
}

/// A fixed-stride 2D grid of bits.
///
/// `B` is either an owned [`BitVec`] (the default) or a `&mut BitVec`, which
/// makes the grid a zero-copy view over a bit vector the caller keeps. Either
/// way the grid is the only mutator of its bits while it exists, so the bit
/// vector's length stays `rows() * cols()`.
///
/// # Examples
/// ```
/// use bitgrid::{BitGrid, Rect};
///
/// let mut grid = BitGrid::with_size(4, 3).unwrap();
/// grid.set_rect(Rect::new(0, 0, 2, 2)).unwrap();
/// assert!(!grid.is_free(Rect::new(1, 1, 2, 2)).unwrap());
///
/// let moved = grid.shift_right(Rect::new(0, 0, 2, 2)).unwrap();
/// assert_eq!(moved, Rect::new(0, 1, 2, 2));
/// assert!(grid.is_free(Rect::new(0, 0, 3, 1)).unwrap());
///
/// grid.grow_cols(2).unwrap();
/// assert_eq!(grid.cols(), 6);
/// assert!(grid.get(1, 2).unwrap());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitGrid<B = BitVec> {
    bits: B,
    cols: usize,
}

impl BitGrid {
    /// Creates a grid with no columns and no rows. Grow it with
    /// [`ensure_cols`](BitGrid::ensure_cols) before use.
    pub const fn new() -> Self {
        Self {
            bits: BitVec::new(),
            cols: 0,
        }
    }

    /// Creates an empty grid of `cols` columns and `rows` rows.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `cols * rows` overflows.
    pub fn with_size(cols: usize, rows: usize) -> Result<Self> {
        let len = checked_area(cols, rows)?;
        Ok(Self {
            bits: BitVec::with_len(len),
            cols,
        })
    }
}

impl Default for BitGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: BorrowMut<BitVec>> BitGrid<B> {
    /// Lays `bits` out as rows of `cols` cells.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if the length of `bits` is not a
    /// multiple of `cols` (a zero-column grid needs an empty bit vector).
    ///
    /// # Examples
    /// ```
    /// use bitgrid::{BitGrid, BitVec};
    ///
    /// let mut bits = BitVec::with_len(12);
    /// let mut view = BitGrid::from_bits(&mut bits, 4).unwrap();
    /// assert_eq!(view.rows(), 3);
    /// view.set(2, 1).unwrap();
    /// assert!(bits.test(9).unwrap());
    /// ```
    pub fn from_bits(bits: B, cols: usize) -> Result<Self> {
        let len = bits.borrow().len();
        let fits = if cols == 0 { len == 0 } else { len % cols == 0 };
        if !fits {
            return Err(Error::InvalidArgument(
                "length is not a multiple of the column count",
            ));
        }
        Ok(Self { bits, cols })
    }

    /// Gives back the underlying bit vector (or borrow of it).
    pub fn into_inner(self) -> B {
        self.bits
    }

    /// Returns the underlying bit vector.
    #[inline]
    pub fn bits(&self) -> &BitVec {
        self.bits.borrow()
    }

    #[inline]
    fn bits_mut(&mut self) -> &mut BitVec {
        self.bits.borrow_mut()
    }

    /// Returns the column count, which is also the row stride.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the row count.
    #[inline]
    pub fn rows(&self) -> usize {
        if self.cols == 0 {
            0
        } else {
            self.bits().len() / self.cols
        }
    }

    /// Returns the linear bit index of `(row, col)`. Does not check the grid
    /// extent.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if the index overflows `usize`.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> Result<usize> {
        row.checked_mul(self.cols)
            .and_then(|base| base.checked_add(col))
            .ok_or(Error::InvalidArgument("row * cols + col overflows"))
    }

    fn check_rect(&self, rect: Rect) -> Result<()> {
        let rows = self.rows();
        let fits = rect.height > 0
            && rect.width > 0
            && rect.row.checked_add(rect.height).is_some_and(|end| end <= rows)
            && rect.col.checked_add(rect.width).is_some_and(|end| end <= self.cols);
        if !fits {
            return Err(Error::RectOutOfRange {
                rect,
                rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Returns `true` if the cell at `(row, col)` is set.
    ///
    /// # Errors
    /// Returns [`Error::RectOutOfRange`] if the cell is outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Result<bool> {
        self.check_rect(Rect::new(row, col, 1, 1))?;
        self.bits().test(self.index(row, col)?)
    }

    /// Sets the cell at `(row, col)`.
    ///
    /// # Errors
    /// Returns [`Error::RectOutOfRange`] if the cell is outside the grid.
    pub fn set(&mut self, row: usize, col: usize) -> Result<()> {
        self.check_rect(Rect::new(row, col, 1, 1))?;
        let idx = self.index(row, col)?;
        self.bits_mut().set_bit(idx)
    }

    /// Clears the cell at `(row, col)`.
    ///
    /// # Errors
    /// Returns [`Error::RectOutOfRange`] if the cell is outside the grid.
    pub fn clear(&mut self, row: usize, col: usize) -> Result<()> {
        self.check_rect(Rect::new(row, col, 1, 1))?;
        let idx = self.index(row, col)?;
        self.bits_mut().clear_bit(idx)
    }

    /// Returns `true` if every cell of `rect` is unset.
    ///
    /// # Errors
    /// Returns [`Error::RectOutOfRange`] if `rect` is empty or does not fit
    /// inside the grid.
    pub fn is_free(&self, rect: Rect) -> Result<bool> {
        self.check_rect(rect)?;
        for row in rect.rows() {
            let start = self.index(row, rect.col)?;
            if self.bits().any_in_range(start, rect.width)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    // The one-cell-wide strip `rect` moves into, or `None` at the grid edge.
    fn strip(&self, direction: Direction, rect: Rect) -> Option<Rect> {
        match direction {
            Direction::Right => (rect.col + rect.width < self.cols)
                .then(|| Rect::new(rect.row, rect.col + rect.width, rect.height, 1)),
            Direction::Left => {
                (rect.col > 0).then(|| Rect::new(rect.row, rect.col - 1, rect.height, 1))
            }
            Direction::Up => (rect.row > 0).then(|| Rect::new(rect.row - 1, rect.col, 1, rect.width)),
            Direction::Down => (rect.row + rect.height < self.rows())
                .then(|| Rect::new(rect.row + rect.height, rect.col, 1, rect.width)),
        }
    }

    /// Returns `true` if `rect` can move one cell in `direction`: the strip it
    /// would move into exists and is unset. A strip outside the grid gives
    /// `false`, not an error.
    ///
    /// # Errors
    /// Returns [`Error::RectOutOfRange`] if `rect` itself is empty or does not
    /// fit inside the grid.
    pub fn can_shift(&self, direction: Direction, rect: Rect) -> Result<bool> {
        self.check_rect(rect)?;
        match self.strip(direction, rect) {
            Some(strip) => self.is_free(strip),
            None => Ok(false),
        }
    }

    /// Same as [`can_shift`](BitGrid::can_shift) towards [`Direction::Right`].
    ///
    /// # Errors
    /// See [`can_shift`](BitGrid::can_shift).
    pub fn can_shift_right(&self, rect: Rect) -> Result<bool> {
        self.can_shift(Direction::Right, rect)
    }

    /// Same as [`can_shift`](BitGrid::can_shift) towards [`Direction::Left`].
    ///
    /// # Errors
    /// See [`can_shift`](BitGrid::can_shift).
    pub fn can_shift_left(&self, rect: Rect) -> Result<bool> {
        self.can_shift(Direction::Left, rect)
    }

    /// Same as [`can_shift`](BitGrid::can_shift) towards [`Direction::Up`].
    ///
    /// # Errors
    /// See [`can_shift`](BitGrid::can_shift).
    pub fn can_shift_up(&self, rect: Rect) -> Result<bool> {
        self.can_shift(Direction::Up, rect)
    }

    /// Same as [`can_shift`](BitGrid::can_shift) towards [`Direction::Down`].
    ///
    /// # Errors
    /// See [`can_shift`](BitGrid::can_shift).
    pub fn can_shift_down(&self, rect: Rect) -> Result<bool> {
        self.can_shift(Direction::Down, rect)
    }

    /// Sets every cell of `rect`, appending rows if `rect` reaches below the
    /// last one.
    ///
    /// # Errors
    /// Returns [`Error::RectOutOfRange`] if `rect` is empty or reaches past
    /// the last column, and [`Error::InvalidArgument`] if the grown grid would
    /// overflow.
    pub fn set_rect(&mut self, rect: Rect) -> Result<()> {
        let fits_cols = rect.col.checked_add(rect.width).is_some_and(|end| end <= self.cols);
        if rect.height == 0 || rect.width == 0 || !fits_cols {
            return Err(Error::RectOutOfRange {
                rect,
                rows: self.rows(),
                cols: self.cols,
            });
        }
        let rows = range_end(rect.row, rect.height)?;
        checked_area(self.cols, rows)?;
        self.ensure_rows(rows)?;
        for row in rect.rows() {
            let start = self.index(row, rect.col)?;
            self.bits_mut().set_range(start, rect.width)?;
        }
        Ok(())
    }

    /// Clears every cell of `rect`.
    ///
    /// # Errors
    /// Returns [`Error::RectOutOfRange`] if `rect` is empty or does not fit
    /// inside the grid.
    pub fn clear_rect(&mut self, rect: Rect) -> Result<()> {
        self.check_rect(rect)?;
        for row in rect.rows() {
            let start = self.index(row, rect.col)?;
            self.bits_mut().clear_range(start, rect.width)?;
        }
        Ok(())
    }

    /// Moves `rect` one cell in `direction` and clears the strip it leaves
    /// behind. Returns the rectangle at its new position.
    ///
    /// # Errors
    /// Returns [`Error::RectOutOfRange`] if `rect` is empty or does not fit
    /// inside the grid, and [`Error::ShiftBlocked`] if the target strip is
    /// outside the grid or holds a set cell. The grid is unchanged on error.
    ///
    /// # Examples
    /// ```
    /// use bitgrid::{BitGrid, Direction, Error, Rect};
    ///
    /// let mut grid = BitGrid::with_size(3, 3).unwrap();
    /// grid.set_rect(Rect::new(0, 0, 1, 2)).unwrap();
    /// grid.set(0, 2).unwrap();
    /// assert_eq!(
    ///     grid.shift_rect(Direction::Right, Rect::new(0, 0, 1, 2)),
    ///     Err(Error::ShiftBlocked { direction: Direction::Right }),
    /// );
    /// let moved = grid.shift_rect(Direction::Down, Rect::new(0, 0, 1, 2)).unwrap();
    /// assert_eq!(moved, Rect::new(1, 0, 1, 2));
    /// ```
    pub fn shift_rect(&mut self, direction: Direction, rect: Rect) -> Result<Rect> {
        if !self.can_shift(direction, rect)? {
            return Err(Error::ShiftBlocked { direction });
        }
        match direction {
            // rows are independent: a row's move never leaves the row
            Direction::Right | Direction::Left => {
                for row in rect.rows() {
                    let src = self.index(row, rect.col)?;
                    let dst = if direction == Direction::Right {
                        src + 1
                    } else {
                        src - 1
                    };
                    self.bits_mut().move_range(src, dst, rect.width)?;
                }
            }
            // top row first: each row lands on the one just vacated above it
            Direction::Up => {
                for row in rect.rows() {
                    let src = self.index(row, rect.col)?;
                    let dst = self.index(row - 1, rect.col)?;
                    self.bits_mut().move_range(src, dst, rect.width)?;
                }
            }
            // bottom row first: each row lands on the one just vacated below it
            Direction::Down => {
                for row in rect.rows().rev() {
                    let src = self.index(row, rect.col)?;
                    let dst = self.index(row + 1, rect.col)?;
                    self.bits_mut().move_range(src, dst, rect.width)?;
                }
            }
        }
        Ok(rect.shifted(direction))
    }

    /// Moves `rect` one column right. See [`shift_rect`](BitGrid::shift_rect).
    ///
    /// # Errors
    /// See [`shift_rect`](BitGrid::shift_rect).
    pub fn shift_right(&mut self, rect: Rect) -> Result<Rect> {
        self.shift_rect(Direction::Right, rect)
    }

    /// Moves `rect` one column left. See [`shift_rect`](BitGrid::shift_rect).
    ///
    /// # Errors
    /// See [`shift_rect`](BitGrid::shift_rect).
    pub fn shift_left(&mut self, rect: Rect) -> Result<Rect> {
        self.shift_rect(Direction::Left, rect)
    }

    /// Moves `rect` one row up. See [`shift_rect`](BitGrid::shift_rect).
    ///
    /// # Errors
    /// See [`shift_rect`](BitGrid::shift_rect).
    pub fn shift_up(&mut self, rect: Rect) -> Result<Rect> {
        self.shift_rect(Direction::Up, rect)
    }

    /// Moves `rect` one row down. See [`shift_rect`](BitGrid::shift_rect).
    ///
    /// # Errors
    /// See [`shift_rect`](BitGrid::shift_rect).
    pub fn shift_down(&mut self, rect: Rect) -> Result<Rect> {
        self.shift_rect(Direction::Down, rect)
    }

    /// Adds `delta` empty columns on the right, relocating every row to the
    /// new stride. Cell coordinates are preserved.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `delta` is zero or the new size
    /// overflows.
    pub fn grow_cols(&mut self, delta: usize) -> Result<()> {
        check_positive(delta, "column delta must be positive")?;
        let old_cols = self.cols;
        let new_cols = range_end(old_cols, delta)?;
        let rows = self.rows();
        let len = checked_area(new_cols, rows)?;
        tracing::debug!(rows, old_cols, new_cols, "relocating grid rows");

        self.bits_mut().ensure_len(len);
        // Rows must move last to first. Row `r` moves from `r * old_cols` to
        // the larger `r * new_cols`, which reaches into where rows after `r`
        // still sit in the old layout; moving those rows first means every
        // position row `r` lands on has already been read. Row 0 stays put.
        for row in (1..rows).rev() {
            self.bits_mut()
                .move_range(row * old_cols, row * new_cols, old_cols)?;
        }
        self.cols = new_cols;
        Ok(())
    }

    /// Grows the grid to at least `cols` columns.
    ///
    /// # Errors
    /// See [`grow_cols`](BitGrid::grow_cols).
    pub fn ensure_cols(&mut self, cols: usize) -> Result<()> {
        if cols > self.cols {
            self.grow_cols(cols - self.cols)?;
        }
        Ok(())
    }

    /// Appends `delta` empty rows. A grid without columns has no rows to add.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `delta` is zero or the new size
    /// overflows.
    pub fn grow_rows(&mut self, delta: usize) -> Result<()> {
        check_positive(delta, "row delta must be positive")?;
        let rows = range_end(self.rows(), delta)?;
        let len = checked_area(self.cols, rows)?;
        tracing::debug!(rows, cols = self.cols, "growing grid rows");
        self.bits_mut().ensure_len(len);
        Ok(())
    }

    /// Grows the grid to at least `rows` rows.
    ///
    /// # Errors
    /// See [`grow_rows`](BitGrid::grow_rows).
    pub fn ensure_rows(&mut self, rows: usize) -> Result<()> {
        let current = self.rows();
        if rows > current {
            self.grow_rows(rows - current)?;
        }
        Ok(())
    }

    /// Finds the first free `height` x `width` rectangle, scanning top-left
    /// corners in row-major order.
    ///
    /// # Examples
    /// ```
    /// use bitgrid::{BitGrid, Rect};
    ///
    /// let mut grid = BitGrid::with_size(4, 4).unwrap();
    /// grid.set_rect(Rect::new(0, 0, 2, 3)).unwrap();
    /// assert_eq!(grid.find_free(2, 2), Some(Rect::new(2, 0, 2, 2)));
    /// assert_eq!(grid.find_free(5, 1), None);
    /// ```
    pub fn find_free(&self, height: usize, width: usize) -> Option<Rect> {
        let rows = self.rows();
        if height == 0 || width == 0 || height > rows || width > self.cols {
            return None;
        }
        for row in 0..=rows - height {
            for col in 0..=self.cols - width {
                let rect = Rect::new(row, col, height, width);
                if self.is_free(rect).unwrap_or(false) {
                    return Some(rect);
                }
            }
        }
        None
    }
}

impl<B: BorrowMut<BitVec>> Debug for BitGrid<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "BitGrid {}x{}", self.rows(), self.cols)?;
        let options = RenderOptions::default();
        for row in 0..self.rows() {
            let line = render(self.bits(), row * self.cols, self.cols, &options)
                .map_err(|_| fmt::Error)?;
            write!(f, "\n  {line}")?;
        }
        Ok(())
    }
}
