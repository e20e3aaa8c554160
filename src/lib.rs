//! A growable, word-packed bit vector with an overlap-safe range copy engine,
//! plus a zero-copy 2D grid view on top of it.
//! `no_std` + `alloc`, no `unsafe`.
//!
//! [`BitVec`] stores bits least-significant-bit first in 64-bit words and
//! keeps every bit past its length zero at all times. [`BitGrid`] lays a
//! `BitVec` out row-major and moves rectangles around with nothing but the
//! bit vector's range operations.
//!
//! # Examples
//! ```
//! use bitgrid::{BitGrid, BitVec, Rect};
//!
//! let mut bits = BitVec::with_len(2048);
//! bits.set_range(100, 300).unwrap();
//! // overlapping copy towards lower indices, like memmove
//! bits.copy_within(100, 50, 300).unwrap();
//! assert_eq!(bits.first_set_bit(), Some(50));
//! assert_eq!(bits.count(), 350);
//!
//! let mut grid = BitGrid::with_size(3, 2).unwrap();
//! grid.set(0, 0).unwrap();
//! grid.set(1, 1).unwrap();
//! grid.grow_cols(2).unwrap();
//! assert!(grid.get(1, 1).unwrap());
//! assert!(grid.is_free(Rect::new(0, 3, 2, 2)).unwrap());
//! ```
//!
//! # Use Cases
//!
//! - Occupancy maps and tile allocators
//! - Membership sets over large, dense index spaces
//! - Anything that needs to slide bit ranges around without a bit-by-bit loop
//!
//! # Features
//!
//! - Growable storage that never shrinks, amortized 1.5x reallocation
//! - Single-bit, multi-bit (`get_bits`/`set_bits`, up to 64 at a time,
//!   straddling words) and range operations: `set_range`, `clear_range`
//! - `copy_from`, `copy_within` and `move_range` with `memmove` semantics
//! - Logical operations: in-place AND/OR/XOR/NOT and the `&`, `|`, `^`, `!`
//!   operators
//! - Efficient iteration over all, set or unset bits
//! - Grid rectangles: `is_free`, `set_rect`, `clear_rect`, one-step shifts in
//!   four directions, first-fit `find_free`
//! - Grid growth in both dimensions, relocating rows when columns are added
//! - Binary/hex rendering of any bit range via [`render`]
//!
//! All fallible operations return [`Result`] and validate their arguments
//! before mutating anything.

#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![no_std]

extern crate alloc;

mod bitvec;
mod copy;
mod error;
mod grid;
mod render;
#[cfg(test)]
mod tests;
mod validate;
pub mod word;

pub use bitvec::{BitVec, Iter, IterOnes, IterZeros};
pub use error::{Error, ErrorKind, Result};
pub use grid::{BitGrid, Direction, Rect};
pub use render::{Radix, RenderOptions, render};
