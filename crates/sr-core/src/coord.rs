//! Grid coordinates and the single-step movement model.
//!
//! Coordinates are 0-based `u32` pairs.  External files use 1-based ids;
//! [`Coordinate::from_one_based`] and [`Coordinate::one_based`] are the only
//! places that translation happens.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Coordinate ────────────────────────────────────────────────────────────────

/// A cell position on the hazard grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Translate 1-based file ids to a 0-based coordinate.
    ///
    /// Returns `None` if either id is 0.
    pub fn from_one_based(xid: u32, yid: u32) -> Option<Self> {
        Some(Self::new(xid.checked_sub(1)?, yid.checked_sub(1)?))
    }

    /// The 1-based `(xid, yid)` pair used in external files.
    #[inline]
    pub fn one_based(self) -> (u32, u32) {
        (self.x + 1, self.y + 1)
    }

    /// Manhattan (L1) distance in cells.
    #[inline]
    pub fn manhattan(self, other: Coordinate) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// `true` if the coordinate lies inside an `xsize × ysize` grid.
    #[inline]
    pub fn within(self, xsize: u32, ysize: u32) -> bool {
        self.x < xsize && self.y < ysize
    }

    /// Bounds check that reports the offending coordinate.
    pub fn check_within(self, xsize: u32, ysize: u32) -> CoreResult<()> {
        if self.within(xsize, ysize) {
            Ok(())
        } else {
            Err(CoreError::OutOfBounds { coord: self, xsize, ysize })
        }
    }

    /// The cell reached by applying `mv`.
    ///
    /// Returns `None` when the move would leave the non-negative quadrant.
    /// The upper grid bound is not checked here.
    #[inline]
    pub fn step(self, mv: Move) -> Option<Coordinate> {
        let (dx, dy) = mv.delta();
        Some(Coordinate {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }

    /// The cell `mv` was applied from to arrive here.
    #[inline]
    pub fn back(self, mv: Move) -> Option<Coordinate> {
        self.step(mv.reverse())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Move ──────────────────────────────────────────────────────────────────────

/// One transition of the movement model: stay, or one orthogonal cell.
///
/// `West`/`East` change `x`; `South`/`North` change `y`.  No diagonals.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Move {
    Stay,
    West,
    South,
    North,
    East,
}

impl Move {
    /// The four orthogonal moves, in successor-generation order.
    pub const ORTHOGONAL: [Move; 4] = [Move::West, Move::South, Move::North, Move::East];

    /// `(dx, dy)` offset of this move.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Move::Stay  => (0, 0),
            Move::West  => (-1, 0),
            Move::East  => (1, 0),
            Move::South => (0, -1),
            Move::North => (0, 1),
        }
    }

    #[inline]
    pub const fn reverse(self) -> Move {
        match self {
            Move::Stay  => Move::Stay,
            Move::West  => Move::East,
            Move::East  => Move::West,
            Move::South => Move::North,
            Move::North => Move::South,
        }
    }

    #[inline]
    pub fn is_stay(self) -> bool {
        self == Move::Stay
    }
}

// ── City ──────────────────────────────────────────────────────────────────────

/// A named route endpoint.  By convention the city with id 0 is the origin
/// and every other city is a destination.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    pub id:    u32,
    pub coord: Coordinate,
}

impl City {
    #[inline]
    pub const fn new(id: u32, coord: Coordinate) -> Self {
        Self { id, coord }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "city {} at {}", self.id, self.coord)
    }
}
