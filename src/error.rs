//! This module defines general error types used throughout the crate.

use thiserror::Error;

/// Error type for converting integers to (C like) enums using TryFrom
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TryFromIntToEnumError {
    /// attempted to convert integer into enum value, but integer was out of bounds
    #[error("attempted to convert integer into enum value, but integer was out of bounds")]
    OutOfBounds,
}

/// Reasons a cube configuration is not reachable from the solved state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidCube {
    /// A corner position holds a label outside `0..8`.
    #[error("illegal corner {value} in position {position}")]
    CornerOutOfRange {
        /// The offending position.
        position: usize,
        /// The value found there.
        value: u8,
    },
    /// An edge position holds a label outside `0..12`.
    #[error("illegal edge {value} in position {position}")]
    EdgeOutOfRange {
        /// The offending position.
        position: usize,
        /// The value found there.
        value: u8,
    },
    /// A corner orientation outside `0..3`.
    #[error("illegal orientation {value} for the corner in position {position}")]
    TwistOutOfRange {
        /// The offending position.
        position: usize,
        /// The value found there.
        value: u8,
    },
    /// An edge orientation outside `0..2`.
    #[error("illegal orientation {value} for the edge in position {position}")]
    FlipOutOfRange {
        /// The offending position.
        position: usize,
        /// The value found there.
        value: u8,
    },
    /// The same corner appears twice.
    #[error("corner {corner} occurs more than once (last seen at {position})")]
    DuplicateCorner {
        /// Position of the second occurrence.
        position: usize,
        /// The repeated corner label.
        corner: u8,
    },
    /// The same edge appears twice.
    #[error("edge {edge} occurs more than once (last seen at {position})")]
    DuplicateEdge {
        /// Position of the second occurrence.
        position: usize,
        /// The repeated edge label.
        edge: u8,
    },
    /// The corner twists do not sum to a multiple of 3.
    #[error("corner orientation not divisible by 3 ({total})")]
    Twist {
        /// Sum of all corner orientations.
        total: u32,
    },
    /// The edge flips do not sum to a multiple of 2.
    #[error("edge orientation not divisible by 2 ({total})")]
    Flip {
        /// Sum of all edge orientations.
        total: u32,
    },
    /// Corner and edge permutations have different parity.
    #[error("corner and edge permutation parity differ")]
    Parity,
}

/// A move token that isn't in the `U D L R B F` + `' 2` vocabulary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseMoveError {
    /// The token does not start with a face letter.
    #[error("expected a cube face but got {token:?}")]
    Face {
        /// The whole offending token.
        token: String,
    },
    /// The face letter is followed by something other than `'` or `2`.
    #[error("expected turn degree but got {token:?}")]
    Turn {
        /// The whole offending token.
        token: String,
    },
}

/// Errors from building, loading or saving a pruning table.
#[derive(Debug, Error)]
pub enum TableError {
    /// The underlying file operation failed.
    #[error("pruning table i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// The artifact does not hold exactly one byte per coordinate.
    #[error("pruning table has {found} bytes, expected {expected}")]
    Size {
        /// Number of coordinates in the table.
        expected: usize,
        /// Number of bytes actually present.
        found: usize,
    },
    /// The artifact contains an entry that a completed table can't have.
    #[error("pruning table entry {index} is invalid ({value})")]
    Corrupt {
        /// The offending coordinate index.
        index: usize,
        /// The byte stored there.
        value: u8,
    },
}

/// Errors from a full search.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    /// The cube given to the solver is not a legal state.
    #[error("cannot solve an illegal cube: {0}")]
    InvalidCube(#[from] InvalidCube),
    /// No solution within the depth limit. For a legal cube this means a table is wrong.
    #[error("no solution found in {max_depth} moves")]
    Exhausted {
        /// The largest depth that was searched.
        max_depth: usize,
    },
}
