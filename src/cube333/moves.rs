//! Face turns of the 3x3x3, their notation, and how they act on a `CubieCube`.

use super::{Corner, CornerTwist, CubieCube, Edge};
use crate::error::ParseMoveError;
use crate::moves::{Cancellation, MoveSequence};

use std::fmt;
use std::str::FromStr;

#[cfg(test)]
use proptest_derive::Arbitrary;

/// A face of the cube. The discriminant is the face number used in move indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
#[repr(u8)]
pub enum Face {
    /// Up
    U,
    /// Down
    D,
    /// Left
    L,
    /// Right
    R,
    /// Back
    B,
    /// Front
    F,
}

/// An axis of the cube, i.e. a pair of opposite faces.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Up-Down axis
    UD,
    /// Left-Right axis
    LR,
    /// Back-Front axis
    BF,
}

impl Face {
    /// Every face, in face number order.
    pub const ARRAY: [Face; 6] = [Face::U, Face::D, Face::L, Face::R, Face::B, Face::F];

    /// The face opposite to the given one.
    pub fn opposite(self) -> Face {
        match self {
            Face::U => Face::D,
            Face::D => Face::U,
            Face::L => Face::R,
            Face::R => Face::L,
            Face::B => Face::F,
            Face::F => Face::B,
        }
    }

    /// The axis this face turns about.
    pub fn axis(self) -> Axis {
        match self {
            Face::U | Face::D => Axis::UD,
            Face::L | Face::R => Axis::LR,
            Face::B | Face::F => Axis::BF,
        }
    }
}

/// How far a face is turned. The discriminant is the degree number used in move indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
#[repr(u8)]
pub enum Turn {
    /// A quarter turn clockwise.
    Clockwise,
    /// A quarter turn counterclockwise.
    CounterClockwise,
    /// A half turn.
    Half,
}

impl Turn {
    /// Every turn, in degree number order.
    pub const ARRAY: [Turn; 3] = [Turn::Clockwise, Turn::CounterClockwise, Turn::Half];

    /// The turn made of `count` clockwise quarter turns, if it isn't the identity.
    pub const fn from_count(count: u8) -> Option<Turn> {
        match count % 4 {
            1 => Some(Turn::Clockwise),
            2 => Some(Turn::Half),
            3 => Some(Turn::CounterClockwise),
            _ => None,
        }
    }

    /// The number of clockwise quarter turns this turn is made of.
    pub fn count(self) -> u8 {
        match self {
            Turn::Clockwise => 1,
            Turn::Half => 2,
            Turn::CounterClockwise => 3,
        }
    }

    /// The turn that undoes this one.
    pub fn inverse(self) -> Turn {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
            Turn::Half => Turn::Half,
        }
    }
}

/// A face turn: one of the 18 generators of the cube group in the half turn metric.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
#[allow(missing_docs)]
pub struct Move333 {
    pub face: Face,
    pub turn: Turn,
}

/// The index of a move in [`Move333::ALL`] and in every move table: `face * 3 + degree`.
pub fn move_index(face: Face, turn: Turn) -> usize {
    face as usize * 3 + turn as usize
}

impl Move333 {
    /// Build a move.
    pub const fn new(face: Face, turn: Turn) -> Move333 {
        Move333 { face, turn }
    }

    /// Every move, ordered by [`index`](Move333::index).
    pub const ALL: [Move333; 18] = {
        let mut all = [Move333::new(Face::U, Turn::Clockwise); 18];
        let mut i = 0;
        while i < 18 {
            all[i] = Move333::new(Face::ARRAY[i / 3], Turn::ARRAY[i % 3]);
            i += 1;
        }
        all
    };

    /// The index of this move in move tables.
    pub fn index(self) -> usize {
        move_index(self.face, self.turn)
    }

    /// The move with the given index. Panics if `index >= 18`.
    pub fn from_index(index: usize) -> Move333 {
        Self::ALL[index]
    }
}

impl From<Move333> for usize {
    fn from(mv: Move333) -> usize {
        mv.index()
    }
}

impl crate::moves::Move for Move333 {
    fn inverse(self) -> Self {
        Self {
            face: self.face,
            turn: self.turn.inverse(),
        }
    }

    fn commutes_with(&self, b: &Self) -> bool {
        self.face.axis() == b.face.axis()
    }

    fn cancel(self, b: Self) -> Cancellation<Self> {
        if self.face == b.face {
            match Turn::from_count(self.turn.count() + b.turn.count()) {
                None => Cancellation::NoMove,
                Some(turn) => Cancellation::OneMove(Move333 {
                    face: self.face,
                    turn,
                }),
            }
        } else {
            Cancellation::TwoMove(self, b)
        }
    }
}

impl fmt::Display for Move333 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.turn {
            Turn::Clockwise => write!(f, "{:?}", self.face),
            Turn::CounterClockwise => write!(f, "{:?}'", self.face),
            Turn::Half => write!(f, "{:?}2", self.face),
        }
    }
}

// I don't want to have the default derive debug for this!
impl fmt::Debug for Move333 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Move333 {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let face = match chars.next() {
            Some('U') => Face::U,
            Some('D') => Face::D,
            Some('L') => Face::L,
            Some('R') => Face::R,
            Some('B') => Face::B,
            Some('F') => Face::F,
            _ => return Err(ParseMoveError::Face { token: s.into() }),
        };
        let turn = match chars.as_str() {
            "" => Turn::Clockwise,
            "'" => Turn::CounterClockwise,
            "2" => Turn::Half,
            _ => return Err(ParseMoveError::Turn { token: s.into() }),
        };
        Ok(Move333 { face, turn })
    }
}

/// Create a move by specifying a face and a number of clockwise quarter turns (1, 2 or 3). Note
/// that you do not need to specify for example Face::R, you only need to specify R.
#[macro_export]
macro_rules! mv {
    ($face:ident, $count:expr) => {
        $crate::cube333::moves::Move333::new(
            $crate::cube333::moves::Face::$face,
            match $crate::cube333::moves::Turn::from_count($count) {
                Some(turn) => turn,
                None => panic!("a move turns by 1, 2 or 3 quarter turns"),
            },
        )
    };
}

// Each table row is one clockwise quarter turn, indexed by face number. Position i receives the
// piece from position *_OFFSETS[i], and its orientation changes by *O_OFFSETS[i].
const CO_OFFSETS: [[u8; 8]; 6] = [
    [0; 8],
    [0; 8],
    [0, 1, 2, 0, 0, 2, 1, 0],
    [2, 0, 0, 1, 1, 0, 0, 2],
    [0, 0, 1, 2, 0, 0, 2, 1],
    [1, 2, 0, 0, 2, 1, 0, 0],
];
const CP_OFFSETS: [[u8; 8]; 6] = [
    [3, 0, 1, 2, 4, 5, 6, 7],
    [0, 1, 2, 3, 5, 6, 7, 4],
    [0, 2, 6, 3, 4, 1, 5, 7],
    [4, 1, 2, 0, 7, 5, 6, 3],
    [0, 1, 3, 7, 4, 5, 2, 6],
    [1, 5, 2, 3, 0, 4, 6, 7],
];
const EO_OFFSETS: [[u8; 12]; 6] = [
    [0; 12],
    [0; 12],
    [0; 12],
    [0; 12],
    [0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 1, 1, 0, 0],
];
const EP_OFFSETS: [[u8; 12]; 6] = [
    [3, 0, 1, 2, 4, 5, 6, 7, 8, 9, 10, 11],
    [0, 1, 2, 3, 5, 6, 7, 4, 8, 9, 10, 11],
    [0, 10, 2, 3, 4, 9, 6, 7, 8, 1, 5, 11],
    [0, 1, 2, 8, 4, 5, 6, 11, 7, 9, 10, 3],
    [0, 1, 11, 3, 4, 5, 10, 7, 8, 9, 2, 6],
    [9, 1, 2, 3, 8, 5, 6, 7, 0, 4, 10, 11],
];

impl CubieCube {
    /// Apply an algorithm to a cube
    pub fn make_moves(self, mvs: &MoveSequence<Move333>) -> CubieCube {
        mvs.iter().fold(self, |c, &m| c.make_move(m))
    }

    /// Apply a move to a cube.
    pub fn make_move(self, mv: Move333) -> CubieCube {
        (0..mv.turn.count()).fold(self, |c, _| c.make_move_type(mv.face))
    }

    /// Apply a turn of a face to a cube.
    pub fn apply_move(self, face: Face, turn: Turn) -> CubieCube {
        self.make_move(Move333::new(face, turn))
    }

    /// Parse an algorithm written like `R U R' U2` and apply it. Nothing is applied unless every
    /// token parses.
    pub fn apply_alg(self, alg: &str) -> Result<CubieCube, ParseMoveError> {
        let mvs: MoveSequence<Move333> = alg.parse()?;
        Ok(self.make_moves(&mvs))
    }

    /// Make a single clockwise quarter turn of a face.
    pub fn make_move_type(self, face: Face) -> CubieCube {
        let co_offsets = &CO_OFFSETS[face as usize];
        let cp_offsets = &CP_OFFSETS[face as usize];
        let eo_offsets = &EO_OFFSETS[face as usize];
        let ep_offsets = &EP_OFFSETS[face as usize];

        let mut cube = self;

        for i in 0..8 {
            let from = cp_offsets[i] as usize;
            cube.cp[i] = self.cp[from];
            cube.co[i] = self.co[from].twist_by(CornerTwist::ARRAY[co_offsets[i] as usize]);
        }

        for i in 0..12 {
            let from = ep_offsets[i] as usize;
            cube.ep[i] = self.ep[from];
            cube.eo[i] = if eo_offsets[i] == 1 {
                self.eo[from].flip()
            } else {
                self.eo[from]
            };
        }

        cube
    }

    /// Multiply two cube states in the Rubik's cube group.
    pub fn multiply_cube(self, other: CubieCube) -> CubieCube {
        let mut result = CubieCube::SOLVED;

        for i in 0..8 {
            let oa = self.co[other.cp[i] as usize];
            let ob = other.co[i];
            result.co[i] = oa.twist_by(ob);
            result.cp[i] = self.cp[other.cp[i] as usize];
        }

        for i in 0..12 {
            let oa = self.eo[other.ep[i] as usize];
            let ob = other.eo[i];
            result.eo[i] = oa.flip_by(ob);
            result.ep[i] = self.ep[other.ep[i] as usize];
        }

        result
    }

    /// Get the inverse in the Rubik's cube group.
    pub fn inverse(self) -> CubieCube {
        let mut result = CubieCube::SOLVED;

        for i in 0..8 {
            result.co[self.cp[i] as usize] = self.co[i].inverse();
            result.cp[self.cp[i] as usize] = Corner::ARRAY[i];
        }

        for i in 0..12 {
            result.eo[self.ep[i] as usize] = self.eo[i];
            result.ep[self.ep[i] as usize] = Edge::ARRAY[i];
        }

        result
    }
}

/// Flipped edge orientation is relative to the F/B axis, so only these turns change it.
pub fn flips_edges(mv: Move333) -> bool {
    mv.face.axis() == Axis::BF && mv.turn != Turn::Half
}

/// Corner twist is relative to the U/D axis, so only these turns change it.
pub fn twists_corners(mv: Move333) -> bool {
    mv.face.axis() != Axis::UD && mv.turn != Turn::Half
}
