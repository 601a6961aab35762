//! The 3x3x3 cube, represented by the position and orientation of each corner and edge cubie.
//!
//! Cubies are named after the position they occupy when solved, and `cp[i]` is the cubie currently
//! in position `i`. Orientations are stored per position as well: `co[i]` is the twist of the
//! corner currently in position `i`. Corners are twisted relative to the U/D faces, so quarter
//! turns of U and D never change corner orientation; edges are flipped relative to the F/B axis,
//! so only quarter turns of F and B change edge orientation.

pub mod coordcube;
pub mod moves;
pub mod solver;

use crate::error::{InvalidCube, TryFromIntToEnumError};

use rand::seq::SliceRandom;
use rand::Rng;

/// A corner position (or the cubie which belongs there).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Corner {
    UFR,
    UFL,
    UBL,
    UBR,
    DFR,
    DFL,
    DBL,
    DBR,
}

impl Corner {
    /// Every corner, in label order.
    pub const ARRAY: [Corner; 8] = [
        Corner::UFR,
        Corner::UFL,
        Corner::UBL,
        Corner::UBR,
        Corner::DFR,
        Corner::DFL,
        Corner::DBL,
        Corner::DBR,
    ];
}

/// An edge position (or the cubie which belongs there). The last four are the E slice edges.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Edge {
    UF,
    UL,
    UB,
    UR,
    DF,
    DL,
    DB,
    DR,
    FR,
    FL,
    BL,
    BR,
}

impl Edge {
    /// Every edge, in label order.
    pub const ARRAY: [Edge; 12] = [
        Edge::UF,
        Edge::UL,
        Edge::UB,
        Edge::UR,
        Edge::DF,
        Edge::DL,
        Edge::DB,
        Edge::DR,
        Edge::FR,
        Edge::FL,
        Edge::BL,
        Edge::BR,
    ];
}

/// The twist of a corner relative to its U/D facelet.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum CornerTwist {
    /// The U/D facelet faces U or D.
    #[default]
    Oriented,
    /// One clockwise twist away from oriented.
    Clockwise,
    /// One anticlockwise twist away from oriented.
    AntiClockwise,
}

impl CornerTwist {
    /// Every twist, in value order.
    pub const ARRAY: [CornerTwist; 3] = [
        CornerTwist::Oriented,
        CornerTwist::Clockwise,
        CornerTwist::AntiClockwise,
    ];

    /// Twist once more clockwise.
    pub fn clockwise(self) -> Self {
        self.twist_by(CornerTwist::Clockwise)
    }

    /// Twist once more anticlockwise.
    pub fn anticlockwise(self) -> Self {
        self.twist_by(CornerTwist::AntiClockwise)
    }

    /// Compose two twists (addition mod 3).
    pub fn twist_by(self, other: CornerTwist) -> Self {
        Self::ARRAY[(self as usize + other as usize) % 3]
    }

    /// The twist that undoes this one.
    pub fn inverse(self) -> Self {
        Self::ARRAY[(3 - self as usize) % 3]
    }
}

/// The flip of an edge relative to the F/B axis.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum EdgeFlip {
    /// Not flipped.
    #[default]
    Oriented,
    /// Flipped.
    Flipped,
}

impl EdgeFlip {
    /// Toggle the flip.
    pub fn flip(self) -> Self {
        match self {
            EdgeFlip::Oriented => EdgeFlip::Flipped,
            EdgeFlip::Flipped => EdgeFlip::Oriented,
        }
    }

    /// Compose two flips (xor).
    pub fn flip_by(self, other: EdgeFlip) -> Self {
        match other {
            EdgeFlip::Oriented => self,
            EdgeFlip::Flipped => self.flip(),
        }
    }
}

macro_rules! u8_enum_conversions {
    ($ty:ty) => {
        impl From<$ty> for u8 {
            fn from(v: $ty) -> u8 {
                v as u8
            }
        }

        impl TryFrom<u8> for $ty {
            type Error = TryFromIntToEnumError;

            fn try_from(n: u8) -> Result<Self, Self::Error> {
                <$ty>::ARRAY
                    .get(n as usize)
                    .copied()
                    .ok_or(TryFromIntToEnumError::OutOfBounds)
            }
        }
    };
}

u8_enum_conversions!(Corner);
u8_enum_conversions!(Edge);
u8_enum_conversions!(CornerTwist);

impl From<EdgeFlip> for u8 {
    fn from(v: EdgeFlip) -> u8 {
        v as u8
    }
}

impl TryFrom<u8> for EdgeFlip {
    type Error = TryFromIntToEnumError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(EdgeFlip::Oriented),
            1 => Ok(EdgeFlip::Flipped),
            _ => Err(TryFromIntToEnumError::OutOfBounds),
        }
    }
}

/// A cube state at the cubie level. Cheap to copy; the search copies one per node.
///
/// Every `CubieCube` holds a permutation of the corners and of the edges. The other two
/// reachability conditions (orientation sums and matching parity) are checked by
/// [`validate`](CubieCube::validate), and hold for anything built from the solved cube by moves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CubieCube {
    pub(crate) co: [CornerTwist; 8],
    pub(crate) cp: [Corner; 8],
    pub(crate) eo: [EdgeFlip; 12],
    pub(crate) ep: [Edge; 12],
}

impl Default for CubieCube {
    fn default() -> Self {
        Self::SOLVED
    }
}

impl CubieCube {
    /// The solved cube.
    pub const SOLVED: CubieCube = CubieCube {
        co: [CornerTwist::Oriented; 8],
        cp: Corner::ARRAY,
        eo: [EdgeFlip::Oriented; 12],
        ep: Edge::ARRAY,
    };

    /// Build a cube from its pieces, checking it can be reached from the solved state.
    pub fn new(
        cp: [Corner; 8],
        co: [CornerTwist; 8],
        ep: [Edge; 12],
        eo: [EdgeFlip; 12],
    ) -> Result<CubieCube, InvalidCube> {
        let cube = CubieCube { co, cp, eo, ep };
        cube.validate()?;
        Ok(cube)
    }

    /// Build a cube from raw labels and orientations, as `new` but also reporting out of range
    /// values.
    pub fn from_raw(
        cp: [u8; 8],
        co: [u8; 8],
        ep: [u8; 12],
        eo: [u8; 12],
    ) -> Result<CubieCube, InvalidCube> {
        let mut cube = CubieCube::SOLVED;

        let mut seen = 0u16;
        for (position, &value) in cp.iter().enumerate() {
            let corner = Corner::try_from(value)
                .map_err(|_| InvalidCube::CornerOutOfRange { position, value })?;
            if seen & (1 << value) != 0 {
                return Err(InvalidCube::DuplicateCorner {
                    position,
                    corner: value,
                });
            }
            seen |= 1 << value;
            cube.cp[position] = corner;
        }

        let mut seen = 0u16;
        for (position, &value) in ep.iter().enumerate() {
            let edge = Edge::try_from(value)
                .map_err(|_| InvalidCube::EdgeOutOfRange { position, value })?;
            if seen & (1 << value) != 0 {
                return Err(InvalidCube::DuplicateEdge {
                    position,
                    edge: value,
                });
            }
            seen |= 1 << value;
            cube.ep[position] = edge;
        }

        for (position, &value) in co.iter().enumerate() {
            cube.co[position] = CornerTwist::try_from(value)
                .map_err(|_| InvalidCube::TwistOutOfRange { position, value })?;
        }

        for (position, &value) in eo.iter().enumerate() {
            cube.eo[position] = EdgeFlip::try_from(value)
                .map_err(|_| InvalidCube::FlipOutOfRange { position, value })?;
        }

        cube.validate()?;
        Ok(cube)
    }

    /// Generate a uniformly random cube which is reachable from the solved state.
    pub fn random() -> CubieCube {
        Self::random_with(&mut rand::thread_rng())
    }

    /// Generate a uniformly random reachable cube using the given source of randomness.
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> CubieCube {
        let mut cube = CubieCube::SOLVED;
        cube.cp.shuffle(rng);
        cube.ep.shuffle(rng);

        // Swapping two edges is a transposition, so it fixes a parity mismatch.
        if permutation_parity(&cube.cp) != permutation_parity(&cube.ep) {
            cube.ep.swap(0, 1);
        }

        let mut last = EdgeFlip::Oriented;
        for o in &mut cube.eo[..11] {
            if rng.gen::<bool>() {
                *o = EdgeFlip::Flipped;
                last = last.flip();
            }
        }
        cube.eo[11] = last;

        let mut last = CornerTwist::Oriented;
        for o in &mut cube.co[..7] {
            *o = CornerTwist::ARRAY[rng.gen_range(0..3)];
            last = last.twist_by(o.inverse());
        }
        cube.co[7] = last;

        debug_assert!(cube.is_valid());
        cube
    }

    /// The corner in each corner position.
    pub fn corner_permutation(&self) -> [Corner; 8] {
        self.cp
    }

    /// The twist of the corner in each corner position.
    pub fn corner_orientation(&self) -> [CornerTwist; 8] {
        self.co
    }

    /// The edge in each edge position.
    pub fn edge_permutation(&self) -> [Edge; 12] {
        self.ep
    }

    /// The flip of the edge in each edge position.
    pub fn edge_orientation(&self) -> [EdgeFlip; 12] {
        self.eo
    }

    /// The twist of a particular corner cubie, wherever it is.
    pub fn corner_twist_of(&self, piece: Corner) -> CornerTwist {
        self.cp
            .iter()
            .zip(self.co)
            .find(|&(&c, _)| c == piece)
            .map_or(CornerTwist::Oriented, |(_, o)| o)
    }

    /// The flip of a particular edge cubie, wherever it is.
    pub fn edge_flip_of(&self, piece: Edge) -> EdgeFlip {
        self.ep
            .iter()
            .zip(self.eo)
            .find(|&(&e, _)| e == piece)
            .map_or(EdgeFlip::Oriented, |(_, o)| o)
    }

    /// Whether every cubie is home and oriented.
    pub fn is_solved(&self) -> bool {
        *self == CubieCube::SOLVED
    }

    /// Whether every corner is home and oriented, ignoring the edges.
    pub fn corners_solved(&self) -> bool {
        self.cp == Corner::ARRAY && self.co == [CornerTwist::Oriented; 8]
    }

    /// Sum of corner twists mod 3, as the twist the cube is "off" by.
    pub fn co_parity(&self) -> CornerTwist {
        self.co
            .iter()
            .fold(CornerTwist::Oriented, |acc, &o| acc.twist_by(o))
    }

    /// Sum of edge flips mod 2.
    pub fn eo_parity(&self) -> EdgeFlip {
        self.eo
            .iter()
            .fold(EdgeFlip::Oriented, |acc, &o| acc.flip_by(o))
    }

    /// Whether the corner and edge permutations have different parity.
    pub fn perm_parity(&self) -> bool {
        permutation_parity(&self.cp) != permutation_parity(&self.ep)
    }

    /// Check the cube is reachable from the solved cube: both permutations are bijections, the
    /// twists sum to 0 mod 3, the flips sum to 0 mod 2 and the permutation parities agree.
    pub fn validate(&self) -> Result<(), InvalidCube> {
        let mut seen = 0u16;
        for (position, &c) in self.cp.iter().enumerate() {
            if seen & (1 << c as u8) != 0 {
                return Err(InvalidCube::DuplicateCorner {
                    position,
                    corner: c.into(),
                });
            }
            seen |= 1 << c as u8;
        }

        let mut seen = 0u16;
        for (position, &e) in self.ep.iter().enumerate() {
            if seen & (1 << e as u8) != 0 {
                return Err(InvalidCube::DuplicateEdge {
                    position,
                    edge: e.into(),
                });
            }
            seen |= 1 << e as u8;
        }

        if self.co_parity() != CornerTwist::Oriented {
            return Err(InvalidCube::Twist {
                total: self.co.iter().map(|&o| o as u32).sum(),
            });
        }

        if self.eo_parity() != EdgeFlip::Oriented {
            return Err(InvalidCube::Flip {
                total: self.eo.iter().map(|&o| o as u32).sum(),
            });
        }

        if self.perm_parity() {
            return Err(InvalidCube::Parity);
        }

        Ok(())
    }

    /// See [`validate`](CubieCube::validate).
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Parity of a permutation by counting inversions; `true` if odd.
fn permutation_parity<T: Ord>(perm: &[T]) -> bool {
    let inversions: usize = (0..perm.len())
        .map(|i| perm[i + 1..].iter().filter(|x| **x < perm[i]).count())
        .sum();
    inversions % 2 == 1
}
