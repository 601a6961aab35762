//! Coordinates of the `CubieCube`: compact integers naming the coset of a cube under the subgroup
//! which fixes the pieces the coordinate describes.

use super::{Corner, CornerTwist, CubieCube, Edge, EdgeFlip};
use crate::coord::{Coordinate, FromCoordinate};

/// A coordinate representation of the corner orientation of a cube with respect to the U/D faces.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct COCoord(u16);

/// A coordinate representation of the corner permutation of a cube.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct CPCoord(u16);

/// A coordinate representation of the edge orientation of a cube with respect to the F/B faces.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct EOCoord(u16);

/// A coordinate representation of the edge permutation of a cube.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct EPCoord(u32);

/// The corner permutation and orientation together, i.e. the coset of the subgroup which only
/// moves edges. This is what the corner pattern database is indexed by.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct CornerCoord {
    cp: CPCoord,
    co: COCoord,
}

impl Coordinate<CubieCube> for COCoord {
    fn from_puzzle(puzzle: &CubieCube) -> Self {
        COCoord(to_o_coord::<8, 3>(&puzzle.co.map(u8::from)))
    }

    fn count() -> usize {
        // 3^7
        2187
    }

    fn repr(self) -> usize {
        self.0 as usize
    }

    fn from_repr(n: usize) -> Self {
        COCoord(n as u16)
    }
}

impl FromCoordinate<COCoord> for CubieCube {
    fn set_coord(&mut self, coord: COCoord) {
        self.co = from_o_coord::<8, 3>(coord.0).map(|o| CornerTwist::ARRAY[o as usize]);
    }
}

impl Coordinate<CubieCube> for CPCoord {
    fn from_puzzle(puzzle: &CubieCube) -> Self {
        CPCoord(to_p_coord::<8>(&puzzle.cp.map(u8::from)) as u16)
    }

    fn count() -> usize {
        // 8!
        40320
    }

    fn repr(self) -> usize {
        self.0 as usize
    }

    fn from_repr(n: usize) -> Self {
        CPCoord(n as u16)
    }
}

impl FromCoordinate<CPCoord> for CubieCube {
    fn set_coord(&mut self, coord: CPCoord) {
        self.cp = from_p_coord::<8>(coord.0 as u32).map(|c| Corner::ARRAY[c as usize]);
    }
}

impl Coordinate<CubieCube> for EOCoord {
    fn from_puzzle(puzzle: &CubieCube) -> Self {
        EOCoord(to_o_coord::<12, 2>(&puzzle.eo.map(u8::from)))
    }

    fn count() -> usize {
        // 2^11
        2048
    }

    fn repr(self) -> usize {
        self.0 as usize
    }

    fn from_repr(n: usize) -> Self {
        EOCoord(n as u16)
    }
}

impl FromCoordinate<EOCoord> for CubieCube {
    fn set_coord(&mut self, coord: EOCoord) {
        self.eo = from_o_coord::<12, 2>(coord.0).map(|o| {
            if o == 0 {
                EdgeFlip::Oriented
            } else {
                EdgeFlip::Flipped
            }
        });
    }
}

impl Coordinate<CubieCube> for EPCoord {
    fn from_puzzle(puzzle: &CubieCube) -> Self {
        EPCoord(to_p_coord::<12>(&puzzle.ep.map(u8::from)))
    }

    fn count() -> usize {
        // a lot
        479001600
    }

    fn repr(self) -> usize {
        self.0 as usize
    }

    fn from_repr(n: usize) -> Self {
        EPCoord(n as u32)
    }
}

impl FromCoordinate<EPCoord> for CubieCube {
    fn set_coord(&mut self, coord: EPCoord) {
        self.ep = from_p_coord::<12>(coord.0).map(|e| Edge::ARRAY[e as usize]);
    }
}

impl CornerCoord {
    /// Combine a corner permutation and a corner orientation coordinate.
    pub fn new(cp: CPCoord, co: COCoord) -> Self {
        CornerCoord { cp, co }
    }

    /// The corner permutation part.
    pub fn cp(self) -> CPCoord {
        self.cp
    }

    /// The corner orientation part.
    pub fn co(self) -> COCoord {
        self.co
    }
}

impl Coordinate<CubieCube> for CornerCoord {
    fn from_puzzle(puzzle: &CubieCube) -> Self {
        CornerCoord {
            cp: CPCoord::from_puzzle(puzzle),
            co: COCoord::from_puzzle(puzzle),
        }
    }

    fn count() -> usize {
        CPCoord::count() * COCoord::count()
    }

    fn repr(self) -> usize {
        self.cp.repr() * COCoord::count() + self.co.repr()
    }

    fn from_repr(n: usize) -> Self {
        CornerCoord {
            cp: CPCoord::from_repr(n / COCoord::count()),
            co: COCoord::from_repr(n % COCoord::count()),
        }
    }
}

impl FromCoordinate<CornerCoord> for CubieCube {
    fn set_coord(&mut self, coord: CornerCoord) {
        self.set_coord(coord.cp);
        self.set_coord(coord.co);
    }
}

/// Orientations as a little endian base `STATES` number. The last piece is left out since the
/// orientation sum is fixed.
fn to_o_coord<const COUNT: usize, const STATES: u16>(arr: &[u8; COUNT]) -> u16 {
    arr[..COUNT - 1]
        .iter()
        .rev()
        .fold(0, |acc, &o| acc * STATES + o as u16)
}

fn from_o_coord<const COUNT: usize, const STATES: u16>(mut n: u16) -> [u8; COUNT] {
    let mut arr = [0; COUNT];
    let mut sum = 0;
    for o in &mut arr[..COUNT - 1] {
        *o = (n % STATES) as u8;
        sum += n % STATES;
        n /= STATES;
    }
    arr[COUNT - 1] = ((STATES - sum % STATES) % STATES) as u8;
    arr
}

/// Rank of a permutation in factorial base. Digit `i` is the number of labels smaller than
/// `arr[i]` appearing after it, which is `arr[i]` minus the smaller labels already seen, and those
/// are a popcount of the seen mask.
fn to_p_coord<const COUNT: usize>(arr: &[u8; COUNT]) -> u32 {
    let mut seen = 0u16;
    arr[..COUNT - 1]
        .iter()
        .enumerate()
        .fold(0, |acc, (i, &x)| {
            let smaller_seen = (seen & ((1 << x) - 1)).count_ones();
            seen |= 1 << x;
            acc * (COUNT - i) as u32 + (x as u32 - smaller_seen)
        })
}

fn from_p_coord<const COUNT: usize>(mut n: u32) -> [u8; COUNT] {
    let mut digits = [0u8; COUNT];
    for i in (0..COUNT - 1).rev() {
        let base = (COUNT - i) as u32;
        digits[i] = (n % base) as u8;
        n /= base;
    }

    // Digit i picks the digit-th smallest label not used yet.
    let mut unused: u16 = (1 << COUNT) - 1;
    digits.map(|d| {
        let mut mask = unused;
        for _ in 0..d {
            mask &= mask - 1;
        }
        let label = mask.trailing_zeros() as u8;
        unused &= !(1 << label);
        label
    })
}
