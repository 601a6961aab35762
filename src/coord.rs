//! We give a general description of a coordinate, which is a type used to encode coset information
//! of a puzzle.

/// A coordinate type, encoding cosets of the puzzle P.
pub trait Coordinate<P>: Copy + Default + Eq {
    /// Obtain the coordinate that corresponds to the given puzzle.
    fn from_puzzle(puzzle: &P) -> Self;

    /// Determine whether the given coordinate represents a solved state
    fn solved(self) -> bool {
        self.repr() == 0
    }

    /// The number of possible coordinate states.
    fn count() -> usize;

    /// A representation of this coordinate as a usize, for use in table lookups.
    fn repr(self) -> usize;

    /// Convert the representation of a coordinate to the coordinate itself. We assume 0
    /// corresponds to the solved state, and that `n < count()`.
    fn from_repr(n: usize) -> Self;
}

/// Gives the ability to set a coordinate onto a puzzle.
///
/// Only the pieces the coordinate describes are touched, so setting a coordinate onto the solved
/// puzzle gives a canonical member of the coset. That member need not be reachable (e.g. setting
/// an odd corner permutation leaves the edges solved), but it moves correctly under every move.
pub trait FromCoordinate<C>: Sized
where
    C: Coordinate<Self>,
{
    /// Modify the puzzle so that its coordinate for `C` is `coord`.
    fn set_coord(&mut self, coord: C);
}
