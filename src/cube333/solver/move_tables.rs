//! Move tables for each coordinate type

use crate::coord::{Coordinate, FromCoordinate};
use crate::cube333::coordcube::{COCoord, CPCoord, CornerCoord, EOCoord};
use crate::cube333::moves::Move333;
use crate::cube333::CubieCube;
use crate::moves::MoveSequence;

use log::debug;
use rayon::prelude::*;

/// Something that knows how a coordinate changes under each face turn.
pub trait CoordMover<C>: Sync {
    /// Determine what coordinate comes from applying a move.
    fn make_move(&self, coord: C, mv: Move333) -> C;

    /// Determine what coordinate comes from applying a sequence of moves.
    fn make_moves(&self, coord: C, alg: &MoveSequence<Move333>) -> C {
        alg.iter().fold(coord, |c, &m| self.make_move(c, m))
    }
}

/// A move table, which stores mappings of coordinate + move pairs to the coordinate that results
/// from applying the move.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoveTable<C: Coordinate<CubieCube>> {
    table: Box<[[C; 18]]>,
}

impl<C> MoveTable<C>
where
    C: Coordinate<CubieCube> + Send + Sync,
    CubieCube: FromCoordinate<C>,
{
    /// Generate a move table. Every coordinate is decoded onto the solved cube, moved and encoded
    /// again, so the rows are independent and get filled in parallel.
    pub fn generate() -> Self {
        let table: Box<[[C; 18]]> = (0..C::count())
            .into_par_iter()
            .map(|n| {
                let mut cube = CubieCube::SOLVED;
                cube.set_coord(C::from_repr(n));
                Move333::ALL.map(|mv| C::from_puzzle(&cube.make_move(mv)))
            })
            .collect::<Vec<_>>()
            .into_boxed_slice();

        debug!(
            "generated move table for {} with {} rows",
            std::any::type_name::<C>(),
            table.len()
        );

        Self { table }
    }
}

impl<C: Coordinate<CubieCube> + Sync> CoordMover<C> for MoveTable<C> {
    fn make_move(&self, coord: C, mv: Move333) -> C {
        self.table[coord.repr()][mv.index()]
    }
}

/// Moves the combined corner coordinate by moving its permutation and orientation parts
/// separately, since neither depends on the other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CornerMoveTable {
    cp: MoveTable<CPCoord>,
    co: MoveTable<COCoord>,
}

impl CornerMoveTable {
    /// Generate both halves of the table.
    pub fn generate() -> Self {
        let (cp, co) = rayon::join(MoveTable::generate, MoveTable::generate);
        Self { cp, co }
    }
}

impl CoordMover<CornerCoord> for CornerMoveTable {
    fn make_move(&self, coord: CornerCoord, mv: Move333) -> CornerCoord {
        CornerCoord::new(
            self.cp.make_move(coord.cp(), mv),
            self.co.make_move(coord.co(), mv),
        )
    }
}

/// Move table for the corner orientation coordinate.
pub type COMoveTable = MoveTable<COCoord>;
/// Move table for the corner permutation coordinate.
pub type CPMoveTable = MoveTable<CPCoord>;
/// Move table for the edge orientation coordinate.
pub type EOMoveTable = MoveTable<EOCoord>;

#[cfg(test)]
mod test {
    use super::*;
    use crate::cube333::moves::{Face, Turn};
    use crate::cube333::tests::random_cube;

    use proptest::collection::vec;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn generates() {
        assert_eq!(COMoveTable::generate().table.len(), 2187);
        assert_eq!(CPMoveTable::generate().table.len(), 40320);
        assert_eq!(EOMoveTable::generate().table.len(), 2048);
    }

    #[test]
    fn half_turns_keep_orientation() {
        let co = COMoveTable::generate();
        let eo = EOMoveTable::generate();
        for face in Face::ARRAY {
            let mv = Move333::new(face, Turn::Half);
            assert_eq!(co.make_move(COCoord::default(), mv), COCoord::default());
            assert_eq!(eo.make_move(EOCoord::default(), mv), EOCoord::default());
        }
    }

    /* We check that the following diagram commutes
     *
     *   CubieCube --apply_move--> CubieCube
     *      |                         |
     *      |                         |
     * from_puzzle              from_puzzle
     *      |                         |
     *      |                         |
     *      v                         v
     *    Coord -----apply_move---> Coord
     *
     * Move application should be compatable with coordinate translation.
     */

    fn diagram_commutes<C: Coordinate<CubieCube> + std::fmt::Debug>(
        table: &impl CoordMover<C>,
        p: CubieCube,
        mvs: &MoveSequence<Move333>,
    ) {
        let l = table.make_moves(C::from_puzzle(&p), mvs);
        let r = C::from_puzzle(&p.make_moves(mvs));
        assert_eq!(l, r);
    }

    #[test]
    fn commutes_normal() {
        let co_table = COMoveTable::generate();
        let cp_table = CPMoveTable::generate();
        let eo_table = EOMoveTable::generate();
        let corner_table = CornerMoveTable::generate();
        proptest!(|(mvs in vec(any::<Move333>(), 0..20).prop_map(MoveSequence), p in random_cube())| {
            diagram_commutes(&co_table, CubieCube::SOLVED, &mvs);
            diagram_commutes(&cp_table, CubieCube::SOLVED, &mvs);
            diagram_commutes(&eo_table, CubieCube::SOLVED, &mvs);
            diagram_commutes(&corner_table, CubieCube::SOLVED, &mvs);
            diagram_commutes(&corner_table, p, &mvs);
            diagram_commutes(&eo_table, p, &mvs);
        });
    }

    #[test]
    fn sampled_transitions() {
        let corner_table = CornerMoveTable::generate();
        let mut rng = StdRng::seed_from_u64(333);
        for _ in 0..1000 {
            let cube = CubieCube::random_with(&mut rng);
            let mv = Move333::from_index(rng.gen_range(0..18));
            assert_eq!(
                corner_table.make_move(CornerCoord::from_puzzle(&cube), mv),
                CornerCoord::from_puzzle(&cube.make_move(mv)),
                "{mv} from {cube:?}"
            );
        }
    }
}
