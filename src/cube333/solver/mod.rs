//! An optimal solver using iterative deepening A*, pruned by a pattern database.
//!
//! The search tree is a depth first search over face turns, bounded by a maximum depth which is
//! raised one move at a time. A branch is cut as soon as the moves made plus the heuristic's lower
//! bound exceed that depth, so with an admissible heuristic the first depth that succeeds is the
//! optimal solution length.

pub mod move_tables;
pub mod prune;

use super::moves::{Face, Move333, Turn};
use super::CubieCube;
use crate::error::{SolveError, TableError};
use crate::moves::MoveSequence;
use move_tables::CornerMoveTable;
use prune::CornerPruningTable;

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use rayon::prelude::*;

/// A lower bound on the number of moves needed to solve a cube. Must never overestimate.
pub trait Heuristic: Sync + Send {
    /// The lower bound for this cube.
    fn bound(&self, cube: &CubieCube) -> usize;
}

/// The heuristic that knows nothing, turning the search into plain iterative deepening.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn bound(&self, _: &CubieCube) -> usize {
        0
    }
}

/// What counts as solved.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The whole cube.
    #[default]
    Cube,
    /// Only the corners, ignoring the edges.
    Corners,
}

impl Target {
    /// Whether the cube is solved for this target.
    pub fn reached(self, cube: &CubieCube) -> bool {
        match self {
            Target::Cube => cube.is_solved(),
            Target::Corners => cube.corners_solved(),
        }
    }
}

/// Search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// The deepest bound [`Solver::solve`] tries before giving up.
    pub max_depth: usize,
    /// What the solver solves.
    pub target: Target,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 20,
            target: Target::Cube,
        }
    }
}

/// A cube solver. The heuristic is shared read only, so one table can serve many solvers.
pub struct Solver<H> {
    heuristic: Arc<H>,
    config: SearchConfig,
}

impl Solver<CornerPruningTable> {
    /// A solver pruned by the corner pattern database stored at `path`, which is generated and
    /// saved there if the file doesn't exist.
    pub fn with_corner_table(
        path: impl AsRef<Path>,
        config: SearchConfig,
    ) -> Result<Self, TableError> {
        let table = CornerPruningTable::load_or_generate(path, CornerMoveTable::generate)?;
        Ok(Self::new(Arc::new(table), config))
    }
}

impl<H: Heuristic> Solver<H> {
    /// Create a solver.
    pub fn new(heuristic: Arc<H>, config: SearchConfig) -> Self {
        Self { heuristic, config }
    }

    /// The parameters this solver was made with.
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// The heuristic this solver prunes with.
    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }

    /// Obtain a solving sequence for the cube (such that applying the sequence solves the cube),
    /// trying every depth up to the configured maximum. The solution is as short as any solution
    /// for the target.
    pub fn solve(&self, cube: &CubieCube) -> Result<MoveSequence<Move333>, SolveError> {
        cube.validate()?;

        for depth in 0..=self.config.max_depth {
            debug!("searching depth {depth}");
            if let Some(sol) = self.search(cube, depth) {
                info!("found {depth} move solution: {sol}");
                return Ok(sol);
            }
        }

        warn!(
            "no solution in {} moves, the pruning table or the cube is wrong",
            self.config.max_depth
        );
        Err(SolveError::Exhausted {
            max_depth: self.config.max_depth,
        })
    }

    /// A single bounded search: some solution of at most `max_depth` moves, if there is one.
    ///
    /// The subtrees under each first move are searched in parallel, and all of them stop once any
    /// one finds a solution.
    pub fn search(&self, cube: &CubieCube, max_depth: usize) -> Option<MoveSequence<Move333>> {
        if self.config.target.reached(cube) {
            return Some(MoveSequence::new());
        }
        if max_depth == 0 || self.heuristic.bound(cube) > max_depth {
            return None;
        }

        let found = AtomicBool::new(false);
        Move333::ALL.par_iter().find_map_any(|&mv| {
            if found.load(Ordering::Relaxed) {
                return None;
            }
            let mut sol = vec![mv];
            if self.try_move(cube.make_move(mv), mv.face, 1, max_depth, &found, &mut sol) {
                found.store(true, Ordering::Relaxed);
                Some(MoveSequence(sol))
            } else {
                None
            }
        })
    }

    /// Having just made the move at the end of `sol`, reaching `cube` at `depth`: is the target
    /// reached, or reachable within the remaining depth?
    fn try_move(
        &self,
        cube: CubieCube,
        face: Face,
        depth: usize,
        max_depth: usize,
        found: &AtomicBool,
        sol: &mut Vec<Move333>,
    ) -> bool {
        if self.config.target.reached(&cube) {
            return true;
        }
        if depth + self.heuristic.bound(&cube) > max_depth {
            return false;
        }
        self.search_from(cube, face, depth, max_depth, found, sol)
    }

    fn search_from(
        &self,
        cube: CubieCube,
        last: Face,
        depth: usize,
        max_depth: usize,
        found: &AtomicBool,
        sol: &mut Vec<Move333>,
    ) -> bool {
        if depth == max_depth {
            return false;
        }

        for face in Face::ARRAY {
            if redundant(last, face) {
                continue;
            }

            let mut next = cube;
            for turn in [Turn::Clockwise, Turn::Half, Turn::CounterClockwise] {
                if found.load(Ordering::Relaxed) {
                    return false;
                }

                next = next.make_move_type(face);
                sol.push(Move333::new(face, turn));
                if self.try_move(next, face, depth + 1, max_depth, found, sol) {
                    return true;
                }
                sol.pop();
            }
        }

        false
    }
}

/// Whether turning `face` straight after `last` can be skipped. Turning the same face twice is
/// one move, and of two commuting opposite faces only the order U D, L R, B F is searched.
pub fn redundant(last: Face, face: Face) -> bool {
    face == last || (face.axis() == last.axis() && face < last)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cube333::tests::random_cube;
    use crate::cube333::{Corner, CornerTwist, Edge, EdgeFlip};

    use std::sync::atomic::AtomicUsize;

    use proptest::collection::vec;
    use proptest::prelude::*;

    fn plain(target: Target) -> Solver<ZeroHeuristic> {
        Solver::new(
            Arc::new(ZeroHeuristic),
            SearchConfig {
                max_depth: 4,
                target,
            },
        )
    }

    #[test]
    fn redundancy() {
        assert!(redundant(Face::R, Face::R));
        assert!(redundant(Face::D, Face::U));
        assert!(redundant(Face::R, Face::L));
        assert!(redundant(Face::F, Face::B));
        assert!(!redundant(Face::U, Face::D));
        assert!(!redundant(Face::L, Face::R));
        assert!(!redundant(Face::B, Face::F));
        assert!(!redundant(Face::U, Face::F));

        let after_each = Face::ARRAY
            .iter()
            .map(|&last| Face::ARRAY.iter().filter(|&&f| !redundant(last, f)).count())
            .collect::<Vec<_>>();
        assert_eq!(after_each, vec![5, 4, 5, 4, 5, 4]);
    }

    #[test]
    fn solved_needs_nothing() {
        let solver = plain(Target::Cube);
        assert_eq!(solver.search(&CubieCube::SOLVED, 0), Some(MoveSequence::new()));
        assert_eq!(solver.solve(&CubieCube::SOLVED), Ok(MoveSequence::new()));
    }

    #[test]
    fn one_move() {
        let solver = plain(Target::Cube);
        let cube = CubieCube::SOLVED.make_move(crate::mv!(R, 1));
        assert_eq!(solver.search(&cube, 0), None);
        let sol = solver.search(&cube, 1).unwrap();
        assert_eq!(sol, MoveSequence(vec![crate::mv!(R, 3)]));
    }

    #[test]
    fn exhausted() {
        let solver = plain(Target::Cube);
        let cube = CubieCube::SOLVED.apply_alg("R U F D L").unwrap();
        assert_eq!(solver.config().target, Target::Cube);
        assert_eq!(
            solver.solve(&cube),
            Err(SolveError::Exhausted {
                max_depth: solver.config().max_depth
            })
        );
    }

    /// Counts the nodes the search visits.
    #[derive(Default)]
    struct Counting(AtomicUsize);

    impl Heuristic for Counting {
        fn bound(&self, _: &CubieCube) -> usize {
            self.0.fetch_add(1, Ordering::Relaxed);
            0
        }
    }

    #[test]
    fn success_stops_sibling_subtrees() {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .unwrap();
        let nodes = |cube: &CubieCube, depth: usize| {
            let solver = Solver::new(Arc::new(Counting::default()), SearchConfig::default());
            let sol = pool.install(|| solver.search(cube, depth));
            (sol, solver.heuristic().0.load(Ordering::Relaxed))
        };

        // Nothing within five moves, so every subtree is searched to the bottom.
        let far = CubieCube::SOLVED.apply_alg("R U F D L B").unwrap();
        let (none, full) = nodes(&far, 5);
        assert_eq!(none, None);

        // U is the first move tried and solves this at once, so the other seventeen first moves
        // should give up almost immediately.
        let near = CubieCube::SOLVED.make_move(crate::mv!(U, 3));
        let (sol, early) = nodes(&near, 5);
        assert_eq!(sol, Some(MoveSequence(vec![crate::mv!(U, 1)])));
        assert!(early * 20 < full, "{early} nodes visited, a full search visits {full}");
    }

    #[test]
    fn rejects_invalid() {
        let solver = plain(Target::Cube);
        let mut cp = Corner::ARRAY;
        cp.swap(0, 1);
        let cube = CubieCube::new(
            cp,
            [CornerTwist::Oriented; 8],
            Edge::ARRAY,
            [EdgeFlip::Oriented; 12],
        );
        assert!(cube.is_err());

        let mut cube = CubieCube::SOLVED;
        cube.co[0] = CornerTwist::Clockwise;
        assert!(matches!(
            solver.solve(&cube),
            Err(SolveError::InvalidCube(_))
        ));
    }

    #[test]
    fn corners_only() {
        let solver = plain(Target::Corners);
        let cube = CubieCube::SOLVED.apply_alg("R U").unwrap();
        let sol = solver.solve(&cube).unwrap();
        assert_eq!(sol.len(), 2);
        assert!(cube.make_moves(&sol).corners_solved());
    }

    proptest! {
        #[test]
        fn solves_short_scrambles(mvs in vec(any::<Move333>(), 0..4).prop_map(MoveSequence)) {
            let solver = plain(Target::Cube);
            let cube = CubieCube::SOLVED.make_moves(&mvs);
            let sol = solver.solve(&cube).unwrap();
            prop_assert!(cube.make_moves(&sol).is_solved());
            prop_assert!(sol.len() <= mvs.clone().cancel().len());
            // Optimal, so nothing cancels and no opposite pair is out of order.
            prop_assert_eq!(sol.clone().cancel().len(), sol.len());
            for w in sol.0.windows(2) {
                prop_assert!(!redundant(w[0].face, w[1].face));
            }
        }

        #[test]
        fn random_cubes_are_far(cube in random_cube()) {
            prop_assert_eq!(plain(Target::Cube).search(&cube, 3), None);
        }
    }
}
