mod common;

use common::{corner_moves, corner_table};

use cube_ida::coord::Coordinate;
use cube_ida::cube333::coordcube::{CPCoord, CornerCoord};
use cube_ida::cube333::moves::Move333;
use cube_ida::cube333::solver::move_tables::CoordMover;
use cube_ida::cube333::solver::prune::CornerPruningTable;
use cube_ida::cube333::solver::{Heuristic, SearchConfig, Solver, Target};
use cube_ida::cube333::CubieCube;
use cube_ida::error::SolveError;
use cube_ida::moves::{Move, MoveSequence};
use cube_ida::mv;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn solver(target: Target, max_depth: usize) -> Solver<CornerPruningTable> {
    Solver::new(corner_table(), SearchConfig { max_depth, target })
}

#[test_log::test]
fn single_turn_matches_transition_table() {
    let cube = CubieCube::SOLVED.apply_alg("F").unwrap();
    assert!(!cube.is_solved());

    let moved = corner_moves().make_move(CornerCoord::default(), mv!(F, 1));
    assert_eq!(CPCoord::from_puzzle(&cube), moved.cp());
    assert_eq!(CornerCoord::from_puzzle(&cube), moved);
}

#[test_log::test]
fn turn_and_inverse_is_solved() {
    assert_eq!(CubieCube::SOLVED.apply_alg("F F'").unwrap(), CubieCube::SOLVED);
}

#[test_log::test]
fn double_half_turn_is_solved() {
    assert_eq!(CubieCube::SOLVED.apply_alg("F2 F2").unwrap(), CubieCube::SOLVED);
}

#[test_log::test]
fn one_move_from_solved() {
    let solver = solver(Target::Cube, 20);
    for mv in Move333::ALL {
        let cube = CubieCube::SOLVED.make_move(mv);
        assert_eq!(solver.heuristic().bound(&cube), 1);
        assert_eq!(solver.search(&cube, 0), None);

        let sol = solver.search(&cube, 1).unwrap();
        assert_eq!(sol.len(), 1);
        assert_eq!(sol.0[0], mv.inverse());
        assert!(cube.make_moves(&sol).is_solved());
    }
}

#[test_log::test]
fn random_corners_solve_within_eleven() {
    let solver = solver(Target::Corners, 11);
    let mut rng = StdRng::seed_from_u64(20);
    for _ in 0..5 {
        let cube = CubieCube::random_with(&mut rng);
        let sol = solver.solve(&cube).unwrap();
        info!("corners of {cube:?} solved by {sol}");
        assert!(sol.len() <= 11);
        assert!(cube.make_moves(&sol).corners_solved());
        // The table is exact for the corners, so the solution is exactly its distance.
        assert_eq!(sol.len(), solver.heuristic().bound(&cube));
    }
}

#[test_log::test]
fn short_scrambles_solve_optimally() {
    let solver = solver(Target::Cube, 20);
    for (scramble, optimal) in [
        ("R U F", 3),
        ("R U R' U'", 4),
        ("F R U' L2 D", 5),
        ("U D", 2),
        ("R L R", 2),
    ] {
        let cube = CubieCube::SOLVED.apply_alg(scramble).unwrap();
        let sol = solver.solve(&cube).unwrap();
        assert_eq!(sol.len(), optimal, "{scramble} solved by {sol}");
        assert!(cube.make_moves(&sol).is_solved());
    }
}

#[test_log::test]
fn too_shallow_is_exhausted() {
    let mut rng = StdRng::seed_from_u64(7);
    let cube = CubieCube::random_with(&mut rng);
    let d = corner_table().bound(&cube);
    assert!(d >= 2);

    let shallow = solver(Target::Corners, d - 1);
    assert_eq!(
        shallow.solve(&cube),
        Err(SolveError::Exhausted { max_depth: d - 1 })
    );
}

#[test_log::test]
fn table_statistics() {
    let counts = corner_table().depth_counts();
    assert_eq!(counts.len(), 12);
    assert_eq!(counts[0], 1);
    assert_eq!(counts[1], 18);
    assert_eq!(counts.iter().sum::<usize>(), CornerCoord::count());
    assert!(counts.iter().all(|&c| c > 0));

    let avg = corner_table().average_depth();
    assert!(avg > 8.0 && avg < 10.0, "average depth {avg}");
}

#[test_log::test]
fn table_is_consistent() {
    let table = corner_table();
    assert_eq!(table.distance(CornerCoord::default()), 0);

    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..1000 {
        let cube = CubieCube::random_with(&mut rng);
        let d = table.bound(&cube);
        assert!(d <= 11);

        // Neighbouring cosets are at most one move apart, and at least one neighbour is closer.
        let neighbours = Move333::ALL.map(|mv| table.bound(&cube.make_move(mv)));
        assert!(neighbours.iter().all(|&n| n.abs_diff(d) <= 1));
        if d > 0 {
            assert!(neighbours.contains(&(d - 1)));
        }

        // A scramble of n moves is never more than n from solved.
        let n = rng.gen_range(0..8);
        let scramble: MoveSequence<Move333> = (0..n)
            .map(|_| Move333::from_index(rng.gen_range(0..18)))
            .collect();
        assert!(table.bound(&CubieCube::SOLVED.make_moves(&scramble)) <= n);
    }
}

#[test_log::test]
fn table_persists() {
    let path =
        std::env::temp_dir().join(format!("cube-ida-corners-{}.prune", std::process::id()));
    corner_table().save(&path).unwrap();

    let loaded = CornerPruningTable::load(&path).unwrap();
    let solver = Solver::with_corner_table(&path, SearchConfig::default()).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(&loaded, corner_table().as_ref());
    assert_eq!(solver.heuristic(), corner_table().as_ref());
}
