//! Tables shared across integration tests. Each is built at most once per test binary.

use cube_ida::cube333::solver::move_tables::CornerMoveTable;
use cube_ida::cube333::solver::prune::CornerPruningTable;

use std::sync::{Arc, OnceLock};

/// The corner transition table.
pub fn corner_moves() -> &'static CornerMoveTable {
    static MOVES: OnceLock<CornerMoveTable> = OnceLock::new();
    MOVES.get_or_init(CornerMoveTable::generate)
}

/// The full corner pattern database.
pub fn corner_table() -> Arc<CornerPruningTable> {
    static TABLE: OnceLock<Arc<CornerPruningTable>> = OnceLock::new();
    TABLE
        .get_or_init(|| Arc::new(CornerPruningTable::generate(corner_moves())))
        .clone()
}
