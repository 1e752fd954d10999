//! Engine module: the 4x4 board, slide-and-merge moves, random tile
//! spawning and terminal-state checks. Everything here is a pure function of
//! a `Board` value plus, where randomness is involved, a caller-supplied RNG.
//!
//! - `Board` is the grid state with ergonomic methods.
//! - Free functions mirror the methods when convenient (e.g., `shift`).
//! - The line-collapse routine and its helpers live in `ops`.

mod ops;
pub mod state;

pub use state::{Board, Cell, Coord, Line, Move, Rank, TilesIter, SIZE, SPAWN_RANK};

pub use ops::{
    apply_move, collapse_line, count_empty, empty_cells, has_any_merge_possible, initialize,
    insert_random_tile, is_board_full, is_game_over, is_loss_state, is_win_state, make_move,
    shift, spawn_random_tile,
};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown direction {0:?} (expected up, down, left or right)")]
    UnknownDirection(String),
    #[error("cell ({row}, {col}) is outside the 4x4 board")]
    InvalidCoord { row: usize, col: usize },
}
