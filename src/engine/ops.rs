use rand::Rng;

use super::state::{Board, Cell, Coord, Line, Move, Rank, SIZE};

/// Empty grid plus two random tiles.
pub fn initialize<R: Rng + ?Sized>(rng: &mut R) -> Board {
    let mut board = Board::EMPTY;
    spawn_random_tile(&mut board, rng);
    spawn_random_tile(&mut board, rng);
    board
}

/// Slide/merge tiles in the given direction. No randomness.
pub fn shift(board: Board, direction: Move) -> Board {
    apply_move(board, direction).0
}

/// Slide/merge every line of `board` toward `direction`.
///
/// Returns the new board and whether any line changed. Every row (left/right)
/// or column (up/down) is read from the leading edge of the move, collapsed
/// with [`collapse_line`], and written back.
pub fn apply_move(board: Board, direction: Move) -> (Board, bool) {
    let mut rows = board.0;
    let mut moved = false;
    for idx in 0..SIZE {
        let (line, line_moved) = collapse_line(read_line(&rows, direction, idx));
        write_line(&mut rows, direction, idx, line);
        moved |= line_moved;
    }
    (Board(rows), moved)
}

/// Perform a move then insert a random tile if the move changed the board (uses thread RNG).
pub fn make_move(board: Board, direction: Move) -> Board {
    let mut rng = rand::thread_rng();
    board.make_move(direction, &mut rng)
}

/// Collapse one line toward index 0.
///
/// Cells are visited from index 1 upward. Each tile first slides over the
/// empty cells before it, then merges into its left neighbour when the ranks
/// match and that neighbour has not already absorbed a tile in this pass.
pub fn collapse_line(mut line: Line) -> (Line, bool) {
    let mut merged = [false; SIZE];
    let mut moved = false;
    for i in 1..SIZE {
        let Some(rank) = line[i] else { continue };
        let mut j = i;
        while j > 0 && line[j - 1].is_none() {
            line[j - 1] = line[j].take();
            j -= 1;
            moved = true;
        }
        if j > 0 && line[j - 1] == Some(rank) && !merged[j - 1] {
            line[j - 1] = Some(rank + 1);
            line[j] = None;
            merged[j - 1] = true;
            moved = true;
        }
    }
    (line, moved)
}

fn read_line(rows: &[[Cell; SIZE]; SIZE], direction: Move, idx: usize) -> Line {
    let mut line = match direction {
        Move::Left | Move::Right => rows[idx],
        Move::Up | Move::Down => std::array::from_fn(|r| rows[r][idx]),
    };
    if direction.is_reversed() {
        line.reverse();
    }
    line
}

fn write_line(rows: &mut [[Cell; SIZE]; SIZE], direction: Move, idx: usize, mut line: Line) {
    if direction.is_reversed() {
        line.reverse();
    }
    match direction {
        Move::Left | Move::Right => rows[idx] = line,
        Move::Up | Move::Down => {
            for (r, cell) in line.into_iter().enumerate() {
                rows[r][idx] = cell;
            }
        }
    }
}

/// All empty cells, row-major.
pub fn empty_cells(board: &Board) -> Vec<Coord> {
    let mut cells = Vec::with_capacity(SIZE * SIZE);
    for (r, row) in board.0.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            if cell.is_none() {
                cells.push(Coord::new(r, c));
            }
        }
    }
    cells
}

/// Count the number of empty cells.
pub fn count_empty(board: &Board) -> usize {
    board.0.iter().flatten().filter(|cell| cell.is_none()).count()
}

/// Set a uniformly chosen empty cell to rank 0. No-op on a full board.
pub fn spawn_random_tile<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> Option<Coord> {
    let empty = count_empty(board);
    if empty == 0 {
        return None;
    }
    board.spawn_at_empty(rng.gen_range(0..empty))
}

/// Insert a random tile using thread-local RNG.
///
/// For reproducible behavior, prefer `Board::with_random_tile(&mut impl Rng)`.
pub fn insert_random_tile(board: Board) -> Board {
    board.with_random_tile_thread()
}

pub fn is_board_full(board: &Board) -> bool {
    count_empty(board) == 0
}

/// True if any right- or down-neighbour pair holds the same non-empty rank.
pub fn has_any_merge_possible(board: &Board) -> bool {
    let rows = &board.0;
    for r in 0..SIZE {
        for c in 0..SIZE {
            let Some(rank) = rows[r][c] else { continue };
            if c + 1 < SIZE && rows[r][c + 1] == Some(rank) {
                return true;
            }
            if r + 1 < SIZE && rows[r + 1][c] == Some(rank) {
                return true;
            }
        }
    }
    false
}

pub fn is_loss_state(board: &Board) -> bool {
    is_board_full(board) && !has_any_merge_possible(board)
}

pub fn is_win_state(board: &Board, winning_rank: Rank) -> bool {
    board.0.iter().flatten().any(|cell| *cell == Some(winning_rank))
}

/// True if no move in any direction changes the board.
pub fn is_game_over(board: &Board) -> bool {
    Move::ALL.iter().all(|&direction| !apply_move(*board, direction).1)
}
