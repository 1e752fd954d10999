use rand::Rng;
use std::fmt;
use std::str::FromStr;

use super::{ops, EngineError};

/// Side length of the (fixed) board.
pub const SIZE: usize = 4;

/// Rank of a freshly spawned tile. This variant never spawns anything larger.
pub const SPAWN_RANK: Rank = 0;

/// Tile rank: 0 is the smallest tile, each merge adds one.
pub type Rank = u32;

/// A board cell: `None` when empty.
pub type Cell = Option<Rank>;

/// One row or column, ordered from the leading edge of a move.
pub type Line = [Cell; SIZE];

/// Row/column position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Map a single key press (WASD or hjkl) to a direction.
    pub fn from_key(key: char) -> Option<Move> {
        match key.to_ascii_lowercase() {
            'w' | 'k' => Some(Move::Up),
            's' | 'j' => Some(Move::Down),
            'a' | 'h' => Some(Move::Left),
            'd' | 'l' => Some(Move::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        }
    }

    /// True for the directions whose lines are reversed before collapsing.
    #[inline]
    pub(crate) fn is_reversed(self) -> bool {
        matches!(self, Move::Right | Move::Down)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Move {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Move::Up),
            "down" => Ok(Move::Down),
            "left" => Ok(Move::Left),
            "right" => Ok(Move::Right),
            _ => Err(EngineError::UnknownDirection(s.to_string())),
        }
    }
}

/// A 4x4 board of optional tile ranks, stored row-major.
///
/// `Board` is a small `Copy` value: every operation returns a fresh board
/// (or mutates one the caller owns), so the engine holds no state of its own.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board(pub(crate) [[Cell; SIZE]; SIZE]);

impl Board {
    /// A constant board with every cell empty.
    pub const EMPTY: Board = Board([[None; SIZE]; SIZE]);

    /// Build a board from explicit rows.
    ///
    /// ```
    /// use nexus_2048::engine::Board;
    /// let b = Board::from_rows([
    ///     [Some(0), Some(0), None, None],
    ///     [None; 4],
    ///     [None; 4],
    ///     [None; 4],
    /// ]);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    #[inline]
    pub const fn from_rows(rows: [[Cell; SIZE]; SIZE]) -> Self {
        Board(rows)
    }

    /// Borrow the rows of this board.
    #[inline]
    pub fn rows(&self) -> &[[Cell; SIZE]; SIZE] {
        &self.0
    }

    /// A fresh game board: empty grid plus two random rank-0 tiles.
    ///
    /// ```
    /// use nexus_2048::engine::Board;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let b = Board::initial(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    pub fn initial<R: Rng + ?Sized>(rng: &mut R) -> Self {
        ops::initialize(rng)
    }

    /// Read a cell, checking bounds.
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, EngineError> {
        self.0
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .ok_or(EngineError::InvalidCoord { row, col })
    }

    /// Write a cell, checking bounds.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), EngineError> {
        let slot = self
            .0
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(EngineError::InvalidCoord { row, col })?;
        *slot = cell;
        Ok(())
    }

    #[inline]
    pub fn cell(&self, coord: Coord) -> Cell {
        self.0[coord.row][coord.col]
    }

    /// Return the board resulting from sliding/merging tiles in `dir` (no random insert).
    ///
    /// ```
    /// use nexus_2048::engine::{Board, Move};
    /// let b = Board::from_rows([[None, Some(0), None, Some(0)], [None; 4], [None; 4], [None; 4]]);
    /// assert_eq!(b.shift(Move::Left).rows()[0], [Some(1), None, None, None]);
    /// assert_eq!(b.shift(Move::Right).rows()[0], [None, None, None, Some(1)]);
    /// ```
    #[inline]
    pub fn shift(self, dir: Move) -> Self {
        ops::apply_move(self, dir).0
    }

    /// Slide/merge in `dir`, also reporting whether anything changed.
    #[inline]
    pub fn apply_move(self, dir: Move) -> (Self, bool) {
        ops::apply_move(self, dir)
    }

    /// Place a rank-0 tile in a uniformly chosen empty cell, using the provided RNG.
    ///
    /// Returns the chosen cell, or `None` when the board is full.
    #[inline]
    pub fn spawn_random_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Coord> {
        ops::spawn_random_tile(self, rng)
    }

    /// Place a rank-0 tile in the `index`-th empty cell (row-major).
    ///
    /// [`Board::spawn_random_tile`] draws `index` uniformly and lands here.
    /// Returns `None` and leaves the board untouched when there is no such cell.
    pub fn spawn_at_empty(&mut self, index: usize) -> Option<Coord> {
        let coord = *self.empty_cells().get(index)?;
        self.0[coord.row][coord.col] = Some(SPAWN_RANK);
        Some(coord)
    }

    /// Like `spawn_random_tile` but by value.
    ///
    /// ```
    /// use nexus_2048::engine::Board;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    #[inline]
    pub fn with_random_tile<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        ops::spawn_random_tile(&mut self, rng);
        self
    }

    /// Convenience: like `with_random_tile` but uses thread-local RNG.
    #[inline]
    pub fn with_random_tile_thread(self) -> Self {
        let mut rng = rand::thread_rng();
        self.with_random_tile(&mut rng)
    }

    /// Perform a move, then insert a random tile if the move changed the board.
    ///
    /// ```
    /// use nexus_2048::engine::{Board, Move};
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let row = [Some(0), Some(0), None, None];
    /// let b0 = Board::from_rows([row, [None; 4], [None; 4], [None; 4]]);
    /// let b1 = b0.make_move(Move::Left, &mut rng);
    /// assert_eq!(b1.rows()[0][0], Some(1));
    /// assert_eq!(b1.count_empty(), 14);
    /// ```
    #[inline]
    pub fn make_move<R: Rng + ?Sized>(self, direction: Move, rng: &mut R) -> Self {
        let (moved, changed) = self.apply_move(direction);
        if changed {
            moved.with_random_tile(rng)
        } else {
            self
        }
    }

    /// All empty cells in row-major order.
    #[inline]
    pub fn empty_cells(&self) -> Vec<Coord> {
        ops::empty_cells(self)
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(&self) -> usize {
        ops::count_empty(self)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        ops::is_board_full(self)
    }

    /// True if some right- or down-neighbor pair holds the same rank.
    #[inline]
    pub fn has_any_merge_possible(&self) -> bool {
        ops::has_any_merge_possible(self)
    }

    /// Full and nothing to merge.
    #[inline]
    pub fn is_loss(&self) -> bool {
        ops::is_loss_state(self)
    }

    /// True if any tile has reached `winning_rank`.
    #[inline]
    pub fn is_win(&self, winning_rank: Rank) -> bool {
        ops::is_win_state(self, winning_rank)
    }

    /// Return true if no move in any direction changes the board.
    ///
    /// ```
    /// use nexus_2048::engine::Board;
    /// // Nothing slides on an empty board either.
    /// assert!(Board::EMPTY.is_game_over());
    /// ```
    #[inline]
    pub fn is_game_over(&self) -> bool {
        ops::is_game_over(self)
    }

    /// Highest rank on the board, `None` if it is empty.
    pub fn highest_rank(&self) -> Option<Rank> {
        self.tiles().flatten().max()
    }

    /// Mirror the board left-to-right.
    pub fn mirrored(self) -> Self {
        let mut rows = self.0;
        for row in rows.iter_mut() {
            row.reverse();
        }
        Board(rows)
    }

    /// Swap rows and columns.
    pub fn transposed(self) -> Self {
        let rows = std::array::from_fn(|r| std::array::from_fn(|c| self.0[c][r]));
        Board(rows)
    }

    /// Iterate over cells in row-major order.
    #[inline]
    pub fn tiles(self) -> TilesIter {
        TilesIter {
            board: self,
            idx: 0,
        }
    }

    /// Convenience: collect cells into a `Vec`.
    #[inline]
    pub fn to_vec(self) -> Vec<Cell> {
        self.tiles().collect()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Board[")?;
        for (r, row) in self.0.iter().enumerate() {
            if r > 0 {
                f.write_str(" | ")?;
            }
            for (c, cell) in row.iter().enumerate() {
                if c > 0 {
                    f.write_str(" ")?;
                }
                match cell {
                    Some(rank) => write!(f, "{rank}")?,
                    None => f.write_str(".")?,
                }
            }
        }
        f.write_str("]")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for (r, row) in self.0.iter().enumerate() {
            if r > 0 {
                writeln!(f, "{}", "-".repeat(SIZE * 8 - 1))?;
            }
            let cells: Vec<String> = row.iter().map(format_cell).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

fn format_cell(cell: &Cell) -> String {
    match cell {
        None => " ".repeat(7),
        Some(rank) => format!("{rank:^7}"),
    }
}

/// Row-major iterator over a board's cells.
#[derive(Clone, Debug)]
pub struct TilesIter {
    board: Board,
    idx: usize,
}

impl Iterator for TilesIter {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= SIZE * SIZE {
            return None;
        }
        let cell = self.board.0[self.idx / SIZE][self.idx % SIZE];
        self.idx += 1;
        Some(cell)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = SIZE * SIZE - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TilesIter {}
