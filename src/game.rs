//! Game session: the application state a front end owns.
//!
//! The engine is stateless; `Game` wraps a board with the rules that sit
//! around it: exactly one spawn after a move that changed the board, no moves
//! once the game is lost or while a win is waiting to be acknowledged, and
//! restarts that replace the board wholesale.
//!
//! ```
//! use nexus_2048::engine::Move;
//! use nexus_2048::game::{Game, Status};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut game = Game::new(4, StdRng::seed_from_u64(7));
//! assert_eq!(game.status(), Status::Playing);
//! let turn = game.play(Move::Left).unwrap();
//! assert_eq!(turn.spawned.is_some(), turn.moved);
//! ```

use log::{debug, info};
use rand::Rng;

use crate::engine::{Board, Coord, Move, Rank};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    /// The winning tile is on the board and the player has not dismissed it yet.
    Won,
    /// Board is full with nothing left to merge. Only a restart leaves this state.
    Lost,
}

/// What a single accepted move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub direction: Move,
    pub moved: bool,
    pub spawned: Option<Coord>,
    pub status: Status,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("game over: restart to play again")]
    GameOver,
    #[error("winning tile reached: dismiss the banner to keep playing")]
    WinPending,
}

pub struct Game<R> {
    board: Board,
    status: Status,
    winning_rank: Rank,
    win_dismissed: bool,
    moves_made: u64,
    rng: R,
}

impl<R: Rng> Game<R> {
    /// Start a game on a freshly initialized board.
    pub fn new(winning_rank: Rank, mut rng: R) -> Self {
        let board = Board::initial(&mut rng);
        Self::with_board(board, winning_rank, rng)
    }

    /// Start from an explicit board. The status is derived from it.
    pub fn with_board(board: Board, winning_rank: Rank, rng: R) -> Self {
        let mut game = Game {
            board,
            status: Status::Playing,
            winning_rank,
            win_dismissed: false,
            moves_made: 0,
            rng,
        };
        game.status = game.evaluate();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn winning_rank(&self) -> Rank {
        self.winning_rank
    }

    /// Moves that changed the board since the last (re)start.
    pub fn moves_made(&self) -> u64 {
        self.moves_made
    }

    /// Apply one directional input.
    ///
    /// A move that changes nothing is accepted but leaves the board as it
    /// was, without spawning.
    pub fn play(&mut self, direction: Move) -> Result<Turn, GameError> {
        match self.status {
            Status::Lost => return Err(GameError::GameOver),
            Status::Won => return Err(GameError::WinPending),
            Status::Playing => {}
        }

        let (next, moved) = self.board.apply_move(direction);
        if !moved {
            debug!("move {direction}: no change");
            return Ok(Turn {
                direction,
                moved,
                spawned: None,
                status: self.status,
            });
        }

        self.board = next;
        let spawned = self.board.spawn_random_tile(&mut self.rng);
        self.moves_made += 1;
        if let Some(coord) = spawned {
            let board = self.board;
            debug!("move {direction}: spawned at {coord}, board {board:?}");
        }

        self.status = self.evaluate();
        match self.status {
            Status::Won => info!(
                "winning rank {} reached after {} moves",
                self.winning_rank, self.moves_made
            ),
            Status::Lost => info!("game over after {} moves", self.moves_made),
            Status::Playing => {}
        }
        Ok(Turn {
            direction,
            moved,
            spawned,
            status: self.status,
        })
    }

    /// Acknowledge a win and keep playing. Returns false if there was no win to dismiss.
    ///
    /// After dismissal the win is not reported again until the next restart.
    pub fn dismiss_win(&mut self) -> bool {
        if self.status != Status::Won {
            return false;
        }
        self.win_dismissed = true;
        self.status = self.evaluate();
        debug!("win dismissed, status now {:?}", self.status);
        true
    }

    /// Replace the board with a fresh one and return to playing.
    pub fn restart(&mut self) {
        self.board = Board::initial(&mut self.rng);
        self.win_dismissed = false;
        self.moves_made = 0;
        self.status = self.evaluate();
        info!("game restarted");
    }

    fn evaluate(&self) -> Status {
        if !self.win_dismissed && self.board.is_win(self.winning_rank) {
            Status::Won
        } else if self.board.is_loss() {
            Status::Lost
        } else {
            Status::Playing
        }
    }
}
