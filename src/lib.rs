//! nexus-2048: the "2048: GPU Edition" puzzle engine + terminal front end
//!
//! This crate provides:
//! - A 4x4 `Board` type with ergonomic methods (`shift`, `apply_move`, `make_move`, ...)
//! - Terminal-state checks (`is_loss`, `is_win`) for the front end to poll after every move
//! - A `Game` session that owns the board and the win/loss/restart rules (`game` module)
//! - Tile sets mapping ranks to labels and assets, loadable from TOML (`tiles` module)
//! - Terminal key mapping and rendering (`input`, `display` modules)
//!
//! Quick start:
//! ```
//! use nexus_2048::engine::{Board, Move};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic board initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let b0 = Board::initial(&mut rng);
//! let (b1, moved) = b0.apply_move(Move::Left);
//! if moved {
//!     let b2 = b1.with_random_tile(&mut rng);
//!     assert_eq!(b2.count_empty(), b1.count_empty() - 1);
//! } else {
//!     assert_eq!(b1, b0);
//! }
//! ```
//!
//! Note: For convenience, there are also free functions mirroring the `Board` methods
//! (e.g., `engine::shift`, `engine::make_move`) that use thread-local RNG where relevant.
//! Prefer the methods when you need determinism.
//!
pub mod display;
pub mod engine;
pub mod game;
pub mod input;
pub mod tiles;
