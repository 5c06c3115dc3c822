//! Tic-tac-toe rules and perfect-play search.
//!
//! This crate is pure game logic: no I/O and no shared state. Callers build a
//! [`Board`], ask it whether the game is over, and ask the [`SearchEngine`]
//! for the move that guarantees the best outcome under optimal counterplay.
//!
//! # Example
//!
//! ```
//! use tictactoe_minimax::{Board, Outcome, Player, SearchEngine};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let board = Board::new().apply_move(4, Player::X)?;
//! let engine = SearchEngine::new();
//!
//! let reply = engine.best_move(&board, board.ply())?;
//! assert!([0, 2, 6, 8].contains(&reply));
//! assert_eq!(board.outcome(), Outcome::InProgress);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod position;
pub mod rules;
mod search;
mod types;

pub use error::{BoardParseError, EngineError};
pub use position::Position;
pub use search::{SearchEngine, SearchResult, DRAW_SCORE, WIN_SCORE};
pub use types::{Board, Outcome, Player, Square, BOARD_SIZE};
