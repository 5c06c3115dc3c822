//! Perfect-play tic-tac-toe
//!
//! Analysis commands and human-versus-engine sessions built on the
//! [`tictactoe_minimax`] search.
//!
//! # Architecture
//!
//! - **Config**: TOML settings for output and interactive play
//! - **Session**: turn sequencing between a human and the engine
//! - **Commands**: `analyze`, `best-move` and the interactive `play` loop
//!
//! # Example
//!
//! ```
//! use perfect_tictactoe::{GameSession, TicTacToePlayer as Player};
//!
//! # fn example() -> Result<(), perfect_tictactoe::SessionError> {
//! let mut session = GameSession::new(Player::O);
//! let report = session.play(4)?;
//! assert!(report.engine_move().is_some());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod commands;
mod config;
mod session;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, DEFAULT_CONFIG_PATH, OutputFormat};

// Crate-level exports - Sessions
pub use session::{GameSession, SessionError, TurnReport};

// Crate-level exports - Commands
pub use commands::{Analysis, Reply, analyze, best_move, play};

// Crate-level exports - Game types (tic-tac-toe)
pub use tictactoe_minimax::{
    Board, EngineError, Outcome, Player as TicTacToePlayer, Position, SearchEngine, SearchResult,
    Square,
};
