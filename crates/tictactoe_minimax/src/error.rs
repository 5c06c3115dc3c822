//! Error types for board construction and search.

use derive_more::{Display, Error};
use tracing::instrument;

/// Precondition violations reported by the engine.
///
/// Both variants mean the caller asked for something the rules forbid. They
/// are never retried internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// The cell is already occupied or the index is outside 0-8.
    #[display("Cell {} is occupied or out of range", index)]
    InvalidMove {
        /// The rejected cell index.
        index: usize,
    },

    /// A move was requested on a board with no empty cells.
    #[display("No legal move: every cell is occupied")]
    NoLegalMove,
}

/// A text board that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Board parse error: {} at {}:{}", message, file, line)]
pub struct BoardParseError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl BoardParseError {
    /// Creates a new parse error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
