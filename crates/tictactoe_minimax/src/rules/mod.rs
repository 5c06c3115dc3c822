//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating board state
//! according to tic-tac-toe rules. Rules are separated from board
//! storage; the search calls them directly on its scratch board.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{WINNING_LINES, check_winner, has_won};

use super::{Board, Outcome};

/// Classifies a board as won, drawn, or still in progress.
///
/// A completed line takes precedence over a full board.
pub fn outcome(board: &Board) -> Outcome {
    match check_winner(board) {
        Some(player) => Outcome::Won(player),
        None if is_full(board) => Outcome::Draw,
        None => Outcome::InProgress,
    }
}

/// Checks whether the game is over: a line is complete or no square is empty.
pub fn is_terminal(board: &Board) -> bool {
    is_full(board) || check_winner(board).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;

    #[test]
    fn test_outcome_in_progress() {
        assert_eq!(outcome(&Board::new()), Outcome::InProgress);
        assert!(!is_terminal(&Board::new()));
    }

    #[test]
    fn test_outcome_win_before_full() {
        let board: Board = "XXXOO____".parse().unwrap();
        assert_eq!(outcome(&board), Outcome::Won(Player::X));
        assert!(is_terminal(&board));
    }

    #[test]
    fn test_outcome_win_on_full_board() {
        let board: Board = "XOXOXOXOX".parse().unwrap();
        assert_eq!(outcome(&board), Outcome::Won(Player::X));
    }

    #[test]
    fn test_outcome_draw() {
        let board: Board = "XOXXOOOXX".parse().unwrap();
        assert_eq!(outcome(&board), Outcome::Draw);
        assert!(is_terminal(&board));
    }
}
