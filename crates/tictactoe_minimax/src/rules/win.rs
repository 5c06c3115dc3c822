//! Win detection logic for tic-tac-toe.

use super::super::{Board, Player, Square};

/// Winning lines as board indices: rows, columns, then diagonals.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` for the owner of the first complete line in
/// [`WINNING_LINES`] order, `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Player> {
    let squares = board.squares();

    for [a, b, c] in WINNING_LINES {
        let sq = squares[a];
        if sq != Square::Empty && sq == squares[b] && sq == squares[c] {
            return match sq {
                Square::Occupied(player) => Some(player),
                Square::Empty => None,
            };
        }
    }

    None
}

/// Checks if the given player holds at least one complete line.
pub fn has_won(board: &Board, player: Player) -> bool {
    let target = Square::Occupied(player);
    let squares = board.squares();
    WINNING_LINES
        .iter()
        .any(|line| line.iter().all(|&idx| squares[idx] == target))
}
