//! Core domain types for tic-tac-toe.

use super::error::{BoardParseError, EngineError};
use super::rules;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{instrument, warn};

/// Number of cells on the board.
pub const BOARD_SIZE: usize = 9;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Player X (goes first, maximizing).
    X,
    /// Player O (goes second, minimizing).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Returns the player who moves at the given ply or search depth.
    ///
    /// Even values belong to X, odd values to O.
    pub fn for_depth(depth: u32) -> Self {
        if depth % 2 == 0 { Player::X } else { Player::O }
    }

    /// Returns the mark as a character.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Player {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Player::X),
            "O" | "o" => Ok(Player::O),
            other => Err(BoardParseError::new(format!("Unknown player: {}", other))),
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the character used in the text board format.
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => '_',
            Square::Occupied(player) => player.symbol(),
        }
    }

    /// Parses a single board character.
    ///
    /// `_`, `.` and `-` are empty squares; `X` and `O` in either case are marks.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '_' | '.' | '-' => Some(Square::Empty),
            'X' | 'x' => Some(Square::Occupied(Player::X)),
            'O' | 'o' => Some(Square::Occupied(Player::O)),
            _ => None,
        }
    }
}

/// Game-theoretic status of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A player completed a line.
    Won(Player),
    /// The board is full with no completed line.
    Draw,
    /// No line is complete and empty cells remain.
    InProgress,
}

impl Outcome {
    /// Returns true for wins and draws.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winning player, if any.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Won(player) => Some(player),
            Outcome::Draw | Outcome::InProgress => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Won(player) => write!(f, "{} wins!", player),
            Outcome::Draw => write!(f, "It's a draw!"),
            Outcome::InProgress => write!(f, "Game in progress"),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Boards are small `Copy` values. [`Board::apply_move`] returns
/// a new board and leaves its receiver untouched. Boards serialize as their
/// nine squares; the ply is recomputed on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[Square; BOARD_SIZE]", into = "[Square; BOARD_SIZE]")]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; BOARD_SIZE],
    /// Number of occupied squares.
    ply: u32,
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; BOARD_SIZE],
            ply: 0,
        }
    }

    /// Builds a board from nine squares.
    ///
    /// The ply is the number of occupied squares. Mark counts are not
    /// balanced against each other; see [`Board::is_consistent`].
    #[instrument]
    pub fn from_squares(squares: [Square; BOARD_SIZE]) -> Self {
        let ply = squares.iter().filter(|s| **s != Square::Empty).count() as u32;
        Self { squares, ply }
    }

    /// Gets the square at the given position (0-8).
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Checks if a square is empty. Out-of-range positions are not empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; BOARD_SIZE] {
        &self.squares
    }

    /// Returns the number of marks placed so far.
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Returns the player whose turn it is, derived from the ply.
    pub fn to_move(&self) -> Player {
        Player::for_depth(self.ply)
    }

    /// Counts the marks of one player.
    fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Checks that X has the same number of marks as O, or one more.
    #[instrument(skip(self))]
    pub fn is_consistent(&self) -> bool {
        let x_count = self.count(Player::X);
        let o_count = self.count(Player::O);

        let valid = x_count == o_count || x_count == o_count + 1;
        if !valid {
            warn!(x_count, o_count, "Board mark counts are unbalanced");
        }
        valid
    }

    /// Returns every empty position in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..BOARD_SIZE).filter(|&pos| self.is_empty(pos)).collect()
    }

    /// Returns a copy of the board with `player`'s mark at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidMove`] if `pos` is out of range or
    /// already occupied.
    #[instrument(skip(self), fields(ply = self.ply))]
    pub fn apply_move(&self, pos: usize, player: Player) -> Result<Self, EngineError> {
        if !self.is_empty(pos) {
            return Err(EngineError::InvalidMove { index: pos });
        }

        let mut next = *self;
        next.place(pos, player);
        Ok(next)
    }

    /// Places a mark on an empty square in place.
    pub(crate) fn place(&mut self, pos: usize, player: Player) {
        self.squares[pos] = Square::Occupied(player);
        self.ply += 1;
    }

    /// Clears a square previously filled by [`Board::place`].
    pub(crate) fn clear(&mut self, pos: usize) {
        self.squares[pos] = Square::Empty;
        self.ply -= 1;
    }

    /// Returns the player holding a complete line, if any.
    pub fn winner(&self) -> Option<Player> {
        rules::check_winner(self)
    }

    /// Returns the outcome of the position.
    pub fn outcome(&self) -> Outcome {
        rules::outcome(self)
    }

    /// Checks whether the board is full or has a complete line.
    pub fn is_terminal(&self) -> bool {
        rules::is_terminal(self)
    }

    /// Checks if the board is full.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Formats the board with empty squares labelled by their index.
    pub fn display_numbered(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos as u8 + b'0') as char,
                    Square::Occupied(player) => player.symbol(),
                };
                result.push(symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[Square; BOARD_SIZE]> for Board {
    fn from(squares: [Square; BOARD_SIZE]) -> Self {
        Self::from_squares(squares)
    }
}

impl From<Board> for [Square; BOARD_SIZE] {
    fn from(board: Board) -> Self {
        board.squares
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.squares.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            let line = cells
                .iter()
                .map(|s| s.symbol().to_string())
                .collect::<Vec<_>>()
                .join("|");
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses nine cell characters, ignoring whitespace, `|`, `/` and `,`.
    ///
    /// Empty cells are `_`, `.` or `-`. `XX_OO____`, `XX-OO----`,
    /// `xx./oo./...` and the multi-line [`Display`](fmt::Display) form all
    /// describe boards.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut squares = [Square::Empty; BOARD_SIZE];
        let mut filled = 0;

        for c in s.chars() {
            if c.is_whitespace() || matches!(c, '|' | '/' | ',') {
                continue;
            }
            let square = Square::from_symbol(c)
                .ok_or_else(|| BoardParseError::new(format!("Invalid cell character: {:?}", c)))?;
            if filled == BOARD_SIZE {
                return Err(BoardParseError::new("Board has more than 9 cells"));
            }
            squares[filled] = square;
            filled += 1;
        }

        if filled != BOARD_SIZE {
            return Err(BoardParseError::new(format!(
                "Board has {} cells, expected 9",
                filled
            )));
        }

        Ok(Self::from_squares(squares))
    }
}
