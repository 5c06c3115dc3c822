//! Exhaustive minimax search.
//!
//! X maximizes and O minimizes. Terminal positions score `10 - depth` for an
//! X win, `depth - 10` for an O win and `0` for a draw, where `depth` counts
//! from whatever depth the caller hands to the top-level query. Faster wins
//! and slower losses therefore score better for the side that gets them.
//!
//! The search is full width: no pruning and no transposition table. Moves are
//! always tried in ascending index order, so among equally scored moves the
//! lowest index is chosen.

use super::rules;
use super::{Board, BOARD_SIZE, EngineError, Outcome, Player};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

/// Score of an immediate win, before the depth penalty.
pub const WIN_SCORE: i32 = 10;

/// Score of a drawn position.
pub const DRAW_SCORE: i32 = 0;

/// Starting value for the maximizer, below every reachable score.
const SCORE_FLOOR: i32 = -20;

/// Starting value for the minimizer, above every reachable score.
const SCORE_CEILING: i32 = 20;

/// A chosen move and the score it guarantees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct SearchResult {
    /// Board index (0-8) of the chosen empty square.
    pub index: usize,
    /// Minimax score reached by playing `index`.
    pub score: i32,
}

/// Perfect-play search over tic-tac-toe positions.
///
/// The engine holds no state. Every query copies the caller's board into a
/// scratch buffer owned by that query, so concurrent queries on different
/// boards need no synchronization and the caller's board is never modified.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchEngine;

impl SearchEngine {
    /// Creates a new engine.
    pub fn new() -> Self {
        Self
    }

    /// Scores a finished position reached at `depth`.
    ///
    /// Meant for terminal boards only. A board that is still in progress
    /// scores as a draw, is logged at `warn`, and trips a debug assertion.
    #[instrument(skip(self, board), fields(ply = board.ply()))]
    pub fn evaluate_terminal(&self, board: &Board, depth: u32) -> i32 {
        let outcome = rules::outcome(board);
        if !outcome.is_terminal() {
            warn!(depth, "Scoring a position that is still in progress");
        }
        debug_assert!(outcome.is_terminal(), "evaluate_terminal on an open board");
        score_outcome(outcome, depth)
    }

    /// Returns the minimax value of `board` when the side given by the parity
    /// of `depth` moves next (even: X, odd: O).
    #[instrument(skip(self, board), fields(ply = board.ply()))]
    pub fn minimax(&self, board: &Board, depth: u32) -> i32 {
        let mut search = Search::new(*board);
        let score = search.minimax(depth);
        debug!(score, nodes = search.nodes, "Minimax complete");
        score
    }

    /// Returns the best square for O, the automated player.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoLegalMove`] if the board has no empty square.
    pub fn best_move(&self, board: &Board, depth: u32) -> Result<usize, EngineError> {
        self.best_reply(board, depth).map(|result| result.index)
    }

    /// Returns O's best square together with the score it guarantees.
    ///
    /// Each candidate is scored with [`SearchEngine::minimax`] at
    /// `depth + 1`. The first candidate with the lowest score wins.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoLegalMove`] if the board has no empty square.
    #[instrument(skip(self, board), fields(ply = board.ply()))]
    pub fn best_reply(&self, board: &Board, depth: u32) -> Result<SearchResult, EngineError> {
        self.search_root(board, depth, Player::O)
    }

    /// Returns the best square for whichever side moves at `depth`.
    ///
    /// On odd depths this is exactly [`SearchEngine::best_reply`]. On even
    /// depths X picks the first candidate with the highest score.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoLegalMove`] if the board has no empty square.
    #[instrument(skip(self, board), fields(ply = board.ply()))]
    pub fn analyze(&self, board: &Board, depth: u32) -> Result<SearchResult, EngineError> {
        self.search_root(board, depth, Player::for_depth(depth))
    }

    fn search_root(
        &self,
        board: &Board,
        depth: u32,
        player: Player,
    ) -> Result<SearchResult, EngineError> {
        let mut search = Search::new(*board);
        let mut best: Option<SearchResult> = None;

        for index in board.legal_moves() {
            search.board.place(index, player);
            let score = search.minimax(depth.saturating_add(1));
            search.board.clear(index);
            trace!(index, score, "Candidate scored");

            let improves = match best {
                None => true,
                Some(current) => match player {
                    Player::X => score > current.score,
                    Player::O => score < current.score,
                },
            };
            if improves {
                best = Some(SearchResult::new(index, score));
            }
        }

        let result = best.ok_or(EngineError::NoLegalMove)?;
        debug!(
            player = %player,
            index = result.index,
            score = result.score,
            nodes = search.nodes,
            "Search complete"
        );
        Ok(result)
    }
}

/// Converts a terminal outcome into a depth-adjusted score.
///
/// Depths past `i32::MAX` saturate rather than wrap.
fn score_outcome(outcome: Outcome, depth: u32) -> i32 {
    let depth = i32::try_from(depth).unwrap_or(i32::MAX);
    match outcome {
        Outcome::Won(Player::X) => WIN_SCORE.saturating_sub(depth),
        Outcome::Won(Player::O) => depth.saturating_sub(WIN_SCORE),
        Outcome::Draw | Outcome::InProgress => DRAW_SCORE,
    }
}

/// Scratch state for one top-level query.
struct Search {
    board: Board,
    nodes: u64,
}

impl Search {
    fn new(board: Board) -> Self {
        Self { board, nodes: 0 }
    }

    // Leaves `self.board` exactly as it found it.
    fn minimax(&mut self, depth: u32) -> i32 {
        self.nodes += 1;

        let outcome = rules::outcome(&self.board);
        if outcome.is_terminal() {
            return score_outcome(outcome, depth);
        }

        let player = Player::for_depth(depth);
        let mut best = match player {
            Player::X => SCORE_FLOOR,
            Player::O => SCORE_CEILING,
        };

        for index in 0..BOARD_SIZE {
            if !self.board.is_empty(index) {
                continue;
            }
            self.board.place(index, player);
            let score = self.minimax(depth.saturating_add(1));
            self.board.clear(index);

            best = match player {
                Player::X => best.max(score),
                Player::O => best.min(score),
            };
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_evaluate_terminal_scores() {
        let engine = SearchEngine::new();
        assert_eq!(engine.evaluate_terminal(&board("XXXOO____"), 5), 5);
        assert_eq!(engine.evaluate_terminal(&board("OOOXX_X__"), 6), -4);
        assert_eq!(engine.evaluate_terminal(&board("XOXXOOOXX"), 9), 0);
    }

    #[test]
    fn test_evaluate_terminal_uses_relative_depth() {
        let engine = SearchEngine::new();
        let won = board("XXXOO____");
        assert_eq!(engine.evaluate_terminal(&won, 0), 10);
        assert_eq!(engine.evaluate_terminal(&won, 1), 9);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "evaluate_terminal on an open board")]
    fn test_evaluate_terminal_rejects_open_board() {
        SearchEngine::new().evaluate_terminal(&board("XX_OO____"), 4);
    }

    #[test]
    fn test_huge_depth_saturates_instead_of_overflowing() {
        let engine = SearchEngine::new();
        let open = board("XX_OO____");

        let reply = engine.best_reply(&open, u32::MAX).unwrap();
        assert!(open.is_empty(reply.index));
        let choice = engine.analyze(&open, u32::MAX - 1).unwrap();
        assert!(open.is_empty(choice.index));

        let won = board("XXXOO____");
        assert_eq!(engine.evaluate_terminal(&won, u32::MAX), WIN_SCORE - i32::MAX);
        assert_eq!(score_outcome(Outcome::Won(Player::O), u32::MAX), i32::MAX - WIN_SCORE);
    }

    #[test]
    fn test_minimax_empty_board_is_draw() {
        assert_eq!(SearchEngine::new().minimax(&Board::new(), 0), 0);
    }

    #[test]
    fn test_minimax_terminal_board_is_scored_directly() {
        let engine = SearchEngine::new();
        assert_eq!(engine.minimax(&board("XXXOO____"), 5), 5);
    }

    #[test]
    fn test_minimax_x_to_win_in_one() {
        // X completes the top row at depth 5.
        assert_eq!(SearchEngine::new().minimax(&board("XX_OO____"), 4), 5);
    }

    #[test]
    fn test_best_move_blocks_lowest_forced_square() {
        let result = SearchEngine::new()
            .best_reply(&board("X___X____"), 1)
            .unwrap();
        assert_eq!(result.index, 8);
        // X still forks after the block and wins at depth 5.
        assert_eq!(result.score, 5);
    }

    #[test]
    fn test_best_move_takes_immediate_win() {
        // O wins on the middle row rather than blocking.
        let index = SearchEngine::new()
            .best_move(&board("XX_OO_X__"), 5)
            .unwrap();
        assert_eq!(index, 5);
    }

    #[test]
    fn test_best_move_ties_go_to_lowest_index() {
        // Every corner reply to a centre opening draws; corner 0 comes first.
        let result = SearchEngine::new()
            .best_reply(&board("____X____"), 1)
            .unwrap();
        assert_eq!(result, SearchResult::new(0, 0));
    }

    #[test]
    fn test_best_move_full_board_errors() {
        assert_eq!(
            SearchEngine::new().best_move(&board("XOXXOOOXX"), 9),
            Err(EngineError::NoLegalMove)
        );
    }

    #[test]
    fn test_analyze_maximizes_on_even_depth() {
        let result = SearchEngine::new()
            .analyze(&board("XX_OO____"), 4)
            .unwrap();
        assert_eq!(result, SearchResult::new(2, 5));
    }

    #[test]
    fn test_analyze_matches_best_reply_on_odd_depth() {
        let engine = SearchEngine::new();
        let position = board("X___O___X");
        assert_eq!(
            engine.analyze(&position, 3).unwrap(),
            engine.best_reply(&position, 3).unwrap()
        );
    }
}
