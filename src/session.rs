//! Human-versus-engine game sessions.
//!
//! A session owns the board of one game and sequences turns: the human's
//! mark, a terminal check, the engine's reply, another terminal check. The
//! engine searches from the current game ply, so O's replies are always
//! searched at odd depths.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::Serialize;
use tictactoe_minimax::{Board, EngineError, Outcome, Player, SearchEngine, SearchResult};
use tracing::{debug, info, instrument};

/// Errors returned by [`GameSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// The engine rejected the request.
    #[display("{}", _0)]
    Engine(EngineError),

    /// The game has finished; reset before playing again.
    #[display("Game is already over: {}", outcome)]
    GameOver {
        /// How the game ended.
        outcome: Outcome,
    },

    /// The engine moves next.
    #[display("It's the engine's turn")]
    EngineToMove,
}

impl From<EngineError> for SessionError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

/// What happened during one call to [`GameSession::play`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, new)]
pub struct TurnReport {
    /// Square the human marked, if any.
    human_move: Option<usize>,
    /// The engine's reply, if the game was still open.
    engine_move: Option<SearchResult>,
    /// Board after the turn.
    board: Board,
    /// Status after the turn.
    outcome: Outcome,
}

/// One game between a human and the engine.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    engine: SearchEngine,
    engine_player: Player,
    history: Vec<usize>,
}

impl GameSession {
    /// Creates a session with an empty board.
    ///
    /// When the engine plays X it moves first; call
    /// [`GameSession::engine_turn`] before the human's first move.
    #[instrument]
    pub fn new(engine_player: Player) -> Self {
        Self {
            board: Board::new(),
            engine: SearchEngine::new(),
            engine_player,
            history: Vec::new(),
        }
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the squares played so far, in order.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Returns the engine's mark.
    pub fn engine_player(&self) -> Player {
        self.engine_player
    }

    /// Returns the human's mark.
    pub fn human_player(&self) -> Player {
        self.engine_player.opponent()
    }

    /// Returns the current status of the game.
    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    /// Checks whether the engine moves next in an unfinished game.
    pub fn is_engine_turn(&self) -> bool {
        !self.board.is_terminal() && self.board.to_move() == self.engine_player
    }

    /// Plays the human's mark at `index`, then the engine's reply.
    ///
    /// Nothing changes if the move is rejected.
    ///
    /// # Errors
    ///
    /// - [`SessionError::GameOver`] if the game has finished
    /// - [`SessionError::EngineToMove`] if the human is not to move
    /// - [`SessionError::Engine`] with [`EngineError::InvalidMove`] for an
    ///   occupied or out-of-range square
    #[instrument(skip(self), fields(ply = self.board.ply()))]
    pub fn play(&mut self, index: usize) -> Result<TurnReport, SessionError> {
        self.ensure_open()?;
        if self.board.to_move() == self.engine_player {
            return Err(SessionError::EngineToMove);
        }

        self.board = self.board.apply_move(index, self.human_player())?;
        self.history.push(index);
        debug!(index, player = %self.human_player(), "Human moved");

        let engine_move = if self.board.is_terminal() {
            None
        } else {
            Some(self.reply()?)
        };

        let outcome = self.board.outcome();
        if outcome.is_terminal() {
            info!(%outcome, moves = self.history.len(), "Game over");
        }
        Ok(TurnReport::new(Some(index), engine_move, self.board, outcome))
    }

    /// Lets the engine move when it is its turn, as when it opens as X.
    ///
    /// # Errors
    ///
    /// - [`SessionError::GameOver`] if the game has finished
    /// - [`SessionError::Engine`] if the engine cannot move
    #[instrument(skip(self), fields(ply = self.board.ply()))]
    pub fn engine_turn(&mut self) -> Result<TurnReport, SessionError> {
        self.ensure_open()?;
        let engine_move = if self.board.to_move() == self.engine_player {
            Some(self.reply()?)
        } else {
            None
        };
        Ok(TurnReport::new(None, engine_move, self.board, self.board.outcome()))
    }

    /// Clears the board for a new game.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!(moves = self.history.len(), "Resetting session");
        self.board = Board::new();
        self.history.clear();
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        let outcome = self.board.outcome();
        if outcome.is_terminal() {
            return Err(SessionError::GameOver { outcome });
        }
        Ok(())
    }

    fn reply(&mut self) -> Result<SearchResult, SessionError> {
        let depth = self.board.ply();
        let result = match self.engine_player {
            Player::O => self.engine.best_reply(&self.board, depth)?,
            Player::X => self.engine.analyze(&self.board, depth)?,
        };
        self.board = self.board.apply_move(result.index, self.engine_player)?;
        self.history.push(result.index);
        debug!(index = result.index, score = result.score, player = %self.engine_player, "Engine moved");
        Ok(result)
    }
}
