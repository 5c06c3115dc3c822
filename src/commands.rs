//! Command implementations shared by the binary and the tests.

use crate::config::{AppConfig, OutputFormat};
use crate::session::{GameSession, SessionError, TurnReport};
use anyhow::Result;
use derive_getters::Getters;
use serde::Serialize;
use std::io::{BufRead, Write};
use tictactoe_minimax::{Board, Outcome, Player, Position, SearchEngine, SearchResult};
use tracing::{debug, info, instrument, warn};

/// Result of `analyze`: the outcome and, for open games, the side to move's
/// best square.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct Analysis {
    board: Board,
    depth: u32,
    to_move: Player,
    outcome: Outcome,
    terminal: bool,
    best: Option<SearchResult>,
}

/// Result of `best-move`: O's reply.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct Reply {
    board: Board,
    depth: u32,
    best: SearchResult,
}

/// Analyzes a board for whichever side moves at `depth` (default: the ply).
#[instrument(skip(engine, board), fields(ply = board.ply()))]
pub fn analyze(engine: &SearchEngine, board: &Board, depth: Option<u32>) -> Result<Analysis> {
    if !board.is_consistent() {
        debug!("Searching a position that cannot arise in play");
    }
    let depth = depth.unwrap_or_else(|| board.ply());
    let outcome = board.outcome();
    let terminal = board.is_terminal();

    let best = if terminal {
        None
    } else {
        Some(engine.analyze(board, depth)?)
    };

    info!(%outcome, depth, "Analysis complete");
    Ok(Analysis {
        board: *board,
        depth,
        to_move: Player::for_depth(depth),
        outcome,
        terminal,
        best,
    })
}

/// Finds O's best reply at `depth` (default: the ply).
#[instrument(skip(engine, board), fields(ply = board.ply()))]
pub fn best_move(engine: &SearchEngine, board: &Board, depth: Option<u32>) -> Result<Reply> {
    if !board.is_consistent() {
        debug!("Searching a position that cannot arise in play");
    }
    let depth = depth.unwrap_or_else(|| board.ply());
    let best = engine.best_reply(board, depth)?;
    Ok(Reply {
        board: *board,
        depth,
        best,
    })
}

/// Formats a chosen square with its label and, optionally, its score.
fn describe(result: &SearchResult, show_scores: bool) -> String {
    let label = Position::from_index(result.index)
        .map(|pos| pos.label())
        .unwrap_or("?");
    if show_scores {
        format!("{} ({}), score {}", result.index, label, result.score)
    } else {
        format!("{} ({})", result.index, label)
    }
}

impl Analysis {
    /// Renders the analysis in the configured format.
    pub fn render(&self, config: &AppConfig) -> Result<String> {
        if *config.format() == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(self)?);
        }

        let mut out = format!("{}\n\n", self.board);
        out.push_str(&format!("Outcome: {}\n", self.outcome));
        out.push_str(&format!("Terminal: {}\n", self.terminal));
        if let Some(best) = &self.best {
            out.push_str(&format!(
                "Best move for {}: {}\n",
                self.to_move,
                describe(best, *config.show_scores())
            ));
        }
        Ok(out)
    }
}

impl Reply {
    /// Renders the reply in the configured format.
    pub fn render(&self, config: &AppConfig) -> Result<String> {
        if *config.format() == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(self)?);
        }
        Ok(format!(
            "{}\n\nBest move for O: {}\n",
            self.board,
            describe(&self.best, *config.show_scores())
        ))
    }
}

/// Runs an interactive game over line-based input.
///
/// Each line is a square (index or label), `reset`, or `quit`. Finished games
/// are announced and a fresh board starts, as in the browser game. Returns
/// the number of completed games.
#[instrument(skip_all, fields(engine = %config.engine_player()))]
pub fn play<R: BufRead, W: Write>(config: &AppConfig, input: R, mut output: W) -> Result<usize> {
    let mut session = GameSession::new(*config.engine_player());
    let mut completed = 0;

    info!("Starting interactive game");
    writeln!(
        output,
        "You are {}. Enter a square (0-8 or a name like \"top left\"), \"reset\" or \"quit\".",
        session.human_player()
    )?;
    if session.is_engine_turn() {
        let report = session.engine_turn()?;
        announce(&mut output, &report, config)?;
    }
    writeln!(output, "{}", session.board().display_numbered())?;

    for line in input.lines() {
        let line = line?;
        let command = line.trim();
        match command.to_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" => break,
            "reset" => {
                session.reset();
                start_game(&mut session, &mut output, config)?;
                continue;
            }
            _ => {}
        }

        let Some(position) = Position::from_label_or_number(command) else {
            writeln!(output, "Unknown square: {}", command)?;
            continue;
        };

        let report = match session.play(position.to_index()) {
            Ok(report) => report,
            Err(SessionError::Engine(err)) => {
                debug!(%err, "Move rejected");
                writeln!(output, "{} is taken, pick another square.", position)?;
                let open: Vec<String> = Position::valid_moves(session.board())
                    .iter()
                    .map(|pos| format!("{} ({})", pos.to_index(), pos))
                    .collect();
                writeln!(output, "Open squares: {}", open.join(", "))?;
                continue;
            }
            Err(err) => {
                warn!(%err, "Unexpected session state");
                return Err(err.into());
            }
        };

        announce(&mut output, &report, config)?;
        if report.outcome().is_terminal() {
            writeln!(output, "{}\n", report.board())?;
            writeln!(output, "{}", report.outcome())?;
            completed += 1;
            session.reset();
            start_game(&mut session, &mut output, config)?;
        } else {
            writeln!(output, "{}", session.board().display_numbered())?;
        }
    }

    info!(completed, "Interactive game finished");
    Ok(completed)
}

fn start_game<W: Write>(session: &mut GameSession, output: &mut W, config: &AppConfig) -> Result<()> {
    writeln!(output, "New game.")?;
    if session.is_engine_turn() {
        let report = session.engine_turn()?;
        announce(output, &report, config)?;
    }
    writeln!(output, "{}", session.board().display_numbered())?;
    Ok(())
}

fn announce<W: Write>(output: &mut W, report: &TurnReport, config: &AppConfig) -> Result<()> {
    if let Some(reply) = report.engine_move() {
        writeln!(output, "Engine plays {}", describe(reply, *config.show_scores()))?;
    }
    Ok(())
}
