//! Command-line interface for perfect_tictactoe.

use clap::{Parser, Subcommand};
use perfect_tictactoe::{Board, OutputFormat, TicTacToePlayer as Player};
use std::path::PathBuf;

/// Perfect Tic-Tac-Toe - exhaustive minimax analysis and play
#[derive(Parser, Debug)]
#[command(name = "perfect_tictactoe")]
#[command(about = "Perfect-play tic-tac-toe engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report the outcome and the best move for the side to move
    Analyze {
        /// Nine cells of X, O and _ (row-major), e.g. "XX_OO____"
        board: Board,

        /// Search start depth, 0-9; its parity picks the side to move (default: ply)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=9))]
        depth: Option<u32>,
    },

    /// Find O's best reply
    BestMove {
        /// Nine cells of X, O and _ (row-major), e.g. "X___X____"
        board: Board,

        /// Search start depth, 0-9 (default: ply)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=9))]
        depth: Option<u32>,
    },

    /// Play against the engine on the terminal
    Play {
        /// Mark the engine plays (overrides the config file)
        #[arg(long)]
        engine: Option<Player>,
    },
}
