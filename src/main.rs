//! Perfect Tic-Tac-Toe - CLI entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use perfect_tictactoe::{AppConfig, SearchEngine};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(format) = cli.format {
        config = config.with_format(format);
    }
    initialize_tracing(&config);

    let engine = SearchEngine::new();
    match cli.command {
        Command::Analyze { board, depth } => {
            let analysis = perfect_tictactoe::analyze(&engine, &board, depth)?;
            print!("{}", analysis.render(&config)?);
        }
        Command::BestMove { board, depth } => {
            let reply = perfect_tictactoe::best_move(&engine, &board, depth)?;
            print!("{}", reply.render(&config)?);
        }
        Command::Play { engine: engine_player } => {
            if let Some(player) = engine_player {
                config = config.with_engine_player(player);
            }
            let stdin = std::io::stdin();
            let games = perfect_tictactoe::play(&config, stdin.lock(), std::io::stdout())?;
            info!(games, "Goodbye");
        }
    }

    Ok(())
}

/// Logs to stderr so stdout stays clean for results.
#[instrument(skip(config))]
fn initialize_tracing(config: &AppConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Tracing initialized");
}
