//! Tests for the analysis commands and the interactive loop.

use perfect_tictactoe::{
    AppConfig, Board, OutputFormat, Outcome, SearchEngine, SearchResult,
    TicTacToePlayer as Player,
};
use std::io::Cursor;

fn board(s: &str) -> Board {
    s.parse().unwrap()
}

#[test]
fn test_analyze_open_position() {
    let engine = SearchEngine::new();
    let analysis = perfect_tictactoe::analyze(&engine, &board("XX_OO____"), None).unwrap();

    assert_eq!(*analysis.depth(), 4);
    assert_eq!(*analysis.to_move(), Player::X);
    assert_eq!(*analysis.outcome(), Outcome::InProgress);
    assert_eq!(*analysis.best(), Some(SearchResult::new(2, 5)));
}

#[test]
fn test_analyze_finished_position() {
    let engine = SearchEngine::new();
    let analysis = perfect_tictactoe::analyze(&engine, &board("XOXXOOOXX"), None).unwrap();

    assert!(*analysis.terminal());
    assert_eq!(*analysis.outcome(), Outcome::Draw);
    assert_eq!(*analysis.best(), None);

    let text = analysis.render(&AppConfig::default()).unwrap();
    assert!(text.contains("It's a draw!"));
}

#[test]
fn test_best_move_with_explicit_depth() {
    let engine = SearchEngine::new();
    let reply = perfect_tictactoe::best_move(&engine, &board("X___X____"), Some(1)).unwrap();
    assert_eq!(reply.best().index, 8);
}

#[test]
fn test_best_move_on_full_board_fails() {
    let engine = SearchEngine::new();
    assert!(perfect_tictactoe::best_move(&engine, &board("XOXXOOOXX"), None).is_err());
}

#[test]
fn test_json_rendering() {
    let engine = SearchEngine::new();
    let config = AppConfig::default().with_format(OutputFormat::Json);
    let reply = perfect_tictactoe::best_move(&engine, &board("____X____"), None).unwrap();

    let json: serde_json::Value = serde_json::from_str(&reply.render(&config).unwrap()).unwrap();
    assert_eq!(json["best"]["index"], 0);
    assert_eq!(json["best"]["score"], 0);
    assert_eq!(json["depth"], 1);
}

#[test]
fn test_text_rendering_shows_label_and_score() {
    let engine = SearchEngine::new();
    let reply = perfect_tictactoe::best_move(&engine, &board("____X____"), None).unwrap();
    let text = reply.render(&AppConfig::default()).unwrap();
    assert!(text.contains("Best move for O: 0 (Top-left), score 0"));
}

#[test]
fn test_play_loop_completes_a_game() {
    // X: 0, O: 4; X: 1, O: 2; X: 8, O: 6 wins.
    let input = Cursor::new("0\n1\ntaken?\n1\n8\nquit\n");
    let mut output = Vec::new();

    let games = perfect_tictactoe::play(&AppConfig::default(), input, &mut output).unwrap();
    let text = String::from_utf8(output).unwrap();

    assert_eq!(games, 1);
    assert!(text.contains("Unknown square: taken?"));
    assert!(text.contains("Top-center is taken"));
    assert!(text.contains(
        "Open squares: 3 (Middle-left), 5 (Middle-right), 6 (Bottom-left), 7 (Bottom-center), 8 (Bottom-right)"
    ));
    assert!(text.contains("O wins!"));
    assert!(text.contains("New game."));
}

#[test]
fn test_play_loop_engine_opens_as_x() {
    let config = AppConfig::default().with_engine_player(Player::X);
    let mut output = Vec::new();

    let games = perfect_tictactoe::play(&config, Cursor::new("quit\n"), &mut output).unwrap();
    let text = String::from_utf8(output).unwrap();

    assert_eq!(games, 0);
    assert!(text.contains("You are O."));
    assert!(text.contains("Engine plays 0 (Top-left)"));
}
