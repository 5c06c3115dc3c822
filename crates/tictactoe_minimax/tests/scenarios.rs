//! End-to-end scenarios for the decision engine.

use tictactoe_minimax::{Board, EngineError, Outcome, Player, SearchEngine};

#[test]
fn test_centre_opening_gets_corner_reply() {
    let engine = SearchEngine::new();
    let board = Board::new().apply_move(4, Player::X).unwrap();

    let reply = engine.best_move(&board, 1).unwrap();
    assert!([0, 2, 6, 8].contains(&reply), "got {}", reply);
    assert_eq!(engine.minimax(&Board::new(), 0), 0);
    assert_eq!(engine.minimax(&board, 1), 0);
}

#[test]
fn test_tie_break_blocks_diagonal_at_eight() {
    let board: Board = "X___X____".parse().unwrap();
    assert_eq!(SearchEngine::new().best_move(&board, 1), Ok(8));
}

#[test]
fn test_first_player_completes_row() {
    let engine = SearchEngine::new();
    let board: Board = "XX_OO____".parse().unwrap();

    let choice = engine.analyze(&board, board.ply()).unwrap();
    assert_eq!(choice.index, 2);

    let after = board.apply_move(choice.index, Player::X).unwrap();
    assert_eq!(after.outcome(), Outcome::Won(Player::X));
    assert!(engine.evaluate_terminal(&after, 5) > 0);
}

#[test]
fn test_full_board_without_line_is_draw() {
    let board: Board = "XOXXOOOXX".parse().unwrap();
    assert_eq!(board.outcome(), Outcome::Draw);
    assert!(board.is_terminal());
    assert_eq!(SearchEngine::new().evaluate_terminal(&board, 9), 0);
    assert_eq!(
        SearchEngine::new().best_move(&board, 9),
        Err(EngineError::NoLegalMove)
    );
}

#[test]
fn test_engine_never_loses_as_o() {
    // X tries every line of play; O always answers with the engine's move.
    fn explore(engine: &SearchEngine, board: Board) {
        if board.is_terminal() {
            assert_ne!(board.outcome(), Outcome::Won(Player::X), "O lost on\n{}", board);
            return;
        }
        for index in board.legal_moves() {
            let after_x = board.apply_move(index, Player::X).unwrap();
            if after_x.is_terminal() {
                explore(engine, after_x);
                continue;
            }
            let reply = engine.best_move(&after_x, after_x.ply()).unwrap();
            explore(engine, after_x.apply_move(reply, Player::O).unwrap());
        }
    }

    explore(&SearchEngine::new(), Board::new());
}
