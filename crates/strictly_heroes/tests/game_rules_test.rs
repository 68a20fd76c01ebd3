//! Tests for the heroes grid turn controller.

use strictly_heroes::{
    Board, CharacterKind, Game, GameStatus, Move, MoveError, MoveOutcome, MoveToken, PieceId,
    Player, Position, Roster, Square,
};

fn roster(tokens: &[&str]) -> Roster {
    Roster::parse(tokens).expect("valid roster")
}

fn pawn(index: usize) -> PieceId {
    PieceId::new(index, CharacterKind::Pawn)
}

#[test]
fn test_initialize_places_rosters_on_home_rows() {
    let mut game = Game::new();
    let a = roster(&["P", "H1", "H2"]);
    let b = roster(&["H2", "P", "P", "H1", "P"]);
    let outcome = game.initialize(&a, &b);

    let state = game.state();
    assert!(matches!(
        outcome,
        MoveOutcome::Initialized {
            current_player: Player::A,
            ..
        }
    ));
    assert_eq!(state.current_player(), Player::A);
    assert!(!state.is_over());
    assert!(state.history().is_empty());

    let board = state.board();
    for (col, piece) in a.pieces().enumerate() {
        assert_eq!(
            board.get(Position::new(0, col as i32)),
            Some(Square::Occupied {
                owner: Player::A,
                piece
            })
        );
    }
    for (col, piece) in b.pieces().enumerate() {
        assert_eq!(
            board.get(Position::new(4, col as i32)),
            Some(Square::Occupied {
                owner: Player::B,
                piece
            })
        );
    }
    assert_eq!(board.count_pieces(Player::A), 3);
    assert_eq!(board.count_pieces(Player::B), 5);
    for row in 1..4 {
        for col in 0..5 {
            assert_eq!(board.get(Position::new(row, col)), Some(Square::Empty));
        }
    }
}

#[test]
fn test_initialize_resets_previous_game() {
    let mut game = Game::new();
    game.initialize(&roster(&["P"]), &roster(&["P"]));
    game.submit_move(Player::A, pawn(0), MoveToken::B);

    game.initialize(&roster(&["H1"]), &roster(&[]));
    let state = game.state();
    assert!(state.history().is_empty());
    assert_eq!(state.current_player(), Player::A);
    assert_eq!(state.board().count_pieces(Player::B), 0);
    assert_eq!(
        state.board().locate(Player::A, PieceId::new(0, CharacterKind::Hero1)),
        Some(Position::new(0, 0))
    );
}

#[test]
fn test_token_outside_profile_rejected_idempotently() {
    let mut game = Game::new();
    game.initialize(&roster(&["P", "H1", "H2"]), &roster(&["P"]));
    let before = game.state().clone();

    let cases = [
        (pawn(0), MoveToken::BR),
        (PieceId::new(1, CharacterKind::Hero1), MoveToken::FL),
        (PieceId::new(2, CharacterKind::Hero2), MoveToken::B),
    ];
    for (piece, token) in cases {
        for _ in 0..2 {
            assert_eq!(
                game.submit_move(Player::A, piece, token),
                MoveOutcome::Rejected {
                    reason: MoveError::InvalidMove
                }
            );
            assert_eq!(game.state(), &before);
        }
    }
}

#[test]
fn test_off_board_move_rejected() {
    let mut game = Game::new();
    game.initialize(&roster(&["P"]), &roster(&["P"]));
    let before = game.state().clone();

    // Forward from row 0 leaves the board.
    let outcome = game.submit_move(Player::A, pawn(0), MoveToken::F);
    assert_eq!(
        outcome,
        MoveOutcome::Rejected {
            reason: MoveError::InvalidMove
        }
    );
    assert_eq!(game.state(), &before);
}

#[test]
fn test_own_piece_blocks_destination() {
    let mut game = Game::new();
    game.initialize(&roster(&["P", "P"]), &roster(&["P"]));
    let before = game.state().clone();

    let outcome = game.submit_move(Player::A, pawn(0), MoveToken::R);
    assert_eq!(
        outcome,
        MoveOutcome::Rejected {
            reason: MoveError::InvalidMove
        }
    );
    assert_eq!(game.state(), &before);
}

#[test]
fn test_heroes_leap_over_pieces() {
    let mut game = Game::new();
    game.initialize(&roster(&["H1", "P"]), &roster(&["P"]));

    // H1 at (0,0) jumps right over the pawn at (0,1) to (0,2).
    let hero = PieceId::new(0, CharacterKind::Hero1);
    let outcome = game.submit_move(Player::A, hero, MoveToken::R);
    assert!(matches!(outcome, MoveOutcome::Updated { .. }));
    assert_eq!(game.state().board().locate(Player::A, hero), Some(Position::new(0, 2)));
}

#[test]
fn test_unknown_piece_rejected() {
    let mut game = Game::new();
    game.initialize(&roster(&["P"]), &roster(&["P"]));
    let before = game.state().clone();

    let outcome = game.submit_move(
        Player::A,
        PieceId::new(3, CharacterKind::Hero2),
        MoveToken::BR,
    );
    assert_eq!(
        outcome,
        MoveOutcome::Rejected {
            reason: MoveError::UnknownPiece
        }
    );
    assert_eq!(outcome_message(&outcome), "Character does not exist.");
    assert_eq!(game.state(), &before);
}

#[test]
fn test_cannot_move_opponent_piece() {
    let mut game = Game::new();
    game.initialize(&roster(&["P"]), &roster(&["H1"]));

    let outcome = game.submit_move(Player::A, PieceId::new(0, CharacterKind::Hero1), MoveToken::F);
    assert_eq!(
        outcome,
        MoveOutcome::Rejected {
            reason: MoveError::UnknownPiece
        }
    );
}

#[test]
fn test_turn_alternates_and_holds_after_rejection() {
    let mut game = Game::new();
    game.initialize(&roster(&["P"]), &roster(&["P"]));
    assert_eq!(game.state().current_player(), Player::A);

    game.submit_move(Player::A, pawn(0), MoveToken::B);
    assert_eq!(game.state().current_player(), Player::B);

    game.submit_move(Player::B, pawn(0), MoveToken::B);
    assert_eq!(game.state().current_player(), Player::B);

    game.submit_move(Player::B, pawn(0), MoveToken::F);
    assert_eq!(game.state().current_player(), Player::A);
    assert_eq!(game.state().history().len(), 2);
}

#[test]
fn test_capture_removes_opponent_and_continues() {
    let mut game = Game::new();
    game.initialize(&roster(&["H1"]), &roster(&["P", "P"]));
    let hero = PieceId::new(0, CharacterKind::Hero1);

    game.submit_move(Player::A, hero, MoveToken::B);
    let outcome = game.submit_move(Player::A, hero, MoveToken::B);

    match outcome {
        MoveOutcome::Updated {
            board,
            current_player,
            history,
        } => {
            assert_eq!(current_player, Player::B);
            assert_eq!(history.len(), 2);
            assert_eq!(board.count_pieces(Player::B), 1);
            assert_eq!(board.locate(Player::A, hero), Some(Position::new(4, 0)));
            assert_eq!(board.locate(Player::B, pawn(0)), None);
        }
        other => panic!("Expected update, got {:?}", other),
    }
}

#[test]
fn test_pawn_march_captures_and_wins() {
    let mut game = Game::new();
    game.initialize(&roster(&["P"]), &roster(&["P"]));

    for _ in 0..3 {
        assert!(matches!(
            game.submit_move(Player::A, pawn(0), MoveToken::B),
            MoveOutcome::Updated { .. }
        ));
    }
    let outcome = game.submit_move(Player::A, pawn(0), MoveToken::B);
    assert_eq!(outcome, MoveOutcome::GameOver { winner: Player::A });

    let state = game.state();
    assert!(state.is_over());
    assert_eq!(state.status(), GameStatus::Over { winner: Player::A });
    assert_eq!(state.board().count_pieces(Player::B), 0);
    assert_eq!(state.history().len(), 4);
}

#[test]
fn test_moves_after_game_over_are_ignored() {
    let mut game = Game::new();
    game.initialize(&roster(&["H1"]), &roster(&["P"]));
    let hero = PieceId::new(0, CharacterKind::Hero1);
    game.submit_move(Player::A, hero, MoveToken::B);
    assert!(matches!(
        game.submit_move(Player::A, hero, MoveToken::B),
        MoveOutcome::GameOver { winner: Player::A }
    ));
    let finished = game.state().clone();

    assert_eq!(game.submit_move(Player::A, hero, MoveToken::F), MoveOutcome::Ignored);
    assert_eq!(game.submit_move(Player::B, pawn(0), MoveToken::F), MoveOutcome::Ignored);
    assert_eq!(game.state(), &finished);
}

#[test]
fn test_history_records_accepted_moves_only() {
    let mut game = Game::new();
    game.initialize(&roster(&["P"]), &roster(&["H2"]));
    let diag = PieceId::new(0, CharacterKind::Hero2);

    game.submit_move(Player::A, pawn(0), MoveToken::L);
    game.submit_move(Player::A, pawn(0), MoveToken::R);
    game.submit_move(Player::B, diag, MoveToken::FR);

    let history: Vec<String> = game.state().history().iter().map(Move::to_string).collect();
    assert_eq!(history, vec!["A-0-P moved R", "B-0-H2 moved FR"]);
}

#[test]
fn test_board_wire_format_after_move() {
    let mut game = Game::new();
    game.initialize(&roster(&["P", "H2"]), &roster(&["H1"]));
    game.submit_move(Player::A, PieceId::new(1, CharacterKind::Hero2), MoveToken::BR);

    let json = serde_json::to_value(game.state().board()).expect("serializable");
    assert_eq!(json[0][0], "A-0-P");
    assert_eq!(json[0][1], "");
    assert_eq!(json[2][3], "A-1-H2");
    assert_eq!(json[4][0], "B-0-H1");

    let back: Board = serde_json::from_value(json).expect("parsable");
    assert_eq!(&back, game.state().board());
}

fn outcome_message(outcome: &MoveOutcome) -> String {
    match outcome {
        MoveOutcome::Rejected { reason } => reason.to_string(),
        other => format!("{:?}", other),
    }
}
