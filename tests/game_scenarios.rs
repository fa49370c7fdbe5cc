use pushfight::engine::{Board, Cell, Color, GameState, Move, Role, TurnResult};
use pushfight::error::MoveError;
use pushfight::playout::random_playout;
use pushfight::utils::{board_from_str_array, encode_sequence, parse_moves};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn play(game: &mut GameState, notation: &str) -> Result<TurnResult, MoveError> {
    let coords = parse_moves(notation).unwrap();
    game.apply_coords(&coords)
}

#[test]
fn test_initial_position() {
    let game = GameState::new();
    let board = game.board();
    assert_eq!(game.turn(), 0);
    assert_eq!(game.current_player(), Color::White);
    assert!(!game.is_game_over());
    assert_eq!(board.anchor(), None);

    for color in [Color::White, Color::Black] {
        let pieces: Vec<_> = board.pieces(color).collect();
        assert_eq!(pieces.len(), 5);
        let pushers = pieces
            .iter()
            .filter(|&&(r, c)| matches!(board.get(r, c), Cell::Occupied(p) if p.role == Role::Pusher))
            .count();
        assert_eq!(pushers, 3);
    }
}

#[test]
fn test_push_into_bottom_edge_is_rejected_and_changes_nothing() {
    let mut game = GameState::new();
    assert_eq!(play(&mut game, "A4B4"), Err(MoveError::PushedAgainstWall));
    assert_eq!(game.turn(), 0);
    assert_eq!(game.board(), &Board::standard());
}

#[test]
fn test_two_turns_in_notation() {
    let mut game = GameState::new();
    assert_eq!(play(&mut game, "B4B3 C4C5"), Ok(TurnResult::Continues));
    assert_eq!(
        game.board().to_rows(),
        ["##.mw..#", "..n.vw..", "..m.Mv..", "#..nw.##"].map(String::from)
    );

    // White cannot move again, and Black may not shove the anchored pusher.
    assert_eq!(play(&mut game, "C3C4"), Err(MoveError::WrongPlayer));
    assert_eq!(play(&mut game, "C6C5"), Err(MoveError::NotAPusher));
    assert_eq!(play(&mut game, "A5B5"), Err(MoveError::PushedIntoAnchor));

    assert_eq!(play(&mut game, "B6C6"), Ok(TurnResult::Continues));
    assert_eq!(game.turn(), 2);
    assert_eq!(
        game.board().to_rows(),
        ["##.mw..#", "..n.v...", "..m.mW..", "#..nwv##"].map(String::from)
    );
    assert_eq!(game.board().count_anchored(), 1);
}

#[test]
fn test_push_into_hole_ends_the_game() {
    let board = board_from_str_array(&[
        "##.....#", //
        "n.......",
        "m.......",
        "#...w.##",
    ])
    .unwrap();
    let mut game = GameState::new_with_board(board);

    let result = play(&mut game, "C1B1").unwrap();
    let TurnResult::GameOver(outcome) = result else {
        panic!("expected the game to end, got {:?}", result);
    };
    assert_eq!(outcome.winner, Color::Black);
    assert_eq!(outcome.eliminated.color, Color::White);
    assert_eq!(outcome.eliminated.role, Role::Mover);
    assert_eq!(game.turn(), 0);
    assert_eq!(game.outcome(), Some(outcome));

    assert_eq!(play(&mut game, "D5C5"), Err(MoveError::GameOver));
    assert_eq!(game.legal_moves(0).unwrap().count(), 0);
    assert_eq!(game.count_moves(), [0, 0, 0]);
}

#[test]
fn test_enumerated_turns_are_all_playable() {
    let game = GameState::new();
    for num_slides in 0..=1 {
        for seq in game.legal_moves(num_slides).unwrap() {
            assert_eq!(seq.len(), num_slides + 1);
            let mut copy = game.clone();
            assert!(copy.apply_move(&seq).is_ok(), "rejected {:?}", seq);
        }
    }
    for seq in game.legal_moves(2).unwrap().take(500) {
        let mut copy = game.clone();
        assert!(copy.apply_move(&seq).is_ok(), "rejected {:?}", seq);
    }
}

#[test]
fn test_enumerated_turns_survive_notation() {
    let game = GameState::new();
    for seq in game.legal_moves(1).unwrap() {
        let text = encode_sequence(&seq).unwrap();
        let decoded = Move::sequence_from_coords(&parse_moves(&text).unwrap()).unwrap();
        assert_eq!(decoded, seq, "{}", text);
    }
}

#[test]
fn test_random_games_keep_one_anchor() {
    for seed in 0..10 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let report = random_playout(&GameState::new(), 60, &mut rng).unwrap();
        assert_eq!(report.anchor_violations, 0, "seed {}", seed);
    }
}
