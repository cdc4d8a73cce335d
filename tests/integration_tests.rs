//! Integration tests for flood-it
//!
//! These exercise the public API end to end: flooding under every adjacency
//! rule, full games, undo/redo through a session, saved games, and the text
//! command protocol.

use flood_it::board::{Board, Color};
use flood_it::config::GameConfig;
use flood_it::console::Console;
use flood_it::flood::{Connectivity, FloodRule, Topology, Traversal, flood_with, neighbors};
use flood_it::game::{GameState, MoveResult, Phase, new_game};
use flood_it::hint::best_color;
use flood_it::session::Session;
use flood_it::GameError;

// =============================================================================
// Helper functions
// =============================================================================

/// Start a game on a fixed board.
fn game_from(rows: &[Vec<Color>], num_colors: usize, rule: FloodRule) -> GameState {
    let board = Board::from_colors(rows, num_colors).unwrap();
    GameState::from_board(board, rule)
}

/// Assert that no captured cell has an uncaptured neighbor of `color`.
fn assert_closed(state: &GameState, color: Color) {
    let board = state.board();
    for (r, c) in board.captured_points() {
        for (nr, nc) in neighbors(board.size(), (r, c), state.rule()) {
            if board.color_at(nr, nc).unwrap() == color {
                assert!(
                    board.is_captured(nr, nc).unwrap(),
                    "({nr}, {nc}) next to captured ({r}, {c}) left out under {:?}",
                    state.rule()
                );
            }
        }
    }
}

/// A deterministic sequence of colors cycling through the palette.
fn color_sequence(num_colors: usize, len: usize) -> Vec<Color> {
    (0..len).map(|i| ((i * 7 + 3) % num_colors) as Color).collect()
}

// =============================================================================
// Concrete scenario
// =============================================================================

#[test]
fn test_two_by_two_plane_orthogonal() {
    let mut game = game_from(&[vec![0, 0], vec![1, 1]], 2, FloodRule::default());
    assert_eq!(game.phase(), Phase::AwaitingInitialPick);

    game.pick_initial_cell(0, 0).unwrap();
    assert_eq!(game.number_captured(), 1);
    assert_eq!(game.current_color(), Some(0));
    assert!(game.is_captured(0, 0).unwrap());
    assert!(!game.is_captured(0, 1).unwrap());

    // (0,1) has color 0, not 1: it stays out. (1,0) joins, then (1,1) through it.
    assert_eq!(game.choose_color(1), Ok(MoveResult::Played { captured: 2 }));
    assert_eq!(game.number_captured(), 3);
    assert_eq!(game.steps_played(), 1);
    assert!(!game.is_captured(0, 1).unwrap());
    assert!(game.is_captured(1, 0).unwrap());
    assert!(game.is_captured(1, 1).unwrap());
    assert!(!game.is_finished());

    assert_eq!(game.choose_color(0), Ok(MoveResult::Played { captured: 1 }));
    assert_eq!(game.number_captured(), 4);
    assert_eq!(game.steps_played(), 2);
    assert!(game.is_finished());
    assert_eq!(game.phase(), Phase::Finished);
}

// =============================================================================
// Flood properties
// =============================================================================

#[test]
fn test_noop_color_changes_nothing() {
    for rule in FloodRule::all() {
        let mut game = new_game(&GameConfig::new(8, 4).with_seed(3).with_rule(rule)).unwrap();
        game.pick_initial_cell(4, 4).unwrap();
        game.choose_color((game.current_color().unwrap() + 1) % 4).unwrap();

        let before = game.clone();
        let current = game.current_color().unwrap();
        assert_eq!(game.choose_color(current), Ok(MoveResult::Unchanged));
        assert_eq!(game, before);
    }
}

#[test]
fn test_captured_count_is_monotonic_and_closed() {
    for rule in FloodRule::all() {
        for seed in 0..10 {
            let config = GameConfig::new(12, 5).with_seed(seed).with_rule(rule);
            let mut game = new_game(&config).unwrap();
            game.pick_initial_cell(0, 11).unwrap();

            let mut last = game.number_captured();
            for color in color_sequence(5, 60) {
                if game.is_finished() {
                    break;
                }
                let result = game.choose_color(color).unwrap();
                assert!(game.number_captured() >= last);
                assert!(game.number_captured() <= 144);
                assert_eq!(game.number_captured(), game.board().captured_count());
                if result.is_played() {
                    assert_closed(&game, color);
                }
                last = game.number_captured();
            }
        }
    }
}

#[test]
fn test_traversal_order_does_not_change_result() {
    for rule in FloodRule::all() {
        for seed in 0..10 {
            let mut depth = Board::generate(15, 3, Some(seed)).unwrap();
            for point in [(0, 0), (7, 7), (14, 2)] {
                depth.set_captured(point.0, point.1).unwrap();
            }
            let mut breadth = depth.clone();

            for color in [1, 2, 0, 1] {
                let a = flood_with(&mut depth, None, color, rule, Traversal::DepthFirst);
                let b = flood_with(&mut breadth, None, color, rule, Traversal::BreadthFirst);
                assert_eq!(a, b);
                assert_eq!(depth, breadth);
            }
        }
    }
}

#[test]
fn test_torus_flood_wraps_from_corner() {
    // Color 1 runs from (0,0) only by going off the top and left edges.
    let rows = vec![
        vec![0, 2, 2, 2, 1],
        vec![2, 2, 2, 2, 1],
        vec![2, 2, 2, 2, 2],
        vec![2, 2, 2, 2, 2],
        vec![1, 1, 2, 2, 2],
    ];
    let torus = FloodRule::new(Topology::Torus, Connectivity::Orthogonal);
    let mut game = game_from(&rows, 3, torus);
    game.pick_initial_cell(0, 0).unwrap();
    assert_eq!(game.choose_color(1), Ok(MoveResult::Played { captured: 4 }));
    for (r, c) in [(0, 4), (1, 4), (4, 0), (4, 1)] {
        assert!(game.is_captured(r, c).unwrap(), "({r}, {c}) not captured");
    }

    let mut plane = game_from(&rows, 3, FloodRule::default());
    plane.pick_initial_cell(0, 0).unwrap();
    assert_eq!(plane.choose_color(1), Ok(MoveResult::Played { captured: 0 }));
}

#[test]
fn test_torus_diagonal_wraps_corner_to_corner() {
    let rows = vec![vec![0, 2, 2], vec![2, 2, 2], vec![2, 2, 1]];
    let rule = FloodRule::new(Topology::Torus, Connectivity::AllEight);
    let mut game = game_from(&rows, 3, rule);
    game.pick_initial_cell(0, 0).unwrap();
    game.choose_color(1).unwrap();
    assert!(game.is_captured(2, 2).unwrap());
}

#[test]
fn test_large_board_floods_without_recursion() {
    let mut board = Board::from_colors(&vec![vec![0; 400]; 400], 2).unwrap();
    board.set_captured(200, 200).unwrap();
    let grown = flood_with(
        &mut board,
        None,
        0,
        FloodRule::default(),
        Traversal::DepthFirst,
    );
    assert_eq!(grown, 400 * 400 - 1);
    assert_eq!(board.captured_count(), 400 * 400);
}

// =============================================================================
// Full games
// =============================================================================

#[test]
fn test_greedy_games_finish_under_every_rule() {
    for rule in FloodRule::all() {
        let config = GameConfig::new(14, 6).with_seed(17).with_rule(rule);
        let mut game = new_game(&config).unwrap();
        game.pick_initial_cell(3, 9).unwrap();
        while let Some(color) = best_color(&game) {
            assert!(game.choose_color(color).unwrap().is_played());
        }
        assert!(game.is_finished());
        assert!(matches!(
            game.choose_color(0),
            Err(GameError::IllegalMove(_))
        ));
    }
}

#[test]
fn test_diagonals_never_need_more_steps() {
    let colors = color_sequence(6, 200);
    for seed in 0..5 {
        let mut steps = Vec::new();
        for connectivity in [Connectivity::Orthogonal, Connectivity::AllEight] {
            let rule = FloodRule::new(Topology::Plane, connectivity);
            let config = GameConfig::new(10, 6).with_seed(seed).with_rule(rule);
            let mut game = new_game(&config).unwrap();
            game.pick_initial_cell(0, 0).unwrap();
            for &color in &colors {
                if game.is_finished() {
                    break;
                }
                game.choose_color(color).unwrap();
            }
            assert!(game.is_finished());
            steps.push(game.steps_played());
        }
        assert!(steps[1] <= steps[0], "seed {seed}: {steps:?}");
    }
}

// =============================================================================
// Undo / redo
// =============================================================================

#[test]
fn test_undo_all_moves_returns_to_post_pick_state() {
    let config = GameConfig::new(10, 4).with_seed(5);
    let mut session = Session::new(config).unwrap();
    session.pick_initial_cell(5, 5).unwrap();
    let after_pick = session.state().clone();

    let mut forward = Vec::new();
    let mut moves = 0;
    for color in color_sequence(4, 12) {
        if session.state().is_finished() {
            break;
        }
        if session.choose_color(color).unwrap().is_played() {
            moves += 1;
            forward.push(session.state().clone());
        }
    }
    assert!(moves > 0);

    for _ in 0..moves {
        session.undo().unwrap();
    }
    assert_eq!(session.state(), &after_pick);

    for expected in &forward {
        session.redo().unwrap();
        assert_eq!(session.state(), expected);
    }
    assert_eq!(session.redo(), Err(GameError::EmptyHistory));
}

#[test]
fn test_undo_past_start_is_empty_history() {
    let mut session = Session::new(GameConfig::new(4, 3).with_seed(1)).unwrap();
    session.pick_initial_cell(0, 0).unwrap();
    session.undo().unwrap();
    let root = session.state().clone();
    assert_eq!(session.undo(), Err(GameError::EmptyHistory));
    assert_eq!(session.state(), &root);
}

// =============================================================================
// Saved games
// =============================================================================

#[test]
fn test_round_trip_preserves_every_field() {
    let rule = FloodRule::new(Topology::Torus, Connectivity::AllEight);
    let mut game = new_game(&GameConfig::new(9, 5).with_seed(44).with_rule(rule)).unwrap();
    game.pick_initial_cell(8, 0).unwrap();
    for color in color_sequence(5, 3) {
        game.choose_color(color).unwrap();
    }

    let restored = GameState::from_json(&game.to_json().unwrap()).unwrap();
    assert_eq!(restored.size(), game.size());
    assert_eq!(restored.current_color(), game.current_color());
    assert_eq!(restored.steps_played(), game.steps_played());
    assert_eq!(restored.number_captured(), game.number_captured());
    assert_eq!(restored.topology(), Topology::Torus);
    assert_eq!(restored.connectivity(), Connectivity::AllEight);
    assert_eq!(restored.board().cells(), game.board().cells());

    // Identical subsequent play
    let mut a = game.clone();
    let mut b = restored;
    for color in color_sequence(5, 10) {
        if a.is_finished() {
            break;
        }
        assert_eq!(a.choose_color(color), b.choose_color(color));
    }
    assert_eq!(a, b);
}

#[test]
fn test_round_trip_before_pick() {
    let game = new_game(&GameConfig::new(3, 2).with_seed(2)).unwrap();
    let restored = GameState::from_json(&game.to_json().unwrap()).unwrap();
    assert_eq!(restored, game);
    assert_eq!(restored.phase(), Phase::AwaitingInitialPick);
}

// =============================================================================
// Console protocol
// =============================================================================

fn run_console(console: &mut Console, script: &str) -> String {
    let mut output = Vec::new();
    console.serve(script.as_bytes(), &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_console_game_with_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.json");
    let path = path.to_str().unwrap();

    let mut console = Console::new(GameConfig::new(6, 3).with_seed(12)).unwrap();
    let text = run_console(
        &mut console,
        &format!("1 pick 0 0\n2 hint\n3 save {path}\n4 status\n"),
    );
    assert!(text.starts_with("=1 1/36 captured, 0 steps\n\n"), "{text}");
    assert!(text.contains("=3 \n"));
    let saved = console.session().state().clone();

    let hint = best_color(&saved).unwrap();
    run_console(&mut console, &format!("color {hint}\n"));
    assert_eq!(console.session().state().steps_played(), 1);

    let text = run_console(&mut console, &format!("5 load {path}\n"));
    assert!(text.starts_with("=5 playing"), "{text}");
    assert_eq!(console.session().state(), &saved);
    assert!(!console.session().can_undo());
}

#[test]
fn test_console_load_rejects_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let mut console = Console::new(GameConfig::new(4, 3).with_seed(1)).unwrap();
    let text = run_console(&mut console, &format!("load {}\n", path.display()));
    assert!(text.starts_with("? failed to read"), "{text}");
}
