//! Integration tests for full encounters driven through pointer events

use tile_rush::core::{
    find_matches, Board, BoardLayout, BoardState, ComboPolicy, Game, GameConfig, GravityMode, Grid,
    SwapOutcome, TileSource, TurnReport,
};
use tile_rush::types::{CellPos, OpponentKind, PointerPos, TileKind};

fn center(pos: CellPos) -> PointerPos {
    PointerPos::new(pos.col as i32 * 100 + 50, pos.row as i32 * 100 + 50)
}

fn swap(game: &mut Game, from: CellPos, to: CellPos) -> TurnReport {
    game.pointer_down(center(from));
    game.pointer_move(center(to));
    game.pointer_up()
}

fn three_kinds() -> GameConfig {
    GameConfig {
        tile_kinds: vec![TileKind::Car, TileKind::Bus, TileKind::Train],
        ..GameConfig::default()
    }
}

/// First adjacent pair whose swap forms no run
fn dead_swap(game: &Game) -> Option<(CellPos, CellPos)> {
    let grid = game.grid();
    for row in 0..grid.rows() {
        for col in 0..grid.cols().saturating_sub(1) {
            let (a, b) = (CellPos::new(row, col), CellPos::new(row, col + 1));
            let mut trial = grid.clone();
            trial.swap(a, b).unwrap();
            if find_matches(&trial).is_empty() {
                return Some((a, b));
            }
        }
    }
    None
}

#[test]
fn test_hinted_play_completes_encounter() {
    let config = GameConfig {
        damage_per_tile: 200,
        ..three_kinds().with_seed(2024)
    };
    let mut game = Game::new(config).unwrap();

    let mut levels = vec![game.encounter().level()];
    for _ in 0..10 {
        if game.is_complete() {
            break;
        }
        let hint = game.hint().expect("three-kind board has a productive swap");
        let report = swap(&mut game, hint.from, hint.to);
        assert!(report.matched());
        if let Some(level) = report.advanced_to {
            levels.push(level);
        }
    }

    assert!(game.is_complete());
    assert_eq!(levels, vec![1, 2, 3]);
    assert_eq!(game.encounter().opponent(), OpponentKind::KidAndDog);
    assert_eq!(game.encounter().opponent_health(), 0);
    assert!(game.last_turn().unwrap().completed);

    // Input is ignored once the encounter is over.
    assert_eq!(game.pointer_down(center(CellPos::new(0, 0))), None);
    assert_eq!(game.pointer_up().outcome, SwapOutcome::Ignored);
}

#[test]
fn test_score_tracks_total_damage() {
    let mut game = Game::new(three_kinds().with_seed(8)).unwrap();
    let mut total = 0;
    for _ in 0..3 {
        let Some(hint) = game.hint() else { break };
        total += swap(&mut game, hint.from, hint.to).damage;
    }
    assert!(total > 0);
    assert_eq!(game.encounter().score(), total);
    if game.encounter().level() == 1 {
        assert_eq!(game.encounter().opponent_health(), 150 - total);
    }
}

#[test]
fn test_reverted_swap_keeps_board_and_resets_strict_combo() {
    let config = GameConfig {
        combo_policy: ComboPolicy::ResetOnMiss,
        ..three_kinds().with_seed(31)
    };
    let mut game = Game::new(config).unwrap();

    let hint = game.hint().expect("three-kind board has a productive swap");
    swap(&mut game, hint.from, hint.to);
    assert_eq!(game.encounter().combo(), 1);

    let (a, b) = dead_swap(&game).expect("some swap is unproductive");
    let before = game.grid().clone();
    let report = swap(&mut game, a, b);

    assert!(matches!(report.outcome, SwapOutcome::Reverted(_)));
    assert_eq!(game.grid(), &before);
    assert_eq!(report.damage, 0);
    assert_eq!(game.encounter().combo(), 0);
}

#[test]
fn test_deferred_gravity_through_game() {
    let config = GameConfig {
        gravity_mode: GravityMode::Deferred,
        ..three_kinds().with_seed(99)
    };
    let mut game = Game::new(config).unwrap();
    let hint = game.hint().expect("three-kind board has a productive swap");
    let report = swap(&mut game, hint.from, hint.to);

    assert_eq!(game.grid().count_empty(), report.cleared);
    let snap = game.snapshot();
    assert_eq!(snap.board_state, BoardState::Settling);
    assert!(!snap.playable());

    let filled = game.apply_gravity();
    assert_eq!(filled.filled(), report.cleared);
    assert_eq!(game.board().state(), BoardState::Idle);
    assert!(game.snapshot().playable());
}

#[test]
fn test_cascades_leave_a_stable_grid() {
    let config = GameConfig {
        cascade: true,
        ..three_kinds().with_seed(5)
    };
    let mut game = Game::new(config).unwrap();
    for _ in 0..5 {
        let Some(hint) = game.hint() else { break };
        let report = swap(&mut game, hint.from, hint.to);
        let SwapOutcome::Matched(resolution) = &report.outcome else {
            panic!("hinted swap should match");
        };
        assert_eq!(report.cleared, resolution.cleared());
        assert_eq!(report.damage, report.cleared as u32 * 10);
        assert!(find_matches(game.grid()).is_empty());
        if game.is_complete() {
            break;
        }
    }
}

#[test]
fn test_snapshot_serializes_to_json() {
    let game = Game::new(GameConfig::default().with_seed(3)).unwrap();
    let value = serde_json::to_value(game.snapshot()).unwrap();

    assert_eq!(value["rows"], 5);
    assert_eq!(value["cols"], 6);
    assert_eq!(value["cells"].as_array().unwrap().len(), 30);
    assert!(value["cells"][0].is_string());
    assert_eq!(value["board_state"], "idle");
    assert_eq!(value["opponent"], "man");
    assert_eq!(value["opponent_health"], 150);
    assert_eq!(value["complete"], false);
    assert_eq!(value["seed"], 3);
}

#[test]
fn test_turn_report_serializes_to_json() {
    let mut game = Game::new(GameConfig::default()).unwrap();
    let report = game.pointer_up();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["outcome"], "ignored");
    assert_eq!(value["cleared"], 0);
}

#[test]
fn test_config_from_json() {
    let config =
        GameConfig::from_json_str(r#"{"rows": 4, "cols": 4, "gravity_mode": "deferred"}"#)
            .unwrap();
    assert_eq!(config.gravity_mode, GravityMode::Deferred);
    assert_eq!(config.damage_per_tile, 10);

    let game = Game::new(config).unwrap();
    assert_eq!(game.grid().rows(), 4);
    assert!(find_matches(game.grid()).is_empty());

    assert!(GameConfig::from_json_str(r#"{"rows": 0}"#).is_err());
    assert!(GameConfig::from_json_str(r#"{"tile_kinds": ["car", "bus"]}"#).is_err());
    assert!(GameConfig::from_json_str("not json").is_err());
}

#[test]
fn test_games_are_independent() {
    let mut a = Game::new(three_kinds().with_seed(10)).unwrap();
    let b = Game::new(three_kinds().with_seed(10)).unwrap();
    let hint = a.hint().expect("three-kind board has a productive swap");
    assert!(swap(&mut a, hint.from, hint.to).matched());
    assert!(a.encounter().score() > 0);
    assert_eq!(b.encounter().score(), 0);
    assert_eq!(b.episode_id(), 0);
}

/// Six rows of five, no runs; swapping (1,2) down into row 2 lines up four cars.
fn fixed_board() -> Board {
    let (c, s, u, t, k) = (
        Some(TileKind::Car),
        Some(TileKind::Scooter),
        Some(TileKind::Bus),
        Some(TileKind::Train),
        Some(TileKind::Bike),
    );
    let grid = Grid::from_rows(vec![
        vec![t, k, s, t, k],
        vec![k, s, c, k, t],
        vec![c, c, u, c, s],
        vec![s, t, k, s, t],
        vec![t, k, s, t, k],
        vec![k, s, t, k, s],
    ])
    .unwrap();
    Board::from_grid(grid, BoardLayout::square(100), TileSource::new(7))
}

#[test]
fn test_four_run_drag_through_game() {
    let mut game = Game::from_board(GameConfig::default(), fixed_board()).unwrap();

    let report = swap(&mut game, CellPos::new(1, 2), CellPos::new(2, 2));

    assert!(matches!(report.outcome, SwapOutcome::Matched(_)));
    assert_eq!(report.cleared, 4);
    assert_eq!(report.damage, 40);
    assert_eq!(game.encounter().opponent(), OpponentKind::Man);
    assert_eq!(game.encounter().opponent_health(), 110);
    assert_eq!(game.encounter().score(), 40);
    assert_eq!(game.encounter().combo(), 1);
    assert!(game.grid().cells().iter().all(|cell| cell.is_some()));
}

#[test]
fn test_dead_drag_through_game_deals_nothing() {
    let mut game = Game::from_board(GameConfig::default(), fixed_board()).unwrap();
    let before = game.grid().clone();

    let report = swap(&mut game, CellPos::new(2, 3), CellPos::new(2, 4));

    assert!(matches!(report.outcome, SwapOutcome::Reverted(_)));
    assert_eq!(report.cleared, 0);
    assert_eq!(report.damage, 0);
    assert_eq!(game.grid(), &before);
    assert_eq!(game.encounter().opponent_health(), 150);
}
