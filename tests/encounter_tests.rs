//! Encounter tests - damage, opponent progression, and completion

use tile_rush::core::{ComboPolicy, EncounterState, EncounterStatus};
use tile_rush::types::OpponentKind;

fn fresh() -> EncounterState {
    EncounterState::new(&OpponentKind::ALL)
}

#[test]
fn test_starts_against_first_opponent() {
    let enc = fresh();
    assert_eq!(enc.level(), 1);
    assert_eq!(enc.last_level(), 3);
    assert_eq!(enc.opponent(), OpponentKind::Man);
    assert_eq!(enc.opponent_health(), 150);
    assert_eq!(enc.max_health(), 150);
    assert_eq!(enc.combo(), 0);
    assert_eq!(enc.score(), 0);
    assert_eq!(enc.status(), EncounterStatus::InProgress);
}

#[test]
fn test_damage_is_ten_per_tile() {
    let mut enc = fresh();
    let report = enc.report_match(3);
    assert_eq!(report.damage, 30);
    assert!(!report.defeated);
    assert_eq!(enc.opponent_health(), 120);
    assert_eq!(enc.score(), 30);
    assert_eq!(enc.combo(), 1);
}

#[test]
fn test_overkill_clamps_and_advances() {
    let mut enc = fresh();
    enc.report_match(13);
    assert_eq!(enc.opponent_health(), 20);

    let report = enc.report_match(4);
    assert_eq!(report.damage, 40);
    assert!(report.defeated);
    assert_eq!(report.advanced_to, Some(2));
    assert!(!report.completed);

    // Fresh opponent at full health; overkill is not carried over.
    assert_eq!(enc.level(), 2);
    assert_eq!(enc.opponent(), OpponentKind::OldWoman);
    assert_eq!(enc.opponent_health(), 250);
    assert_eq!(enc.max_health(), 250);
    assert_eq!(enc.score(), 170);
}

#[test]
fn test_health_never_increases_within_a_level() {
    let mut enc = fresh();
    let mut previous = enc.opponent_health();
    for tiles in [3, 4, 3, 5] {
        let level = enc.level();
        enc.report_match(tiles);
        if enc.level() == level {
            assert!(enc.opponent_health() <= previous);
        }
        previous = enc.opponent_health();
    }
}

#[test]
fn test_beating_every_opponent_completes() {
    let mut enc = fresh();
    enc.report_match(15);
    enc.report_match(25);
    assert_eq!(enc.level(), 3);
    assert_eq!(enc.opponent(), OpponentKind::KidAndDog);

    let report = enc.report_match(50);
    assert!(report.defeated);
    assert!(report.completed);
    assert_eq!(report.advanced_to, None);
    assert!(enc.is_complete());
    assert_eq!(enc.status(), EncounterStatus::Complete { final_score: 900 });
    assert_eq!(enc.level(), 3);
}

#[test]
fn test_matches_after_completion_are_ignored() {
    let mut enc = EncounterState::new(&[OpponentKind::Man]);
    enc.report_match(15);
    assert!(enc.is_complete());

    let report = enc.report_match(5);
    assert_eq!(report.damage, 0);
    assert_eq!(enc.score(), 150);
    assert_eq!(enc.combo(), 1);
}

#[test]
fn test_combo_policies() {
    let mut session = fresh();
    session.report_match(3);
    session.record_miss();
    assert_eq!(session.combo(), 1);

    let mut strict = fresh().with_combo_policy(ComboPolicy::ResetOnMiss);
    strict.report_match(3);
    strict.report_match(3);
    assert_eq!(strict.combo(), 2);
    strict.record_miss();
    assert_eq!(strict.combo(), 0);
}

#[test]
fn test_custom_damage_per_tile() {
    let mut enc = fresh().with_damage_per_tile(25);
    assert_eq!(enc.report_match(4).damage, 100);
    assert_eq!(enc.opponent_health(), 50);
}

#[test]
fn test_zero_damage_per_tile_still_hurts() {
    let mut enc = fresh().with_damage_per_tile(0);
    let report = enc.report_match(4);
    assert_eq!(report.damage, 4);
    assert_eq!(enc.opponent_health(), 146);
    assert_eq!(enc.score(), 4);
}
