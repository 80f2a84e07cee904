//! Exhaustive checks: the engine never loses from either side.

use unbeatable::{Player, verify_never_loses};

#[test]
fn test_never_loses_as_x() {
    let report = verify_never_loses(Player::X).expect("legal play");
    assert!(report.games > 0);
    assert_eq!(report.losses, 0, "{report:?}");
    assert!(report.never_lost());
    assert_eq!(report.games, report.wins + report.draws);
}

#[test]
fn test_never_loses_as_o() {
    let report = verify_never_loses(Player::O).expect("legal play");
    assert!(report.games > 0);
    assert_eq!(report.losses, 0, "{report:?}");
    assert_eq!(report.games, report.wins + report.draws);
}

#[test]
fn test_engine_punishes_weak_play() {
    // Some opponent lines lose to the engine from both sides.
    assert!(verify_never_loses(Player::X).expect("legal play").wins > 0);
    assert!(verify_never_loses(Player::O).expect("legal play").wins > 0);
}

#[test]
fn test_report_names_the_engine_side() {
    let report = verify_never_loses(Player::O).expect("legal play");
    assert_eq!(report.side, Player::O);
    let json = serde_json::to_value(&report).expect("serializable");
    assert_eq!(json["side"], "O");
}
