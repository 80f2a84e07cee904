//! Properties of the ranked selector over every reachable position.

use std::collections::BTreeSet;
use unbeatable::patterns::LINES;
use unbeatable::threats::completing_cells;
use unbeatable::{
    Board, GameInProgress, GameResult, GameSetup, Opening, Player, Position, Rule,
    acceptable_moves, candidates,
};

/// Every non-terminal board reachable from the empty board.
fn reachable() -> BTreeSet<Board> {
    fn walk(game: GameInProgress, seen: &mut BTreeSet<Board>) {
        if !seen.insert(game.board().clone()) {
            return;
        }
        for cell in game.valid_moves() {
            if let Ok(GameResult::InProgress(next)) = game.clone().play(cell) {
                walk(next, seen);
            }
        }
    }
    let mut seen = BTreeSet::new();
    walk(GameSetup::new().start(), &mut seen);
    seen
}

fn lines() -> impl Iterator<Item = &'static [usize]> {
    LINES.iter().map(|l| l.as_slice())
}

fn board(s: &str) -> Board {
    s.parse().expect("valid board")
}

#[test]
fn test_reachable_position_count() {
    assert_eq!(reachable().len(), 4520);
}

#[test]
fn test_selector_is_total_on_reachable_boards() {
    for b in reachable() {
        let player = b.side_to_move().expect("alternating counts");
        let cells = acceptable_moves(&b, player).expect("selectable board");
        assert!(!cells.is_empty(), "{b}");
        assert!(cells.iter().all(|&c| b.is_empty(c)), "{b}");
    }
}

#[test]
fn test_win_if_offered() {
    for b in reachable() {
        let player = b.side_to_move().expect("alternating counts");
        let wins = completing_cells(&b, lines(), player, 2);
        if wins.is_empty() {
            continue;
        }
        let d = candidates(&b, player, Opening::Corner).expect("selectable board");
        assert_eq!(d.rule(), Rule::Win, "{b}");
        assert_eq!(d.cells().iter().copied().collect::<BTreeSet<_>>(), wins);
    }
}

#[test]
fn test_block_if_threatened() {
    for b in reachable() {
        let player = b.side_to_move().expect("alternating counts");
        let wins = completing_cells(&b, lines(), player, 2);
        let threats = completing_cells(&b, lines(), player.opponent(), 2);
        if !wins.is_empty() || threats.is_empty() {
            continue;
        }
        let d = candidates(&b, player, Opening::Corner).expect("selectable board");
        assert_eq!(d.rule(), Rule::Block, "{b}");
        assert!(d.cells().iter().all(|c| threats.contains(c)), "{b}");
    }
}

#[test]
fn test_candidates_are_deterministic() {
    for b in reachable().into_iter().step_by(17) {
        let player = b.side_to_move().expect("alternating counts");
        for opening in [Opening::Center, Opening::Corner] {
            let a = candidates(&b, player, opening).expect("selectable board");
            let again = candidates(&b, player, opening).expect("selectable board");
            assert_eq!(a, again);
        }
    }
}

#[test]
fn test_every_rule_fires_somewhere() {
    let fired: BTreeSet<Rule> = reachable()
        .iter()
        .map(|b| {
            let player = b.side_to_move().expect("alternating counts");
            candidates(b, player, Opening::Corner)
                .expect("selectable board")
                .rule()
        })
        .collect();
    for rule in [
        Rule::Win,
        Rule::Block,
        Rule::Fork,
        Rule::BlockFork,
        Rule::ForceDefense,
        Rule::Center,
        Rule::OppositeCorner,
        Rule::EmptyCorner,
        Rule::EmptySide,
    ] {
        assert!(fired.contains(&rule), "{rule} never fired");
    }
}

#[test]
fn test_center_x_gets_corner_reply() {
    let cells = acceptable_moves(&board("....x...."), Player::O).expect("selectable board");
    assert_eq!(
        cells,
        vec![
            Position::TopLeft,
            Position::TopRight,
            Position::BottomLeft,
            Position::BottomRight,
        ]
    );
}

#[test]
fn test_two_in_top_row() {
    // O blocks, X completes.
    assert_eq!(
        acceptable_moves(&board("xx..o...."), Player::O).expect("selectable board"),
        vec![Position::TopRight]
    );
    assert_eq!(
        acceptable_moves(&board("xx.oo...."), Player::X).expect("selectable board"),
        vec![Position::TopRight]
    );
}

#[test]
fn test_forced_defense_against_double_fork() {
    let d = candidates(&board("x...x...o"), Player::O, Opening::Corner).expect("selectable board");
    assert_eq!(d.rule(), Rule::ForceDefense);
    assert_eq!(d.cells(), &[Position::TopRight, Position::BottomLeft]);
}

#[test]
fn test_opening_choices() {
    let empty = Board::new();
    assert_eq!(
        candidates(&empty, Player::X, Opening::Center)
            .expect("selectable board")
            .cells(),
        &[Position::Center]
    );
    let corner = candidates(&empty, Player::X, Opening::Corner).expect("selectable board");
    assert_eq!(corner.rule(), Rule::EmptyCorner);
    assert_eq!(corner.cells().len(), 4);
}
