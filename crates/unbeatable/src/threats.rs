//! Threat analysis: which cells complete a line or a fork for a player.

use crate::patterns::{FORKS, Fork};
use crate::{Board, Player, Position};
use std::collections::BTreeSet;
use tracing::{instrument, trace};

/// Cells that complete a combination for `player`.
///
/// A combination qualifies when its squares hold exactly `arity` distinct
/// symbols (each empty square counts as its own symbol), at least one of
/// them is `player`'s mark and none is the opponent's. The empty squares of
/// every qualifying combination are collected.
///
/// With `arity == 2` this finds combinations one move from completion:
/// for a line, two of `player`'s marks and one empty square.
pub fn completing_cells<'a, I>(
    board: &Board,
    combinations: I,
    player: Player,
    arity: usize,
) -> BTreeSet<Position>
where
    I: IntoIterator<Item = &'a [usize]>,
{
    let opponent = player.opponent();
    let mut cells = BTreeSet::new();
    for combination in combinations {
        let marks = board.marks_in(combination);
        if marks.distinct() == arity && marks.contains(player) && !marks.contains(opponent) {
            cells.extend(marks.empty().iter().copied());
        }
    }
    cells
}

/// Cells where `player` can build a two-in-a-row without handing the
/// opponent a fork.
///
/// Looks at every line holding one of `player`'s marks and two empty
/// squares. The opponent must answer a two-in-a-row on the remaining square,
/// so when one of the two squares is in `warning` only that square is kept
/// (the forced reply lands elsewhere). When both are in `warning` the line
/// is dropped.
#[instrument(skip(board, lines))]
pub fn completing_cells_avoiding<'a, I>(
    board: &Board,
    lines: I,
    player: Player,
    warning: &BTreeSet<Position>,
) -> BTreeSet<Position>
where
    I: IntoIterator<Item = &'a [usize]>,
{
    let opponent = player.opponent();
    let mut cells = BTreeSet::new();
    for line in lines {
        let marks = board.marks_in(line);
        if marks.distinct() != 3 || !marks.contains(player) || marks.contains(opponent) {
            continue;
        }
        let empty = marks.empty();
        let flagged: Vec<Position> = empty.iter().copied().filter(|c| warning.contains(c)).collect();
        match flagged.as_slice() {
            [] => cells.extend(empty.iter().copied()),
            [only] => {
                trace!(?line, cell = %only, "Forcing reply away from opponent fork");
                cells.insert(*only);
            }
            _ => trace!(?line, "Both squares feed an opponent fork"),
        }
    }
    cells
}

/// Forks that can still become a double threat.
///
/// A fork is open while at least two of its completion cells are empty;
/// with one or none left it can no longer threaten two lines.
pub fn open_forks(board: &Board) -> Vec<&'static Fork> {
    FORKS
        .iter()
        .filter(|fork| {
            fork.completions
                .iter()
                .filter_map(|&i| Position::from_index(i))
                .filter(|&pos| board.is_empty(pos))
                .count()
                > 1
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{CORNER_PAIRS, LINES};

    fn board(s: &str) -> Board {
        s.parse().expect("valid board")
    }

    fn lines() -> impl Iterator<Item = &'static [usize]> {
        LINES.iter().map(|l| l.as_slice())
    }

    #[test]
    fn test_two_in_a_row_completes() {
        let b = board("xx.......");
        let cells = completing_cells(&b, lines(), Player::X, 2);
        assert_eq!(cells, BTreeSet::from([Position::TopRight]));
        assert!(completing_cells(&b, lines(), Player::O, 2).is_empty());
    }

    #[test]
    fn test_blocked_line_does_not_complete() {
        let b = board("xxo......");
        assert!(completing_cells(&b, lines(), Player::X, 2).is_empty());
    }

    #[test]
    fn test_multiple_threats_collected() {
        // X on 0, 4 with 8 empty and 0, 1 with 2 empty.
        let b = board("xx.oxo...");
        let cells = completing_cells(&b, lines(), Player::X, 2);
        assert_eq!(
            cells,
            BTreeSet::from([Position::TopRight, Position::BottomCenter, Position::BottomRight])
        );
    }

    #[test]
    fn test_opposite_corner_via_corner_pairs() {
        let b = board("o........");
        let pairs = CORNER_PAIRS.iter().map(|p| p.as_slice());
        let cells = completing_cells(&b, pairs, Player::O, 2);
        assert_eq!(cells, BTreeSet::from([Position::BottomRight]));
    }

    #[test]
    fn test_open_forks_require_two_empty_completions() {
        // O on the center blocks one completion of (0, 2, 8) -> (1, 4, 5);
        // two remain, so the fork is still open.
        let b = board("x...o...x");
        let open: Vec<_> = open_forks(&b).iter().map(|f| f.cells).collect();
        assert!(open.contains(&[0, 2, 8]));
        assert!(open.contains(&[0, 6, 8]));

        // (1, 3, 4) -> (5, 7) closes once 5 is taken.
        let b = board(".....o...");
        let open: Vec<_> = open_forks(&b).iter().map(|f| f.cells).collect();
        assert!(!open.contains(&[1, 3, 4]));
    }

    #[test]
    fn test_fork_completing_cells() {
        // X on 0 and 8, center taken by O: X can fork on 2 or 6.
        let b = board("x...o...x");
        let forks = open_forks(&b);
        let cells = completing_cells(&b, forks.iter().map(|f| f.cells.as_slice()), Player::X, 2);
        assert_eq!(cells, BTreeSet::from([Position::TopRight, Position::BottomLeft]));
    }

    #[test]
    fn test_avoiding_keeps_warned_square() {
        // O on the center; X threatens forks on 2 and 6.
        let b = board("x...o...x");
        let warning = BTreeSet::from([Position::TopRight, Position::BottomLeft]);
        let cells = completing_cells_avoiding(&b, lines(), Player::O, &warning);
        // The 2-4-6 diagonal feeds both forks and is dropped.
        assert_eq!(
            cells,
            BTreeSet::from([
                Position::TopCenter,
                Position::MiddleLeft,
                Position::MiddleRight,
                Position::BottomCenter,
            ])
        );
    }

    #[test]
    fn test_avoiding_forces_reply_off_the_fork() {
        // X on 0 and 4, O on 8. X threatens forks on 1, 2, 3 and 6.
        let b = board("x...x...o");
        let warning = BTreeSet::from([
            Position::TopCenter,
            Position::TopRight,
            Position::MiddleLeft,
            Position::BottomLeft,
        ]);
        let cells = completing_cells_avoiding(&b, lines(), Player::O, &warning);
        assert_eq!(cells, BTreeSet::from([Position::TopRight, Position::BottomLeft]));
    }
}
