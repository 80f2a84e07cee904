//! Terminal game loop over any reader and writer: humans against the
//! engine or against each other.

use anyhow::{Result, bail};
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument};
use unbeatable::{Board, GameResult, GameSetup, MoveLog, MoveSelector, Player, Position};

/// Why a line of human input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum InputError {
    /// Neither a single digit 1-9 nor a cell name.
    #[display("Input should be a single digit from 1 to 9. Please try again.")]
    Unrecognized,
    /// The cell is taken.
    #[display("Impossible move. Please try again.")]
    Occupied,
}

/// Parses one line of input as a cell on `board`.
///
/// Accepts a single digit 1-9 or a cell name such as `center` or
/// `top-left` (an unambiguous prefix of a name also works).
pub fn parse_cell(input: &str, board: &Board) -> Result<Position, InputError> {
    let input = input.trim();
    let position = if input.chars().all(|c| c.is_ascii_digit()) {
        let mut digits = input.chars();
        match (digits.next(), digits.next()) {
            (Some(d), None) => d.to_digit(10).and_then(|d| Position::from_number(d as usize)),
            _ => None,
        }
    } else {
        Position::from_label_or_number(input)
    }
    .ok_or(InputError::Unrecognized)?;
    if board.is_empty(position) {
        Ok(position)
    } else {
        Err(InputError::Occupied)
    }
}

/// Plays one game until a win or a full board.
///
/// Players in `humans` read their moves from `input`; the engine moves for
/// everyone else.
#[instrument(skip(selector, rng, input, output))]
pub fn play<R, I, O>(
    selector: &MoveSelector,
    humans: &[Player],
    rng: &mut R,
    input: &mut I,
    output: &mut O,
) -> Result<MoveLog>
where
    R: Rng + ?Sized,
    I: BufRead,
    O: Write,
{
    let mut game = GameSetup::new().start();
    writeln!(output, "{}", game.board().render())?;

    loop {
        let player = game.to_move();
        let position = if humans.contains(&player) {
            read_cell(player, game.board(), input, output)?
        } else {
            let position = selector.select_move(game.board(), player, rng)?;
            writeln!(output, "Player {}: {}", player.symbol(), position.number())?;
            position
        };
        debug!(%player, %position, "Move");

        match game.play(position)? {
            GameResult::InProgress(next) => {
                writeln!(output, "{}", next.board().render())?;
                game = next;
            }
            GameResult::Finished(done) => {
                writeln!(output, "{}", done.board().render())?;
                writeln!(output, "{}", done.outcome())?;
                let log = MoveLog::from(&done);
                info!(%log, "Game over");
                return Ok(log);
            }
        }
    }
}

fn read_cell<I: BufRead, O: Write>(
    player: Player,
    board: &Board,
    input: &mut I,
    output: &mut O,
) -> Result<Position> {
    loop {
        write!(output, "Player {}: ", player.symbol())?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("Input closed before the game ended");
        }
        match parse_cell(&line, board) {
            Ok(position) => return Ok(position),
            Err(e) => writeln!(output, "{}", e)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_parse_cell() {
        let board: Board = "x........".parse().expect("valid board");
        assert_eq!(parse_cell("5\n", &board), Ok(Position::Center));
        assert_eq!(parse_cell("1", &board), Err(InputError::Occupied));
        assert_eq!(parse_cell("0", &board), Err(InputError::Unrecognized));
        assert_eq!(parse_cell("12", &board), Err(InputError::Unrecognized));
        assert_eq!(parse_cell("a", &board), Err(InputError::Unrecognized));
        assert_eq!(parse_cell("", &board), Err(InputError::Unrecognized));
    }

    #[test]
    fn test_parse_cell_by_name() {
        let board: Board = "x........".parse().expect("valid board");
        assert_eq!(parse_cell("center\n", &board), Ok(Position::Center));
        assert_eq!(parse_cell("Bottom-Right", &board), Ok(Position::BottomRight));
        assert_eq!(parse_cell("bottom-c", &board), Ok(Position::BottomCenter));
        assert_eq!(parse_cell("top-left", &board), Err(InputError::Occupied));
        assert_eq!(parse_cell("top", &board), Err(InputError::Unrecognized));
    }

    #[test]
    fn test_named_cells_at_the_prompt() {
        let mut input: &[u8] = b"middle\ncenter\ntop-left\ntop-center\ntop-right\n";
        let mut output = Vec::new();
        let mut rng = StdRng::seed_from_u64(1);

        let log = play(
            &MoveSelector::default(),
            &[Player::X, Player::O],
            &mut rng,
            &mut input,
            &mut output,
        );
        // Input runs out after X center, O top-left, X top-center, O top-right.
        assert!(log.is_err());
        let text = String::from_utf8(output).expect("utf8");
        assert!(text.contains("Input should be a single digit from 1 to 9. Please try again."));
        assert!(text.contains("│ o │ x │ o │"));
    }

    #[test]
    fn test_two_humans_play_each_other() {
        // x takes the top row while o plays the middle row.
        let mut input: &[u8] = b"1\n4\n2\n5\n3\n";
        let mut output = Vec::new();
        let mut rng = StdRng::seed_from_u64(1);

        let log = play(
            &MoveSelector::default(),
            &[Player::X, Player::O],
            &mut rng,
            &mut input,
            &mut output,
        )
        .expect("game completes");

        assert_eq!(log.outcome().winner(), Some(Player::X));
        assert_eq!(log.to_string(), "x1-o4-x2-o5-x3-x_won!");
        let text = String::from_utf8(output).expect("utf8");
        assert!(text.contains("Player o: "));
        assert!(text.trim_end().ends_with("Player x won!"));
    }

    #[test]
    fn test_human_cannot_beat_engine() {
        // The human plays the cells in order, retrying on taken cells.
        let script = "1\n2\n3\n4\n5\n6\n7\n8\n9\n".repeat(5);
        let mut input = script.as_bytes();
        let mut output = Vec::new();
        let mut rng = StdRng::seed_from_u64(1);

        let log = play(
            &MoveSelector::default(),
            &[Player::X],
            &mut rng,
            &mut input,
            &mut output,
        )
        .expect("game completes");

        assert_ne!(log.outcome().winner(), Some(Player::X));
        let text = String::from_utf8(output).expect("utf8");
        assert!(text.contains("Player x: "));
        assert!(text.contains("Impossible move. Please try again."));
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut input: &[u8] = b"";
        let mut output = Vec::new();
        let mut rng = StdRng::seed_from_u64(1);
        let result = play(
            &MoveSelector::default(),
            &[Player::X],
            &mut rng,
            &mut input,
            &mut output,
        );
        assert!(result.is_err());
    }
}
