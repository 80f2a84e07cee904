//! Game rules for tic-tac-toe.
//!
//! Pure functions evaluating board state. Rules are separated from board
//! storage so the selector, the game state machine and the simulation
//! driver share one definition of "won" and "finished".

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full, is_terminal};
pub use win::{check_winner, is_line_won, winning_line};
