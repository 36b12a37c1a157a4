//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Rules are kept apart from the game
//! state machine so evaluation can never mutate anything.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::check_winner;

use crate::types::{Board, Outcome};
use tracing::instrument;

/// Evaluates a board: any completed line first, then a draw on a full board.
///
/// Returns `None` while the game can continue.
#[instrument(level = "trace")]
pub fn evaluate(board: &Board) -> Option<Outcome> {
    if let Some(actor) = check_winner(board) {
        return Some(Outcome::win_for(actor));
    }
    is_full(board).then_some(Outcome::Draw)
}
