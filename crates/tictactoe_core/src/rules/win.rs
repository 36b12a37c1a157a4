//! Win detection logic for tic-tac-toe.

use crate::types::{Actor, Board, Coord};
use tracing::instrument;

/// Every line, in evaluation order: rows, columns, main diagonal, anti-diagonal.
const LINES: [[(usize, usize); 3]; 8] = [
    // Rows
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // Columns
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Checks if either side has three in a row.
///
/// Returns the owner of the first completed line in scan order,
/// `None` otherwise.
#[instrument(level = "trace")]
pub fn check_winner(board: &Board) -> Option<Actor> {
    LINES.iter().find_map(|line| {
        let [a, b, c] = line.map(|(row, col)| board.get(Coord { row, col }));
        if a == b && b == c { a.owner() } else { None }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell::{Empty as E, OpponentMark as O, PlayerMark as X};

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = Board::from_rows([[X, X, X], [E, E, E], [E, E, E]]);
        assert_eq!(check_winner(&board), Some(Actor::Player));
    }

    #[test]
    fn test_winner_first_column() {
        let board = Board::from_rows([[O, E, E], [O, E, E], [O, E, E]]);
        assert_eq!(check_winner(&board), Some(Actor::Opponent));
    }

    #[test]
    fn test_winner_diagonal() {
        let board = Board::from_rows([[X, E, E], [E, X, E], [E, E, X]]);
        assert_eq!(check_winner(&board), Some(Actor::Player));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = Board::from_rows([[E, E, O], [E, O, E], [O, E, E]]);
        assert_eq!(check_winner(&board), Some(Actor::Opponent));
    }

    #[test]
    fn test_first_line_in_order_wins() {
        // Unreachable under legal play, but pins the scan order.
        let board = Board::from_rows([[O, O, O], [X, X, X], [E, E, E]]);
        assert_eq!(check_winner(&board), Some(Actor::Opponent));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = Board::from_rows([[X, X, E], [O, O, E], [E, E, E]]);
        assert_eq!(check_winner(&board), None);
    }
}
