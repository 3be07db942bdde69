//! Attack detection on a grid.

use super::{DIAGONAL, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONAL};
use crate::{Board, Grid};
use chess_core::{Color, Piece, Square};
use tracing::warn;

/// Returns true if any piece of `by` attacks `sq` on the given grid.
///
/// Pure: the grid is only read, so this is safe to call on scratch copies.
pub fn is_square_attacked(grid: &Grid, sq: Square, by: Color) -> bool {
    // A pawn of `by` attacks diagonally forward, so it sits one row behind.
    let behind = -by.pawn_direction();
    for dx in [-1, 1] {
        if sq.offset(dx, behind).and_then(|from| grid.piece_at(from)) == Some((Piece::Pawn, by)) {
            return true;
        }
    }

    let leaps = |offsets: &[(i8, i8)], piece: Piece| {
        offsets.iter().any(|&(dx, dy)| {
            sq.offset(dx, dy).and_then(|from| grid.piece_at(from)) == Some((piece, by))
        })
    };
    if leaps(&KNIGHT_OFFSETS, Piece::Knight) || leaps(&KING_OFFSETS, Piece::King) {
        return true;
    }

    slider_attacks(grid, sq, by, &ORTHOGONAL, Piece::Rook)
        || slider_attacks(grid, sq, by, &DIAGONAL, Piece::Bishop)
}

fn slider_attacks(grid: &Grid, sq: Square, by: Color, directions: &[(i8, i8)], piece: Piece) -> bool {
    directions.iter().any(|&(dx, dy)| {
        let mut current = sq;
        while let Some(next) = current.offset(dx, dy) {
            if let Some(found) = grid.piece_at(next) {
                return found == (piece, by) || found == (Piece::Queen, by);
            }
            current = next;
        }
        false
    })
}

/// Returns true if the king of `color` is attacked on the given grid.
///
/// `hint` is tried before scanning for the king. A grid without that king
/// is reported as not in check.
pub fn king_attacked(grid: &Grid, color: Color, hint: Option<Square>) -> bool {
    match grid.locate_king(color, hint) {
        Some(king) => is_square_attacked(grid, king, color.opposite()),
        None => {
            warn!(%color, "no king on the board, treating it as not in check");
            false
        }
    }
}

/// Returns true if `color`'s king is currently attacked.
pub fn check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king) => is_square_attacked(board.grid(), king, color.opposite()),
        None => {
            warn!(%color, "no king on the board, treating it as not in check");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn starting_position_attacks() {
        let board = Board::new();
        let grid = board.grid();
        assert!(is_square_attacked(grid, sq("e3"), Color::White));
        assert!(is_square_attacked(grid, sq("f3"), Color::White));
        assert!(!is_square_attacked(grid, sq("e4"), Color::White));
        assert!(is_square_attacked(grid, sq("f6"), Color::Black));
        assert!(!is_square_attacked(grid, sq("e5"), Color::Black));
        assert!(!check(&board, Color::White));
        assert!(!check(&board, Color::Black));
    }

    #[test]
    fn pawn_attacks_point_forward() {
        let board = Board::from_placement("4k3/8/8/3p4/8/8/8/4K3").unwrap();
        let grid = board.grid();
        assert!(is_square_attacked(grid, sq("c4"), Color::Black));
        assert!(is_square_attacked(grid, sq("e4"), Color::Black));
        assert!(!is_square_attacked(grid, sq("c6"), Color::Black));
        assert!(!is_square_attacked(grid, sq("d4"), Color::Black));
    }

    #[test]
    fn rook_on_open_file_checks() {
        let mut board = Board::empty();
        board.set(sq("e1"), Some((Piece::King, Color::White)));
        board.set(sq("e8"), Some((Piece::Rook, Color::Black)));
        assert!(check(&board, Color::White));

        board.set(sq("e4"), Some((Piece::Pawn, Color::White)));
        assert!(!check(&board, Color::White));
    }

    #[test]
    fn diagonal_blocked_by_piece() {
        let board = Board::from_placement("4k3/8/8/b7/8/2P5/8/4K3").unwrap();
        assert!(!check(&board, Color::White));
        let board = Board::from_placement("4k3/8/8/b7/8/8/8/4K3").unwrap();
        assert!(check(&board, Color::White));
    }

    #[test]
    fn missing_king_is_not_in_check() {
        let mut board = Board::empty();
        board.set(sq("e8"), Some((Piece::Queen, Color::Black)));
        assert!(!check(&board, Color::White));
        assert!(!king_attacked(board.grid(), Color::White, None));
    }

    #[test]
    fn stale_hint_is_ignored() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/r5K1").unwrap();
        assert!(king_attacked(board.grid(), Color::White, Some(sq("e1"))));
    }
}
