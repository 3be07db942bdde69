//! Castling eligibility.

use crate::board::KING_HOME_X;
use crate::movegen::is_square_attacked;
use crate::{Board, CastleSide};
use chess_core::{Color, Piece, Square};

/// Returns true if `color` may castle to `side` right now.
///
/// Requires that neither the king nor that rook has moved, that both still
/// stand on their home squares, that every square between them is empty,
/// and that the king's start, transit and destination squares are not
/// attacked.
pub fn can_castle(board: &Board, color: Color, side: CastleSide) -> bool {
    if !board.castling().is_available(color, side) {
        return false;
    }

    let grid = board.grid();
    let row = color.home_row();
    let (Some(king_home), Some(rook_home)) = (
        Square::new(KING_HOME_X, row),
        Square::new(side.rook_from_x(), row),
    ) else {
        return false;
    };
    if grid.piece_at(king_home) != Some((Piece::King, color))
        || grid.piece_at(rook_home) != Some((Piece::Rook, color))
    {
        return false;
    }

    let (low, high) = if side.rook_from_x() < KING_HOME_X {
        (side.rook_from_x(), KING_HOME_X)
    } else {
        (KING_HOME_X, side.rook_from_x())
    };
    let path_clear = (low + 1..high)
        .filter_map(|x| Square::new(x, row))
        .all(|sq| grid.is_empty(sq));
    if !path_clear {
        return false;
    }

    let step: i8 = if side.king_to_x() > KING_HOME_X { 1 } else { -1 };
    let enemy = color.opposite();
    (0..3)
        .filter_map(|i| king_home.offset(step * i, 0))
        .all(|sq| !is_square_attacked(grid, sq, enemy))
}
