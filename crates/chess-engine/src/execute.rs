//! Move execution.
//!
//! [`move_piece`] assumes the move was validated by the caller; it applies
//! whatever the board says the move means (capture, en passant, castling,
//! promotion), updates the auxiliary state and records the move.

use crate::rules::{self, GameStatus};
use crate::{san, Board, CastleSide, Grid};
use chess_core::{Color, Move, Piece, Square};
use tracing::{debug, warn};

/// What a move turned out to be once played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Quiet,
    Capture,
    DoublePush,
    EnPassant,
    Castle(CastleSide),
}

/// Everything a caller learns from executing one half-move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mv: Move,
    pub piece: Piece,
    pub color: Color,
    pub kind: MoveKind,
    pub captured: Option<Piece>,
    pub promotion: Option<Piece>,
    /// Algebraic notation including any check or mate suffix.
    pub san: String,
    /// Situation of the opponent, who moves next.
    pub status: GameStatus,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Applied {
    pub piece: Piece,
    pub color: Color,
    pub kind: MoveKind,
    pub captured: Option<Piece>,
    pub promotion: Option<Piece>,
}

/// Plays `mv` on a bare grid. Returns `None` if the origin is empty.
pub(crate) fn apply_to_grid(
    grid: &mut Grid,
    mv: Move,
    en_passant: Option<Square>,
    promote_to: Piece,
) -> Option<Applied> {
    let (piece, color) = grid.piece_at(mv.from)?;
    let mut captured = grid.piece_at(mv.to).map(|(p, _)| p);
    let mut kind = if captured.is_some() {
        MoveKind::Capture
    } else {
        MoveKind::Quiet
    };

    match piece {
        Piece::Pawn if mv.from.x() != mv.to.x() && captured.is_none() => {
            if en_passant == Some(mv.to) {
                if let Some(passed) = Square::new(mv.to.x(), mv.from.y()) {
                    captured = grid.piece_at(passed).map(|(p, _)| p);
                    grid.set(passed, None);
                }
                kind = MoveKind::EnPassant;
            }
        }
        Piece::Pawn if mv.from.y().abs_diff(mv.to.y()) == 2 => kind = MoveKind::DoublePush,
        Piece::King if mv.from.y() == mv.to.y() && mv.from.y() == color.home_row() => {
            if let Some(side) = CastleSide::from_king_move(mv.from.x(), mv.to.x()) {
                let row = mv.from.y();
                if let (Some(rook_from), Some(rook_to)) = (
                    Square::new(side.rook_from_x(), row),
                    Square::new(side.rook_to_x(), row),
                ) {
                    let rook = grid.piece_at(rook_from);
                    grid.set(rook_from, None);
                    grid.set(rook_to, rook);
                }
                kind = MoveKind::Castle(side);
            }
        }
        _ => {}
    }

    let promotion =
        (piece == Piece::Pawn && mv.to.y() == color.promotion_row()).then_some(promote_to);
    grid.set(mv.from, None);
    grid.set(mv.to, Some((promotion.unwrap_or(piece), color)));

    Some(Applied {
        piece,
        color,
        kind,
        captured,
        promotion,
    })
}

/// Which castling rook, if any, starts on `sq`.
fn rook_home_side(sq: Square, color: Color) -> Option<CastleSide> {
    if sq.y() != color.home_row() {
        return None;
    }
    CastleSide::ALL
        .into_iter()
        .find(|side| side.rook_from_x() == sq.x())
}

/// Plays `mv` on the board and updates flags and en passant, without
/// notation or end-of-game detection.
pub(crate) fn play(board: &mut Board, mv: Move, promote_to: Piece) -> Option<Applied> {
    let applied = apply_to_grid(&mut board.grid, mv, board.en_passant, promote_to)?;
    let color = applied.color;

    match applied.piece {
        Piece::King => {
            board.castling.mark_king_moved(color);
            board.note_king(color, mv.to);
        }
        Piece::Rook => {
            if let Some(side) = rook_home_side(mv.from, color) {
                board.castling.mark_rook_moved(color, side);
            }
        }
        _ => {}
    }
    if applied.captured == Some(Piece::Rook) && applied.kind == MoveKind::Capture {
        if let Some(side) = rook_home_side(mv.to, color.opposite()) {
            board.castling.mark_rook_moved(color.opposite(), side);
        }
    }

    board.en_passant = match applied.kind {
        MoveKind::DoublePush => Square::new(mv.from.x(), (mv.from.y() + mv.to.y()) / 2),
        _ => None,
    };

    Some(applied)
}

/// Executes `mv`, promoting a pawn that reaches the last row to a queen.
///
/// Returns `None`, leaving the board untouched, if the origin square is
/// empty.
pub fn move_piece(board: &mut Board, mv: Move) -> Option<MoveOutcome> {
    move_piece_promoting(board, mv, Piece::Queen)
}

/// Executes `mv`, promoting to `promotion` if a pawn reaches the last row.
///
/// Kings and pawns are not valid promotion choices and fall back to a queen.
pub fn move_piece_promoting(board: &mut Board, mv: Move, promotion: Piece) -> Option<MoveOutcome> {
    if board.piece_at(mv.from).is_none() {
        warn!(%mv, "no piece on origin square, move ignored");
        return None;
    }
    let promote_to = match promotion {
        Piece::Knight | Piece::Bishop | Piece::Rook | Piece::Queen => promotion,
        Piece::King | Piece::Pawn => {
            warn!(%promotion, "invalid promotion piece, promoting to queen");
            Piece::Queen
        }
    };

    let notation = san::move_to_san(board, mv, promote_to);
    let applied = play(board, mv, promote_to)?;
    let status = rules::status(board, applied.color.opposite());
    let san = san::with_status(notation, status);
    board.history.push(san.clone());
    debug!(%mv, %san, ?status, "move executed");

    Some(MoveOutcome {
        mv,
        piece: applied.piece,
        color: applied.color,
        kind: applied.kind,
        captured: applied.captured,
        promotion: applied.promotion,
        san,
        status,
    })
}
