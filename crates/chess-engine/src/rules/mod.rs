//! Legality, check and end-of-game detection.
//!
//! Every probe here runs on a copy of the grid; the live board is never
//! touched while answering a question about it.

mod castling;

pub use castling::can_castle;

use crate::execute::apply_to_grid;
use crate::movegen::{king_attacked, possible_moves};
use crate::Board;
use chess_core::{Color, Move, Piece};

pub use crate::movegen::check;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// White wins by checkmate.
    WhiteWins,
    /// Black wins by checkmate.
    BlackWins,
    /// Draw with a specific reason.
    Draw(DrawReason),
}

impl GameResult {
    /// Returns the winning color, if any.
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            GameResult::Draw(_) => None,
        }
    }

    /// Returns the result for a win by `color`.
    pub const fn win_for(color: Color) -> Self {
        match color {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// No legal moves but not in check.
    Stalemate,
}

/// State of one side after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    /// Returns true for checkmate and stalemate.
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }

    /// Converts the status of the side to move into a game result.
    pub const fn result(self, to_move: Color) -> Option<GameResult> {
        match self {
            GameStatus::Checkmate => Some(GameResult::win_for(to_move.opposite())),
            GameStatus::Stalemate => Some(GameResult::Draw(DrawReason::Stalemate)),
            GameStatus::Ongoing | GameStatus::Check => None,
        }
    }
}

/// Returns true if playing `mv` would leave `color`'s king attacked.
pub fn would_be_in_check(board: &Board, mv: Move, color: Color) -> bool {
    let mut scratch = *board.grid();
    let hint = if board.piece_at(mv.from) == Some((Piece::King, color)) {
        Some(mv.to)
    } else {
        board.king_hint(color)
    };
    apply_to_grid(&mut scratch, mv, board.en_passant(), Piece::Queen);
    king_attacked(&scratch, color, hint)
}

/// Returns true if `mv` is legal for the piece on its origin square.
///
/// The side to move is not checked here; that is the caller's turn
/// bookkeeping.
pub fn is_valid_move(board: &Board, mv: Move) -> bool {
    let Some((_, color)) = board.piece_at(mv.from) else {
        return false;
    };
    possible_moves(board, mv.from).contains(mv.to) && !would_be_in_check(board, mv, color)
}

fn has_legal_move(board: &Board, color: Color) -> bool {
    board.grid().squares_of(color).any(|from| {
        possible_moves(board, from)
            .iter()
            .any(|&to| !would_be_in_check(board, Move::new(from, to), color))
    })
}

/// Returns true if `color` is in check with no move that escapes it.
pub fn checkmate(board: &Board, color: Color) -> bool {
    check(board, color) && !has_legal_move(board, color)
}

/// Returns true if `color` is not in check but has no legal move.
pub fn stalemate(board: &Board, color: Color) -> bool {
    !check(board, color) && !has_legal_move(board, color)
}

/// Classifies `color`'s situation, computing the legal-move search once.
pub fn status(board: &Board, color: Color) -> GameStatus {
    match (check(board, color), has_legal_move(board, color)) {
        (true, true) => GameStatus::Check,
        (true, false) => GameStatus::Checkmate,
        (false, true) => GameStatus::Ongoing,
        (false, false) => GameStatus::Stalemate,
    }
}
