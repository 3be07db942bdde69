//! Standard Algebraic Notation (SAN) generation and parsing.
//!
//! Examples: "e4", "Nf3", "Bxc6", "O-O", "e8=Q", "Nbd2", "R1e1", "Qh4#"

use crate::movegen::{all_legal_moves, legal_moves};
use crate::rules::GameStatus;
use crate::{Board, CastleSide};
use chess_core::{Color, File, Move, Piece, Rank, Square};
use std::fmt;

/// Error type for SAN parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanError {
    /// The SAN string is empty.
    Empty,
    /// The SAN string has invalid format.
    InvalidFormat(String),
    /// No legal move matches the SAN.
    NoMatchingMove(String),
    /// Multiple legal moves match the SAN.
    AmbiguousMove(String),
}

impl fmt::Display for SanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanError::Empty => write!(f, "empty SAN string"),
            SanError::InvalidFormat(s) => write!(f, "invalid SAN format: {}", s),
            SanError::NoMatchingMove(s) => write!(f, "no legal move matches: {}", s),
            SanError::AmbiguousMove(s) => write!(f, "ambiguous move: {}", s),
        }
    }
}

impl std::error::Error for SanError {}

/// Converts a move to SAN without the check suffix.
///
/// The board must be the state BEFORE the move is made. `promote_to` is
/// only written when the move actually promotes.
pub fn move_to_san(board: &Board, mv: Move, promote_to: Piece) -> String {
    let Some((piece, color)) = board.piece_at(mv.from) else {
        return mv.to_uci();
    };

    if piece == Piece::King && mv.from.y() == mv.to.y() {
        match CastleSide::from_king_move(mv.from.x(), mv.to.x()) {
            Some(CastleSide::Kingside) => return "O-O".to_string(),
            Some(CastleSide::Queenside) => return "O-O-O".to_string(),
            None => {}
        }
    }

    let mut san = String::with_capacity(8);
    if let Some(letter) = piece.san_letter() {
        san.push(letter);
        san.push_str(&disambiguation(board, mv, piece, color));
    }

    let is_capture = board.piece_at(mv.to).is_some()
        || (piece == Piece::Pawn && mv.from.x() != mv.to.x());
    if is_capture {
        if piece == Piece::Pawn {
            san.push(mv.from.file().to_char());
        }
        san.push('x');
    }

    san.push_str(&mv.to.to_algebraic());

    if piece == Piece::Pawn && mv.to.y() == color.promotion_row() {
        san.push('=');
        san.push(promote_to.san_letter().unwrap_or('Q'));
    }
    san
}

/// Appends "+" or "#" according to the opponent's status after the move.
pub fn with_status(mut san: String, status: GameStatus) -> String {
    match status {
        GameStatus::Check => san.push('+'),
        GameStatus::Checkmate => san.push('#'),
        GameStatus::Ongoing | GameStatus::Stalemate => {}
    }
    san
}

fn disambiguation(board: &Board, mv: Move, piece: Piece, color: Color) -> String {
    let rivals: Vec<Square> = board
        .grid()
        .squares_of(color)
        .filter(|&from| from != mv.from && board.piece_at(from) == Some((piece, color)))
        .filter(|&from| legal_moves(board, from).contains(mv.to))
        .collect();

    if rivals.is_empty() {
        return String::new();
    }
    if rivals.iter().all(|sq| sq.file() != mv.from.file()) {
        return mv.from.file().to_char().to_string();
    }
    if rivals.iter().all(|sq| sq.rank() != mv.from.rank()) {
        return mv.from.rank().to_char().to_string();
    }
    mv.from.to_algebraic()
}

/// Parsed components of a SAN string.
#[derive(Debug)]
struct ParsedSan {
    piece: Piece,
    from_file: Option<File>,
    from_rank: Option<Rank>,
    to: Square,
    promotion: Option<Piece>,
}

/// Parses a SAN string into a legal move for `color`.
///
/// Returns the move and the promotion piece if one was named.
pub fn san_to_move(board: &Board, color: Color, san: &str) -> Result<(Move, Option<Piece>), SanError> {
    let san = san.trim();
    if san.is_empty() {
        return Err(SanError::Empty);
    }
    let core = san.trim_end_matches(&['+', '#', '!', '?'][..]);

    let castle = match core {
        "O-O" | "0-0" => Some(CastleSide::Kingside),
        "O-O-O" | "0-0-0" => Some(CastleSide::Queenside),
        _ => None,
    };
    if let Some(side) = castle {
        let row = color.home_row();
        return Square::new(crate::board::KING_HOME_X, row)
            .zip(Square::new(side.king_to_x(), row))
            .map(|(from, to)| Move::new(from, to))
            .filter(|&mv| {
                board.piece_at(mv.from) == Some((Piece::King, color))
                    && legal_moves(board, mv.from).contains(mv.to)
            })
            .map(|mv| (mv, None))
            .ok_or_else(|| SanError::NoMatchingMove(san.to_string()));
    }

    let parsed = parse_components(core).ok_or_else(|| SanError::InvalidFormat(san.to_string()))?;

    let matching: Vec<Move> = all_legal_moves(board, color)
        .into_iter()
        .filter(|mv| mv.to == parsed.to)
        .filter(|mv| board.piece_at(mv.from).map(|(p, _)| p) == Some(parsed.piece))
        .filter(|mv| parsed.from_file.map_or(true, |f| mv.from.file() == f))
        .filter(|mv| parsed.from_rank.map_or(true, |r| mv.from.rank() == r))
        .collect();

    match matching.as_slice() {
        [] => Err(SanError::NoMatchingMove(san.to_string())),
        [mv] => Ok((*mv, parsed.promotion)),
        _ => Err(SanError::AmbiguousMove(san.to_string())),
    }
}

fn parse_components(core: &str) -> Option<ParsedSan> {
    if !core.is_ascii() {
        return None;
    }
    let mut body = core;

    let mut promotion = None;
    if let Some((rest, promo)) = body.split_once('=') {
        let mut chars = promo.chars();
        let piece = chars.next().and_then(promotion_piece)?;
        if chars.next().is_some() {
            return None;
        }
        promotion = Some(piece);
        body = rest;
    }

    let piece = match body.chars().next()? {
        'N' => Piece::Knight,
        'B' => Piece::Bishop,
        'R' => Piece::Rook,
        'Q' => Piece::Queen,
        'K' => Piece::King,
        _ => Piece::Pawn,
    };
    if piece != Piece::Pawn {
        body = &body[1..];
    }
    if body.len() < 2 {
        return None;
    }

    let (prefix, dest) = body.split_at(body.len() - 2);
    let to = Square::from_algebraic(dest)?;

    let mut from_file = None;
    let mut from_rank = None;
    for c in prefix.chars().filter(|&c| c != 'x') {
        if let Some(file) = File::from_char(c).filter(|_| c.is_ascii_lowercase()) {
            from_file = Some(file);
        } else if let Some(rank) = Rank::from_char(c) {
            from_rank = Some(rank);
        } else {
            return None;
        }
    }

    Some(ParsedSan {
        piece,
        from_file,
        from_rank,
        to,
        promotion,
    })
}

fn promotion_piece(c: char) -> Option<Piece> {
    match c {
        'N' => Some(Piece::Knight),
        'B' => Some(Piece::Bishop),
        'R' => Some(Piece::Rook),
        'Q' => Some(Piece::Queen),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execute::move_piece;

    fn mv(s: &str) -> Move {
        Move::from_uci(s).unwrap().0
    }

    #[test]
    fn san_pawn_push() {
        let board = Board::new();
        assert_eq!(move_to_san(&board, mv("e2e4"), Piece::Queen), "e4");
        assert_eq!(move_to_san(&board, mv("d7d6"), Piece::Queen), "d6");
    }

    #[test]
    fn san_knight_move() {
        let board = Board::new();
        assert_eq!(move_to_san(&board, mv("g1f3"), Piece::Queen), "Nf3");
    }

    #[test]
    fn san_pawn_capture() {
        let board = Board::from_placement("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR").unwrap();
        assert_eq!(move_to_san(&board, mv("e4d5"), Piece::Queen), "exd5");
    }

    #[test]
    fn san_castling() {
        let board = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        assert_eq!(move_to_san(&board, mv("e1g1"), Piece::Queen), "O-O");
        assert_eq!(move_to_san(&board, mv("e8c8"), Piece::Queen), "O-O-O");
    }

    #[test]
    fn san_promotion() {
        let board = Board::from_placement("8/4P3/8/8/8/8/8/k6K").unwrap();
        assert_eq!(move_to_san(&board, mv("e7e8"), Piece::Queen), "e8=Q");
        assert_eq!(move_to_san(&board, mv("e7e8"), Piece::Rook), "e8=R");
    }

    #[test]
    fn san_knight_disambiguation_file() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/1N1NK3").unwrap();
        assert_eq!(move_to_san(&board, mv("b1c3"), Piece::Queen), "Nbc3");
        assert_eq!(move_to_san(&board, mv("d1c3"), Piece::Queen), "Ndc3");
        assert_eq!(move_to_san(&board, mv("d1f2"), Piece::Queen), "Nf2");
    }

    #[test]
    fn san_rook_disambiguation_rank() {
        let board = Board::from_placement("4k3/R7/8/8/8/8/R7/4K3").unwrap();
        assert_eq!(move_to_san(&board, mv("a2a4"), Piece::Queen), "R2a4");
        assert_eq!(move_to_san(&board, mv("a7a4"), Piece::Queen), "R7a4");
    }

    #[test]
    fn san_suffixes() {
        assert_eq!(with_status("Qh4".to_string(), GameStatus::Checkmate), "Qh4#");
        assert_eq!(with_status("Bb5".to_string(), GameStatus::Check), "Bb5+");
        assert_eq!(with_status("Kb6".to_string(), GameStatus::Stalemate), "Kb6");
    }

    #[test]
    fn parse_san_moves() {
        let board = Board::new();
        assert_eq!(san_to_move(&board, Color::White, "e4"), Ok((mv("e2e4"), None)));
        assert_eq!(san_to_move(&board, Color::White, "Nf3"), Ok((mv("g1f3"), None)));
        assert_eq!(san_to_move(&board, Color::Black, "Nc6"), Ok((mv("b8c6"), None)));
        assert_eq!(san_to_move(&board, Color::White, "e4+"), Ok((mv("e2e4"), None)));
    }

    #[test]
    fn parse_san_castling_and_promotion() {
        let board = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        assert_eq!(san_to_move(&board, Color::White, "O-O"), Ok((mv("e1g1"), None)));
        assert_eq!(san_to_move(&board, Color::Black, "0-0-0"), Ok((mv("e8c8"), None)));

        let board = Board::from_placement("8/4P3/8/8/8/8/8/k6K").unwrap();
        assert_eq!(
            san_to_move(&board, Color::White, "e8=N"),
            Ok((mv("e7e8"), Some(Piece::Knight)))
        );
    }

    #[test]
    fn parse_san_invalid() {
        let board = Board::new();
        assert_eq!(san_to_move(&board, Color::White, ""), Err(SanError::Empty));
        assert!(matches!(
            san_to_move(&board, Color::White, "Zz9"),
            Err(SanError::InvalidFormat(_))
        ));
        assert!(matches!(
            san_to_move(&board, Color::White, "e5"),
            Err(SanError::NoMatchingMove(_))
        ));
        assert!(matches!(
            san_to_move(&board, Color::White, "O-O"),
            Err(SanError::NoMatchingMove(_))
        ));

        let board = Board::from_placement("4k3/8/8/8/8/8/8/1N1NK3").unwrap();
        assert!(matches!(
            san_to_move(&board, Color::White, "Nc3"),
            Err(SanError::AmbiguousMove(_))
        ));
    }

    #[test]
    fn generated_san_parses_back() {
        let mut board = Board::new();
        for uci in ["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6", "b5c6", "d7c6", "e1g1"] {
            let m = mv(uci);
            let color = board.piece_at(m.from).unwrap().1;
            let outcome = move_piece(&mut board.clone(), m).unwrap();
            assert_eq!(san_to_move(&board, color, &outcome.san), Ok((m, None)), "{uci}");
            move_piece(&mut board, m).unwrap();
        }
    }
}
