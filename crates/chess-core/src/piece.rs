//! Chess piece representation.
//!
//! The board grid stores pieces as signed codes: the magnitude names the
//! piece and the sign names the color (positive for White). [`Piece`]
//! carries the magnitude as its discriminant so conversion is a cast.

use crate::Color;

/// The six types of chess pieces, valued by their grid code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Rook = 6,
    Bishop = 7,
    Knight = 8,
    King = 9,
    Pawn = 10,
    Queen = 11,
}

impl Piece {
    /// All piece types in code order.
    pub const ALL: [Piece; 6] = [
        Piece::Rook,
        Piece::Bishop,
        Piece::Knight,
        Piece::King,
        Piece::Pawn,
        Piece::Queen,
    ];

    /// Returns the signed grid code for this piece with the given color.
    #[inline]
    pub const fn code(self, color: Color) -> i8 {
        self as i8 * color.sign()
    }

    /// Decodes a signed grid code. Zero and unknown magnitudes yield `None`.
    pub const fn from_code(code: i8) -> Option<(Piece, Color)> {
        let color = if code > 0 { Color::White } else { Color::Black };
        let piece = match code.unsigned_abs() {
            6 => Piece::Rook,
            7 => Piece::Bishop,
            8 => Piece::Knight,
            9 => Piece::King,
            10 => Piece::Pawn,
            11 => Piece::Queen,
            _ => return None,
        };
        Some((piece, color))
    }

    /// Returns the FEN character for this piece with the given color.
    pub const fn to_fen_char(self, color: Color) -> char {
        let c = match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a FEN character into a piece and color.
    pub const fn from_fen_char(c: char) -> Option<(Piece, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };
        Some((piece, color))
    }

    /// Returns the letter used in algebraic notation, `None` for pawns.
    pub const fn san_letter(self) -> Option<char> {
        match self {
            Piece::Pawn => None,
            Piece::Knight => Some('N'),
            Piece::Bishop => Some('B'),
            Piece::Rook => Some('R'),
            Piece::Queen => Some('Q'),
            Piece::King => Some('K'),
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Piece::Pawn => "Pawn",
            Piece::Knight => "Knight",
            Piece::Bishop => "Bishop",
            Piece::Rook => "Rook",
            Piece::Queen => "Queen",
            Piece::King => "King",
        };
        write!(f, "{}", name)
    }
}
