//! Move representation.
//!
//! A move is only an origin and a destination. Whether it captures,
//! castles, takes en passant or promotes is decided by the board it is
//! played on, never stored on the move.

use crate::{Piece, Square};
use std::fmt;
use thiserror::Error;

/// Errors produced when decoding move text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("expected 4 comma-separated coordinates, got {0} fields")]
    FieldCount(usize),

    #[error("invalid coordinate: '{0}'")]
    InvalidCoordinate(String),

    #[error("coordinate out of range: {0}")]
    OutOfRange(u8),

    #[error("invalid coordinate move: '{0}'")]
    InvalidUci(String),

    #[error("invalid promotion piece: '{0}'")]
    InvalidPromotion(char),
}

/// A chess move: origin and destination squares.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    /// Creates a move between two squares.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// Creates a move from the 4-integer grid tuple `(from_x, from_y, to_x, to_y)`.
    pub const fn from_coords(from_x: u8, from_y: u8, to_x: u8, to_y: u8) -> Option<Self> {
        let from = match Square::new(from_x, from_y) {
            Some(sq) => sq,
            None => return None,
        };
        let to = match Square::new(to_x, to_y) {
            Some(sq) => sq,
            None => return None,
        };
        Some(Move { from, to })
    }

    /// Returns the move as the grid tuple `(from_x, from_y, to_x, to_y)`.
    #[inline]
    pub const fn coords(self) -> (u8, u8, u8, u8) {
        (self.from.x(), self.from.y(), self.to.x(), self.to.y())
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4").
    pub fn to_uci(self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Returns the coordinate notation with a promotion suffix (e.g., "e7e8q").
    pub fn to_uci_promoting(self, promotion: Piece) -> String {
        let suffix = promotion.to_fen_char(crate::Color::Black);
        format!("{}{}{}", self.from, self.to, suffix)
    }

    /// Parses coordinate notation as spoken by UCI engines.
    ///
    /// Returns the move and the promotion piece named by an optional fifth
    /// character.
    pub fn from_uci(s: &str) -> Result<(Self, Option<Piece>), MoveParseError> {
        let s = s.trim();
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return Err(MoveParseError::InvalidUci(s.to_string()));
        }
        let from = Square::from_algebraic(&s[0..2])
            .ok_or_else(|| MoveParseError::InvalidUci(s.to_string()))?;
        let to = Square::from_algebraic(&s[2..4])
            .ok_or_else(|| MoveParseError::InvalidUci(s.to_string()))?;
        let promotion = match s.chars().nth(4) {
            None => None,
            Some(c) => match c.to_ascii_lowercase() {
                'n' => Some(Piece::Knight),
                'b' => Some(Piece::Bishop),
                'r' => Some(Piece::Rook),
                'q' => Some(Piece::Queen),
                _ => return Err(MoveParseError::InvalidPromotion(c)),
            },
        };
        Ok((Move { from, to }, promotion))
    }

    /// Returns the LAN wire encoding `"fromX,fromY,toX,toY"`.
    pub fn to_wire(self) -> String {
        let (fx, fy, tx, ty) = self.coords();
        format!("{},{},{},{}", fx, fy, tx, ty)
    }

    /// Parses the LAN wire encoding, rejecting anything outside the board.
    pub fn from_wire(s: &str) -> Result<Self, MoveParseError> {
        let fields: Vec<&str> = s.trim().split(',').collect();
        if fields.len() != 4 {
            return Err(MoveParseError::FieldCount(fields.len()));
        }
        let mut values = [0u8; 4];
        for (value, field) in values.iter_mut().zip(&fields) {
            let field = field.trim();
            *value = field
                .parse::<u8>()
                .map_err(|_| MoveParseError::InvalidCoordinate(field.to_string()))?;
            if *value > 7 {
                return Err(MoveParseError::OutOfRange(*value));
            }
        }
        let [fx, fy, tx, ty] = values;
        Move::from_coords(fx, fy, tx, ty).ok_or(MoveParseError::OutOfRange(8))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
