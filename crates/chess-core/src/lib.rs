//! Core types for chess.
//!
//! This crate provides the value types shared by the rule engine and the
//! layers around it:
//! - [`Piece`] and [`Color`], convertible to and from signed grid codes
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] with its network wire and coordinate text formats
//! - FEN piece-placement parsing and serialization

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{parse_placement, write_placement, FenError, STARTPOS_PLACEMENT};
pub use mov::{Move, MoveParseError};
pub use piece::Piece;
pub use square::{File, Rank, Square};
