//! FEN piece-placement parsing and serialization.
//!
//! Only the first FEN field is handled here: the placement is what the
//! board grid stores. Side to move, castling and en passant live in the
//! engine's auxiliary state instead.

use crate::Piece;
use thiserror::Error;

/// Errors that can occur when parsing a FEN piece placement.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("empty FEN string")]
    Empty,

    #[error("invalid piece placement: expected 8 ranks, got {0}")]
    InvalidRankCount(usize),

    #[error("invalid character '{c}' in rank {rank}")]
    InvalidCharacter { c: char, rank: u8 },

    #[error("rank {rank} has {squares} squares, expected 8")]
    InvalidRankLength { rank: u8, squares: u32 },
}

/// Piece placement of the standard starting position.
pub const STARTPOS_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Parses a piece placement into a grid of signed piece codes indexed `[x][y]`.
///
/// A complete FEN string is accepted too; everything after the first field
/// is ignored.
pub fn parse_placement(fen: &str) -> Result<[[i8; 8]; 8], FenError> {
    let placement = fen.split_whitespace().next().ok_or(FenError::Empty)?;
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidRankCount(ranks.len()));
    }

    let mut grid = [[0i8; 8]; 8];
    // FEN lists rank 8 first, which is grid row 0.
    for (y, rank_str) in ranks.iter().enumerate() {
        let rank = 8 - y as u8;
        let mut squares = 0u32;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                squares += skip;
            } else if let Some((piece, color)) = Piece::from_fen_char(c) {
                if squares < 8 {
                    grid[squares as usize][y] = piece.code(color);
                }
                squares += 1;
            } else {
                return Err(FenError::InvalidCharacter { c, rank });
            }
        }
        if squares != 8 {
            return Err(FenError::InvalidRankLength { rank, squares });
        }
    }

    Ok(grid)
}

/// Serializes a grid of signed piece codes into a FEN piece placement.
///
/// Unknown codes are written as empty squares.
pub fn write_placement(grid: &[[i8; 8]; 8]) -> String {
    let mut fen = String::with_capacity(64);
    for y in 0..8 {
        let mut empty_count = 0;
        for column in grid {
            match Piece::from_code(column[y]) {
                Some((piece, color)) => {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    fen.push(piece.to_fen_char(color));
                }
                None => empty_count += 1,
            }
        }
        if empty_count > 0 {
            fen.push_str(&empty_count.to_string());
        }
        if y < 7 {
            fen.push('/');
        }
    }
    fen
}
