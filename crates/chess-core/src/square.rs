//! Board square representation.
//!
//! Squares are addressed the way the board grid is stored: `x` is the file
//! (0 = a) and `y` is the row counted from Black's side, so row 0 is rank 8
//! and row 7 is rank 1.

use std::fmt;

/// A file (column) on the chess board, from A to H.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// Creates a file from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(File::A),
            1 => Some(File::B),
            2 => Some(File::C),
            3 => Some(File::D),
            4 => Some(File::E),
            5 => Some(File::F),
            6 => Some(File::G),
            7 => Some(File::H),
            _ => None,
        }
    }

    /// Creates a file from a character ('a'-'h' or 'A'-'H').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(File::A),
            'b' => Some(File::B),
            'c' => Some(File::C),
            'd' => Some(File::D),
            'e' => Some(File::E),
            'f' => Some(File::F),
            'g' => Some(File::G),
            'h' => Some(File::H),
            _ => None,
        }
    }

    /// Returns the index (0-7), which is also the grid `x`.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank on the chess board, from 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    /// Creates a rank from index (0-7, rank 1 first).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Rank::R1),
            1 => Some(Rank::R2),
            2 => Some(Rank::R3),
            3 => Some(Rank::R4),
            4 => Some(Rank::R5),
            5 => Some(Rank::R6),
            6 => Some(Rank::R7),
            7 => Some(Rank::R8),
            _ => None,
        }
    }

    /// Creates a rank from a character ('1'-'8').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Rank::R1),
            '2' => Some(Rank::R2),
            '3' => Some(Rank::R3),
            '4' => Some(Rank::R4),
            '5' => Some(Rank::R5),
            '6' => Some(Rank::R6),
            '7' => Some(Rank::R7),
            '8' => Some(Rank::R8),
            _ => None,
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the grid row of this rank (rank 8 is row 0).
    #[inline]
    pub const fn row(self) -> u8 {
        7 - self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A square on the chess board, addressed by grid column and row.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    x: u8,
    y: u8,
}

impl Square {
    pub const A8: Square = Square { x: 0, y: 0 };
    pub const E8: Square = Square { x: 4, y: 0 };
    pub const H8: Square = Square { x: 7, y: 0 };
    pub const A1: Square = Square { x: 0, y: 7 };
    pub const E1: Square = Square { x: 4, y: 7 };
    pub const H1: Square = Square { x: 7, y: 7 };

    /// Creates a square from grid coordinates, `None` if either is outside 0..8.
    #[inline]
    pub const fn new(x: u8, y: u8) -> Option<Self> {
        if x < 8 && y < 8 {
            Some(Square { x, y })
        } else {
            None
        }
    }

    /// Creates a square from signed grid coordinates.
    #[inline]
    pub const fn from_signed(x: i8, y: i8) -> Option<Self> {
        if x >= 0 && y >= 0 {
            Self::new(x as u8, y as u8)
        } else {
            None
        }
    }

    /// Creates a square from a file and a rank.
    #[inline]
    pub const fn from_file_rank(file: File, rank: Rank) -> Self {
        Square {
            x: file.index(),
            y: rank.row(),
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = match File::from_char(bytes[0] as char) {
            Some(f) => f,
            None => return None,
        };
        let rank = match Rank::from_char(bytes[1] as char) {
            Some(r) => r,
            None => return None,
        };
        Some(Square::from_file_rank(file, rank))
    }

    /// Grid column (0 = file a).
    #[inline]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Grid row (0 = rank 8).
    #[inline]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Returns the file of this square.
    #[inline]
    pub const fn file(self) -> File {
        match File::from_index(self.x) {
            Some(f) => f,
            None => unreachable!(),
        }
    }

    /// Returns the rank of this square.
    #[inline]
    pub const fn rank(self) -> Rank {
        match Rank::from_index(7 - self.y) {
            Some(r) => r,
            None => unreachable!(),
        }
    }

    /// Returns the square displaced by `(dx, dy)`, or `None` off the board.
    #[inline]
    pub const fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        Self::from_signed(self.x as i8 + dx, self.y as i8 + dy)
    }

    /// Iterates over all 64 squares column by column.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|x| (0..8u8).map(move |y| Square { x, y }))
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
