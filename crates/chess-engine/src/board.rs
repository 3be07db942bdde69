//! Board state: the piece grid plus the auxiliary state the rules need.

use std::cell::Cell;

use chess_core::{parse_placement, write_placement, Color, FenError, Piece, Square, STARTPOS_PLACEMENT};

/// Which wing a castling move goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// Both sides, kingside first.
    pub const ALL: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// Column the rook starts on.
    #[inline]
    pub const fn rook_from_x(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// Column the rook lands on.
    #[inline]
    pub const fn rook_to_x(self) -> u8 {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }

    /// Column the king lands on.
    #[inline]
    pub const fn king_to_x(self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    /// Returns the side a king move between two columns castles to, if any.
    pub const fn from_king_move(from_x: u8, to_x: u8) -> Option<Self> {
        if from_x != KING_HOME_X {
            return None;
        }
        match to_x {
            6 => Some(CastleSide::Kingside),
            2 => Some(CastleSide::Queenside),
            _ => None,
        }
    }
}

/// Column both kings start on.
pub const KING_HOME_X: u8 = 4;

/// Castling eligibility, stored as "has moved" flags.
///
/// Every flag only ever goes from clear to set; nothing but a board reset
/// clears it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const WHITE_KING_MOVED: u8 = 0b00_0001;
    pub const BLACK_KING_MOVED: u8 = 0b00_0010;
    pub const WHITE_KINGSIDE_ROOK_MOVED: u8 = 0b00_0100;
    pub const WHITE_QUEENSIDE_ROOK_MOVED: u8 = 0b00_1000;
    pub const BLACK_KINGSIDE_ROOK_MOVED: u8 = 0b01_0000;
    pub const BLACK_QUEENSIDE_ROOK_MOVED: u8 = 0b10_0000;

    /// Nothing has moved yet.
    pub const UNMOVED: CastlingRights = CastlingRights(0);
    /// Every king and rook counts as moved.
    pub const ALL_MOVED: CastlingRights = CastlingRights(0b11_1111);

    /// Creates rights from raw flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b11_1111)
    }

    const fn king_flag(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KING_MOVED,
            Color::Black => Self::BLACK_KING_MOVED,
        }
    }

    const fn rook_flag(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => Self::WHITE_KINGSIDE_ROOK_MOVED,
            (Color::White, CastleSide::Queenside) => Self::WHITE_QUEENSIDE_ROOK_MOVED,
            (Color::Black, CastleSide::Kingside) => Self::BLACK_KINGSIDE_ROOK_MOVED,
            (Color::Black, CastleSide::Queenside) => Self::BLACK_QUEENSIDE_ROOK_MOVED,
        }
    }

    /// Returns true once the king of `color` has moved.
    #[inline]
    pub const fn king_moved(self, color: Color) -> bool {
        self.0 & Self::king_flag(color) != 0
    }

    /// Returns true once the given rook has moved (or been captured at home).
    #[inline]
    pub const fn rook_moved(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::rook_flag(color, side) != 0
    }

    /// Returns true while neither the king nor the rook of that wing has moved.
    #[inline]
    pub const fn is_available(self, color: Color, side: CastleSide) -> bool {
        !self.king_moved(color) && !self.rook_moved(color, side)
    }

    #[inline]
    pub fn mark_king_moved(&mut self, color: Color) {
        self.0 |= Self::king_flag(color);
    }

    #[inline]
    pub fn mark_rook_moved(&mut self, color: Color, side: CastleSide) {
        self.0 |= Self::rook_flag(color, side);
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// The 8x8 grid of signed piece codes, indexed `[x][y]`.
///
/// A `Grid` is a plain value: copying it is how speculative moves are
/// probed without touching the live board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid([[i8; 8]; 8]);

impl Grid {
    pub const EMPTY: Grid = Grid([[0; 8]; 8]);

    /// Wraps raw codes. Codes outside the piece table read as empty squares.
    #[inline]
    pub const fn from_codes(codes: [[i8; 8]; 8]) -> Self {
        Grid(codes)
    }

    /// Returns the raw codes.
    #[inline]
    pub const fn codes(&self) -> &[[i8; 8]; 8] {
        &self.0
    }

    /// Returns the signed code on a square (0 if empty).
    #[inline]
    pub const fn code(&self, sq: Square) -> i8 {
        self.0[sq.x() as usize][sq.y() as usize]
    }

    /// Returns the piece on a square.
    #[inline]
    pub const fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        Piece::from_code(self.code(sq))
    }

    /// Returns the color of the piece on a square.
    #[inline]
    pub const fn color_at(&self, sq: Square) -> Option<Color> {
        match self.piece_at(sq) {
            Some((_, color)) => Some(color),
            None => None,
        }
    }

    /// Returns true if no piece stands on the square.
    #[inline]
    pub const fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Places a piece on, or clears, a square.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<(Piece, Color)>) {
        self.0[sq.x() as usize][sq.y() as usize] = match piece {
            Some((piece, color)) => piece.code(color),
            None => 0,
        };
    }

    /// Finds the king of `color`, trying `hint` before scanning.
    pub fn locate_king(&self, color: Color, hint: Option<Square>) -> Option<Square> {
        let code = Piece::King.code(color);
        if let Some(sq) = hint {
            if self.code(sq) == code {
                return Some(sq);
            }
        }
        Square::all().find(|&sq| self.code(sq) == code)
    }

    /// Iterates over the squares holding a piece of `color`.
    pub fn squares_of(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(move |&sq| self.color_at(sq) == Some(color))
    }
}

/// Complete board state for one game.
///
/// The grid is the single source of truth; the rest is what the rules need
/// to remember between moves. The per-color king squares are a cache that
/// is re-validated against the grid on every read.
#[derive(Debug, Clone)]
pub struct Board {
    pub(crate) grid: Grid,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) history: Vec<String>,
    kings: [Cell<Option<Square>>; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates a board in the standard starting position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.reset();
        board
    }

    /// Creates an empty board with castling unavailable to both sides.
    pub fn empty() -> Self {
        Board {
            grid: Grid::EMPTY,
            castling: CastlingRights::ALL_MOVED,
            en_passant: None,
            history: Vec::new(),
            kings: [Cell::new(None), Cell::new(None)],
        }
    }

    /// Creates a board from a FEN piece placement.
    ///
    /// Kings and rooks standing on their starting squares count as unmoved,
    /// everything else as moved.
    pub fn from_placement(fen: &str) -> Result<Self, FenError> {
        let mut board = Self::empty();
        board.grid = Grid::from_codes(parse_placement(fen)?);
        board.castling = board.infer_castling();
        Ok(board)
    }

    /// Restores the starting position and clears every piece of auxiliary
    /// state, including the king cache.
    pub fn reset(&mut self) {
        // STARTPOS_PLACEMENT is a constant known to parse.
        self.grid = parse_placement(STARTPOS_PLACEMENT)
            .map(Grid::from_codes)
            .unwrap_or(Grid::EMPTY);
        self.castling = CastlingRights::UNMOVED;
        self.en_passant = None;
        self.history.clear();
        for cache in &self.kings {
            cache.set(None);
        }
    }

    fn infer_castling(&self) -> CastlingRights {
        let mut rights = CastlingRights::UNMOVED;
        for color in Color::ALL {
            let row = color.home_row();
            let king_home = Square::new(KING_HOME_X, row);
            if king_home.map(|sq| self.grid.piece_at(sq)) != Some(Some((Piece::King, color))) {
                rights.mark_king_moved(color);
            }
            for side in CastleSide::ALL {
                let rook_home = Square::new(side.rook_from_x(), row);
                if rook_home.map(|sq| self.grid.piece_at(sq)) != Some(Some((Piece::Rook, color))) {
                    rights.mark_rook_moved(color, side);
                }
            }
        }
        rights
    }

    /// Returns the grid for read access (e.g., by a renderer).
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the raw signed codes indexed `[x][y]`.
    #[inline]
    pub fn codes(&self) -> &[[i8; 8]; 8] {
        self.grid.codes()
    }

    /// Returns the piece on a square.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.grid.piece_at(sq)
    }

    /// Places a piece on, or clears, a square directly.
    ///
    /// This bypasses the rules entirely and is meant for setting up
    /// positions. Castling flags are left untouched.
    pub fn set(&mut self, sq: Square, piece: Option<(Piece, Color)>) {
        self.grid.set(sq, piece);
    }

    /// True if a White piece stands on `(x, y)`; false off the board.
    pub fn is_white(&self, x: i8, y: i8) -> bool {
        Square::from_signed(x, y).and_then(|sq| self.grid.color_at(sq)) == Some(Color::White)
    }

    /// True if a Black piece stands on `(x, y)`; false off the board.
    pub fn is_black(&self, x: i8, y: i8) -> bool {
        Square::from_signed(x, y).and_then(|sq| self.grid.color_at(sq)) == Some(Color::Black)
    }

    /// Returns the square a pawn may capture into en passant this turn.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Returns the castling moved-flags.
    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// Returns the algebraic notation of every executed move, in order.
    #[inline]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Returns the cached king square without validating it.
    #[inline]
    pub(crate) fn king_hint(&self, color: Color) -> Option<Square> {
        self.kings[color.index()].get()
    }

    /// Records where `color`'s king now stands.
    #[inline]
    pub(crate) fn note_king(&self, color: Color, sq: Square) {
        self.kings[color.index()].set(Some(sq));
    }

    /// Returns the square of `color`'s king, refreshing the cache if stale.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let cache = &self.kings[color.index()];
        let found = self.grid.locate_king(color, cache.get());
        cache.set(found);
        found
    }

    /// Serializes the grid as a FEN piece placement.
    pub fn to_placement(&self) -> String {
        write_placement(self.grid.codes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn starting_layout() {
        let board = Board::new();
        assert_eq!(board.piece_at(sq("e1")), Some((Piece::King, Color::White)));
        assert_eq!(board.piece_at(sq("d8")), Some((Piece::Queen, Color::Black)));
        assert_eq!(board.piece_at(sq("b1")), Some((Piece::Knight, Color::White)));
        assert_eq!(board.piece_at(sq("e4")), None);
        assert_eq!(board.codes()[0][7], 6);
        assert_eq!(board.codes()[4][0], -9);
        assert_eq!(board.castling(), CastlingRights::UNMOVED);
        assert_eq!(board.to_placement(), STARTPOS_PLACEMENT);
    }

    #[test]
    fn every_code_is_in_the_piece_table() {
        let board = Board::new();
        for column in board.codes() {
            for &code in column {
                assert!(code == 0 || Piece::from_code(code).is_some());
            }
        }
    }

    #[test]
    fn color_queries_are_false_off_board() {
        let board = Board::new();
        assert!(board.is_white(4, 7));
        assert!(board.is_black(4, 0));
        assert!(!board.is_white(4, 4));
        assert!(!board.is_white(-1, 7));
        assert!(!board.is_black(8, 0));
        assert!(!board.is_black(0, -1));
    }

    #[test]
    fn king_cache_follows_the_grid() {
        let mut board = Board::new();
        assert_eq!(board.king_square(Color::White), Some(sq("e1")));
        board.set(sq("e1"), None);
        board.set(sq("f2"), Some((Piece::King, Color::White)));
        assert_eq!(board.king_square(Color::White), Some(sq("f2")));
        board.set(sq("f2"), None);
        assert_eq!(board.king_square(Color::White), None);
    }

    #[test]
    fn reset_clears_auxiliary_state() {
        let mut board = Board::from_placement("4k3/8/8/8/8/8/8/4K3").unwrap();
        board.en_passant = Some(sq("e3"));
        board.history.push("e4".to_string());
        board.castling.mark_king_moved(Color::White);
        assert_eq!(board.king_square(Color::Black), Some(sq("e8")));

        board.reset();
        assert_eq!(board.en_passant(), None);
        assert!(board.history().is_empty());
        assert_eq!(board.castling(), CastlingRights::UNMOVED);
        assert_eq!(board.king_hint(Color::Black), None);
        assert_eq!(board.to_placement(), STARTPOS_PLACEMENT);
    }

    #[test]
    fn placement_infers_castling_flags() {
        let board = Board::from_placement("r3k3/8/8/8/8/8/8/4K2R").unwrap();
        let rights = board.castling();
        assert!(rights.is_available(Color::White, CastleSide::Kingside));
        assert!(!rights.is_available(Color::White, CastleSide::Queenside));
        assert!(rights.is_available(Color::Black, CastleSide::Queenside));
        assert!(!rights.is_available(Color::Black, CastleSide::Kingside));
    }

    #[test]
    fn castling_flags_are_monotonic() {
        let mut rights = CastlingRights::UNMOVED;
        rights.mark_rook_moved(Color::White, CastleSide::Kingside);
        rights.mark_rook_moved(Color::White, CastleSide::Kingside);
        assert!(rights.rook_moved(Color::White, CastleSide::Kingside));
        assert!(!rights.rook_moved(Color::White, CastleSide::Queenside));
        assert!(!rights.king_moved(Color::White));
        rights.mark_king_moved(Color::Black);
        assert!(!rights.is_available(Color::Black, CastleSide::Queenside));
        assert_eq!(CastlingRights::new(0xFF), CastlingRights::ALL_MOVED);
    }

    #[test]
    fn castle_side_geometry() {
        assert_eq!(CastleSide::from_king_move(4, 6), Some(CastleSide::Kingside));
        assert_eq!(CastleSide::from_king_move(4, 2), Some(CastleSide::Queenside));
        assert_eq!(CastleSide::from_king_move(4, 5), None);
        assert_eq!(CastleSide::from_king_move(5, 7), None);
        assert_eq!(CastleSide::Kingside.rook_to_x(), 5);
        assert_eq!(CastleSide::Queenside.rook_to_x(), 3);
    }
}
