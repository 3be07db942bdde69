//! Move generation.
//!
//! [`possible_moves`] lists the squares a piece can reach by its movement
//! rules alone. Leaving one's own king in check is filtered afterwards by
//! [`legal_moves`], which probes every candidate on a scratch grid. The
//! one exception is the king itself: its steps onto attacked squares and
//! its castling path are rejected here already.

mod attacks;
pub mod perft;

use crate::rules::{can_castle, would_be_in_check};
use crate::board::KING_HOME_X;
use crate::{Board, CastleSide, Grid};
use chess_core::{Color, Move, Piece, Square};

pub use attacks::{check, is_square_attacked, king_attacked};

/// Rook directions.
pub(crate) const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Bishop directions.
pub(crate) const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Destination squares for one piece, with a fixed maximum capacity.
///
/// A queen in the open reaches 27 squares and a king at most 10, so a
/// small inline array avoids heap allocations during generation.
#[derive(Clone)]
pub struct Destinations {
    squares: [Square; Self::MAX],
    len: usize,
}

impl Destinations {
    /// Maximum number of destinations any single piece can have.
    pub const MAX: usize = 32;

    /// Creates an empty list.
    #[inline]
    pub const fn new() -> Self {
        Destinations {
            squares: [Square::A8; Self::MAX],
            len: 0,
        }
    }

    #[inline]
    fn push(&mut self, sq: Square) {
        debug_assert!(self.len < Self::MAX);
        self.squares[self.len] = sq;
        self.len += 1;
    }

    /// Returns the number of destinations.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the destinations.
    #[inline]
    pub fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len]
    }

    /// Returns true if `sq` is in the list.
    #[inline]
    pub fn contains(&self, sq: Square) -> bool {
        self.as_slice().contains(&sq)
    }

    /// Returns an iterator over the destinations.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Square> {
        self.as_slice().iter()
    }

    /// Retains only destinations for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(Square) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(self.squares[read]) {
                self.squares[write] = self.squares[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for Destinations {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for Destinations {
    type Output = Square;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a Destinations {
    type Item = &'a Square;
    type IntoIter = std::slice::Iter<'a, Square>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for Destinations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Returns every square the piece on `from` may move to by its own
/// movement rules. An empty square yields an empty list.
///
/// Moves of non-king pieces may still expose their own king; see
/// [`legal_moves`] for the filtered list.
pub fn possible_moves(board: &Board, from: Square) -> Destinations {
    let mut moves = Destinations::new();
    let Some((piece, color)) = board.piece_at(from) else {
        return moves;
    };

    let grid = board.grid();
    match piece {
        Piece::Pawn => pawn_moves(board, from, color, &mut moves),
        Piece::Knight => step_moves(grid, from, color, &KNIGHT_OFFSETS, &mut moves),
        Piece::Bishop => slide_moves(grid, from, color, &DIAGONAL, &mut moves),
        Piece::Rook => slide_moves(grid, from, color, &ORTHOGONAL, &mut moves),
        Piece::Queen => {
            slide_moves(grid, from, color, &ORTHOGONAL, &mut moves);
            slide_moves(grid, from, color, &DIAGONAL, &mut moves);
        }
        Piece::King => king_moves(board, from, color, &mut moves),
    }
    moves
}

/// Returns the destinations from `from` that do not leave the mover's own
/// king in check.
pub fn legal_moves(board: &Board, from: Square) -> Destinations {
    let mut moves = possible_moves(board, from);
    if let Some((_, color)) = board.piece_at(from) {
        moves.retain(|to| !would_be_in_check(board, Move::new(from, to), color));
    }
    moves
}

/// Returns every legal move for `color`.
pub fn all_legal_moves(board: &Board, color: Color) -> Vec<Move> {
    board
        .grid()
        .squares_of(color)
        .flat_map(|from| {
            legal_moves(board, from)
                .iter()
                .map(move |&to| Move::new(from, to))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn pawn_moves(board: &Board, from: Square, color: Color, moves: &mut Destinations) {
    let grid = board.grid();
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(0, dir).filter(|&sq| grid.is_empty(sq)) {
        moves.push(one);
        if from.y() == color.pawn_row() {
            if let Some(two) = from.offset(0, 2 * dir).filter(|&sq| grid.is_empty(sq)) {
                moves.push(two);
            }
        }
    }

    for dx in [-1, 1] {
        let Some(to) = from.offset(dx, dir) else {
            continue;
        };
        if grid.color_at(to) == Some(color.opposite()) {
            moves.push(to);
        } else if board.en_passant() == Some(to) && grid.is_empty(to) {
            // The pawn that double-stepped stands beside us, on the target's file.
            let passed = from.offset(dx, 0).and_then(|sq| grid.piece_at(sq));
            if passed == Some((Piece::Pawn, color.opposite())) {
                moves.push(to);
            }
        }
    }
}

fn step_moves(
    grid: &Grid,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    moves: &mut Destinations,
) {
    for &(dx, dy) in offsets {
        if let Some(to) = from.offset(dx, dy) {
            if grid.color_at(to) != Some(color) {
                moves.push(to);
            }
        }
    }
}

fn slide_moves(
    grid: &Grid,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    moves: &mut Destinations,
) {
    for &(dx, dy) in directions {
        let mut current = from;
        while let Some(to) = current.offset(dx, dy) {
            match grid.color_at(to) {
                None => moves.push(to),
                Some(occupant) => {
                    if occupant != color {
                        moves.push(to);
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

fn king_moves(board: &Board, from: Square, color: Color, moves: &mut Destinations) {
    // Attacks are judged with the king lifted off, so it cannot hide
    // behind itself along a slider's line.
    let mut scratch = *board.grid();
    scratch.set(from, None);

    for &(dx, dy) in &KING_OFFSETS {
        let Some(to) = from.offset(dx, dy) else {
            continue;
        };
        if scratch.color_at(to) != Some(color)
            && !is_square_attacked(&scratch, to, color.opposite())
        {
            moves.push(to);
        }
    }

    if Square::new(KING_HOME_X, color.home_row()) != Some(from) {
        return;
    }
    for side in CastleSide::ALL {
        if can_castle(board, color, side) {
            if let Some(to) = Square::new(side.king_to_x(), color.home_row()) {
                moves.push(to);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn sorted(moves: &Destinations) -> Vec<String> {
        let mut names: Vec<String> = moves.iter().map(|s| s.to_algebraic()).collect();
        names.sort();
        names
    }

    #[test]
    fn empty_square_has_no_moves() {
        let board = Board::new();
        assert!(possible_moves(&board, sq("e4")).is_empty());
        assert!(legal_moves(&board, sq("d5")).is_empty());
    }

    #[test]
    fn starting_moves() {
        let board = Board::new();
        assert_eq!(sorted(&possible_moves(&board, sq("e2"))), ["e3", "e4"]);
        assert_eq!(sorted(&possible_moves(&board, sq("g1"))), ["f3", "h3"]);
        assert_eq!(sorted(&possible_moves(&board, sq("b8"))), ["a6", "c6"]);
        assert!(possible_moves(&board, sq("a1")).is_empty());
        assert!(possible_moves(&board, sq("e1")).is_empty());
        assert!(possible_moves(&board, sq("d8")).is_empty());
        assert_eq!(all_legal_moves(&board, Color::White).len(), 20);
        assert_eq!(all_legal_moves(&board, Color::Black).len(), 20);
    }

    #[test]
    fn blocked_pawn_cannot_double_step() {
        let mut board = Board::new();
        board.set(sq("e3"), Some((Piece::Knight, Color::Black)));
        assert!(possible_moves(&board, sq("e2")).is_empty());
        assert_eq!(sorted(&possible_moves(&board, sq("d2"))), ["d3", "d4", "e3"]);

        board.set(sq("e3"), None);
        board.set(sq("e4"), Some((Piece::Knight, Color::Black)));
        assert_eq!(sorted(&possible_moves(&board, sq("e2"))), ["e3"]);
    }

    #[test]
    fn sliders_stop_at_first_piece() {
        let board = Board::from_placement("4k3/8/8/3p4/8/8/3R4/4K3").unwrap();
        let rook = sorted(&possible_moves(&board, sq("d2")));
        assert_eq!(
            rook,
            ["a2", "b2", "c2", "d1", "d3", "d4", "d5", "e2", "f2", "g2", "h2"]
        );
    }

    #[test]
    fn queen_in_the_open() {
        let board = Board::from_placement("k7/8/8/8/3Q4/8/8/7K").unwrap();
        assert_eq!(possible_moves(&board, sq("d4")).len(), 27);
    }

    #[test]
    fn king_avoids_attacked_squares() {
        // Black rook on the second rank covers every square the king could step to on it.
        let board = Board::from_placement("4k3/8/8/8/8/8/r7/4K3").unwrap();
        assert_eq!(sorted(&possible_moves(&board, sq("e1"))), ["d1", "f1"]);
    }

    #[test]
    fn king_cannot_retreat_along_checking_line() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/r3K3").unwrap();
        let moves = sorted(&possible_moves(&board, sq("e1")));
        assert!(!moves.contains(&"f1".to_string()));
        assert!(moves.contains(&"e2".to_string()));
    }

    #[test]
    fn king_never_captures_own_piece() {
        let board = Board::new();
        let king = possible_moves(&board, sq("e1"));
        assert!(king.iter().all(|&to| board.grid().color_at(to) != Some(Color::White)));
    }

    #[test]
    fn pinned_piece_is_filtered_by_legal_moves() {
        let board = Board::from_placement("4r1k1/8/8/8/8/8/4B3/4K3").unwrap();
        assert!(!possible_moves(&board, sq("e2")).is_empty());
        assert!(legal_moves(&board, sq("e2")).is_empty());
    }

    #[test]
    fn destinations_retain() {
        let board = Board::new();
        let mut moves = possible_moves(&board, sq("e2"));
        moves.retain(|to| to == sq("e4"));
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0], sq("e4"));
        assert_eq!(format!("{:?}", moves), "[Square(e4)]");
    }
}
