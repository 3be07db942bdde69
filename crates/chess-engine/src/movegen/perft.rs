//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree to a given depth,
//! which can be compared against published values. Pawns reaching the last
//! row promote to a queen only, so the published counts match up to the
//! depth where the first promotion appears.

use super::all_legal_moves;
use crate::execute::play;
use crate::Board;
use chess_core::{Color, Piece};

/// Counts the number of leaf nodes at the given depth with `color` to move.
pub fn perft(board: &Board, color: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = all_legal_moves(board, color);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in moves {
        let mut next = board.clone();
        if play(&mut next, m, Piece::Queen).is_some() {
            nodes += perft(&next, color.opposite(), depth - 1);
        }
    }
    nodes
}

/// Perft with divide: node count below each root move.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(board: &Board, color: Color, depth: u32) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = all_legal_moves(board, color)
        .into_iter()
        .map(|m| {
            let mut next = board.clone();
            let nodes = match play(&mut next, m, Piece::Queen) {
                Some(_) if depth > 1 => perft(&next, color.opposite(), depth - 1),
                _ => 1,
            };
            (m.to_uci(), nodes)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R";
    const POSITION3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8";

    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&Board::new(), Color::White, 1), 20);
    }

    #[test]
    fn perft_startpos_depth_2() {
        assert_eq!(perft(&Board::new(), Color::White, 2), 400);
    }

    #[test]
    fn perft_startpos_depth_3() {
        assert_eq!(perft(&Board::new(), Color::White, 3), 8902);
    }

    // Slow in debug builds.
    #[test]
    #[ignore]
    fn perft_startpos_depth_4() {
        assert_eq!(perft(&Board::new(), Color::White, 4), 197281);
    }

    // Kiwipete: castling both ways, pins and en passant.
    #[test]
    fn perft_kiwipete_depth_1() {
        let board = Board::from_placement(KIWIPETE).unwrap();
        assert_eq!(perft(&board, Color::White, 1), 48);
    }

    #[test]
    fn perft_kiwipete_depth_2() {
        let board = Board::from_placement(KIWIPETE).unwrap();
        assert_eq!(perft(&board, Color::White, 2), 2039);
    }

    // Position 3: check evasion and en passant along a rank.
    #[test]
    fn perft_position3_depth_1() {
        let board = Board::from_placement(POSITION3).unwrap();
        assert_eq!(perft(&board, Color::White, 1), 14);
    }

    #[test]
    fn perft_position3_depth_2() {
        let board = Board::from_placement(POSITION3).unwrap();
        assert_eq!(perft(&board, Color::White, 2), 191);
    }

    #[test]
    fn perft_position3_depth_3() {
        let board = Board::from_placement(POSITION3).unwrap();
        assert_eq!(perft(&board, Color::White, 3), 2812);
    }

    #[test]
    fn perft_divide_works() {
        let results = perft_divide(&Board::new(), Color::White, 1);
        assert_eq!(results.len(), 20);
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 20);

        let results = perft_divide(&Board::new(), Color::White, 2);
        assert!(results.iter().all(|(_, n)| *n == 20));
    }
}
