//! Chess rule engine over a signed-code 8x8 grid.
//!
//! This crate provides:
//! - [`Board`] - the grid plus castling flags, en passant target, move
//!   history and a self-validating king cache
//! - Move generation ([`possible_moves`], [`legal_moves`]) and the check
//!   oracle ([`check`], [`is_square_attacked`])
//! - Legality and end-of-game detection in [`rules`]
//! - Move execution with notation recording ([`move_piece`])
//! - SAN generation and parsing, PGN export
//! - [`Game`] - turn order and result on top of the board
//!
//! # Architecture
//!
//! Every question the engine answers about a hypothetical move is answered
//! on a copied [`Grid`], so queries never mutate the board they inspect.
//!
//! # Example
//!
//! ```
//! use chess_engine::{Game, GameStatus};
//!
//! let mut game = Game::new();
//! for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
//!     game.make_move_uci(mv).unwrap();
//! }
//! assert_eq!(game.status(), GameStatus::Checkmate);
//! assert_eq!(game.history().last().map(String::as_str), Some("Qh4#"));
//! ```

mod board;
mod execute;
mod game;
pub mod movegen;
pub mod pgn;
pub mod rules;
pub mod san;

pub use board::{Board, CastleSide, CastlingRights, Grid, KING_HOME_X};
pub use execute::{move_piece, move_piece_promoting, MoveKind, MoveOutcome};
pub use game::{Game, GameError};
pub use movegen::{
    all_legal_moves, check, is_square_attacked, legal_moves, possible_moves, Destinations,
};
pub use pgn::{write_pgn, PgnHeaders};
pub use rules::{
    can_castle, checkmate, is_valid_move, stalemate, status, would_be_in_check, DrawReason,
    GameResult, GameStatus,
};
pub use san::{move_to_san, san_to_move, SanError};
