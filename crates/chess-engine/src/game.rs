//! Turn-ordered game on top of the rule engine.
//!
//! The [`Game`] struct adds what a single [`Board`] does not track: whose
//! turn it is, whether the game has ended, and the moves in coordinate
//! notation as an external engine expects them.

use crate::execute::{move_piece_promoting, MoveOutcome};
use crate::movegen::{legal_moves, Destinations};
use crate::pgn::{write_pgn, PgnHeaders};
use crate::rules::{self, GameResult, GameStatus};
use crate::san::{san_to_move, SanError};
use crate::Board;
use chess_core::{Color, Move, MoveParseError, Piece, Square};
use thiserror::Error;
use tracing::info;

/// Error type for game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game has already ended")]
    GameAlreadyOver,

    #[error("it is not {0}'s turn")]
    NotYourTurn(Color),

    #[error("illegal move: {0}")]
    IllegalMove(Move),

    #[error("invalid move text: {0}")]
    Notation(#[from] MoveParseError),

    #[error("invalid SAN: {0}")]
    InvalidSan(#[from] SanError),
}

/// A game between two sides, White moving first unless set up otherwise.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    first_to_move: Color,
    turn: Color,
    status: GameStatus,
    result: Option<GameResult>,
    uci_moves: Vec<String>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game from the standard starting position.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Color::White)
    }

    /// Creates a game from a prepared board with `turn` to move.
    pub fn from_board(board: Board, turn: Color) -> Self {
        let status = rules::status(&board, turn);
        Game {
            board,
            first_to_move: turn,
            turn,
            status,
            result: status.result(turn),
            uci_moves: Vec::new(),
        }
    }

    /// Starts over from the initial position with White to move.
    pub fn reset(&mut self) {
        self.board.reset();
        self.first_to_move = Color::White;
        self.turn = Color::White;
        self.status = GameStatus::Ongoing;
        self.result = None;
        self.uci_moves.clear();
    }

    /// The side that played the first recorded move.
    pub fn first_to_move(&self) -> Color {
        self.first_to_move
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the situation of the side to move.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the result once the game has ended.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Returns true once the game has ended.
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Returns the moves played so far in coordinate notation.
    pub fn uci_moves(&self) -> &[String] {
        &self.uci_moves
    }

    /// Returns the algebraic notation of the moves played so far.
    pub fn history(&self) -> &[String] {
        self.board.history()
    }

    /// Returns the legal destinations of the piece on `from`, which must
    /// belong to the side to move; otherwise the list is empty.
    pub fn legal_destinations(&self, from: Square) -> Destinations {
        match self.board.piece_at(from) {
            Some((_, color)) if color == self.turn && !self.is_over() => {
                legal_moves(&self.board, from)
            }
            _ => Destinations::new(),
        }
    }

    /// Plays a move for the side to move, promoting to a queen.
    pub fn make_move(&mut self, mv: Move) -> Result<MoveOutcome, GameError> {
        self.make_move_promoting(mv, Piece::Queen)
    }

    /// Plays a move for the side to move with an explicit promotion choice.
    pub fn make_move_promoting(
        &mut self,
        mv: Move,
        promotion: Piece,
    ) -> Result<MoveOutcome, GameError> {
        if self.is_over() {
            return Err(GameError::GameAlreadyOver);
        }
        match self.board.piece_at(mv.from) {
            None => return Err(GameError::IllegalMove(mv)),
            Some((_, color)) if color != self.turn => return Err(GameError::NotYourTurn(color)),
            Some(_) => {}
        }
        if !rules::is_valid_move(&self.board, mv) {
            return Err(GameError::IllegalMove(mv));
        }

        let outcome =
            move_piece_promoting(&mut self.board, mv, promotion).ok_or(GameError::IllegalMove(mv))?;

        self.uci_moves.push(match outcome.promotion {
            Some(piece) => mv.to_uci_promoting(piece),
            None => mv.to_uci(),
        });
        self.turn = self.turn.opposite();
        self.status = outcome.status;
        self.result = outcome.status.result(self.turn);
        if let Some(result) = self.result {
            info!(?result, moves = self.uci_moves.len(), "game over");
        }
        Ok(outcome)
    }

    /// Plays a move given in coordinate notation (e.g. "e2e4", "e7e8n").
    pub fn make_move_uci(&mut self, uci: &str) -> Result<MoveOutcome, GameError> {
        let (mv, promotion) = Move::from_uci(uci)?;
        self.make_move_promoting(mv, promotion.unwrap_or(Piece::Queen))
    }

    /// Plays a move given in the LAN wire format (e.g. "4,6,4,4").
    pub fn make_move_wire(&mut self, wire: &str) -> Result<MoveOutcome, GameError> {
        let mv = Move::from_wire(wire)?;
        self.make_move(mv)
    }

    /// Plays a move given in algebraic notation (e.g. "Nf3", "O-O").
    pub fn make_move_san(&mut self, san: &str) -> Result<MoveOutcome, GameError> {
        if self.is_over() {
            return Err(GameError::GameAlreadyOver);
        }
        let (mv, promotion) = san_to_move(&self.board, self.turn, san)?;
        self.make_move_promoting(mv, promotion.unwrap_or(Piece::Queen))
    }

    /// Renders the game record as PGN.
    pub fn to_pgn(&self, headers: &PgnHeaders) -> String {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = write_pgn(
            &mut out,
            headers,
            self.board.history(),
            self.first_to_move,
            self.result,
        );
        String::from_utf8_lossy(&out).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DrawReason;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.status(), GameStatus::Ongoing);
        assert!(!game.is_over());
        assert!(game.uci_moves().is_empty());
    }

    #[test]
    fn turns_alternate() {
        let mut game = Game::new();
        game.make_move_uci("e2e4").unwrap();
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(
            game.make_move_uci("d2d4"),
            Err(GameError::NotYourTurn(Color::White))
        );
        game.make_move_uci("e7e5").unwrap();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.uci_moves(), ["e2e4", "e7e5"]);
        assert_eq!(game.history(), ["e4", "e5"]);
    }

    #[test]
    fn illegal_move_leaves_game_unchanged() {
        let mut game = Game::new();
        let mv = Move::from_uci("e2e5").unwrap().0;
        assert_eq!(game.make_move(mv), Err(GameError::IllegalMove(mv)));
        let empty = Move::from_uci("e4e5").unwrap().0;
        assert_eq!(game.make_move(empty), Err(GameError::IllegalMove(empty)));
        assert_eq!(game.turn(), Color::White);
        assert!(game.history().is_empty());
    }

    #[test]
    fn malformed_text_is_a_notation_error() {
        let mut game = Game::new();
        assert!(matches!(game.make_move_uci("zz"), Err(GameError::Notation(_))));
        assert!(matches!(
            game.make_move_wire("4,6,4"),
            Err(GameError::Notation(MoveParseError::FieldCount(3)))
        ));
        assert!(matches!(game.make_move_san("Qz9"), Err(GameError::InvalidSan(_))));
    }

    #[test]
    fn wire_and_san_moves() {
        let mut game = Game::new();
        let outcome = game.make_move_wire("6,6,6,4").unwrap();
        assert_eq!(outcome.san, "g4");
        let outcome = game.make_move_san("Nf6").unwrap();
        assert_eq!(outcome.mv, Move::from_uci("g8f6").unwrap().0);
        assert_eq!(game.uci_moves(), ["g2g4", "g8f6"]);
    }

    #[test]
    fn legal_destinations_respect_turn() {
        let mut game = Game::new();
        assert_eq!(game.legal_destinations(sq("b1")).len(), 2);
        assert!(game.legal_destinations(sq("b8")).is_empty());
        assert!(game.legal_destinations(sq("e4")).is_empty());
        game.make_move_uci("e2e4").unwrap();
        assert_eq!(game.legal_destinations(sq("b8")).len(), 2);
    }

    #[test]
    fn checkmate_fools_mate() {
        let mut game = Game::new();
        for san in ["f3", "e5", "g4"] {
            game.make_move_san(san).unwrap();
        }
        let outcome = game.make_move_san("Qh4#").unwrap();
        assert_eq!(outcome.status, GameStatus::Checkmate);
        assert_eq!(game.status(), GameStatus::Checkmate);
        assert_eq!(game.result(), Some(GameResult::BlackWins));
        assert_eq!(
            game.make_move_uci("a2a3"),
            Err(GameError::GameAlreadyOver)
        );
    }

    #[test]
    fn stalemate_ends_in_draw() {
        let board = Board::from_placement("k7/8/1K6/8/8/8/8/2Q5").unwrap();
        let mut game = Game::from_board(board, Color::White);
        game.make_move_uci("c1c7").unwrap();
        assert_eq!(game.status(), GameStatus::Stalemate);
        assert_eq!(game.result(), Some(GameResult::Draw(DrawReason::Stalemate)));
    }

    #[test]
    fn promotion_is_recorded_with_piece_letter() {
        let board = Board::from_placement("7k/P7/8/8/8/8/8/K7").unwrap();
        let mut game = Game::from_board(board, Color::White);
        game.make_move_uci("a7a8").unwrap();
        assert_eq!(game.uci_moves(), ["a7a8q"]);

        let board = Board::from_placement("7k/P7/8/8/8/8/8/K7").unwrap();
        let mut game = Game::from_board(board, Color::White);
        game.make_move_uci("a7a8n").unwrap();
        assert_eq!(game.uci_moves(), ["a7a8n"]);
        assert_eq!(
            game.board().piece_at(sq("a8")),
            Some((Piece::Knight, Color::White))
        );
    }

    #[test]
    fn reset_restores_start() {
        let mut game = Game::new();
        for san in ["f3", "e5", "g4", "Qh4"] {
            game.make_move_san(san).unwrap();
        }
        assert!(game.is_over());
        game.reset();
        assert!(!game.is_over());
        assert_eq!(game.turn(), Color::White);
        assert!(game.uci_moves().is_empty());
        assert!(game.history().is_empty());
        assert_eq!(game.board().to_placement(), chess_core::STARTPOS_PLACEMENT);
    }

    #[test]
    fn pgn_export() {
        let mut game = Game::new();
        for san in ["f3", "e5", "g4", "Qh4#"] {
            game.make_move_san(san).unwrap();
        }
        let pgn = game.to_pgn(&PgnHeaders::default());
        assert!(pgn.contains("[Result \"0-1\"]"));
        assert!(pgn.contains("1. f3 e5 2. g4 Qh4# 0-1"));
    }

    #[test]
    fn pgn_export_when_black_starts() {
        let board = Board::from_placement("4k3/4p3/8/8/8/8/8/4K3").unwrap();
        let mut game = Game::from_board(board, Color::Black);
        game.make_move_uci("e7e5").unwrap();
        game.make_move_uci("e1e2").unwrap();
        assert_eq!(game.first_to_move(), Color::Black);

        let pgn = game.to_pgn(&PgnHeaders::default());
        assert!(pgn.ends_with("\n1... e5 2. Ke2 *\n"), "{pgn}");

        game.reset();
        assert_eq!(game.first_to_move(), Color::White);
    }
}
