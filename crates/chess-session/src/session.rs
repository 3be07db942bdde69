//! Session state machine.
//!
//! A [`Session`] owns the [`Game`] and decides who may move it: the local
//! player, the peer on the LAN link, or the engine. It never touches a
//! socket or a process itself. Callers feed it moves and messages, and
//! send whatever it hands back.

use crate::config::{Mode, SessionConfig};
use crate::message::{MessageKind, NetMessage};
use chess_core::{Color, Move, Piece};
use chess_engine::{
    write_pgn, Game, GameError, GameResult, GameStatus, MoveOutcome, PgnHeaders,
};
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::{debug, info, warn};
use uci::{UciClient, UciError};

/// Error type for session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("it is not the local player's turn")]
    NotLocalTurn,

    #[error("it is not the engine's turn")]
    NotEngineTurn,

    #[error("no opponent is connected")]
    OpponentNotConnected,

    #[error("engine returned no move")]
    EngineNoMove,

    #[error("engine error: {0}")]
    Engine(#[from] UciError),
}

/// One game plus the bookkeeping of who is allowed to move next.
#[derive(Debug, Clone)]
pub struct Session {
    game: Game,
    mode: Mode,
    local_color: Option<Color>,
    opponent_connected: bool,
    waiting_for_move: bool,
    remote_winner: Option<Color>,
    headers: PgnHeaders,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Self {
        let mut session = Self::with_mode(config.mode);
        session.headers =
            PgnHeaders::with_players(config.player_white.clone(), config.player_black.clone());
        session
    }

    /// Creates a session with default player names.
    pub fn with_mode(mode: Mode) -> Self {
        let local_color = match mode {
            Mode::TwoPlayer => None,
            Mode::VsComputer | Mode::LanHost => Some(Color::White),
            Mode::LanClient => Some(Color::Black),
        };
        Session {
            game: Game::new(),
            mode,
            local_color,
            opponent_connected: mode == Mode::TwoPlayer || mode == Mode::VsComputer,
            waiting_for_move: false,
            remote_winner: None,
            headers: PgnHeaders::default(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The colour played on this machine, `None` when both are.
    pub fn local_color(&self) -> Option<Color> {
        self.local_color
    }

    pub fn opponent_connected(&self) -> bool {
        self.opponent_connected
    }

    /// True while the peer or the engine owes a move.
    pub fn waiting_for_move(&self) -> bool {
        self.waiting_for_move
    }

    /// Winner from the board, or as announced by the peer.
    pub fn winner(&self) -> Option<Color> {
        self.game
            .result()
            .and_then(|result| result.winner())
            .or(self.remote_winner)
    }

    pub fn is_over(&self) -> bool {
        self.game.is_over() || self.remote_winner.is_some()
    }

    pub fn is_local_turn(&self) -> bool {
        match self.local_color {
            None => true,
            Some(color) => color == self.game.turn(),
        }
    }

    pub fn is_engine_turn(&self) -> bool {
        self.mode == Mode::VsComputer && !self.is_local_turn() && !self.is_over()
    }

    /// Starts a fresh game, keeping mode and connection state.
    pub fn reset(&mut self) {
        self.game.reset();
        self.remote_winner = None;
        self.waiting_for_move = false;
        info!(mode = ?self.mode, "new game");
    }

    /// Plays a move for the local player, promoting to a queen.
    ///
    /// Returns the messages to send to the peer; empty outside LAN modes.
    pub fn local_move(&mut self, mv: Move) -> Result<Vec<NetMessage>, SessionError> {
        self.local_move_promoting(mv, Piece::Queen)
    }

    /// Plays a move for the local player with an explicit promotion choice.
    ///
    /// The wire format carries no promotion piece, so LAN games always
    /// promote to a queen.
    pub fn local_move_promoting(
        &mut self,
        mv: Move,
        promotion: Piece,
    ) -> Result<Vec<NetMessage>, SessionError> {
        if self.remote_winner.is_some() {
            return Err(GameError::GameAlreadyOver.into());
        }
        if !self.is_local_turn() {
            return Err(SessionError::NotLocalTurn);
        }
        if !self.opponent_connected {
            return Err(SessionError::OpponentNotConnected);
        }
        let promotion = if self.mode.is_lan() {
            Piece::Queen
        } else {
            promotion
        };

        let outcome = self.game.make_move_promoting(mv, promotion)?;
        self.waiting_for_move = self.mode != Mode::TwoPlayer && !self.game.is_over();
        debug!(san = %outcome.san, "local move");

        if !self.mode.is_lan() {
            return Ok(Vec::new());
        }
        let mut outgoing = vec![NetMessage::from_move(mv)];
        if outcome.status == GameStatus::Checkmate {
            outgoing.push(NetMessage::game_over(outcome.color));
        }
        Ok(outgoing)
    }

    /// Decodes and handles one line from the peer.
    ///
    /// Undecodable lines are logged and dropped.
    pub fn handle_line(&mut self, line: &str) -> Vec<NetMessage> {
        match NetMessage::decode(line) {
            Ok(msg) => self.handle_message(&msg),
            Err(e) => {
                warn!(error = %e, line, "dropping malformed message");
                Vec::new()
            }
        }
    }

    /// Handles a message from the peer and returns the replies to send.
    ///
    /// Invalid input never changes the game.
    pub fn handle_message(&mut self, msg: &NetMessage) -> Vec<NetMessage> {
        match msg.kind {
            MessageKind::Connect => {
                self.peer_joined();
                info!(peer = %msg.data, "opponent connected");
                Vec::new()
            }
            MessageKind::Ready => {
                self.peer_joined();
                info!("opponent ready");
                if self.mode == Mode::LanHost {
                    vec![NetMessage::connect("Game started")]
                } else {
                    Vec::new()
                }
            }
            MessageKind::Disconnect => {
                self.opponent_connected = false;
                self.waiting_for_move = false;
                info!("opponent disconnected");
                Vec::new()
            }
            MessageKind::Move => self.remote_move(&msg.data),
            MessageKind::GameState => {
                let placement = self.game.board().to_placement();
                if msg.data.trim() != placement {
                    warn!(peer = %msg.data, local = %placement, "peer position differs");
                }
                Vec::new()
            }
            MessageKind::Chat => {
                info!(text = %msg.data, "chat");
                Vec::new()
            }
            MessageKind::GameOver => {
                match msg.winner() {
                    Some(winner) => {
                        let local = self.game.result().and_then(|result| result.winner());
                        if local.is_some_and(|color| color != winner) {
                            warn!(?winner, ?local, "peer announced a different winner");
                        }
                        self.remote_winner = Some(winner);
                        self.waiting_for_move = false;
                        info!(?winner, "game over");
                    }
                    None => warn!(data = %msg.data, "unreadable game over payload"),
                }
                Vec::new()
            }
            MessageKind::Error => {
                warn!(reason = %msg.data, "peer reported an error");
                Vec::new()
            }
        }
    }

    /// The first message a joining client sends to the host.
    pub fn greeting(&self) -> Option<NetMessage> {
        (self.mode == Mode::LanClient).then(NetMessage::ready)
    }

    fn peer_joined(&mut self) {
        self.opponent_connected = true;
        self.waiting_for_move = !self.is_local_turn() && !self.is_over();
    }

    fn remote_move(&mut self, data: &str) -> Vec<NetMessage> {
        if !self.mode.is_lan() {
            warn!(data, "move message outside a LAN game");
            return Vec::new();
        }
        if self.is_over() {
            warn!(data, "move received after the game ended");
            return vec![NetMessage::error("game is over")];
        }
        if self.is_local_turn() {
            warn!(data, "move received out of turn");
            return vec![NetMessage::error("not your turn")];
        }
        match self.game.make_move_wire(data) {
            Ok(outcome) => {
                self.waiting_for_move = false;
                debug!(san = %outcome.san, "remote move");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, data, "rejected remote move");
                vec![NetMessage::error(e.to_string())]
            }
        }
    }

    /// Plays the engine's answer, given in coordinate notation.
    ///
    /// `None` is what the engine reports when it has no legal move.
    pub fn engine_move(&mut self, uci: Option<&str>) -> Result<MoveOutcome, SessionError> {
        if !self.is_engine_turn() {
            return Err(SessionError::NotEngineTurn);
        }
        let uci = uci.ok_or(SessionError::EngineNoMove)?;
        let outcome = self.game.make_move_uci(uci)?;
        self.waiting_for_move = false;
        debug!(san = %outcome.san, "engine move");
        Ok(outcome)
    }

    /// Asks the engine for its move and plays it.
    pub fn play_engine_turn<R: BufRead, W: Write>(
        &mut self,
        engine: &mut UciClient<R, W>,
    ) -> Result<MoveOutcome, SessionError> {
        if !self.is_engine_turn() {
            return Err(SessionError::NotEngineTurn);
        }
        let answer = engine.best_move(self.game.uci_moves())?;
        self.engine_move(answer.as_deref())
    }

    /// The current placement, for resynchronising a peer.
    pub fn state_message(&self) -> NetMessage {
        NetMessage::game_state(self.game.board().to_placement())
    }

    /// The game record, with a result announced by the peer when the local
    /// board has none.
    pub fn to_pgn(&self) -> String {
        let result = self
            .game
            .result()
            .or(self.remote_winner.map(GameResult::win_for));
        let mut out = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = write_pgn(
            &mut out,
            &self.headers,
            self.game.history(),
            self.game.first_to_move(),
            result,
        );
        String::from_utf8_lossy(&out).into_owned()
    }
}
