//! LAN message codec.
//!
//! Peers exchange one JSON object per line, e.g.
//! `{"type":"move","data":"4,6,4,4"}`. The payload is always a string; its
//! meaning depends on the kind.

use chess_core::{Color, Move};
use serde::{Deserialize, Serialize};

/// The kinds of message two peers exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Connect,
    Disconnect,
    /// Payload is a move in wire format.
    Move,
    /// Payload is the FEN piece placement after the sender's last move.
    GameState,
    Chat,
    Ready,
    /// Payload is the winner, "white" or "black".
    GameOver,
    Error,
}

/// A single message on the LAN link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(default)]
    pub data: String,
}

impl NetMessage {
    pub fn new(kind: MessageKind, data: impl Into<String>) -> Self {
        NetMessage {
            kind,
            data: data.into(),
        }
    }

    pub fn connect(name: impl Into<String>) -> Self {
        Self::new(MessageKind::Connect, name)
    }

    pub fn ready() -> Self {
        Self::new(MessageKind::Ready, "")
    }

    pub fn disconnect() -> Self {
        Self::new(MessageKind::Disconnect, "")
    }

    pub fn chat(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Chat, text)
    }

    pub fn error(reason: impl Into<String>) -> Self {
        Self::new(MessageKind::Error, reason)
    }

    /// A move in `"fx,fy,tx,ty"` wire format.
    pub fn from_move(mv: Move) -> Self {
        Self::new(MessageKind::Move, mv.to_wire())
    }

    pub fn game_state(placement: impl Into<String>) -> Self {
        Self::new(MessageKind::GameState, placement)
    }

    pub fn game_over(winner: Color) -> Self {
        Self::new(MessageKind::GameOver, color_name(winner))
    }

    /// Reads the winner out of a GameOver payload.
    pub fn winner(&self) -> Option<Color> {
        if self.kind != MessageKind::GameOver {
            return None;
        }
        match self.data.trim().to_ascii_lowercase().as_str() {
            "white" => Some(Color::White),
            "black" => Some(Color::Black),
            _ => None,
        }
    }

    /// Serializes the message as a single line without the trailing newline.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses one line received from the peer.
    pub fn decode(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line.trim())
    }
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Square;
    use proptest::prelude::*;

    #[test]
    fn test_encode_move() {
        let mv = Move::new(
            Square::from_algebraic("e2").unwrap(),
            Square::from_algebraic("e4").unwrap(),
        );
        let line = NetMessage::from_move(mv).encode().unwrap();
        assert_eq!(line, r#"{"type":"move","data":"4,6,4,4"}"#);
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_decode_kinds() {
        let msg = NetMessage::decode(r#"{"type":"game_over","data":"black"}"#).unwrap();
        assert_eq!(msg.kind, MessageKind::GameOver);
        assert_eq!(msg.winner(), Some(Color::Black));

        let msg = NetMessage::decode("{\"type\":\"ready\"}\n").unwrap();
        assert_eq!(msg, NetMessage::ready());
        assert_eq!(msg.winner(), None);

        let msg = NetMessage::decode(r#"{"type":"game_state","data":"8/8/8/8/8/8/8/8"}"#).unwrap();
        assert_eq!(msg.kind, MessageKind::GameState);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(NetMessage::decode("").is_err());
        assert!(NetMessage::decode("move 4,6,4,4").is_err());
        assert!(NetMessage::decode(r#"{"type":"teleport","data":""}"#).is_err());
        assert!(NetMessage::decode(r#"{"data":"4,6,4,4"}"#).is_err());
    }

    #[test]
    fn test_winner_payload() {
        assert_eq!(NetMessage::game_over(Color::White).data, "white");
        assert_eq!(NetMessage::new(MessageKind::GameOver, "White").winner(), Some(Color::White));
        assert_eq!(NetMessage::new(MessageKind::GameOver, "draw").winner(), None);
        assert_eq!(NetMessage::new(MessageKind::Chat, "white").winner(), None);
    }

    proptest! {
        #[test]
        fn chat_text_survives_the_link(text in ".*") {
            let msg = NetMessage::chat(text);
            let line = msg.encode().unwrap();
            prop_assert!(!line.contains('\n'));
            prop_assert_eq!(NetMessage::decode(&line).unwrap(), msg);
        }
    }
}
