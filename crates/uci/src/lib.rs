//! UCI (Universal Chess Interface) protocol, seen from the GUI side.
//!
//! This crate provides the commands a GUI sends to an external engine,
//! parsing of the engine's replies, and a blocking client that drives an
//! engine over any reader/writer pair.
//!
//! # Commands used
//!
//! - `uci` / `uciok` - Initialize engine, get id and options
//! - `setoption name <name> value <value>` - Configure strength
//! - `isready` / `readyok` - Synchronization
//! - `position startpos moves <move>...` - Set position
//! - `go movetime <ms>` - Start search, answered by `bestmove`
//! - `quit` - Exit engine

mod client;
mod command;
mod difficulty;

pub use client::UciClient;
pub use command::EngineCommand;
pub use difficulty::{Difficulty, MAX_SKILL_LEVEL};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UciError {
    #[error("Engine closed the connection")]
    Disconnected,
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Messages sent from engine to GUI.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineMessage {
    /// Engine identification.
    Id {
        name: Option<String>,
        author: Option<String>,
    },
    /// UCI initialization complete.
    UciOk,
    /// Engine is ready.
    ReadyOk,
    /// Search information, kept verbatim.
    Info(String),
    /// Best move found; `None` when the engine has no legal move.
    BestMove {
        mv: Option<String>,
        ponder: Option<String>,
    },
    /// Anything else (option declarations, copyright banners...).
    Unknown(String),
}

impl EngineMessage {
    /// Parse one line of engine output.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("uciok") => EngineMessage::UciOk,
            Some("readyok") => EngineMessage::ReadyOk,
            Some("info") => EngineMessage::Info(
                line.strip_prefix("info").unwrap_or_default().trim().to_string(),
            ),
            Some("id") => {
                let rest = |key: &str| {
                    line.strip_prefix("id")
                        .map(str::trim_start)
                        .and_then(|s| s.strip_prefix(key))
                        .map(|s| s.trim().to_string())
                };
                match parts.next() {
                    Some("name") => EngineMessage::Id {
                        name: rest("name"),
                        author: None,
                    },
                    Some("author") => EngineMessage::Id {
                        name: None,
                        author: rest("author"),
                    },
                    _ => EngineMessage::Unknown(line.to_string()),
                }
            }
            Some("bestmove") => {
                let mv = parts
                    .next()
                    .filter(|m| *m != "(none)" && *m != "0000")
                    .map(str::to_string);
                let ponder = match parts.next() {
                    Some("ponder") => parts.next().map(str::to_string),
                    _ => None,
                };
                EngineMessage::BestMove { mv, ponder }
            }
            _ => EngineMessage::Unknown(line.to_string()),
        }
    }
}
