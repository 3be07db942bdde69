//! Session glue between the rule engine and its surroundings.
//!
//! - [`SessionConfig`]: settings loaded from TOML
//! - [`NetMessage`]: the line-delimited JSON spoken over a LAN link
//! - [`Session`]: routes local, peer and engine moves into a
//!   [`chess_engine::Game`]
//!
//! Transports stay outside this crate. A LAN front end reads lines from its
//! socket into [`Session::handle_line`] and writes back whatever comes out;
//! a vs-computer front end hands a [`uci::UciClient`] to
//! [`Session::play_engine_turn`].

mod config;
mod message;
mod session;

pub use config::{ConfigError, Mode, SessionConfig, DEFAULT_PORT};
pub use message::{MessageKind, NetMessage};
pub use session::{Session, SessionError};
