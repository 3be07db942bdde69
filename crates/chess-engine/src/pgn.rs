//! PGN (Portable Game Notation) export.
//!
//! Produces the seven tag roster followed by numbered algebraic movetext,
//! readable by most chess software and databases.

use crate::GameResult;
use chess_core::Color;
use chrono::Local;
use std::io::{self, Write};

/// Maximum movetext line length.
const LINE_WIDTH: usize = 80;

/// Tag pairs written ahead of the movetext. The Result tag is derived from
/// the game itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgnHeaders {
    pub event: String,
    pub site: String,
    /// Formatted as `YYYY.MM.DD`.
    pub date: String,
    pub round: String,
    pub white: String,
    pub black: String,
}

impl Default for PgnHeaders {
    fn default() -> Self {
        PgnHeaders {
            event: "Casual Game".to_string(),
            site: "local".to_string(),
            date: Local::now().format("%Y.%m.%d").to_string(),
            round: "1".to_string(),
            white: "White".to_string(),
            black: "Black".to_string(),
        }
    }
}

impl PgnHeaders {
    /// Default headers with the given player names.
    pub fn with_players(white: impl Into<String>, black: impl Into<String>) -> Self {
        PgnHeaders {
            white: white.into(),
            black: black.into(),
            ..Self::default()
        }
    }
}

/// Returns the PGN result token; `None` means the game is still in progress.
pub fn result_token(result: Option<GameResult>) -> &'static str {
    match result {
        Some(GameResult::WhiteWins) => "1-0",
        Some(GameResult::BlackWins) => "0-1",
        Some(GameResult::Draw(_)) => "1/2-1/2",
        None => "*",
    }
}

/// Writes a game record.
///
/// `moves` is the algebraic history of the game in playing order, the first
/// one played by `first_to_move`.
pub fn write_pgn<W: Write>(
    mut writer: W,
    headers: &PgnHeaders,
    moves: &[String],
    first_to_move: Color,
    result: Option<GameResult>,
) -> io::Result<()> {
    let token = result_token(result);
    let tags = [
        ("Event", headers.event.as_str()),
        ("Site", headers.site.as_str()),
        ("Date", headers.date.as_str()),
        ("Round", headers.round.as_str()),
        ("White", headers.white.as_str()),
        ("Black", headers.black.as_str()),
        ("Result", token),
    ];
    for (name, value) in tags {
        writeln!(writer, "[{} \"{}\"]", name, escape(value))?;
    }
    writeln!(writer)?;

    for line in movetext_lines(moves, first_to_move, token) {
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Splits numbered movetext into lines no longer than [`LINE_WIDTH`],
/// breaking only between tokens.
///
/// A record opened by Black starts with `1...`.
fn movetext_lines(moves: &[String], first_to_move: Color, token: &str) -> Vec<String> {
    let offset = first_to_move.index();
    let mut tokens: Vec<String> = Vec::with_capacity(moves.len() * 3 / 2 + 2);
    for (i, mv) in moves.iter().enumerate() {
        let ply = i + offset;
        if ply % 2 == 0 {
            tokens.push(format!("{}.", ply / 2 + 1));
        } else if i == 0 {
            tokens.push(format!("{}...", ply / 2 + 1));
        }
        tokens.push(mv.clone());
    }
    tokens.push(token.to_string());

    let mut lines = Vec::new();
    let mut line = String::new();
    for token in tokens {
        if !line.is_empty() && line.len() + 1 + token.len() > LINE_WIDTH {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&token);
    }
    lines.push(line);
    lines
}
