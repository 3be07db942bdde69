//! Blocking client for an external UCI engine.
//!
//! The client is generic over its transport so it can talk to a spawned
//! process as well as to in-memory buffers.

use crate::{Difficulty, EngineCommand, EngineMessage, UciError};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use tracing::{debug, info, trace};

/// Drives a UCI engine: handshake, strength settings, and move requests.
///
/// # Lifecycle
///
/// 1. Connect with [`UciClient::new`] or [`UciClient::spawn`]
/// 2. Run [`UciClient::handshake`] once
/// 3. Request moves with [`UciClient::best_move`], calling
///    [`UciClient::new_game`] between games
/// 4. Finish with [`UciClient::quit`]
pub struct UciClient<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    name: Option<String>,
    difficulty: Difficulty,
}

impl UciClient<BufReader<ChildStdout>, ChildStdin> {
    /// Spawns an engine executable with piped stdin/stdout.
    ///
    /// The returned [`Child`] stays with the caller, who decides when to
    /// wait on or kill it.
    pub fn spawn<P: AsRef<Path>>(path: P) -> Result<(Child, Self), UciError> {
        let mut process = Command::new(path.as_ref())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let (Some(stdin), Some(stdout)) = (process.stdin.take(), process.stdout.take()) else {
            return Err(UciError::Disconnected);
        };
        info!(path = %path.as_ref().display(), pid = process.id(), "engine spawned");
        Ok((process, Self::new(BufReader::new(stdout), stdin)))
    }
}

impl<R: BufRead, W: Write> UciClient<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            name: None,
            difficulty: Difficulty::default(),
        }
    }

    /// The engine's name as reported during the handshake.
    pub fn engine_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The strength currently configured.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Send a command to the engine.
    pub fn send(&mut self, cmd: &EngineCommand) -> Result<(), UciError> {
        let line = cmd.to_uci();
        trace!(%line, "to engine");
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Read and parse the next line from the engine.
    ///
    /// End of stream is reported as [`UciError::Disconnected`].
    pub fn read_message(&mut self) -> Result<EngineMessage, UciError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(UciError::Disconnected);
        }
        trace!(line = line.trim_end(), "from engine");
        Ok(EngineMessage::parse(&line))
    }

    /// Runs `uci` until `uciok`, enables analyse mode, applies `difficulty`
    /// and waits until the engine is ready.
    pub fn handshake(&mut self, difficulty: Difficulty) -> Result<(), UciError> {
        self.send(&EngineCommand::Uci)?;
        loop {
            match self.read_message()? {
                EngineMessage::Id {
                    name: Some(name), ..
                } => self.name = Some(name),
                EngineMessage::UciOk => break,
                _ => {}
            }
        }
        self.send(&EngineCommand::set_option("UCI_AnalyseMode", true))?;
        self.set_difficulty(difficulty)?;
        self.wait_ready()?;
        info!(engine = self.name.as_deref().unwrap_or("unknown"), %difficulty, "engine ready");
        Ok(())
    }

    /// Sends `isready` and waits for `readyok`.
    pub fn wait_ready(&mut self) -> Result<(), UciError> {
        self.send(&EngineCommand::IsReady)?;
        while self.read_message()? != EngineMessage::ReadyOk {}
        Ok(())
    }

    /// Sets the engine's skill level and the thinking time for later moves.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), UciError> {
        self.difficulty = difficulty;
        self.send(&EngineCommand::set_option(
            "Skill Level",
            difficulty.skill_level(),
        ))
    }

    /// Tells the engine a new game starts.
    pub fn new_game(&mut self) -> Result<(), UciError> {
        self.send(&EngineCommand::UciNewGame)?;
        self.wait_ready()
    }

    /// Asks for the best reply after `moves` (coordinate notation, from the
    /// starting position). `None` means the engine found no legal move.
    pub fn best_move(&mut self, moves: &[String]) -> Result<Option<String>, UciError> {
        self.send(&EngineCommand::Position {
            moves: moves.to_vec(),
        })?;
        self.send(&EngineCommand::Go {
            movetime: self.difficulty.movetime_ms(),
        })?;
        loop {
            if let EngineMessage::BestMove { mv, .. } = self.read_message()? {
                debug!(?mv, ply = moves.len(), "engine answered");
                return Ok(mv);
            }
        }
    }

    /// Sends `quit`, consuming the client.
    pub fn quit(mut self) -> Result<(), UciError> {
        self.send(&EngineCommand::Quit)
    }
}
