//! Commands sent from the GUI side to an engine.

/// Commands sent from GUI to engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    /// Initialize UCI mode.
    Uci,
    /// Check if engine is ready.
    IsReady,
    /// The next position belongs to a new game.
    UciNewGame,
    /// Set an engine option.
    SetOption { name: String, value: String },
    /// The starting position followed by `moves` in coordinate notation.
    Position { moves: Vec<String> },
    /// Search for a fixed time in milliseconds.
    Go { movetime: u64 },
    /// Quit the engine.
    Quit,
}

impl EngineCommand {
    /// Shorthand for `setoption name <name> value <value>`.
    pub fn set_option(name: impl Into<String>, value: impl ToString) -> Self {
        EngineCommand::SetOption {
            name: name.into(),
            value: value.to_string(),
        }
    }

    /// Format command for sending.
    pub fn to_uci(&self) -> String {
        match self {
            EngineCommand::Uci => "uci".to_string(),
            EngineCommand::IsReady => "isready".to_string(),
            EngineCommand::UciNewGame => "ucinewgame".to_string(),
            EngineCommand::SetOption { name, value } => {
                format!("setoption name {} value {}", name, value)
            }
            EngineCommand::Position { moves } => {
                let mut s = "position startpos".to_string();
                if !moves.is_empty() {
                    s.push_str(" moves ");
                    s.push_str(&moves.join(" "));
                }
                s
            }
            EngineCommand::Go { movetime } => format!("go movetime {}", movetime),
            EngineCommand::Quit => "quit".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_position() {
        let cmd = EngineCommand::Position {
            moves: vec!["e2e4".to_string(), "e7e5".to_string()],
        };
        assert_eq!(cmd.to_uci(), "position startpos moves e2e4 e7e5");

        let cmd = EngineCommand::Position { moves: vec![] };
        assert_eq!(cmd.to_uci(), "position startpos");
    }

    #[test]
    fn format_options_and_go() {
        assert_eq!(
            EngineCommand::set_option("Skill Level", 5).to_uci(),
            "setoption name Skill Level value 5"
        );
        assert_eq!(
            EngineCommand::set_option("UCI_AnalyseMode", true).to_uci(),
            "setoption name UCI_AnalyseMode value true"
        );
        assert_eq!(
            EngineCommand::Go { movetime: 500 }.to_uci(),
            "go movetime 500"
        );
        assert_eq!(EngineCommand::UciNewGame.to_uci(), "ucinewgame");
        assert_eq!(EngineCommand::Quit.to_uci(), "quit");
    }
}
