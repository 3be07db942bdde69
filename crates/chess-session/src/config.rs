//! Session configuration loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use uci::Difficulty;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The file parsed but describes an unusable session.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Who plays against whom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Both sides move on this machine.
    #[default]
    TwoPlayer,
    /// The local player is White, an external engine plays Black.
    VsComputer,
    /// Hosts a LAN game and plays White.
    LanHost,
    /// Joins a LAN game and plays Black.
    LanClient,
}

impl Mode {
    /// Returns true for the two networked modes.
    pub const fn is_lan(self) -> bool {
        matches!(self, Mode::LanHost | Mode::LanClient)
    }
}

/// Default TCP port for LAN games.
pub const DEFAULT_PORT: u16 = 50000;

/// Settings for one game session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub mode: Mode,
    /// Port the host listens on and the client connects to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Address of the host, used by LAN clients.
    #[serde(default = "default_server_address")]
    pub server_address: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Engine executable for vs-computer games.
    #[serde(default = "default_engine_path")]
    pub engine_path: String,
    #[serde(default = "default_player_white")]
    pub player_white: String,
    #[serde(default = "default_player_black")]
    pub player_black: String,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_server_address() -> String {
    "127.0.0.1".to_string()
}

fn default_engine_path() -> String {
    "stockfish".to_string()
}

fn default_player_white() -> String {
    "White".to_string()
}

fn default_player_black() -> String {
    "Black".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            mode: Mode::default(),
            port: default_port(),
            server_address: default_server_address(),
            difficulty: Difficulty::default(),
            engine_path: default_engine_path(),
            player_white: default_player_white(),
            player_black: default_player_black(),
        }
    }
}

impl SessionConfig {
    /// Loads the configuration at `path`, or the defaults if the file does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// [`ConfigError::ParseError`] if it is not valid TOML, and
    /// [`ConfigError::Invalid`] if the settings cannot work together.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates a configuration.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.mode.is_lan() && self.port == 0 {
            return Err(ConfigError::Invalid("LAN games need a non-zero port".to_string()));
        }
        if self.mode == Mode::LanClient && self.server_address.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "lan-client mode needs a server_address".to_string(),
            ));
        }
        if self.mode == Mode::VsComputer && self.engine_path.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "vs-computer mode needs an engine_path".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = SessionConfig::from_toml_str(
            r#"
mode = "lan-client"
port = 50100
server_address = "192.168.1.20"
difficulty = "kinda-medium"
engine_path = "/usr/games/stockfish"
player_white = "Ann"
player_black = "Ben"
"#,
        )
        .unwrap();

        assert_eq!(config.mode, Mode::LanClient);
        assert_eq!(config.port, 50100);
        assert_eq!(config.server_address, "192.168.1.20");
        assert_eq!(config.difficulty, Difficulty::KindaMedium);
        assert_eq!(config.engine_path, "/usr/games/stockfish");
        assert_eq!(config.player_white, "Ann");
        assert_eq!(config.player_black, "Ben");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = SessionConfig::from_toml_str("mode = \"vs-computer\"").unwrap();
        assert_eq!(config.mode, Mode::VsComputer);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.server_address, "127.0.0.1");
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.engine_path, "stockfish");

        assert_eq!(SessionConfig::from_toml_str("").unwrap(), SessionConfig::default());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            SessionConfig::from_toml_str("mode = \"online\""),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            SessionConfig::from_toml_str("mode = \"lan-host\"\nport = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SessionConfig::from_toml_str("mode = \"lan-client\"\nserver_address = \" \""),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SessionConfig::load(dir.path().join("chess.toml")).unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chess.toml");
        std::fs::write(&path, "mode = \"lan-host\"\ndifficulty = \"hard\"\n").unwrap();

        let config = SessionConfig::load(&path).unwrap();
        assert_eq!(config.mode, Mode::LanHost);
        assert_eq!(config.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_load_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chess.toml");
        std::fs::write(&path, "port = \"fifty\"").unwrap();
        assert!(matches!(SessionConfig::load(&path), Err(ConfigError::ParseError(_))));
    }
}
