//! Computer-opponent strength presets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Strongest skill level an engine accepts.
pub const MAX_SKILL_LEVEL: u8 = 20;

/// How strong the computer opponent plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Easy,
    KindaEasy,
    #[default]
    Medium,
    KindaMedium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::KindaEasy,
        Difficulty::Medium,
        Difficulty::KindaMedium,
        Difficulty::Hard,
    ];

    /// Thinking time per move in milliseconds.
    pub const fn movetime_ms(self) -> u64 {
        match self {
            Difficulty::Easy => 200,
            Difficulty::KindaEasy => 300,
            Difficulty::Medium => 500,
            Difficulty::KindaMedium => 1000,
            Difficulty::Hard => 2000,
        }
    }

    /// Value for the engine's "Skill Level" option.
    pub const fn skill_level(self) -> u8 {
        let level = match self {
            Difficulty::Easy => 1,
            Difficulty::KindaEasy => 5,
            Difficulty::Medium => 10,
            Difficulty::KindaMedium => 15,
            Difficulty::Hard => 20,
        };
        if level > MAX_SKILL_LEVEL {
            MAX_SKILL_LEVEL
        } else {
            level
        }
    }

    /// Name used in configuration files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::KindaEasy => "kinda-easy",
            Difficulty::Medium => "medium",
            Difficulty::KindaMedium => "kinda-medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown difficulty: {}", s))
    }
}
