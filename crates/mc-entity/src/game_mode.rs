//! Player game modes.

use std::fmt;
use std::str::FromStr;

use crate::UnknownName;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
    Adventure,
    Spectator,
}

impl GameMode {
    pub const ALL: [Self; 4] = [
        Self::Survival,
        Self::Creative,
        Self::Adventure,
        Self::Spectator,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Survival => "survival",
            Self::Creative => "creative",
            Self::Adventure => "adventure",
            Self::Spectator => "spectator",
        }
    }
}

/// Parses case-insensitively, so `survival` and `SURVIVAL` are both accepted.
impl FromStr for GameMode {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownName {
                kind: "game mode",
                name: s.to_string(),
            })
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!("creative".parse::<GameMode>(), Ok(GameMode::Creative));
        assert_eq!("SPECTATOR".parse::<GameMode>(), Ok(GameMode::Spectator));
        assert!("hardcore".parse::<GameMode>().is_err());
    }
}
