use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Card condition grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Condition {
    /// Mint
    M,
    /// Near Mint
    #[default]
    NM,
    /// Lightly Played
    LP,
    /// Moderately Played
    MP,
    /// Heavily Played
    HP,
    /// Damaged
    D,
}

impl Condition {
    pub fn code(&self) -> &'static str {
        match self {
            Condition::M => "M",
            Condition::NM => "NM",
            Condition::LP => "LP",
            Condition::MP => "MP",
            Condition::HP => "HP",
            Condition::D => "D",
        }
    }

    /// Returns the full name (e.g., "Near Mint")
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::M => "Mint",
            Condition::NM => "Near Mint",
            Condition::LP => "Lightly Played",
            Condition::MP => "Moderately Played",
            Condition::HP => "Heavily Played",
            Condition::D => "Damaged",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Condition {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "M" => Ok(Condition::M),
            "NM" => Ok(Condition::NM),
            "LP" => Ok(Condition::LP),
            "MP" => Ok(Condition::MP),
            "HP" => Ok(Condition::HP),
            "D" => Ok(Condition::D),
            _ => Err(ParseError::Condition(s.to_string())),
        }
    }
}
