//! Proficiency level value object

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// CEFR proficiency level chosen by the learner when joining (Value Object)
///
/// Each level has a matching prompt fragment on disk (`levels/{CODE}.txt`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LevelCode {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl LevelCode {
    /// Get the string identifier for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelCode::A1 => "A1",
            LevelCode::A2 => "A2",
            LevelCode::B1 => "B1",
            LevelCode::B2 => "B2",
            LevelCode::C1 => "C1",
            LevelCode::C2 => "C2",
        }
    }

    /// All levels, from beginner to proficient
    pub fn all() -> [LevelCode; 6] {
        [
            LevelCode::A1,
            LevelCode::A2,
            LevelCode::B1,
            LevelCode::B2,
            LevelCode::C1,
            LevelCode::C2,
        ]
    }

    /// File name of the level template (`A1.txt`, ...)
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.as_str())
    }
}

impl std::fmt::Display for LevelCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LevelCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A1" => Ok(LevelCode::A1),
            "A2" => Ok(LevelCode::A2),
            "B1" => Ok(LevelCode::B1),
            "B2" => Ok(LevelCode::B2),
            "C1" => Ok(LevelCode::C1),
            "C2" => Ok(LevelCode::C2),
            _ => Err(DomainError::UnknownLevel(s.to_string())),
        }
    }
}

impl Serialize for LevelCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LevelCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
