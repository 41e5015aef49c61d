//! Model role value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Interaction mode that selects the tutor persona prompt (Value Object)
///
/// `Pro` is the plain text chat, `ProVision` is used when the learner
/// shares images. Each role has a template at `rol-model/{role}.txt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCode {
    Pro,
    ProVision,
}

impl RoleCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleCode::Pro => "pro",
            RoleCode::ProVision => "pro_vision",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.txt", self.as_str())
    }

    /// Whether this role carries images alongside the prompt
    pub fn is_vision(&self) -> bool {
        matches!(self, RoleCode::ProVision)
    }
}

impl std::fmt::Display for RoleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RoleCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pro" => Ok(RoleCode::Pro),
            "pro_vision" => Ok(RoleCode::ProVision),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("pro".parse::<RoleCode>().unwrap(), RoleCode::Pro);
        assert_eq!(
            "pro_vision".parse::<RoleCode>().unwrap(),
            RoleCode::ProVision
        );
    }

    #[test]
    fn test_role_parse_is_exact() {
        assert!("Pro".parse::<RoleCode>().is_err());
        assert!("vision".parse::<RoleCode>().is_err());
    }

    #[test]
    fn test_serialize_snake_case() {
        let json = serde_json::to_string(&RoleCode::ProVision).unwrap();
        assert_eq!(json, "\"pro_vision\"");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(RoleCode::ProVision.file_name(), "pro_vision.txt");
        assert!(RoleCode::ProVision.is_vision());
        assert!(!RoleCode::Pro.is_vision());
    }
}
