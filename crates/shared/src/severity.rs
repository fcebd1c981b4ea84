//! Pain severity levels.

use serde::{Deserialize, Serialize};

use crate::error::PainError;

/// Pain intensity for one part on one day.
///
/// `None` is the "no pain" level. It is never stored in a record; setting it
/// removes the entry instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Severity {
    #[default]
    None,
    Weak,
    Medium,
    Strong,
}

impl Severity {
    /// All levels in ascending order, as shown on the severity panel.
    pub const ALL: [Severity; 4] = [
        Severity::None,
        Severity::Weak,
        Severity::Medium,
        Severity::Strong,
    ];

    /// Numeric level 0..=3
    pub fn level(self) -> u8 {
        match self {
            Severity::None => 0,
            Severity::Weak => 1,
            Severity::Medium => 2,
            Severity::Strong => 3,
        }
    }

    /// Convert a raw level, rejecting anything outside 0..=3.
    pub fn from_level(level: u8) -> Result<Self, PainError> {
        match level {
            0 => Ok(Severity::None),
            1 => Ok(Severity::Weak),
            2 => Ok(Severity::Medium),
            3 => Ok(Severity::Strong),
            other => Err(PainError::InvalidArgument(format!(
                "severity must be between 0 and 3, got {other}"
            ))),
        }
    }

    pub fn is_none(self) -> bool {
        self == Severity::None
    }
}

impl TryFrom<u8> for Severity {
    type Error = PainError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Severity::from_level(level)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> u8 {
        severity.level()
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.level())
    }
}
