//! Display mode of the host application.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Light or dark display mode.
///
/// Each mode has its own palette; exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Light,
    Dark,
}

impl Mode {
    /// Returns the lowercase name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Returns true for [`Mode::Dark`].
    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Returns the other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Error returned when parsing a mode string other than `light` or `dark`.
///
/// # Example
///
/// ```rust
/// use framehue::Mode;
///
/// assert_eq!("DARK".parse::<Mode>().unwrap(), Mode::Dark);
/// assert!("dusk".parse::<Mode>().is_err());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid mode: {0:?} (expected \"light\" or \"dark\")")]
pub struct ParseModeError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_case_insensitive() {
        assert_eq!(Mode::from_str("light").unwrap(), Mode::Light);
        assert_eq!(Mode::from_str(" Dark ").unwrap(), Mode::Dark);
    }

    #[test]
    fn test_mode_parse_error_message() {
        let err = Mode::from_str("sepia").unwrap_err();
        assert!(err.to_string().contains("sepia"));
    }

    #[test]
    fn test_mode_toggled() {
        assert_eq!(Mode::Light.toggled(), Mode::Dark);
        assert_eq!(Mode::Dark.toggled(), Mode::Light);
    }

    #[test]
    fn test_is_dark() {
        assert!(Mode::Dark.is_dark());
        assert!(!Mode::Light.is_dark());
        assert!(Mode::Light.toggled().is_dark());
    }

    #[test]
    fn test_mode_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Dark).unwrap(), "\"dark\"");
        let mode: Mode = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(mode, Mode::Light);
    }
}
