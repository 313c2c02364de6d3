use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OptionNumberError {
    #[error("option number must not be empty")]
    Empty,

    #[error("option number must be ASCII digits: {raw:?}")]
    NotDigits { raw: String },

    #[error("option positions are 1-based, got 0")]
    ZeroPosition,
}

/// The textual 1-based number of an answer option (`"1"`, `"2"`, ...).
///
/// Recorded answers and the correct option of a question share this type and
/// compare by exact text, so `"3"` never equals `"03"`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionNumber(String);

impl OptionNumber {
    /// Option number for a 1-based position in a question's option list.
    ///
    /// # Errors
    ///
    /// Returns `OptionNumberError::ZeroPosition` for `0`.
    pub fn from_position(position: usize) -> Result<Self, OptionNumberError> {
        if position == 0 {
            return Err(OptionNumberError::ZeroPosition);
        }
        Ok(Self(position.to_string()))
    }

    /// Parse an option number from text made only of ASCII digits.
    ///
    /// Surrounding whitespace is ignored; the digits are kept as written.
    ///
    /// # Errors
    ///
    /// Returns `OptionNumberError::Empty` or `OptionNumberError::NotDigits`.
    pub fn parse(raw: &str) -> Result<Self, OptionNumberError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(OptionNumberError::Empty);
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OptionNumberError::NotDigits {
                raw: raw.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 1-based position this number points at, if it fits in `usize`.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.0.parse().ok()
    }
}

impl FromStr for OptionNumber {
    type Err = OptionNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for OptionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OptionNumber({})", self.0)
    }
}

impl fmt::Display for OptionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
