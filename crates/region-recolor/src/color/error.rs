//! Error type for color parsing

use std::fmt;
use std::num::ParseIntError;

/// Error type for parsing color strings.
///
/// Returned when a hex or decimal color string cannot be turned into an
/// [`Rgb`](super::Rgb).
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    InvalidLength,
    /// Invalid hexadecimal character encountered
    InvalidHex(ParseIntError),
    /// Decimal triple does not have exactly three components
    InvalidComponentCount(usize),
    /// Decimal component is not an integer in 0..=255
    InvalidDecimal(ParseIntError),
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        ParseColorError::InvalidHex(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength => {
                write!(f, "invalid hex color length (expected 3 or 6 characters)")
            }
            ParseColorError::InvalidHex(err) => write!(f, "invalid hex character: {}", err),
            ParseColorError::InvalidComponentCount(n) => {
                write!(f, "expected 3 comma-separated components, got {}", n)
            }
            ParseColorError::InvalidDecimal(err) => {
                write!(f, "invalid color component (expected 0-255): {}", err)
            }
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorError::InvalidHex(err) | ParseColorError::InvalidDecimal(err) => Some(err),
            _ => None,
        }
    }
}
