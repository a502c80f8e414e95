//! Unified error type for the region-recolor public API.

use crate::color::ParseColorError;
use std::fmt;

/// Unified error type for the region-recolor public API.
///
/// Wraps the crate's failure modes into one enum for `?` propagation in
/// application code.
///
/// # Example
///
/// ```
/// use region_recolor::{RecolorError, Recolorer, Rgb};
///
/// fn from_config(target: &str, replacement: &str) -> Result<Recolorer, RecolorError> {
///     let replacement: Rgb = replacement.parse()?;
///     Ok(Recolorer::new(replacement).target(target.parse()?))
/// }
///
/// assert!(from_config("#EC131B", "#0000FF").is_ok());
/// assert!(from_config("#EC131", "#0000FF").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RecolorError {
    /// Color parsing error (invalid hex or decimal string)
    ParseColor(ParseColorError),
    /// Mask and image sizes differ
    DimensionMismatch {
        /// Image size (width, height)
        image: (u32, u32),
        /// Mask size (width, height)
        mask: (u32, u32),
    },
}

impl fmt::Display for RecolorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecolorError::ParseColor(err) => write!(f, "color parse error: {}", err),
            RecolorError::DimensionMismatch { image, mask } => write!(
                f,
                "mask is {}x{} but image is {}x{}",
                mask.0, mask.1, image.0, image.1
            ),
        }
    }
}

impl std::error::Error for RecolorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecolorError::ParseColor(err) => Some(err),
            RecolorError::DimensionMismatch { .. } => None,
        }
    }
}

impl From<ParseColorError> for RecolorError {
    fn from(err: ParseColorError) -> Self {
        RecolorError::ParseColor(err)
    }
}
