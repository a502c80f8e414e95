//! Color types and conversion utilities
//!
//! Colors enter the crate as 8-bit [`Rgb`] triples and are compared in
//! 8-bit [`Hsv`] space.
//!
//! # Example
//!
//! ```
//! use region_recolor::{Hsv, Rgb};
//!
//! let blue: Rgb = "#0000FF".parse().unwrap();
//! assert_eq!(Hsv::from(blue), Hsv::new(120, 255, 255));
//! ```

mod error;
mod hsv;
mod rgb;

pub use error::ParseColorError;
pub use hsv::{Hsv, HsvImage, HUE_MAX};
pub use rgb::Rgb;
