//! region-recolor: target-color replacement inside drawn regions
//!
//! This library finds pixels of a configurable set of target colors and
//! overwrites them with a single replacement color, but only inside the
//! areas an operator has marked. It has no I/O of its own: images come in
//! and go out as [`image::RgbImage`].
//!
//! # Quick Start
//!
//! The [`Recolorer`] builder is the primary entry point:
//!
//! ```
//! use image::RgbImage;
//! use region_recolor::{MaskRegion, Recolorer, Region, Rgb};
//!
//! let recolorer = Recolorer::new(Rgb::new(0, 0, 255)).target(Rgb::new(236, 19, 27));
//!
//! let image = RgbImage::from_pixel(20, 20, image::Rgb([236, 19, 27]));
//! let result = recolorer
//!     .apply(
//!         &image,
//!         &[Region::rectangle(0, 0, 19, 19)],
//!         &[MaskRegion::erase([(0, 0), (9, 0), (9, 9), (0, 9)])],
//!     )
//!     .unwrap();
//!
//! assert_eq!(result.changed, 400 - 100);
//! assert_eq!(result.image.get_pixel(0, 0).0, [236, 19, 27]);
//! assert_eq!(result.image.get_pixel(19, 19).0, [0, 0, 255]);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! regions + mask regions ──> region::build ──> Mask ─┐
//!                                                    ├─> replace::apply ──> Replacement
//! image ──> HsvImage ──> matcher (per target) ───────┘
//! ```
//!
//! # Matching
//!
//! Pixels are compared in 8-bit HSV: hue `0..=179` (degrees / 2),
//! saturation and value `0..=255`. A [`TargetColor`] accepts the inclusive
//! band `[h - tol, h + tol]` (clamped, no wrap-around) with saturation and
//! value at or above their floors. Defaults are 20 / 100 / 100.
//!
//! # Regions
//!
//! - [`Region::Rectangle`]: filled, inclusive of both corners
//! - [`Region::Ellipse`]: filled, inscribed in the bounding box
//! - [`Region::Lasso`]: filled polygon, needs three points
//! - [`MaskRegion`]: polygon that adds (`Draw`) or removes (`Erase`) area,
//!   applied in insertion order after all regions
//!
//! # History
//!
//! [`EditHistory`] stores owned snapshots of the two lists with linear
//! undo/redo and a bounded depth.

pub mod api;
pub mod color;
pub mod history;
pub mod mask;
pub mod matcher;
pub mod region;
pub mod replace;


pub use api::{RecolorError, Recolorer};
pub use color::{Hsv, HsvImage, ParseColorError, Rgb};
pub use history::{EditHistory, HistoryState, DEFAULT_MAX_HISTORY};
pub use mask::Mask;
pub use matcher::{HsvBand, MatchThresholds, TargetColor};
pub use region::{build as build_mask, MaskRegion, MaskTool, Point, Region, ViewTransform};
pub use replace::Replacement;
