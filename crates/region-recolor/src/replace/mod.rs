//! Masked color replacement
//!
//! [`apply`] overwrites every pixel that matches a target color and lies
//! inside the region mask. The [`compare`] helpers diff, highlight and
//! juxtapose an original and its replacement.

pub mod compare;

pub use compare::{changed_mask, count_changed_pixels, highlight_changes, side_by_side};

use image::RgbImage;

use crate::api::RecolorError;
use crate::color::{HsvImage, Rgb};
use crate::mask::Mask;
use crate::matcher::{matches_hsv, TargetColor};

/// Result of a replacement pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Replacement {
    /// The recolored copy.
    pub image: RgbImage,
    /// Sum over targets of matched pixels inside the mask.
    pub changed: u64,
}

/// Replace target-colored pixels inside `mask` with `replacement`.
///
/// Targets are processed in order, each matched against the working copy,
/// so a later target sees the replacements made for earlier ones. A pixel
/// that matches more than one target is counted once per target. `image`
/// itself is left untouched.
///
/// # Example
///
/// ```
/// use image::RgbImage;
/// use region_recolor::{replace, Mask, Rgb, TargetColor};
///
/// let image = RgbImage::from_pixel(4, 4, image::Rgb([236, 19, 27]));
/// let result = replace::apply(
///     &image,
///     &[TargetColor::new(Rgb::new(236, 19, 27))],
///     Rgb::new(0, 0, 255),
///     &Mask::full(4, 4),
/// )
/// .unwrap();
/// assert_eq!(result.changed, 16);
/// ```
pub fn apply(
    image: &RgbImage,
    targets: &[TargetColor],
    replacement: Rgb,
    mask: &Mask,
) -> Result<Replacement, RecolorError> {
    if image.dimensions() != mask.dimensions() {
        return Err(RecolorError::DimensionMismatch {
            image: image.dimensions(),
            mask: mask.dimensions(),
        });
    }

    let mut working = image.clone();
    let mut changed = 0u64;
    let pixel = image::Rgb::from(replacement);

    for target in targets {
        let mut hits = matches_hsv(&HsvImage::from_rgb(&working), target);
        hits.intersect_with(mask);
        for (x, y) in hits.iter_set() {
            working.put_pixel(x, y, pixel);
        }
        changed += hits.count();
    }

    Ok(Replacement {
        image: working,
        changed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{build, Region};

    const RED: Rgb = Rgb::new(236, 19, 27);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    #[test]
    fn test_only_masked_pixels_change() {
        let image = RgbImage::from_pixel(10, 10, image::Rgb(RED.to_bytes()));
        let mask = build(10, 10, &[Region::rectangle(0, 0, 4, 9)], &[]);
        let result = apply(&image, &[TargetColor::new(RED)], BLUE, &mask).unwrap();

        assert_eq!(result.changed, 50);
        assert_eq!(result.image.get_pixel(0, 0).0, BLUE.to_bytes());
        assert_eq!(result.image.get_pixel(9, 9).0, RED.to_bytes());
        // input untouched
        assert_eq!(image.get_pixel(0, 0).0, RED.to_bytes());
    }

    #[test]
    fn test_non_matching_pixels_survive() {
        let image = RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                image::Rgb(RED.to_bytes())
            } else {
                image::Rgb([10, 200, 10])
            }
        });
        let result = apply(&image, &[TargetColor::new(RED)], BLUE, &Mask::full(2, 1)).unwrap();
        assert_eq!(result.changed, 1);
        assert_eq!(result.image.get_pixel(1, 0).0, [10, 200, 10]);
    }

    #[test]
    fn test_empty_mask_changes_nothing() {
        let image = RgbImage::from_pixel(3, 3, image::Rgb(RED.to_bytes()));
        let result = apply(&image, &[TargetColor::new(RED)], BLUE, &Mask::new(3, 3)).unwrap();
        assert_eq!(result.changed, 0);
        assert_eq!(result.image, image);
    }

    #[test]
    fn test_later_targets_see_earlier_replacements() {
        // replacing red with blue, then matching blue, counts every pixel twice
        let image = RgbImage::from_pixel(2, 2, image::Rgb(RED.to_bytes()));
        let targets = [TargetColor::new(RED), TargetColor::new(BLUE)];
        let result = apply(&image, &targets, BLUE, &Mask::full(2, 2)).unwrap();
        assert_eq!(result.changed, 8);
    }

    #[test]
    fn test_dimension_mismatch() {
        let image = RgbImage::new(3, 3);
        let err = apply(&image, &[], BLUE, &Mask::new(2, 2)).unwrap_err();
        assert_eq!(
            err,
            RecolorError::DimensionMismatch {
                image: (3, 3),
                mask: (2, 2)
            }
        );
    }
}
