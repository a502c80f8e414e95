//! Per-pixel target color detection
//!
//! A pixel matches a [`TargetColor`] when its 8-bit HSV value falls inside
//! the target's [`HsvBand`]. Matching several targets is a logical OR.

mod target;

pub use target::{
    HsvBand, MatchThresholds, TargetColor, DEFAULT_SATURATION_FLOOR, DEFAULT_TOLERANCE,
    DEFAULT_VALUE_FLOOR,
};

use image::RgbImage;

use crate::color::{Hsv, HsvImage, Rgb};
use crate::mask::Mask;

/// Mask of pixels matching `target`.
pub fn matches(image: &RgbImage, target: &TargetColor) -> Mask {
    matches_hsv(&HsvImage::from_rgb(image), target)
}

/// Number of pixels matching `target`.
pub fn count(image: &RgbImage, target: &TargetColor) -> u64 {
    let band = target.band();
    HsvImage::from_rgb(image)
        .pixels()
        .iter()
        .filter(|p| band.contains(**p))
        .count() as u64
}

/// Mask of pixels matching any of `targets`.
pub fn matches_any(image: &RgbImage, targets: &[TargetColor]) -> Mask {
    let hsv = HsvImage::from_rgb(image);
    let mut mask = Mask::new(image.width(), image.height());
    for target in targets {
        mask.union_with(&matches_hsv(&hsv, target));
    }
    mask
}

/// Whether any pixel matches any of `targets`. Stops at the first hit.
pub fn contains_any(image: &RgbImage, targets: &[TargetColor]) -> bool {
    if targets.is_empty() {
        return false;
    }
    let bands: Vec<HsvBand> = targets.iter().map(TargetColor::band).collect();
    image.pixels().any(|p| {
        let hsv = Hsv::from(Rgb::from(*p));
        bands.iter().any(|band| band.contains(hsv))
    })
}

/// Match against an already converted image.
pub fn matches_hsv(image: &HsvImage, target: &TargetColor) -> Mask {
    let band = target.band();
    let width = image.width().max(1) as usize;
    let pixels = image.pixels();
    Mask::from_fn(image.width(), image.height(), |x, y| {
        band.contains(pixels[y as usize * width + x as usize])
    })
}
