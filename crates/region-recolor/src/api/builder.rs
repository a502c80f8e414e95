//! Recolorer builder -- the main entry point for the crate.
//!
//! [`Recolorer`] owns the active target colors, the replacement color and
//! the shared match thresholds, and runs mask building plus replacement in
//! one call.

use image::RgbImage;

use crate::color::Rgb;
use crate::matcher::{self, MatchThresholds, TargetColor};
use crate::region::{self, MaskRegion, Region};
use crate::replace::{self, Replacement};

use super::RecolorError;

/// Target/replacement configuration for a recoloring session.
///
/// # Design
///
/// - Constructor requires the replacement color (no invalid states)
/// - Builder methods consume and return `self`; the `add_*`/`set_*`
///   methods mutate in place for interactive use
/// - Thresholds are shared: changing them updates every target
/// - Target colors are unique; adding one twice is a no-op
///
/// # Example
///
/// ```
/// use image::RgbImage;
/// use region_recolor::{Recolorer, Region, Rgb};
///
/// let recolorer = Recolorer::new(Rgb::new(0, 0, 255))
///     .target(Rgb::new(236, 19, 27))
///     .tolerance(15);
///
/// let image = RgbImage::from_pixel(8, 8, image::Rgb([236, 19, 27]));
/// let result = recolorer
///     .apply(&image, &[Region::rectangle(0, 0, 3, 7)], &[])
///     .unwrap();
/// assert_eq!(result.changed, 32);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Recolorer {
    targets: Vec<TargetColor>,
    replacement: Rgb,
    thresholds: MatchThresholds,
}

impl Recolorer {
    /// Recolorer with no targets and default thresholds.
    pub fn new(replacement: Rgb) -> Self {
        Self {
            targets: Vec::new(),
            replacement,
            thresholds: MatchThresholds::default(),
        }
    }

    /// Add a target color.
    #[inline]
    pub fn target(mut self, color: Rgb) -> Self {
        self.add_target(color);
        self
    }

    /// Add several target colors, skipping duplicates.
    pub fn targets(mut self, colors: impl IntoIterator<Item = Rgb>) -> Self {
        for color in colors {
            self.add_target(color);
        }
        self
    }

    /// Hue half-window in 8-bit hue units.
    #[inline]
    pub fn tolerance(mut self, tolerance: u8) -> Self {
        self.set_thresholds(MatchThresholds {
            tolerance,
            ..self.thresholds
        });
        self
    }

    /// Minimum saturation.
    #[inline]
    pub fn saturation_floor(mut self, floor: u8) -> Self {
        self.set_thresholds(MatchThresholds {
            saturation_floor: floor,
            ..self.thresholds
        });
        self
    }

    /// Minimum value.
    #[inline]
    pub fn value_floor(mut self, floor: u8) -> Self {
        self.set_thresholds(MatchThresholds {
            value_floor: floor,
            ..self.thresholds
        });
        self
    }

    /// Add a target color. Returns false when it was already present.
    pub fn add_target(&mut self, color: Rgb) -> bool {
        if self.targets.iter().any(|t| t.color == color) {
            return false;
        }
        self.targets
            .push(TargetColor::with_thresholds(color, self.thresholds));
        true
    }

    /// Remove a target color. Returns false when it was not present.
    pub fn remove_target(&mut self, color: Rgb) -> bool {
        let before = self.targets.len();
        self.targets.retain(|t| t.color != color);
        self.targets.len() != before
    }

    pub fn set_replacement(&mut self, color: Rgb) {
        self.replacement = color;
    }

    /// Replace the shared thresholds on every target.
    pub fn set_thresholds(&mut self, thresholds: MatchThresholds) {
        self.thresholds = thresholds;
        for target in &mut self.targets {
            target.thresholds = thresholds;
        }
    }

    pub fn target_colors(&self) -> &[TargetColor] {
        &self.targets
    }

    pub fn replacement(&self) -> Rgb {
        self.replacement
    }

    pub fn thresholds(&self) -> MatchThresholds {
        self.thresholds
    }

    /// Whether any pixel of `image` matches any target.
    pub fn is_relevant(&self, image: &RgbImage) -> bool {
        matcher::contains_any(image, &self.targets)
    }

    /// Matching pixels summed over targets.
    pub fn count(&self, image: &RgbImage) -> u64 {
        self.targets
            .iter()
            .map(|target| matcher::count(image, target))
            .sum()
    }

    /// Build the mask from `regions` and `mask_regions`, then replace.
    pub fn apply(
        &self,
        image: &RgbImage,
        regions: &[Region],
        mask_regions: &[MaskRegion],
    ) -> Result<Replacement, RecolorError> {
        let mask = region::build(image.width(), image.height(), regions, mask_regions);
        replace::apply(image, &self.targets, self.replacement, &mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(236, 19, 27);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    #[test]
    fn test_targets_are_unique() {
        let mut recolorer = Recolorer::new(BLUE).target(RED).target(RED);
        assert_eq!(recolorer.target_colors().len(), 1);
        assert!(!recolorer.add_target(RED));
        assert!(recolorer.remove_target(RED));
        assert!(!recolorer.remove_target(RED));
        assert!(recolorer.target_colors().is_empty());
    }

    #[test]
    fn test_thresholds_apply_to_all_targets() {
        let recolorer = Recolorer::new(BLUE)
            .targets([RED, Rgb::new(0, 200, 0)])
            .tolerance(5)
            .saturation_floor(50)
            .value_floor(60);
        let expected = MatchThresholds::new(5, 50, 60);
        assert_eq!(recolorer.thresholds(), expected);
        assert!(recolorer
            .target_colors()
            .iter()
            .all(|t| t.thresholds == expected));
    }

    #[test]
    fn test_relevance_and_count() {
        let image = RgbImage::from_fn(4, 1, |x, _| {
            if x == 0 {
                image::Rgb(RED.to_bytes())
            } else {
                image::Rgb([255, 255, 255])
            }
        });
        let recolorer = Recolorer::new(BLUE).target(RED);
        assert!(recolorer.is_relevant(&image));
        assert_eq!(recolorer.count(&image), 1);
        assert!(!Recolorer::new(BLUE).is_relevant(&image));
    }

    #[test]
    fn test_apply_without_regions_changes_nothing() {
        let image = RgbImage::from_pixel(4, 4, image::Rgb(RED.to_bytes()));
        let result = Recolorer::new(BLUE).target(RED).apply(&image, &[], &[]).unwrap();
        assert_eq!(result.changed, 0);
    }
}
