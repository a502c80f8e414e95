//! Target colors and their HSV acceptance bands

use crate::color::{Hsv, Rgb, HUE_MAX};

/// Default hue half-window.
pub const DEFAULT_TOLERANCE: u8 = 20;
/// Default minimum saturation.
pub const DEFAULT_SATURATION_FLOOR: u8 = 100;
/// Default minimum value.
pub const DEFAULT_VALUE_FLOOR: u8 = 100;

/// Matching parameters shared by target colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchThresholds {
    /// Hue half-window in 8-bit hue units (degrees / 2).
    pub tolerance: u8,
    /// Minimum saturation a pixel needs to match.
    pub saturation_floor: u8,
    /// Minimum value a pixel needs to match.
    pub value_floor: u8,
}

impl MatchThresholds {
    pub const fn new(tolerance: u8, saturation_floor: u8, value_floor: u8) -> Self {
        Self {
            tolerance,
            saturation_floor,
            value_floor,
        }
    }
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self::new(
            DEFAULT_TOLERANCE,
            DEFAULT_SATURATION_FLOOR,
            DEFAULT_VALUE_FLOOR,
        )
    }
}

/// Inclusive HSV box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvBand {
    pub lower: Hsv,
    pub upper: Hsv,
}

impl HsvBand {
    #[inline]
    pub fn contains(&self, hsv: Hsv) -> bool {
        (self.lower.h..=self.upper.h).contains(&hsv.h)
            && (self.lower.s..=self.upper.s).contains(&hsv.s)
            && (self.lower.v..=self.upper.v).contains(&hsv.v)
    }
}

/// A color to look for, with the thresholds it is matched under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetColor {
    pub color: Rgb,
    pub thresholds: MatchThresholds,
}

impl TargetColor {
    /// Target with default thresholds (20 / 100 / 100).
    pub fn new(color: Rgb) -> Self {
        Self::with_thresholds(color, MatchThresholds::default())
    }

    pub fn with_thresholds(color: Rgb, thresholds: MatchThresholds) -> Self {
        Self { color, thresholds }
    }

    /// The acceptance band for this target.
    ///
    /// The hue window is clamped to `0..=179` and does not wrap around, so
    /// a red near 0 will not pick up reds near 179.
    pub fn band(&self) -> HsvBand {
        let hsv = Hsv::from(self.color);
        let t = self.thresholds;
        HsvBand {
            lower: Hsv::new(
                hsv.h.saturating_sub(t.tolerance),
                t.saturation_floor,
                t.value_floor,
            ),
            upper: Hsv::new(hsv.h.saturating_add(t.tolerance).min(HUE_MAX), 255, 255),
        }
    }

    /// Whether a single pixel color matches.
    pub fn matches_pixel(&self, pixel: Rgb) -> bool {
        self.band().contains(Hsv::from(pixel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_is_clamped() {
        let band = TargetColor::new(Rgb::new(236, 19, 27)).band();
        assert_eq!(band.lower, Hsv::new(159, 100, 100));
        assert_eq!(band.upper, Hsv::new(179, 255, 255));

        let band = TargetColor::new(Rgb::new(255, 0, 0)).band();
        assert_eq!(band.lower.h, 0);
        assert_eq!(band.upper.h, 20);
    }

    #[test]
    fn test_matches_pixel() {
        let target = TargetColor::new(Rgb::new(236, 19, 27));
        assert!(target.matches_pixel(Rgb::new(236, 19, 27)));
        assert!(target.matches_pixel(Rgb::new(200, 30, 60)));
        // too dark
        assert!(!target.matches_pixel(Rgb::new(90, 5, 10)));
        // washed out
        assert!(!target.matches_pixel(Rgb::new(240, 200, 200)));
        assert!(!target.matches_pixel(Rgb::new(0, 0, 255)));
    }

    #[test]
    fn test_no_hue_wrap() {
        // target hue 179, pixel hue 0: numerically far apart
        let target = TargetColor::new(Rgb::new(236, 19, 27));
        assert!(!target.matches_pixel(Rgb::new(255, 0, 0)));
    }

    #[test]
    fn test_zero_floors_accept_greys_of_right_hue() {
        let target = TargetColor::with_thresholds(Rgb::new(255, 0, 0), MatchThresholds::new(0, 0, 0));
        // pure grey has hue 0, saturation 0
        assert!(target.matches_pixel(Rgb::new(128, 128, 128)));
    }
}
