//! 8-bit HSV conversion
//!
//! Hue is stored as degrees / 2 so the full circle fits in `0..=179`.
//! Saturation and value use the whole `0..=255` range. This is the scale
//! the matching thresholds are expressed in.

use image::RgbImage;

use super::Rgb;

/// Largest representable hue (358 degrees).
pub const HUE_MAX: u8 = 179;

/// A color in 8-bit HSV space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hsv {
    /// Hue, degrees / 2 (0..=179)
    pub h: u8,
    /// Saturation (0..=255)
    pub s: u8,
    /// Value, the largest channel (0..=255)
    pub v: u8,
}

impl Hsv {
    #[inline]
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

impl From<Rgb> for Hsv {
    fn from(rgb: Rgb) -> Self {
        let (r, g, b) = (rgb.r as f32, rgb.g as f32, rgb.b as f32);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let diff = max - min;

        let s = if max > 0.0 {
            (255.0 * diff / max).round()
        } else {
            0.0
        };

        let mut degrees = if diff == 0.0 {
            0.0
        } else if max == r {
            60.0 * (g - b) / diff
        } else if max == g {
            120.0 + 60.0 * (b - r) / diff
        } else {
            240.0 + 60.0 * (r - g) / diff
        };
        if degrees < 0.0 {
            degrees += 360.0;
        }

        // 359 degrees rounds up to 180, which is the same hue as 0
        let h = (degrees / 2.0).round() as u32 % (HUE_MAX as u32 + 1);

        Self {
            h: h as u8,
            s: s as u8,
            v: max as u8,
        }
    }
}

/// A whole image converted to HSV, row-major.
///
/// Converting once and testing several bands against the result is cheaper
/// than converting per band.
#[derive(Debug, Clone)]
pub struct HsvImage {
    width: u32,
    height: u32,
    pixels: Vec<Hsv>,
}

impl HsvImage {
    /// Convert every pixel of `image`.
    pub fn from_rgb(image: &RgbImage) -> Self {
        let pixels = image.pixels().map(|p| Hsv::from(Rgb::from(*p))).collect();
        Self {
            width: image.width(),
            height: image.height(),
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Hsv] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primaries() {
        assert_eq!(Hsv::from(Rgb::new(255, 0, 0)), Hsv::new(0, 255, 255));
        assert_eq!(Hsv::from(Rgb::new(0, 255, 0)), Hsv::new(60, 255, 255));
        assert_eq!(Hsv::from(Rgb::new(0, 0, 255)), Hsv::new(120, 255, 255));
    }

    #[test]
    fn test_greys_have_no_hue_or_saturation() {
        assert_eq!(Hsv::from(Rgb::new(0, 0, 0)), Hsv::new(0, 0, 0));
        assert_eq!(Hsv::from(Rgb::new(128, 128, 128)), Hsv::new(0, 0, 128));
        assert_eq!(Hsv::from(Rgb::new(255, 255, 255)), Hsv::new(0, 0, 255));
    }

    #[test]
    fn test_default_target_sits_at_top_of_hue_range() {
        // #EC131B is a slightly blue-ish red: 357.8 degrees
        let hsv = Hsv::from(Rgb::new(236, 19, 27));
        assert_eq!(hsv.h, 179);
        assert_eq!(hsv.v, 236);
        assert_eq!(hsv.s, 234);
    }

    #[test]
    fn test_hue_wraps_to_zero_at_full_circle() {
        // 359.x degrees must not produce 180
        let hsv = Hsv::from(Rgb::new(255, 0, 1));
        assert_eq!(hsv.h, 0);
    }

    #[test]
    fn test_hsv_image() {
        let image = RgbImage::from_pixel(3, 2, image::Rgb([0, 0, 255]));
        let hsv = HsvImage::from_rgb(&image);
        assert_eq!(hsv.width(), 3);
        assert_eq!(hsv.height(), 2);
        assert_eq!(hsv.pixels().len(), 6);
        assert!(hsv.pixels().iter().all(|p| *p == Hsv::new(120, 255, 255)));
    }
}
