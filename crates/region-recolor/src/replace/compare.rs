//! Before/after comparison helpers

use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::mask::Mask;

/// Grayscale difference above which a pixel counts as changed.
pub const CHANGE_THRESHOLD: u8 = 10;

/// Weight of green blended into changed pixels by [`highlight_changes`].
const HIGHLIGHT_ALPHA: f32 = 0.3;

/// Mask of pixels whose difference is visible.
///
/// The per-channel absolute difference is reduced to grayscale
/// (`0.299 R + 0.587 G + 0.114 B`, rounded) and compared against
/// [`CHANGE_THRESHOLD`]. Images of different size yield an empty mask the
/// size of `original`.
pub fn changed_mask(original: &RgbImage, result: &RgbImage) -> Mask {
    if original.dimensions() != result.dimensions() {
        return Mask::new(original.width(), original.height());
    }
    Mask::from_fn(original.width(), original.height(), |x, y| {
        let a = original.get_pixel(x, y).0;
        let b = result.get_pixel(x, y).0;
        let d = |i: usize| a[i].abs_diff(b[i]) as f32;
        let gray = (0.299 * d(0) + 0.587 * d(1) + 0.114 * d(2)).round();
        gray > CHANGE_THRESHOLD as f32
    })
}

/// Number of visibly changed pixels.
pub fn count_changed_pixels(original: &RgbImage, result: &RgbImage) -> u64 {
    changed_mask(original, result).count()
}

/// Preview rendering of `result` with changed pixels tinted green.
pub fn highlight_changes(original: &RgbImage, result: &RgbImage) -> RgbImage {
    let changed = changed_mask(original, result);
    let mut preview = result.clone();
    for (x, y) in changed.iter_set() {
        let [r, g, b] = preview.get_pixel(x, y).0;
        let keep = 1.0 - HIGHLIGHT_ALPHA;
        preview.put_pixel(
            x,
            y,
            image::Rgb([
                (r as f32 * keep) as u8,
                (g as f32 * keep + 255.0 * HIGHLIGHT_ALPHA) as u8,
                (b as f32 * keep) as u8,
            ]),
        );
    }
    preview
}

/// Original and result next to each other.
///
/// Both halves are scaled to the larger width and height of the two before
/// being joined left to right.
pub fn side_by_side(original: &RgbImage, result: &RgbImage) -> RgbImage {
    let width = original.width().max(result.width());
    let height = original.height().max(result.height());

    let left = fit(original, width, height);
    let right = fit(result, width, height);

    let mut canvas = RgbImage::new(width * 2, height);
    imageops::replace(&mut canvas, &left, 0, 0);
    imageops::replace(&mut canvas, &right, width as i64, 0);
    canvas
}

fn fit(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    if image.dimensions() == (width, height) {
        image.clone()
    } else {
        imageops::resize(image, width, height, FilterType::Triangle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_differences_are_ignored() {
        let a = RgbImage::from_pixel(2, 2, image::Rgb([100, 100, 100]));
        let b = RgbImage::from_pixel(2, 2, image::Rgb([105, 108, 100]));
        assert_eq!(count_changed_pixels(&a, &b), 0);

        let c = RgbImage::from_pixel(2, 2, image::Rgb([100, 130, 100]));
        assert_eq!(count_changed_pixels(&a, &c), 4);
    }

    #[test]
    fn test_blue_shift_alone_is_weighted_low() {
        // 0.114 * 90 = 10.26 -> 10, not above threshold
        let a = RgbImage::from_pixel(1, 1, image::Rgb([0, 0, 0]));
        let b = RgbImage::from_pixel(1, 1, image::Rgb([0, 0, 90]));
        assert_eq!(count_changed_pixels(&a, &b), 0);
    }

    #[test]
    fn test_size_mismatch_counts_nothing() {
        let a = RgbImage::new(2, 2);
        let b = RgbImage::new(3, 3);
        assert_eq!(count_changed_pixels(&a, &b), 0);
    }

    #[test]
    fn test_highlight_tints_changed_pixels_only() {
        let original = RgbImage::from_fn(2, 1, |_, _| image::Rgb([236, 19, 27]));
        let mut result = original.clone();
        result.put_pixel(0, 0, image::Rgb([0, 0, 255]));

        let preview = highlight_changes(&original, &result);
        assert_eq!(preview.get_pixel(0, 0).0, [0, 76, 178]);
        assert_eq!(preview.get_pixel(1, 0).0, [236, 19, 27]);
    }

    #[test]
    fn test_side_by_side_layout() {
        let a = RgbImage::from_pixel(4, 3, image::Rgb([255, 0, 0]));
        let b = RgbImage::from_pixel(4, 3, image::Rgb([0, 0, 255]));
        let joined = side_by_side(&a, &b);
        assert_eq!(joined.dimensions(), (8, 3));
        assert_eq!(joined.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(joined.get_pixel(7, 2).0, [0, 0, 255]);
    }

    #[test]
    fn test_side_by_side_scales_to_common_size() {
        let a = RgbImage::new(2, 6);
        let b = RgbImage::new(5, 3);
        assert_eq!(side_by_side(&a, &b).dimensions(), (10, 6));
    }
}
