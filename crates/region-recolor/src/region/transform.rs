//! Display-to-image coordinate mapping
//!
//! Operators draw on a scaled rendering of the image. A [`ViewTransform`]
//! maps those canvas coordinates back to source pixels when a region is
//! finalized.

use super::shape::{MaskRegion, Point, Region};

/// Mapping from a displayed rendering to source image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewTransform {
    display_width: u32,
    display_height: u32,
    image_width: u32,
    image_height: u32,
}

impl ViewTransform {
    /// A rendering of `image` size shown at `display` size.
    pub fn new(display: (u32, u32), image: (u32, u32)) -> Self {
        Self {
            display_width: display.0,
            display_height: display.1,
            image_width: image.0,
            image_height: image.1,
        }
    }

    /// The image shown at its own size.
    pub fn identity(width: u32, height: u32) -> Self {
        Self::new((width, height), (width, height))
    }

    /// Map a canvas point to image pixels.
    ///
    /// Scales by `image / display`, truncates toward zero and clamps to the
    /// image bounds. A zero-sized display maps 1:1.
    pub fn to_image(&self, point: Point) -> Point {
        let x = scale_axis(point.x, self.display_width, self.image_width);
        let y = scale_axis(point.y, self.display_height, self.image_height);
        Point::new(x, y)
    }

    /// Map a canvas-space region to image space.
    ///
    /// Bounding-box corners are ordered before mapping.
    pub fn region_to_image(&self, region: &Region) -> Region {
        match region.normalized() {
            Region::Rectangle { x1, y1, x2, y2 } => {
                let (a, b) = self.corners(x1, y1, x2, y2);
                Region::Rectangle {
                    x1: a.x,
                    y1: a.y,
                    x2: b.x,
                    y2: b.y,
                }
            }
            Region::Ellipse { x1, y1, x2, y2 } => {
                let (a, b) = self.corners(x1, y1, x2, y2);
                Region::Ellipse {
                    x1: a.x,
                    y1: a.y,
                    x2: b.x,
                    y2: b.y,
                }
            }
            Region::Lasso { points } => Region::Lasso {
                points: points.into_iter().map(|p| self.to_image(p)).collect(),
            },
        }
    }

    /// Map a canvas-space mask polygon to image space.
    pub fn mask_to_image(&self, mask_region: &MaskRegion) -> MaskRegion {
        MaskRegion {
            tool: mask_region.tool,
            points: mask_region.points.iter().map(|p| self.to_image(*p)).collect(),
        }
    }

    fn corners(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> (Point, Point) {
        (
            self.to_image(Point::new(x1, y1)),
            self.to_image(Point::new(x2, y2)),
        )
    }
}

fn scale_axis(value: i32, display: u32, image: u32) -> i32 {
    let max = image.saturating_sub(1) as i64;
    let scaled = if display == 0 {
        value as i64
    } else {
        (value as f64 * image as f64 / display as f64).trunc() as i64
    };
    scaled.clamp(0, max) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaling_truncates() {
        // 400x300 image shown at 200x150
        let view = ViewTransform::new((200, 150), (400, 300));
        assert_eq!(view.to_image(Point::new(10, 10)), Point::new(20, 20));

        // 3x upscale of a 100 wide image shown at 300
        let view = ViewTransform::new((300, 300), (100, 100));
        assert_eq!(view.to_image(Point::new(5, 299)), Point::new(1, 99));
    }

    #[test]
    fn test_clamps_to_image() {
        let view = ViewTransform::new((100, 100), (50, 40));
        assert_eq!(view.to_image(Point::new(-20, 500)), Point::new(0, 39));
    }

    #[test]
    fn test_identity() {
        let view = ViewTransform::identity(10, 10);
        assert_eq!(view.to_image(Point::new(3, 7)), Point::new(3, 7));
        assert_eq!(view.to_image(Point::new(12, 7)), Point::new(9, 7));
    }

    #[test]
    fn test_region_corners_are_normalized_first() {
        let view = ViewTransform::new((100, 100), (200, 200));
        let mapped = view.region_to_image(&Region::rectangle(40, 30, 10, 5));
        assert_eq!(mapped, Region::rectangle(20, 10, 80, 60));

        let mapped = view.region_to_image(&Region::ellipse(40, 30, 10, 5));
        assert_eq!(mapped, Region::ellipse(20, 10, 80, 60));
    }

    #[test]
    fn test_lasso_and_mask_points() {
        let view = ViewTransform::new((50, 50), (100, 100));
        let lasso = view.region_to_image(&Region::lasso([(1, 1), (2, 3), (4, 0)]));
        assert_eq!(lasso, Region::lasso([(2, 2), (4, 6), (8, 0)]));

        let erase = view.mask_to_image(&MaskRegion::erase([(10, 10), (20, 10), (20, 20)]));
        assert_eq!(erase, MaskRegion::erase([(20, 20), (40, 20), (40, 40)]));
    }
}
