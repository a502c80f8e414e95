//! Combine regions and mask polygons into one replacement mask

use super::raster::{fill_ellipse, fill_polygon, fill_rectangle};
use super::shape::{MaskRegion, MaskTool, Point, Region};
use crate::mask::Mask;

/// Build the replacement mask for an image of `width` x `height`.
///
/// Every [`Region`] is unioned in first. Mask polygons are then applied in
/// insertion order: `Draw` unions, `Erase` subtracts. An erase therefore
/// only removes what earlier entries added.
///
/// # Example
///
/// ```
/// use region_recolor::{build_mask, MaskRegion, Region};
///
/// let mask = build_mask(
///     10,
///     10,
///     &[Region::rectangle(0, 0, 9, 9)],
///     &[MaskRegion::erase([(0, 0), (4, 0), (4, 4), (0, 4)])],
/// );
/// assert_eq!(mask.count(), 100 - 25);
/// ```
pub fn build(width: u32, height: u32, regions: &[Region], mask_regions: &[MaskRegion]) -> Mask {
    let mut mask = Mask::new(width, height);

    for region in regions {
        rasterize_region(&mut mask, region);
    }

    for mask_region in mask_regions {
        let polygon = rasterize_polygon(width, height, &mask_region.points);
        match mask_region.tool {
            MaskTool::Draw => mask.union_with(&polygon),
            MaskTool::Erase => mask.subtract(&polygon),
        }
    }

    mask
}

/// Union a single region into `mask`.
pub fn rasterize_region(mask: &mut Mask, region: &Region) {
    match region {
        Region::Rectangle { x1, y1, x2, y2 } => fill_rectangle(mask, *x1, *y1, *x2, *y2),
        Region::Ellipse { x1, y1, x2, y2 } => {
            let width = (*x2 as i64 - *x1 as i64).abs();
            let height = (*y2 as i64 - *y1 as i64).abs();
            if width == 0 || height == 0 {
                return;
            }
            let center = Point::new(
                ((*x1 as i64 + *x2 as i64) / 2) as i32,
                ((*y1 as i64 + *y2 as i64) / 2) as i32,
            );
            fill_ellipse(mask, center, (width / 2) as i32, (height / 2) as i32);
        }
        Region::Lasso { points } => fill_polygon(mask, points),
    }
}

/// Rasterize a polygon into a fresh mask.
pub fn rasterize_polygon(width: u32, height: u32, points: &[Point]) -> Mask {
    let mut mask = Mask::new(width, height);
    fill_polygon(&mut mask, points);
    mask
}
