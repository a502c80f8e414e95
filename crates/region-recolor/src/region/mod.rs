//! Region shapes, rasterization and mask assembly
//!
//! Operators describe where replacement may happen with [`Region`]s
//! (rectangle, ellipse, lasso) and refine that with [`MaskRegion`]
//! polygons that add or subtract. [`build`] turns both lists into a single
//! [`Mask`](crate::Mask) the size of the image.

mod builder;
mod raster;
mod shape;
mod transform;

pub use builder::{build, rasterize_polygon, rasterize_region};
pub use raster::{draw_line, fill_ellipse, fill_polygon, fill_rectangle};
pub use shape::{MaskRegion, MaskTool, Point, Region};
pub use transform::ViewTransform;
