//! Region and mask-region value types

/// A point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A user-drawn selection area.
///
/// Rectangles and ellipses are described by two opposite corners of their
/// bounding box; a lasso by its outline. Coordinates are image pixels once
/// the region has gone through [`ViewTransform`](super::ViewTransform).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Region {
    /// Filled axis-aligned rectangle, inclusive of both corners.
    Rectangle { x1: i32, y1: i32, x2: i32, y2: i32 },
    /// Filled ellipse inscribed in the bounding box.
    Ellipse { x1: i32, y1: i32, x2: i32, y2: i32 },
    /// Filled freeform polygon. Fewer than three points selects nothing.
    Lasso { points: Vec<Point> },
}

impl Region {
    pub fn rectangle(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Region::Rectangle { x1, y1, x2, y2 }
    }

    pub fn ellipse(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Region::Ellipse { x1, y1, x2, y2 }
    }

    pub fn lasso(points: impl IntoIterator<Item = impl Into<Point>>) -> Self {
        Region::Lasso {
            points: points.into_iter().map(Into::into).collect(),
        }
    }

    /// Short lowercase name used in logs and operator output.
    pub fn kind(&self) -> &'static str {
        match self {
            Region::Rectangle { .. } => "rectangle",
            Region::Ellipse { .. } => "ellipse",
            Region::Lasso { .. } => "lasso",
        }
    }

    /// Same region with both bounding-box corners ordered min/max.
    /// Lassos are returned unchanged.
    pub fn normalized(&self) -> Region {
        match self {
            Region::Rectangle { x1, y1, x2, y2 } => Region::Rectangle {
                x1: *x1.min(x2),
                y1: *y1.min(y2),
                x2: *x1.max(x2),
                y2: *y1.max(y2),
            },
            Region::Ellipse { x1, y1, x2, y2 } => Region::Ellipse {
                x1: *x1.min(x2),
                y1: *y1.min(y2),
                x2: *x1.max(x2),
                y2: *y1.max(y2),
            },
            Region::Lasso { points } => Region::Lasso {
                points: points.clone(),
            },
        }
    }
}

/// Role of a freeform mask polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskTool {
    /// Adds the polygon to the replacement mask.
    Draw,
    /// Removes the polygon from the replacement mask.
    Erase,
}

impl MaskTool {
    pub fn as_str(self) -> &'static str {
        match self {
            MaskTool::Draw => "draw",
            MaskTool::Erase => "erase",
        }
    }
}

/// A freeform polygon with an add or subtract role.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaskRegion {
    pub tool: MaskTool,
    pub points: Vec<Point>,
}

impl MaskRegion {
    pub fn new(tool: MaskTool, points: impl IntoIterator<Item = impl Into<Point>>) -> Self {
        Self {
            tool,
            points: points.into_iter().map(Into::into).collect(),
        }
    }

    pub fn draw(points: impl IntoIterator<Item = impl Into<Point>>) -> Self {
        Self::new(MaskTool::Draw, points)
    }

    pub fn erase(points: impl IntoIterator<Item = impl Into<Point>>) -> Self {
        Self::new(MaskTool::Erase, points)
    }
}
