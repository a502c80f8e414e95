//! Shape rasterization into masks
//!
//! All functions clip to the mask; shapes that lie partly or wholly
//! outside the image only set the pixels that exist.

use super::shape::Point;
use crate::mask::Mask;

/// Fill an axis-aligned rectangle, inclusive of both corners.
pub fn fill_rectangle(mask: &mut Mask, x1: i32, y1: i32, x2: i32, y2: i32) {
    let (w, h) = (mask.width() as i64, mask.height() as i64);
    let left = (x1.min(x2) as i64).max(0);
    let right = (x1.max(x2) as i64).min(w - 1);
    let top = (y1.min(y2) as i64).max(0);
    let bottom = (y1.max(y2) as i64).min(h - 1);

    for y in top..=bottom {
        for x in left..=right {
            mask.set_signed(x, y);
        }
    }
}

/// Fill an ellipse around `center` with half-axes `(ax, ay)`.
///
/// A zero half-axis degenerates to a line along the other axis.
pub fn fill_ellipse(mask: &mut Mask, center: Point, ax: i32, ay: i32) {
    let (cx, cy) = (center.x as i64, center.y as i64);
    let (ax, ay) = (ax.unsigned_abs() as i64, ay.unsigned_abs() as i64);
    // Products of squared half-axes exceed i64 for large shapes
    let (ax2, ay2) = ((ax * ax) as i128, (ay * ay) as i128);
    let limit = ax2 * ay2;

    let (w, h) = (mask.width() as i64, mask.height() as i64);
    for y in (cy - ay).max(0)..=(cy + ay).min(h - 1) {
        let dy = (y - cy) as i128;
        for x in (cx - ax).max(0)..=(cx + ax).min(w - 1) {
            let dx = (x - cx) as i128;
            if dx * dx * ay2 + dy * dy * ax2 <= limit {
                mask.set_signed(x, y);
            }
        }
    }
}

/// Fill a closed polygon.
///
/// Interior pixels are found with an even-odd scanline test at pixel
/// centers; the outline is then drawn so pixels the edges pass through are
/// always included. Fewer than three points is a no-op.
pub fn fill_polygon(mask: &mut Mask, points: &[Point]) {
    if points.len() < 3 {
        return;
    }

    let (w, h) = (mask.width() as i64, mask.height() as i64);
    let min_y = points.iter().map(|p| p.y).min().unwrap_or(0) as i64;
    let max_y = points.iter().map(|p| p.y).max().unwrap_or(-1) as i64;

    let mut crossings: Vec<f64> = Vec::with_capacity(points.len());
    for y in min_y.max(0)..=max_y.min(h - 1) {
        let sample = y as f64;
        crossings.clear();

        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            let (ay, by) = (a.y as f64, b.y as f64);
            // Half-open span so shared vertices are counted once
            if (ay <= sample && sample < by) || (by <= sample && sample < ay) {
                let t = (sample - ay) / (by - ay);
                crossings.push(a.x as f64 + t * (b.x - a.x) as f64);
            }
        }

        crossings.sort_by(|a, b| a.total_cmp(b));
        for pair in crossings.chunks_exact(2) {
            let start = (pair[0].ceil() as i64).max(0);
            let end = (pair[1].floor() as i64).min(w - 1);
            for x in start..=end {
                mask.set_signed(x, y);
            }
        }
    }

    for (i, a) in points.iter().enumerate() {
        draw_line(mask, *a, points[(i + 1) % points.len()]);
    }
}

/// Bresenham line between two points, inclusive of both ends.
///
/// Segments reaching outside the mask are clipped first, so only the
/// visible part is walked.
pub fn draw_line(mask: &mut Mask, from: Point, to: Point) {
    let Some(((mut x, mut y), (x1, y1))) = clip_segment(mask, from, to) else {
        return;
    };
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        mask.set_signed(x, y);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Liang-Barsky clip of a segment to the mask bounds
fn clip_segment(mask: &Mask, from: Point, to: Point) -> Option<((i64, i64), (i64, i64))> {
    let (w, h) = (mask.width() as i64, mask.height() as i64);
    if w == 0 || h == 0 {
        return None;
    }
    let inside = |p: Point| (0..w).contains(&(p.x as i64)) && (0..h).contains(&(p.y as i64));
    if inside(from) && inside(to) {
        return Some(((from.x as i64, from.y as i64), (to.x as i64, to.y as i64)));
    }

    let (x0, y0) = (from.x as f64, from.y as f64);
    let (dx, dy) = (to.x as f64 - x0, to.y as f64 - y0);
    let (max_x, max_y) = ((w - 1) as f64, (h - 1) as f64);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);

    for (p, q) in [(-dx, x0), (dx, max_x - x0), (-dy, y0), (dy, max_y - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f64| {
        (
            ((x0 + t * dx).round() as i64).clamp(0, w - 1),
            ((y0 + t * dy).round() as i64).clamp(0, h - 1),
        )
    };
    Some((at(t0), at(t1)))
}
