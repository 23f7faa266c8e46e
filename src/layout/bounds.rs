use super::error::LayoutError;
use super::point::Point;
use serde::Serialize;

/// Fraction of the span added on each side by default
pub const DEFAULT_PADDING_FRACTION: f64 = 0.1;

/// Span substituted for an axis whose points all share one value
pub const MIN_SPAN: f64 = 1.0e-3;

/// Ranges below this are treated as degenerate
const SPAN_EPSILON: f64 = 1.0e-12;

/// Axis-aligned box in source coordinate units
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point([
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        ])
    }

    /// Checks if the point lies inside or on the edge of the box
    pub fn contains(&self, p: &Point) -> bool {
        (self.min_x..=self.max_x).contains(&p.0[0]) && (self.min_y..=self.max_y).contains(&p.0[1])
    }
}

/// Computes the padded bounding box of a set of points
///
/// Each axis is widened to [`MIN_SPAN`] around its value when all points share it, then
/// expanded outward by `padding_fraction * range` on both ends. The result always has a
/// strictly positive width and height.
///
/// # Errors
///
/// [`LayoutError::EmptyInput`] for an empty slice, [`LayoutError::InvalidPadding`] for a
/// negative or non-finite padding fraction.
pub fn compute_bounds(points: &[Point], padding_fraction: f64) -> Result<BoundingBox, LayoutError> {
    if points.is_empty() {
        return Err(LayoutError::EmptyInput);
    }
    if !padding_fraction.is_finite() || padding_fraction < 0.0 {
        return Err(LayoutError::InvalidPadding(padding_fraction));
    }

    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];

    for pt in points {
        for j in 0..2 {
            min[j] = min[j].min(pt.0[j]);
            max[j] = max[j].max(pt.0[j]);
        }
    }

    for j in 0..2 {
        let mut range = max[j] - min[j];
        if range < SPAN_EPSILON {
            log::debug!(
                "degenerate bounds on axis {}, widening to span {}",
                j,
                MIN_SPAN
            );
            let mid = (min[j] + max[j]) / 2.0;
            min[j] = mid - MIN_SPAN / 2.0;
            max[j] = mid + MIN_SPAN / 2.0;
            range = MIN_SPAN;
        }

        min[j] -= padding_fraction * range;
        max[j] += padding_fraction * range;
    }

    Ok(BoundingBox {
        min_x: min[0],
        max_x: max[0],
        min_y: min[1],
        max_y: max[1],
    })
}
