use super::bounds::BoundingBox;
use super::error::LayoutError;
use super::point::{CoordinateSystem, Point};
use serde::Serialize;

/// Render surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

/// A position on the render surface, origin top-left, y down
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Result<Self, LayoutError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(LayoutError::InvalidCanvas { width, height });
        }
        Ok(Canvas { width, height })
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Maps a source point into render space by linear interpolation over `bounds`
///
/// Geographic passes flip Y so that increasing latitude moves up the canvas. Image passes
/// keep Y as-is, image rows already grow downward.
pub fn project(
    point: &Point,
    bounds: &BoundingBox,
    canvas: &Canvas,
    system: &CoordinateSystem,
) -> PixelPoint {
    let fx = (point.x() - bounds.min_x) / bounds.width();
    let fy = (point.y() - bounds.min_y) / bounds.height();

    let y = if system.inverts_y() {
        canvas.height - fy * canvas.height
    } else {
        fy * canvas.height
    };

    PixelPoint {
        x: fx * canvas.width,
        y,
    }
}
