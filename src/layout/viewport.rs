use super::bounds::{BoundingBox, compute_bounds};
use super::error::{LayoutError, ViewportFitFailure};
use super::point::{CoordinateSystem, Point};
use super::projector::Canvas;
use serde::Serialize;

/// Zoom used when the fit computation fails, before clamping
pub const FALLBACK_ZOOM: f64 = 10.0;

/// Pixel margin kept free on every side of the fitted bounds
pub const DEFAULT_FIT_PADDING_PX: f64 = 40.0;

/// Inclusive zoom limits of the tile renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoomRange {
    pub min: f64,
    pub max: f64,
}

/// Where a tile-based renderer should look
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// Center in source units
    pub center: Point,
    pub zoom: f64,
    /// False when the viewport came from the fallback path
    pub fitted: bool,
}

impl ZoomRange {
    pub fn new(min: f64, max: f64) -> Result<Self, LayoutError> {
        if !(min.is_finite() && max.is_finite()) || min > max {
            return Err(LayoutError::InvalidZoomRange { min, max });
        }
        Ok(ZoomRange { min, max })
    }

    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min, self.max)
    }
}

impl Default for ZoomRange {
    fn default() -> Self {
        ZoomRange {
            min: 1.0,
            max: 18.0,
        }
    }
}

/// Fits bounds into a canvas on a 256 px tile pyramid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFitter {
    pub system: CoordinateSystem,
    pub canvas: Canvas,
    pub zoom_range: ZoomRange,
    pub padding_px: f64,
}

impl ViewportFitter {
    pub fn new(system: CoordinateSystem, canvas: Canvas, zoom_range: ZoomRange) -> Self {
        ViewportFitter {
            system,
            canvas,
            zoom_range,
            padding_px: DEFAULT_FIT_PADDING_PX,
        }
    }

    pub fn with_padding(mut self, padding_px: f64) -> Self {
        self.padding_px = padding_px;
        self
    }

    /// Fits the unpadded bounds of `points`
    ///
    /// # Errors
    ///
    /// [`LayoutError::EmptyInput`] when `points` is empty.
    pub fn fit_points(&self, points: &[Point]) -> Result<Viewport, LayoutError> {
        let bounds = compute_bounds(points, 0.0)?;
        Ok(self.fit(&bounds, points[0]))
    }

    /// Center on the middle of `bounds` at the largest whole zoom that fits it
    ///
    /// If the fit cannot be computed, centers on `anchor` at [`FALLBACK_ZOOM`] (raised to
    /// the range minimum and capped at its maximum) instead.
    pub fn fit(&self, bounds: &BoundingBox, anchor: Point) -> Viewport {
        match self.try_fit(bounds) {
            Ok(viewport) => viewport,
            Err(err) => {
                log::debug!("viewport fit failed ({}), using fallback", err);
                Viewport {
                    center: anchor,
                    zoom: self.zoom_range.clamp(self.zoom_range.min.max(FALLBACK_ZOOM)),
                    fitted: false,
                }
            }
        }
    }

    fn try_fit(&self, bounds: &BoundingBox) -> Result<Viewport, ViewportFitFailure> {
        let avail_w = self.canvas.width - 2.0 * self.padding_px;
        let avail_h = self.canvas.height - 2.0 * self.padding_px;
        if !(avail_w > 0.0 && avail_h > 0.0) {
            return Err(ViewportFitFailure::NoRoomForPadding {
                padding: self.padding_px,
            });
        }

        // px per source unit that makes the bounds exactly fill the free area
        let scale = (avail_w / bounds.width()).min(avail_h / bounds.height());
        let zoom = (scale / self.system.px_per_unit_at_zoom0()).log2().floor();
        if !zoom.is_finite() {
            return Err(ViewportFitFailure::NonFiniteZoom);
        }

        Ok(Viewport {
            center: bounds.center(),
            zoom: self.zoom_range.clamp(zoom),
            fitted: true,
        })
    }
}
