use super::bounds::DEFAULT_PADDING_FRACTION;
use super::cluster::{DEFAULT_GEO_THRESHOLD, DEFAULT_IMAGE_THRESHOLD};
use super::error::LayoutError;
use super::marker::MarkerConfig;
use super::point::CoordinateSystem;
use super::projector::Canvas;
use super::viewport::{DEFAULT_FIT_PADDING_PX, ZoomRange};

/// Every tunable of a render pass
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Fixed coordinate system, or `None` to take it from the first placeable gate
    pub system: Option<CoordinateSystem>,
    pub padding_fraction: f64,
    /// Merge threshold in source units, or `None` for the system default
    pub distance_threshold: Option<f64>,
    pub canvas: Canvas,
    pub zoom_range: ZoomRange,
    pub fit_padding_px: f64,
    pub marker: MarkerConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            system: None,
            padding_fraction: DEFAULT_PADDING_FRACTION,
            distance_threshold: None,
            canvas: Canvas::default(),
            zoom_range: ZoomRange::default(),
            fit_padding_px: DEFAULT_FIT_PADDING_PX,
            marker: MarkerConfig::default(),
        }
    }
}

impl LayoutConfig {
    /// Defaults pinned to one coordinate system
    pub fn for_system(system: CoordinateSystem) -> Self {
        LayoutConfig {
            system: Some(system),
            ..Default::default()
        }
    }

    /// Threshold to cluster with in `system`
    pub fn threshold_for(&self, system: &CoordinateSystem) -> f64 {
        self.distance_threshold.unwrap_or(match system {
            CoordinateSystem::Geographic => DEFAULT_GEO_THRESHOLD,
            CoordinateSystem::Image { .. } => DEFAULT_IMAGE_THRESHOLD,
        })
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.padding_fraction.is_finite() || self.padding_fraction < 0.0 {
            return Err(LayoutError::InvalidPadding(self.padding_fraction));
        }

        if let Some(t) = self.distance_threshold {
            if !t.is_finite() || t <= 0.0 {
                return Err(LayoutError::InvalidThreshold(t));
            }
        }

        Canvas::new(self.canvas.width, self.canvas.height)?;
        ZoomRange::new(self.zoom_range.min, self.zoom_range.max)?;

        Ok(())
    }
}
