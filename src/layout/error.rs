use serde::Serialize;
use strum::Display;
use thiserror::Error;

/// Whole-batch failures of the layout engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("no usable points to lay out")]
    EmptyInput,
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },
    #[error("invalid zoom range {min}..={max}")]
    InvalidZoomRange { min: f64, max: f64 },
    #[error("clustering threshold must be positive and finite, got {0}")]
    InvalidThreshold(f64),
    #[error("padding fraction must be non-negative and finite, got {0}")]
    InvalidPadding(f64),
}

/// Why a gate was left out of a render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExclusionReason {
    /// Neither a geographic nor an image coordinate pair
    MissingCoordinates,
    /// Both a geographic and an image coordinate pair
    AmbiguousCoordinates,
    NonFiniteCoordinates,
    /// Outside the valid latitude/longitude range or the image extent
    OutOfRange,
    /// Uses the other representation than the rest of the session
    CoordinateSystemMismatch,
    /// Row of the record store that could not be decoded into a gate record
    MalformedRecord,
}

/// Local failure of the fit computation, resolved into the fallback viewport
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub(crate) enum ViewportFitFailure {
    #[error("canvas leaves no room inside {padding} px of fit padding")]
    NoRoomForPadding { padding: f64 },
    #[error("fitted zoom is not finite")]
    NonFiniteZoom,
}
