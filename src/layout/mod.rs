//! Package layout clusters check-in gates and fits them onto a map canvas
pub mod bounds;
pub mod cluster;
pub mod config;
pub mod error;
pub mod gate;
pub mod marker;
pub mod pipeline;
pub mod point;
pub mod projector;
pub mod viewport;

#[cfg(test)]
mod gate_test;

pub use bounds::{BoundingBox, compute_bounds};
pub use cluster::{Cluster, ClusterSet, build_clusters};
pub use config::LayoutConfig;
pub use error::{ExclusionReason, LayoutError};
pub use gate::{ExcludedGate, Gate, GateRecord, GateStatus, Location};
pub use marker::{Emphasis, MarkerConfig, MarkerWeight, Tone};
pub use pipeline::{
    ClusterMarker, Layout, build_layout, build_layout_from_records, build_layout_from_rows,
};
pub use point::{CoordinateSystem, ImageExtent, Point, PointList};
pub use projector::{Canvas, PixelPoint, project};
pub use viewport::{Viewport, ViewportFitter, ZoomRange};
