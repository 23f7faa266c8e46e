use serde::Serialize;
use std::f64::consts::PI;

/// Coefficient to translate from degrees to radians
pub const DEGREE_RAD: f64 = PI / 180.0;

/// Earth radius in meters
pub const EARTH_R_M: f64 = 6_371_000.0;

/// Point represents a coordinate on the locally-flat layout plane
///
/// The point is stored as [x, y] where:
/// - `[0]` is longitude (geographic) or image column (image-space)
/// - `[1]` is latitude (geographic) or image row (image-space)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point(pub [f64; 2]);

/// PointList is a collection of Points
pub type PointList = Vec<Point>;

/// The coordinate system shared by every gate in a single render pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CoordinateSystem {
    /// Decimal degrees, x = longitude, y = latitude
    Geographic,
    /// Pixel offsets into a background image, of known size when `extent` is set
    Image { extent: Option<ImageExtent> },
}

/// Size of the background image used by image-space gates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImageExtent {
    pub width: f64,
    pub height: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point([x, y])
    }

    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }

    pub fn is_finite(&self) -> bool {
        self.0[0].is_finite() && self.0[1].is_finite()
    }

    /// Euclidean distance on the layout plane, in source units
    pub fn dist(&self, b: &Point) -> f64 {
        let dx = self.0[0] - b.0[0];
        let dy = self.0[1] - b.0[1];
        (dx * dx + dy * dy).sqrt()
    }

    /// Axis-aligned neighbourhood test: both axis offsets strictly below `eps`
    pub fn within_box(&self, b: &Point, eps: f64) -> bool {
        (self.0[0] - b.0[0]).abs() < eps && (self.0[1] - b.0[1]).abs() < eps
    }
}

impl CoordinateSystem {
    /// Whether screen Y must be flipped so that larger source Y moves upward
    pub fn inverts_y(&self) -> bool {
        matches!(self, CoordinateSystem::Geographic)
    }

    /// Whether a finite point lies inside the valid coordinate domain
    pub fn in_range(&self, p: &Point) -> bool {
        match self {
            CoordinateSystem::Geographic => {
                (-180.0..=180.0).contains(&p.0[0]) && (-90.0..=90.0).contains(&p.0[1])
            }
            CoordinateSystem::Image { extent: None } => true,
            CoordinateSystem::Image {
                extent: Some(ImageExtent { width, height }),
            } => (0.0..=*width).contains(&p.0[0]) && (0.0..=*height).contains(&p.0[1]),
        }
    }

    /// Render pixels per source unit at zoom 0 of a 256 px tile pyramid
    pub fn px_per_unit_at_zoom0(&self) -> f64 {
        match self {
            CoordinateSystem::Geographic => 256.0 / 360.0,
            CoordinateSystem::Image { .. } => 1.0,
        }
    }
}

/// Calculates spherical (flat-earth approximated) distance between two
/// (lon, lat) points
///
/// # Returns
///
/// Distance in meters
pub fn distance_spherical(p1: &Point, p2: &Point) -> f64 {
    let v1 = (p1.0[1] - p2.0[1]) * DEGREE_RAD;
    let v1 = v1 * v1;

    let v2 = (p1.0[0] - p2.0[0]) * DEGREE_RAD * ((p1.0[1] + p2.0[1]) / 2.0 * DEGREE_RAD).cos();
    let v2 = v2 * v2;

    EARTH_R_M * (v1 + v2).sqrt()
}
