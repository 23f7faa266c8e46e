use super::error::ExclusionReason;
use super::point::{CoordinateSystem, Point};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Health score assumed when the record store has none
pub const DEFAULT_HEALTH_SCORE: f64 = 100.0;

/// Operational state of a gate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GateStatus {
    #[default]
    Active,
    Maintenance,
    Inactive,
}

/// Where a gate is, in exactly one representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Location {
    Geo { latitude: f64, longitude: f64 },
    Image { x: f64, y: f64 },
}

/// A check-in gate as seen by the layout engine
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    pub id: String,
    pub name: Option<String>,
    /// `None` when the record carries no coordinates at all
    pub location: Option<Location>,
    pub status: GateStatus,
    /// 0 to 100
    pub health_score: f64,
    /// Check-ins or similar activity
    pub activity_count: u64,
}

/// The raw, all-optional gate shape handed over by the record store
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GateRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub status: Option<GateStatus>,
    #[serde(default, alias = "healthScore")]
    pub health_score: Option<f64>,
    #[serde(default, alias = "activityCount")]
    pub activity_count: Option<u64>,
}

/// A gate left out of the render pass, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludedGate {
    pub id: String,
    pub reason: ExclusionReason,
}

impl Location {
    /// Layout-plane point: x is longitude or image column, y is latitude or image row
    pub fn point(&self) -> Point {
        match *self {
            Location::Geo { latitude, longitude } => Point([longitude, latitude]),
            Location::Image { x, y } => Point([x, y]),
        }
    }

    pub fn matches(&self, system: &CoordinateSystem) -> bool {
        matches!(
            (self, system),
            (Location::Geo { .. }, CoordinateSystem::Geographic)
                | (Location::Image { .. }, CoordinateSystem::Image { .. })
        )
    }

    /// The coordinate system this location implies, without any image extent
    pub fn implied_system(&self) -> CoordinateSystem {
        match self {
            Location::Geo { .. } => CoordinateSystem::Geographic,
            Location::Image { .. } => CoordinateSystem::Image { extent: None },
        }
    }
}

impl Gate {
    /// Builds a gate at a location with default status, health and activity
    pub fn new(id: impl Into<String>, location: Option<Location>) -> Self {
        Gate {
            id: id.into(),
            name: None,
            location,
            status: GateStatus::Active,
            health_score: DEFAULT_HEALTH_SCORE,
            activity_count: 0,
        }
    }

    /// Shorthand for a geographic gate
    pub fn geo(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Gate::new(id, Some(Location::Geo { latitude, longitude }))
    }

    /// Shorthand for an image-space gate
    pub fn image(id: impl Into<String>, x: f64, y: f64) -> Self {
        Gate::new(id, Some(Location::Image { x, y }))
    }

    pub fn with_status(mut self, status: GateStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_health(mut self, health_score: f64) -> Self {
        self.health_score = health_score;
        self
    }

    pub fn with_activity(mut self, activity_count: u64) -> Self {
        self.activity_count = activity_count;
        self
    }

    /// Converts a raw record, rejecting records that carry both coordinate pairs
    ///
    /// A record with only half of a pair (e.g. latitude without longitude) counts as
    /// having no coordinates for that pair.
    pub fn from_record(record: GateRecord) -> Result<Self, ExcludedGate> {
        let geo = match (record.latitude, record.longitude) {
            (Some(latitude), Some(longitude)) => Some(Location::Geo { latitude, longitude }),
            _ => None,
        };
        let image = match (record.x, record.y) {
            (Some(x), Some(y)) => Some(Location::Image { x, y }),
            _ => None,
        };

        let location = match (geo, image) {
            (Some(_), Some(_)) => {
                return Err(ExcludedGate {
                    id: record.id,
                    reason: ExclusionReason::AmbiguousCoordinates,
                });
            }
            (geo, image) => geo.or(image),
        };

        let health_score = record
            .health_score
            .filter(|h| h.is_finite())
            .map(|h| h.clamp(0.0, 100.0))
            .unwrap_or(DEFAULT_HEALTH_SCORE);

        Ok(Gate {
            id: record.id,
            name: record.name.filter(|n| !n.is_empty()),
            location,
            status: record.status.unwrap_or_default(),
            health_score,
            activity_count: record.activity_count.unwrap_or(0),
        })
    }

    /// Returns the gate's layout-plane point if it can take part in a pass using `system`
    pub fn usable_point(&self, system: &CoordinateSystem) -> Result<Point, ExclusionReason> {
        let location = self.location.ok_or(ExclusionReason::MissingCoordinates)?;

        if !location.matches(system) {
            return Err(ExclusionReason::CoordinateSystemMismatch);
        }

        let point = location.point();
        if !point.is_finite() {
            return Err(ExclusionReason::NonFiniteCoordinates);
        }

        if !system.in_range(&point) {
            return Err(ExclusionReason::OutOfRange);
        }

        Ok(point)
    }
}

/// Converts record-store rows into gates, splitting off the ones that can never be placed
///
/// A row is either a decoded record or the exclusion its reader already made. Both outputs
/// carry the row index so callers can report exclusions in input order.
pub fn gates_from_records<I>(rows: I) -> (Vec<(usize, Gate)>, Vec<(usize, ExcludedGate)>)
where
    I: IntoIterator<Item = Result<GateRecord, ExcludedGate>>,
{
    let mut gates = Vec::new();
    let mut excluded = Vec::new();

    for (row, result) in rows.into_iter().enumerate() {
        match result.and_then(Gate::from_record) {
            Ok(gate) => gates.push((row, gate)),
            Err(excl) => {
                log::warn!("excluding gate {}: {}", excl.id, excl.reason);
                excluded.push((row, excl));
            }
        }
    }

    (gates, excluded)
}

/// Picks the coordinate system for a render pass
///
/// A configured system wins. Otherwise the first gate that is placeable in the system its
/// own location implies decides, so a leading garbage record cannot pick the system.
pub fn resolve_coordinate_system(
    gates: &[Gate],
    configured: Option<CoordinateSystem>,
) -> Option<CoordinateSystem> {
    if configured.is_some() {
        return configured;
    }

    gates.iter().find_map(|g| {
        let system = g.location?.implied_system();
        g.usable_point(&system).ok().map(|_| system)
    })
}
