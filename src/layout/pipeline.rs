//! One render pass: gates in, render-ready layout out.

use super::bounds::{BoundingBox, compute_bounds};
use super::cluster::build_clusters;
use super::config::LayoutConfig;
use super::error::{ExclusionReason, LayoutError};
use super::gate::{
    ExcludedGate, Gate, GateRecord, GateStatus, gates_from_records, resolve_coordinate_system,
};
use super::marker::{Emphasis, Tone, tone, weight};
use super::point::{CoordinateSystem, Point, PointList};
use super::projector::{PixelPoint, project};
use super::viewport::{Viewport, ViewportFitter};
use serde::Serialize;

/// One marker as the render sink draws it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterMarker {
    pub id: usize,
    pub gate_ids: Vec<String>,
    /// Render-space position of the cluster center
    pub position: PixelPoint,
    /// Cluster center in source units
    pub center: Point,
    pub radius: f64,
    pub radius_meters: Option<f64>,
    pub size: f64,
    pub emphasis: Emphasis,
    pub tone: Tone,
    pub status: GateStatus,
    pub activity: u64,
}

/// Result of a render pass
///
/// With no placeable gates, `system`, `bounds` and `viewport` are `None` and `markers` is
/// empty: the empty state.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Layout {
    pub system: Option<CoordinateSystem>,
    pub bounds: Option<BoundingBox>,
    pub markers: Vec<ClusterMarker>,
    pub viewport: Option<Viewport>,
    pub excluded: Vec<ExcludedGate>,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// Lays out gates for one render pass
///
/// Only configuration problems are errors. Gates that cannot be placed end up in
/// [`Layout::excluded`].
pub fn build_layout(gates: &[Gate], config: &LayoutConfig) -> Result<Layout, LayoutError> {
    config.validate()?;

    let Some(system) = resolve_coordinate_system(gates, config.system) else {
        log::debug!("no gate carries a usable location");
        return Ok(Layout {
            excluded: exclude_all(gates),
            ..Default::default()
        });
    };

    let set = build_clusters(gates, &system, config.threshold_for(&system))?;
    if set.clusters.is_empty() {
        return Ok(Layout {
            system: Some(system),
            excluded: set.excluded,
            ..Default::default()
        });
    }

    let points: PointList = set
        .clusters
        .iter()
        .flat_map(|c| c.points.iter().copied())
        .collect();
    let bounds = compute_bounds(&points, config.padding_fraction)?;

    let markers = set
        .clusters
        .iter()
        .map(|c| {
            let w = weight(c, &config.marker);
            ClusterMarker {
                id: c.c,
                gate_ids: c.member_ids(),
                position: project(&c.center, &bounds, &config.canvas, &system),
                center: c.center,
                radius: c.radius,
                radius_meters: c.radius_meters,
                size: w.size,
                emphasis: w.emphasis,
                tone: tone(c, &config.marker),
                status: c.dominant_status(),
                activity: c.activity_total(),
            }
        })
        .collect();

    let viewport = ViewportFitter::new(system, config.canvas, config.zoom_range)
        .with_padding(config.fit_padding_px)
        .fit_points(&points)?;

    log::debug!(
        "layout: {} markers, zoom {} centered at {:?}",
        set.clusters.len(),
        viewport.zoom,
        viewport.center
    );

    Ok(Layout {
        system: Some(system),
        bounds: Some(bounds),
        markers,
        viewport: Some(viewport),
        excluded: set.excluded,
    })
}

/// Same as [`build_layout`], starting from raw record-store records
pub fn build_layout_from_records(
    records: Vec<GateRecord>,
    config: &LayoutConfig,
) -> Result<Layout, LayoutError> {
    build_layout_from_rows(records.into_iter().map(Ok), config)
}

/// Same as [`build_layout_from_records`], for rows some of which the reader already rejected
///
/// [`Layout::excluded`] lists rejected rows and unplaceable gates together, in row order.
pub fn build_layout_from_rows<I>(rows: I, config: &LayoutConfig) -> Result<Layout, LayoutError>
where
    I: IntoIterator<Item = Result<GateRecord, ExcludedGate>>,
{
    let (indexed, mut excluded) = gates_from_records(rows);
    let (gate_rows, gates): (Vec<usize>, Vec<Gate>) = indexed.into_iter().unzip();

    let mut layout = build_layout(&gates, config)?;

    // one gate-level exclusion per gate not placeable in the pass, in gate order
    let system = layout.system;
    let unplaced = gates
        .iter()
        .zip(gate_rows)
        .filter(|(g, _)| system.is_none_or(|s| g.usable_point(&s).is_err()))
        .map(|(_, row)| row);
    excluded.extend(unplaced.zip(std::mem::take(&mut layout.excluded)));
    excluded.sort_by_key(|(row, _)| *row);

    layout.excluded = excluded.into_iter().map(|(_, excl)| excl).collect();
    Ok(layout)
}

fn exclude_all(gates: &[Gate]) -> Vec<ExcludedGate> {
    gates
        .iter()
        .map(|g| {
            let reason = match g.location {
                None => ExclusionReason::MissingCoordinates,
                Some(loc) => match g.usable_point(&loc.implied_system()) {
                    Err(reason) => reason,
                    Ok(_) => ExclusionReason::CoordinateSystemMismatch,
                },
            };
            log::warn!("excluding gate {}: {}", g.id, reason);
            ExcludedGate {
                id: g.id.clone(),
                reason,
            }
        })
        .collect()
}
