use super::error::LayoutError;
use super::gate::{ExcludedGate, Gate, GateStatus};
use super::point::{CoordinateSystem, Point, PointList, distance_spherical};
use bitvec::prelude::*;
use std::collections::HashMap;

/// Default merge threshold for geographic gates, in degrees (about 50 m)
pub const DEFAULT_GEO_THRESHOLD: f64 = 0.0005;

/// Default merge threshold for image-space gates, in pixels
pub const DEFAULT_IMAGE_THRESHOLD: f64 = 20.0;

/// Smallest radius a cluster reports, in source units
pub const MIN_RADIUS: f64 = 1.0e-6;

/// Gates merged into one marker because they sit close together
#[derive(Debug, Clone)]
pub struct Cluster {
    /// Cluster ID, in seed order
    pub c: usize,
    /// Member gates, seed first, then in discovery order
    pub members: Vec<Gate>,
    /// Member points, parallel to `members`
    pub points: PointList,
    /// Arithmetic mean of the member points
    pub center: Point,
    /// Largest distance from `center` to a member, in source units
    pub radius: f64,
    /// Largest distance from `center` to a member in meters, geographic passes only
    pub radius_meters: Option<f64>,
}

/// Output of [`build_clusters`]
#[derive(Debug, Clone, Default)]
pub struct ClusterSet {
    pub clusters: Vec<Cluster>,
    pub excluded: Vec<ExcludedGate>,
}

impl Cluster {
    fn new(c: usize, members: Vec<Gate>, points: PointList, system: &CoordinateSystem) -> Self {
        debug_assert!(!points.is_empty());
        debug_assert_eq!(members.len(), points.len());

        let n = points.len() as f64;
        let mut center = Point([0.0, 0.0]);
        for pt in &points {
            for j in 0..2 {
                center.0[j] += pt.0[j];
            }
        }
        for j in 0..2 {
            center.0[j] /= n;
        }

        let radius = points
            .iter()
            .map(|pt| pt.dist(&center))
            .fold(0.0, f64::max)
            .max(MIN_RADIUS);

        let radius_meters = match system {
            CoordinateSystem::Geographic => Some(
                points
                    .iter()
                    .map(|pt| distance_spherical(pt, &center))
                    .fold(0.0, f64::max),
            ),
            CoordinateSystem::Image { .. } => None,
        };

        Cluster {
            c,
            members,
            points,
            center,
            radius,
            radius_meters,
        }
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn member_ids(&self) -> Vec<String> {
        self.members.iter().map(|g| g.id.clone()).collect()
    }

    /// Sum of member activity counts
    pub fn activity_total(&self) -> u64 {
        self.members
            .iter()
            .fold(0u64, |acc, g| acc.saturating_add(g.activity_count))
    }

    /// Lowest health score among the members
    pub fn min_health(&self) -> f64 {
        self.members
            .iter()
            .map(|g| g.health_score)
            .fold(f64::INFINITY, f64::min)
    }

    /// Status that represents the whole cluster
    ///
    /// A strict majority of active members makes the cluster active. Otherwise any member
    /// in maintenance makes it maintenance, and failing that it is inactive.
    pub fn dominant_status(&self) -> GateStatus {
        let mut counts: HashMap<GateStatus, usize> = HashMap::new();
        for g in &self.members {
            *counts.entry(g.status).or_default() += 1;
        }

        let active = counts.get(&GateStatus::Active).copied().unwrap_or(0);
        if active * 2 > self.members.len() {
            GateStatus::Active
        } else if counts.contains_key(&GateStatus::Maintenance) {
            GateStatus::Maintenance
        } else if counts.contains_key(&GateStatus::Inactive) {
            GateStatus::Inactive
        } else {
            GateStatus::Active
        }
    }
}

/// Groups gates into clusters with a greedy, seed-based box test
///
/// Gates are visited in input order. Each gate not yet in a cluster seeds a new one and
/// pulls in every other unclustered gate whose offset from the seed is strictly below
/// `distance_threshold` on both axes. Membership is tested against the seed only, not
/// against gates added after it.
///
/// Gates that cannot be placed in `system` are returned in [`ClusterSet::excluded`].
///
/// # Errors
///
/// [`LayoutError::InvalidThreshold`] if `distance_threshold` is not positive and finite.
pub fn build_clusters(
    gates: &[Gate],
    system: &CoordinateSystem,
    distance_threshold: f64,
) -> Result<ClusterSet, LayoutError> {
    if !distance_threshold.is_finite() || distance_threshold <= 0.0 {
        return Err(LayoutError::InvalidThreshold(distance_threshold));
    }

    let mut usable: Vec<(&Gate, Point)> = Vec::with_capacity(gates.len());
    let mut excluded = Vec::new();

    for gate in gates {
        match gate.usable_point(system) {
            Ok(pt) => usable.push((gate, pt)),
            Err(reason) => {
                log::warn!("excluding gate {}: {}", gate.id, reason);
                excluded.push(ExcludedGate {
                    id: gate.id.clone(),
                    reason,
                });
            }
        }
    }

    let mut processed = bitvec![0; usable.len()];
    let mut clusters = Vec::new();

    for i in 0..usable.len() {
        if processed[i] {
            continue;
        }
        processed.set(i, true);

        let (seed, seed_pt) = usable[i];
        let mut members = vec![seed.clone()];
        let mut points = vec![seed_pt];

        for k in (i + 1)..usable.len() {
            if processed[k] {
                continue;
            }

            let (other, other_pt) = usable[k];
            if seed_pt.within_box(&other_pt, distance_threshold) {
                processed.set(k, true);
                members.push(other.clone());
                points.push(other_pt);
            }
        }

        clusters.push(Cluster::new(clusters.len(), members, points, system));
    }

    log::debug!(
        "built {} clusters from {} gates ({} excluded)",
        clusters.len(),
        gates.len(),
        excluded.len()
    );

    Ok(ClusterSet { clusters, excluded })
}
