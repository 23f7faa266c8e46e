//! Marker sizing and colouring for clusters.

use super::cluster::Cluster;
use super::gate::GateStatus;
use serde::Serialize;
use strum::Display;

/// Tunables for marker size, emphasis and colour
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerConfig {
    /// Size of a lone, idle gate
    pub base_size: f64,
    /// Upper bound on any marker size
    pub max_size: f64,
    /// Extra size per co-located gate, as a fraction of the base
    pub member_step: f64,
    /// `(minimum activity, multiplier)`, sorted by ascending threshold
    pub activity_tiers: Vec<(u64, f64)>,
    /// Activity strictly above this gets high emphasis
    pub emphasis_threshold: u64,
    /// Health strictly below this is critical
    pub critical_health: f64,
    /// Health strictly below this is degraded
    pub degraded_health: f64,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        MarkerConfig {
            base_size: 12.0,
            max_size: 32.0,
            member_step: 0.3,
            activity_tiers: vec![(5, 1.1), (20, 1.3), (50, 1.5)],
            emphasis_threshold: 20,
            critical_health: 70.0,
            degraded_health: 90.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Emphasis {
    Normal,
    High,
}

/// Colour class of a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tone {
    Healthy,
    Degraded,
    Critical,
    /// Warning colour for gates under maintenance
    Maintenance,
    /// Neutral grey
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerWeight {
    pub size: f64,
    pub emphasis: Emphasis,
}

impl MarkerConfig {
    /// Multiplier of the highest tier reached by `activity`
    pub fn activity_factor(&self, activity: u64) -> f64 {
        self.activity_tiers
            .iter()
            .filter(|(min, _)| activity >= *min)
            .map(|(_, factor)| *factor)
            .fold(1.0, f64::max)
    }

    /// Size and emphasis from member count and summed activity
    pub fn weigh(&self, member_count: usize, activity: u64) -> MarkerWeight {
        let extra = member_count.saturating_sub(1) as f64;
        let size = self.base_size * (1.0 + extra * self.member_step) * self.activity_factor(activity);

        let emphasis = if activity > self.emphasis_threshold {
            Emphasis::High
        } else {
            Emphasis::Normal
        };

        MarkerWeight {
            size: size.min(self.max_size),
            emphasis,
        }
    }

    /// Colour class for a status and the worst member health
    pub fn tone(&self, status: GateStatus, min_health: f64) -> Tone {
        match status {
            GateStatus::Inactive => Tone::Inactive,
            GateStatus::Maintenance => Tone::Maintenance,
            GateStatus::Active if min_health < self.critical_health => Tone::Critical,
            GateStatus::Active if min_health < self.degraded_health => Tone::Degraded,
            GateStatus::Active => Tone::Healthy,
        }
    }
}

pub fn weight(cluster: &Cluster, config: &MarkerConfig) -> MarkerWeight {
    config.weigh(cluster.member_count(), cluster.activity_total())
}

pub fn tone(cluster: &Cluster, config: &MarkerConfig) -> Tone {
    config.tone(cluster.dominant_status(), cluster.min_health())
}
