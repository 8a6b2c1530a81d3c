//! Search configuration for the itinerary planner.

use std::time::Duration;

use chrono::TimeDelta;
use serde::Deserialize;

use super::rank::RankPolicy;

/// Configuration parameters for itinerary search.
///
/// Deserializes with every field optional, so a catalog document can
/// override only what it needs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of legs in one itinerary (transfers + 1).
    pub max_legs: usize,

    /// Maximum number of itineraries to return.
    pub max_results: usize,

    /// Time budget for a single search (milliseconds).
    /// Searches that run past it fail with a timeout.
    pub timeout_ms: u64,

    /// Reject paths longer than this multiple of the straight-line
    /// source-destination distance. Only applies where sites and leg
    /// distances are known.
    pub max_detour_factor: Option<f64>,

    /// Reject paths whose known travelled distance exceeds this (km).
    pub max_total_distance_km: Option<f64>,

    /// Maximum total travel time (minutes).
    /// Paths longer than this are pruned during search.
    pub max_total_duration_min: Option<i64>,

    /// How results are ordered.
    pub rank_policy: RankPolicy,
}

impl SearchConfig {
    /// Create a new configuration with the given bounds and no pruning.
    pub fn new(max_legs: usize, max_results: usize, timeout_ms: u64) -> Self {
        Self {
            max_legs,
            max_results,
            timeout_ms,
            ..Self::default()
        }
    }

    /// Returns the time budget as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Returns the travel time cap, if any.
    ///
    /// Values too large for `TimeDelta` mean no cap.
    pub fn max_total_duration(&self) -> Option<TimeDelta> {
        self.max_total_duration_min.and_then(TimeDelta::try_minutes)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_legs: 4,
            max_results: 20,
            timeout_ms: 2_000,
            max_detour_factor: None,
            max_total_distance_km: None,
            max_total_duration_min: None,
            rank_policy: RankPolicy::Lexicographic,
        }
    }
}
