//! Itinerary ranking for search results.
//!
//! Candidates are ordered so that the most useful options come first and
//! then truncated to the configured limit.

use std::cmp::Ordering;

use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;

use crate::domain::Itinerary;

/// How candidate itineraries are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RankPolicy {
    /// Availability, then price, then duration, then transfers.
    #[default]
    Lexicographic,

    /// A single weighted cost, lowest first.
    ///
    /// Ties on cost fall back to the lexicographic order.
    Weighted(ScoreWeights),
}

/// Weights for the scored ranking policy.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Flat cost added when any leg is unavailable.
    pub unavailable_penalty: f64,
    pub per_price_unit: f64,
    pub per_hour: f64,
    pub per_transfer: f64,
    /// Cost per known kilometre travelled. Unknown distances cost nothing.
    pub per_km: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            unavailable_penalty: 10_000.0,
            per_price_unit: 1.0,
            per_hour: 50.0,
            per_transfer: 200.0,
            per_km: 0.1,
        }
    }
}

impl ScoreWeights {
    /// Compute the weighted cost of an itinerary. Lower is better.
    pub fn score(&self, itinerary: &Itinerary) -> f64 {
        let penalty = if itinerary.all_legs_available() {
            0.0
        } else {
            self.unavailable_penalty
        };
        let price = itinerary.total_price().to_f64().unwrap_or(f64::MAX);
        let hours = itinerary.total_duration().num_minutes() as f64 / 60.0;
        let km = itinerary.total_distance_km().unwrap_or(0.0);

        penalty
            + price * self.per_price_unit
            + hours * self.per_hour
            + itinerary.transfers() as f64 * self.per_transfer
            + km * self.per_km
    }
}

/// Compare two itineraries by preference.
///
/// Itineraries are ordered by:
/// 1. Availability (fully available first)
/// 2. Total price (cheaper is better)
/// 3. Total duration (shorter is better)
/// 4. Transfers (fewer is better)
pub fn compare_itineraries(a: &Itinerary, b: &Itinerary) -> Ordering {
    b.all_legs_available()
        .cmp(&a.all_legs_available())
        .then_with(|| a.total_price().cmp(&b.total_price()))
        .then_with(|| a.total_duration_min().cmp(&b.total_duration_min()))
        .then_with(|| a.transfers().cmp(&b.transfers()))
}

/// Rank itineraries by preference and keep at most `limit` of them.
///
/// The sort is stable: itineraries that compare equal keep the order in
/// which they were discovered.
pub fn rank_itineraries(
    mut itineraries: Vec<Itinerary>,
    limit: usize,
    policy: &RankPolicy,
) -> Vec<Itinerary> {
    match policy {
        RankPolicy::Lexicographic => itineraries.sort_by(compare_itineraries),
        RankPolicy::Weighted(weights) => {
            let mut scored: Vec<(f64, Itinerary)> = itineraries
                .into_iter()
                .map(|it| (weights.score(&it), it))
                .collect();
            scored.sort_by(|(sa, a), (sb, b)| {
                sa.total_cmp(sb).then_with(|| compare_itineraries(a, b))
            });
            itineraries = scored.into_iter().map(|(_, it)| it).collect();
        }
    }

    itineraries.truncate(limit);
    itineraries
}
