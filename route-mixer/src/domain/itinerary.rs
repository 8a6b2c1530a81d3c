//! Itinerary type.
//!
//! An `Itinerary` is a chain of legs from a search's source to its
//! destination together with the totals derived from those legs. Totals are
//! computed by the planner's aggregator; this module owns the shape and the
//! chaining rules.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Duration;
use rust_decimal::Decimal;

use super::{DomainError, Leg, Location};

/// Largest minute count `chrono::Duration` can hold.
const MAX_DURATION_MIN: u64 = (i64::MAX / 60_000) as u64;

/// A complete journey made of zero or more legs.
///
/// # Invariants
///
/// - Consecutive legs connect (destination of one = source of the next)
/// - No location is visited twice
/// - Totals match the legs they summarise
///
/// The only itinerary without legs is the trivial one returned when the
/// source and destination of a search coincide.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    legs: Vec<Arc<Leg>>,
    total_price: Decimal,
    total_duration_min: u64,
    transfers: usize,
    all_legs_available: bool,
    total_distance_km: Option<f64>,
}

impl Itinerary {
    /// Check that legs form a chained, cycle-free path.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - a leg's destination is not the next leg's source
    /// - a location appears more than once along the path
    pub fn check_chain(legs: &[Arc<Leg>]) -> Result<(), DomainError> {
        for window in legs.windows(2) {
            let prev_dest = window[0].destination();
            let next_source = window[1].source();
            if prev_dest != next_source {
                return Err(DomainError::LegsNotConnected(
                    prev_dest.clone(),
                    next_source.clone(),
                ));
            }
        }

        let mut seen: HashSet<&Location> = HashSet::with_capacity(legs.len() + 1);
        if let Some(first) = legs.first() {
            seen.insert(first.source());
        }
        for leg in legs {
            if !seen.insert(leg.destination()) {
                return Err(DomainError::RevisitedLocation(leg.destination().clone()));
            }
        }

        Ok(())
    }

    /// Assemble an itinerary from legs and their precomputed totals.
    pub(crate) fn assemble(
        legs: Vec<Arc<Leg>>,
        total_price: Decimal,
        total_duration_min: u64,
        all_legs_available: bool,
        total_distance_km: Option<f64>,
    ) -> Self {
        debug_assert!(Self::check_chain(&legs).is_ok());
        let transfers = legs.len().saturating_sub(1);
        Self {
            legs,
            total_price,
            total_duration_min,
            transfers,
            all_legs_available,
            total_distance_km,
        }
    }

    /// Returns the legs in travel order.
    pub fn legs(&self) -> &[Arc<Leg>] {
        &self.legs
    }

    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Returns true for the zero-leg itinerary of a same-place search.
    pub fn is_trivial(&self) -> bool {
        self.legs.is_empty()
    }

    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    pub fn total_duration_min(&self) -> u64 {
        self.total_duration_min
    }

    /// Returns the summed leg durations as a `Duration`.
    pub fn total_duration(&self) -> Duration {
        Duration::minutes(self.total_duration_min.min(MAX_DURATION_MIN) as i64)
    }

    /// Returns the number of changes between legs (legs - 1, or 0).
    pub fn transfers(&self) -> usize {
        self.transfers
    }

    /// Returns true only if every leg is available.
    pub fn all_legs_available(&self) -> bool {
        self.all_legs_available
    }

    /// Returns the summed distance, if every leg has one.
    pub fn total_distance_km(&self) -> Option<f64> {
        self.total_distance_km
    }

    /// Returns the first leg's source.
    pub fn origin(&self) -> Option<&Location> {
        self.legs.first().map(|leg| leg.source())
    }

    /// Returns the last leg's destination.
    pub fn destination(&self) -> Option<&Location> {
        self.legs.last().map(|leg| leg.destination())
    }

    /// Returns every location along the path, origin first.
    pub fn stops(&self) -> Vec<&Location> {
        self.origin()
            .into_iter()
            .chain(self.legs.iter().map(|leg| leg.destination()))
            .collect()
    }
}
