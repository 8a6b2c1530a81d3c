//! Turning a raw leg path into an `Itinerary` with its totals.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::{DomainError, Itinerary, Leg};

/// Compute the totals for a path the enumerator produced.
///
/// - `total_price` is the exact decimal sum of leg prices (leg prices are
///   capped at `MAX_PRICE`, so the sum cannot realistically overflow; it
///   saturates rather than panics)
/// - `total_duration_min` is the sum of leg durations
/// - `all_legs_available` is the AND over legs (true for an empty path)
/// - `total_distance_km` is known only if every leg's distance is known
///
/// The caller guarantees the legs chain; use [`aggregate_checked`] for
/// paths from elsewhere.
pub fn aggregate(legs: Vec<Arc<Leg>>) -> Itinerary {
    let total_price = legs
        .iter()
        .fold(Decimal::ZERO, |sum, leg| sum.saturating_add(leg.price()));
    let total_duration_min: u64 = legs.iter().map(|leg| u64::from(leg.duration_min())).sum();
    let all_legs_available = legs.iter().all(|leg| leg.is_available());
    let total_distance_km = legs
        .iter()
        .try_fold(0.0, |km, leg| leg.distance_km().map(|d| km + d));

    Itinerary::assemble(
        legs,
        total_price,
        total_duration_min,
        all_legs_available,
        total_distance_km,
    )
}

/// Like [`aggregate`], but rejects legs that do not form a cycle-free chain.
pub fn aggregate_checked(legs: Vec<Arc<Leg>>) -> Result<Itinerary, DomainError> {
    Itinerary::check_chain(&legs)?;
    Ok(aggregate(legs))
}
