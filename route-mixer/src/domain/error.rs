//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from catalog loading and search errors.

use super::Location;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A leg's fields violate its invariants
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// A site's coordinates are out of range
    #[error("invalid site {0}: {1}")]
    InvalidSite(Location, &'static str),

    /// Consecutive legs don't share a location
    #[error("legs do not connect: {0} then {1}")]
    LegsNotConnected(Location, Location),

    /// A location appears twice in one itinerary
    #[error("itinerary visits {0} more than once")]
    RevisitedLocation(Location),
}
