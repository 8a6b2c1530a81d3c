//! Transport leg type.
//!
//! A `Leg` is a single direct segment between two locations served by one
//! mode. Legs are owned by the catalog and shared with itineraries through
//! `Arc<Leg>`, so candidate paths clone cheaply during enumeration.

use chrono::Duration;
use rust_decimal::Decimal;

use super::{DomainError, Location, TransportMode};

/// Largest accepted leg price (10^15).
///
/// Summing any realistic number of capped prices stays far inside the
/// `Decimal` range, so itinerary totals never overflow.
pub const MAX_PRICE: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// A directed, priced edge of the transport graph.
///
/// # Invariants
///
/// - `source != destination`
/// - `0 <= price <= MAX_PRICE`
/// - `duration_min > 0`
/// - `distance_km`, when present, is finite and non-negative
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    source: Location,
    destination: Location,
    mode: TransportMode,
    price: Decimal,
    duration_min: u32,
    available: bool,
    distance_km: Option<f64>,
}

impl Leg {
    /// Construct a leg, validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - source and destination are the same location
    /// - price is negative or above [`MAX_PRICE`]
    /// - duration is zero
    ///
    /// # Examples
    ///
    /// ```
    /// use route_mixer::domain::{Leg, Location, TransportMode};
    /// use rust_decimal::Decimal;
    ///
    /// let a = Location::parse("A").unwrap();
    /// let b = Location::parse("B").unwrap();
    ///
    /// let leg = Leg::new(a, b, TransportMode::Bus, Decimal::new(100, 0), 60, true).unwrap();
    /// assert_eq!(leg.duration_min(), 60);
    /// assert!(leg.is_available());
    /// ```
    pub fn new(
        source: Location,
        destination: Location,
        mode: TransportMode,
        price: Decimal,
        duration_min: u32,
        available: bool,
    ) -> Result<Self, DomainError> {
        if source == destination {
            return Err(DomainError::InvalidLeg(
                "source and destination must differ",
            ));
        }

        if price.is_sign_negative() && !price.is_zero() {
            return Err(DomainError::InvalidLeg("price must not be negative"));
        }

        if price > MAX_PRICE {
            return Err(DomainError::InvalidLeg("price exceeds the maximum"));
        }

        if duration_min == 0 {
            return Err(DomainError::InvalidLeg("duration must be positive"));
        }

        Ok(Self {
            source,
            destination,
            mode,
            price,
            duration_min,
            available,
            distance_km: None,
        })
    }

    /// Attach a travelled distance to this leg.
    pub fn with_distance_km(mut self, distance_km: f64) -> Result<Self, DomainError> {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(DomainError::InvalidLeg(
                "distance must be finite and non-negative",
            ));
        }
        self.distance_km = Some(distance_km);
        Ok(self)
    }

    /// Returns the departure location.
    pub fn source(&self) -> &Location {
        &self.source
    }

    /// Returns the arrival location.
    pub fn destination(&self) -> &Location {
        &self.destination
    }

    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Returns the travel time in whole minutes.
    pub fn duration_min(&self) -> u32 {
        self.duration_min
    }

    /// Returns the travel time as a `Duration`.
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_min))
    }

    /// Returns true if a seat can currently be booked on this leg.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Returns the travelled distance, if known.
    pub fn distance_km(&self) -> Option<f64> {
        self.distance_km
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(s: &str) -> Location {
        Location::parse(s).unwrap()
    }

    #[test]
    fn valid_leg() {
        let leg = Leg::new(
            loc("A"),
            loc("B"),
            TransportMode::Train,
            Decimal::new(15050, 2),
            90,
            false,
        )
        .unwrap();

        assert_eq!(leg.source(), &loc("A"));
        assert_eq!(leg.destination(), &loc("B"));
        assert_eq!(leg.mode(), TransportMode::Train);
        assert_eq!(leg.price(), Decimal::new(15050, 2));
        assert_eq!(leg.duration_min(), 90);
        assert_eq!(leg.duration(), Duration::minutes(90));
        assert!(!leg.is_available());
        assert_eq!(leg.distance_km(), None);
    }

    #[test]
    fn free_leg_allowed() {
        let leg = Leg::new(loc("A"), loc("B"), TransportMode::Bus, Decimal::ZERO, 5, true);
        assert!(leg.is_ok());
    }

    #[test]
    fn reject_self_loop() {
        let result = Leg::new(loc("A"), loc("A"), TransportMode::Bus, Decimal::ONE, 5, true);
        assert!(matches!(result, Err(DomainError::InvalidLeg(_))));
    }

    #[test]
    fn reject_negative_price() {
        let result = Leg::new(
            loc("A"),
            loc("B"),
            TransportMode::Bus,
            Decimal::new(-1, 2),
            5,
            true,
        );
        assert!(matches!(result, Err(DomainError::InvalidLeg(_))));
    }

    #[test]
    fn price_cap() {
        assert_eq!(MAX_PRICE, Decimal::from(1_000_000_000_000_000i64));

        let at_cap = Leg::new(loc("A"), loc("B"), TransportMode::Bus, MAX_PRICE, 5, true);
        assert!(at_cap.is_ok());

        let above = Leg::new(
            loc("A"),
            loc("B"),
            TransportMode::Bus,
            MAX_PRICE + Decimal::new(1, 2),
            5,
            true,
        );
        assert!(matches!(above, Err(DomainError::InvalidLeg(_))));

        let huge = Leg::new(
            loc("A"),
            loc("B"),
            TransportMode::Bus,
            Decimal::MAX / Decimal::from(2),
            5,
            true,
        );
        assert!(huge.is_err());
    }

    #[test]
    fn reject_zero_duration() {
        let result = Leg::new(loc("A"), loc("B"), TransportMode::Bus, Decimal::ONE, 0, true);
        assert!(matches!(result, Err(DomainError::InvalidLeg(_))));
    }

    #[test]
    fn distance() {
        let leg = Leg::new(loc("A"), loc("B"), TransportMode::Flight, Decimal::ONE, 60, true)
            .unwrap()
            .with_distance_km(400.0)
            .unwrap();
        assert_eq!(leg.distance_km(), Some(400.0));

        let base = Leg::new(loc("A"), loc("B"), TransportMode::Flight, Decimal::ONE, 60, true)
            .unwrap();
        assert!(base.clone().with_distance_km(-1.0).is_err());
        assert!(base.clone().with_distance_km(f64::NAN).is_err());
        assert!(base.with_distance_km(f64::INFINITY).is_err());
    }
}
