//! Location metadata: display names and coordinates.

use super::{DomainError, Location};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A named place with coordinates.
///
/// Sites are optional catalog metadata. When both ends of a search have a
/// site, the enumerator can compare path distance against the direct
/// distance and prune long detours.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    location: Location,
    name: String,
    lat: f64,
    lon: f64,
}

impl Site {
    /// Create a site, checking the coordinates are in range.
    pub fn new(location: Location, name: String, lat: f64, lon: f64) -> Result<Self, DomainError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::InvalidSite(location, "latitude out of range"));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::InvalidSite(location, "longitude out of range"));
        }
        Ok(Self {
            location,
            name,
            lat,
            lon,
        })
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Approximate ground distance to another site in kilometres.
    ///
    /// Uses an equirectangular projection, which is accurate enough for
    /// comparing regional detours.
    pub fn distance_km(&self, other: &Site) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let lon1 = self.lon.to_radians();
        let lon2 = other.lon.to_radians();

        let x = (lon2 - lon1) * ((lat1 + lat2) / 2.0).cos();
        let y = lat2 - lat1;
        (x * x + y * y).sqrt() * EARTH_RADIUS_KM
    }
}
