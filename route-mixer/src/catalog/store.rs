//! The leg catalog: an adjacency index over all known legs.
//!
//! The catalog is built once at startup and then shared read-only (behind an
//! `Arc`) by every concurrent search. Legs leaving a location are kept in
//! insertion order so that traversal is reproducible.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::warn;

use crate::domain::{Leg, Location, Site, TransportMode};

use super::error::CatalogError;

/// All known direct legs, indexed by source location.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Legs keyed by their source, in insertion order.
    by_source: HashMap<Location, Vec<Arc<Leg>>>,

    /// Optional metadata for locations.
    sites: HashMap<Location, Site>,

    /// Every location that is a site or a leg endpoint.
    known: HashSet<Location>,

    leg_count: usize,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a leg.
    ///
    /// Returns `false` (and stores nothing) if an identical leg is already
    /// present, so a query never sees the same leg twice.
    pub(crate) fn insert_leg(&mut self, leg: Leg) -> bool {
        let bucket = self.by_source.entry(leg.source().clone()).or_default();
        if bucket.iter().any(|existing| **existing == leg) {
            return false;
        }

        self.known.insert(leg.source().clone());
        self.known.insert(leg.destination().clone());
        bucket.push(Arc::new(leg));
        self.leg_count += 1;
        true
    }

    /// Add or replace a site.
    pub(crate) fn insert_site(&mut self, site: Site) {
        self.known.insert(site.location().clone());
        self.sites.insert(site.location().clone(), site);
    }

    /// Get all legs departing from a location.
    ///
    /// Unknown locations yield an empty slice: an unreachable destination is
    /// a valid search outcome, not a fault.
    pub fn legs_from(&self, location: &Location) -> &[Arc<Leg>] {
        self.by_source
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Check if the catalog has ever heard of a location.
    pub fn contains(&self, location: &Location) -> bool {
        self.known.contains(location)
    }

    /// Existence check for callers that want unknown locations to be errors.
    pub fn require(&self, location: &Location) -> Result<(), CatalogError> {
        if self.contains(location) {
            Ok(())
        } else {
            Err(CatalogError::UnknownLocation(location.clone()))
        }
    }

    /// Get the site metadata for a location, if any.
    pub fn site(&self, location: &Location) -> Option<&Site> {
        self.sites.get(location)
    }

    /// Straight-line distance between two locations, if both have sites.
    pub fn direct_distance_km(&self, from: &Location, to: &Location) -> Option<f64> {
        let from = self.sites.get(from)?;
        let to = self.sites.get(to)?;
        Some(from.distance_km(to))
    }

    /// Returns all known locations, sorted.
    pub fn locations(&self) -> Vec<&Location> {
        let mut locations: Vec<&Location> = self.known.iter().collect();
        locations.sort();
        locations
    }

    /// Iterate over every leg, grouped by source in sorted order.
    pub fn legs(&self) -> impl Iterator<Item = &Arc<Leg>> {
        let mut sources: Vec<&Location> = self.by_source.keys().collect();
        sources.sort();
        sources
            .into_iter()
            .flat_map(move |source| self.legs_from(source).iter())
    }

    /// Returns the number of legs.
    pub fn len(&self) -> usize {
        self.leg_count
    }

    /// Returns true if there are no legs.
    pub fn is_empty(&self) -> bool {
        self.leg_count == 0
    }
}

/// Validate raw leg fields into a `Leg`, describing the first problem found.
pub(crate) fn make_leg(
    source: &str,
    destination: &str,
    mode: TransportMode,
    price: Decimal,
    duration_min: u32,
    available: bool,
    distance_km: Option<f64>,
) -> Result<Leg, String> {
    let from = Location::parse(source).map_err(|e| e.to_string())?;
    let to = Location::parse(destination).map_err(|e| e.to_string())?;
    let leg =
        Leg::new(from, to, mode, price, duration_min, available).map_err(|e| e.to_string())?;
    match distance_km {
        Some(km) => leg.with_distance_km(km).map_err(|e| e.to_string()),
        None => Ok(leg),
    }
}

/// Builder for creating catalogs in code.
///
/// Provides a fluent API for adding sites and legs. Entries that fail
/// validation are logged and skipped.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    inner: Catalog,
}

impl CatalogBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a site with coordinates.
    pub fn site(mut self, code: &str, name: &str, lat: f64, lon: f64) -> Self {
        match Location::parse(code)
            .map_err(|e| e.to_string())
            .and_then(|loc| Site::new(loc, name.to_string(), lat, lon).map_err(|e| e.to_string()))
        {
            Ok(site) => self.inner.insert_site(site),
            Err(reason) => warn!(code, %reason, "skipping site"),
        }
        self
    }

    /// Add a leg.
    pub fn leg(
        self,
        source: &str,
        destination: &str,
        mode: TransportMode,
        price: impl Into<Decimal>,
        duration_min: u32,
        available: bool,
    ) -> Self {
        self.push_leg(source, destination, mode, price.into(), duration_min, available, None)
    }

    /// Add a leg with a known travelled distance.
    #[allow(clippy::too_many_arguments)]
    pub fn leg_with_distance(
        self,
        source: &str,
        destination: &str,
        mode: TransportMode,
        price: impl Into<Decimal>,
        duration_min: u32,
        available: bool,
        distance_km: f64,
    ) -> Self {
        self.push_leg(
            source,
            destination,
            mode,
            price.into(),
            duration_min,
            available,
            Some(distance_km),
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn push_leg(
        mut self,
        source: &str,
        destination: &str,
        mode: TransportMode,
        price: Decimal,
        duration_min: u32,
        available: bool,
        distance_km: Option<f64>,
    ) -> Self {
        let built = make_leg(
            source,
            destination,
            mode,
            price,
            duration_min,
            available,
            distance_km,
        );

        match built {
            Ok(leg) => {
                self.inner.insert_leg(leg);
            }
            Err(reason) => warn!(source, destination, %reason, "skipping leg"),
        }
        self
    }

    /// Build the catalog.
    pub fn build(self) -> Catalog {
        self.inner
    }
}
