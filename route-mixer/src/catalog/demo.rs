//! A small built-in network for demos and tests.

use crate::domain::TransportMode::{Bus, Flight, Train};

use super::store::{Catalog, CatalogBuilder};

/// Create the five-hub demo network.
///
/// Hubs A..E carry coordinates around Hyderabad, Visakhapatnam,
/// Vijayawada and Mumbai. Prices are in rupees. The direct A→C bus is
/// unavailable, which is the case mixing modes is meant to solve.
pub fn demo_catalog() -> Catalog {
    CatalogBuilder::new()
        .site("A", "Alpha", 17.3850, 78.4867)
        .site("B", "Beta", 17.6868, 83.2185)
        .site("C", "Gamma", 17.4474, 78.3762)
        .site("D", "Delta", 16.5062, 80.6480)
        .site("E", "Epsilon", 19.07598, 72.87766)
        // (source, destination, mode, price, minutes, available, km)
        .leg_with_distance("A", "B", Train, 500, 240, true, 350.0)
        .leg_with_distance("B", "A", Train, 500, 240, true, 350.0)
        .leg_with_distance("A", "C", Bus, 150, 60, false, 40.0)
        .leg_with_distance("C", "A", Bus, 150, 60, false, 40.0)
        .leg_with_distance("B", "C", Bus, 300, 180, true, 200.0)
        .leg_with_distance("C", "B", Bus, 300, 180, true, 200.0)
        .leg_with_distance("A", "D", Flight, 2000, 60, true, 400.0)
        .leg_with_distance("D", "C", Train, 600, 200, true, 300.0)
        .leg_with_distance("A", "E", Train, 800, 480, true, 700.0)
        .leg_with_distance("E", "C", Flight, 2500, 90, false, 900.0)
        .leg_with_distance("B", "D", Bus, 350, 180, true, 220.0)
        .leg_with_distance("D", "B", Bus, 350, 180, true, 220.0)
        .build()
}
