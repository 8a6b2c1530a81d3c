//! Multi-modal itinerary search.
//!
//! Given a catalog of direct legs (bus, train, flight, rideshare, ferry)
//! between named locations, find the best ways to travel from one location
//! to another, mixing modes and transfers.
//!
//! - [`domain`]: validated value types (`Location`, `Leg`, `Itinerary`)
//! - [`catalog`]: the read-only leg index and its loaders
//! - [`planner`]: path enumeration, aggregation, ranking, the search service
//! - [`api`]: wire DTOs for an HTTP front end

pub mod api;
pub mod catalog;
pub mod domain;
pub mod planner;
