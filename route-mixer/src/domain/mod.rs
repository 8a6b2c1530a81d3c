//! Domain types for the itinerary engine.
//!
//! This module contains the validated value types the engine works with.
//! All types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod error;
mod itinerary;
mod leg;
mod location;
mod mode;
mod site;

pub use error::DomainError;
pub use itinerary::Itinerary;
pub use leg::{Leg, MAX_PRICE};
pub use location::{InvalidLocation, Location};
pub use mode::{InvalidMode, TransportMode};
pub use site::Site;
