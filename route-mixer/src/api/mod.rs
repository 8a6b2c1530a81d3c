//! Wire types for an external HTTP layer.
//!
//! The engine has no server of its own. These DTOs fix the JSON schema a
//! front end speaks, using `source` / `destination` throughout, and
//! [`answer`] is the handler body such a layer wraps.

mod dto;

pub use dto::{ErrorResponse, ItineraryDto, LegDto, SearchQuery, SearchResponse, answer};
