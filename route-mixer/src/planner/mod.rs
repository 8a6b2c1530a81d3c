//! Itinerary planner: enumerate, aggregate, rank.
//!
//! This module answers "what are the best ways to get from here to there
//! with the legs we know about?". The enumerator walks the catalog for
//! every simple path within the leg bound, the aggregator turns each path
//! into an `Itinerary` with exact totals, and the ranker orders and
//! truncates the candidates.

mod aggregate;
mod config;
mod enumerate;
mod rank;
mod search;


pub use aggregate::{aggregate, aggregate_checked};
pub use config::SearchConfig;
pub use enumerate::PathEnumerator;
pub use rank::{RankPolicy, ScoreWeights, compare_itineraries, rank_itineraries};
pub use search::{SearchError, SearchRequest, SearchResult, SearchService};
