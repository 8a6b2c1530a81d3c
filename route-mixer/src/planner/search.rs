//! The search façade: validate, enumerate, aggregate, rank.
//!
//! `SearchService` owns a shared, read-only catalog and answers
//! point-to-point queries. Searches keep no state between calls, so one
//! service can serve any number of concurrent callers.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tracing::debug;

use crate::catalog::Catalog;
use crate::domain::{Itinerary, Leg, Location};

use super::aggregate::aggregate;
use super::config::SearchConfig;
use super::enumerate::PathEnumerator;
use super::rank::rank_itineraries;

/// Error from itinerary search.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// Invalid search request
    #[error("invalid search request: {0}")]
    InvalidRequest(String),

    /// Location the catalog has never heard of
    #[error("unknown location: {0}")]
    UnknownLocation(Location),

    /// Search ran past its time budget
    #[error("search timed out")]
    Timeout,

    /// A background search task panicked or was cancelled
    #[error("search worker failed: {0}")]
    WorkerFailed(String),
}

impl SearchError {
    /// Returns true if the caller sent something wrong.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_) | Self::UnknownLocation(_))
    }

    /// Returns true if the same request may succeed later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout | Self::WorkerFailed(_))
    }
}

/// Request for itinerary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub source: Location,
    pub destination: Location,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(source: Location, destination: Location) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Parse a request from raw labels.
    ///
    /// Labels are trimmed; an empty or malformed label is an invalid
    /// request.
    pub fn parse(source: &str, destination: &str) -> Result<Self, SearchError> {
        let source = Location::parse(source)
            .map_err(|e| SearchError::InvalidRequest(format!("source: {e}")))?;
        let destination = Location::parse(destination)
            .map_err(|e| SearchError::InvalidRequest(format!("destination: {e}")))?;
        Ok(Self::new(source, destination))
    }
}

/// Result of itinerary search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Found itineraries, ranked best-first and truncated.
    pub itineraries: Vec<Itinerary>,

    /// Number of candidate paths found before ranking.
    pub candidates_found: usize,

    /// Number of legs examined during enumeration.
    pub steps: usize,
}

/// Answers itinerary queries against a shared catalog.
#[derive(Debug, Clone)]
pub struct SearchService {
    catalog: Arc<Catalog>,
    config: Arc<SearchConfig>,
}

impl SearchService {
    /// Create a new service over `catalog`.
    pub fn new(catalog: Arc<Catalog>, config: SearchConfig) -> Self {
        Self {
            catalog,
            config: Arc::new(config),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Check that a location label is valid and known to the catalog.
    ///
    /// `search` itself treats unknown locations as reachable-from-nowhere
    /// and returns an empty list; this check is for callers that want to
    /// reject them up front.
    pub fn knows(&self, location: &str) -> Result<(), SearchError> {
        let location = Location::parse(location)
            .map_err(|e| SearchError::InvalidRequest(e.to_string()))?;
        self.catalog
            .require(&location)
            .map_err(|_| SearchError::UnknownLocation(location))
    }

    /// Find the best itineraries from `source` to `destination`.
    ///
    /// Returns at most `max_results` itineraries, best first. An empty list
    /// means there is no route within `max_legs`.
    pub fn search(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<Vec<Itinerary>, SearchError> {
        let request = SearchRequest::parse(source, destination)?;
        let deadline = Instant::now() + self.config.timeout();
        Ok(self.plan(&request, Some(deadline))?.itineraries)
    }

    /// Run a search with an explicit deadline and report search statistics.
    pub fn plan(
        &self,
        request: &SearchRequest,
        deadline: Option<Instant>,
    ) -> Result<SearchResult, SearchError> {
        check_deadline(deadline)?;

        let mut enumerator = PathEnumerator::new(
            &self.catalog,
            &request.source,
            &request.destination,
            &self.config,
        );
        if let Some(deadline) = deadline {
            enumerator = enumerator.with_deadline(deadline);
        }

        let candidates: Vec<Itinerary> = enumerator.by_ref().map(aggregate).collect();
        if enumerator.timed_out() {
            debug!(
                source = %request.source,
                destination = %request.destination,
                steps = enumerator.steps(),
                "search timed out"
            );
            return Err(SearchError::Timeout);
        }

        let candidates_found = candidates.len();
        let itineraries =
            rank_itineraries(candidates, self.config.max_results, &self.config.rank_policy);

        debug!(
            source = %request.source,
            destination = %request.destination,
            candidates = candidates_found,
            returned = itineraries.len(),
            steps = enumerator.steps(),
            "search complete"
        );

        Ok(SearchResult {
            itineraries,
            candidates_found,
            steps: enumerator.steps(),
        })
    }

    /// Asynchronous variant of [`Self::search`].
    ///
    /// Each leg leaving the source is explored on the blocking pool. Branch
    /// results are merged in leg order before ranking, so the output is the
    /// same as the synchronous search. Must be called within a Tokio
    /// runtime.
    pub async fn search_async(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<Vec<Itinerary>, SearchError> {
        let request = SearchRequest::parse(source, destination)?;
        let deadline = Instant::now() + self.config.timeout();

        if request.source == request.destination {
            return Ok(self.plan(&request, Some(deadline))?.itineraries);
        }
        check_deadline(Some(deadline))?;

        let first_hops: Vec<Arc<Leg>> = self.catalog.legs_from(&request.source).to_vec();
        debug!(
            source = %request.source,
            destination = %request.destination,
            branches = first_hops.len(),
            "spawning search branches"
        );

        let branches = first_hops.into_iter().map(|first| {
            let catalog = Arc::clone(&self.catalog);
            let config = Arc::clone(&self.config);
            let destination = request.destination.clone();

            tokio::task::spawn_blocking(move || {
                let mut branch = PathEnumerator::branch(&catalog, first, &destination, &config)
                    .with_deadline(deadline);
                let found: Vec<Itinerary> = branch.by_ref().map(aggregate).collect();
                if branch.timed_out() {
                    Err(SearchError::Timeout)
                } else {
                    Ok(found)
                }
            })
        });

        let mut candidates = Vec::new();
        for joined in join_all(branches).await {
            let found = joined.map_err(|e| SearchError::WorkerFailed(e.to_string()))??;
            candidates.extend(found);
        }

        debug!(
            source = %request.source,
            destination = %request.destination,
            candidates = candidates.len(),
            "branches merged"
        );

        Ok(rank_itineraries(
            candidates,
            self.config.max_results,
            &self.config.rank_policy,
        ))
    }
}

fn check_deadline(deadline: Option<Instant>) -> Result<(), SearchError> {
    match deadline {
        Some(deadline) if Instant::now() >= deadline => Err(SearchError::Timeout),
        _ => Ok(()),
    }
}
