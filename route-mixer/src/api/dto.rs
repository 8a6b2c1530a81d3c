//! Data transfer objects for search requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Itinerary, Leg, TransportMode};
use crate::planner::{SearchError, SearchService};

/// Request to search for itineraries.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    /// Starting location label
    pub source: String,

    /// Target location label
    pub destination: String,
}

/// Response for itinerary search.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Itineraries, best first
    pub itineraries: Vec<ItineraryDto>,
}

impl SearchResponse {
    pub fn from_itineraries(itineraries: &[Itinerary]) -> Self {
        Self {
            itineraries: itineraries.iter().map(ItineraryDto::from).collect(),
        }
    }
}

/// An itinerary option.
#[derive(Debug, Serialize)]
pub struct ItineraryDto {
    /// Legs in travel order (empty for a same-place search)
    pub legs: Vec<LegDto>,

    /// Sum of leg prices
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,

    /// Sum of leg durations in minutes
    pub total_duration_min: u64,

    /// Number of changes between legs
    pub transfers: usize,

    /// Whether every leg is currently bookable
    pub all_legs_available: bool,

    /// Travelled distance, when every leg reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_distance_km: Option<f64>,
}

impl From<&Itinerary> for ItineraryDto {
    fn from(itinerary: &Itinerary) -> Self {
        Self {
            legs: itinerary.legs().iter().map(|leg| LegDto::from(&**leg)).collect(),
            total_price: itinerary.total_price(),
            total_duration_min: itinerary.total_duration_min(),
            transfers: itinerary.transfers(),
            all_legs_available: itinerary.all_legs_available(),
            total_distance_km: itinerary.total_distance_km(),
        }
    }
}

/// One leg of an itinerary.
#[derive(Debug, Serialize)]
pub struct LegDto {
    pub source: String,
    pub destination: String,
    pub mode: TransportMode,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub duration_min: u32,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl From<&Leg> for LegDto {
    fn from(leg: &Leg) -> Self {
        Self {
            source: leg.source().to_string(),
            destination: leg.destination().to_string(),
            mode: leg.mode(),
            price: leg.price(),
            duration_min: leg.duration_min(),
            available: leg.is_available(),
            distance_km: leg.distance_km(),
        }
    }
}

/// Error body returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,

    /// Whether retrying the same request may succeed
    pub retryable: bool,

    /// Whether the request itself was at fault
    #[serde(skip)]
    pub client_error: bool,
}

impl From<&SearchError> for ErrorResponse {
    fn from(err: &SearchError) -> Self {
        Self {
            error: err.to_string(),
            retryable: err.is_retryable(),
            client_error: err.is_client_error(),
        }
    }
}

impl From<SearchError> for ErrorResponse {
    fn from(err: SearchError) -> Self {
        Self::from(&err)
    }
}

/// Run a search for a decoded query and shape the outcome for the wire.
pub async fn answer(
    service: &SearchService,
    query: &SearchQuery,
) -> Result<SearchResponse, ErrorResponse> {
    let itineraries = service
        .search_async(&query.source, &query.destination)
        .await?;
    Ok(SearchResponse::from_itineraries(&itineraries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogBuilder, demo_catalog};
    use crate::planner::SearchConfig;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn demo_service() -> SearchService {
        SearchService::new(Arc::new(demo_catalog()), SearchConfig::default())
    }

    #[test]
    fn query_uses_canonical_names() {
        let query: SearchQuery =
            serde_json::from_value(json!({"source": "A", "destination": "C"})).unwrap();
        assert_eq!(query.source, "A");
        assert_eq!(query.destination, "C");

        // Abbreviated names are not accepted
        let result = serde_json::from_value::<SearchQuery>(json!({"src": "A", "dst": "C"}));
        assert!(result.is_err());
    }

    #[test]
    fn itinerary_serialization() {
        let catalog = CatalogBuilder::new()
            .leg("A", "B", TransportMode::Bus, Decimal::new(1005, 1), 60, true)
            .leg("B", "C", TransportMode::Train, 150, 90, false)
            .build();
        let svc = SearchService::new(Arc::new(catalog), SearchConfig::default());
        let results = svc.search("A", "C").unwrap();

        let body = serde_json::to_value(SearchResponse::from_itineraries(&results)).unwrap();

        assert_eq!(
            body,
            json!({
                "itineraries": [{
                    "legs": [
                        {"source": "A", "destination": "B", "mode": "bus",
                         "price": 100.5, "duration_min": 60, "available": true},
                        {"source": "B", "destination": "C", "mode": "train",
                         "price": 150.0, "duration_min": 90, "available": false}
                    ],
                    "total_price": 250.5,
                    "total_duration_min": 150,
                    "transfers": 1,
                    "all_legs_available": false
                }]
            })
        );
    }

    #[test]
    fn distances_included_when_known() {
        let svc = demo_service();
        let results = svc.search("A", "B").unwrap();
        let body = serde_json::to_value(ItineraryDto::from(&results[0])).unwrap();

        assert_eq!(body["total_distance_km"], json!(350.0));
        assert_eq!(body["legs"][0]["distance_km"], json!(350.0));
    }

    #[test]
    fn trivial_itinerary_serialization() {
        let svc = demo_service();
        let results = svc.search("C", "C").unwrap();
        let body = serde_json::to_value(ItineraryDto::from(&results[0])).unwrap();

        assert_eq!(body["legs"], json!([]));
        assert_eq!(body["total_price"], json!(0.0));
        assert_eq!(body["transfers"], json!(0));
        assert_eq!(body["all_legs_available"], Value::Bool(true));
    }

    #[test]
    fn error_response_from_search_error() {
        let body = ErrorResponse::from(SearchError::InvalidRequest("source: empty".into()));
        assert!(body.client_error);
        assert!(!body.retryable);

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({"error": "invalid search request: source: empty", "retryable": false})
        );

        let body = ErrorResponse::from(&SearchError::Timeout);
        assert!(body.retryable);
        assert!(!body.client_error);
    }

    #[tokio::test]
    async fn answer_round_trip() {
        let svc = demo_service();

        let query = SearchQuery {
            source: "A".into(),
            destination: "C".into(),
        };
        let response = answer(&svc, &query).await.unwrap();
        assert_eq!(response.itineraries.len(), 6);
        assert_eq!(response.itineraries[0].legs[0].destination, "B");

        let bad = SearchQuery {
            source: " ".into(),
            destination: "C".into(),
        };
        let err = answer(&svc, &bad).await.unwrap_err();
        assert!(err.client_error);
    }
}
