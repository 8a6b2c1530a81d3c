//! Loading the catalog from an external data source.
//!
//! The engine does not care where legs come from (a file, a database, a
//! provider feed). A `LegSource` hands over raw, unvalidated records once at
//! startup; `Catalog::from_source` validates them and drops whatever is
//! malformed, so searches never have to defend against bad data.

use std::collections::HashSet;
use std::convert::Infallible;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::{InvalidMode, Leg, Location, Site, TransportMode};
use crate::planner::SearchConfig;

use super::error::CatalogError;
use super::store::{Catalog, make_leg};

/// An unvalidated site record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSite {
    pub location: String,
    #[serde(default)]
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// An unvalidated leg record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLeg {
    pub source: String,
    pub destination: String,
    pub mode: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub duration_min: i64,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub distance_km: Option<f64>,
}

fn default_available() -> bool {
    true
}

/// A provider of raw catalog records.
///
/// Implementations are called once, at startup.
pub trait LegSource {
    type Error;

    /// Location metadata. Sources without coordinates return nothing.
    fn sites(&self) -> Result<Vec<RawSite>, Self::Error> {
        Ok(Vec::new())
    }

    /// Every known direct leg.
    fn legs(&self) -> Result<Vec<RawLeg>, Self::Error>;
}

impl Catalog {
    /// Build a catalog from a source, dropping malformed records.
    ///
    /// A leg is dropped if any field fails validation, if its mode is
    /// unknown, or (when the source declares sites) if either endpoint is
    /// not a declared site.
    pub fn from_source<S: LegSource>(source: &S) -> Result<Self, S::Error> {
        let raw_sites = source.sites()?;
        let raw_legs = source.legs()?;

        let mut catalog = Catalog::new();
        let mut declared: HashSet<Location> = HashSet::new();

        for raw in raw_sites {
            match site_from_raw(&raw) {
                Ok(site) => {
                    declared.insert(site.location().clone());
                    catalog.insert_site(site);
                }
                Err(reason) => warn!(location = %raw.location, %reason, "dropping site"),
            }
        }

        let check_refs = !declared.is_empty();
        let mut dropped = 0usize;
        let mut duplicates = 0usize;

        for raw in raw_legs {
            let leg = match leg_from_raw(&raw) {
                Ok(leg) => leg,
                Err(reason) => {
                    warn!(
                        source = %raw.source,
                        destination = %raw.destination,
                        %reason,
                        "dropping leg"
                    );
                    dropped += 1;
                    continue;
                }
            };

            if check_refs {
                let dangling = [leg.source(), leg.destination()]
                    .into_iter()
                    .find(|loc| !declared.contains(*loc))
                    .cloned();
                if let Some(loc) = dangling {
                    warn!(
                        source = %leg.source(),
                        destination = %leg.destination(),
                        undeclared = %loc,
                        "dropping leg with dangling reference"
                    );
                    dropped += 1;
                    continue;
                }
            }

            if !catalog.insert_leg(leg) {
                duplicates += 1;
            }
        }

        info!(
            legs = catalog.len(),
            sites = declared.len(),
            dropped,
            duplicates,
            "catalog loaded"
        );

        Ok(catalog)
    }
}

fn site_from_raw(raw: &RawSite) -> Result<Site, String> {
    let location = Location::parse(&raw.location).map_err(|e| e.to_string())?;
    let name = raw
        .name
        .clone()
        .unwrap_or_else(|| location.as_str().to_string());
    Site::new(location, name, raw.lat, raw.lon).map_err(|e| e.to_string())
}

fn leg_from_raw(raw: &RawLeg) -> Result<Leg, String> {
    let mode: TransportMode = raw.mode.parse().map_err(|e: InvalidMode| e.to_string())?;
    let duration_min = u32::try_from(raw.duration_min)
        .map_err(|_| format!("duration {} out of range", raw.duration_min))?;
    make_leg(
        &raw.source,
        &raw.destination,
        mode,
        raw.price,
        duration_min,
        raw.available,
        raw.distance_km,
    )
}

/// A JSON catalog document.
///
/// ```json
/// {
///   "sites": [{ "location": "A", "name": "Alpha", "lat": 17.38, "lon": 78.48 }],
///   "legs": [{ "source": "A", "destination": "B", "mode": "train",
///              "price": 500, "duration_min": 240, "available": true }],
///   "config": { "max_legs": 3 }
/// }
/// ```
///
/// `sites` and `config` are optional. Records are kept as raw JSON until
/// the catalog is built, so one record with a wrongly typed or missing
/// field is dropped on its own instead of failing the whole document.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub sites: Vec<Value>,
    pub legs: Vec<Value>,
    #[serde(default)]
    pub config: SearchConfig,
}

impl CatalogFile {
    /// Parse a catalog document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a catalog document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read and parse a catalog document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}

impl LegSource for CatalogFile {
    type Error = Infallible;

    fn sites(&self) -> Result<Vec<RawSite>, Self::Error> {
        Ok(decode_records("site", &self.sites))
    }

    fn legs(&self) -> Result<Vec<RawLeg>, Self::Error> {
        Ok(decode_records("leg", &self.legs))
    }
}

/// Decode each record on its own, dropping the ones that do not fit `T`.
fn decode_records<T: DeserializeOwned>(kind: &'static str, records: &[Value]) -> Vec<T> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match T::deserialize(record) {
            Ok(decoded) => Some(decoded),
            Err(error) => {
                warn!(kind, index, %error, "dropping malformed record");
                None
            }
        })
        .collect()
}
