//! The leg catalog and its loaders.
//!
//! The catalog stores every known direct leg and answers adjacency queries
//! for the path enumerator. It is loaded once at startup from a `LegSource`
//! and treated as read-only afterwards.

mod demo;
mod error;
mod source;
mod store;

pub use demo::demo_catalog;
pub use error::CatalogError;
pub use source::{CatalogFile, LegSource, RawLeg, RawSite};
pub use store::{Catalog, CatalogBuilder};
