//! Location identifier type.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid location label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location: {reason}")]
pub struct InvalidLocation {
    reason: &'static str,
}

/// An opaque label naming a place.
///
/// Locations have no internal structure; two locations are equal when their
/// labels are equal. Surrounding whitespace is trimmed at parse time and an
/// empty label is rejected, so any `Location` value is a usable graph node.
///
/// Cloning is cheap (the label is shared).
///
/// # Examples
///
/// ```
/// use route_mixer::domain::Location;
///
/// let hyd = Location::parse("HYD").unwrap();
/// assert_eq!(hyd.as_str(), "HYD");
///
/// // Surrounding whitespace is dropped
/// assert_eq!(Location::parse("  HYD ").unwrap(), hyd);
///
/// // Blank labels are rejected
/// assert!(Location::parse("").is_err());
/// assert!(Location::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location(Arc<str>);

impl Location {
    /// Parse a location label.
    pub fn parse(s: &str) -> Result<Self, InvalidLocation> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidLocation {
                reason: "label must not be empty",
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(InvalidLocation {
                reason: "label must not contain control characters",
            });
        }

        Ok(Location(Arc::from(trimmed)))
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Location {
    type Error = InvalidLocation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Location::parse(&value)
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.0.to_string()
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location({})", self.as_str())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
