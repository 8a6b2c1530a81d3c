//! Transport mode type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown transport mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transport mode: {0:?}")]
pub struct InvalidMode(String);

/// The kind of vehicle serving a leg.
///
/// Parsing is case-insensitive; the canonical rendering is lowercase.
///
/// # Examples
///
/// ```
/// use route_mixer::domain::TransportMode;
///
/// let mode: TransportMode = "TRAIN".parse().unwrap();
/// assert_eq!(mode, TransportMode::Train);
/// assert_eq!(mode.as_str(), "train");
///
/// assert!("hovercraft".parse::<TransportMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Bus,
    Train,
    Flight,
    Rideshare,
    Ferry,
}

impl TransportMode {
    /// All modes, in declaration order.
    pub const ALL: [TransportMode; 5] = [
        TransportMode::Bus,
        TransportMode::Train,
        TransportMode::Flight,
        TransportMode::Rideshare,
        TransportMode::Ferry,
    ];

    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Bus => "bus",
            TransportMode::Train => "train",
            TransportMode::Flight => "flight",
            TransportMode::Rideshare => "rideshare",
            TransportMode::Ferry => "ferry",
        }
    }
}

impl FromStr for TransportMode {
    type Err = InvalidMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        TransportMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == lowered)
            .ok_or_else(|| InvalidMode(s.to_string()))
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_any_case() {
        assert_eq!("bus".parse::<TransportMode>().unwrap(), TransportMode::Bus);
        assert_eq!("BUS".parse::<TransportMode>().unwrap(), TransportMode::Bus);
        assert_eq!("Flight".parse::<TransportMode>().unwrap(), TransportMode::Flight);
        assert_eq!(" ferry ".parse::<TransportMode>().unwrap(), TransportMode::Ferry);
    }

    #[test]
    fn reject_unknown() {
        let err = "zeppelin".parse::<TransportMode>().unwrap_err();
        assert_eq!(err.to_string(), "unknown transport mode: \"zeppelin\"");
        assert!("".parse::<TransportMode>().is_err());
    }

    #[test]
    fn display_roundtrip() {
        for mode in TransportMode::ALL {
            assert_eq!(mode.to_string().parse::<TransportMode>().unwrap(), mode);
        }
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&TransportMode::Rideshare).unwrap(),
            "\"rideshare\""
        );
        let mode: TransportMode = serde_json::from_str("\"train\"").unwrap();
        assert_eq!(mode, TransportMode::Train);
    }
}
