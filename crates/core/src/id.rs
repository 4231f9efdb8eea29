//! Unique identifiers for deskpulse entities.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for an ingested record set.
///
/// Every upload gets a fresh id, so log lines of two consecutive uploads in
/// the same session can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetId(Ulid);

impl DatasetId {
    /// Generate a new DatasetId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for DatasetId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DatasetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DatasetId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}
