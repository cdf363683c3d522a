use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::SampleId;
use super::location::Location;
use super::matrix::Measurement;

/// One persisted commute measurement for a single (origin, destination) pair.
///
/// The measurement fields are flattened into the record, next to the
/// bookkeeping fields the collector attaches. Those four names are never
/// taken from the measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommuteSample {
    /// `origin coordinates -> destination coordinates`
    pub key: String,
    /// `origin name -> destination name`
    pub label: String,
    pub id: SampleId,
    /// RFC 3339 string on the wire.
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub measurement: Measurement,
}

/// Field names the record owns. A measurement carrying any of them would
/// serialize the name twice.
const RESERVED_FIELDS: [&str; 4] = ["key", "label", "id", "timestamp"];

/// An ordered (origin, destination) pair planned for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommutePair {
    pub origin: Location,
    pub destination: Location,
}

impl CommutePair {
    pub fn new(origin: Location, destination: Location) -> Self {
        Self {
            origin,
            destination,
        }
    }

    pub fn key(&self) -> String {
        format!("{}->{}", self.origin.coordinates, self.destination.coordinates)
    }

    pub fn label(&self) -> String {
        format!("{}->{}", self.origin.name, self.destination.name)
    }

    /// Builds the record for this pair from a validated measurement.
    ///
    /// `key`, `label`, `id`, `timestamp` in the measurement are dropped; the
    /// values attached here win.
    pub fn into_sample(
        self,
        id: SampleId,
        timestamp: DateTime<Utc>,
        mut measurement: Measurement,
    ) -> CommuteSample {
        for name in RESERVED_FIELDS {
            measurement.remove(name);
        }
        CommuteSample {
            key: self.key(),
            label: self.label(),
            id,
            timestamp,
            measurement,
        }
    }
}
