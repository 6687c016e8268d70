//! The location-ping record model and its feed loader.
//!
//! The upstream feed is JSON lines: one object per ping with `User`,
//! `Latitude`, `Longitude`, and `Email` fields. A person usually appears
//! many times (one record per ping). The dataset is an immutable snapshot
//! for one resolution cycle; nothing here is persisted between cycles.

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::GeoPoint;

/// One location ping: who, where, and how to reach them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// The identity the ping belongs to.
    #[serde(rename = "User")]
    pub identity: String,
    /// Latitude in decimal degrees.
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    /// Longitude in decimal degrees.
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    /// Contact address for alerts.
    #[serde(rename = "Email")]
    pub address: String,
}

impl LocationRecord {
    /// The record's position.
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Read records from a JSON-lines feed, one object per line.
///
/// Blank lines are skipped. A malformed line fails the whole load with
/// [`Error::MalformedRecord`] naming the 1-based line number; there is no
/// partial dataset.
pub fn read_json_lines<R: BufRead>(reader: R) -> Result<Vec<LocationRecord>> {
    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::MalformedRecord {
            line: i + 1,
            source: serde_json::Error::io(e),
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let record =
            serde_json::from_str(&line).map_err(|e| Error::MalformedRecord {
                line: i + 1,
                source: e,
            })?;
        records.push(record);
    }
    Ok(records)
}

/// Project the records' coordinates, validating every one.
///
/// A single out-of-range coordinate fails the projection; clustering never
/// runs over a partially valid dataset.
pub fn points(records: &[LocationRecord]) -> Result<Vec<GeoPoint>> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let p = r.point();
            p.validate(i)?;
            Ok(p)
        })
        .collect()
}

/// Resolve identities to contact addresses, in dataset iteration order.
///
/// Every record whose identity is in `identities` contributes its address;
/// duplicates are left in, since the dispatcher deduplicates per
/// invocation.
pub fn addresses_for(records: &[LocationRecord], identities: &[String]) -> Vec<String> {
    records
        .iter()
        .filter(|r| identities.iter().any(|id| *id == r.identity))
        .map(|r| r.address.clone())
        .collect()
}
