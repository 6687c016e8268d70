//! Proximity contact tracing over geolocation pings.
//!
//! `cotrace` turns a snapshot of location records into alerts: pings are
//! grouped by great-circle proximity ([`GeoDbscan`]), the distinct contacts
//! of an index case are resolved from the groups ([`find_contacts`]), and
//! one deduplicated alert per recipient is pushed through a caller-supplied
//! messaging channel ([`dispatch_alerts`]).
//!
//! Presentation, feed transport, and mail transport stay outside the crate;
//! it consumes a record slice and a [`MessageChannel`] and hands back plain
//! data the caller can render, log, or test against.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod contacts;
pub mod dataset;
pub mod error;
pub mod geo;
pub mod notify;

pub use cluster::{ClusterLabel, GeoDbscan, ProximityClustering};
pub use contacts::{find_contacts, resolve_contacts};
pub use dataset::{addresses_for, read_json_lines, LocationRecord};
pub use error::{Error, Result};
pub use geo::{haversine_km, GeoPoint, CONTACT_RADIUS_KM};
pub use notify::{
    dispatch_alerts, AlertMessage, DispatchOutcome, DispatchResult, MessageChannel, SendError,
};
