//! Contact resolution: from cluster labels to the set of exposed identities.
//!
//! Given one clustering run over a dataset snapshot, the contacts of an
//! index case are every identity sharing a (non-noise) group with any of
//! the index case's pings. The result preserves dataset iteration order and
//! never contains the index identity itself.
//!
//! There is no temporal scoping: two pings in the same place on different
//! days still land in the same group. The feed carries no timestamp, so
//! co-location is the only evidence available.

use std::collections::HashSet;

use tracing::debug;

use crate::cluster::{ClusterLabel, ProximityClustering};
use crate::dataset::{points, LocationRecord};
use crate::error::{Error, Result};

/// Identities sharing a group with any of the index identity's records.
///
/// `labels` must be parallel to `records` (one clustering run over this
/// exact dataset). Noise labels establish no contact. Returns
/// [`Error::IdentityNotFound`] when the index identity has no records at
/// all, so callers can distinguish "unknown identity" from an empty
/// contact set.
pub fn resolve_contacts(
    labels: &[ClusterLabel],
    records: &[LocationRecord],
    index_identity: &str,
) -> Result<Vec<String>> {
    let index_groups: HashSet<ClusterLabel> = labels
        .iter()
        .zip(records)
        .filter(|(_, r)| r.identity == index_identity)
        .map(|(l, _)| *l)
        .collect();

    if index_groups.is_empty() {
        return Err(Error::IdentityNotFound {
            identity: index_identity.to_string(),
        });
    }

    let mut contacts: Vec<String> = Vec::new();
    for (label, record) in labels.iter().zip(records) {
        if label.is_noise() || !index_groups.contains(label) {
            continue;
        }
        if record.identity == index_identity {
            continue;
        }
        if !contacts.iter().any(|c| *c == record.identity) {
            contacts.push(record.identity.clone());
        }
    }

    debug!(
        index_identity,
        groups = index_groups.len(),
        contacts = contacts.len(),
        "contacts resolved"
    );

    Ok(contacts)
}

/// Cluster the dataset and resolve the index identity's contacts in one call.
pub fn find_contacts<C: ProximityClustering>(
    records: &[LocationRecord],
    clusterer: &C,
    index_identity: &str,
) -> Result<Vec<String>> {
    let labels = clusterer.cluster(&points(records)?)?;
    resolve_contacts(&labels, records, index_identity)
}
