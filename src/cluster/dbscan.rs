//! DBSCAN over geographic coordinates.
//!
//! Classic density clustering (Ester et al., 1996) with the haversine
//! metric: two pings are neighbors when their great-circle separation is at
//! most `radius_km`. A ping with at least `min_group_size` pings (itself
//! included) inside the radius is a core point; clusters are the maximal
//! sets transitively reachable from core points, and everything else is
//! noise.
//!
//! Complexity is O(n²) from the brute-force region query. Contact-tracing
//! datasets are ping logs in the thousands, where this is comfortably fast
//! and avoids carrying a spatial index.

use tracing::debug;

use super::{ClusterLabel, ProximityClustering};
use crate::error::{Error, Result};
use crate::geo::{haversine_km, GeoPoint, CONTACT_RADIUS_KM};

/// Density clustering of geographic points by great-circle distance.
#[derive(Debug, Clone)]
pub struct GeoDbscan {
    /// Neighborhood radius in kilometers.
    radius_km: f64,
    /// Minimum points (self included) for core point classification.
    min_group_size: usize,
}

// Internal label encoding.
// - UNCLASSIFIED: never assigned yet
// - NOISE_LABEL: visited, but not density-reachable from any core point (may be promoted later)
const UNCLASSIFIED: i32 = -2;
const NOISE_LABEL: i32 = -1;

impl GeoDbscan {
    /// Create a new clusterer.
    ///
    /// # Arguments
    ///
    /// * `radius_km` - Maximum great-circle distance, in kilometers, for two
    ///   pings to count as neighbors.
    /// * `min_group_size` - Minimum number of pings (self included) to form
    ///   a dense group.
    pub fn new(radius_km: f64, min_group_size: usize) -> Self {
        Self {
            radius_km,
            min_group_size,
        }
    }

    /// Set the neighborhood radius in kilometers.
    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    /// Set the minimum group size for core classification.
    pub fn with_min_group_size(mut self, min_group_size: usize) -> Self {
        self.min_group_size = min_group_size;
        self
    }

    fn check_params(&self) -> Result<()> {
        if !(self.radius_km > 0.0 && self.radius_km.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "radius_km",
                message: "must be positive and finite",
            });
        }
        if self.min_group_size == 0 {
            return Err(Error::InvalidParameter {
                name: "min_group_size",
                message: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Find all neighbors within the radius.
    fn region_query(&self, points: &[GeoPoint], point_idx: usize) -> Vec<usize> {
        let point = points[point_idx];
        points
            .iter()
            .enumerate()
            .filter(|(idx, other)| {
                *idx != point_idx && haversine_km(point, **other) <= self.radius_km
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Expand a cluster from a core point.
    fn expand_cluster(
        &self,
        points: &[GeoPoint],
        point_idx: usize,
        neighbors: &[usize],
        labels: &mut [i32],
        cluster_id: i32,
        visited: &mut [bool],
    ) {
        labels[point_idx] = cluster_id;

        // Use a queue for iterative expansion (avoid deep recursion)
        let mut to_process: Vec<usize> = neighbors.to_vec();

        while let Some(neighbor_idx) = to_process.pop() {
            // DBSCAN nuance:
            // - A point previously labeled NOISE can later become a border point.
            // - We therefore assign labels *before* checking `visited` so that
            //   previously-visited noise points can still be promoted.
            if labels[neighbor_idx] == UNCLASSIFIED || labels[neighbor_idx] == NOISE_LABEL {
                labels[neighbor_idx] = cluster_id;
            }

            if visited[neighbor_idx] {
                continue;
            }
            visited[neighbor_idx] = true;

            let neighbor_neighbors = self.region_query(points, neighbor_idx);

            // If this neighbor is also a core point, expand from it.
            // The group-size minimum includes the point itself.
            if neighbor_neighbors.len() + 1 >= self.min_group_size {
                for nn in neighbor_neighbors {
                    if !visited[nn] {
                        to_process.push(nn);
                    }
                }
            }
        }
    }
}

impl Default for GeoDbscan {
    /// Reference deployment parameters: a 6 ft contact radius and groups of
    /// at least two pings.
    fn default() -> Self {
        Self::new(CONTACT_RADIUS_KM, 2)
    }
}

impl ProximityClustering for GeoDbscan {
    fn cluster(&self, points: &[GeoPoint]) -> Result<Vec<ClusterLabel>> {
        self.check_params()?;

        let n = points.len();
        if n == 0 {
            return Ok(Vec::new());
        }

        for (i, p) in points.iter().enumerate() {
            p.validate(i)?;
        }

        // Initialize: all points unclassified.
        let mut labels = vec![UNCLASSIFIED; n];
        let mut visited = vec![false; n];
        let mut cluster_id: i32 = 0;

        for point_idx in 0..n {
            if visited[point_idx] {
                continue;
            }
            visited[point_idx] = true;

            let neighbors = self.region_query(points, point_idx);

            // Not enough neighbors: mark as noise (might be border later).
            if neighbors.len() + 1 < self.min_group_size {
                labels[point_idx] = NOISE_LABEL;
                continue;
            }

            // Start a new cluster.
            self.expand_cluster(
                points,
                point_idx,
                &neighbors,
                &mut labels,
                cluster_id,
                &mut visited,
            );
            cluster_id += 1;
        }

        debug!(
            points = n,
            groups = cluster_id,
            noise = labels.iter().filter(|&&l| l == NOISE_LABEL).count(),
            "density clustering complete"
        );

        Ok(labels
            .into_iter()
            .map(|l| {
                if l >= 0 {
                    ClusterLabel::Group(l as u32)
                } else {
                    ClusterLabel::Noise
                }
            })
            .collect())
    }
}
