//! Run metrics, computed on demand from the accumulated tallies.
//!
//! Every metric returns 0 instead of dividing by an empty denominator.

use std::collections::BTreeSet;

use wm_core::{EdgeKey, VertexId};

use crate::Engine;

/// The three components of the path metric.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathMetric {
    /// Share of the true route's length also covered by the reconstruction.
    pub matching: f64,
    /// `1 / (1 + d)`, `d` the distance between the two routes' end vertices.
    pub target_diff: f64,
    /// `1 / (1 + |true length − reconstructed length|)`.
    pub length_diff: f64,
}

impl PathMetric {
    /// `(matching + 2 · length_diff · target_diff) / 3`.
    pub fn combined(&self) -> f64 {
        (self.matching + 2.0 * self.length_diff * self.target_diff) / 3.0
    }
}

impl Engine {
    /// `1 − active detector-ticks / (ticks · detectors)`: 1 when nothing was
    /// ever switched on, 0 when everything was on all the time.
    pub fn metric_activity(&self) -> f64 {
        let capacity = self.tick.0 as f64 * self.detectors.len() as f64;
        if capacity == 0.0 {
            return 0.0;
        }
        1.0 - self.active_ticks as f64 / capacity
    }

    /// Detectors that ever detected over detectors that ever could have.
    pub fn metric_detection(&self) -> f64 {
        if self.possible.is_empty() {
            return 0.0;
        }
        self.detected.len() as f64 / self.possible.len() as f64
    }

    /// Latest detection tick over latest possible-detection tick.
    pub fn metric_last_tracking(&self) -> f64 {
        if self.latest_possible.0 == 0 {
            return 0.0;
        }
        self.latest_detection.0 as f64 / self.latest_possible.0 as f64
    }

    pub fn metric_path(&self) -> f64 {
        self.metric_path_components().combined()
    }

    /// Compare the true route with the route reconstructed from detection
    /// points.  All zero when either route has no length.
    pub fn metric_path_components(&self) -> PathMetric {
        let reconstructed = self.reconstructed_path();

        let true_edges = edge_set(&self.true_path.vertices);
        let rec_edges = edge_set(&reconstructed);
        let length = |e: &EdgeKey| self.graph.edge_length(*e).unwrap_or(0.0);

        let true_len: f64 = true_edges.iter().map(length).sum();
        let rec_len: f64 = rec_edges.iter().map(length).sum();
        let shared: f64 = rec_edges.intersection(&true_edges).map(length).sum();

        let (Some(&true_end), Some(&rec_end)) = (self.true_path.vertices.last(), reconstructed.last())
        else {
            return PathMetric::default();
        };
        if true_len == 0.0 || rec_len == 0.0 {
            return PathMetric::default();
        }

        let target_gap = self.graph.position(true_end).distance(self.graph.position(rec_end));
        PathMetric {
            matching:    shared / true_len,
            target_diff: 1.0 / (1.0 + target_gap),
            length_diff: 1.0 / (1.0 + (true_len - rec_len).abs()),
        }
    }

    /// Approximate route chained from consecutive detection points.
    ///
    /// Each pair of detection edges contributes the shortest path between
    /// their `lo` endpoints, minus its first vertex.  The route opens with
    /// the first edge's `lo` unless the first segment leaves through its
    /// `hi`.  A vertex is appended only if it differs from the last one, so
    /// the result is always a walk over real edges.
    pub fn reconstructed_path(&self) -> Vec<VertexId> {
        let mut route: Vec<VertexId> = Vec::new();
        for pair in self.detection_points.windows(2) {
            let (d1, d2) = (pair[0], pair[1]);
            let segment = self.graph.shortest_path(d1.lo, d2.lo);
            let Some(steps) = segment.vertices.get(1..).filter(|s| !s.is_empty()) else {
                continue;
            };
            if route.is_empty() && steps[0] != d1.hi {
                route.push(d1.lo);
            }
            for &v in steps {
                if route.last() != Some(&v) {
                    route.push(v);
                }
            }
        }
        route
    }

    /// Detection points recorded so far, starting with the start edge.
    pub fn detection_points(&self) -> &[EdgeKey] {
        &self.detection_points
    }
}

fn edge_set(vertices: &[VertexId]) -> BTreeSet<EdgeKey> {
    vertices.windows(2).map(|w| EdgeKey::new(w[0], w[1])).collect()
}
