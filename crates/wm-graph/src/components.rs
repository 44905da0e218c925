//! Connected components and the edge set they span.

use std::collections::VecDeque;

use wm_core::{EdgeKey, VertexId};

use crate::StreetGraph;

impl StreetGraph {
    /// Component label for every vertex (labels are dense, assigned in
    /// ascending order of each component's lowest vertex id).
    pub fn component_labels(&self) -> (Vec<u32>, usize) {
        let n = self.vertex_count();
        let mut label = vec![u32::MAX; n];
        let mut count = 0u32;
        let mut queue = VecDeque::new();

        for start in 0..n {
            if label[start] != u32::MAX {
                continue;
            }
            label[start] = count;
            queue.push_back(VertexId(start as u32));
            while let Some(v) = queue.pop_front() {
                for (next, _) in self.neighbors(v) {
                    if label[next.index()] == u32::MAX {
                        label[next.index()] = count;
                        queue.push_back(next);
                    }
                }
            }
            count += 1;
        }
        (label, count as usize)
    }

    /// Vertices of the largest connected component, ascending.  Ties go to
    /// the component with the lowest label.
    pub fn largest_component(&self) -> Vec<VertexId> {
        let (label, count) = self.component_labels();
        if count == 0 {
            return Vec::new();
        }
        let mut size = vec![0usize; count];
        for &l in &label {
            size[l as usize] += 1;
        }
        let mut largest = 0;
        for (i, &s) in size.iter().enumerate() {
            if s > size[largest] {
                largest = i;
            }
        }
        label
            .iter()
            .enumerate()
            .filter(|&(_, &l)| l as usize == largest)
            .map(|(v, _)| VertexId(v as u32))
            .collect()
    }

    /// Every edge (in insertion order) with both endpoints in `vertices`,
    /// paired with its length.
    pub fn spanning_edges(&self, vertices: &[VertexId]) -> Vec<(EdgeKey, f64)> {
        let mut in_set = vec![false; self.vertex_count()];
        for v in vertices {
            if let Some(slot) = in_set.get_mut(v.index()) {
                *slot = true;
            }
        }
        self.edges
            .iter()
            .zip(&self.edge_len)
            .filter(|(e, _)| in_set[e.lo.index()] && in_set[e.hi.index()])
            .map(|(&e, &w)| (e, w))
            .collect()
    }
}
