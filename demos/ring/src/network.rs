//! Synthetic "spider web" street map: concentric rings joined by spokes.

use anyhow::Result;

use wm_core::{Point, VertexId};
use wm_sim::Engine;

pub const RINGS:      u32 = 6;
pub const SPOKES:     u32 = 12;
/// Distance between consecutive rings.
pub const RING_STEP:  f64 = 100.0;

/// Vertex 0 is the centre; ring `r` (1-based) spoke `s` is
/// `1 + (r − 1) · SPOKES + s`.
pub fn vertex(ring: u32, spoke: u32) -> VertexId {
    VertexId(1 + (ring - 1) * SPOKES + spoke % SPOKES)
}

pub fn vertex_count() -> u32 {
    1 + RINGS * SPOKES
}

/// Add the web to `engine` and build the graph.  Returns every edge added.
pub fn build_web(engine: &mut Engine) -> Result<Vec<(VertexId, VertexId)>> {
    engine.add_vertex(VertexId(0), Point::new(0.0, 0.0));
    for ring in 1..=RINGS {
        for spoke in 0..SPOKES {
            let angle = std::f64::consts::TAU * spoke as f64 / SPOKES as f64;
            let radius = ring as f64 * RING_STEP;
            engine.add_vertex(vertex(ring, spoke), Point::new(radius * angle.cos(), radius * angle.sin()));
        }
    }

    let mut edges = Vec::new();
    for spoke in 0..SPOKES {
        edges.push((VertexId(0), vertex(1, spoke)));
        for ring in 1..=RINGS {
            edges.push((vertex(ring, spoke), vertex(ring, spoke + 1)));
            if ring < RINGS {
                edges.push((vertex(ring, spoke), vertex(ring + 1, spoke)));
            }
        }
    }
    for &(a, b) in &edges {
        engine.add_edge(a, b)?;
    }
    engine.build_graph();
    Ok(edges)
}
