//! Flat-plane geometry and positions on street edges.
//!
//! Coordinates are treated as a Euclidean plane (map ingestion projects
//! lat/lon to kilometres beforehand).  `f64` is used throughout so that
//! summed path lengths stay stable across long routes.

use crate::VertexId;

/// A point in the simulation plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// `true` if `other` lies within the closed disc of `radius` around `self`.
    #[inline]
    pub fn within(self, other: Point, radius: f64) -> bool {
        self.distance_sq(other) <= radius * radius
    }

    /// Linear interpolation: `self` at `t = 0`, `other` at `t = 1`.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}

// ── EdgeKey ───────────────────────────────────────────────────────────────────

/// An undirected edge, normalized so that `lo < hi` (or `lo == hi` for a
/// self-loop).  Fractions along the edge are measured from `lo`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeKey {
    pub lo: VertexId,
    pub hi: VertexId,
}

impl EdgeKey {
    #[inline]
    pub fn new(a: VertexId, b: VertexId) -> Self {
        if a <= b { Self { lo: a, hi: b } } else { Self { lo: b, hi: a } }
    }

    #[inline]
    pub fn contains(self, v: VertexId) -> bool {
        self.lo == v || self.hi == v
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lo.0, self.hi.0)
    }
}

// ── EdgePoint ─────────────────────────────────────────────────────────────────

/// A position on an edge: `fraction` 0 is at `edge.lo`, 1 at `edge.hi`.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgePoint {
    pub edge: EdgeKey,
    pub fraction: f64,
}

impl EdgePoint {
    /// Build a point `fraction` of the way from `from` towards `to`.
    ///
    /// If `from > to` the edge is normalized and the fraction mirrored, so
    /// the described location is the same.  The fraction is clamped to [0, 1].
    pub fn new(from: VertexId, to: VertexId, fraction: f64) -> Self {
        let fraction = fraction.clamp(0.0, 1.0);
        if from <= to {
            Self { edge: EdgeKey { lo: from, hi: to }, fraction }
        } else {
            Self { edge: EdgeKey { lo: to, hi: from }, fraction: 1.0 - fraction }
        }
    }
}
