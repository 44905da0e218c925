//! Uniform k×k grid over detector positions.
//!
//! # Cell count
//!
//! With `N` detectors the grid has `k = ⌊√√N⌋` cells per side, i.e. about
//! `√N` cells of about `√N` detectors each.  A query that falls into a single
//! cell's bounds then scans roughly `√N` detectors; one that overlaps a few
//! cells scans a small multiple of that.
//!
//! # Bounds
//!
//! Detectors are bucketed by centre, but each non-empty cell keeps the union
//! of its members' discs (centre ± radius) as its bounding rectangle.  The
//! rectangle is a superset of every member's reach, so rejecting a cell on
//! the rectangle test never drops a detector that can hear the point.

use std::iter::FusedIterator;

use tracing::debug;

use wm_core::{Detector, DetectorIndex, Point};

/// Padding added to the bounding-box extent so the maximum coordinate still
/// maps inside the last cell.
const EXTENT_EPS: f64 = 1e-5;

#[derive(Copy, Clone, Debug, PartialEq)]
struct Rect {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Rect {
    fn around(center: Point, radius: f64) -> Self {
        Self {
            min_x: center.x - radius,
            max_x: center.x + radius,
            min_y: center.y - radius,
            max_y: center.y + radius,
        }
    }

    fn union(self, other: Rect) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
        }
    }

    #[inline]
    fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

#[derive(Clone, Debug)]
struct Member {
    index: DetectorIndex,
    center: Point,
    radius: f64,
}

#[derive(Clone, Debug, Default)]
struct Cell {
    members: Vec<Member>,
    /// `None` for empty cells, which every query skips.
    bounds: Option<Rect>,
}

// ── DetectorGrid ──────────────────────────────────────────────────────────────

/// Static spatial index over a snapshot of detector positions and radii.
///
/// The grid copies what it needs at build time; detector activation changes
/// do not affect it.  Rebuild it whenever the detector set changes.
#[derive(Clone, Debug)]
pub struct DetectorGrid {
    k: usize,
    cells: Vec<Cell>,
    len: usize,
}

impl DetectorGrid {
    /// Build with the default `k = ⌊√√N⌋` cells per side.
    pub fn build(detectors: &[Detector]) -> Self {
        let k = (detectors.len() as f64).sqrt().sqrt().floor() as usize;
        Self::with_cells_per_side(detectors, k)
    }

    /// Build with an explicit number of cells per side (clamped to ≥ 1 when
    /// there are detectors).
    pub fn with_cells_per_side(detectors: &[Detector], k: usize) -> Self {
        if detectors.is_empty() {
            return Self { k: 0, cells: Vec::new(), len: 0 };
        }
        let k = k.max(1);

        let first = detectors[0].position;
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
        for d in detectors {
            min_x = min_x.min(d.position.x);
            max_x = max_x.max(d.position.x);
            min_y = min_y.min(d.position.y);
            max_y = max_y.max(d.position.y);
        }
        let span_x = max_x - min_x + EXTENT_EPS;
        let span_y = max_y - min_y + EXTENT_EPS;

        let mut cells = vec![Cell::default(); k * k];
        for d in detectors {
            let cx = (((d.position.x - min_x) / span_x * k as f64).floor() as usize).min(k - 1);
            let cy = (((d.position.y - min_y) / span_y * k as f64).floor() as usize).min(k - 1);
            let cell = &mut cells[cx + k * cy];
            let disc = Rect::around(d.position, d.radius);
            cell.bounds = Some(match cell.bounds {
                Some(b) => b.union(disc),
                None => disc,
            });
            cell.members.push(Member { index: d.index, center: d.position, radius: d.radius });
        }

        let occupied = cells.iter().filter(|c| !c.members.is_empty()).count();
        debug!(detectors = detectors.len(), k, occupied, "detector grid built");

        Self { k, cells, len: detectors.len() }
    }

    /// Cells per side.
    pub fn cells_per_side(&self) -> usize {
        self.k
    }

    /// Number of indexed detectors.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Lazily yield every detector whose disc contains `p`.
    ///
    /// Cells are visited in row-major order and members in insertion order,
    /// so the sequence is deterministic for a given grid.
    pub fn query(&self, p: Point) -> ReachIter<'_> {
        ReachIter { cells: &self.cells, point: p, cell: 0, member: None }
    }

    /// Convenience: collect [`query`](Self::query) into a `Vec`.
    pub fn reach(&self, p: Point) -> Vec<DetectorIndex> {
        self.query(p).collect()
    }
}

// ── ReachIter ─────────────────────────────────────────────────────────────────

/// Single-pass iterator over the detectors that can hear one point.
///
/// Borrows the grid, so the grid cannot be rebuilt while a query is live.
pub struct ReachIter<'a> {
    cells: &'a [Cell],
    point: Point,
    cell: usize,
    /// Next member to test inside the current cell; `None` before entering it.
    member: Option<usize>,
}

impl Iterator for ReachIter<'_> {
    type Item = DetectorIndex;

    fn next(&mut self) -> Option<DetectorIndex> {
        loop {
            let cell = self.cells.get(self.cell)?;
            match self.member {
                None => {
                    if cell.bounds.is_some_and(|b| b.contains(self.point)) {
                        self.member = Some(0);
                    } else {
                        self.cell += 1;
                    }
                }
                Some(i) if i >= cell.members.len() => {
                    self.member = None;
                    self.cell += 1;
                }
                Some(i) => {
                    self.member = Some(i + 1);
                    let m = &cell.members[i];
                    if m.center.within(self.point, m.radius) {
                        return Some(m.index);
                    }
                }
            }
        }
    }
}

impl FusedIterator for ReachIter<'_> {}
