//! Detector, adversary, and event records.

use crate::{DetectorId, DetectorIndex, EdgePoint, Point, Tick};

// ── Detector ──────────────────────────────────────────────────────────────────

/// A stationary sensor placed on a street edge.
///
/// Created once per run before a strategy is attached; afterwards only the
/// activation fields (`active`, `active_since`) change, and only through the
/// bound activation strategy or the engine's per-tick bookkeeping.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Detector {
    pub id: DetectorId,
    pub index: DetectorIndex,
    pub at: EdgePoint,
    /// Cartesian position, cached from `at` at creation time.
    pub position: Point,
    pub radius: f64,
    pub active: bool,
    /// Ticks spent active since the last (re)activation.
    pub active_since: u32,
}

impl Detector {
    /// `true` if `p` lies within this detector's own detection radius.
    #[inline]
    pub fn in_reach(&self, p: Point) -> bool {
        self.position.within(p, self.radius)
    }

    /// `true` if `p` lies within `distance` of this detector.
    #[inline]
    pub fn within(&self, p: Point, distance: f64) -> bool {
        self.position.within(p, distance)
    }

    /// Switch on and restart the activity window.
    #[inline]
    pub fn activate(&mut self) {
        self.active = true;
        self.active_since = 0;
    }

    #[inline]
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

// ── Adversary ─────────────────────────────────────────────────────────────────

/// The mobile entity being tracked.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Adversary {
    pub at: EdgePoint,
    pub position: Point,
    /// Distance travelled per tick.
    pub speed: f64,
    /// Probability in [0, 1] that the adversary transmits on a given tick.
    pub tx_prob: f64,
}

// ── Event ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// An active detector within reach heard a transmission.
    Detect,
    /// A detector within reach was inactive when the adversary transmitted.
    Miss,
}

/// One detector's outcome for a transmitting tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub kind: EventKind,
    pub tick: Tick,
    /// Snapshot of the detector at emission time.
    pub detector: Detector,
}

impl Event {
    #[inline]
    pub fn is_detect(&self) -> bool {
        self.kind == EventKind::Detect
    }
}
