//! Declarative strategy parameters.

use crate::{
    ActivationStrategy, KSmartestNeighbors, RadiusSlidingWindow, RandomRadius,
    RandomStreetDistance, SlidingEuclidean, SlidingGraph, Static, StrategyError,
    StrategyResult,
};

/// Every activation policy and its parameters.
///
/// Harnesses sweep over these; [`build`](Self::build) turns one into a
/// ready-to-attach strategy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum StrategyConfig {
    Static { distance: f64 },
    RadiusSlidingWindow { distance: f64, max_active_ticks: u32 },
    SlidingEuclidean { distance: f64 },
    SlidingGraph { distance: f64 },
    RandomRadius { distance: f64, max_active_ticks: u32, fraction: f64 },
    RandomStreetDistance { distance: f64, max_active_ticks: u32, fraction: f64 },
    KSmartestNeighbors { k: u32, max_distance: f64, lazy: bool },
}

impl StrategyConfig {
    /// Validate parameters and construct the strategy.
    pub fn build(&self) -> StrategyResult<Box<dyn ActivationStrategy>> {
        self.validate()?;
        Ok(match *self {
            Self::Static { distance } => Box::new(Static::new(distance)),
            Self::RadiusSlidingWindow { distance, max_active_ticks } => {
                Box::new(RadiusSlidingWindow::new(distance, max_active_ticks))
            }
            Self::SlidingEuclidean { distance } => Box::new(SlidingEuclidean::new(distance)),
            Self::SlidingGraph { distance } => Box::new(SlidingGraph::new(distance)),
            Self::RandomRadius { distance, max_active_ticks, fraction } => {
                Box::new(RandomRadius::new(distance, max_active_ticks, fraction))
            }
            Self::RandomStreetDistance { distance, max_active_ticks, fraction } => {
                Box::new(RandomStreetDistance::new(distance, max_active_ticks, fraction))
            }
            Self::KSmartestNeighbors { k, max_distance, lazy } => {
                Box::new(KSmartestNeighbors::new(k, max_distance, lazy))
            }
        })
    }

    fn validate(&self) -> StrategyResult<()> {
        let (distance, fraction) = match *self {
            Self::Static { distance }
            | Self::RadiusSlidingWindow { distance, .. }
            | Self::SlidingEuclidean { distance }
            | Self::SlidingGraph { distance } => (distance, None),
            Self::RandomRadius { distance, fraction, .. }
            | Self::RandomStreetDistance { distance, fraction, .. } => (distance, Some(fraction)),
            Self::KSmartestNeighbors { max_distance, .. } => (max_distance, None),
        };
        if distance.is_nan() || distance < 0.0 {
            return Err(StrategyError::Config(format!(
                "distance must be non-negative, got {distance}"
            )));
        }
        if let Some(f) = fraction {
            if !(0.0..=1.0).contains(&f) {
                return Err(StrategyError::Config(format!(
                    "fraction must lie in [0, 1], got {f}"
                )));
            }
        }
        Ok(())
    }
}
