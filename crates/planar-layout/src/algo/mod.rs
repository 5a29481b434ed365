pub mod fruchterman_reingold;

use crate::error::{Error, Result};
use crate::graph::Point;

/// Accepted range for `optimal_distance`; forces scale with `k²` and `1 / k`.
pub const OPTIMAL_DISTANCE_RANGE: (f64, f64) = (1e-50, 1e50);

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Seed for the initial positions. Equal seeds give bit-identical layouts.
    pub seed: u64,
    /// Upper bound on relaxation steps.
    pub iterations: usize,
    /// Stop once the mean per-node movement of a step drops below this value.
    pub threshold: f64,
    /// Largest absolute coordinate of the final layout, relative to `center`.
    pub scale: f64,
    pub center: Point,
    /// Optimal distance between nodes; `1 / sqrt(n)` when unset.
    pub optimal_distance: Option<f64>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            iterations: 50,
            threshold: 1e-4,
            scale: 1.0,
            center: Point::ORIGIN,
            optimal_distance: None,
        }
    }
}

impl LayoutOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(Error::invalid_option(
                "threshold",
                format!("expected a finite non-negative number, got {}", self.threshold),
            ));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::invalid_option(
                "scale",
                format!("expected a finite positive number, got {}", self.scale),
            ));
        }
        if !self.center.is_finite() {
            return Err(Error::invalid_option(
                "center",
                format!("expected finite coordinates, got {:?}", self.center),
            ));
        }
        if let Some(k) = self.optimal_distance {
            let (lo, hi) = OPTIMAL_DISTANCE_RANGE;
            if !(lo..=hi).contains(&k) {
                return Err(Error::invalid_option(
                    "optimal_distance",
                    format!("expected a number in [{lo:e}, {hi:e}], got {k}"),
                ));
            }
        }
        Ok(())
    }
}
