//! Velocity sweeps over a single pipe segment.
//!
//! Every point is an independent calculation (own property lookup, own
//! friction call), so points are evaluated in parallel with no shared state.

use crate::engine::{FlowConditions, HydraulicEngine};
use crate::error::{HydraulicError, HydraulicResult};
use crate::friction::FrictionProvider;
use crate::solution::PipeFlowSolution;
use pf_core::units::mps;
use pf_fluids::PropertyProvider;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spacing of sweep points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepSpacing {
    /// Uniformly spaced points
    #[default]
    Linear,
    /// Logarithmically spaced points (both bounds must be positive)
    Logarithmic,
}

impl fmt::Display for SweepSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

/// Upper bound on the number of points in one sweep.
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Validated sweep bounds; only constructible through [`SweepDefinition::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepDefinition {
    start: f64,
    end: f64,
    num_points: usize,
    spacing: SweepSpacing,
}

impl SweepDefinition {
    pub fn new(
        start: f64,
        end: f64,
        num_points: usize,
        spacing: SweepSpacing,
    ) -> HydraulicResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(HydraulicError::InvalidSweep {
                what: "bounds must be finite",
            });
        }
        if num_points < 2 {
            return Err(HydraulicError::InvalidSweep {
                what: "sweep must have at least 2 points",
            });
        }
        if num_points > MAX_SWEEP_POINTS {
            return Err(HydraulicError::InvalidSweep {
                what: "sweep must have at most 10000 points",
            });
        }
        if (start - end).abs() < 1e-12 {
            return Err(HydraulicError::InvalidSweep {
                what: "start and end values must be different",
            });
        }
        if spacing == SweepSpacing::Logarithmic && (start <= 0.0 || end <= 0.0) {
            return Err(HydraulicError::InvalidSweep {
                what: "logarithmic sweep requires positive bounds",
            });
        }
        Ok(Self {
            start,
            end,
            num_points,
            spacing,
        })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn spacing(&self) -> SweepSpacing {
        self.spacing
    }

    /// Generate all points in the sweep, endpoints exact.
    pub fn generate_points(&self) -> Vec<f64> {
        let n = self.num_points;
        if n <= 1 {
            return vec![self.start];
        }
        let mut points: Vec<f64> = match self.spacing {
            SweepSpacing::Linear => {
                let delta = (self.end - self.start) / (n - 1) as f64;
                (0..n).map(|i| self.start + i as f64 * delta).collect()
            }
            SweepSpacing::Logarithmic => {
                let log_start = self.start.ln();
                let log_delta = (self.end.ln() - log_start) / (n - 1) as f64;
                (0..n)
                    .map(|i| (log_start + i as f64 * log_delta).exp())
                    .collect()
            }
        };
        points[0] = self.start;
        points[n - 1] = self.end;
        points
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Velocity sweep from {} to {} m/s ({} points, {})",
            self.start, self.end, self.num_points, self.spacing
        )
    }
}

/// One evaluated sweep point.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    /// Velocity [m/s]
    pub velocity: f64,
    pub outcome: HydraulicResult<PipeFlowSolution>,
}

/// Solve `engine` at each velocity, keeping everything else in `base` fixed.
///
/// Output order matches `velocities`. A failed point does not stop the others.
pub fn velocity_sweep(
    engine: &HydraulicEngine,
    properties: &dyn PropertyProvider,
    friction: &dyn FrictionProvider,
    base: &FlowConditions,
    velocities: &[f64],
) -> Vec<SweepPoint> {
    velocities
        .par_iter()
        .map(|&velocity| {
            let conditions = FlowConditions {
                velocity: mps(velocity),
                ..*base
            };
            SweepPoint {
                velocity,
                outcome: engine.solve(properties, friction, &conditions),
            }
        })
        .collect()
}
