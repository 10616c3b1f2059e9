//! Common utilities for hydraulic calculations.

use crate::error::{HydraulicError, HydraulicResult};
use pf_core::numeric::{ensure_finite, ensure_positive};

/// Ensure a value is finite, returning HydraulicError if not.
pub fn check_finite(value: f64, what: &'static str) -> HydraulicResult<f64> {
    ensure_finite(value, what).map_err(|_| HydraulicError::NonPhysical { what })
}

/// Ensure a value is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> HydraulicResult<f64> {
    ensure_positive(value, what).map_err(|_| HydraulicError::NonPhysical { what })
}

/// Dynamic pressure ρ·v²/2 [Pa].
pub fn velocity_head(rho: f64, velocity: f64) -> f64 {
    0.5 * rho * velocity * velocity
}
