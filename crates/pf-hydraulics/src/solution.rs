//! Engine output: full-precision solution and its rounded presentation.

use crate::regime::FlowRegime;
use crate::rules::DesignWarning;
use pf_core::numeric::round_to;
use pf_core::units::{Length, Pressure};
use pf_fluids::FluidState;
use serde::{Deserialize, Serialize};

/// Unrounded result of `HydraulicEngine::solve`.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeFlowSolution {
    pub fluid: FluidState,
    pub internal_diameter: Length,
    pub reynolds: f64,
    /// Darcy friction factor (0 when static)
    pub friction_factor: f64,
    pub delta_p: Pressure,
    pub regime: FlowRegime,
    pub warnings: Vec<DesignWarning>,
}

/// Result as returned to callers.
///
/// Rounding: `delta_p` 2 decimals, `friction_factor` 6, `density` and
/// `internal_diameter` 4, `reynolds` truncated, `viscosity` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Total pressure drop [Pa]
    pub delta_p: f64,
    pub reynolds: u64,
    pub friction_factor: f64,
    /// [kg/m³]
    pub density: f64,
    /// [Pa·s]
    pub viscosity: f64,
    /// [m]
    pub internal_diameter: f64,
    pub regime: FlowRegime,
    pub warnings: Vec<String>,
}

impl From<&PipeFlowSolution> for CalculationResult {
    fn from(solution: &PipeFlowSolution) -> Self {
        Self {
            delta_p: round_to(solution.delta_p.value, 2),
            // Saturating cast; reynolds is finite and non-negative here
            reynolds: solution.reynolds.trunc() as u64,
            friction_factor: round_to(solution.friction_factor, 6),
            density: round_to(solution.fluid.density().value, 4),
            viscosity: solution.fluid.viscosity().value,
            internal_diameter: round_to(solution.internal_diameter.value, 4),
            regime: solution.regime,
            warnings: solution.warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

impl From<PipeFlowSolution> for CalculationResult {
    fn from(solution: PipeFlowSolution) -> Self {
        Self::from(&solution)
    }
}
