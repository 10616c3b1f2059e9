//! Raw calculation request.

use crate::limits::InputField;
use serde::{Deserialize, Serialize};

/// Default pipe length [m].
pub const DEFAULT_LENGTH_M: f64 = 100.0;

fn default_length() -> f64 {
    DEFAULT_LENGTH_M
}

/// One pressure-drop request, SI units throughout.
///
/// Nothing here is trusted until it has been through
/// [`validate_input`](crate::validate::validate_input).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// CoolProp fluid identifier, e.g. `Methane`
    pub fluid: String,
    /// Absolute pressure [Pa]
    pub pressure: f64,
    /// Temperature [K]
    pub temperature: f64,
    /// Pipe outer diameter [m]
    pub outer_diameter: f64,
    /// Mean flow velocity [m/s]
    pub velocity: f64,
    /// Pipe length [m]
    #[serde(default = "default_length")]
    pub length: f64,
    /// Sum of fitting loss coefficients
    #[serde(default)]
    pub fittings_k: f64,
    /// Per-request wall thickness override [m]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_thickness: Option<f64>,
    /// Per-request roughness override [m]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roughness: Option<f64>,
}

impl CalculationInput {
    pub fn new(
        fluid: impl Into<String>,
        pressure: f64,
        temperature: f64,
        outer_diameter: f64,
        velocity: f64,
    ) -> Self {
        Self {
            fluid: fluid.into(),
            pressure,
            temperature,
            outer_diameter,
            velocity,
            length: DEFAULT_LENGTH_M,
            fittings_k: 0.0,
            wall_thickness: None,
            roughness: None,
        }
    }

    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    pub fn with_fittings_k(mut self, fittings_k: f64) -> Self {
        self.fittings_k = fittings_k;
        self
    }

    pub fn with_wall_thickness(mut self, wall_thickness: f64) -> Self {
        self.wall_thickness = Some(wall_thickness);
        self
    }

    pub fn with_roughness(mut self, roughness: f64) -> Self {
        self.roughness = Some(roughness);
        self
    }

    pub fn value(&self, field: InputField) -> f64 {
        match field {
            InputField::Pressure => self.pressure,
            InputField::Temperature => self.temperature,
            InputField::OuterDiameter => self.outer_diameter,
            InputField::Velocity => self.velocity,
            InputField::Length => self.length,
            InputField::FittingsK => self.fittings_k,
        }
    }
}
