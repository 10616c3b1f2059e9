//! Request validation against the configured limits and fluid set.
//!
//! Every field is checked and every violation is reported together. Values
//! are rejected, never clamped.

use crate::config::AppConfig;
use crate::input::CalculationInput;
use crate::limits::{InputField, PhysicalLimit};
use pf_core::units::{Length, k, m, mps, pa};
use pf_fluids::Species;
use pf_hydraulics::{FlowConditions, PipeOptions};
use std::fmt;

/// One rejected request field.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    OutOfRange {
        field: InputField,
        value: f64,
        limit: PhysicalLimit,
    },
    UnsupportedFluid {
        fluid: String,
        supported: Vec<String>,
    },
}

impl Violation {
    pub fn field_name(&self) -> &'static str {
        match self {
            Violation::OutOfRange { field, .. } => field.as_str(),
            Violation::UnsupportedFluid { .. } => "fluid",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::OutOfRange {
                field,
                value,
                limit,
            } => write!(f, "{field} out of valid range {limit}, got {value}"),
            Violation::UnsupportedFluid { fluid, supported } => write!(
                f,
                "fluid '{fluid}' not supported, expected one of: {}",
                supported.join(", ")
            ),
        }
    }
}

/// Every violation found in one request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid input: {}", summarize(.violations))]
pub struct InputRangeError {
    pub violations: Vec<Violation>,
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl InputRangeError {
    pub fn fields(&self) -> Vec<&'static str> {
        self.violations.iter().map(Violation::field_name).collect()
    }

    pub fn names(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field_name() == field)
    }
}

/// Request converted to engine inputs, with pipe defaults applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedInput {
    pub conditions: FlowConditions,
    pub outer_diameter: Length,
    pub length: Length,
    pub pipe: PipeOptions,
}

/// Check a raw request against `config`.
///
/// Cross-field consistency (wall thickness versus diameter) is left to
/// geometry construction.
pub fn validate_input(
    input: &CalculationInput,
    config: &AppConfig,
) -> Result<ValidatedInput, InputRangeError> {
    let mut violations = Vec::new();

    let species = if config.supports(&input.fluid) {
        Species::from_coolprop_name(&input.fluid)
    } else {
        None
    };
    if species.is_none() {
        violations.push(Violation::UnsupportedFluid {
            fluid: input.fluid.clone(),
            supported: config.supported_fluids.clone(),
        });
    }

    for (field, limit) in config.limits.iter() {
        let value = input.value(field);
        if !limit.contains(value) {
            violations.push(Violation::OutOfRange {
                field,
                value,
                limit: limit.clone(),
            });
        }
    }

    let Some(species) = species else {
        return Err(InputRangeError { violations });
    };
    if !violations.is_empty() {
        return Err(InputRangeError { violations });
    }

    let pipe = PipeOptions {
        wall_thickness: input.wall_thickness.unwrap_or(config.pipe.wall_thickness),
        roughness: input.roughness.unwrap_or(config.pipe.roughness),
    };

    Ok(ValidatedInput {
        conditions: FlowConditions {
            species,
            pressure: pa(input.pressure),
            temperature: k(input.temperature),
            velocity: mps(input.velocity),
            fittings_k: input.fittings_k,
        },
        outer_diameter: m(input.outer_diameter),
        length: m(input.length),
        pipe,
    })
}
