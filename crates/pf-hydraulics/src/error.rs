//! Error types for hydraulic calculations.

use crate::friction::FrictionError;
use pf_core::PfError;
use thiserror::Error;

/// Errors that can occur while solving a pipe segment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HydraulicError {
    /// Wall thickness leaves no bore.
    #[error(
        "Invalid internal diameter ({internal_diameter:.4} m): wall thickness \
         ({wall_thickness} m) is not smaller than the pipe radius (outer diameter {outer_diameter} m)"
    )]
    Geometry {
        outer_diameter: f64,
        wall_thickness: f64,
        internal_diameter: f64,
    },

    /// Pipe parameter that cannot describe a real pipe (zero roughness, negative length, ...).
    #[error("Invalid pipe parameter: {what}")]
    InvalidPipe { what: &'static str },

    /// Property provider rejected the thermodynamic state.
    #[error(
        "Failed to obtain properties for fluid '{fluid}': {message}. \
         Check that the pressure-temperature combination is valid."
    )]
    PropertyLookup { fluid: String, message: String },

    /// Friction provider failed on already validated inputs.
    #[error("Failed to compute friction factor: {message}")]
    FrictionComputation { message: String },

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid sweep: {what}")]
    InvalidSweep { what: &'static str },
}

pub type HydraulicResult<T> = Result<T, HydraulicError>;

impl From<FrictionError> for HydraulicError {
    fn from(e: FrictionError) -> Self {
        HydraulicError::FrictionComputation {
            message: e.to_string(),
        }
    }
}

impl From<PfError> for HydraulicError {
    fn from(e: PfError) -> Self {
        match e {
            PfError::NonFinite { what, .. } => HydraulicError::NonPhysical { what },
            PfError::NotPositive { what, .. } => HydraulicError::NonPhysical { what },
        }
    }
}
