//! Fluid property errors.

use pf_core::PfError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during fluid property lookup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Non-physical values (negative density, pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Fluid not available in the backend.
    #[error("Not supported: {what}")]
    NotSupported { what: String },

    /// Backend (CoolProp) rejected the requested state.
    #[error("Backend error: {message}")]
    Backend { message: String },
}

impl From<PfError> for FluidError {
    fn from(err: PfError) -> Self {
        match err {
            PfError::NonFinite { what, .. } => FluidError::NonPhysical { what },
            PfError::NotPositive { what, .. } => FluidError::NonPhysical { what },
        }
    }
}
