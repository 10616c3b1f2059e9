//! Error types for the pf-app service layer.

use crate::validate::InputRangeError;
use pf_hydraulics::HydraulicError;
use serde::{Deserialize, Serialize};

/// Application error type that wraps errors from the backend crates and
/// classifies them for the transport in front of the service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    InputRange(#[from] InputRangeError),

    #[error("{0}")]
    Geometry(String),

    #[error("{0}")]
    PropertyLookup(String),

    #[error("Friction computation failed: {0}")]
    FrictionComputation(String),

    #[error("Invalid sweep: {0}")]
    InvalidSweep(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Rendering our own response failed; never the caller's fault.
    #[error("Failed to serialize output: {0}")]
    Output(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for pf-app operations.
pub type AppResult<T> = Result<T, AppError>;

/// Who is at fault for a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad request; the detail is safe to show.
    Client,
    /// Internal failure; the detail stays in the logs.
    Server,
}

/// Outward-facing error body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
    pub detail: String,
}

const GENERIC_SERVER_DETAIL: &str = "Internal calculation error";

impl AppError {
    /// Wraps a serializer failure on the outbound path.
    ///
    /// `?` on serde errors yields the client-side `Json`/`Yaml` variants, which
    /// only fit parsing caller input.
    pub fn output(err: impl std::fmt::Display) -> Self {
        AppError::Output(err.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InputRange(_)
            | AppError::Geometry(_)
            | AppError::PropertyLookup(_)
            | AppError::InvalidSweep(_)
            | AppError::Io(_)
            | AppError::Yaml(_)
            | AppError::Json(_) => ErrorKind::Client,
            AppError::FrictionComputation(_)
            | AppError::Unexpected(_)
            | AppError::Config(_)
            | AppError::Output(_) => ErrorKind::Server,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.kind() == ErrorKind::Client
    }

    /// 422 for client errors, 500 for server errors.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Client => 422,
            ErrorKind::Server => 500,
        }
    }

    /// Short machine-readable tag.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InputRange(_) => "input_range",
            AppError::Geometry(_) => "geometry",
            AppError::PropertyLookup(_) => "property_lookup",
            AppError::FrictionComputation(_) => "friction_computation",
            AppError::InvalidSweep(_) => "invalid_sweep",
            AppError::Unexpected(_) => "unexpected",
            AppError::Config(_) => "config",
            AppError::Output(_) => "output",
            AppError::Io(_) => "io",
            AppError::Yaml(_) => "yaml",
            AppError::Json(_) => "json",
        }
    }

    /// Server diagnostics never leave the process.
    pub fn to_response(&self) -> ErrorResponse {
        let detail = match self.kind() {
            ErrorKind::Client => self.to_string(),
            ErrorKind::Server => GENERIC_SERVER_DETAIL.to_string(),
        };
        ErrorResponse {
            status: self.status_code(),
            error: self.code().to_string(),
            detail,
        }
    }
}

impl From<HydraulicError> for AppError {
    fn from(err: HydraulicError) -> Self {
        match err {
            HydraulicError::Geometry { .. } | HydraulicError::InvalidPipe { .. } => {
                AppError::Geometry(err.to_string())
            }
            HydraulicError::PropertyLookup { .. } => AppError::PropertyLookup(err.to_string()),
            HydraulicError::FrictionComputation { message } => {
                AppError::FrictionComputation(message)
            }
            HydraulicError::InvalidSweep { what } => AppError::InvalidSweep(what.to_string()),
            HydraulicError::NonPhysical { .. } => AppError::Unexpected(err.to_string()),
        }
    }
}
