//! Application service layer for pipeflow.
//!
//! Sits between a transport (the CLI, or any request/response front end) and
//! the hydraulic engine: validates raw requests against the configured limits,
//! runs the engine with the configured providers, rounds the result, and
//! classifies failures into client and server errors.

pub mod config;
pub mod error;
pub mod input;
pub mod limits;
pub mod service;
pub mod validate;

// Re-export key types for convenience
pub use config::AppConfig;
pub use error::{AppError, AppResult, ErrorKind, ErrorResponse};
pub use input::CalculationInput;
pub use limits::{InputField, LimitTable, PhysicalLimit};
pub use service::{CalculationService, HealthReport, SweepRow};
pub use validate::{InputRangeError, ValidatedInput, Violation, validate_input};

pub use pf_hydraulics::{CalculationResult, FlowRegime, SweepDefinition, SweepSpacing};

/// Version reported by the health check.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
