//! pf-core: stable foundation for pipeflow.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real, finite/positive checks, presentation rounding)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PfError, PfResult};
pub use numeric::*;
pub use units::*;
