//! pf-fluids: fluid property lookup for pipeflow.
//!
//! Provides:
//! - Fluid identities (`Species`) with their CoolProp names
//! - `FluidState`: density and dynamic viscosity at a pressure/temperature point
//! - `PropertyProvider` trait isolating the hydraulic engine from the backend
//! - CoolProp backend for real fluid properties
//! - `FixedPropertyModel`, a deterministic provider for engine tests
//!
//! # Architecture
//!
//! The rest of pipeflow only sees the `PropertyProvider` trait. CoolProp (via
//! `rfluids`) is the production backend; it is never called for anything other
//! than a single pressure-temperature flash per lookup.
//!
//! # Example
//!
//! ```no_run
//! use pf_fluids::{CoolPropModel, PropertyProvider, Species};
//! use pf_core::units::{pa, k};
//!
//! let model = CoolPropModel::new();
//! let state = model
//!     .fluid_state(Species::Methane, pa(7.0e6), k(298.15))
//!     .unwrap();
//! println!("Density: {} kg/m³", state.density().value);
//! ```

pub mod coolprop;
pub mod error;
pub mod fixed;
pub mod model;
pub mod species;

// Re-exports for ergonomics
pub use coolprop::CoolPropModel;
pub use error::{FluidError, FluidResult};
pub use fixed::FixedPropertyModel;
pub use model::{FluidState, PropertyProvider};
pub use species::Species;
