//! pf-hydraulics: single-pipe pressure drop engine.
//!
//! Computes steady, incompressible, single-phase pressure drop in a straight
//! pipe segment with the extended Darcy-Weisbach equation:
//!
//! ```text
//! Re = ρ·v·D / μ
//! ΔP = [f·(L/D) + ΣK] · (ρ·v² / 2)
//! ```
//!
//! Fluid properties and the Darcy friction factor come from providers
//! (`PropertyProvider`, `FrictionProvider`), so the engine itself is a
//! deterministic function of its inputs and can be exercised with stub
//! providers.
//!
//! # Example
//!
//! ```no_run
//! use pf_core::units::{k, m, mps, pa};
//! use pf_fluids::{CoolPropModel, Species};
//! use pf_hydraulics::{DarcyFriction, FlowConditions, HydraulicEngine, PipeOptions};
//!
//! let engine = HydraulicEngine::new(m(0.12), m(100.0), &PipeOptions::default()).unwrap();
//! let conditions = FlowConditions {
//!     species: Species::Methane,
//!     pressure: pa(7.0e6),
//!     temperature: k(298.15),
//!     velocity: mps(2.0),
//!     fittings_k: 1.5,
//! };
//!
//! let solution = engine
//!     .solve(&CoolPropModel::new(), &DarcyFriction::default(), &conditions)
//!     .unwrap();
//! println!("ΔP = {} Pa ({})", solution.delta_p.value, solution.regime);
//! ```

pub mod common;
pub mod engine;
pub mod error;
pub mod friction;
pub mod geometry;
pub mod regime;
pub mod rules;
pub mod solution;
pub mod sweep;

// Re-exports
pub use engine::{FlowConditions, HydraulicEngine};
pub use error::{HydraulicError, HydraulicResult};
pub use friction::{DarcyFriction, FrictionCorrelation, FrictionError, FrictionProvider};
pub use geometry::{PipeGeometry, PipeOptions};
pub use regime::FlowRegime;
pub use rules::{DesignRules, DesignWarning, Severity};
pub use solution::{CalculationResult, PipeFlowSolution};
pub use sweep::{MAX_SWEEP_POINTS, SweepDefinition, SweepPoint, SweepSpacing, velocity_sweep};
