//! Deterministic property provider with frozen properties.
//!
//! Returns the same density and viscosity for every supported fluid and state.
//! Used to test engine logic independently of real-fluid numerics, and to
//! reproduce backend rejections without needing an invalid thermodynamic point.

use crate::error::{FluidError, FluidResult};
use crate::model::{FluidState, PropertyProvider};
use crate::species::Species;
use pf_core::units::{Pressure, Temperature, kgpm3, pas};

#[derive(Debug, Clone)]
pub struct FixedPropertyModel {
    /// Frozen density [kg/m³]
    pub density: f64,
    /// Frozen dynamic viscosity [Pa·s]
    pub viscosity: f64,
    /// Fluids this provider answers for; `None` means all.
    pub species: Option<Vec<Species>>,
    /// When set, every lookup fails with this backend message.
    pub failure: Option<String>,
}

impl FixedPropertyModel {
    pub fn new(density: f64, viscosity: f64) -> Self {
        Self {
            density,
            viscosity,
            species: None,
            failure: None,
        }
    }

    /// Water near 25 °C and 1 atm.
    pub fn water_like() -> Self {
        Self::new(997.0, 8.9e-4)
    }

    /// A provider that rejects every state, like a backend asked for a point
    /// outside the fluid's valid phase region.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new(1.0, 1.0e-5)
        }
    }

    pub fn only(mut self, species: &[Species]) -> Self {
        self.species = Some(species.to_vec());
        self
    }
}

impl PropertyProvider for FixedPropertyModel {
    fn name(&self) -> &str {
        "Fixed"
    }

    fn supports(&self, species: Species) -> bool {
        self.species
            .as_ref()
            .is_none_or(|allowed| allowed.contains(&species))
    }

    fn fluid_state(
        &self,
        species: Species,
        p: Pressure,
        t: Temperature,
    ) -> FluidResult<FluidState> {
        if !self.supports(species) {
            return Err(FluidError::NotSupported {
                what: format!("fluid {} not configured in fixed model", species),
            });
        }
        if let Some(message) = &self.failure {
            return Err(FluidError::Backend {
                message: message.clone(),
            });
        }
        FluidState::new(species, p, t, kgpm3(self.density), pas(self.viscosity))
    }
}
