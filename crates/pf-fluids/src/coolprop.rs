//! CoolProp-based fluid property model.

use crate::error::{FluidError, FluidResult};
use crate::model::{FluidState, PropertyProvider, validation};
use crate::species::Species;
use pf_core::units::{Pressure, Temperature, kgpm3, pas};
use rfluids::prelude::*;

/// CoolProp backend for fluid properties.
///
/// Thread-safe: rfluids Fluid instances are created per lookup and never shared.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoolPropModel;

impl CoolPropModel {
    /// Create a new CoolProp model.
    pub fn new() -> Self {
        Self
    }

    /// Create a Fluid instance at given P,T state.
    fn fluid_at_pt(&self, species: Species, p_pa: f64, t_k: f64) -> FluidResult<Fluid> {
        Fluid::from(species.rfluids_pure())
            .in_state(FluidInput::pressure(p_pa), FluidInput::temperature(t_k))
            .map_err(|e| FluidError::Backend {
                message: format!("rfluids error at P={} Pa, T={} K: {}", p_pa, t_k, e),
            })
    }
}

impl PropertyProvider for CoolPropModel {
    fn name(&self) -> &str {
        "CoolProp"
    }

    fn supports(&self, _species: Species) -> bool {
        // Every Species variant has an rfluids mapping
        true
    }

    fn fluid_state(
        &self,
        species: Species,
        p: Pressure,
        t: Temperature,
    ) -> FluidResult<FluidState> {
        validation::validate_pressure(p)?;
        validation::validate_temperature(t)?;

        let p_pa = p.value;
        let t_k = t.value;

        // Single flash, both properties from the same backend state
        let mut fluid = self.fluid_at_pt(species, p_pa, t_k)?;

        let rho = fluid.density().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting density: {}", e),
        })?;
        let mu = fluid.dynamic_viscosity().map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting viscosity: {}", e),
        })?;

        tracing::trace!(
            fluid = species.coolprop_name(),
            p_pa,
            t_k,
            rho,
            mu,
            "CoolProp lookup"
        );

        FluidState::new(species, p, t, kgpm3(rho), pas(mu))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_name() {
        let model = CoolPropModel::new();
        assert_eq!(model.name(), "CoolProp");
    }

    #[test]
    fn supports_every_species() {
        let model = CoolPropModel::new();
        for species in Species::ALL {
            assert!(model.supports(species));
        }
    }

    #[test]
    fn rejects_non_physical_input_before_backend() {
        use pf_core::units::{k, pa};
        let model = CoolPropModel::new();
        let err = model
            .fluid_state(Species::Nitrogen, pa(-1.0), k(300.0))
            .unwrap_err();
        assert!(matches!(err, FluidError::NonPhysical { .. }));
    }
}
