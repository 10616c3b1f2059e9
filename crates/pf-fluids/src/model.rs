//! Property provider trait and validation helpers.

use crate::error::FluidResult;
use crate::species::Species;
use pf_core::units::{Density, DynVisc, Pressure, Temperature};

/// Density and dynamic viscosity of a fluid at one pressure/temperature point.
///
/// Built fresh for every calculation and never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidState {
    species: Species,
    p: Pressure,
    t: Temperature,
    rho: Density,
    mu: DynVisc,
}

impl FluidState {
    /// Create a state, rejecting non-physical density or viscosity.
    pub fn new(
        species: Species,
        p: Pressure,
        t: Temperature,
        rho: Density,
        mu: DynVisc,
    ) -> FluidResult<Self> {
        validation::validate_pressure(p)?;
        validation::validate_temperature(t)?;
        validation::validate_density(rho)?;
        validation::validate_viscosity(mu)?;
        Ok(Self {
            species,
            p,
            t,
            rho,
            mu,
        })
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn pressure(&self) -> Pressure {
        self.p
    }

    pub fn temperature(&self) -> Temperature {
        self.t
    }

    /// Density [kg/m³]
    pub fn density(&self) -> Density {
        self.rho
    }

    /// Dynamic viscosity [Pa·s]
    pub fn viscosity(&self) -> DynVisc {
        self.mu
    }
}

/// Source of fluid transport properties.
///
/// Implementations must be pure: deterministic for a given input and free of
/// I/O, so that calculations can run on any number of threads at once.
pub trait PropertyProvider: Send + Sync {
    /// Get the provider name (for logging).
    fn name(&self) -> &str;

    /// Check if this provider can evaluate the given fluid.
    fn supports(&self, species: Species) -> bool;

    /// Look up density and viscosity at (p, T).
    ///
    /// Fails with `FluidError::Backend` when the point lies outside the fluid's
    /// valid domain.
    fn fluid_state(&self, species: Species, p: Pressure, t: Temperature)
    -> FluidResult<FluidState>;
}

/// Validation helpers for fluid properties.
pub(crate) mod validation {
    use super::*;
    use pf_core::numeric::ensure_positive;

    /// Ensure pressure is positive and finite.
    pub fn validate_pressure(p: Pressure) -> FluidResult<()> {
        ensure_positive(p.value, "pressure")?;
        Ok(())
    }

    /// Ensure temperature is positive and finite.
    pub fn validate_temperature(t: Temperature) -> FluidResult<()> {
        ensure_positive(t.value, "temperature")?;
        Ok(())
    }

    /// Ensure density is positive and finite.
    pub fn validate_density(rho: Density) -> FluidResult<()> {
        ensure_positive(rho.value, "density")?;
        Ok(())
    }

    /// Ensure dynamic viscosity is positive and finite.
    pub fn validate_viscosity(mu: DynVisc) -> FluidResult<()> {
        ensure_positive(mu.value, "viscosity")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;
    use pf_core::units::{k, kgpm3, pa, pas};

    #[test]
    fn validate_positive_pressure() {
        assert!(validate_pressure(pa(101325.0)).is_ok());
        assert!(validate_pressure(pa(-100.0)).is_err());
        assert!(validate_pressure(pa(0.0)).is_err());
        assert!(validate_pressure(pa(f64::NAN)).is_err());
    }

    #[test]
    fn validate_positive_temperature() {
        assert!(validate_temperature(k(300.0)).is_ok());
        assert!(validate_temperature(k(-10.0)).is_err());
        assert!(validate_temperature(k(0.0)).is_err());
    }

    #[test]
    fn validate_density_positive() {
        assert!(validate_density(kgpm3(1000.0)).is_ok());
        assert!(validate_density(kgpm3(-1.0)).is_err());
        assert!(validate_density(kgpm3(0.0)).is_err());
    }

    #[test]
    fn validate_viscosity_positive() {
        assert!(validate_viscosity(pas(1.0e-3)).is_ok());
        assert!(validate_viscosity(pas(0.0)).is_err());
        assert!(validate_viscosity(pas(f64::INFINITY)).is_err());
    }

    #[test]
    fn state_accessors() {
        let state = FluidState::new(
            Species::Water,
            pa(101325.0),
            k(300.0),
            kgpm3(996.5),
            pas(8.5e-4),
        )
        .unwrap();
        assert_eq!(state.species(), Species::Water);
        assert_eq!(state.density().value, 996.5);
        assert_eq!(state.viscosity().value, 8.5e-4);
        assert_eq!(state.pressure().value, 101325.0);
        assert_eq!(state.temperature().value, 300.0);
    }

    #[test]
    fn state_rejects_zero_viscosity() {
        let result = FluidState::new(Species::Water, pa(1e5), k(300.0), kgpm3(996.5), pas(0.0));
        assert!(result.is_err());
    }
}
