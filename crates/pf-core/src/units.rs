// pf-core/src/units.rs

use uom::si::f64::{
    DynamicViscosity as UomDynamicViscosity, Length as UomLength,
    MassDensity as UomMassDensity, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature, Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type DynVisc = UomDynamicViscosity;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Velocity = UomVelocity;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn kgpm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn pas(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

pub mod constants {
    /// Offset between the Kelvin and Celsius scales.
    pub const KELVIN_OFFSET: f64 = 273.15;

    /// Pascals per bar.
    pub const PA_PER_BAR: f64 = 1.0e5;
}
