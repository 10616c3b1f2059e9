//! Fluid identities known to the property backend.

use std::fmt;

/// Pure fluids relevant for industrial gas and liquid piping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Species {
    /// Methane (CH₄)
    Methane,
    /// Water (H₂O)
    Water,
    /// Ethane (C₂H₆)
    Ethane,
    /// Hydrogen (H₂)
    Hydrogen,
    /// Nitrogen (N₂)
    Nitrogen,
    /// Carbon dioxide (CO₂)
    CarbonDioxide,
    /// Propane (C₃H₈)
    Propane,
    /// Oxygen (O₂)
    Oxygen,
    /// Argon (Ar)
    Argon,
    /// Helium (He)
    Helium,
    /// Air (pseudo-pure backend fluid)
    Air,
}

impl Species {
    pub const ALL: [Species; 11] = [
        Species::Methane,
        Species::Water,
        Species::Ethane,
        Species::Hydrogen,
        Species::Nitrogen,
        Species::CarbonDioxide,
        Species::Propane,
        Species::Oxygen,
        Species::Argon,
        Species::Helium,
        Species::Air,
    ];

    /// CoolProp identifier, which is also the identifier callers submit.
    pub fn coolprop_name(&self) -> &'static str {
        match self {
            Species::Methane => "Methane",
            Species::Water => "Water",
            Species::Ethane => "Ethane",
            Species::Hydrogen => "Hydrogen",
            Species::Nitrogen => "Nitrogen",
            Species::CarbonDioxide => "CarbonDioxide",
            Species::Propane => "Propane",
            Species::Oxygen => "Oxygen",
            Species::Argon => "Argon",
            Species::Helium => "Helium",
            Species::Air => "Air",
        }
    }

    /// Exact lookup by CoolProp identifier (case-sensitive).
    pub fn from_coolprop_name(name: &str) -> Option<Species> {
        Species::ALL
            .iter()
            .copied()
            .find(|s| s.coolprop_name() == name)
    }

    /// Map to rfluids Pure enum (internal use for CoolProp backend).
    pub(crate) fn rfluids_pure(&self) -> rfluids::substance::Pure {
        use rfluids::substance::Pure;
        match self {
            Species::Methane => Pure::Methane,
            Species::Water => Pure::Water,
            Species::Ethane => Pure::Ethane,
            Species::Hydrogen => Pure::Hydrogen,
            Species::Nitrogen => Pure::Nitrogen,
            Species::CarbonDioxide => Pure::CarbonDioxide,
            Species::Propane => Pure::nPropane,
            Species::Oxygen => Pure::Oxygen,
            Species::Argon => Pure::Argon,
            Species::Helium => Pure::Helium,
            Species::Air => Pure::Air,
        }
    }

    /// Get human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Species::CarbonDioxide => "Carbon Dioxide",
            other => other.coolprop_name(),
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.coolprop_name())
    }
}
