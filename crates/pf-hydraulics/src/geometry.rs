//! Pipe geometry derived from the outer diameter.

use crate::common::check_positive;
use crate::error::{HydraulicError, HydraulicResult};
use pf_core::units::{Length, m};
use serde::{Deserialize, Serialize};

/// Default wall thickness [m].
pub const DEFAULT_WALL_THICKNESS_M: f64 = 0.005;

/// Absolute roughness of commercial steel [m].
pub const DEFAULT_ROUGHNESS_M: f64 = 4.5e-5;

/// Wall thickness and roughness applied to every outer diameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipeOptions {
    /// Wall thickness [m]
    pub wall_thickness: f64,
    /// Absolute surface roughness [m]
    pub roughness: f64,
}

impl Default for PipeOptions {
    fn default() -> Self {
        Self {
            wall_thickness: DEFAULT_WALL_THICKNESS_M,
            roughness: DEFAULT_ROUGHNESS_M,
        }
    }
}

impl PipeOptions {
    pub fn validate(&self) -> HydraulicResult<()> {
        check_positive(self.wall_thickness, "wall thickness").map_err(|_| {
            HydraulicError::InvalidPipe {
                what: "wall thickness must be positive and finite",
            }
        })?;
        check_positive(self.roughness, "roughness").map_err(|_| HydraulicError::InvalidPipe {
            what: "roughness must be positive and finite",
        })?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeGeometry {
    outer_diameter: Length,
    wall_thickness: Length,
    internal_diameter: Length,
    roughness: Length,
}

impl PipeGeometry {
    /// Derive the bore from the outer diameter.
    ///
    /// A bore of zero or less is a `Geometry` error, never clamped.
    pub fn new(outer_diameter: Length, options: &PipeOptions) -> HydraulicResult<Self> {
        options.validate()?;
        check_positive(outer_diameter.value, "outer diameter").map_err(|_| {
            HydraulicError::InvalidPipe {
                what: "outer diameter must be positive and finite",
            }
        })?;

        let internal = outer_diameter.value - 2.0 * options.wall_thickness;
        if internal <= 0.0 {
            return Err(HydraulicError::Geometry {
                outer_diameter: outer_diameter.value,
                wall_thickness: options.wall_thickness,
                internal_diameter: internal,
            });
        }

        tracing::trace!(
            outer_diameter = outer_diameter.value,
            wall_thickness = options.wall_thickness,
            internal_diameter = internal,
            "pipe geometry"
        );

        Ok(Self {
            outer_diameter,
            wall_thickness: m(options.wall_thickness),
            internal_diameter: m(internal),
            roughness: m(options.roughness),
        })
    }

    pub fn outer_diameter(&self) -> Length {
        self.outer_diameter
    }

    pub fn wall_thickness(&self) -> Length {
        self.wall_thickness
    }

    pub fn internal_diameter(&self) -> Length {
        self.internal_diameter
    }

    pub fn roughness(&self) -> Length {
        self.roughness
    }

    /// ε/D
    pub fn relative_roughness(&self) -> f64 {
        self.roughness.value / self.internal_diameter.value
    }
}
