//! Darcy friction factor providers.
//!
//! The engine hands the provider a Reynolds number and a relative roughness and
//! never pre-selects a correlation; the provider switches between laminar and
//! turbulent formulas on its own.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Reynolds number below which `DarcyFriction` uses the laminar solution.
///
/// This is the pipe laminar-transition value used by common engineering
/// friction libraries. It sits below the 2300 regime boundary, so the
/// upper end of the reported Laminar band is evaluated with the turbulent
/// correlation.
pub const LAMINAR_TRANSITION_RE: f64 = 2040.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrictionError {
    #[error("Reynolds number must be positive and finite, got {reynolds}")]
    InvalidReynolds { reynolds: f64 },

    #[error("Relative roughness must be non-negative and finite, got {relative_roughness}")]
    InvalidRoughness { relative_roughness: f64 },

    #[error("{method} produced a non-physical friction factor ({value:e})")]
    NonPhysical { method: &'static str, value: f64 },
}

pub type FrictionResult<T> = Result<T, FrictionError>;

/// Source of the Darcy friction factor.
///
/// Implementations must be pure so calculations can run concurrently.
pub trait FrictionProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Darcy friction factor for `reynolds` and `relative_roughness` = ε/D.
    fn darcy_friction_factor(&self, reynolds: f64, relative_roughness: f64)
    -> FrictionResult<f64>;
}

/// Turbulent correlation used above the laminar transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrictionCorrelation {
    /// Clamond (2009) solution of Colebrook-White, exact to machine precision.
    #[default]
    Clamond,
    /// Swamee-Jain (1976) explicit approximation, within ~1% of Colebrook.
    SwameeJain,
}

impl fmt::Display for FrictionCorrelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clamond => write!(f, "Clamond"),
            Self::SwameeJain => write!(f, "Swamee-Jain"),
        }
    }
}

/// Friction provider covering laminar and turbulent pipe flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DarcyFriction {
    pub correlation: FrictionCorrelation,
    pub laminar_transition: f64,
}

impl Default for DarcyFriction {
    fn default() -> Self {
        Self::new(FrictionCorrelation::default())
    }
}

impl DarcyFriction {
    pub fn new(correlation: FrictionCorrelation) -> Self {
        Self {
            correlation,
            laminar_transition: LAMINAR_TRANSITION_RE,
        }
    }
}

impl FrictionProvider for DarcyFriction {
    fn name(&self) -> &str {
        match self.correlation {
            FrictionCorrelation::Clamond => "Darcy (Clamond)",
            FrictionCorrelation::SwameeJain => "Darcy (Swamee-Jain)",
        }
    }

    fn darcy_friction_factor(
        &self,
        reynolds: f64,
        relative_roughness: f64,
    ) -> FrictionResult<f64> {
        if !reynolds.is_finite() || reynolds <= 0.0 {
            return Err(FrictionError::InvalidReynolds { reynolds });
        }
        if !relative_roughness.is_finite() || relative_roughness < 0.0 {
            return Err(FrictionError::InvalidRoughness { relative_roughness });
        }

        let (method, f) = if reynolds < self.laminar_transition {
            ("Hagen-Poiseuille", laminar(reynolds))
        } else {
            match self.correlation {
                FrictionCorrelation::Clamond => ("Clamond", clamond(reynolds, relative_roughness)),
                FrictionCorrelation::SwameeJain => {
                    ("Swamee-Jain", swamee_jain(reynolds, relative_roughness))
                }
            }
        };

        if !f.is_finite() || f <= 0.0 {
            return Err(FrictionError::NonPhysical { method, value: f });
        }
        Ok(f)
    }
}

/// Hagen-Poiseuille: f = 64/Re.
pub fn laminar(reynolds: f64) -> f64 {
    64.0 / reynolds
}

/// Swamee-Jain explicit approximation of Colebrook-White.
pub fn swamee_jain(reynolds: f64, relative_roughness: f64) -> f64 {
    let a = relative_roughness / 3.7;
    let b = 5.74 / reynolds.powf(0.9);
    0.25 / (a + b).log10().powi(2)
}

/// Clamond's two-step iteration on the Lambert-W form of Colebrook-White.
pub fn clamond(reynolds: f64, relative_roughness: f64) -> f64 {
    // ln(10)/18.574
    const C1: f64 = 0.123_968_186_335_417_55;
    // ln(ln(10)/5.02)
    const C2: f64 = 0.779_397_488_455_681_9;
    // (ln(10)/2)^2
    const C3: f64 = 1.325_474_527_619_599_5;

    let x1 = relative_roughness * reynolds * C1;
    let x2 = reynolds.ln() - C2;

    let mut f = x2 - 0.2;
    for step in 0..2 {
        let x1f = x1 + f;
        let x1f1 = 1.0 + x1f;
        let e = if step == 0 {
            (x1f.ln() - 0.2) / x1f1
        } else {
            (x1f.ln() + f - x2) / x1f1
        };
        f -= (x1f1 + 0.5 * e) * e * x1f / (x1f1 + e * (1.0 + e / 3.0));
    }
    C3 / (f * f)
}
