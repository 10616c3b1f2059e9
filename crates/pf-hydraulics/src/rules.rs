//! Design-rule checks on a solved pipe segment.

use crate::regime::FlowRegime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Velocity thresholds for advisory warnings [m/s].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignRules {
    /// Above this, erosion and noise are likely.
    pub erosion_velocity: f64,
    /// Above this (and up to `erosion_velocity`), erosion-resistant design is advised.
    pub advisory_velocity: f64,
}

impl Default for DesignRules {
    fn default() -> Self {
        Self {
            erosion_velocity: 25.0,
            advisory_velocity: 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Advisory,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DesignWarning {
    NoFlow,
    TransitionalFlow,
    ExcessiveVelocity { limit: f64 },
    HighVelocity { limit: f64 },
}

impl DesignWarning {
    pub fn severity(&self) -> Severity {
        match self {
            DesignWarning::NoFlow => Severity::Info,
            DesignWarning::TransitionalFlow => Severity::Advisory,
            DesignWarning::ExcessiveVelocity { .. } => Severity::High,
            DesignWarning::HighVelocity { .. } => Severity::Advisory,
        }
    }
}

impl fmt::Display for DesignWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesignWarning::NoFlow => write!(f, "Zero velocity: no flow"),
            DesignWarning::TransitionalFlow => write!(
                f,
                "Flow in critical transition zone. Results may be unstable."
            ),
            DesignWarning::ExcessiveVelocity { limit } => write!(
                f,
                "Excessive velocity (>{limit} m/s). Risk of erosion and noise."
            ),
            DesignWarning::HighVelocity { limit } => write!(
                f,
                "High velocity (>{limit} m/s). Consider erosion-resistant design."
            ),
        }
    }
}

impl DesignRules {
    /// Check that thresholds are positive, finite and ordered.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.advisory_velocity.is_finite() || self.advisory_velocity <= 0.0 {
            return Err("advisory_velocity must be positive and finite");
        }
        if !self.erosion_velocity.is_finite() || self.erosion_velocity <= 0.0 {
            return Err("erosion_velocity must be positive and finite");
        }
        if self.advisory_velocity >= self.erosion_velocity {
            return Err("advisory_velocity must be below erosion_velocity");
        }
        Ok(())
    }

    /// Warnings for a solved segment, regime warning first.
    ///
    /// A static segment carries exactly one warning. The velocity checks are
    /// exclusive of each other but additive with the transitional warning.
    pub fn check(&self, velocity: f64, regime: FlowRegime) -> Vec<DesignWarning> {
        if !regime.is_flowing() {
            return vec![DesignWarning::NoFlow];
        }

        let mut warnings = Vec::new();
        if regime == FlowRegime::Transitional {
            warnings.push(DesignWarning::TransitionalFlow);
        }

        if velocity > self.erosion_velocity {
            warnings.push(DesignWarning::ExcessiveVelocity {
                limit: self.erosion_velocity,
            });
        } else if velocity > self.advisory_velocity {
            warnings.push(DesignWarning::HighVelocity {
                limit: self.advisory_velocity,
            });
        }
        warnings
    }
}
