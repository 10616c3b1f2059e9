//! Flow regime classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound (exclusive) of the laminar band.
pub const LAMINAR_LIMIT_RE: f64 = 2300.0;

/// Lower bound (inclusive) of the turbulent band.
pub const TURBULENT_ONSET_RE: f64 = 4000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowRegime {
    /// Zero velocity. Only produced by the no-flow branch, never by `classify`.
    Static,
    Laminar,
    Transitional,
    Turbulent,
}

impl FlowRegime {
    /// Classify a Reynolds number into non-overlapping bands:
    /// `[0, 2300)` laminar, `[2300, 4000)` transitional, `[4000, ∞)` turbulent.
    pub fn classify(reynolds: f64) -> Self {
        if reynolds < LAMINAR_LIMIT_RE {
            FlowRegime::Laminar
        } else if reynolds < TURBULENT_ONSET_RE {
            FlowRegime::Transitional
        } else {
            FlowRegime::Turbulent
        }
    }

    pub fn is_flowing(&self) -> bool {
        !matches!(self, FlowRegime::Static)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FlowRegime::Static => "Static",
            FlowRegime::Laminar => "Laminar",
            FlowRegime::Transitional => "Transitional",
            FlowRegime::Turbulent => "Turbulent",
        }
    }
}

impl fmt::Display for FlowRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
