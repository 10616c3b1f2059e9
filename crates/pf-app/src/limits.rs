//! Physical range table for calculation inputs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Numeric request fields subject to a physical range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    Pressure,
    Temperature,
    OuterDiameter,
    Velocity,
    Length,
    FittingsK,
}

impl InputField {
    pub const ALL: [InputField; 6] = [
        InputField::Pressure,
        InputField::Temperature,
        InputField::OuterDiameter,
        InputField::Velocity,
        InputField::Length,
        InputField::FittingsK,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::Pressure => "pressure",
            InputField::Temperature => "temperature",
            InputField::OuterDiameter => "outer_diameter",
            InputField::Velocity => "velocity",
            InputField::Length => "length",
            InputField::FittingsK => "fittings_k",
        }
    }

    /// Whether zero is a physically meaningful value (a static pipe, no fittings).
    pub fn admits_zero(&self) -> bool {
        matches!(self, InputField::Velocity | InputField::FittingsK)
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed interval with its unit label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalLimit {
    pub minimum: f64,
    pub maximum: f64,
    pub unit: String,
}

impl PhysicalLimit {
    pub fn new(minimum: f64, maximum: f64, unit: impl Into<String>) -> Self {
        Self {
            minimum,
            maximum,
            unit: unit.into(),
        }
    }

    /// Inclusive on both ends; NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        (self.minimum..=self.maximum).contains(&value)
    }
}

impl fmt::Display for PhysicalLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] {}", self.minimum, self.maximum, self.unit)
    }
}

/// Field → limit mapping.
///
/// Deserializing a partial map keeps the defaults for fields it leaves out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<InputField, PhysicalLimit>",
    into = "BTreeMap<InputField, PhysicalLimit>"
)]
pub struct LimitTable {
    limits: BTreeMap<InputField, PhysicalLimit>,
}

impl Default for LimitTable {
    fn default() -> Self {
        let limits = BTreeMap::from([
            (InputField::Pressure, PhysicalLimit::new(1e3, 1e9, "Pa")),
            (InputField::Temperature, PhysicalLimit::new(100.0, 1000.0, "K")),
            (InputField::OuterDiameter, PhysicalLimit::new(0.001, 10.0, "m")),
            (InputField::Velocity, PhysicalLimit::new(0.0, 100.0, "m/s")),
            (InputField::Length, PhysicalLimit::new(0.1, 100_000.0, "m")),
            (InputField::FittingsK, PhysicalLimit::new(0.0, 1000.0, "-")),
        ]);
        Self { limits }
    }
}

impl From<BTreeMap<InputField, PhysicalLimit>> for LimitTable {
    fn from(overrides: BTreeMap<InputField, PhysicalLimit>) -> Self {
        let mut table = LimitTable::default();
        table.limits.extend(overrides);
        table
    }
}

impl From<LimitTable> for BTreeMap<InputField, PhysicalLimit> {
    fn from(table: LimitTable) -> Self {
        table.limits
    }
}

impl LimitTable {
    pub fn get(&self, field: InputField) -> Option<&PhysicalLimit> {
        self.limits.get(&field)
    }

    pub fn set(&mut self, field: InputField, limit: PhysicalLimit) {
        self.limits.insert(field, limit);
    }

    pub fn iter(&self) -> impl Iterator<Item = (InputField, &PhysicalLimit)> {
        self.limits.iter().map(|(field, limit)| (*field, limit))
    }

    /// Check bounds are finite, ordered and physically signed for every field.
    pub fn validate(&self) -> Result<(), String> {
        for field in InputField::ALL {
            let limit = self
                .get(field)
                .ok_or_else(|| format!("missing limit for {field}"))?;
            if !limit.minimum.is_finite() || !limit.maximum.is_finite() {
                return Err(format!("limit for {field} must be finite"));
            }
            if limit.minimum > limit.maximum {
                return Err(format!(
                    "limit for {field} has minimum {} above maximum {}",
                    limit.minimum, limit.maximum
                ));
            }
            let signed = if field.admits_zero() {
                limit.minimum >= 0.0
            } else {
                limit.minimum > 0.0
            };
            if !signed {
                let bound = if field.admits_zero() { ">= 0" } else { "> 0" };
                return Err(format!(
                    "limit for {field} has minimum {}, must be {bound}",
                    limit.minimum
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_every_field() {
        let table = LimitTable::default();
        assert!(table.validate().is_ok());
        assert_eq!(table.iter().count(), InputField::ALL.len());
        let pressure = table.get(InputField::Pressure).unwrap();
        assert_eq!(pressure.minimum, 1e3);
        assert_eq!(pressure.maximum, 1e9);
        assert_eq!(pressure.unit, "Pa");
    }

    #[test]
    fn limits_are_inclusive() {
        let limit = PhysicalLimit::new(0.0, 100.0, "m/s");
        assert!(limit.contains(0.0));
        assert!(limit.contains(100.0));
        assert!(!limit.contains(-1e-12));
        assert!(!limit.contains(f64::NAN));
        assert!(!limit.contains(f64::INFINITY));
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let yaml = "velocity: { minimum: 0.0, maximum: 40.0, unit: m/s }\n";
        let table: LimitTable = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(table.get(InputField::Velocity).unwrap().maximum, 40.0);
        assert_eq!(table.get(InputField::Temperature).unwrap().maximum, 1000.0);
    }

    #[test]
    fn serializes_with_field_names() {
        let json = serde_json::to_value(LimitTable::default()).unwrap();
        assert_eq!(json["outer_diameter"]["unit"], "m");
        assert_eq!(json["fittings_k"]["maximum"], 1000.0);
    }

    #[test]
    fn rejects_inverted_bounds() {
        let mut table = LimitTable::default();
        table.set(InputField::Length, PhysicalLimit::new(10.0, 1.0, "m"));
        assert!(table.validate().unwrap_err().contains("length"));
    }

    #[test]
    fn rejects_unphysical_minimums() {
        let mut table = LimitTable::default();
        table.set(InputField::Velocity, PhysicalLimit::new(-5.0, 100.0, "m/s"));
        let err = table.validate().unwrap_err();
        assert!(err.contains("velocity") && err.contains(">= 0"), "{err}");

        let mut table = LimitTable::default();
        table.set(InputField::Pressure, PhysicalLimit::new(0.0, 1e9, "Pa"));
        let err = table.validate().unwrap_err();
        assert!(err.contains("pressure") && err.contains("> 0"), "{err}");

        let mut table = LimitTable::default();
        table.set(InputField::FittingsK, PhysicalLimit::new(0.0, 10.0, "-"));
        assert!(table.validate().is_ok());
    }
}
