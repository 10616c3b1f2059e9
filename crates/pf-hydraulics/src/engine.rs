//! Hydraulic engine: extended Darcy-Weisbach on a single straight pipe.

use crate::common::{check_finite, check_positive, velocity_head};
use crate::error::{HydraulicError, HydraulicResult};
use crate::friction::FrictionProvider;
use crate::geometry::{PipeGeometry, PipeOptions};
use crate::regime::FlowRegime;
use crate::rules::DesignRules;
use crate::solution::PipeFlowSolution;
use pf_core::units::{Length, Pressure, Temperature, Velocity, pa};
use pf_fluids::{FluidState, PropertyProvider, Species};

/// Reynolds number below which a flowing pipe is reported as static.
///
/// Under this the laminar friction factor overflows while the pressure drop
/// is zero at f64 precision for any pipe the limits allow.
pub const NEGLIGIBLE_FLOW_RE: f64 = 1.0e-300;

/// Fluid state and flow for one calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowConditions {
    pub species: Species,
    pub pressure: Pressure,
    pub temperature: Temperature,
    pub velocity: Velocity,
    /// Sum of fitting loss coefficients (dimensionless)
    pub fittings_k: f64,
}

/// Pipe segment with its derived geometry.
///
/// Holds no state between calls; `solve` is a pure function of the segment,
/// the conditions and the providers.
#[derive(Debug, Clone)]
pub struct HydraulicEngine {
    geometry: PipeGeometry,
    length: Length,
    rules: DesignRules,
}

impl HydraulicEngine {
    /// Build a segment from its outer diameter and length.
    ///
    /// Fails with `HydraulicError::Geometry` when the wall leaves no bore.
    pub fn new(
        outer_diameter: Length,
        length: Length,
        options: &PipeOptions,
    ) -> HydraulicResult<Self> {
        let geometry = PipeGeometry::new(outer_diameter, options)?;
        check_positive(length.value, "length").map_err(|_| HydraulicError::InvalidPipe {
            what: "length must be positive and finite",
        })?;
        Ok(Self {
            geometry,
            length,
            rules: DesignRules::default(),
        })
    }

    pub fn with_rules(mut self, rules: DesignRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn geometry(&self) -> &PipeGeometry {
        &self.geometry
    }

    pub fn length(&self) -> Length {
        self.length
    }

    /// Run property lookup, Reynolds number, regime, friction factor, pressure
    /// drop and design checks.
    pub fn solve(
        &self,
        properties: &dyn PropertyProvider,
        friction: &dyn FrictionProvider,
        conditions: &FlowConditions,
    ) -> HydraulicResult<PipeFlowSolution> {
        let v = conditions.velocity.value;
        let k_total = conditions.fittings_k;
        if !v.is_finite() || v < 0.0 {
            return Err(HydraulicError::NonPhysical {
                what: "velocity must be non-negative and finite",
            });
        }
        if !k_total.is_finite() || k_total < 0.0 {
            return Err(HydraulicError::NonPhysical {
                what: "fittings K must be non-negative and finite",
            });
        }

        let fluid = properties
            .fluid_state(
                conditions.species,
                conditions.pressure,
                conditions.temperature,
            )
            .map_err(|e| HydraulicError::PropertyLookup {
                fluid: conditions.species.coolprop_name().to_string(),
                message: e.to_string(),
            })?;

        let rho = fluid.density().value;
        let mu = fluid.viscosity().value;
        let d = self.geometry.internal_diameter().value;

        if v == 0.0 {
            tracing::debug!(fluid = %conditions.species, rho, mu, "static pipe, skipping friction");
            return Ok(self.static_solution(fluid, 0.0));
        }

        let reynolds = check_finite(rho * v * d / mu, "Reynolds number")?;
        if reynolds < NEGLIGIBLE_FLOW_RE {
            tracing::debug!(fluid = %conditions.species, reynolds, "negligible flow, treated as static");
            return Ok(self.static_solution(fluid, reynolds));
        }
        let regime = FlowRegime::classify(reynolds);

        let f = friction
            .darcy_friction_factor(reynolds, self.geometry.relative_roughness())
            .map_err(|e| HydraulicError::FrictionComputation {
                message: format!("{} (Re = {:e}): {}", friction.name(), reynolds, e),
            })?;

        // ΔP = (f*L/D + K) * 0.5 * rho * v^2, with f*head formed first
        let head = velocity_head(rho, v);
        let dp = check_finite(
            f * head * (self.length.value / d) + k_total * head,
            "pressure drop",
        )?;

        tracing::debug!(
            fluid = %conditions.species,
            rho,
            mu,
            reynolds,
            friction_factor = f,
            delta_p = dp,
            %regime,
            "pipe solved"
        );

        Ok(PipeFlowSolution {
            fluid,
            internal_diameter: self.geometry.internal_diameter(),
            reynolds,
            friction_factor: f,
            delta_p: pa(dp),
            regime,
            warnings: self.rules.check(v, regime),
        })
    }

    fn static_solution(&self, fluid: FluidState, reynolds: f64) -> PipeFlowSolution {
        PipeFlowSolution {
            fluid,
            internal_diameter: self.geometry.internal_diameter(),
            reynolds,
            friction_factor: 0.0,
            delta_p: pa(0.0),
            regime: FlowRegime::Static,
            warnings: self.rules.check(0.0, FlowRegime::Static),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::friction::{DarcyFriction, FrictionError, FrictionResult};
    use crate::rules::DesignWarning;
    use pf_core::units::{k, m, mps};
    use pf_fluids::FixedPropertyModel;

    fn water_conditions(velocity: f64, fittings_k: f64) -> FlowConditions {
        FlowConditions {
            species: Species::Water,
            pressure: pa(2.0e5),
            temperature: k(298.15),
            velocity: mps(velocity),
            fittings_k,
        }
    }

    fn engine(outer_diameter: f64, length: f64) -> HydraulicEngine {
        HydraulicEngine::new(m(outer_diameter), m(length), &PipeOptions::default()).unwrap()
    }

    /// Always returns the same f, records nothing.
    struct ConstantFriction(f64);

    impl FrictionProvider for ConstantFriction {
        fn name(&self) -> &str {
            "constant"
        }

        fn darcy_friction_factor(&self, _re: f64, _ed: f64) -> FrictionResult<f64> {
            Ok(self.0)
        }
    }

    struct BrokenFriction;

    impl FrictionProvider for BrokenFriction {
        fn name(&self) -> &str {
            "broken"
        }

        fn darcy_friction_factor(&self, reynolds: f64, _ed: f64) -> FrictionResult<f64> {
            Err(FrictionError::InvalidReynolds { reynolds })
        }
    }

    #[test]
    fn darcy_weisbach_with_fittings() {
        // rho=1000, mu=1e-3, D=0.1, v=1 -> Re=1e5; f fixed at 0.02
        let props = FixedPropertyModel::new(1000.0, 1.0e-3);
        let engine = engine(0.11, 50.0);
        let solution = engine
            .solve(&props, &ConstantFriction(0.02), &water_conditions(1.0, 2.0))
            .unwrap();

        // (0.02 * 50/0.1 + 2) * 500 = 12 * 500
        assert!((solution.delta_p.value - 6000.0).abs() < 1e-6);
        assert!((solution.reynolds - 1.0e5).abs() < 1e-6);
        assert_eq!(solution.regime, FlowRegime::Turbulent);
        assert!(solution.warnings.is_empty());
    }

    #[test]
    fn zero_velocity_short_circuits() {
        let props = FixedPropertyModel::water_like();
        let solution = engine(0.12, 100.0)
            .solve(&props, &BrokenFriction, &water_conditions(0.0, 5.0))
            .unwrap();

        assert_eq!(solution.delta_p.value, 0.0);
        assert_eq!(solution.reynolds, 0.0);
        assert_eq!(solution.friction_factor, 0.0);
        assert_eq!(solution.regime, FlowRegime::Static);
        assert_eq!(solution.warnings, vec![DesignWarning::NoFlow]);
        assert_eq!(solution.fluid.density().value, 997.0);
    }

    #[test]
    fn negligible_flow_is_static_not_a_failure() {
        // v = 1e-310 gives Re ~ 1e-307, where 64/Re overflows
        let props = FixedPropertyModel::new(1000.0, 1.0e-3);
        let solution = engine(0.011, 1.0e5)
            .solve(&props, &DarcyFriction::default(), &water_conditions(1.0e-310, 0.0))
            .unwrap();
        assert_eq!(solution.regime, FlowRegime::Static);
        assert_eq!(solution.delta_p.value, 0.0);
        assert_eq!(solution.friction_factor, 0.0);
        assert_eq!(solution.warnings, vec![DesignWarning::NoFlow]);
    }

    #[test]
    fn creeping_flow_stays_laminar() {
        // Re = 1e3 * 1e-9 * 1e-3 / 1e-3 = 1e-6
        let props = FixedPropertyModel::new(1000.0, 1.0e-3);
        let solution = engine(0.011, 1.0e5)
            .solve(&props, &DarcyFriction::default(), &water_conditions(1.0e-9, 0.0))
            .unwrap();
        assert_eq!(solution.regime, FlowRegime::Laminar);
        assert!(solution.delta_p.value > 0.0);
        assert!(solution.delta_p.value.is_finite());
    }

    #[test]
    fn transitional_flow_warns() {
        // Re = 1000 * v * 0.1 / 1e-3 = 1e5 * v; v=0.03 -> Re=3000
        let props = FixedPropertyModel::new(1000.0, 1.0e-3);
        let solution = engine(0.11, 10.0)
            .solve(&props, &DarcyFriction::default(), &water_conditions(0.03, 0.0))
            .unwrap();
        assert_eq!(solution.regime, FlowRegime::Transitional);
        assert_eq!(solution.warnings, vec![DesignWarning::TransitionalFlow]);
    }

    #[test]
    fn laminar_flow_uses_poiseuille() {
        // Re = 1e5 * 0.01 = 1000 -> f = 0.064
        let props = FixedPropertyModel::new(1000.0, 1.0e-3);
        let solution = engine(0.11, 10.0)
            .solve(&props, &DarcyFriction::default(), &water_conditions(0.01, 0.0))
            .unwrap();
        assert_eq!(solution.regime, FlowRegime::Laminar);
        assert!((solution.friction_factor - 0.064).abs() < 1e-12);
    }

    #[test]
    fn property_failure_is_reported_with_fluid() {
        let props = FixedPropertyModel::failing("state is in two-phase region");
        let err = engine(0.12, 100.0)
            .solve(&props, &DarcyFriction::default(), &water_conditions(1.0, 0.0))
            .unwrap_err();
        assert_eq!(
            err,
            HydraulicError::PropertyLookup {
                fluid: "Water".into(),
                message: "Backend error: state is in two-phase region".into(),
            }
        );
    }

    #[test]
    fn friction_failure_is_a_computation_error() {
        let props = FixedPropertyModel::water_like();
        let err = engine(0.12, 100.0)
            .solve(&props, &BrokenFriction, &water_conditions(1.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, HydraulicError::FrictionComputation { .. }));
    }

    #[test]
    fn friction_failure_reports_reynolds_in_scientific_notation() {
        // Re = 997 * 1 * 0.11 / 8.9e-4 ~ 1.23e5
        let props = FixedPropertyModel::water_like();
        let err = engine(0.12, 100.0)
            .solve(&props, &BrokenFriction, &water_conditions(1.0, 0.0))
            .unwrap_err();
        let HydraulicError::FrictionComputation { message } = err else {
            panic!("expected friction error, got {err:?}");
        };
        assert!(message.starts_with("broken (Re = 1.23"), "{message}");
        assert!(message.contains("e5)"), "{message}");
        assert!(message.len() < 160, "{message}");
    }

    #[test]
    fn high_velocity_warning() {
        let props = FixedPropertyModel::new(50.0, 1.2e-5);
        let solution = engine(0.12, 100.0)
            .solve(&props, &DarcyFriction::default(), &water_conditions(20.0, 0.0))
            .unwrap();
        assert_eq!(
            solution.warnings,
            vec![DesignWarning::HighVelocity { limit: 15.0 }]
        );
    }

    #[test]
    fn custom_rules_apply() {
        let props = FixedPropertyModel::new(50.0, 1.2e-5);
        let rules = DesignRules {
            erosion_velocity: 10.0,
            advisory_velocity: 5.0,
        };
        let solution = engine(0.12, 100.0)
            .with_rules(rules)
            .solve(&props, &DarcyFriction::default(), &water_conditions(12.0, 0.0))
            .unwrap();
        assert_eq!(
            solution.warnings,
            vec![DesignWarning::ExcessiveVelocity { limit: 10.0 }]
        );
    }

    #[test]
    fn rejects_negative_velocity_and_k() {
        let props = FixedPropertyModel::water_like();
        let e = engine(0.12, 100.0);
        assert!(matches!(
            e.solve(&props, &DarcyFriction::default(), &water_conditions(-1.0, 0.0)),
            Err(HydraulicError::NonPhysical { .. })
        ));
        assert!(matches!(
            e.solve(&props, &DarcyFriction::default(), &water_conditions(1.0, -0.5)),
            Err(HydraulicError::NonPhysical { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_length() {
        let err = HydraulicEngine::new(m(0.12), m(0.0), &PipeOptions::default()).unwrap_err();
        assert!(matches!(err, HydraulicError::InvalidPipe { .. }));
    }

    #[test]
    fn geometry_error_surfaces_from_constructor() {
        let err = HydraulicEngine::new(m(0.005), m(100.0), &PipeOptions::default()).unwrap_err();
        assert!(matches!(err, HydraulicError::Geometry { .. }));
    }
}
