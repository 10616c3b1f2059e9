//! Calculation service: validation, engine run, rounding, error classification.

use crate::VERSION;
use crate::config::AppConfig;
use crate::error::{AppError, AppResult, ErrorKind};
use crate::input::CalculationInput;
use crate::limits::InputField;
use crate::validate::{InputRangeError, ValidatedInput, Violation, validate_input};
use pf_core::units::constants::{KELVIN_OFFSET, PA_PER_BAR};
use pf_fluids::{CoolPropModel, PropertyProvider, Species};
use pf_hydraulics::{
    CalculationResult, DarcyFriction, FrictionProvider, HydraulicEngine, PipeFlowSolution,
    Severity, SweepDefinition, velocity_sweep,
};
use serde::{Deserialize, Serialize};

/// Liveness report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub version: String,
    pub supported_fluids: Vec<String>,
}

/// One point of a velocity sweep.
#[derive(Debug)]
pub struct SweepRow {
    /// Velocity [m/s]
    pub velocity: f64,
    pub outcome: AppResult<CalculationResult>,
}

/// Stateless between calls; safe to share across threads.
pub struct CalculationService {
    config: AppConfig,
    properties: Box<dyn PropertyProvider>,
    friction: Box<dyn FrictionProvider>,
}

impl CalculationService {
    /// CoolProp properties and the configured friction correlation.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let friction = DarcyFriction::new(config.friction);
        Self::with_providers(config, Box::new(CoolPropModel::new()), Box::new(friction))
    }

    pub fn with_providers(
        config: AppConfig,
        properties: Box<dyn PropertyProvider>,
        friction: Box<dyn FrictionProvider>,
    ) -> AppResult<Self> {
        config.validate()?;
        if let Some(name) = config.supported_fluids.iter().find(|name| {
            Species::from_coolprop_name(name).is_none_or(|species| !properties.supports(species))
        }) {
            return Err(AppError::Config(format!(
                "property provider '{}' cannot serve fluid '{name}'",
                properties.name()
            )));
        }
        tracing::info!(
            fluids = ?config.supported_fluids,
            properties = properties.name(),
            friction = friction.name(),
            "Calculation service ready"
        );
        Ok(Self {
            config,
            properties,
            friction,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Validate, solve and round one request.
    pub fn calculate(&self, input: &CalculationInput) -> AppResult<CalculationResult> {
        self.solve(input).map(CalculationResult::from)
    }

    /// Same as [`calculate`](Self::calculate) without presentation rounding.
    pub fn solve(&self, input: &CalculationInput) -> AppResult<PipeFlowSolution> {
        let outcome = self.solve_validated(input);
        if let Err(err) = &outcome {
            log_failure(err);
        }
        outcome
    }

    fn solve_validated(&self, input: &CalculationInput) -> AppResult<PipeFlowSolution> {
        let validated = validate_input(input, &self.config)?;
        tracing::info!(
            fluid = %validated.conditions.species,
            pressure_bar = validated.conditions.pressure.value / PA_PER_BAR,
            temperature_c = validated.conditions.temperature.value - KELVIN_OFFSET,
            velocity = validated.conditions.velocity.value,
            "Calculating pressure drop"
        );

        let engine = self.engine(&validated)?;
        let solution = engine.solve(
            self.properties.as_ref(),
            self.friction.as_ref(),
            &validated.conditions,
        )?;

        tracing::info!(
            delta_p = solution.delta_p.value,
            reynolds = solution.reynolds,
            regime = %solution.regime,
            warnings = solution.warnings.len(),
            "Calculation complete"
        );
        for warning in &solution.warnings {
            match warning.severity() {
                Severity::High => tracing::warn!(%warning, "Design warning"),
                Severity::Advisory | Severity::Info => tracing::debug!(%warning, "Design note"),
            }
        }
        Ok(solution)
    }

    /// Solve `input` at every velocity of `sweep`.
    ///
    /// The request and the sweep bounds are validated up front; after that
    /// each point succeeds or fails on its own.
    pub fn sweep_velocity(
        &self,
        input: &CalculationInput,
        sweep: &SweepDefinition,
    ) -> AppResult<Vec<SweepRow>> {
        let prepared = self.prepare_sweep(input, sweep);
        let (validated, engine) = match prepared {
            Ok(prepared) => prepared,
            Err(err) => {
                log_failure(&err);
                return Err(err);
            }
        };

        tracing::info!(
            fluid = %validated.conditions.species,
            sweep = %sweep,
            "Running velocity sweep"
        );
        let points = velocity_sweep(
            &engine,
            self.properties.as_ref(),
            self.friction.as_ref(),
            &validated.conditions,
            &sweep.generate_points(),
        );

        let rows: Vec<SweepRow> = points
            .into_iter()
            .map(|point| {
                let outcome = point
                    .outcome
                    .map(CalculationResult::from)
                    .map_err(AppError::from);
                if let Err(err) = &outcome {
                    log_failure(err);
                }
                SweepRow {
                    velocity: point.velocity,
                    outcome,
                }
            })
            .collect();

        let failed = rows.iter().filter(|row| row.outcome.is_err()).count();
        tracing::info!(points = rows.len(), failed, "Velocity sweep complete");
        Ok(rows)
    }

    fn prepare_sweep(
        &self,
        input: &CalculationInput,
        sweep: &SweepDefinition,
    ) -> AppResult<(ValidatedInput, HydraulicEngine)> {
        let validated = validate_input(input, &self.config)?;
        if let Some(limit) = self.config.limits.get(InputField::Velocity) {
            let violations: Vec<Violation> = [sweep.start(), sweep.end()]
                .into_iter()
                .filter(|v| !limit.contains(*v))
                .map(|value| Violation::OutOfRange {
                    field: InputField::Velocity,
                    value,
                    limit: limit.clone(),
                })
                .collect();
            if !violations.is_empty() {
                return Err(InputRangeError { violations }.into());
            }
        }
        let engine = self.engine(&validated)?;
        Ok((validated, engine))
    }

    fn engine(&self, validated: &ValidatedInput) -> AppResult<HydraulicEngine> {
        let engine =
            HydraulicEngine::new(validated.outer_diameter, validated.length, &validated.pipe)?
                .with_rules(self.config.design_rules);
        tracing::trace!(
            internal_diameter = engine.geometry().internal_diameter().value,
            length = engine.length().value,
            relative_roughness = engine.geometry().relative_roughness(),
            "Pipe geometry"
        );
        Ok(engine)
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            status: "healthy".to_string(),
            version: VERSION.to_string(),
            supported_fluids: self.config.supported_fluids.clone(),
        }
    }
}

fn log_failure(err: &AppError) {
    match err.kind() {
        ErrorKind::Client => tracing::warn!(error = %err, "Rejected calculation"),
        ErrorKind::Server => tracing::error!(error = %err, "Calculation failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_fluids::FixedPropertyModel;
    use pf_hydraulics::friction::{FrictionError, FrictionResult};
    use pf_hydraulics::{FlowRegime, SweepSpacing};

    struct NanFriction;

    impl FrictionProvider for NanFriction {
        fn name(&self) -> &str {
            "nan"
        }

        fn darcy_friction_factor(&self, reynolds: f64, _: f64) -> FrictionResult<f64> {
            Err(FrictionError::InvalidReynolds { reynolds })
        }
    }

    fn water_service() -> CalculationService {
        CalculationService::with_providers(
            AppConfig::default(),
            Box::new(FixedPropertyModel::water_like()),
            Box::new(DarcyFriction::default()),
        )
        .unwrap()
    }

    fn water_input(velocity: f64) -> CalculationInput {
        CalculationInput::new("Water", 3.0e5, 293.15, 0.1, velocity)
    }

    #[test]
    fn calculates_rounded_result() {
        let result = water_service().calculate(&water_input(1.5)).unwrap();
        assert_eq!(result.internal_diameter, 0.09);
        assert_eq!(result.density, 997.0);
        assert_eq!(result.viscosity, 8.9e-4);
        assert_eq!(result.regime, FlowRegime::Turbulent);
        assert!(result.delta_p > 0.0);
        assert_eq!(result.delta_p, (result.delta_p * 100.0).round() / 100.0);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn zero_velocity_is_static() {
        let result = water_service().calculate(&water_input(0.0)).unwrap();
        assert_eq!(result.regime, FlowRegime::Static);
        assert_eq!(result.delta_p, 0.0);
        assert_eq!(result.reynolds, 0);
        assert_eq!(result.friction_factor, 0.0);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn range_error_is_client_error() {
        let input = CalculationInput::new("Water", 5.0e2, 300.0, 0.1, 1.0);
        let err = water_service().calculate(&input).unwrap_err();
        assert!(matches!(err, AppError::InputRange(ref e) if e.names("pressure")));
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn thin_pipe_is_geometry_error() {
        let input = CalculationInput::new("Water", 3.0e5, 293.15, 0.005, 1.0);
        let err = water_service().calculate(&input).unwrap_err();
        assert!(matches!(err, AppError::Geometry(_)));
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn invalid_override_is_geometry_error() {
        let input = water_input(1.0).with_roughness(0.0);
        let err = water_service().calculate(&input).unwrap_err();
        assert!(matches!(err, AppError::Geometry(_)));
    }

    #[test]
    fn provider_failure_is_property_lookup() {
        let service = CalculationService::with_providers(
            AppConfig::default(),
            Box::new(FixedPropertyModel::failing("state outside table")),
            Box::new(DarcyFriction::default()),
        )
        .unwrap();
        let err = service.calculate(&water_input(1.0)).unwrap_err();
        assert!(matches!(err, AppError::PropertyLookup(_)));
        let response = err.to_response();
        assert_eq!(response.status, 422);
        assert!(response.detail.contains("state outside table"));
        assert!(response.detail.contains("Water"));
    }

    #[test]
    fn friction_failure_is_server_error() {
        let service = CalculationService::with_providers(
            AppConfig::default(),
            Box::new(FixedPropertyModel::water_like()),
            Box::new(NanFriction),
        )
        .unwrap();
        let err = service.calculate(&water_input(1.0)).unwrap_err();
        assert!(matches!(err, AppError::FrictionComputation(_)));
        let response = err.to_response();
        assert_eq!(response.status, 500);
        assert!(!response.detail.contains("nan"));
    }

    #[test]
    fn static_pipe_skips_friction_provider() {
        let service = CalculationService::with_providers(
            AppConfig::default(),
            Box::new(FixedPropertyModel::water_like()),
            Box::new(NanFriction),
        )
        .unwrap();
        assert!(service.calculate(&water_input(0.0)).is_ok());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = AppConfig {
            supported_fluids: Vec::new(),
            ..AppConfig::default()
        };
        let err = CalculationService::with_providers(
            config,
            Box::new(FixedPropertyModel::water_like()),
            Box::new(DarcyFriction::default()),
        )
        .err()
        .unwrap();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn provider_must_serve_every_configured_fluid() {
        let err = CalculationService::with_providers(
            AppConfig::default(),
            Box::new(FixedPropertyModel::water_like().only(&[Species::Water])),
            Box::new(DarcyFriction::default()),
        )
        .err()
        .unwrap();
        assert!(matches!(err, AppError::Config(ref msg) if msg.contains("'Fixed'")));
        assert_eq!(err.status_code(), 500);

        let config = AppConfig {
            supported_fluids: vec!["Water".to_string()],
            ..AppConfig::default()
        };
        let service = CalculationService::with_providers(
            config,
            Box::new(FixedPropertyModel::water_like().only(&[Species::Water])),
            Box::new(DarcyFriction::default()),
        )
        .unwrap();
        assert!(service.calculate(&water_input(1.0)).is_ok());
    }

    #[test]
    fn health_lists_configured_fluids() {
        let health = water_service().health();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, VERSION);
        assert_eq!(health.supported_fluids, AppConfig::default().supported_fluids);
    }

    #[test]
    fn sweep_keeps_order() {
        let sweep = SweepDefinition::new(0.0, 4.0, 5, SweepSpacing::Linear).unwrap();
        let rows = water_service()
            .sweep_velocity(&water_input(1.0), &sweep)
            .unwrap();
        let velocities: Vec<f64> = rows.iter().map(|r| r.velocity).collect();
        assert_eq!(velocities, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        let drops: Vec<f64> = rows
            .iter()
            .map(|r| r.outcome.as_ref().unwrap().delta_p)
            .collect();
        assert!(drops.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn sweep_bounds_respect_velocity_limit() {
        let sweep = SweepDefinition::new(1.0, 150.0, 4, SweepSpacing::Linear).unwrap();
        let err = water_service()
            .sweep_velocity(&water_input(1.0), &sweep)
            .unwrap_err();
        assert!(matches!(err, AppError::InputRange(ref e) if e.fields() == vec!["velocity"]));
    }
}
