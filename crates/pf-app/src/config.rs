//! Service configuration.
//!
//! Loaded from YAML or JSON (chosen by file extension). Every section falls
//! back to its default when omitted, so an empty file is a valid config.

use crate::error::{AppError, AppResult};
use crate::limits::LimitTable;
use pf_fluids::Species;
use pf_hydraulics::{DesignRules, FrictionCorrelation, PipeOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "PIPEFLOW_CONFIG";

const DEFAULT_FLUIDS: [Species; 7] = [
    Species::Methane,
    Species::Water,
    Species::Ethane,
    Species::Hydrogen,
    Species::Nitrogen,
    Species::CarbonDioxide,
    Species::Propane,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CoolProp identifiers accepted in requests (exact match)
    pub supported_fluids: Vec<String>,
    pub limits: LimitTable,
    pub pipe: PipeOptions,
    pub design_rules: DesignRules,
    pub friction: FrictionCorrelation,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supported_fluids: DEFAULT_FLUIDS
                .iter()
                .map(|s| s.coolprop_name().to_string())
                .collect(),
            limits: LimitTable::default(),
            pipe: PipeOptions::default(),
            design_rules: DesignRules::default(),
            friction: FrictionCorrelation::default(),
        }
    }
}

impl AppConfig {
    /// Read and validate a config file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load from `PIPEFLOW_CONFIG` when set, else the defaults.
    pub fn from_env() -> AppResult<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        // An empty YAML document deserializes as unit, not as an empty map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: AppConfig =
            serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> AppResult<Self> {
        let config: AppConfig =
            serde_json::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(AppError::output)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.supported_fluids.is_empty() {
            return Err(AppError::Config(
                "supported_fluids must not be empty".to_string(),
            ));
        }
        if let Some(unknown) = self
            .supported_fluids
            .iter()
            .find(|name| Species::from_coolprop_name(name).is_none())
        {
            return Err(AppError::Config(format!("unknown fluid '{unknown}'")));
        }
        self.limits.validate().map_err(AppError::Config)?;
        self.pipe
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;
        self.design_rules
            .validate()
            .map_err(|what| AppError::Config(what.to_string()))?;
        Ok(())
    }

    pub fn supports(&self, fluid: &str) -> bool {
        self.supported_fluids.iter().any(|name| name == fluid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::InputField;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.supported_fluids.len(), 7);
        assert!(config.supports("CarbonDioxide"));
        assert!(!config.supports("methane"));
        assert_eq!(config.friction, FrictionCorrelation::Clamond);
    }

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(AppConfig::from_yaml_str("").unwrap(), AppConfig::default());
        assert_eq!(AppConfig::from_json_str("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_yaml_overrides_only_named_sections() {
        let yaml = "\
supported_fluids: [Water, Nitrogen]
friction: swamee_jain
pipe:
  roughness: 1.5e-6
limits:
  velocity: { minimum: 0.0, maximum: 30.0, unit: m/s }
";
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.supported_fluids, vec!["Water", "Nitrogen"]);
        assert_eq!(config.friction, FrictionCorrelation::SwameeJain);
        assert_eq!(config.pipe.roughness, 1.5e-6);
        assert_eq!(config.pipe.wall_thickness, 0.005);
        assert_eq!(config.limits.get(InputField::Velocity).unwrap().maximum, 30.0);
        assert_eq!(config.limits.get(InputField::Pressure).unwrap().maximum, 1e9);
        assert_eq!(config.design_rules, DesignRules::default());
    }

    #[test]
    fn rejects_unknown_fluid() {
        let err = AppConfig::from_yaml_str("supported_fluids: [Water, Unobtainium]").unwrap_err();
        assert!(matches!(err, AppError::Config(ref msg) if msg.contains("Unobtainium")));
    }

    #[test]
    fn rejects_empty_fluid_list() {
        assert!(AppConfig::from_yaml_str("supported_fluids: []").is_err());
    }

    #[test]
    fn rejects_non_positive_pipe_defaults() {
        assert!(AppConfig::from_yaml_str("pipe: { wall_thickness: 0.0 }").is_err());
    }

    #[test]
    fn yaml_round_trip() {
        let config = AppConfig::default();
        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(AppConfig::from_yaml_str(&yaml).unwrap(), config);
    }
}
