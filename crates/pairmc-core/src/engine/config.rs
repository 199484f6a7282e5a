use crate::core::forcefield::params::{
    PmfParams, PotentialModel, PotentialParams, SimulationParams,
};
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}

#[derive(Default)]
pub struct PotentialParamsBuilder {
    model: Option<PotentialModel>,
    bjerrum_length: Option<f64>,
    epsilon: Option<f64>,
    inverse_debye_length: Option<f64>,
}

impl PotentialParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn model(mut self, model: PotentialModel) -> Self {
        self.model = Some(model);
        self
    }
    pub fn bjerrum_length(mut self, length: f64) -> Self {
        self.bjerrum_length = Some(length);
        self
    }
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }
    pub fn inverse_debye_length(mut self, kappa: f64) -> Self {
        self.inverse_debye_length = Some(kappa);
        self
    }

    /// `epsilon` defaults to zero; the screening constant is only required for Debye-Hückel.
    pub fn build(self) -> Result<PotentialParams, ConfigError> {
        let model = self.model.ok_or(ConfigError::MissingParameter("model"))?;
        let inverse_debye_length = match model {
            PotentialModel::DebyeHuckel => self
                .inverse_debye_length
                .ok_or(ConfigError::MissingParameter("inverse_debye_length"))?,
            _ => self.inverse_debye_length.unwrap_or(0.0),
        };
        let params = PotentialParams {
            model,
            bjerrum_length: self
                .bjerrum_length
                .ok_or(ConfigError::MissingParameter("bjerrum_length"))?,
            epsilon: self.epsilon.unwrap_or(0.0),
            inverse_debye_length,
        };
        validate_potential(&params)?;
        Ok(params)
    }
}

#[derive(Default)]
pub struct PmfParamsBuilder {
    directory: Option<PathBuf>,
    resolution: Option<f64>,
    missing_penalty: Option<f64>,
}

impl PmfParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.directory = Some(directory);
        self
    }
    pub fn resolution(mut self, resolution: f64) -> Self {
        self.resolution = Some(resolution);
        self
    }
    pub fn missing_penalty(mut self, penalty: f64) -> Self {
        self.missing_penalty = Some(penalty);
        self
    }

    pub fn build(self) -> Result<PmfParams, ConfigError> {
        let defaults = PmfParams::default();
        let params = PmfParams {
            directory: self.directory.unwrap_or(defaults.directory),
            resolution: self.resolution.unwrap_or(defaults.resolution),
            missing_penalty: self.missing_penalty.unwrap_or(defaults.missing_penalty),
        };
        validate_pmf(&params)?;
        Ok(params)
    }
}

pub fn validate_potential(params: &PotentialParams) -> Result<(), ConfigError> {
    if !(params.bjerrum_length.is_finite() && params.bjerrum_length > 0.0) {
        return Err(invalid(
            "bjerrum_length",
            format!("must be positive, got {}", params.bjerrum_length),
        ));
    }
    if !(params.epsilon.is_finite() && params.epsilon >= 0.0) {
        return Err(invalid(
            "epsilon",
            format!("must be non-negative, got {}", params.epsilon),
        ));
    }
    if params.model == PotentialModel::DebyeHuckel
        && !(params.inverse_debye_length.is_finite() && params.inverse_debye_length > 0.0)
    {
        return Err(invalid(
            "inverse_debye_length",
            format!(
                "must be positive for debye-huckel, got {}",
                params.inverse_debye_length
            ),
        ));
    }
    Ok(())
}

pub fn validate_pmf(params: &PmfParams) -> Result<(), ConfigError> {
    if !(params.resolution.is_finite() && params.resolution > 0.0) {
        return Err(invalid(
            "resolution",
            format!("must be positive, got {}", params.resolution),
        ));
    }
    if !params.missing_penalty.is_finite() {
        return Err(invalid("missing_penalty", "must be finite"));
    }
    Ok(())
}

/// Checks a loaded parameter file before anything is built from it.
pub fn validate(params: &SimulationParams) -> Result<(), ConfigError> {
    validate_potential(&params.potential)?;
    if let Some(pmf) = &params.pmf {
        validate_pmf(pmf)?;
    }
    if !(params.drift.tolerance.is_finite() && params.drift.tolerance > 0.0) {
        return Err(invalid(
            "tolerance",
            format!("must be positive, got {}", params.drift.tolerance),
        ));
    }

    let mut seen = HashSet::new();
    for species in &params.species {
        if species.name.is_empty() {
            return Err(invalid("species", "species name must not be empty"));
        }
        if !seen.insert(species.name.as_str()) {
            return Err(invalid(
                "species",
                format!("duplicate species '{}'", species.name),
            ));
        }
        if species.radius < 0.0 {
            return Err(invalid(
                "species",
                format!("negative radius for '{}'", species.name),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::params::{DEFAULT_MISSING_PENALTY, DriftParams};
    use crate::core::models::species::Species;

    fn coulomb_params() -> PotentialParams {
        PotentialParamsBuilder::new()
            .model(PotentialModel::Coulomb)
            .bjerrum_length(7.1)
            .epsilon(0.2)
            .build()
            .unwrap()
    }

    #[test]
    fn builder_fills_optional_values() {
        let params = PotentialParamsBuilder::new()
            .model(PotentialModel::LennardJones)
            .bjerrum_length(7.1)
            .build()
            .unwrap();
        assert_eq!(params.epsilon, 0.0);
        assert_eq!(params.inverse_debye_length, 0.0);
    }

    #[test]
    fn builder_reports_missing_model_and_bjerrum_length() {
        let err = PotentialParamsBuilder::new().bjerrum_length(7.1).build();
        assert_eq!(err, Err(ConfigError::MissingParameter("model")));

        let err = PotentialParamsBuilder::new()
            .model(PotentialModel::Coulomb)
            .build();
        assert_eq!(err, Err(ConfigError::MissingParameter("bjerrum_length")));
    }

    #[test]
    fn debye_huckel_requires_screening_constant() {
        let err = PotentialParamsBuilder::new()
            .model(PotentialModel::DebyeHuckel)
            .bjerrum_length(7.1)
            .build();
        assert_eq!(
            err,
            Err(ConfigError::MissingParameter("inverse_debye_length"))
        );

        let err = PotentialParamsBuilder::new()
            .model(PotentialModel::DebyeHuckel)
            .bjerrum_length(7.1)
            .inverse_debye_length(-0.1)
            .build();
        assert!(matches!(
            err,
            Err(ConfigError::InvalidParameter {
                name: "inverse_debye_length",
                ..
            })
        ));
    }

    #[test]
    fn non_positive_bjerrum_length_is_invalid() {
        let err = PotentialParamsBuilder::new()
            .model(PotentialModel::Coulomb)
            .bjerrum_length(0.0)
            .build();
        assert!(matches!(
            err,
            Err(ConfigError::InvalidParameter {
                name: "bjerrum_length",
                ..
            })
        ));
    }

    #[test]
    fn pmf_builder_uses_defaults() {
        let params = PmfParamsBuilder::new().resolution(0.1).build().unwrap();
        assert_eq!(params.resolution, 0.1);
        assert_eq!(params.missing_penalty, DEFAULT_MISSING_PENALTY);
        assert_eq!(params.directory, PathBuf::from("./"));

        let err = PmfParamsBuilder::new().resolution(0.0).build();
        assert!(matches!(
            err,
            Err(ConfigError::InvalidParameter {
                name: "resolution",
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_duplicate_species() {
        let params = SimulationParams {
            potential: coulomb_params(),
            pmf: None,
            drift: DriftParams::default(),
            species: vec![
                Species::new("Na", 1.0, 1.0),
                Species::new("Na", 1.0, 1.2),
            ],
        };
        assert!(matches!(
            validate(&params),
            Err(ConfigError::InvalidParameter { name: "species", .. })
        ));
    }

    #[test]
    fn validate_accepts_complete_configuration() {
        let params = SimulationParams {
            potential: coulomb_params(),
            pmf: Some(PmfParams::default()),
            drift: DriftParams::default(),
            species: vec![
                Species::new("Na", 1.0, 1.0),
                Species::new("Cl", -1.0, 1.5),
            ],
        };
        assert_eq!(validate(&params), Ok(()));
    }
}
