use crate::core::models::species::Species;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_PMF_RESOLUTION: f64 = 0.25;
pub const DEFAULT_MISSING_PENALTY: f64 = 30.0;
pub const DEFAULT_DRIFT_TOLERANCE: f64 = 1e-7;

/// Analytical pair potential used on its own or as the PMF fallback.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PotentialModel {
    LennardJones,
    Coulomb,
    DebyeHuckel,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PotentialParams {
    pub model: PotentialModel,
    /// Bjerrum length; also the factor converting kT/lB into kT.
    pub bjerrum_length: f64,
    /// Lennard-Jones well parameter in kT.
    #[serde(default)]
    pub epsilon: f64,
    /// Inverse Debye screening length (only read by the Debye-Hückel model).
    #[serde(default)]
    pub inverse_debye_length: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PmfParams {
    #[serde(default = "default_pmf_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_pmf_resolution")]
    pub resolution: f64,
    /// Energy in kT assigned to table bins that received no samples.
    #[serde(default = "default_missing_penalty")]
    pub missing_penalty: f64,
}

impl Default for PmfParams {
    fn default() -> Self {
        Self {
            directory: default_pmf_directory(),
            resolution: DEFAULT_PMF_RESOLUTION,
            missing_penalty: DEFAULT_MISSING_PENALTY,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DriftParams {
    #[serde(default = "default_drift_tolerance")]
    pub tolerance: f64,
}

impl Default for DriftParams {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_DRIFT_TOLERANCE,
        }
    }
}

/// Everything read from a run's TOML parameter file.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SimulationParams {
    pub potential: PotentialParams,
    #[serde(default)]
    pub pmf: Option<PmfParams>,
    #[serde(default)]
    pub drift: DriftParams,
    #[serde(default)]
    pub species: Vec<Species>,
}

fn default_pmf_directory() -> PathBuf {
    PathBuf::from("./")
}

fn default_pmf_resolution() -> f64 {
    DEFAULT_PMF_RESOLUTION
}

fn default_missing_penalty() -> f64 {
    DEFAULT_MISSING_PENALTY
}

fn default_drift_tolerance() -> f64 {
    DEFAULT_DRIFT_TOLERANCE
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

impl SimulationParams {
    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content, path)
    }

    fn from_toml_str(content: &str, path: &Path) -> Result<Self, ParamLoadError> {
        toml::from_str(content).map_err(|e| ParamLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn load_succeeds_with_full_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("run.toml");
        let mut file = File::create(&file_path).unwrap();
        writeln!(
            file,
            r#"
            [potential]
            model = "debye-huckel"
            bjerrum_length = 7.1
            epsilon = 0.2
            inverse_debye_length = 0.05

            [pmf]
            directory = "pmf"
            resolution = 0.1
            missing_penalty = 25.0

            [drift]
            tolerance = 1e-5

            [[species]]
            name = "Na"
            charge = 1.0
            radius = 1.9

            [[species]]
            name = "Cl"
            charge = -1.0
            radius = 2.1
            "#
        )
        .unwrap();

        let params = SimulationParams::load(&file_path).unwrap();
        assert_eq!(params.potential.model, PotentialModel::DebyeHuckel);
        assert_eq!(params.potential.bjerrum_length, 7.1);
        assert_eq!(params.potential.inverse_debye_length, 0.05);
        assert_eq!(
            params.pmf,
            Some(PmfParams {
                directory: PathBuf::from("pmf"),
                resolution: 0.1,
                missing_penalty: 25.0,
            })
        );
        assert_eq!(params.drift.tolerance, 1e-5);
        assert_eq!(params.species.len(), 2);
        assert_eq!(params.species[1], Species::new("Cl", -1.0, 2.1));
    }

    #[test]
    fn load_applies_defaults_for_optional_sections() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("minimal.toml");
        fs::write(
            &file_path,
            r#"[potential]
            model = "coulomb"
            bjerrum_length = 7.0
            [pmf]"#,
        )
        .unwrap();

        let params = SimulationParams::load(&file_path).unwrap();
        assert_eq!(params.potential.epsilon, 0.0);
        assert_eq!(params.pmf, Some(PmfParams::default()));
        assert_eq!(params.drift, DriftParams::default());
        assert!(params.species.is_empty());
    }

    #[test]
    fn pmf_section_is_optional() {
        let params = SimulationParams::from_toml_str(
            "[potential]\nmodel = \"lennard-jones\"\nbjerrum_length = 1.0\nepsilon = 0.5",
            Path::new("inline"),
        )
        .unwrap();
        assert_eq!(params.potential.model, PotentialModel::LennardJones);
        assert!(params.pmf.is_none());
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("non_existent.toml");
        let result = SimulationParams::load(&file_path);
        assert!(matches!(result, Err(ParamLoadError::Io { .. })));
    }

    #[test]
    fn load_fails_for_unknown_model() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("bad_model.toml");
        fs::write(
            &file_path,
            "[potential]\nmodel = \"yukawa\"\nbjerrum_length = 7.0",
        )
        .unwrap();
        let result = SimulationParams::load(&file_path);
        assert!(matches!(result, Err(ParamLoadError::Toml { .. })));
    }

    #[test]
    fn load_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("malformed.toml");
        fs::write(&file_path, "this is not toml").unwrap();
        let result = SimulationParams::load(&file_path);
        assert!(matches!(result, Err(ParamLoadError::Toml { .. })));
    }
}
