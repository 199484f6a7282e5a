use crate::core::forcefield::pairpot::{AnalyticalPotential, PairPotential, SelectedPotential};
use crate::core::forcefield::params::{ParamLoadError, SimulationParams};
use crate::core::forcefield::pmf::{PmfStore, TabulatedPotential};
use crate::core::models::species::{SpeciesId, SpeciesRegistry};
use crate::engine::config::{self, ConfigError};
use crate::engine::drift::EnergyDrift;
use crate::engine::interaction::Interaction;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Failed to load parameter file: {source}")]
    Params {
        #[from]
        source: ParamLoadError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}

/// Everything a Monte Carlo driver needs before its first move.
#[derive(Debug, Clone)]
pub struct SimulationSetup {
    pub registry: SpeciesRegistry,
    pub interaction: Interaction<SelectedPotential>,
    pub drift: EnergyDrift,
}

/// Builds the run-wide pair potential and its aggregator.
///
/// With a `[pmf]` section, tables are loaded for every pair of `species` and
/// the analytical model becomes their fallback; otherwise the analytical model
/// is used directly.
#[instrument(skip_all, name = "setup_workflow")]
pub fn build_interaction(
    params: &SimulationParams,
    registry: &SpeciesRegistry,
    species: &[SpeciesId],
) -> Result<Interaction<SelectedPotential>, SetupError> {
    config::validate(params)?;

    let analytical = AnalyticalPotential::from_params(&params.potential);
    info!(
        model = analytical.name(),
        bjerrum_length = params.potential.bjerrum_length,
        "Analytical pair potential selected."
    );

    let selected = match &params.pmf {
        Some(pmf_params) => {
            let mut store = PmfStore::new(pmf_params, params.potential.bjerrum_length);
            let loaded = store.load_species(registry, species);
            if loaded == 0 {
                info!("No PMF tables found; every pair uses the analytical fallback.");
            }
            debug!("{}", store.info(registry));
            SelectedPotential::Tabulated(TabulatedPotential::new(store, analytical))
        }
        None => SelectedPotential::Analytical(analytical),
    };

    Ok(Interaction::new(selected))
}

/// Reads a parameter file and prepares the registry, aggregator and drift tracker.
#[instrument(skip_all, name = "setup_from_file", fields(path = %path.display()))]
pub fn load(path: &Path) -> Result<SimulationSetup, SetupError> {
    let params = SimulationParams::load(path)?;
    let registry: SpeciesRegistry = params.species.iter().cloned().collect();
    let species: Vec<SpeciesId> = registry.ids().collect();
    info!(species = registry.len(), "Species registered.");

    let interaction = build_interaction(&params, &registry, &species)?;
    let drift = EnergyDrift::new(params.drift.tolerance);

    Ok(SimulationSetup {
        registry,
        interaction,
        drift,
    })
}
