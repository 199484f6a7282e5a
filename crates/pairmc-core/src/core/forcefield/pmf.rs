//! Potentials of mean force tabulated from disk.
//!
//! Raw `(distance, energy)` samples are averaged onto a fixed grid of width
//! `resolution`. Bins between zero and the last populated bin that received no
//! samples (typically everything inside contact) are assigned a missing-data
//! penalty. Stored energies are divided by the Bjerrum length so that tables
//! share the kT/lB unit of the analytical models.

use super::pairpot::PairPotential;
use super::params::PmfParams;
use super::potentials;
use crate::core::io::pmf_file::{self, PmfFileError, Sample};
use crate::core::models::particle::Particle;
use crate::core::models::species::{SpeciesId, SpeciesPair, SpeciesRegistry};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

// Absorbs round-off in `x / resolution` for samples sitting on a bin edge.
const BIN_EPSILON: f64 = 1e-9;

/// Upper bound on the number of bins in one table.
pub const MAX_BINS: usize = 1_000_000;

#[derive(Debug, Error)]
pub enum PmfLoadError {
    #[error(transparent)]
    File(#[from] PmfFileError),
    #[error("No tabulated data beyond zero distance in '{path}'")]
    NoData { path: String },
    #[error("Non-finite sample ({distance}, {energy})")]
    NonFiniteSample { distance: f64, energy: f64 },
    #[error("Distance {distance} needs more than {limit} bins at resolution {resolution}")]
    TooManyBins {
        distance: f64,
        resolution: f64,
        limit: usize,
    },
}

#[inline]
fn bin_index(x: f64, resolution: f64) -> usize {
    (x / resolution + BIN_EPSILON) as usize
}

#[derive(Debug, Clone, Copy, Default)]
struct BinAverage {
    sum: f64,
    count: usize,
}

impl BinAverage {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Distance → energy table on a uniform grid. Energies are in kT/lB.
#[derive(Debug, Clone, PartialEq)]
pub struct PmfTable {
    resolution: f64,
    energies: Vec<f64>,
}

impl PmfTable {
    /// Builds a table by bin-averaging `samples` (energies in kT).
    ///
    /// Fails on non-finite samples and on distances that would need more than
    /// [`MAX_BINS`] bins.
    pub fn from_samples(
        samples: &[Sample],
        resolution: f64,
        missing_penalty: f64,
        bjerrum_length: f64,
    ) -> Result<Self, PmfLoadError> {
        debug_assert!(resolution > 0.0);
        let mut n_bins = 0;
        for &(x, y) in samples {
            if !(x.is_finite() && y.is_finite()) {
                return Err(PmfLoadError::NonFiniteSample {
                    distance: x,
                    energy: y,
                });
            }
            if x / resolution + BIN_EPSILON >= MAX_BINS as f64 {
                return Err(PmfLoadError::TooManyBins {
                    distance: x,
                    resolution,
                    limit: MAX_BINS,
                });
            }
            n_bins = n_bins.max(bin_index(x, resolution) + 1);
        }

        let mut bins = vec![BinAverage::default(); n_bins];
        for &(x, y) in samples {
            bins[bin_index(x, resolution)].add(y);
        }

        let energies = bins
            .iter()
            .map(|bin| bin.mean().unwrap_or(missing_penalty) / bjerrum_length)
            .collect();

        Ok(Self {
            resolution,
            energies,
        })
    }

    #[inline]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Distance of the last tabulated bin; zero means the table holds no usable data.
    #[inline]
    pub fn xmax(&self) -> f64 {
        self.energies.len().saturating_sub(1) as f64 * self.resolution
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.energies.len() > 1
    }

    /// Bin energies in kT/lB, bin `i` covering `[i, i+1) * resolution`.
    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    /// Energy (kT/lB) of the bin containing `r`, clamped to the last bin.
    #[inline]
    pub fn lookup(&self, r: f64) -> f64 {
        let idx = bin_index(r, self.resolution).min(self.energies.len() - 1);
        self.energies[idx]
    }

    /// Writes the table as `(bin center, energy in kT)` rows.
    pub fn write(&self, path: &Path, bjerrum_length: f64) -> Result<(), PmfFileError> {
        let rows = self.energies.iter().enumerate().map(|(i, &u)| {
            ((i as f64 + 0.5) * self.resolution, u * bjerrum_length)
        });
        pmf_file::write_samples(path, rows)
    }
}

/// Tables for every loaded species pair.
#[derive(Debug, Clone)]
pub struct PmfStore {
    directory: PathBuf,
    resolution: f64,
    missing_penalty: f64,
    bjerrum_length: f64,
    tables: HashMap<SpeciesPair, PmfTable>,
}

impl PmfStore {
    pub fn new(params: &PmfParams, bjerrum_length: f64) -> Self {
        Self {
            directory: params.directory.clone(),
            resolution: params.resolution,
            missing_penalty: params.missing_penalty,
            bjerrum_length,
            tables: HashMap::new(),
        }
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn bjerrum_length(&self) -> f64 {
        self.bjerrum_length
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// `<directory>/<A>-<B>.dat`
    pub fn file_path(&self, name_a: &str, name_b: &str) -> PathBuf {
        self.directory.join(format!("{name_a}-{name_b}.dat"))
    }

    /// Reads and bins one file using this store's resolution and penalty.
    pub fn read_table(&self, path: &Path) -> Result<PmfTable, PmfLoadError> {
        let samples = pmf_file::read_samples(path)?;
        let table = PmfTable::from_samples(
            &samples,
            self.resolution,
            self.missing_penalty,
            self.bjerrum_length,
        )?;
        if !table.has_data() {
            return Err(PmfLoadError::NoData {
                path: path.to_string_lossy().to_string(),
            });
        }
        Ok(table)
    }

    /// Builds a table from in-memory samples (energies in kT) and stores it.
    ///
    /// Returns `false`, leaving the store unchanged, if the samples are invalid
    /// or hold no data.
    pub fn insert_samples(&mut self, a: SpeciesId, b: SpeciesId, samples: &[Sample]) -> bool {
        match PmfTable::from_samples(
            samples,
            self.resolution,
            self.missing_penalty,
            self.bjerrum_length,
        ) {
            Ok(table) if table.has_data() => {
                self.tables.insert(SpeciesPair::new(a, b), table);
                true
            }
            Ok(_) => false,
            Err(e) => {
                warn!(%a, %b, "Rejected PMF samples: {}", e);
                false
            }
        }
    }

    /// Loads `<A>-<B>.dat` for the pair in exactly this name order.
    ///
    /// Returns `false` if the file is missing, malformed or holds no data; the
    /// table is stored under the canonical pair either way it was named.
    #[instrument(level = "debug", skip(self, registry))]
    pub fn load_pair(&mut self, registry: &SpeciesRegistry, a: SpeciesId, b: SpeciesId) -> bool {
        let (Some(name_a), Some(name_b)) = (registry.name(a), registry.name(b)) else {
            warn!(%a, %b, "Species missing from registry; no PMF loaded.");
            return false;
        };
        let path = self.file_path(name_a, name_b);
        match self.read_table(&path) {
            Ok(table) => {
                debug!(
                    path = %path.display(),
                    xmax = table.xmax(),
                    "Loaded PMF table."
                );
                self.tables.insert(SpeciesPair::new(a, b), table);
                true
            }
            Err(PmfLoadError::File(PmfFileError::Io { .. })) => {
                debug!(path = %path.display(), "No PMF file.");
                false
            }
            Err(e) => {
                warn!("Skipping PMF file: {}", e);
                false
            }
        }
    }

    /// Loads every unordered pair of `species`, trying both file name orders.
    ///
    /// Returns the number of pairs for which a table was loaded.
    #[instrument(skip_all, fields(directory = %self.directory.display()))]
    pub fn load_species(&mut self, registry: &SpeciesRegistry, species: &[SpeciesId]) -> usize {
        let mut loaded = 0;
        for (i, &a) in species.iter().enumerate() {
            for &b in &species[i..] {
                if self.load_pair(registry, a, b) || (a != b && self.load_pair(registry, b, a)) {
                    loaded += 1;
                }
            }
        }
        info!(loaded, "PMF tables loaded.");
        loaded
    }

    #[inline]
    pub fn table(&self, a: SpeciesId, b: SpeciesId) -> Option<&PmfTable> {
        self.tables.get(&SpeciesPair::new(a, b))
    }

    /// Human readable listing of the loaded tables.
    pub fn info(&self, registry: &SpeciesRegistry) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# PMF directory     = {}", self.directory.display());
        let _ = writeln!(out, "# PMF resolution    = {}", self.resolution);
        let _ = writeln!(out, "# Missing penalty   = {} kT", self.missing_penalty);
        let _ = writeln!(out, "# PMF tables: (a, b, resolution, xmax)");

        let mut pairs: Vec<_> = self.tables.iter().collect();
        pairs.sort_by_key(|(pair, _)| **pair);
        for (pair, table) in pairs {
            let name_a = registry.name(pair.first()).unwrap_or("?");
            let name_b = registry.name(pair.second()).unwrap_or("?");
            let _ = writeln!(
                out,
                "#   {} {} {} {}",
                name_a,
                name_b,
                table.resolution(),
                table.xmax()
            );
        }
        out
    }
}

/// PMF tables with an analytical fallback held by composition.
///
/// Pairs without a table use `fallback` unchanged. Pairs with a table use it up
/// to half a bin below `xmax`; further out the bare Coulomb term `q1 q2 / r` is
/// used whatever the fallback model is.
#[derive(Debug, Clone)]
pub struct TabulatedPotential<F: PairPotential> {
    store: PmfStore,
    fallback: F,
}

impl<F: PairPotential> TabulatedPotential<F> {
    pub fn new(store: PmfStore, fallback: F) -> Self {
        debug_assert!(
            (store.bjerrum_length() - fallback.bjerrum_length()).abs() < 1e-12,
            "PMF tables and fallback disagree on the Bjerrum length"
        );
        Self { store, fallback }
    }

    pub fn store(&self) -> &PmfStore {
        &self.store
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }
}

impl<F: PairPotential> PairPotential for TabulatedPotential<F> {
    fn name(&self) -> &'static str {
        "Tabulated PMF"
    }

    fn bjerrum_length(&self) -> f64 {
        self.fallback.bjerrum_length()
    }

    #[inline]
    fn energy(&self, a: &Particle, b: &Particle, r2: f64) -> f64 {
        let Some(table) = self.store.table(a.species, b.species) else {
            return self.fallback.energy(a, b, r2);
        };
        let r = r2.sqrt();
        if r > table.xmax() - 0.5 * table.resolution() {
            bare_coulomb(a, b, r)
        } else {
            table.lookup(r)
        }
    }

    /// Bare Coulomb for tabulated pairs; the fallback's term otherwise.
    #[inline]
    fn electrostatic(&self, a: &Particle, b: &Particle, r2: f64) -> f64 {
        if self.store.table(a.species, b.species).is_some() {
            bare_coulomb(a, b, r2.sqrt())
        } else {
            self.fallback.electrostatic(a, b, r2)
        }
    }
}

#[inline]
fn bare_coulomb(a: &Particle, b: &Particle, r: f64) -> f64 {
    let qq = a.charge * b.charge;
    if qq != 0.0 {
        potentials::coulomb(qq, r)
    } else {
        0.0
    }
}
