use serde::Deserialize;
use std::fmt;

/// Identifier of a particle species.
///
/// The numeric value is the position of the species in its [`SpeciesRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SpeciesId(pub u16);

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An unordered pair of species, stored with the smaller id first.
///
/// Two pairs built from the same ids in either order compare and hash equal,
/// which is what makes species-pair lookups symmetric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpeciesPair {
    first: SpeciesId,
    second: SpeciesId,
}

impl SpeciesPair {
    #[inline]
    pub fn new(a: SpeciesId, b: SpeciesId) -> Self {
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    #[inline]
    pub fn first(&self) -> SpeciesId {
        self.first
    }

    #[inline]
    pub fn second(&self) -> SpeciesId {
        self.second
    }
}

/// Static properties shared by all particles of one species.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Species {
    /// Short name used in PMF file names (e.g. "Na" in `Na-Cl.dat`).
    pub name: String,
    /// Default charge in elementary charge units.
    #[serde(default)]
    pub charge: f64,
    /// Default hard-sphere / Lennard-Jones radius.
    #[serde(default)]
    pub radius: f64,
}

impl Species {
    pub fn new(name: &str, charge: f64, radius: f64) -> Self {
        Self {
            name: name.to_string(),
            charge,
            radius,
        }
    }
}

/// Ordered collection of species; ids are indices into it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeciesRegistry {
    species: Vec<Species>,
}

impl SpeciesRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a species and returns its id. A species with the same name is not added twice.
    pub fn add(&mut self, species: Species) -> SpeciesId {
        if let Some(id) = self.find(&species.name) {
            return id;
        }
        self.species.push(species);
        SpeciesId((self.species.len() - 1) as u16)
    }

    pub fn get(&self, id: SpeciesId) -> Option<&Species> {
        self.species.get(id.0 as usize)
    }

    pub fn name(&self, id: SpeciesId) -> Option<&str> {
        self.get(id).map(|s| s.name.as_str())
    }

    pub fn find(&self, name: &str) -> Option<SpeciesId> {
        self.species
            .iter()
            .position(|s| s.name == name)
            .map(|idx| SpeciesId(idx as u16))
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = SpeciesId> + '_ {
        (0..self.species.len()).map(|idx| SpeciesId(idx as u16))
    }
}

impl FromIterator<Species> for SpeciesRegistry {
    fn from_iter<I: IntoIterator<Item = Species>>(iter: I) -> Self {
        let mut registry = Self::new();
        for species in iter {
            registry.add(species);
        }
        registry
    }
}
