use super::species::{Species, SpeciesId};
use nalgebra::Point3;

/// A point particle taking part in pairwise interactions.
///
/// Particles are plain mutable values owned by a [`Space`](super::space::Space).
/// Move proposers change `position` (and, for titration moves, `charge`) in place;
/// the energy routines only ever read them.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Cartesian position.
    pub position: Point3<f64>,
    /// Charge in elementary charge units.
    pub charge: f64,
    /// Radius used both as hard-sphere radius and Lennard-Jones half-sigma.
    pub radius: f64,
    /// Species of the particle; selects the PMF table.
    pub species: SpeciesId,
}

impl Particle {
    /// Creates a new `Particle`.
    ///
    /// # Arguments
    ///
    /// * `species` - The species identifier.
    /// * `position` - The 3D coordinates of the particle.
    /// * `charge` - The charge in elementary charge units.
    /// * `radius` - The particle radius.
    pub fn new(species: SpeciesId, position: Point3<f64>, charge: f64, radius: f64) -> Self {
        Self {
            position,
            charge,
            radius,
            species,
        }
    }

    /// Creates a particle carrying the default charge and radius of `species`.
    pub fn from_species(id: SpeciesId, species: &Species, position: Point3<f64>) -> Self {
        Self::new(id, position, species.charge, species.radius)
    }

    #[inline]
    pub fn is_charged(&self) -> bool {
        self.charge != 0.0
    }
}
