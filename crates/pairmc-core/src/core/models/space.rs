use super::particle::Particle;
use super::species::SpeciesId;
use crate::core::utils::geometry::Geometry;
use itertools::Itertools;
use nalgebra::Point3;

/// Particle container together with the geometry used to measure it.
///
/// `Space` is the read side consumed by the energy and overlap routines:
/// particles are addressed by index and every distance goes through `G`.
#[derive(Debug, Clone)]
pub struct Space<G: Geometry> {
    particles: Vec<Particle>,
    geometry: G,
}

impl<G: Geometry> Space<G> {
    pub fn new(geometry: G) -> Self {
        Self {
            particles: Vec::new(),
            geometry,
        }
    }

    pub fn with_particles(geometry: G, particles: Vec<Particle>) -> Self {
        Self {
            particles,
            geometry,
        }
    }

    #[inline]
    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn particle(&self, index: usize) -> &Particle {
        &self.particles[index]
    }

    #[inline]
    pub fn particle_mut(&mut self, index: usize) -> &mut Particle {
        &mut self.particles[index]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Appends a particle and returns the new container size.
    pub fn push(&mut self, particle: Particle) -> usize {
        self.particles.push(particle);
        self.particles.len()
    }

    /// Inserts a particle at `index`. Returns `false` if `index` is past the end.
    pub fn insert(&mut self, index: usize, particle: Particle) -> bool {
        if index > self.particles.len() {
            return false;
        }
        self.particles.insert(index, particle);
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<Particle> {
        (index < self.particles.len()).then(|| self.particles.remove(index))
    }

    #[inline]
    pub fn sqdist(&self, i: usize, j: usize) -> f64 {
        self.geometry
            .sqdist(&self.particles[i].position, &self.particles[j].position)
    }

    #[inline]
    pub fn sqdist_points(&self, a: &Point3<f64>, b: &Point3<f64>) -> f64 {
        self.geometry.sqdist(a, b)
    }

    #[inline]
    pub fn dist(&self, i: usize, j: usize) -> f64 {
        self.sqdist(i, j).sqrt()
    }

    /// Distinct species present, in order of first appearance.
    pub fn list_of_species(&self) -> Vec<SpeciesId> {
        self.particles.iter().map(|p| p.species).unique().collect()
    }

    pub fn net_charge(&self) -> f64 {
        self.particles.iter().map(|p| p.charge).sum()
    }

    /// Total charge of particles within `radius` of `origin` (boundary included).
    pub fn charge_within(&self, origin: &Point3<f64>, radius: f64) -> f64 {
        let r2 = radius * radius;
        self.particles
            .iter()
            .filter(|p| self.geometry.sqdist(&p.position, origin) <= r2)
            .map(|p| p.charge)
            .sum()
    }

    /// Number of `species` particles strictly within `radius` of `origin`.
    pub fn count_within(&self, species: SpeciesId, origin: &Point3<f64>, radius: f64) -> usize {
        let r2 = radius * radius;
        self.particles
            .iter()
            .filter(|p| p.species == species && self.geometry.sqdist(&p.position, origin) < r2)
            .count()
    }
}
