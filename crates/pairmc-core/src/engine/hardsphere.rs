use crate::core::models::group::Group;
use crate::core::models::particle::Particle;
use crate::core::models::space::Space;
use crate::core::utils::geometry::Geometry;
use itertools::Itertools;

/// Hard-sphere overlap tests used to veto a move before any energy is evaluated.
///
/// Two particles overlap when their squared separation is below the squared sum
/// of their radii. Every test returns on the first overlap it finds.
#[derive(Debug, Clone, Copy, Default)]
pub struct HardSphere;

impl HardSphere {
    #[inline]
    fn overlaps<G: Geometry>(geometry: &G, a: &Particle, b: &Particle) -> bool {
        let contact = a.radius + b.radius;
        geometry.sqdist(&a.position, &b.position) < contact * contact
    }

    /// Particle `i` against every other particle.
    pub fn particle<G: Geometry>(&self, space: &Space<G>, i: usize) -> bool {
        let geo = space.geometry();
        let pi = space.particle(i);
        space
            .particles()
            .iter()
            .enumerate()
            .any(|(j, pj)| j != i && Self::overlaps(geo, pi, pj))
    }

    /// An external particle against every particle.
    pub fn external<G: Geometry>(&self, space: &Space<G>, particle: &Particle) -> bool {
        let geo = space.geometry();
        space
            .particles()
            .iter()
            .any(|pj| Self::overlaps(geo, particle, pj))
    }

    /// Members of `group` against every particle outside it.
    pub fn group<G: Geometry>(&self, space: &Space<G>, group: &Group) -> bool {
        let geo = space.geometry();
        let particles = space.particles();
        group.range().any(|i| {
            particles[..group.begin()]
                .iter()
                .chain(&particles[group.end()..])
                .any(|pj| Self::overlaps(geo, &particles[i], pj))
        })
    }

    /// Particle `i` against members of `group` (skipping `i` itself).
    pub fn group_particle<G: Geometry>(&self, space: &Space<G>, group: &Group, i: usize) -> bool {
        let geo = space.geometry();
        let pi = space.particle(i);
        group
            .range()
            .any(|j| j != i && Self::overlaps(geo, pi, space.particle(j)))
    }

    /// An external particle against members of `group`.
    pub fn group_external<G: Geometry>(
        &self,
        space: &Space<G>,
        group: &Group,
        particle: &Particle,
    ) -> bool {
        let geo = space.geometry();
        group
            .range()
            .any(|j| Self::overlaps(geo, particle, space.particle(j)))
    }

    pub fn group_group<G: Geometry>(&self, space: &Space<G>, g1: &Group, g2: &Group) -> bool {
        debug_assert!(!g1.overlaps(g2), "groups {g1:?} and {g2:?} overlap");
        let geo = space.geometry();
        g1.range().any(|i| {
            let pi = space.particle(i);
            g2.range()
                .any(|j| Self::overlaps(geo, pi, space.particle(j)))
        })
    }

    /// Overlaps among the particles listed in `subset`.
    pub fn subset<G: Geometry>(&self, space: &Space<G>, subset: &[usize]) -> bool {
        let geo = space.geometry();
        subset
            .iter()
            .tuple_combinations()
            .any(|(&i, &j)| i != j && Self::overlaps(geo, space.particle(i), space.particle(j)))
    }

    /// True if any member of `group` sticks out of a sphere of `cell_radius` centred at the origin.
    pub fn cell_overlap<G: Geometry>(
        &self,
        space: &Space<G>,
        group: &Group,
        cell_radius: f64,
    ) -> bool {
        group.range().any(|i| {
            let p = space.particle(i);
            p.position.coords.norm() + p.radius > cell_radius
        })
    }

    /// True if two charged members of `group` are closer than `min_dist`.
    pub fn charge_overlap<G: Geometry>(
        &self,
        space: &Space<G>,
        group: &Group,
        min_dist: f64,
    ) -> bool {
        let min_dist2 = min_dist * min_dist;
        group.range().filter(|&i| space.particle(i).is_charged()).any(|i| {
            ((i + 1)..group.end())
                .any(|j| space.particle(j).is_charged() && space.sqdist(i, j) < min_dist2)
        })
    }
}
