use crate::core::forcefield::pairpot::PairPotential;
use crate::core::forcefield::potentials;
use crate::core::models::group::Group;
use crate::core::models::particle::Particle;
use crate::core::models::space::Space;
use crate::core::utils::geometry::Geometry;
use itertools::Itertools;
use nalgebra::{Point3, Vector3};
use tracing::instrument;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Sums pair energies over particles and groups of a [`Space`].
///
/// The pair potential is fixed for the lifetime of the value. Every pair is
/// counted once, self-pairs are never evaluated, and all returned energies are
/// in kT (the potential's kT/lB sums are multiplied by the Bjerrum length once
/// per call).
#[derive(Debug, Clone)]
pub struct Interaction<P: PairPotential> {
    potential: P,
    bjerrum_length: f64,
}

impl<P: PairPotential> Interaction<P> {
    pub fn new(potential: P) -> Self {
        let bjerrum_length = potential.bjerrum_length();
        Self {
            potential,
            bjerrum_length,
        }
    }

    pub fn potential(&self) -> &P {
        &self.potential
    }

    /// Factor converting kT/lB into kT.
    #[inline]
    pub fn bjerrum_length(&self) -> f64 {
        self.bjerrum_length
    }

    #[inline]
    fn pair<G: Geometry>(&self, geometry: &G, a: &Particle, b: &Particle) -> f64 {
        self.potential
            .energy(a, b, geometry.sqdist(&a.position, &b.position))
    }

    /// Energy of a single pair of particles in kT.
    #[inline]
    pub fn pair_energy<G: Geometry>(&self, geometry: &G, a: &Particle, b: &Particle) -> f64 {
        self.bjerrum_length * self.pair(geometry, a, b)
    }

    /// Energy between particles `i` and `j` of `space` in kT.
    #[inline]
    pub fn pairpot<G: Geometry>(&self, space: &Space<G>, i: usize, j: usize) -> f64 {
        debug_assert_ne!(i, j, "self-pair requested");
        self.pair_energy(space.geometry(), space.particle(i), space.particle(j))
    }

    /// Particle `i` with every other particle.
    pub fn particle_energy<G: Geometry>(&self, space: &Space<G>, i: usize) -> f64 {
        let geo = space.geometry();
        let pi = space.particle(i);
        let u: f64 = space
            .particles()
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, pj)| self.pair(geo, pi, pj))
            .sum();
        self.bjerrum_length * u
    }

    /// A particle that is not part of the container (e.g. a trial insertion) with every particle.
    pub fn external_energy<G: Geometry>(&self, space: &Space<G>, particle: &Particle) -> f64 {
        let geo = space.geometry();
        let u: f64 = space
            .particles()
            .iter()
            .map(|pj| self.pair(geo, particle, pj))
            .sum();
        self.bjerrum_length * u
    }

    /// Particle `i` with the members of `group`; `i` itself is skipped if it belongs to it.
    pub fn group_particle_energy<G: Geometry>(
        &self,
        space: &Space<G>,
        group: &Group,
        i: usize,
    ) -> f64 {
        let geo = space.geometry();
        let pi = space.particle(i);
        let u: f64 = group
            .range()
            .filter(|&j| j != i)
            .map(|j| self.pair(geo, pi, space.particle(j)))
            .sum();
        self.bjerrum_length * u
    }

    /// An external particle with the members of `group`.
    pub fn group_external_energy<G: Geometry>(
        &self,
        space: &Space<G>,
        group: &Group,
        particle: &Particle,
    ) -> f64 {
        let geo = space.geometry();
        let u: f64 = group
            .range()
            .map(|j| self.pair(geo, particle, space.particle(j)))
            .sum();
        self.bjerrum_length * u
    }

    /// Members of `group` with every particle outside it.
    pub fn group_energy<G: Geometry>(&self, space: &Space<G>, group: &Group) -> f64 {
        let geo = space.geometry();
        let particles = space.particles();
        let mut u = 0.0;
        for i in group.range() {
            let pi = &particles[i];
            for pj in particles[..group.begin()]
                .iter()
                .chain(&particles[group.end()..])
            {
                u += self.pair(geo, pi, pj);
            }
        }
        self.bjerrum_length * u
    }

    /// Cross energy between two disjoint groups.
    pub fn group_group_energy<G: Geometry>(
        &self,
        space: &Space<G>,
        g1: &Group,
        g2: &Group,
    ) -> f64 {
        debug_assert!(!g1.overlaps(g2), "groups {g1:?} and {g2:?} overlap");
        let geo = space.geometry();
        let mut u = 0.0;
        for i in g1.range() {
            let pi = space.particle(i);
            for j in g2.range() {
                u += self.pair(geo, pi, space.particle(j));
            }
        }
        self.bjerrum_length * u
    }

    /// Sum over all unique pairs inside `group`.
    pub fn internal_energy<G: Geometry>(&self, space: &Space<G>, group: &Group) -> f64 {
        let geo = space.geometry();
        let u: f64 = group
            .range()
            .tuple_combinations()
            .map(|(i, j)| self.pair(geo, space.particle(i), space.particle(j)))
            .sum();
        self.bjerrum_length * u
    }

    /// Sum over all unique pairs in the container. O(N²); meant for drift checks.
    #[instrument(level = "debug", skip_all, fields(n = space.len()))]
    pub fn system_energy<G: Geometry>(&self, space: &Space<G>) -> f64 {
        let geo = space.geometry();
        let particles = space.particles();

        let row = |i: usize| -> f64 {
            let pi = &particles[i];
            particles[i + 1..]
                .iter()
                .map(|pj| self.pair(geo, pi, pj))
                .sum::<f64>()
        };

        #[cfg(not(feature = "parallel"))]
        let u: f64 = (0..particles.len()).map(row).sum();

        #[cfg(feature = "parallel")]
        let u: f64 = (0..particles.len()).into_par_iter().map(row).sum();

        self.bjerrum_length * u
    }

    /// Particle `i` with an explicit list of partners; `i` is skipped if listed.
    pub fn subset_energy<G: Geometry>(&self, space: &Space<G>, i: usize, subset: &[usize]) -> f64 {
        let geo = space.geometry();
        let pi = space.particle(i);
        let u: f64 = subset
            .iter()
            .filter(|&&j| j != i)
            .map(|&j| self.pair(geo, pi, space.particle(j)))
            .sum();
        self.bjerrum_length * u
    }

    /// Electrostatic potential (kT/e) from all charges at `point`.
    ///
    /// Only the bare Coulomb kernel is used, independent of the pair potential.
    pub fn potential_at<G: Geometry>(&self, space: &Space<G>, point: &Point3<f64>) -> f64 {
        let geo = space.geometry();
        let phi: f64 = space
            .particles()
            .iter()
            .filter(|p| p.is_charged())
            .map(|p| potentials::coulomb(p.charge, geo.dist(point, &p.position)))
            .sum();
        self.bjerrum_length * phi
    }

    /// Dipole-dipole energy in kT; `r` is the vector between the two dipoles.
    #[inline]
    pub fn dipole_dipole(&self, mu_a: &Vector3<f64>, mu_b: &Vector3<f64>, r: &Vector3<f64>) -> f64 {
        self.bjerrum_length * potentials::dipole_dipole(mu_a, mu_b, r)
    }

    /// Ion-dipole energy in kT; `r` points from the ion to the dipole.
    #[inline]
    pub fn ion_dipole(&self, charge: f64, mu: &Vector3<f64>, r: &Vector3<f64>) -> f64 {
        self.bjerrum_length * potentials::ion_dipole(charge, mu, r)
    }

    /// Harmonic bond energy (kT) of chain member `i` with its neighbours `i-1` and `i+1`.
    ///
    /// `force_constant` is in kT per squared length unit. Bonds never cross the
    /// group boundary.
    pub fn chain_bond_energy<G: Geometry>(
        &self,
        space: &Space<G>,
        group: &Group,
        i: usize,
        force_constant: f64,
        equilibrium_dist: f64,
    ) -> f64 {
        debug_assert!(group.contains(i));
        let mut u = 0.0;
        if i > group.begin() {
            u += potentials::harmonic(space.dist(i, i - 1), force_constant, equilibrium_dist);
        }
        if i + 1 < group.end() {
            u += potentials::harmonic(space.dist(i, i + 1), force_constant, equilibrium_dist);
        }
        u
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::pairpot::{Coulomb, DebyeHuckel, LennardJones};
    use crate::core::models::species::SpeciesId;
    use crate::core::utils::geometry::Euclidean;

    const TOLERANCE: f64 = 1e-9;
    const LB: f64 = 7.0;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE * a.abs().max(b.abs()).max(1.0)
    }

    fn particle(pos: [f64; 3], charge: f64) -> Particle {
        Particle::new(SpeciesId(0), Point3::new(pos[0], pos[1], pos[2]), charge, 1.0)
    }

    fn setup_space() -> Space<Euclidean> {
        Space::with_particles(
            Euclidean,
            vec![
                particle([0.0, 0.0, 0.0], 1.0),
                particle([3.0, 0.0, 0.0], -1.0),
                particle([0.0, 4.0, 0.0], 1.0),
                particle([5.0, 5.0, 0.0], -2.0),
                particle([-3.0, 2.0, 1.0], 0.0),
                particle([1.0, -4.0, 2.0], 1.0),
            ],
        )
    }

    fn brute_force_pairs(
        interaction: &Interaction<Coulomb>,
        space: &Space<Euclidean>,
        pairs: &[(usize, usize)],
    ) -> f64 {
        pairs.iter().map(|&(i, j)| interaction.pairpot(space, i, j)).sum()
    }

    #[test]
    fn pair_energy_is_in_kt() {
        let interaction = Interaction::new(Coulomb::new(0.0, LB));
        let space = setup_space();
        assert!(f64_approx_equal(interaction.pairpot(&space, 0, 1), -LB / 3.0));
    }

    #[test]
    fn lennard_jones_energy_scales_with_epsilon_in_kt() {
        let interaction = Interaction::new(LennardJones::new(4.0, LB));
        let space = Space::with_particles(
            Euclidean,
            vec![
                particle([0.0, 0.0, 0.0], 0.0),
                particle([2.0 * 2.0_f64.powf(1.0 / 6.0), 0.0, 0.0], 0.0),
            ],
        );
        assert!(f64_approx_equal(interaction.system_energy(&space), -1.0));
    }

    #[test]
    fn pairpot_is_symmetric() {
        let interaction = Interaction::new(DebyeHuckel::new(0.3, LB, 0.2));
        let space = setup_space();
        for i in 0..space.len() {
            for j in 0..space.len() {
                if i != j {
                    assert_eq!(
                        interaction.pairpot(&space, i, j),
                        interaction.pairpot(&space, j, i)
                    );
                }
            }
        }
    }

    #[test]
    fn particle_energy_skips_self() {
        let interaction = Interaction::new(Coulomb::new(0.1, LB));
        let space = setup_space();
        let expected = brute_force_pairs(&interaction, &space, &[(2, 0), (2, 1), (2, 3), (2, 4), (2, 5)]);
        assert!(f64_approx_equal(interaction.particle_energy(&space, 2), expected));
    }

    #[test]
    fn internal_energy_of_three_particles_is_sum_of_three_pairs() {
        let interaction = Interaction::new(Coulomb::new(0.1, LB));
        let space = setup_space();
        let group = Group::new("trimer", 1, 4);
        let expected = brute_force_pairs(&interaction, &space, &[(1, 2), (1, 3), (2, 3)]);
        assert!(f64_approx_equal(interaction.internal_energy(&space, &group), expected));
    }

    #[test]
    fn system_energy_is_additive_over_a_partition() {
        let interaction = Interaction::new(Coulomb::new(0.1, LB));
        let space = setup_space();
        let a = Group::new("a", 0, 2);
        let b = Group::new("b", 2, 6);

        let partitioned = interaction.internal_energy(&space, &a)
            + interaction.internal_energy(&space, &b)
            + interaction.group_group_energy(&space, &a, &b);

        assert!(f64_approx_equal(interaction.system_energy(&space), partitioned));
    }

    #[test]
    fn system_energy_matches_half_sum_of_particle_energies() {
        let interaction = Interaction::new(DebyeHuckel::new(0.2, LB, 0.3));
        let space = setup_space();
        let half_sum: f64 = (0..space.len())
            .map(|i| interaction.particle_energy(&space, i))
            .sum::<f64>()
            / 2.0;
        assert!(f64_approx_equal(interaction.system_energy(&space), half_sum));
    }

    #[test]
    fn group_energy_counts_only_outside_partners() {
        let interaction = Interaction::new(Coulomb::new(0.1, LB));
        let space = setup_space();
        let group = Group::new("g", 2, 4);
        let rest_before = Group::new("before", 0, 2);
        let rest_after = Group::new("after", 4, 6);
        let expected = interaction.group_group_energy(&space, &group, &rest_before)
            + interaction.group_group_energy(&space, &group, &rest_after);
        assert!(f64_approx_equal(interaction.group_energy(&space, &group), expected));
    }

    #[test]
    fn group_particle_energy_skips_member_itself() {
        let interaction = Interaction::new(Coulomb::new(0.1, LB));
        let space = setup_space();
        let group = Group::new("g", 0, 3);
        let inside = interaction.group_particle_energy(&space, &group, 1);
        assert!(f64_approx_equal(inside, brute_force_pairs(&interaction, &space, &[(1, 0), (1, 2)])));
        let outside = interaction.group_particle_energy(&space, &group, 5);
        assert!(f64_approx_equal(
            outside,
            brute_force_pairs(&interaction, &space, &[(5, 0), (5, 1), (5, 2)])
        ));
    }

    #[test]
    fn external_particle_energies_match_explicit_pairs() {
        let interaction = Interaction::new(Coulomb::new(0.1, LB));
        let space = setup_space();
        let ghost = particle([10.0, 0.0, 0.0], -1.0);
        let geo = space.geometry();

        let expected_all: f64 = space
            .particles()
            .iter()
            .map(|p| interaction.pair_energy(geo, &ghost, p))
            .sum();
        assert!(f64_approx_equal(interaction.external_energy(&space, &ghost), expected_all));

        let group = Group::new("g", 3, 5);
        let expected_group = interaction.pair_energy(geo, &ghost, space.particle(3))
            + interaction.pair_energy(geo, &ghost, space.particle(4));
        assert!(f64_approx_equal(
            interaction.group_external_energy(&space, &group, &ghost),
            expected_group
        ));
    }

    #[test]
    fn subset_energy_ignores_self_in_list() {
        let interaction = Interaction::new(Coulomb::new(0.1, LB));
        let space = setup_space();
        let expected = brute_force_pairs(&interaction, &space, &[(0, 3), (0, 5)]);
        assert!(f64_approx_equal(interaction.subset_energy(&space, 0, &[3, 0, 5]), expected));
        assert_eq!(interaction.subset_energy(&space, 0, &[]), 0.0);
    }

    #[test]
    fn potential_at_point_uses_bare_coulomb() {
        let interaction = Interaction::new(DebyeHuckel::new(1.0, LB, 10.0));
        let space = Space::with_particles(
            Euclidean,
            vec![particle([2.0, 0.0, 0.0], 1.0), particle([0.0, -4.0, 0.0], -2.0)],
        );
        let phi = interaction.potential_at(&space, &Point3::origin());
        assert!(f64_approx_equal(phi, LB * (1.0 / 2.0 - 2.0 / 4.0)));
    }

    #[test]
    fn dipole_terms_are_scaled_by_bjerrum_length() {
        let interaction = Interaction::new(Coulomb::new(0.0, LB));
        let mu = Vector3::new(1.0, 0.0, 0.0);
        let r = Vector3::new(2.0, 0.0, 0.0);
        assert!(f64_approx_equal(interaction.dipole_dipole(&mu, &mu, &r), -LB / 4.0));
        assert!(f64_approx_equal(interaction.ion_dipole(1.0, &mu, &r), -LB / 4.0));
    }

    #[test]
    fn chain_bond_energy_stops_at_group_ends() {
        let interaction = Interaction::new(Coulomb::new(0.0, LB));
        let space = Space::with_particles(
            Euclidean,
            vec![
                particle([0.0, 0.0, 0.0], 0.0),
                particle([2.0, 0.0, 0.0], 0.0),
                particle([5.0, 0.0, 0.0], 0.0),
                particle([6.0, 0.0, 0.0], 0.0),
            ],
        );
        let chain = Group::new("chain", 1, 4);
        assert!(f64_approx_equal(interaction.chain_bond_energy(&space, &chain, 1, 0.5, 2.0), 0.5));
        assert!(f64_approx_equal(interaction.chain_bond_energy(&space, &chain, 2, 0.5, 2.0), 1.0));
        assert!(f64_approx_equal(interaction.chain_bond_energy(&space, &chain, 3, 0.5, 2.0), 0.5));
    }

    #[test]
    fn empty_space_has_zero_system_energy() {
        let interaction = Interaction::new(Coulomb::new(0.1, LB));
        let space: Space<Euclidean> = Space::new(Euclidean);
        assert_eq!(interaction.system_energy(&space), 0.0);
    }
}
