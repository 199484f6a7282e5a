use super::params::{PotentialModel, PotentialParams};
use super::pmf::TabulatedPotential;
use super::potentials;
use crate::core::models::particle::Particle;

/// A symmetric pair potential selected once per simulation run.
///
/// Energies are returned in units of kT/lB, with lB given by
/// [`bjerrum_length`](PairPotential::bjerrum_length); the aggregator multiplies
/// by lB to obtain kT. `r2` is the squared separation as measured by the
/// container geometry and must be strictly positive.
pub trait PairPotential: Sync {
    fn name(&self) -> &'static str;

    fn bjerrum_length(&self) -> f64;

    /// Full pair energy in kT/lB.
    fn energy(&self, a: &Particle, b: &Particle, r2: f64) -> f64;

    /// Long-range electrostatic part of [`energy`](PairPotential::energy), with no
    /// short-range (Lennard-Jones) contribution.
    fn electrostatic(&self, a: &Particle, b: &Particle, r2: f64) -> f64;
}

/// Lennard-Jones only. Charges are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct LennardJones {
    /// Well parameter in kT/lB.
    epsilon: f64,
    bjerrum_length: f64,
}

impl LennardJones {
    /// `epsilon` is given in kT and stored in kT/lB.
    pub fn new(epsilon: f64, bjerrum_length: f64) -> Self {
        Self {
            epsilon: epsilon / bjerrum_length,
            bjerrum_length,
        }
    }

    #[inline]
    pub fn lj(&self, a: &Particle, b: &Particle, r2: f64) -> f64 {
        potentials::lennard_jones(r2, a.radius + b.radius, self.epsilon)
    }
}

impl PairPotential for LennardJones {
    fn name(&self) -> &'static str {
        "Lennard-Jones"
    }

    fn bjerrum_length(&self) -> f64 {
        self.bjerrum_length
    }

    #[inline]
    fn energy(&self, a: &Particle, b: &Particle, r2: f64) -> f64 {
        self.lj(a, b, r2)
    }

    #[inline]
    fn electrostatic(&self, _a: &Particle, _b: &Particle, _r2: f64) -> f64 {
        0.0
    }
}

/// Coulomb plus Lennard-Jones.
#[derive(Debug, Clone, PartialEq)]
pub struct Coulomb {
    lj: LennardJones,
}

impl Coulomb {
    pub fn new(epsilon: f64, bjerrum_length: f64) -> Self {
        Self {
            lj: LennardJones::new(epsilon, bjerrum_length),
        }
    }
}

impl PairPotential for Coulomb {
    fn name(&self) -> &'static str {
        "Coulomb + Lennard-Jones"
    }

    fn bjerrum_length(&self) -> f64 {
        self.lj.bjerrum_length
    }

    #[inline]
    fn energy(&self, a: &Particle, b: &Particle, r2: f64) -> f64 {
        self.lj.lj(a, b, r2) + self.electrostatic(a, b, r2)
    }

    #[inline]
    fn electrostatic(&self, a: &Particle, b: &Particle, r2: f64) -> f64 {
        let qq = a.charge * b.charge;
        if qq != 0.0 {
            potentials::coulomb(qq, r2.sqrt())
        } else {
            0.0
        }
    }
}

/// Debye-Hückel screened Coulomb plus Lennard-Jones.
#[derive(Debug, Clone, PartialEq)]
pub struct DebyeHuckel {
    lj: LennardJones,
    kappa: f64,
}

impl DebyeHuckel {
    /// `kappa` is the inverse Debye screening length.
    pub fn new(epsilon: f64, bjerrum_length: f64, kappa: f64) -> Self {
        Self {
            lj: LennardJones::new(epsilon, bjerrum_length),
            kappa,
        }
    }

    pub fn debye_length(&self) -> f64 {
        1.0 / self.kappa
    }
}

impl PairPotential for DebyeHuckel {
    fn name(&self) -> &'static str {
        "Debye-Hückel + Lennard-Jones"
    }

    fn bjerrum_length(&self) -> f64 {
        self.lj.bjerrum_length
    }

    #[inline]
    fn energy(&self, a: &Particle, b: &Particle, r2: f64) -> f64 {
        self.lj.lj(a, b, r2) + self.electrostatic(a, b, r2)
    }

    #[inline]
    fn electrostatic(&self, a: &Particle, b: &Particle, r2: f64) -> f64 {
        let qq = a.charge * b.charge;
        if qq != 0.0 {
            potentials::debye_huckel(qq, r2.sqrt(), self.kappa)
        } else {
            0.0
        }
    }
}

/// One of the analytical models, chosen from configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticalPotential {
    LennardJones(LennardJones),
    Coulomb(Coulomb),
    DebyeHuckel(DebyeHuckel),
}

impl AnalyticalPotential {
    pub fn from_params(params: &PotentialParams) -> Self {
        match params.model {
            PotentialModel::LennardJones => {
                Self::LennardJones(LennardJones::new(params.epsilon, params.bjerrum_length))
            }
            PotentialModel::Coulomb => {
                Self::Coulomb(Coulomb::new(params.epsilon, params.bjerrum_length))
            }
            PotentialModel::DebyeHuckel => Self::DebyeHuckel(DebyeHuckel::new(
                params.epsilon,
                params.bjerrum_length,
                params.inverse_debye_length,
            )),
        }
    }
}

impl PairPotential for AnalyticalPotential {
    fn name(&self) -> &'static str {
        match self {
            Self::LennardJones(p) => p.name(),
            Self::Coulomb(p) => p.name(),
            Self::DebyeHuckel(p) => p.name(),
        }
    }

    fn bjerrum_length(&self) -> f64 {
        match self {
            Self::LennardJones(p) => p.bjerrum_length(),
            Self::Coulomb(p) => p.bjerrum_length(),
            Self::DebyeHuckel(p) => p.bjerrum_length(),
        }
    }

    #[inline]
    fn energy(&self, a: &Particle, b: &Particle, r2: f64) -> f64 {
        match self {
            Self::LennardJones(p) => p.energy(a, b, r2),
            Self::Coulomb(p) => p.energy(a, b, r2),
            Self::DebyeHuckel(p) => p.energy(a, b, r2),
        }
    }

    #[inline]
    fn electrostatic(&self, a: &Particle, b: &Particle, r2: f64) -> f64 {
        match self {
            Self::LennardJones(p) => p.electrostatic(a, b, r2),
            Self::Coulomb(p) => p.electrostatic(a, b, r2),
            Self::DebyeHuckel(p) => p.electrostatic(a, b, r2),
        }
    }
}

/// The run-wide potential: an analytical model, or PMF tables falling back to one.
#[derive(Debug, Clone)]
pub enum SelectedPotential {
    Analytical(AnalyticalPotential),
    Tabulated(TabulatedPotential<AnalyticalPotential>),
}

impl PairPotential for SelectedPotential {
    fn name(&self) -> &'static str {
        match self {
            Self::Analytical(p) => p.name(),
            Self::Tabulated(p) => p.name(),
        }
    }

    fn bjerrum_length(&self) -> f64 {
        match self {
            Self::Analytical(p) => p.bjerrum_length(),
            Self::Tabulated(p) => p.bjerrum_length(),
        }
    }

    #[inline]
    fn energy(&self, a: &Particle, b: &Particle, r2: f64) -> f64 {
        match self {
            Self::Analytical(p) => p.energy(a, b, r2),
            Self::Tabulated(p) => p.energy(a, b, r2),
        }
    }

    #[inline]
    fn electrostatic(&self, a: &Particle, b: &Particle, r2: f64) -> f64 {
        match self {
            Self::Analytical(p) => p.electrostatic(a, b, r2),
            Self::Tabulated(p) => p.electrostatic(a, b, r2),
        }
    }
}
