use nalgebra::Vector3;

// All kernels are dimensionless: energies come out in kT/lB for unit charges,
// distances in the same length unit as the Bjerrum length.

/// Separation below which two particles count as coincident.
const MIN_DISTANCE: f64 = 1e-6;
/// Finite energy returned for coincident particles.
pub const OVERLAP_PENALTY: f64 = 1e10;

/// Lennard-Jones 12-6 term, `eps * ((sigma/r)^12 - (sigma/r)^6)`, from the squared distance.
#[inline]
pub fn lennard_jones(r2: f64, sigma: f64, epsilon: f64) -> f64 {
    debug_assert!(r2 > 0.0, "coincident particles (r2 = {r2})");
    if r2 < MIN_DISTANCE * MIN_DISTANCE {
        return OVERLAP_PENALTY;
    }
    let x = sigma * sigma / r2;
    let x3 = x * x * x;
    let energy = epsilon * (x3 * x3 - x3);
    if energy.is_finite() {
        energy
    } else {
        OVERLAP_PENALTY
    }
}

/// Bare Coulomb term for a charge product `qq` at distance `r`.
///
/// Coincident charges give `±OVERLAP_PENALTY` with the sign of `qq`.
#[inline]
pub fn coulomb(qq: f64, r: f64) -> f64 {
    debug_assert!(r > 0.0, "coincident particles (r = {r})");
    if r < MIN_DISTANCE {
        return if qq == 0.0 {
            0.0
        } else {
            qq.signum() * OVERLAP_PENALTY
        };
    }
    qq / r
}

/// Screened Coulomb term, `qq/r * exp(-kappa r)`.
#[inline]
pub fn debye_huckel(qq: f64, r: f64, kappa: f64) -> f64 {
    coulomb(qq, r) * (-kappa * r).exp()
}

/// Harmonic bond, `k (r - r0)^2`.
#[inline]
pub fn harmonic(r: f64, force_constant: f64, equilibrium_dist: f64) -> f64 {
    let dr = r - equilibrium_dist;
    force_constant * dr * dr
}

/// Interaction between two point dipoles separated by `r`.
///
/// `u = (mu_a . mu_b - 3 (mu_a . r^)(mu_b . r^)) / |r|^3`
#[inline]
pub fn dipole_dipole(mu_a: &Vector3<f64>, mu_b: &Vector3<f64>, r: &Vector3<f64>) -> f64 {
    let r2 = r.norm_squared();
    debug_assert!(r2 > 0.0);
    let r1 = r2.sqrt();
    let r3 = r2 * r1;
    let unit = r / r1;
    (mu_a.dot(mu_b) - 3.0 * mu_a.dot(&unit) * mu_b.dot(&unit)) / r3
}

/// Interaction between a point charge and a point dipole.
///
/// `r` points from the charge to the dipole: `u = -q (mu . r) / |r|^3`.
#[inline]
pub fn ion_dipole(charge: f64, mu: &Vector3<f64>, r: &Vector3<f64>) -> f64 {
    let r2 = r.norm_squared();
    debug_assert!(r2 > 0.0);
    -charge * mu.dot(r) / (r2 * r2.sqrt())
}
