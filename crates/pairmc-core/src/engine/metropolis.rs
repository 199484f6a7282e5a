use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    Accepted,
    Rejected,
}

impl Acceptance {
    pub fn is_accepted(self) -> bool {
        matches!(self, Acceptance::Accepted)
    }
}

impl From<bool> for Acceptance {
    fn from(accepted: bool) -> Self {
        if accepted {
            Acceptance::Accepted
        } else {
            Acceptance::Rejected
        }
    }
}

/// Canonical Metropolis criterion for an energy change `du` in kT.
///
/// Downhill and neutral moves are accepted without consuming a random number.
/// A `NaN` change is always rejected.
pub fn metropolis<R: Rng + ?Sized>(du: f64, rng: &mut R) -> bool {
    if du.is_nan() {
        return false;
    }
    if du <= 0.0 {
        return true;
    }
    rng.r#gen::<f64>() <= (-du).exp()
}

/// Metropolis test bound to its own random source.
#[derive(Debug, Clone)]
pub struct Metropolis<R: Rng = StdRng> {
    rng: R,
}

impl<R: Rng> Metropolis<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn test(&mut self, du: f64) -> Acceptance {
        metropolis(du, &mut self.rng).into()
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl Metropolis<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}
