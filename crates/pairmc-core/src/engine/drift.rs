use std::fmt;
use std::ops::AddAssign;
use tracing::{debug, warn};

use crate::core::forcefield::params::DEFAULT_DRIFT_TOLERANCE;

/// Running energy total kept in step with accepted moves.
///
/// The tracked value is compared against a from-scratch recomputation now and
/// then; a mismatch is reported but never corrected.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyDrift {
    initial: f64,
    current: f64,
    drift: f64,
    tolerance: f64,
}

impl Default for EnergyDrift {
    fn default() -> Self {
        Self::new(DEFAULT_DRIFT_TOLERANCE)
    }
}

impl EnergyDrift {
    pub fn new(tolerance: f64) -> Self {
        Self {
            initial: 0.0,
            current: 0.0,
            drift: 0.0,
            tolerance,
        }
    }

    /// Resets the tracker to a freshly computed energy.
    pub fn init(&mut self, energy: f64) -> f64 {
        self.initial = energy;
        self.current = energy;
        self.drift = 0.0;
        energy
    }

    pub fn initial(&self) -> f64 {
        self.initial
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    /// Drift found by the most recent [`check_drift`](Self::check_drift).
    pub fn drift(&self) -> f64 {
        self.drift
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Drift relative to the running total; absolute when the total is zero.
    pub fn relative_drift(&self) -> f64 {
        if self.current == 0.0 {
            self.drift.abs()
        } else {
            (self.drift / self.current).abs()
        }
    }

    /// Compares the running total against `recomputed` and returns `recomputed - current`.
    pub fn check_drift(&mut self, recomputed: f64) -> f64 {
        self.drift = recomputed - self.current;
        let relative = self.relative_drift();
        if relative > self.tolerance {
            warn!(
                running = self.current,
                recomputed,
                drift = self.drift,
                relative,
                "Energy drift exceeds tolerance {:e}",
                self.tolerance
            );
        } else {
            debug!(drift = self.drift, "Energy drift within tolerance");
        }
        self.drift
    }
}

impl AddAssign<f64> for EnergyDrift {
    fn add_assign(&mut self, du: f64) {
        self.current += du;
    }
}

impl fmt::Display for EnergyDrift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Energy drift:")?;
        writeln!(f, "  initial energy (kT)  {:>14.6}", self.initial)?;
        writeln!(f, "  current energy (kT)  {:>14.6}", self.current)?;
        writeln!(f, "  change (kT)          {:>14.6}", self.current - self.initial)?;
        write!(f, "  drift (kT)           {:>14.6e}", self.drift)
    }
}
