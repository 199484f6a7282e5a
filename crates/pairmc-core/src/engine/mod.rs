//! # Engine Module
//!
//! Energy evaluation and move acceptance for a Monte Carlo driver.
//!
//! ## Architecture
//!
//! - **Energy aggregation** ([`interaction`]) - Sums pair energies over particles, groups and subsets
//! - **Overlap checks** ([`hardsphere`]) - Hard-sphere vetoes evaluated before any energy
//! - **Acceptance** ([`metropolis`]) - The canonical Metropolis criterion
//! - **Drift tracking** ([`drift`]) - Running energy total checked against recomputation
//! - **Configuration** ([`config`]) - Parameter builders and validation
//!
//! A move is proposed by the caller, optionally vetoed by [`hardsphere::HardSphere`],
//! scored by [`interaction::Interaction`], decided by [`metropolis::metropolis`], and
//! on acceptance added to [`drift::EnergyDrift`].

pub mod config;
pub mod drift;
pub mod hardsphere;
pub mod interaction;
pub mod metropolis;
