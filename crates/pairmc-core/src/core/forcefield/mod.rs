//! # Force Field Module
//!
//! Pair potentials between point particles, selected once per simulation run.
//!
//! ## Overview
//!
//! - **Lennard-Jones** repulsion and dispersion with sigma taken from the particle radii
//! - **Coulomb** electrostatics scaled by the Bjerrum length
//! - **Debye-Hückel** screened electrostatics
//! - **Tabulated PMF** energies read from disk, with an analytical fallback
//!
//! Every model implements [`pairpot::PairPotential`] and returns energies in
//! kT/lB; the aggregator in [`crate::engine::interaction`] converts to kT.
//!
//! ## Key Components
//!
//! - [`potentials`] - Closed-form kernels
//! - [`pairpot`] - The `PairPotential` contract and the analytical models
//! - [`pmf`] - PMF tables, their store and the tabulated potential
//! - [`params`] - Run parameters read from TOML
//!
//! ```ignore
//! use pairmc::core::forcefield::pairpot::{Coulomb, PairPotential};
//!
//! let coulomb = Coulomb::new(0.5, 7.1);
//! let u = coulomb.energy(&a, &b, 25.0) * coulomb.bjerrum_length();
//! ```

pub mod pairpot;
pub mod params;
pub mod pmf;
pub(crate) mod potentials;
