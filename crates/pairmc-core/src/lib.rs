//! # pairmc Core Library
//!
//! Pair potentials, energy aggregation and Metropolis acceptance for molecular
//! Monte Carlo simulations of point particles.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Particle`, `Group`, `Space`),
//!   the pure pair-potential kernels, the pluggable `PairPotential` models (analytical and
//!   PMF-tabulated) and the PMF file format.
//!
//! - **[`engine`]: The Logic Core.** The `Interaction` aggregator that sums pair energies over
//!   particles and groups, the `HardSphere` overlap checker, the Metropolis criterion, the
//!   energy drift tracker and configuration validation.
//!
//! - **[`workflows`]: The Public API.** Builds the run-wide potential and aggregator from a
//!   TOML parameter file, ready for a Monte Carlo driver.
//!
//! The library emits `tracing` events but never installs a subscriber.

pub mod core;
pub mod engine;
pub mod workflows;
