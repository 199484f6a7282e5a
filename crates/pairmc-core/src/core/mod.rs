//! # Core Module
//!
//! Data models, pair potentials and file formats shared by the engine and workflows.
//!
//! ## Architecture
//!
//! - **Particles and containers** ([`models`]) - Particles, species, groups and the `Space`
//!   container whose distances come from an injected geometry
//! - **Pair potentials** ([`forcefield`]) - Closed-form kernels, the `PairPotential` models,
//!   PMF tables and the run parameters
//! - **File I/O** ([`io`]) - Reading and writing raw PMF sample files
//! - **Geometry** ([`utils`]) - Distance metric of the simulation container
//!
//! Everything here is a pure read once constructed; mutation happens only through
//! the particle container.

pub mod forcefield;
pub mod io;
pub mod models;
pub mod utils;
