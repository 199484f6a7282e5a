//! # Core Models Module
//!
//! The particle-level data the energy routines read.
//!
//! ## Key Components
//!
//! - [`particle`] - Position, charge, radius and species of a single particle
//! - [`species`] - Species definitions, canonical species pairs and the registry
//! - [`group`] - Contiguous index ranges representing molecules or rigid units
//! - [`space`] - The particle container, generic over its [`Geometry`](crate::core::utils::geometry::Geometry)
//!
//! ```ignore
//! use pairmc::core::models::{particle::Particle, space::Space, species::SpeciesId};
//! use pairmc::core::utils::geometry::Euclidean;
//!
//! let mut space = Space::new(Euclidean);
//! space.push(Particle::new(SpeciesId(0), Point3::new(0.0, 0.0, 0.0), 1.0, 2.0));
//! ```

pub mod group;
pub mod particle;
pub mod space;
pub mod species;
