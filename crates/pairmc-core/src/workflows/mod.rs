//! # Workflows Module
//!
//! High-level entry points that turn a parameter file into a ready-to-use
//! potential, aggregator and drift tracker.
//!
//! - **Setup Workflow** ([`setup`]) - Loads and validates the TOML parameters, selects the
//!   analytical model, loads PMF tables for the registered species and builds the aggregator.

pub mod setup;
