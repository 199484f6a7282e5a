//! Input/output for potential-of-mean-force data.
//!
//! PMF files are plain text holding whitespace separated `(distance, energy)`
//! pairs, one file per species pair named `<A>-<B>.dat`.

pub mod pmf_file;
