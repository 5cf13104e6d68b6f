//! Command-line runner for remod.
//!
//! Discovers JavaScript sources, applies the transform pipeline per file, and
//! writes the results back. All transformation logic lives in
//! `remod-transforms`; this crate only drives it.

pub mod args;
pub mod driver;
