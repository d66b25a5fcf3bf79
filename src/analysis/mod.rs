//! Density classification on top of the evolution engine

/// Majority readouts for vectors and finished runs
pub mod readout;
/// Batch trials, corpus evaluation and parameter sweeps
pub mod trials;
