//! Mathematical utilities for run reporting

/// Means, spreads and success rates over run samples
pub mod statistics;
