//! One-dimensional binary cellular automata on a ring
//!
//! The engine evolves a circular array of 0/1 cells under either one of the
//! 256 elementary rules or a GKL-style majority rule with configurable neighbor
//! distances `(j, k)`, and stops on a step budget or once the ring becomes
//! homogeneous. Everything around it (initial vectors, corpora, batch trials,
//! rendering, the CLI) lives outside the evolution loop.

#![forbid(unsafe_code)]

/// Evolution engine, transition rules and stopping policy
pub mod automaton;
/// Majority readouts, batch trials and parameter sweeps
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Generation storage and history buffering
pub mod lattice;
/// Statistical helpers for run reports
pub mod math;

pub use automaton::{AutomatonEngine, RunResult, StoppingPolicy, TransitionFunction};
pub use io::error::{AutomatonError, Result};
pub use lattice::{Generation, History};
