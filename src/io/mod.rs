//! Everything that crosses the engine boundary
//!
//! This module contains the collaborators around the core:
//! - Initial-vector generators and labeled corpora
//! - PNG rendering, per-trial logs and terminal progress
//! - The command-line front end
//! - Error types and run defaults

/// Command-line parsing and command execution
pub mod cli;
/// Run defaults and display constants
pub mod configuration;
/// Labeled-vector corpus generation and file format
pub mod corpus;
/// Error types shared by the whole crate
pub mod error;
/// History rendering to PNG
pub mod image;
/// Initial-vector generators
pub mod initial;
/// Progress bars for batch runs
pub mod progress;
/// Per-trial log export for trials and sweeps
pub mod trial_log;
