//! Cell storage for the ring lattice
//!
//! This module contains the data the engine evolves:
//! - Bit-packed generations and their density
//! - The generation history buffer

/// Bit-packed generation of binary cells
pub mod generation;
/// History buffer with bounded retention
pub mod history;

pub use generation::Generation;
pub use history::{History, Retention};
