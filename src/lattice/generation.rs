//! Bit-packed generation of binary cells on a ring

use crate::io::error::{AutomatonError, Result};
use bitvec::prelude::*;
use std::fmt;

/// One generation of the automaton: N binary cells arranged on a ring
///
/// Cells are stored one bit each. A generation is never empty and is never
/// mutated once built; the engine always writes the next generation into a
/// fresh buffer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Generation {
    bits: BitVec,
}

impl Generation {
    /// Build a generation from cell values
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `cells` is empty
    /// - any cell is not 0 or 1
    pub fn new(cells: &[u8]) -> Result<Self> {
        if cells.is_empty() {
            return Err(AutomatonError::EmptyInitialVector);
        }

        let mut bits = BitVec::with_capacity(cells.len());
        for (index, &value) in cells.iter().enumerate() {
            match value {
                0 => bits.push(false),
                1 => bits.push(true),
                _ => return Err(AutomatonError::InvalidCell { index, value }),
            }
        }

        Ok(Self { bits })
    }

    /// Wrap an existing bit vector
    ///
    /// # Errors
    ///
    /// Returns an error if `bits` is empty
    pub fn from_bits(bits: BitVec) -> Result<Self> {
        if bits.is_empty() {
            return Err(AutomatonError::EmptyInitialVector);
        }
        Ok(Self { bits })
    }

    // Only called with bits computed cell-by-cell from a non-empty predecessor
    pub(crate) const fn from_successor(bits: BitVec) -> Self {
        Self { bits }
    }

    /// A generation of `len` cells all holding `symbol` (any non-zero is 1)
    ///
    /// # Errors
    ///
    /// Returns an error if `len` is zero
    pub fn uniform(len: usize, symbol: u8) -> Result<Self> {
        Self::from_bits(BitVec::repeat(symbol != 0, len))
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always false; kept for parity with `len`
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Value of cell `index`, or 0 past the end
    pub fn get(&self, index: usize) -> u8 {
        u8::from(self.bits.get(index).as_deref() == Some(&true))
    }

    /// Number of live cells
    pub fn ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Fraction of live cells
    pub fn density(&self) -> f64 {
        self.ones() as f64 / self.len() as f64
    }

    /// The shared symbol if every cell holds the same value
    pub fn homogeneous_symbol(&self) -> Option<u8> {
        if self.bits.all() {
            Some(1)
        } else if self.bits.not_any() {
            Some(0)
        } else {
            None
        }
    }

    /// Cell values in ring order
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.bits.iter().by_vals().map(u8::from)
    }

    /// Copy the cells out as bytes
    pub fn to_vec(&self) -> Vec<u8> {
        self.iter().collect()
    }

    /// Underlying bit storage
    pub fn bits(&self) -> &BitSlice {
        &self.bits
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
