use crate::lattice::Generation;

/// Index of the cell `offset` places from `index` on a ring of `len` cells
///
/// Wraps in both directions; `len` must be non-zero.
pub const fn wrap_index(index: usize, offset: isize, len: usize) -> usize {
    let len_signed = len as isize;
    let reduced = offset % len_signed;
    ((index as isize % len_signed + reduced + len_signed) % len_signed) as usize
}

/// Reads neighbor tuples at fixed relative offsets with circular wraparound
///
/// Offsets are kept in caller order, so the tuple for position `i` is
/// `[g[i + offsets[0]], g[i + offsets[1]], ...]` with indices taken modulo the
/// generation length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborhoodSampler {
    offsets: Vec<isize>,
}

impl NeighborhoodSampler {
    /// Create a sampler for the given offsets
    pub fn new(offsets: &[isize]) -> Self {
        Self {
            offsets: offsets.to_vec(),
        }
    }

    /// Offsets in tuple order
    pub fn offsets(&self) -> &[isize] {
        &self.offsets
    }

    /// Number of values in each tuple
    pub const fn arity(&self) -> usize {
        self.offsets.len()
    }

    /// Neighbor tuple for every cell position, in position order
    pub fn sample(&self, generation: &Generation) -> Vec<Vec<u8>> {
        let mut buffer = vec![0; self.arity()];
        (0..generation.len())
            .map(|position| {
                self.sample_into(generation, position, &mut buffer);
                buffer.clone()
            })
            .collect()
    }

    /// Fill `buffer` with the neighbor tuple of `position`
    ///
    /// Writes at most `buffer.len()` values.
    pub fn sample_into(&self, generation: &Generation, position: usize, buffer: &mut [u8]) {
        let len = generation.len();
        if len == 0 {
            return;
        }
        for (slot, &offset) in buffer.iter_mut().zip(&self.offsets) {
            *slot = generation.get(wrap_index(position, offset, len));
        }
    }
}
