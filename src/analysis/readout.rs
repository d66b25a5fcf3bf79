//! Reading a majority symbol out of vectors and finished runs

use crate::automaton::RunResult;
use crate::lattice::Generation;

/// The symbol held by more than half of the cells, `None` on an exact tie
pub fn true_majority(generation: &Generation) -> Option<u8> {
    let live = generation.ones() * 2;
    match live.cmp(&generation.len()) {
        std::cmp::Ordering::Greater => Some(1),
        std::cmp::Ordering::Less => Some(0),
        std::cmp::Ordering::Equal => None,
    }
}

/// Majority guessed by a GKL-style run: its homogeneous symbol, if it reached one
pub const fn predicted_majority(result: &RunResult) -> Option<u8> {
    result.predicted_symbol()
}

/// Majority read off a relaxed Rule 184 configuration
///
/// After relaxation a ring with more 1s than 0s shows at least one block of two
/// adjacent 1s inside an alternating background, and symmetrically for 0s; a
/// ring at density exactly one half is a pure alternation. Adjacency wraps
/// around the ring. Returns `None` for pure alternation and for configurations
/// still holding blocks of both symbols.
pub fn rule184_majority(generation: &Generation) -> Option<u8> {
    let len = generation.len();
    if len == 0 {
        return None;
    }
    if let Some(symbol) = generation.homogeneous_symbol() {
        return Some(symbol);
    }

    let mut ones_block = false;
    let mut zeros_block = false;
    for position in 0..len {
        let here = generation.get(position);
        let next = generation.get((position + 1) % len);
        if here == next {
            if here == 1 {
                ones_block = true;
            } else {
                zeros_block = true;
            }
        }
    }

    match (ones_block, zeros_block) {
        (true, false) => Some(1),
        (false, true) => Some(0),
        _ => None,
    }
}
