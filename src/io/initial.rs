//! Initial-vector generators
//!
//! All randomness comes from the caller's RNG, so a seeded `StdRng` reproduces
//! the same vectors on every run.

use crate::io::error::{AutomatonError, Result, invalid_parameter};
use crate::lattice::Generation;
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;
use std::str::FromStr;

/// Each cell independently 0 or 1 with equal probability
///
/// # Errors
///
/// Returns an error if `len` is zero
pub fn random_bits<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Result<Generation> {
    let cells: Vec<u8> = (0..len).map(|_| u8::from(rng.random::<bool>())).collect();
    Generation::new(&cells)
}

/// Exactly `floor(len * density)` live cells in shuffled positions
///
/// # Errors
///
/// Returns an error if:
/// - `len` is zero
/// - `density` is not within `[0, 1]`
pub fn at_density<R: Rng + ?Sized>(len: usize, density: f64, rng: &mut R) -> Result<Generation> {
    if !(0.0..=1.0).contains(&density) {
        return Err(invalid_parameter(
            "density",
            &density,
            &"must lie within [0, 1]",
        ));
    }

    let live = ((len as f64 * density) as usize).min(len);
    let mut cells = vec![0; len];
    if let Some(prefix) = cells.get_mut(..live) {
        prefix.fill(1);
    }
    cells.shuffle(rng);
    Generation::new(&cells)
}

/// A single live cell just left of the middle, everything else dead
///
/// # Errors
///
/// Returns an error if `len` is zero
pub fn single_seed(len: usize) -> Result<Generation> {
    seeded(len, 0, 1)
}

/// A single dead cell just left of the middle, everything else live
///
/// # Errors
///
/// Returns an error if `len` is zero
pub fn inverted_seed(len: usize) -> Result<Generation> {
    seeded(len, 1, 0)
}

fn seeded(len: usize, background: u8, seed: u8) -> Result<Generation> {
    let mut cells = vec![background; len];
    if let Some(cell) = cells.get_mut((len / 2).saturating_sub(1)) {
        *cell = seed;
    }
    Generation::new(&cells)
}

/// Parse a literal vector such as `0110` or `[0, 1, 1, 0]`
///
/// Whitespace, commas and square brackets are ignored.
///
/// # Errors
///
/// Returns an error if:
/// - any other character than `0` or `1` remains
/// - no cells remain
pub fn from_bitstring(text: &str) -> Result<Generation> {
    let mut cells = Vec::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '0' => cells.push(0),
            '1' => cells.push(1),
            ',' | '[' | ']' => {}
            other if other.is_whitespace() => {}
            other => {
                return Err(invalid_parameter(
                    "bits",
                    &other,
                    &"vectors may only contain 0 and 1",
                ));
            }
        }
    }
    Generation::new(&cells)
}

/// Named initial-vector recipe, as accepted on the command line
#[derive(Clone, Debug, PartialEq)]
pub enum InitialPattern {
    /// Independent fair coin per cell
    Random,
    /// Single live cell
    Single,
    /// Single dead cell
    Inverted,
    /// Shuffled vector at an exact density
    Density(f64),
    /// Literal cell values; overrides the requested length
    Bits(String),
}

impl InitialPattern {
    /// Build a generation of `len` cells following this recipe
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe's parameters are invalid or `len` is zero
    pub fn build<R: Rng + ?Sized>(&self, len: usize, rng: &mut R) -> Result<Generation> {
        match self {
            Self::Random => random_bits(len, rng),
            Self::Single => single_seed(len),
            Self::Inverted => inverted_seed(len),
            Self::Density(density) => at_density(len, *density, rng),
            Self::Bits(bits) => from_bitstring(bits),
        }
    }
}

impl FromStr for InitialPattern {
    type Err = AutomatonError;

    fn from_str(text: &str) -> Result<Self> {
        match text.split_once(':') {
            None => match text {
                "random" => Ok(Self::Random),
                "single" => Ok(Self::Single),
                "inverted" => Ok(Self::Inverted),
                _ => Err(invalid_parameter(
                    "init",
                    &text,
                    &"expected random, single, inverted, density:<p> or bits:<01..>",
                )),
            },
            Some(("density", value)) => value
                .parse::<f64>()
                .ok()
                .filter(|density| (0.0..=1.0).contains(density))
                .map(Self::Density)
                .ok_or_else(|| invalid_parameter("density", &value, &"expected a number in [0, 1]")),
            Some(("bits", value)) => {
                from_bitstring(value)?;
                Ok(Self::Bits(value.to_string()))
            }
            Some((kind, _)) => Err(invalid_parameter(
                "init",
                &kind,
                &"unknown pattern kind",
            )),
        }
    }
}

impl fmt::Display for InitialPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => f.write_str("random"),
            Self::Single => f.write_str("single"),
            Self::Inverted => f.write_str("inverted"),
            Self::Density(density) => write!(f, "density:{density}"),
            Self::Bits(bits) => write!(f, "bits:{bits}"),
        }
    }
}
