//! Labeled initial-vector corpus for batch classification tests
//!
//! One vector per line: `<cells> <density> <majority>`, where `<cells>` is a
//! string of `0`/`1`, `<density>` the fraction of live cells and `<majority>`
//! is `0`, `1` or `-` for an exact tie. Blank lines and lines starting with
//! `#` are skipped.

use crate::analysis::readout::true_majority;
use crate::automaton::MajorityParams;
use crate::io::error::{AutomatonError, Result, invalid_parameter, parse_error};
use crate::io::initial::{at_density, from_bitstring};
use crate::lattice::Generation;
use rand::Rng;
use std::fmt::Write as _;
use std::path::Path;

/// Initial vector paired with its true majority symbol
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledVector {
    /// Cell values
    pub cells: Generation,
    /// Fraction of live cells
    pub density: f64,
    /// Symbol held by more than half the cells, `None` on a tie
    pub majority: Option<u8>,
}

impl LabeledVector {
    /// Label a vector from its own cell counts
    pub fn from_cells(cells: Generation) -> Self {
        let density = cells.density();
        let majority = true_majority(&cells);
        Self {
            cells,
            density,
            majority,
        }
    }
}

/// Shape of a generated corpus
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorpusConfig {
    /// Cells per vector
    pub length: usize,
    /// Number of densities drawn
    pub densities: usize,
    /// Vectors shuffled per drawn density
    pub shuffles_per_density: usize,
    /// Inclusive range densities are drawn from
    pub density_range: (f64, f64),
}

/// Draw densities uniformly from the configured range and shuffle vectors at each
///
/// # Errors
///
/// Returns an error if:
/// - the density range is empty or leaves `[0, 1]`
/// - `length` is zero
pub fn generate_corpus<R: Rng + ?Sized>(
    config: &CorpusConfig,
    rng: &mut R,
) -> Result<Vec<LabeledVector>> {
    let (low, high) = config.density_range;
    if !(0.0..=1.0).contains(&low) || !(0.0..=1.0).contains(&high) || low > high {
        return Err(invalid_parameter(
            "density_range",
            &format!("{low}..{high}"),
            &"must be an ordered range within [0, 1]",
        ));
    }

    let mut corpus = Vec::with_capacity(config.densities * config.shuffles_per_density);
    for _ in 0..config.densities {
        let density = rng.random_range(low..=high);
        for _ in 0..config.shuffles_per_density {
            let cells = at_density(config.length, density, rng)?;
            corpus.push(LabeledVector::from_cells(cells));
        }
    }
    Ok(corpus)
}

/// Render a corpus in the line format
pub fn format_corpus(corpus: &[LabeledVector]) -> String {
    let mut text = String::new();
    for vector in corpus {
        let majority = vector
            .majority
            .map_or_else(|| "-".to_string(), |symbol| symbol.to_string());
        let _ = writeln!(text, "{} {} {majority}", vector.cells, vector.density);
    }
    text
}

/// Parse a corpus from the line format
///
/// # Errors
///
/// Returns [`AutomatonError::Parse`] naming the first malformed line
pub fn parse_corpus(text: &str) -> Result<Vec<LabeledVector>> {
    let mut corpus = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let [bits, density, majority] = fields.as_slice() else {
            return Err(parse_error(
                line_number,
                &format!("expected 3 fields, found {}", fields.len()),
            ));
        };

        let cells = from_bitstring(bits).map_err(|err| parse_error(line_number, &err))?;
        let density = density
            .parse::<f64>()
            .map_err(|err| parse_error(line_number, &format!("bad density '{density}': {err}")))?;
        let majority = match *majority {
            "0" => Some(0),
            "1" => Some(1),
            "-" => None,
            other => {
                return Err(parse_error(
                    line_number,
                    &format!("bad majority '{other}' (expected 0, 1 or -)"),
                ));
            }
        };

        corpus.push(LabeledVector {
            cells,
            density,
            majority,
        });
    }
    Ok(corpus)
}

/// Write a corpus file, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written
pub fn write_corpus(path: &Path, corpus: &[LabeledVector]) -> Result<()> {
    write_text(path, &format_corpus(corpus), "write corpus")
}

// Shared by every text export: parents are created, failures name the operation
pub(crate) fn write_text(path: &Path, text: &str, operation: &'static str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AutomatonError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    std::fs::write(path, text).map_err(|e| AutomatonError::FileSystem {
        path: path.to_path_buf(),
        operation,
        source: e,
    })
}

/// Read a corpus file
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds a malformed line
pub fn read_corpus(path: &Path) -> Result<Vec<LabeledVector>> {
    let text = std::fs::read_to_string(path).map_err(|e| AutomatonError::FileSystem {
        path: path.to_path_buf(),
        operation: "read corpus",
        source: e,
    })?;
    parse_corpus(&text)
}

/// Parse a list of `(j, k)` pairs written as `j:k`, separated by commas or whitespace
///
/// # Errors
///
/// Returns [`AutomatonError::InvalidParameter`] for `params` naming the
/// one-based position of a malformed pair, or for `j`/`k` if a distance is not
/// strictly positive
pub fn parse_param_list(text: &str) -> Result<Vec<MajorityParams>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(index, token)| {
            let malformed = |reason: String| {
                invalid_parameter("params", &token, &format!("pair {}: {reason}", index + 1))
            };
            let (j, k) = token
                .split_once(':')
                .ok_or_else(|| malformed("expected j:k".to_string()))?;
            let j = j
                .parse::<i64>()
                .map_err(|err| malformed(format!("bad j '{j}': {err}")))?;
            let k = k
                .parse::<i64>()
                .map_err(|err| malformed(format!("bad k '{k}': {err}")))?;
            MajorityParams::new(j, k)
        })
        .collect()
}
