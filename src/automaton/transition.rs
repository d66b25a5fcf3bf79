use crate::automaton::rule_table::RuleTable;
use crate::io::error::{Result, invalid_parameter};
use std::fmt;

/// Neighbor distances `(j, k)` of a GKL-style majority rule
///
/// The cell at position `i` reads `i-k, i-j, i, i+j, i+k`. Both distances are
/// strictly positive; `j == k` is accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MajorityParams {
    j: usize,
    k: usize,
}

impl MajorityParams {
    /// Validate a pair of neighbor distances
    ///
    /// # Errors
    ///
    /// Returns an error if either distance is not strictly positive
    pub fn new(j: i64, k: i64) -> Result<Self> {
        let j = Self::positive("j", j)?;
        let k = Self::positive("k", k)?;
        Ok(Self { j, k })
    }

    fn positive(parameter: &'static str, value: i64) -> Result<usize> {
        usize::try_from(value)
            .ok()
            .filter(|&distance| distance > 0)
            .ok_or_else(|| invalid_parameter(parameter, &value, &"must be strictly positive"))
    }

    /// Inner distance
    pub const fn j(&self) -> usize {
        self.j
    }

    /// Outer distance
    pub const fn k(&self) -> usize {
        self.k
    }

    /// Smallest ring on which all five neighbors are distinct cells
    pub fn min_distinct_width(&self) -> usize {
        2 * self.j.max(self.k) + 1
    }
}

impl fmt::Display for MajorityParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.j, self.k)
    }
}

/// Local rule mapping a neighbor tuple to the next cell value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionFunction {
    /// Elementary rule over `(left, center, right)`
    Elementary(RuleTable),
    /// Self-dependent majority rule over `(m_k, m_j, x, p_j, p_k)`
    Majority(MajorityParams),
}

impl TransitionFunction {
    /// Elementary rule from its number
    ///
    /// # Errors
    ///
    /// Returns an error if `rule` is outside `[0, 255]`
    pub fn elementary(rule: i64) -> Result<Self> {
        RuleTable::from_rule_number(rule).map(Self::Elementary)
    }

    /// Majority rule with neighbor distances `(j, k)`
    ///
    /// # Errors
    ///
    /// Returns an error if either distance is not strictly positive
    pub fn majority(j: i64, k: i64) -> Result<Self> {
        MajorityParams::new(j, k).map(Self::Majority)
    }

    /// Relative offsets the neighbor tuple is sampled at, in tuple order
    pub fn offsets(&self) -> Vec<isize> {
        match self {
            Self::Elementary(_) => vec![-1, 0, 1],
            Self::Majority(params) => {
                let j = params.j as isize;
                let k = params.k as isize;
                vec![-k, -j, 0, j, k]
            }
        }
    }

    /// Next value of the cell whose neighborhood is `tuple`
    ///
    /// Missing tuple entries read as 0 and any non-zero entry as 1.
    pub fn next_value(&self, tuple: &[u8]) -> u8 {
        let at = |slot: usize| u8::from(tuple.get(slot).is_some_and(|&value| value != 0));
        match self {
            Self::Elementary(table) => table.lookup(at(0), at(1), at(2)),
            Self::Majority(_) => {
                let (minus_k, minus_j, center, plus_j, plus_k) =
                    (at(0), at(1), at(2), at(3), at(4));
                // Three binary values: sum / 2 is 1 exactly when at least two are set
                if center == 0 {
                    (minus_k + minus_j + center) / 2
                } else {
                    (center + plus_j + plus_k) / 2
                }
            }
        }
    }
}

impl fmt::Display for TransitionFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Elementary(table) => write!(f, "{table}"),
            Self::Majority(params) => write!(f, "majority {params}"),
        }
    }
}
