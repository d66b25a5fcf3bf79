use crate::io::error::{AutomatonError, Result};
use std::fmt;

/// Truth table of one of the 256 elementary rules
///
/// Entry `v` gives the next state for the neighborhood whose pattern value is
/// `v = 4·L + 2·C + R`.
///
/// The table is read off the zero-padded 8-character binary string of the rule
/// number in reverse, so entry `v` is character `7 - v` of that string
/// (most-significant character at position 0). Rendered patterns depend on this
/// orientation; it works out to Wolfram's numbering, where rule 184 moves an
/// isolated live cell one place to the right per generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RuleTable {
    rule: u8,
    entries: [u8; 8],
}

impl RuleTable {
    /// Decode a rule number into its truth table
    ///
    /// # Errors
    ///
    /// Returns [`AutomatonError::InvalidRuleNumber`] if `n` is outside `[0, 255]`
    pub fn from_rule_number(n: i64) -> Result<Self> {
        let Ok(rule) = u8::try_from(n) else {
            return Err(AutomatonError::InvalidRuleNumber { value: n });
        };

        let binary = format!("{rule:08b}");
        let mut entries = [0; 8];
        for (entry, digit) in entries.iter_mut().zip(binary.bytes().rev()) {
            *entry = u8::from(digit == b'1');
        }

        Ok(Self { rule, entries })
    }

    /// Next state for the neighborhood `(left, center, right)`
    ///
    /// Any non-zero input counts as a live cell.
    pub fn lookup(&self, left: u8, center: u8, right: u8) -> u8 {
        let index = (usize::from(left != 0) << 2)
            | (usize::from(center != 0) << 1)
            | usize::from(right != 0);
        self.entries.get(index).copied().unwrap_or(0)
    }

    /// The rule number this table was decoded from
    pub const fn rule_number(&self) -> u8 {
        self.rule
    }

    /// Table entries indexed by neighborhood pattern value
    pub const fn entries(&self) -> [u8; 8] {
        self.entries
    }
}

impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {}", self.rule)
    }
}
