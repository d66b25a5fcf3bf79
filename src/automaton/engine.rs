//! Evolution loop over a ring of binary cells
//!
//! The engine is a pure function of (initial vector, transition, policy): it
//! holds no randomness and performs no I/O besides `log` diagnostics. Each new
//! generation is written to a fresh buffer, so the previous one stays readable
//! for the whole step.

use crate::automaton::neighborhood::NeighborhoodSampler;
use crate::automaton::stopping::{DegenerateHandling, Halt, StoppingPolicy};
use crate::automaton::transition::TransitionFunction;
use crate::io::error::{AutomatonError, Result};
use crate::lattice::{Generation, History, Retention};
use bitvec::prelude::*;
use log::{debug, warn};

/// How a run ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every cell reached the same symbol within the budget
    Converged {
        /// The shared symbol
        symbol: u8,
    },
    /// Budget or cap ran out on a mixed generation
    BudgetExhausted,
    /// The initial vector was already homogeneous and was not evolved
    Degenerate {
        /// The shared symbol
        symbol: u8,
    },
}

/// Summary of one run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunResult {
    /// Density of the last generation computed
    pub final_density: f64,
    /// Number of steps executed
    pub steps: usize,
    /// How the run ended
    pub outcome: Outcome,
}

impl RunResult {
    /// Whether the run converged before exhausting its budget
    pub const fn converged(&self) -> bool {
        matches!(self.outcome, Outcome::Converged { .. })
    }

    /// Whether the initial vector was reported as homogeneous
    pub const fn is_degenerate(&self) -> bool {
        matches!(self.outcome, Outcome::Degenerate { .. })
    }

    /// The homogeneous symbol, or `None` for a non-convergent run
    ///
    /// The budget is checked before convergence, so a ring that turns
    /// homogeneous exactly on the budget step is reported as
    /// [`Outcome::BudgetExhausted`] and yields `None` here.
    pub const fn predicted_symbol(&self) -> Option<u8> {
        match self.outcome {
            Outcome::Converged { symbol } | Outcome::Degenerate { symbol } => Some(symbol),
            Outcome::BudgetExhausted => None,
        }
    }
}

/// Drives generation-by-generation evolution under a stopping policy
#[derive(Clone, Copy, Debug, Default)]
pub struct AutomatonEngine {
    retention: Retention,
}

impl AutomatonEngine {
    /// Engine that keeps every generation
    pub const fn new() -> Self {
        Self {
            retention: Retention::All,
        }
    }

    /// Engine with a custom history retention
    pub const fn with_retention(retention: Retention) -> Self {
        Self { retention }
    }

    /// History retention used for runs
    pub const fn retention(&self) -> Retention {
        self.retention
    }

    /// Evolve `initial` under `transition` until `policy` halts
    ///
    /// Returns the history and a run summary. Step `t` of the history is the
    /// generation computed on the `t`-th application of the transition.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `initial` has no cells
    /// - `initial` is homogeneous and the policy uses [`DegenerateHandling::Reject`]
    pub fn run(
        &self,
        initial: Generation,
        transition: &TransitionFunction,
        mut policy: StoppingPolicy,
    ) -> Result<(History, RunResult)> {
        if initial.is_empty() {
            return Err(AutomatonError::EmptyInitialVector);
        }

        let initial_density = initial.density();
        if let Some(symbol) = initial.homogeneous_symbol() {
            match policy.degenerate_handling() {
                DegenerateHandling::Reject => {
                    return Err(AutomatonError::DegenerateDensity {
                        density: initial_density,
                    });
                }
                DegenerateHandling::Report => {
                    debug!("{transition}: initial vector is homogeneous ({symbol}), not evolving");
                    let result = RunResult {
                        final_density: initial_density,
                        steps: 0,
                        outcome: Outcome::Degenerate { symbol },
                    };
                    return Ok((History::new(initial, self.retention), result));
                }
                DegenerateHandling::Evolve => {}
            }
        }

        if let TransitionFunction::Majority(params) = transition
            && initial.len() < params.min_distinct_width()
        {
            warn!(
                "{transition}: ring of {} cells is narrower than {}; neighbors will overlap",
                initial.len(),
                params.min_distinct_width()
            );
        }

        let sampler = NeighborhoodSampler::new(&transition.offsets());
        let mut buffer = vec![0; sampler.arity()];
        let mut history = History::new(initial, self.retention);
        let mut step = 0;

        let halt = loop {
            let Some(previous) = history.latest() else {
                return Err(AutomatonError::EmptyInitialVector);
            };
            let next = advance(previous, transition, &sampler, &mut buffer);
            step += 1;

            let density = next.density();
            history.push(next);

            if let Some(halt) = policy.observe(step, density) {
                break halt;
            }
        };

        let final_density = history.latest().map_or(initial_density, Generation::density);
        let outcome = match halt {
            Halt::Converged { symbol } => Outcome::Converged { symbol },
            Halt::BudgetExhausted => Outcome::BudgetExhausted,
        };
        debug!("{transition}: halted after {step} steps with {outcome:?} at density {final_density}");

        Ok((
            history,
            RunResult {
                final_density,
                steps: step,
                outcome,
            },
        ))
    }

    /// Compute the single generation that follows `previous`
    pub fn step(previous: &Generation, transition: &TransitionFunction) -> Generation {
        let sampler = NeighborhoodSampler::new(&transition.offsets());
        let mut buffer = vec![0; sampler.arity()];
        advance(previous, transition, &sampler, &mut buffer)
    }
}

fn advance(
    previous: &Generation,
    transition: &TransitionFunction,
    sampler: &NeighborhoodSampler,
    buffer: &mut [u8],
) -> Generation {
    let bits: BitVec = (0..previous.len())
        .map(|position| {
            sampler.sample_into(previous, position, buffer);
            transition.next_value(buffer) != 0
        })
        .collect();
    Generation::from_successor(bits)
}
