use crate::io::error::{Result, invalid_parameter};

/// What the engine does with an initial vector that is already homogeneous
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DegenerateHandling {
    /// Fail with [`crate::AutomatonError::DegenerateDensity`]
    Reject,
    /// Return at once with zero steps and a degenerate outcome
    #[default]
    Report,
    /// Evolve it like any other vector
    Evolve,
}

/// Why a run stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Halt {
    /// Density reached exactly 0 or 1
    Converged {
        /// The symbol every cell now holds
        symbol: u8,
    },
    /// Step budget or convergence cap reached first
    BudgetExhausted,
}

/// Policy state after the most recent observation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyState {
    /// No halting condition seen yet
    Running,
    /// Halted on a homogeneous generation
    Converged {
        /// Step at which the homogeneous generation appeared
        step: usize,
        /// Its symbol
        symbol: u8,
    },
    /// Halted on the step budget or convergence cap
    BudgetExhausted {
        /// Last step computed
        step: usize,
    },
}

impl PolicyState {
    /// Whether the policy has reached a terminal state
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Symbol of a homogeneous density (exactly 0 or 1), if it is one
pub fn homogeneous_symbol(density: f64) -> Option<u8> {
    if density <= 0.0 {
        Some(0)
    } else if density >= 1.0 {
        Some(1)
    } else {
        None
    }
}

/// Decides after every generation whether the run halts
///
/// Conditions are checked in this order:
/// 1. the step budget is reached (budget exhausted)
/// 2. the density is exactly 0 or 1 (converged), unless convergence halting is off
/// 3. the convergence cap, if set, is reached (budget exhausted)
///
/// Once a terminal state is entered no further transitions happen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StoppingPolicy {
    step_budget: usize,
    convergence_cap: Option<usize>,
    halt_on_convergence: bool,
    degenerate: DegenerateHandling,
    state: PolicyState,
}

impl StoppingPolicy {
    /// Policy for rendering runs: homogeneous input is evolved as-is
    ///
    /// # Errors
    ///
    /// Returns an error if `step_budget` is zero
    pub fn evolve(step_budget: usize) -> Result<Self> {
        Self::with_budget(step_budget, DegenerateHandling::Evolve)
    }

    /// Policy for classifier runs: homogeneous input is reported without evolving
    ///
    /// # Errors
    ///
    /// Returns an error if `step_budget` is zero
    pub fn classify(step_budget: usize) -> Result<Self> {
        Self::with_budget(step_budget, DegenerateHandling::Report)
    }

    fn with_budget(step_budget: usize, degenerate: DegenerateHandling) -> Result<Self> {
        if step_budget == 0 {
            return Err(invalid_parameter(
                "step_budget",
                &step_budget,
                &"must be at least 1",
            ));
        }
        Ok(Self {
            step_budget,
            convergence_cap: None,
            halt_on_convergence: true,
            degenerate,
            state: PolicyState::Running,
        })
    }

    /// Add a hard cap on steps, independent of the history buffer size
    ///
    /// # Errors
    ///
    /// Returns an error if `cap` is zero
    pub fn with_convergence_cap(mut self, cap: usize) -> Result<Self> {
        if cap == 0 {
            return Err(invalid_parameter(
                "convergence_cap",
                &cap,
                &"must be at least 1",
            ));
        }
        self.convergence_cap = Some(cap);
        Ok(self)
    }

    /// Override the handling of homogeneous initial vectors
    #[must_use]
    pub const fn with_degenerate_handling(mut self, handling: DegenerateHandling) -> Self {
        self.degenerate = handling;
        self
    }

    /// Keep evolving through homogeneous generations until the budget runs out
    #[must_use]
    pub const fn without_convergence_halt(mut self) -> Self {
        self.halt_on_convergence = false;
        self
    }

    /// Maximum number of steps
    pub const fn step_budget(&self) -> usize {
        self.step_budget
    }

    /// Classifier step cap, if any
    pub const fn convergence_cap(&self) -> Option<usize> {
        self.convergence_cap
    }

    /// Handling of homogeneous initial vectors
    pub const fn degenerate_handling(&self) -> DegenerateHandling {
        self.degenerate
    }

    /// Current state
    pub const fn state(&self) -> PolicyState {
        self.state
    }

    /// Decide whether to halt after computing generation `step` with `density`
    pub fn halt(&self, step: usize, density: f64) -> Option<Halt> {
        if step >= self.step_budget {
            return Some(Halt::BudgetExhausted);
        }
        if self.halt_on_convergence {
            if let Some(symbol) = homogeneous_symbol(density) {
                return Some(Halt::Converged { symbol });
            }
        }
        match self.convergence_cap {
            Some(cap) if step >= cap => Some(Halt::BudgetExhausted),
            _ => None,
        }
    }

    /// Record generation `step` and move to a terminal state if it halts
    ///
    /// Returns the halt reason; a policy already in a terminal state keeps
    /// reporting the reason it stopped for.
    pub fn observe(&mut self, step: usize, density: f64) -> Option<Halt> {
        match self.state {
            PolicyState::Converged { symbol, .. } => return Some(Halt::Converged { symbol }),
            PolicyState::BudgetExhausted { .. } => return Some(Halt::BudgetExhausted),
            PolicyState::Running => {}
        }

        let halt = self.halt(step, density)?;
        self.state = match halt {
            Halt::Converged { symbol } => PolicyState::Converged { step, symbol },
            Halt::BudgetExhausted => PolicyState::BudgetExhausted { step },
        };
        Some(halt)
    }
}
