//! Tests for halting order, terminal states and policy validation

#[cfg(test)]
mod tests {
    use ringca::AutomatonError;
    use ringca::automaton::stopping::{PolicyState, homogeneous_symbol};
    use ringca::automaton::{DegenerateHandling, Halt, StoppingPolicy};

    #[test]
    fn test_homogeneous_symbol() {
        assert_eq!(homogeneous_symbol(0.0), Some(0));
        assert_eq!(homogeneous_symbol(1.0), Some(1));
        assert_eq!(homogeneous_symbol(0.5), None);
        assert_eq!(homogeneous_symbol(1.0 / 289.0), None);
    }

    // Tests mixed generations keep running below the budget
    #[test]
    fn test_running_below_budget() {
        let policy = StoppingPolicy::classify(10).unwrap();
        assert_eq!(policy.halt(1, 0.4), None);
        assert_eq!(policy.halt(9, 0.6), None);
    }

    // Tests the budget check comes before the convergence check
    // Verified by swapping the order of the first two checks
    #[test]
    fn test_budget_checked_before_convergence() {
        let policy = StoppingPolicy::classify(5).unwrap();
        assert_eq!(policy.halt(5, 0.5), Some(Halt::BudgetExhausted));
        assert_eq!(policy.halt(5, 1.0), Some(Halt::BudgetExhausted));
        assert_eq!(policy.halt(4, 1.0), Some(Halt::Converged { symbol: 1 }));
        assert_eq!(policy.halt(4, 0.0), Some(Halt::Converged { symbol: 0 }));
    }

    // Tests the classifier cap halts independently of the budget
    #[test]
    fn test_convergence_cap() {
        let policy = StoppingPolicy::classify(100)
            .unwrap()
            .with_convergence_cap(3)
            .unwrap();
        assert_eq!(policy.convergence_cap(), Some(3));
        assert_eq!(policy.halt(2, 0.5), None);
        assert_eq!(policy.halt(3, 0.5), Some(Halt::BudgetExhausted));
        // Convergence still wins over the cap
        assert_eq!(policy.halt(3, 0.0), Some(Halt::Converged { symbol: 0 }));
    }

    #[test]
    fn test_without_convergence_halt() {
        let policy = StoppingPolicy::evolve(10).unwrap().without_convergence_halt();
        assert_eq!(policy.halt(3, 1.0), None);
        assert_eq!(policy.halt(10, 1.0), Some(Halt::BudgetExhausted));
    }

    // Tests the state machine enters exactly one terminal state and stays there
    // Verified by allowing transitions out of terminal states
    #[test]
    fn test_observe_terminal_states_are_sticky() {
        let mut policy = StoppingPolicy::classify(10).unwrap();
        assert_eq!(policy.state(), PolicyState::Running);
        assert!(!policy.state().is_terminal());

        assert_eq!(policy.observe(1, 0.5), None);
        assert_eq!(policy.observe(2, 1.0), Some(Halt::Converged { symbol: 1 }));
        assert_eq!(policy.state(), PolicyState::Converged { step: 2, symbol: 1 });
        assert!(policy.state().is_terminal());

        // Later observations cannot move it
        assert_eq!(policy.observe(10, 0.5), Some(Halt::Converged { symbol: 1 }));
        assert_eq!(policy.state(), PolicyState::Converged { step: 2, symbol: 1 });
    }

    #[test]
    fn test_observe_budget_exhausted() {
        let mut policy = StoppingPolicy::evolve(2).unwrap();
        assert_eq!(policy.observe(1, 0.5), None);
        assert_eq!(policy.observe(2, 0.5), Some(Halt::BudgetExhausted));
        assert_eq!(policy.state(), PolicyState::BudgetExhausted { step: 2 });
    }

    // Tests zero budgets and caps are rejected
    #[test]
    fn test_invalid_limits() {
        assert!(matches!(
            StoppingPolicy::evolve(0),
            Err(AutomatonError::InvalidParameter {
                parameter: "step_budget",
                ..
            })
        ));
        assert!(StoppingPolicy::classify(0).is_err());
        assert!(matches!(
            StoppingPolicy::classify(5).unwrap().with_convergence_cap(0),
            Err(AutomatonError::InvalidParameter {
                parameter: "convergence_cap",
                ..
            })
        ));
    }

    #[test]
    fn test_degenerate_handling_defaults() {
        assert_eq!(
            StoppingPolicy::evolve(1).unwrap().degenerate_handling(),
            DegenerateHandling::Evolve
        );
        assert_eq!(
            StoppingPolicy::classify(1).unwrap().degenerate_handling(),
            DegenerateHandling::Report
        );
        let rejecting = StoppingPolicy::classify(1)
            .unwrap()
            .with_degenerate_handling(DegenerateHandling::Reject);
        assert_eq!(rejecting.degenerate_handling(), DegenerateHandling::Reject);
        assert_eq!(rejecting.step_budget(), 1);
        assert_eq!(DegenerateHandling::default(), DegenerateHandling::Report);
    }
}
