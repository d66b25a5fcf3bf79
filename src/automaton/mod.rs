/// Evolution loop and run summaries
pub mod engine;
/// Circular neighbor sampling
pub mod neighborhood;
/// Elementary rule truth tables
pub mod rule_table;
/// Halting conditions and degenerate-input handling
pub mod stopping;
/// Elementary and majority transition functions
pub mod transition;

pub use engine::{AutomatonEngine, Outcome, RunResult};
pub use neighborhood::NeighborhoodSampler;
pub use rule_table::RuleTable;
pub use stopping::{DegenerateHandling, Halt, StoppingPolicy};
pub use transition::{MajorityParams, TransitionFunction};
