//! Batch density-classification trials and `(j, k)` parameter sweeps
//!
//! Each run owns its engine and history, so sweeps evaluate parameter pairs in
//! parallel on the rayon pool. Histories are kept to a short window since only
//! the final generation matters here.

use crate::analysis::readout::{predicted_majority, rule184_majority, true_majority};
use crate::automaton::{AutomatonEngine, MajorityParams, StoppingPolicy, TransitionFunction};
use crate::io::configuration::{RULE_184, RULE184_RELAXATION_FACTOR, TRIAL_HISTORY_WINDOW};
use crate::io::corpus::LabeledVector;
use crate::io::error::{Result, invalid_parameter};
use crate::io::initial::at_density;
use crate::lattice::{Generation, Retention};
use crate::math::statistics::{mean, std_dev, success_rate};
use log::info;
use rand::Rng;
use rayon::prelude::*;
use std::fmt;

/// Automaton used to guess the majority symbol
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classifier {
    /// GKL-style majority rule; the guess is the homogeneous symbol it converges to
    Gkl(MajorityParams),
    /// Rule 184 relaxed for `0.7·N` generations; the guess is read off its block structure
    Rule184,
}

impl fmt::Display for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gkl(params) => write!(f, "GKL {params}"),
            Self::Rule184 => write!(f, "rule 184"),
        }
    }
}

/// Limits applied to every classifier run
///
/// The convergence cap only bounds GKL runs; Rule 184 always relaxes for
/// `⌈0.7·N⌉` generations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunLimits {
    /// Hard step budget
    pub step_budget: usize,
    /// Optional classifier cap, checked after convergence
    pub convergence_cap: Option<usize>,
}

impl RunLimits {
    /// Limits with a budget and no cap
    pub const fn budget(step_budget: usize) -> Self {
        Self {
            step_budget,
            convergence_cap: None,
        }
    }

    /// Add a convergence cap
    pub const fn with_cap(self, cap: usize) -> Self {
        Self {
            convergence_cap: Some(cap),
            ..self
        }
    }

    fn gkl_policy(&self) -> Result<StoppingPolicy> {
        let policy = StoppingPolicy::classify(self.step_budget)?;
        match self.convergence_cap {
            Some(cap) => policy.with_convergence_cap(cap),
            None => Ok(policy),
        }
    }
}

impl Classifier {
    /// Short label used in trial logs: `j:k` for GKL, `rule184` otherwise
    pub fn label(&self) -> String {
        match self {
            Self::Gkl(params) => format!("{}:{}", params.j(), params.k()),
            Self::Rule184 => "rule184".to_string(),
        }
    }

    /// Run the classifier on one vector
    ///
    /// `limits` bound GKL runs; Rule 184 always relaxes for `⌈0.7·N⌉`
    /// generations.
    ///
    /// # Errors
    ///
    /// Returns an error if a GKL budget or cap is zero
    pub fn classify(&self, cells: Generation, limits: RunLimits) -> Result<TrialRecord> {
        let actual = true_majority(&cells);
        let initial_density = cells.density();
        let engine = AutomatonEngine::with_retention(Retention::Window(TRIAL_HISTORY_WINDOW));

        let (predicted, steps, final_density) = match self {
            Self::Gkl(params) => {
                let policy = limits.gkl_policy()?;
                let (_, result) = engine.run(cells, &TransitionFunction::Majority(*params), policy)?;
                (
                    predicted_majority(&result),
                    result.steps,
                    result.final_density,
                )
            }
            Self::Rule184 => {
                let relaxation = (cells.len() as f64 * RULE184_RELAXATION_FACTOR).ceil() as usize;
                let policy = StoppingPolicy::evolve(relaxation.max(1))?.without_convergence_halt();
                let transition = TransitionFunction::elementary(i64::from(RULE_184))?;
                let (history, result) = engine.run(cells, &transition, policy)?;
                (
                    history.latest().and_then(rule184_majority),
                    result.steps,
                    result.final_density,
                )
            }
        };

        Ok(TrialRecord {
            actual,
            predicted,
            steps,
            initial_density,
            final_density,
        })
    }
}

/// Result of classifying one vector
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrialRecord {
    /// True majority symbol, `None` on an exact tie
    pub actual: Option<u8>,
    /// Guessed symbol, `None` when the classifier gave no answer
    pub predicted: Option<u8>,
    /// Steps the run took
    pub steps: usize,
    /// Density of the initial vector
    pub initial_density: f64,
    /// Density of the final generation
    pub final_density: f64,
}

impl TrialRecord {
    /// Whether the trial has a true majority to compare against
    pub const fn is_decided(&self) -> bool {
        self.actual.is_some()
    }

    /// Whether the guess matches a true majority
    pub fn is_correct(&self) -> bool {
        self.actual.is_some() && self.actual == self.predicted
    }
}

/// Aggregate of a batch of trials for one classifier
#[derive(Clone, Debug, PartialEq)]
pub struct TrialReport {
    /// Classifier the trials ran
    pub classifier: Classifier,
    /// Per-trial records in run order
    pub records: Vec<TrialRecord>,
}

impl TrialReport {
    /// Trials with a true majority
    pub fn decided(&self) -> usize {
        self.records.iter().filter(|r| r.is_decided()).count()
    }

    /// Trials whose guess matched the true majority
    pub fn correct(&self) -> usize {
        self.records.iter().filter(|r| r.is_correct()).count()
    }

    /// Trials that produced no guess
    pub fn unanswered(&self) -> usize {
        self.records.iter().filter(|r| r.predicted.is_none()).count()
    }

    /// Percentage of decided trials classified correctly
    pub fn success_rate(&self) -> Option<f64> {
        success_rate(self.correct(), self.decided())
    }

    /// Mean steps over all trials
    pub fn mean_steps(&self) -> Option<f64> {
        let steps: Vec<usize> = self.records.iter().map(|r| r.steps).collect();
        mean(&steps)
    }

    /// Population standard deviation of steps over all trials
    pub fn steps_std_dev(&self) -> Option<f64> {
        let steps: Vec<usize> = self.records.iter().map(|r| r.steps).collect();
        std_dev(&steps)
    }
}

impl fmt::Display for TrialReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.classifier)?;
        match self.success_rate() {
            Some(rate) => write!(
                f,
                "{rate:.2}% correct ({}/{} decided)",
                self.correct(),
                self.decided()
            )?,
            None => write!(f, "no decided trials")?,
        }
        write!(
            f,
            ", {} unanswered, mean {:.1} steps",
            self.unanswered(),
            self.mean_steps().unwrap_or(0.0)
        )
    }
}

/// Parameters of a random batch of trials
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrialConfig {
    /// Number of trials
    pub trials: usize,
    /// Cells per vector
    pub length: usize,
    /// Budget and cap per GKL run
    pub limits: RunLimits,
    /// Inclusive range trial densities are drawn from
    pub density_range: (f64, f64),
    /// Classifier under test
    pub classifier: Classifier,
}

/// Run random trials: draw a density, shuffle a vector at it, classify
///
/// `observer` sees every record as it is produced.
///
/// # Errors
///
/// Returns an error if the density range is invalid or a run fails validation
pub fn run_trials<R, F>(config: &TrialConfig, rng: &mut R, mut observer: F) -> Result<TrialReport>
where
    R: Rng + ?Sized,
    F: FnMut(&TrialRecord),
{
    let (low, high) = config.density_range;
    if !(0.0..=1.0).contains(&low) || !(0.0..=1.0).contains(&high) || low > high {
        return Err(invalid_parameter(
            "density_range",
            &format!("{low}..{high}"),
            &"must be an ordered range within [0, 1]",
        ));
    }

    let mut records = Vec::with_capacity(config.trials);
    for _ in 0..config.trials {
        let density = rng.random_range(low..=high);
        let cells = at_density(config.length, density, rng)?;
        let record = config.classifier.classify(cells, config.limits)?;
        observer(&record);
        records.push(record);
    }

    let report = TrialReport {
        classifier: config.classifier,
        records,
    };
    info!(
        "{report} (step spread {:.1})",
        report.steps_std_dev().unwrap_or(0.0)
    );
    Ok(report)
}

/// Classify every vector of a labeled corpus
///
/// The corpus label, not the recount, is the truth the guess is scored against.
///
/// # Errors
///
/// Returns an error if the budget or cap is zero
pub fn evaluate<F>(
    classifier: Classifier,
    corpus: &[LabeledVector],
    limits: RunLimits,
    mut observer: F,
) -> Result<TrialReport>
where
    F: FnMut(&TrialRecord),
{
    let mut records = Vec::with_capacity(corpus.len());
    for vector in corpus {
        let mut record = classifier.classify(vector.cells.clone(), limits)?;
        record.actual = vector.majority;
        observer(&record);
        records.push(record);
    }

    let report = TrialReport {
        classifier,
        records,
    };
    info!(
        "{report} (step spread {:.1})",
        report.steps_std_dev().unwrap_or(0.0)
    );
    Ok(report)
}

/// Evaluate a corpus against several `(j, k)` pairs in parallel
///
/// Reports come back in the order of `params`. `observer` receives the index
/// of the pair in `params` with every record, so repeated pairs stay distinct.
///
/// # Errors
///
/// Returns an error if any pair's runs fail validation
pub fn sweep<F>(
    params: &[MajorityParams],
    corpus: &[LabeledVector],
    limits: RunLimits,
    observer: &F,
) -> Result<Vec<TrialReport>>
where
    F: Fn(usize, &TrialRecord) + Sync,
{
    params
        .par_iter()
        .enumerate()
        .map(|(index, pair)| {
            evaluate(Classifier::Gkl(*pair), corpus, limits, |record| {
                observer(index, record);
            })
        })
        .collect()
}
