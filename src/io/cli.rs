//! Command-line front end: single runs, batch trials, sweeps and corpus generation

use crate::analysis::trials::{
    Classifier, RunLimits, TrialConfig, TrialRecord, TrialReport, run_trials, sweep,
};
use crate::automaton::{
    AutomatonEngine, DegenerateHandling, MajorityParams, Outcome, RunResult, StoppingPolicy,
    TransitionFunction,
};
use crate::io::configuration::{
    CORPUS_DENSITIES, CORPUS_DENSITY_RANGE, CORPUS_LENGTH, CORPUS_SHUFFLES_PER_DENSITY,
    DEFAULT_GENERATIONS, DEFAULT_LENGTH, DEFAULT_MAJORITY_OFFSETS, DEFAULT_PIXEL_SCALE,
    DEFAULT_SEED, DEFAULT_STEP_BUDGET, DEFAULT_TRIALS, TRIAL_STEP_BUDGET,
};
use crate::io::corpus::{
    CorpusConfig, generate_corpus, parse_param_list, read_corpus, write_corpus,
};
use crate::io::error::Result;
use crate::io::image::export_history_as_png;
use crate::io::initial::InitialPattern;
use crate::io::progress::TrialProgress;
use crate::io::trial_log::write_trial_log;
use crate::lattice::History;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use rand::SeedableRng;
use rand::rngs::StdRng;
use simple_logger::SimpleLogger;
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ringca")]
#[command(
    author,
    version,
    about = "Evolve one-dimensional binary cellular automata on a ring"
)]
/// Command-line arguments for the automaton tool
pub struct Cli {
    /// Random seed for generated initial vectors
    #[arg(short, long, global = true, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Suppress progress output and warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log every run's halting decision
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// What to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level implied by the verbosity flags
    pub const fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Error
        } else {
            LevelFilter::Warn
        }
    }

    /// Install the terminal logger; a logger installed earlier is left in place
    pub fn init_logging(&self) {
        let _ = SimpleLogger::new().with_level(self.log_level()).init();
    }
}

/// Subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Evolve an elementary rule and render its history
    Elementary(ElementaryArgs),
    /// Run a GKL-style majority classifier on one vector
    Majority(MajorityArgs),
    /// Measure classifier accuracy over random vectors
    Trials(TrialArgs),
    /// Compare (j, k) pairs on a labeled corpus
    Sweep(SweepArgs),
    /// Generate a labeled corpus of near-balanced vectors
    Corpus(CorpusArgs),
}

/// Output options shared by the single-run subcommands
#[derive(Args, Clone)]
pub struct RenderArgs {
    /// Write the history as a PNG instead of printing it
    #[arg(short, long, value_name = "PNG")]
    pub output: Option<PathBuf>,

    /// Pixel size of one cell in the PNG
    #[arg(long, default_value_t = DEFAULT_PIXEL_SCALE)]
    pub scale: u32,
}

/// Arguments of the `elementary` subcommand
#[derive(Args, Clone)]
pub struct ElementaryArgs {
    /// Rule number in 0..=255
    #[arg(short, long, allow_negative_numbers = true)]
    pub rule: i64,

    /// Number of cells
    #[arg(short = 'n', long, default_value_t = DEFAULT_LENGTH)]
    pub length: usize,

    /// Number of generations to compute
    #[arg(short, long, default_value_t = DEFAULT_GENERATIONS)]
    pub generations: usize,

    /// Initial vector: random, single, inverted, density:<p> or bits:<01..>
    #[arg(short, long, default_value = "single")]
    pub init: InitialPattern,

    /// Keep evolving after the ring becomes homogeneous
    #[arg(long)]
    pub run_through: bool,

    /// Output options
    #[command(flatten)]
    pub render: RenderArgs,
}

/// Arguments of the `majority` subcommand
#[derive(Args, Clone)]
pub struct MajorityArgs {
    /// Inner neighbor distance
    #[arg(short, default_value_t = DEFAULT_MAJORITY_OFFSETS.0 as i64, allow_negative_numbers = true)]
    pub j: i64,

    /// Outer neighbor distance
    #[arg(short, default_value_t = DEFAULT_MAJORITY_OFFSETS.1 as i64, allow_negative_numbers = true)]
    pub k: i64,

    /// Number of cells
    #[arg(short = 'n', long, default_value_t = DEFAULT_LENGTH)]
    pub length: usize,

    /// Initial vector: random, single, inverted, density:<p> or bits:<01..>
    #[arg(short, long, default_value = "density:0.5")]
    pub init: InitialPattern,

    /// Maximum number of steps
    #[arg(short, long, default_value_t = DEFAULT_STEP_BUDGET)]
    pub budget: usize,

    /// Give up on a mixed ring after this many steps, even within the budget
    #[arg(long)]
    pub cap: Option<usize>,

    /// Fail instead of reporting when the initial vector is homogeneous
    #[arg(long, conflicts_with = "evolve_degenerate")]
    pub reject_degenerate: bool,

    /// Evolve a homogeneous initial vector anyway
    #[arg(long)]
    pub evolve_degenerate: bool,

    /// Output options
    #[command(flatten)]
    pub render: RenderArgs,
}

impl MajorityArgs {
    const fn degenerate_handling(&self) -> DegenerateHandling {
        if self.reject_degenerate {
            DegenerateHandling::Reject
        } else if self.evolve_degenerate {
            DegenerateHandling::Evolve
        } else {
            DegenerateHandling::Report
        }
    }
}

/// Classifier selection for trials
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassifierKind {
    /// GKL-style majority rule with distances (j, k)
    Gkl,
    /// Relaxed Rule 184 block readout
    Rule184,
}

/// Arguments of the `trials` subcommand
#[derive(Args, Clone)]
pub struct TrialArgs {
    /// Classifier under test
    #[arg(short, long, value_enum, default_value_t = ClassifierKind::Gkl)]
    pub classifier: ClassifierKind,

    /// Inner neighbor distance (GKL only)
    #[arg(short, default_value_t = DEFAULT_MAJORITY_OFFSETS.0 as i64, allow_negative_numbers = true)]
    pub j: i64,

    /// Outer neighbor distance (GKL only)
    #[arg(short, default_value_t = DEFAULT_MAJORITY_OFFSETS.1 as i64, allow_negative_numbers = true)]
    pub k: i64,

    /// Number of trials
    #[arg(short, long, default_value_t = DEFAULT_TRIALS)]
    pub trials: usize,

    /// Number of cells per vector
    #[arg(short = 'n', long, default_value_t = DEFAULT_LENGTH)]
    pub length: usize,

    /// Step budget per run
    #[arg(short, long, default_value_t = TRIAL_STEP_BUDGET)]
    pub budget: usize,

    /// Convergence cap per GKL run
    #[arg(long)]
    pub cap: Option<usize>,

    /// Write one line per trial to this file
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Lowest density drawn
    #[arg(long, default_value_t = 0.0)]
    pub density_min: f64,

    /// Highest density drawn
    #[arg(long, default_value_t = 1.0)]
    pub density_max: f64,
}

/// Arguments of the `sweep` subcommand
#[derive(Args, Clone)]
pub struct SweepArgs {
    /// Pairs to compare, e.g. "1:3,1:5,3:6"
    #[arg(short, long, default_value = "1:3")]
    pub params: String,

    /// Labeled corpus file; a fresh corpus is generated when omitted
    #[arg(short = 'f', long, value_name = "FILE")]
    pub corpus: Option<PathBuf>,

    /// Step budget per run
    #[arg(short, long, default_value_t = DEFAULT_STEP_BUDGET)]
    pub budget: usize,

    /// Convergence cap per run
    #[arg(long)]
    pub cap: Option<usize>,

    /// Write one line per classified vector to this file
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

/// Arguments of the `corpus` subcommand
#[derive(Args, Clone)]
pub struct CorpusArgs {
    /// File to write
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Number of cells per vector
    #[arg(short = 'n', long, default_value_t = CORPUS_LENGTH)]
    pub length: usize,

    /// Number of densities drawn
    #[arg(long, default_value_t = CORPUS_DENSITIES)]
    pub densities: usize,

    /// Vectors shuffled per density
    #[arg(long, default_value_t = CORPUS_SHUFFLES_PER_DENSITY)]
    pub shuffles: usize,

    /// Lowest density drawn
    #[arg(long, default_value_t = CORPUS_DENSITY_RANGE.0)]
    pub density_min: f64,

    /// Highest density drawn
    #[arg(long, default_value_t = CORPUS_DENSITY_RANGE.1)]
    pub density_max: f64,
}

/// Executes a parsed command line
pub struct CommandRunner {
    cli: Cli,
}

impl CommandRunner {
    /// Create a runner for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the command and print its report
    ///
    /// # Errors
    ///
    /// Returns an error if validation, evolution or file output fails
    // Reports are the command's output
    #[allow(clippy::print_stdout)]
    pub fn run(&self) -> Result<()> {
        let report = self.execute()?;
        print!("{report}");
        Ok(())
    }

    /// Run the command and return its report text
    ///
    /// # Errors
    ///
    /// Returns an error if validation, evolution or file output fails
    pub fn execute(&self) -> Result<String> {
        let mut rng = StdRng::seed_from_u64(self.cli.seed);
        match &self.cli.command {
            Command::Elementary(args) => Self::elementary(args, &mut rng),
            Command::Majority(args) => Self::majority(args, &mut rng),
            Command::Trials(args) => self.trials(args, &mut rng),
            Command::Sweep(args) => self.sweep(args, &mut rng),
            Command::Corpus(args) => Self::corpus(args, &mut rng),
        }
    }

    fn elementary(args: &ElementaryArgs, rng: &mut StdRng) -> Result<String> {
        let transition = TransitionFunction::elementary(args.rule)?;
        let initial = args.init.build(args.length, rng)?;
        let mut policy = StoppingPolicy::evolve(args.generations)?;
        if args.run_through {
            policy = policy.without_convergence_halt();
        }

        let (history, result) = AutomatonEngine::new().run(initial, &transition, policy)?;

        let mut report = render(&history, &args.render)?;
        let _ = writeln!(
            report,
            "{transition}: {} steps, final density {:.4}",
            result.steps, result.final_density
        );
        Ok(report)
    }

    fn majority(args: &MajorityArgs, rng: &mut StdRng) -> Result<String> {
        let transition = TransitionFunction::majority(args.j, args.k)?;
        let initial = args.init.build(args.length, rng)?;
        let mut policy =
            StoppingPolicy::classify(args.budget)?.with_degenerate_handling(args.degenerate_handling());
        if let Some(cap) = args.cap {
            policy = policy.with_convergence_cap(cap)?;
        }

        let (history, result) = AutomatonEngine::new().run(initial, &transition, policy)?;

        let mut report = render(&history, &args.render)?;
        let limit = args.cap.map_or(args.budget, |cap| cap.min(args.budget));
        report.push_str(&describe_classification(&result, limit));
        Ok(report)
    }

    fn trials(&self, args: &TrialArgs, rng: &mut StdRng) -> Result<String> {
        let classifier = match args.classifier {
            ClassifierKind::Gkl => Classifier::Gkl(MajorityParams::new(args.j, args.k)?),
            ClassifierKind::Rule184 => Classifier::Rule184,
        };
        let config = TrialConfig {
            trials: args.trials,
            length: args.length,
            limits: limits(args.budget, args.cap),
            density_range: (args.density_min, args.density_max),
            classifier,
        };

        let mut progress = self.cli.should_show_progress().then(TrialProgress::new);
        let batch = progress
            .as_mut()
            .map(|pm| pm.add_batch(&classifier.to_string(), args.trials));

        let report = run_trials(&config, rng, |record| {
            if let (Some(pm), Some(index)) = (&progress, batch) {
                pm.record(index, record.is_correct() || !record.is_decided());
            }
        })?;

        if let Some(pm) = &progress {
            pm.finish();
        }

        let mut text = format!("{report}\n");
        if let Some(path) = &args.log {
            write_trial_log(path, std::slice::from_ref(&report))?;
            let _ = writeln!(text, "Wrote trial log to {}", path.display());
        }
        Ok(text)
    }

    fn sweep(&self, args: &SweepArgs, rng: &mut StdRng) -> Result<String> {
        let params = parse_param_list(&args.params)?;
        let corpus = match &args.corpus {
            Some(path) => read_corpus(path)?,
            None => generate_corpus(&default_corpus_config(), rng)?,
        };

        let mut progress = self.cli.should_show_progress().then(TrialProgress::new);
        if let Some(pm) = progress.as_mut() {
            for pair in &params {
                pm.add_batch(&format!("GKL {pair}"), corpus.len());
            }
        }

        let observer = |index: usize, record: &TrialRecord| {
            if let Some(pm) = &progress {
                pm.record(index, record.is_correct() || !record.is_decided());
            }
        };
        let reports = sweep(&params, &corpus, limits(args.budget, args.cap), &observer)?;

        if let Some(pm) = &progress {
            pm.finish();
        }

        let mut text = format_sweep(&reports);
        if let Some(path) = &args.log {
            write_trial_log(path, &reports)?;
            let _ = writeln!(text, "Wrote trial log to {}", path.display());
        }
        Ok(text)
    }

    fn corpus(args: &CorpusArgs, rng: &mut StdRng) -> Result<String> {
        let config = CorpusConfig {
            length: args.length,
            densities: args.densities,
            shuffles_per_density: args.shuffles,
            density_range: (args.density_min, args.density_max),
        };
        let corpus = generate_corpus(&config, rng)?;
        write_corpus(&args.output, &corpus)?;
        Ok(format!(
            "Wrote {} vectors of {} cells to {}\n",
            corpus.len(),
            args.length,
            args.output.display()
        ))
    }
}

const fn limits(step_budget: usize, cap: Option<usize>) -> RunLimits {
    RunLimits {
        step_budget,
        convergence_cap: cap,
    }
}

const fn default_corpus_config() -> CorpusConfig {
    CorpusConfig {
        length: CORPUS_LENGTH,
        densities: CORPUS_DENSITIES,
        shuffles_per_density: CORPUS_SHUFFLES_PER_DENSITY,
        density_range: CORPUS_DENSITY_RANGE,
    }
}

/// Sentence describing a classifier run
pub fn describe_classification(result: &RunResult, budget: usize) -> String {
    match result.outcome {
        Outcome::Converged { symbol } => format!(
            "The majority element is {symbol} and the automaton converged in {} steps.\n",
            result.steps
        ),
        Outcome::Degenerate { symbol } => format!(
            "The initial vector is already homogeneous ({symbol}); nothing to classify.\n"
        ),
        Outcome::BudgetExhausted => format!(
            "The classifier did not converge within {budget} steps (final density {:.4}).\n",
            result.final_density
        ),
    }
}

/// One line per report, in sweep order
pub fn format_sweep(reports: &[TrialReport]) -> String {
    reports.iter().fold(String::new(), |mut text, report| {
        let _ = writeln!(text, "{report}");
        text
    })
}

/// Text rendering of a history: `#` for live cells, `.` for dead ones
pub fn history_to_text(history: &History) -> String {
    let mut text = String::with_capacity(history.len() * (history.width() + 1));
    for generation in history.iter() {
        text.extend(generation.iter().map(|cell| if cell == 0 { '.' } else { '#' }));
        text.push('\n');
    }
    text
}

fn render(history: &History, args: &RenderArgs) -> Result<String> {
    match &args.output {
        Some(path) => {
            export_history_as_png(history, args.scale, path)?;
            Ok(format!("Wrote {}\n", path.display()))
        }
        None => Ok(history_to_text(history)),
    }
}
