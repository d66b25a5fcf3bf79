//! Run constants and command-line defaults

/// Fixed seed for reproducible initial vectors
pub const DEFAULT_SEED: u64 = 242_976;

/// Default number of cells in the ring
pub const DEFAULT_LENGTH: usize = 150;

/// Default number of steps for elementary renders
pub const DEFAULT_GENERATIONS: usize = 100;

/// Default step budget for interactive classifier runs
pub const DEFAULT_STEP_BUDGET: usize = 600;

/// Step budget used by batch trials
pub const TRIAL_STEP_BUDGET: usize = 400;

/// Default number of batch trials
pub const DEFAULT_TRIALS: usize = 100;

/// Default GKL neighbor distances (j, k)
pub const DEFAULT_MAJORITY_OFFSETS: (usize, usize) = (1, 3);

/// Generations Rule 184 is given to relax, as a fraction of the ring length
pub const RULE184_RELAXATION_FACTOR: f64 = 0.7;

/// Rule number of the traffic rule used as a density classifier
pub const RULE_184: u8 = 184;

// Batch runs only keep the tail of each history
/// Generations retained per run during batch trials
pub const TRIAL_HISTORY_WINDOW: usize = 2;

// Corpus generation defaults
/// Ring length of generated corpus vectors
pub const CORPUS_LENGTH: usize = 289;
/// Number of distinct densities drawn for a corpus
pub const CORPUS_DENSITIES: usize = 10;
/// Shuffles generated per drawn density
pub const CORPUS_SHUFFLES_PER_DENSITY: usize = 10;
/// Density range corpus densities are drawn from
pub const CORPUS_DENSITY_RANGE: (f64, f64) = (0.45, 0.55);

// Rendering
/// Side length in pixels of one rendered cell
pub const DEFAULT_PIXEL_SCALE: u32 = 4;
/// Grayscale intensity of a live cell
pub const LIVE_PIXEL: u8 = 0;
/// Grayscale intensity of a dead cell
pub const DEAD_PIXEL: u8 = 255;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
