//! Terminal progress for batch trials and parameter sweeps

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static TRIAL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix:>12}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress display for one or more concurrent batches of runs
///
/// Every batch gets its own bar; bars are safe to advance from worker threads.
pub struct TrialProgress {
    multi_progress: MultiProgress,
    bars: Vec<ProgressBar>,
}

impl Default for TrialProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl TrialProgress {
    /// Create an empty progress display
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            bars: Vec::new(),
        }
    }

    /// Add a bar for a batch of `runs` runs and return its index
    pub fn add_batch(&mut self, label: &str, runs: usize) -> usize {
        let bar = ProgressBar::new(runs as u64);
        bar.set_style(TRIAL_STYLE.clone());
        bar.set_prefix(label.to_string());
        self.bars.push(self.multi_progress.add(bar));
        self.bars.len() - 1
    }

    /// Count one finished run in batch `index`, noting whether it was classified correctly
    pub fn record(&self, index: usize, correct: bool) {
        if let Some(bar) = self.bars.get(index) {
            bar.inc(1);
            if !correct {
                bar.set_message("(misses recorded)");
            }
        }
    }

    /// Number of batches added
    pub fn batches(&self) -> usize {
        self.bars.len()
    }

    /// Complete every bar and clear the display
    pub fn finish(&self) {
        for bar in &self.bars {
            bar.finish();
        }
        let _ = self.multi_progress.clear();
    }
}
