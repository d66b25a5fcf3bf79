//! Per-trial log export
//!
//! One line per classified vector: `<classifier> <actual> <predicted>
//! <difference> <steps>`. The classifier is `j:k` for GKL pairs and `rule184`
//! otherwise; `difference` is `actual - predicted`. Missing values print as `-`.

use crate::analysis::trials::{TrialRecord, TrialReport};
use crate::io::corpus::write_text;
use crate::io::error::Result;
use std::fmt::Write as _;
use std::path::Path;

/// Header line written at the top of every log
pub const TRIAL_LOG_HEADER: &str = "# classifier actual predicted difference steps";

fn symbol(value: Option<u8>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// `actual - predicted`, when both are known
pub fn difference(record: &TrialRecord) -> Option<i16> {
    Some(i16::from(record.actual?) - i16::from(record.predicted?))
}

/// Render every record of every report, reports in order
pub fn format_trial_log(reports: &[TrialReport]) -> String {
    let mut text = format!("{TRIAL_LOG_HEADER}\n");
    for report in reports {
        let label = report.classifier.label();
        for record in &report.records {
            let difference = difference(record).map_or_else(|| "-".to_string(), |d| d.to_string());
            let _ = writeln!(
                text,
                "{label} {} {} {difference} {}",
                symbol(record.actual),
                symbol(record.predicted),
                record.steps
            );
        }
    }
    text
}

/// Write a trial log, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written
pub fn write_trial_log(path: &Path, reports: &[TrialReport]) -> Result<()> {
    write_text(path, &format_trial_log(reports), "write trial log")
}
