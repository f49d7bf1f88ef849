//! Run summary

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use super::pipeline::ImportStats;
use crate::build_info::BuildInfo;
use crate::config::ImportMode;

/// Outcome of a finished (or partially finished) run
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub mode: ImportMode,
    /// Source document count taken before the run started
    pub total_records: u64,
    pub stats: ImportStats,
    pub duration: Duration,
    pub build: BuildInfo,
}

impl ImportReport {
    pub fn new(mode: ImportMode, total_records: u64, stats: ImportStats, duration: Duration) -> Self {
        Self {
            mode,
            total_records,
            stats,
            duration,
            build: BuildInfo::current(),
        }
    }

    /// Imported records per second; 0 for a zero-length run
    pub fn rate(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.stats.imported as f64 / secs
        } else {
            0.0
        }
    }

    /// Emit the summary through the log, one line per figure
    pub fn log(&self) {
        for line in self.to_string().lines() {
            tracing::info!("{}", line);
        }
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Import Complete ({}) ===", self.mode)?;
        writeln!(f, "Total records processed: {}", self.total_records)?;
        writeln!(f, "Successfully imported: {}", self.stats.imported)?;
        writeln!(f, "Skipped (empty nutrients): {}", self.stats.skipped)?;
        writeln!(f, "Decode failures: {}", self.stats.decode_failures)?;
        writeln!(f, "Duration: {:.2?}", self.duration)?;
        writeln!(f, "Rate: {:.2} records/second", self.rate())?;
        write!(f, "Build: {}", self.build)
    }
}
