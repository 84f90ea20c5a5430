//! Summary reporting module
//!
//! Counts clean, corrupt and failed files over a scan and renders the block
//! printed after the last entry.

use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::scan::{ScanEntry, ScanStatus};
use crate::utils::format_duration;

/// Totals for one scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    /// When the scan started
    pub started_at: DateTime<Local>,

    pub total: usize,
    pub clean: usize,
    pub corrupt: usize,
    pub failed: usize,

    /// Paths with decode errors, in scan order
    pub corrupt_files: Vec<PathBuf>,

    /// Paths that could not be checked, in scan order
    pub failed_files: Vec<PathBuf>,

    /// Wall time from `new` to `finish`
    pub elapsed_secs: f64,

    #[serde(skip)]
    clock: Instant,
}

impl Default for ScanSummary {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanSummary {
    pub fn new() -> Self {
        Self {
            started_at: Local::now(),
            total: 0,
            clean: 0,
            corrupt: 0,
            failed: 0,
            corrupt_files: Vec::new(),
            failed_files: Vec::new(),
            elapsed_secs: 0.0,
            clock: Instant::now(),
        }
    }

    /// Adds one entry to the totals.
    pub fn record(&mut self, entry: &ScanEntry) {
        self.total += 1;
        match entry.status() {
            ScanStatus::Clean => self.clean += 1,
            ScanStatus::Corrupt => {
                self.corrupt += 1;
                self.corrupt_files.push(entry.path().to_path_buf());
            }
            ScanStatus::Failed => {
                self.failed += 1;
                self.failed_files.push(entry.path().to_path_buf());
            }
        }
    }

    /// Stops the clock.
    pub fn finish(&mut self) {
        self.elapsed_secs = self.clock.elapsed().as_secs_f64();
    }

    /// True when any file was corrupt or could not be checked.
    pub fn has_problems(&self) -> bool {
        self.corrupt > 0 || self.failed > 0
    }
}

impl<'a> Extend<&'a ScanEntry> for ScanSummary {
    fn extend<I: IntoIterator<Item = &'a ScanEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.record(entry);
        }
    }
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Scan Summary ===")?;
        writeln!(f, "Files checked: {}", self.total)?;
        writeln!(f, "Clean:         {}", self.clean)?;
        writeln!(f, "Corrupt:       {}", self.corrupt)?;
        writeln!(f, "Failed:        {}", self.failed)?;
        writeln!(f, "Elapsed:       {}", format_duration(self.elapsed_secs))?;

        if !self.corrupt_files.is_empty() {
            writeln!(f, "\n--- Corrupt ---")?;
            for path in &self.corrupt_files {
                writeln!(f, "  {}", path.display())?;
            }
        }
        if !self.failed_files.is_empty() {
            writeln!(f, "\n--- Not checked ---")?;
            for path in &self.failed_files {
                writeln!(f, "  {}", path.display())?;
            }
        }
        Ok(())
    }
}
