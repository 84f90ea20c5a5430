//! Output formatting for scan results.
//!
//! Every entry is written as soon as the scan hands it over. Text output is
//! meant for people; JSON output is one object per line.

use console::style;
use std::io::{self, Write};

use vidcheck_core::utils::diagnostic_lines;
use vidcheck_core::{ScanEntry, ScanSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Writes scan entries and the final summary to `out`.
pub struct Reporter<W: Write> {
    out: W,
    format: OutputFormat,
    quiet: bool,
    single_file: bool,
}

impl<W: Write> Reporter<W> {
    /// `single_file` switches text output to the bare diagnostic text.
    pub fn new(out: W, format: OutputFormat, quiet: bool, single_file: bool) -> Self {
        Self {
            out,
            format,
            quiet,
            single_file,
        }
    }

    pub fn entry(&mut self, entry: &ScanEntry) -> io::Result<()> {
        let clean = matches!(entry, ScanEntry::Checked(result) if !result.corrupt);
        // A single-file run always prints its diagnostics, even an empty line.
        let raw = self.single_file && self.format == OutputFormat::Text;
        if self.quiet && clean && !raw {
            return Ok(());
        }
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, &entry.to_record())?;
                writeln!(self.out)?;
            }
            OutputFormat::Text if self.single_file => self.single_file_text(entry)?,
            OutputFormat::Text => self.entry_text(entry)?,
        }
        self.out.flush()
    }

    pub fn summary(&mut self, summary: &ScanSummary) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, &serde_json::json!({ "summary": summary }))?;
                writeln!(self.out)?;
            }
            OutputFormat::Text => {
                writeln!(self.out)?;
                write!(self.out, "{}", summary)?;
            }
        }
        self.out.flush()
    }

    pub fn is_text(&self) -> bool {
        self.format == OutputFormat::Text
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // Mirrors `ffmpeg -v error` itself: the diagnostics, nothing else.
    fn single_file_text(&mut self, entry: &ScanEntry) -> io::Result<()> {
        match entry {
            ScanEntry::Checked(result) => {
                writeln!(self.out, "{}", result.diagnostics.trim_end_matches(['\r', '\n']))
            }
            ScanEntry::Failed(failure) => writeln!(
                self.out,
                "{} {}: {}",
                style("ERROR").yellow().bold(),
                failure.path.display(),
                failure.error
            ),
        }
    }

    fn entry_text(&mut self, entry: &ScanEntry) -> io::Result<()> {
        match entry {
            ScanEntry::Checked(result) if result.corrupt => {
                writeln!(
                    self.out,
                    "{} {}",
                    style(format!("{:<8}", "CORRUPT")).red().bold(),
                    result.path.display()
                )?;
                for line in diagnostic_lines(&result.diagnostics) {
                    writeln!(self.out, "         {}", style(line).dim())?;
                }
                Ok(())
            }
            ScanEntry::Checked(result) => writeln!(
                self.out,
                "{} {}",
                style(format!("{:<8}", "OK")).green(),
                result.path.display()
            ),
            ScanEntry::Failed(failure) => writeln!(
                self.out,
                "{} {}: {}",
                style(format!("{:<8}", "ERROR")).yellow().bold(),
                failure.path.display(),
                failure.error
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;
    use vidcheck_core::{CoreError, FileFailure, VideoCheckResult};

    fn checked(path: &str, diagnostics: &str) -> ScanEntry {
        ScanEntry::Checked(VideoCheckResult::from_diagnostics(
            PathBuf::from(path),
            diagnostics.to_string(),
            Some(0),
            0.5,
        ))
    }

    fn render(format: OutputFormat, quiet: bool, single_file: bool, entries: &[ScanEntry]) -> String {
        console::set_colors_enabled(false);
        let mut reporter = Reporter::new(Vec::new(), format, quiet, single_file);
        for entry in entries {
            reporter.entry(entry).unwrap();
        }
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn text_lines_carry_status_and_diagnostics() {
        let out = render(
            OutputFormat::Text,
            false,
            false,
            &[
                checked("/v/good.mp4", ""),
                checked("/v/bad.mp4", "moov atom not found\n\nInvalid data\n"),
            ],
        );
        assert_eq!(
            out,
            "OK       /v/good.mp4\n\
             CORRUPT  /v/bad.mp4\n\
             \x20        moov atom not found\n\
             \x20        Invalid data\n"
        );
    }

    #[test]
    fn quiet_hides_clean_files() {
        let failure = ScanEntry::Failed(FileFailure {
            path: PathBuf::from("/v/stuck.ts"),
            error: CoreError::Timeout(Duration::from_secs(3)),
        });
        let out = render(
            OutputFormat::Text,
            true,
            false,
            &[checked("/v/good.mp4", ""), failure],
        );
        assert_eq!(out, "ERROR    /v/stuck.ts: Decode pass timed out after 3.0s\n");
    }

    #[test]
    fn single_file_prints_raw_diagnostics() {
        let out = render(
            OutputFormat::Text,
            false,
            true,
            &[checked("/v/bad.mp4", "Invalid NAL unit size\n")],
        );
        assert_eq!(out, "Invalid NAL unit size\n");

        let out = render(OutputFormat::Text, false, true, &[checked("/v/good.mp4", "")]);
        assert_eq!(out, "\n");
    }

    #[test]
    fn quiet_single_file_still_prints_the_empty_line() {
        let out = render(OutputFormat::Text, true, true, &[checked("/v/good.mp4", "")]);
        assert_eq!(out, "\n");

        let out = render(OutputFormat::Json, true, true, &[checked("/v/good.mp4", "")]);
        assert_eq!(out, "");
    }

    #[test]
    fn json_lines_are_parseable() {
        let out = render(
            OutputFormat::Json,
            false,
            false,
            &[checked("/v/good.mp4", ""), checked("/v/bad.mp4", "error\n")],
        );
        let records: Vec<serde_json::Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["status"], "clean");
        assert_eq!(records[1]["status"], "corrupt");
        assert_eq!(records[1]["diagnostics"], "error\n");
    }

    #[test]
    fn json_summary_is_wrapped() {
        console::set_colors_enabled(false);
        let mut summary = ScanSummary::new();
        summary.record(&checked("/v/bad.mp4", "error\n"));
        summary.finish();

        let mut reporter = Reporter::new(Vec::new(), OutputFormat::Json, false, false);
        reporter.summary(&summary).unwrap();
        let out = String::from_utf8(reporter.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["summary"]["corrupt"], 1);
        assert_eq!(value["summary"]["corrupt_files"][0], "/v/bad.mp4");
    }
}
