// ============================================================================
// vidcheck-cli/src/commands/scan.rs
// ============================================================================
//
// SCAN COMMAND: Runs a scan and hands every entry to the reporter.
//
// With one job, entries are printed as each decode pass finishes. With more,
// the scan runs on the worker pool and entries are printed in order once
// every file is done.

use anyhow::Context;
use std::io::{self, Write};

use vidcheck_core::external::{DecodeSpawner, SidecarSpawner};
use vidcheck_core::{CheckConfig, ScanSummary, ScanTarget, run_scan, run_scan_parallel};

use crate::cli::Cli;
use crate::output::Reporter;

/// Runs the scan described by `cli` against the real ffmpeg, printing to stdout.
pub fn run(cli: &Cli) -> anyhow::Result<ScanSummary> {
    let target = cli.target();
    let single_file = matches!(target, ScanTarget::File(_));
    let stdout = io::stdout();
    let mut reporter = Reporter::new(stdout.lock(), cli.output_format(), cli.quiet, single_file);

    execute(&SidecarSpawner, &cli.check_config(), target, &mut reporter)
}

/// Scans `target` with `spawner`, reporting each entry and then the summary.
///
/// Fatal errors end the scan and are returned. The summary of a single-file
/// text run is not printed.
pub fn execute<S, W>(
    spawner: &S,
    config: &CheckConfig,
    target: ScanTarget,
    reporter: &mut Reporter<W>,
) -> anyhow::Result<ScanSummary>
where
    S: DecodeSpawner + Sync,
    W: Write,
{
    let single_file = matches!(target, ScanTarget::File(_));
    let scanned = target.path().display().to_string();
    let mut summary = ScanSummary::new();

    if config.jobs > 1 {
        let entries = run_scan_parallel(spawner, config, target)
            .with_context(|| format!("scan of {} failed", scanned))?;
        for entry in &entries {
            summary.record(entry);
            reporter.entry(entry).context("failed to write result")?;
        }
    } else {
        let entries =
            run_scan(spawner, config, target).with_context(|| format!("scan of {} failed", scanned))?;
        for entry in entries {
            let entry = entry.with_context(|| format!("scan of {} failed", scanned))?;
            summary.record(&entry);
            reporter.entry(&entry).context("failed to write result")?;
        }
    }
    summary.finish();

    log::info!(
        "Checked {} file(s): {} clean, {} corrupt, {} not checked",
        summary.total,
        summary.clean,
        summary.corrupt,
        summary.failed
    );
    if !(single_file && reporter.is_text()) {
        reporter.summary(&summary).context("failed to write summary")?;
    }
    Ok(summary)
}
