// ============================================================================
// vidcheck-core/src/scan.rs
// ============================================================================
//
// SCAN ORCHESTRATION: Target Resolution, Per-File Checks, Aggregation
//
// A scan resolves its target into a `ScanPlan`, checks that the decode tool
// can be started, and then runs one decode pass per file.
//
// FAILURE ISOLATION:
// - Input and environment errors stop the scan (returned as `Err`).
// - Per-file errors become `ScanEntry::Failed` and the scan continues.
//
// The sequential path is a lazy iterator so callers can print each entry as
// soon as it exists. The parallel path runs on a bounded rayon pool and
// returns entries in submission order once every file is done.

use crate::check::{VideoCheckResult, check_video};
use crate::config::CheckConfig;
use crate::discovery::{ScanTarget, resolve_targets};
use crate::error::{CoreError, CoreResult, ErrorKind};
use crate::external::DecodeSpawner;

use rayon::prelude::*;
use serde::Serialize;

use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

// ============================================================================
// SCAN ENTRIES
// ============================================================================

/// Status of one scanned file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    Clean,
    Corrupt,
    Failed,
}

/// A file whose decode pass could not be completed.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: CoreError,
}

/// One item of a scan.
#[derive(Debug)]
pub enum ScanEntry {
    Checked(VideoCheckResult),
    Failed(FileFailure),
}

impl ScanEntry {
    pub fn path(&self) -> &Path {
        match self {
            ScanEntry::Checked(result) => &result.path,
            ScanEntry::Failed(failure) => &failure.path,
        }
    }

    pub fn status(&self) -> ScanStatus {
        match self {
            ScanEntry::Checked(result) if result.corrupt => ScanStatus::Corrupt,
            ScanEntry::Checked(_) => ScanStatus::Clean,
            ScanEntry::Failed(_) => ScanStatus::Failed,
        }
    }

    /// Serializable view of the entry, used for JSON output.
    pub fn to_record(&self) -> ScanRecord<'_> {
        match self {
            ScanEntry::Checked(result) => ScanRecord {
                path: &result.path,
                status: self.status(),
                diagnostics: Some(&result.diagnostics),
                exit_code: result.exit_code,
                elapsed_secs: Some(result.elapsed_secs),
                error_kind: None,
                error: None,
            },
            ScanEntry::Failed(failure) => ScanRecord {
                path: &failure.path,
                status: ScanStatus::Failed,
                diagnostics: None,
                exit_code: None,
                elapsed_secs: None,
                error_kind: Some(failure.error.kind()),
                error: Some(failure.error.to_string()),
            },
        }
    }
}

/// Flat, serializable form of a [`ScanEntry`].
#[derive(Debug, Serialize)]
pub struct ScanRecord<'a> {
    pub path: &'a Path,
    pub status: ScanStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_secs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Checks one file, folding per-file errors into the entry.
///
/// Only fatal errors are returned as `Err`.
fn scan_one<S: DecodeSpawner>(
    spawner: &S,
    config: &CheckConfig,
    path: &Path,
) -> CoreResult<ScanEntry> {
    match check_video(spawner, config, path) {
        Ok(result) => Ok(ScanEntry::Checked(result)),
        Err(error) if error.is_fatal() => {
            log::error!("Aborting scan at {}: {}", path.display(), error);
            Err(error)
        }
        Err(error) => {
            log::warn!("Could not check {}: {}", path.display(), error);
            Ok(ScanEntry::Failed(FileFailure {
                path: path.to_path_buf(),
                error,
            }))
        }
    }
}

// ============================================================================
// SCAN PLAN
// ============================================================================

/// The resolved file list of a scan target.
#[derive(Debug, Clone)]
pub struct ScanPlan {
    target: ScanTarget,
    files: Vec<PathBuf>,
}

impl ScanPlan {
    /// Resolves `target`. Input errors surface here.
    pub fn resolve(target: ScanTarget) -> CoreResult<Self> {
        let files = resolve_targets(&target)?;
        log::info!(
            "Found {} file(s) to check in {}",
            files.len(),
            target.path().display()
        );
        Ok(Self { target, files })
    }

    pub fn target(&self) -> &ScanTarget {
        &self.target
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Starts a lazy, sequential pass over the plan.
    ///
    /// Each call starts again from the first file.
    pub fn iter<'a, S: DecodeSpawner>(
        &self,
        spawner: &'a S,
        config: &'a CheckConfig,
    ) -> ScanIter<'a, S> {
        ScanIter {
            spawner,
            config,
            files: self.files.clone().into_iter(),
            halted: false,
        }
    }

    /// Checks every file on a pool of `config.jobs` workers.
    ///
    /// Entries come back in plan order. The first fatal error in plan order
    /// is returned instead of the entries.
    pub fn check_parallel<S>(&self, spawner: &S, config: &CheckConfig) -> CoreResult<Vec<ScanEntry>>
    where
        S: DecodeSpawner + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.jobs)
            .thread_name(|i| format!("vidcheck-worker-{}", i))
            .build()
            .map_err(|e| CoreError::Config(format!("failed to build worker pool: {}", e)))?;

        log::debug!(
            "Checking {} file(s) with {} worker(s)",
            self.files.len(),
            config.jobs
        );
        let entries: Vec<CoreResult<ScanEntry>> = pool.install(|| {
            self.files
                .par_iter()
                .map(|path| scan_one(spawner, config, path))
                .collect()
        });
        entries.into_iter().collect()
    }
}

// ============================================================================
// SCAN ITERATOR
// ============================================================================

/// Lazy, ordered sequence of scan entries.
///
/// Yields `Ok` for every checked or failed file. A fatal error is yielded
/// once as `Err`, after which the iterator is exhausted.
pub struct ScanIter<'a, S: DecodeSpawner> {
    spawner: &'a S,
    config: &'a CheckConfig,
    files: std::vec::IntoIter<PathBuf>,
    halted: bool,
}

impl<S: DecodeSpawner> ScanIter<'_, S> {
    /// Number of files not yet checked.
    pub fn remaining(&self) -> usize {
        if self.halted { 0 } else { self.files.len() }
    }
}

impl<S: DecodeSpawner> Iterator for ScanIter<'_, S> {
    type Item = CoreResult<ScanEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }
        let path = self.files.next()?;
        let entry = scan_one(self.spawner, self.config, &path);
        if entry.is_err() {
            self.halted = true;
        }
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}

impl<S: DecodeSpawner> FusedIterator for ScanIter<'_, S> {}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Validates the configuration, resolves the target and makes sure the
/// decode tool can be started.
pub fn prepare_scan<S: DecodeSpawner>(
    spawner: &S,
    config: &CheckConfig,
    target: ScanTarget,
) -> CoreResult<ScanPlan> {
    config.validate()?;
    let plan = ScanPlan::resolve(target)?;
    spawner.ensure_available(&config.ffmpeg_path)?;
    log::debug!("Decoding with {}", config.tool_name());
    Ok(plan)
}

/// Runs a sequential scan, producing entries one at a time.
///
/// Input and environment errors are returned before any file is checked.
///
/// # Examples
///
/// ```rust,no_run
/// use vidcheck_core::{CheckConfig, ScanEntry, ScanTarget, run_scan};
/// use vidcheck_core::external::SidecarSpawner;
/// use std::path::PathBuf;
///
/// let config = CheckConfig::default();
/// let target = ScanTarget::Directory { path: PathBuf::from("videos"), recursive: false };
/// for entry in run_scan(&SidecarSpawner, &config, target).unwrap() {
///     match entry.unwrap() {
///         ScanEntry::Checked(result) => println!("{} corrupt={}", result.path.display(), result.corrupt),
///         ScanEntry::Failed(failure) => println!("{} failed: {}", failure.path.display(), failure.error),
///     }
/// }
/// ```
pub fn run_scan<'a, S: DecodeSpawner>(
    spawner: &'a S,
    config: &'a CheckConfig,
    target: ScanTarget,
) -> CoreResult<ScanIter<'a, S>> {
    let plan = prepare_scan(spawner, config, target)?;
    Ok(plan.iter(spawner, config))
}

/// Runs a scan on `config.jobs` workers and returns entries in plan order.
pub fn run_scan_parallel<S>(
    spawner: &S,
    config: &CheckConfig,
    target: ScanTarget,
) -> CoreResult<Vec<ScanEntry>>
where
    S: DecodeSpawner + Sync,
{
    let plan = prepare_scan(spawner, config, target)?;
    plan.check_parallel(spawner, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckConfigBuilder;
    use crate::external::mocks::{MockDecodeSpawner, MockOutcome};
    use std::io;
    use tempfile::{TempDir, tempdir};

    fn videos(names: &[&str]) -> TempDir {
        let dir = tempdir().unwrap();
        for name in names {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(path, b"payload").unwrap();
        }
        dir
    }

    fn dir_target(dir: &TempDir, recursive: bool) -> ScanTarget {
        ScanTarget::Directory {
            path: dir.path().to_path_buf(),
            recursive,
        }
    }

    fn file_name(entry: &ScanEntry) -> String {
        entry.path().file_name().unwrap().to_string_lossy().into_owned()
    }

    #[test]
    fn directory_scan_reports_good_and_bad_files() {
        let dir = videos(&["good.mp4", "bad.mp4"]);
        let spawner = MockDecodeSpawner::new();
        spawner.expect("bad.mp4", MockOutcome::corrupt("Invalid data found when processing input\n"));
        let config = CheckConfig::default();

        let entries: Vec<ScanEntry> = run_scan(&spawner, &config, dir_target(&dir, false))
            .unwrap()
            .collect::<CoreResult<_>>()
            .unwrap();

        let summary: Vec<(String, ScanStatus)> =
            entries.iter().map(|e| (file_name(e), e.status())).collect();
        assert_eq!(
            summary,
            vec![
                ("bad.mp4".to_string(), ScanStatus::Corrupt),
                ("good.mp4".to_string(), ScanStatus::Clean),
            ]
        );
    }

    #[test]
    fn per_file_failure_does_not_stop_the_scan() {
        let dir = videos(&["a.mkv", "b.mkv", "c.mkv"]);
        let spawner = MockDecodeSpawner::new();
        spawner.expect("b.mkv", MockOutcome::SpawnError(io::ErrorKind::PermissionDenied));
        let config = CheckConfig::default();

        let entries: Vec<ScanEntry> = run_scan(&spawner, &config, dir_target(&dir, false))
            .unwrap()
            .collect::<CoreResult<_>>()
            .unwrap();

        let statuses: Vec<ScanStatus> = entries.iter().map(ScanEntry::status).collect();
        assert_eq!(
            statuses,
            vec![ScanStatus::Clean, ScanStatus::Failed, ScanStatus::Clean]
        );
        match &entries[1] {
            ScanEntry::Failed(failure) => {
                assert!(matches!(failure.error, CoreError::CommandStart(..)));
            }
            other => panic!("expected a failure, got {:?}", other),
        }
    }

    #[test]
    fn timeouts_are_isolated_to_their_file() {
        let dir = videos(&["hang.ts", "ok.ts"]);
        let spawner = MockDecodeSpawner::new();
        spawner.expect("hang.ts", MockOutcome::Hang);
        let config = CheckConfigBuilder::new()
            .timeout(std::time::Duration::from_secs(5))
            .build();

        let statuses: Vec<ScanStatus> = run_scan(&spawner, &config, dir_target(&dir, false))
            .unwrap()
            .map(|e| e.unwrap().status())
            .collect();
        assert_eq!(statuses, vec![ScanStatus::Failed, ScanStatus::Clean]);
    }

    #[test]
    fn missing_tool_aborts_before_any_entry() {
        let dir = videos(&["a.mkv"]);
        let spawner = MockDecodeSpawner::without_binary();
        let config = CheckConfig::default();

        let err = run_scan(&spawner, &config, dir_target(&dir, false))
            .err()
            .expect("scan should not start");
        assert_eq!(err.kind(), ErrorKind::Environment);
        assert!(spawner.get_received_calls().is_empty());
    }

    #[test]
    fn tool_vanishing_mid_scan_ends_the_iterator() {
        let dir = videos(&["a.mkv", "b.mkv"]);
        let plan = ScanPlan::resolve(dir_target(&dir, false)).unwrap();
        let spawner = MockDecodeSpawner::without_binary();
        let config = CheckConfig::default();

        let mut iter = plan.iter(&spawner, &config);
        assert!(matches!(iter.next(), Some(Err(CoreError::DependencyNotFound(_)))));
        assert!(iter.next().is_none());
        assert_eq!(iter.remaining(), 0);
    }

    #[test]
    fn plan_iteration_restarts_from_scratch() {
        let dir = videos(&["one.mp4", "two.mp4"]);
        let plan = ScanPlan::resolve(dir_target(&dir, false)).unwrap();
        let spawner = MockDecodeSpawner::new();
        let config = CheckConfig::default();

        let first: Vec<String> = plan
            .iter(&spawner, &config)
            .map(|e| file_name(&e.unwrap()))
            .collect();
        let second: Vec<String> = plan
            .iter(&spawner, &config)
            .map(|e| file_name(&e.unwrap()))
            .collect();
        assert_eq!(first, vec!["one.mp4", "two.mp4"]);
        assert_eq!(first, second);
        assert_eq!(spawner.get_received_calls().len(), 4);
    }

    #[test]
    fn iterator_is_lazy() {
        let dir = videos(&["one.mp4", "two.mp4", "three.mp4"]);
        let spawner = MockDecodeSpawner::new();
        let config = CheckConfig::default();

        let mut iter = run_scan(&spawner, &config, dir_target(&dir, false)).unwrap();
        assert!(spawner.get_received_calls().is_empty());
        iter.next();
        assert_eq!(spawner.get_received_calls().len(), 1);
        assert!(spawner.received_inputs()[0].ends_with("one.mp4"));
        assert_eq!(iter.remaining(), 2);
    }

    #[test]
    fn parallel_scan_keeps_submission_order() {
        let names: Vec<String> = (0..12).map(|i| format!("clip{:02}.mp4", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let dir = videos(&refs);
        let spawner = MockDecodeSpawner::new();
        spawner.expect("clip03", MockOutcome::corrupt("error while decoding MB 3 7\n"));
        spawner.expect("clip07", MockOutcome::SpawnError(io::ErrorKind::PermissionDenied));
        let config = CheckConfigBuilder::new().jobs(4).build();

        let entries = run_scan_parallel(&spawner, &config, dir_target(&dir, false)).unwrap();
        let got: Vec<String> = entries.iter().map(file_name).collect();
        assert_eq!(got, names);
        assert_eq!(entries[3].status(), ScanStatus::Corrupt);
        assert_eq!(entries[7].status(), ScanStatus::Failed);
        assert_eq!(spawner.get_received_calls().len(), 12);
    }

    #[test]
    fn failed_entries_serialize_with_their_error_kind() {
        let entry = ScanEntry::Failed(FileFailure {
            path: PathBuf::from("/v/x.mkv"),
            error: CoreError::Timeout(std::time::Duration::from_secs(2)),
        });
        let json = serde_json::to_value(entry.to_record()).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error_kind"], "invocation");
        assert!(json.get("diagnostics").is_none());
    }
}
