// ============================================================================
// vidcheck-core/src/check.rs
// ============================================================================
//
// DECODE CHECK: One ffmpeg Decode Pass per File
//
// A file is checked by decoding all of its streams into the null muxer with
// only error-severity logging enabled. Whatever ffmpeg writes to stderr is
// the diagnostic text; a file is corrupt exactly when that text is non-empty.
// The exit code is kept for reporting but never decides corruption.

use crate::config::CheckConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::{DecodeProcess, DecodeSpawner, build_decode_command};

use serde::Serialize;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Outcome of one decode pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoCheckResult {
    pub path: PathBuf,
    /// Error-severity diagnostics written by the decode tool
    pub diagnostics: String,
    /// True iff `diagnostics` is non-empty
    pub corrupt: bool,
    /// Informational only
    pub exit_code: Option<i32>,
    pub elapsed_secs: f64,
}

impl VideoCheckResult {
    /// Builds a result from the captured diagnostic text.
    pub fn from_diagnostics(
        path: PathBuf,
        diagnostics: String,
        exit_code: Option<i32>,
        elapsed_secs: f64,
    ) -> Self {
        let corrupt = !diagnostics.is_empty();
        Self {
            path,
            diagnostics,
            corrupt,
            exit_code,
            elapsed_secs,
        }
    }
}

/// Runs a decode pass over `path` and classifies the file.
///
/// Blocks until the decode tool exits or the configured timeout fires.
///
/// # Errors
///
/// * `CoreError::FileUnreadable` - the file cannot be opened for reading
/// * `CoreError::DependencyNotFound` - the decode binary is missing
/// * `CoreError::CommandStart` / `CoreError::CommandWait` - the process could not be run
/// * `CoreError::Timeout` - the pass ran longer than `config.timeout`
/// * `CoreError::DiagnosticDecode` - stderr was not valid UTF-8
///
/// # Examples
///
/// ```rust,no_run
/// use vidcheck_core::{CheckConfig, check_video};
/// use vidcheck_core::external::SidecarSpawner;
/// use std::path::Path;
///
/// let result = check_video(&SidecarSpawner, &CheckConfig::default(), Path::new("movie.mkv")).unwrap();
/// if result.corrupt {
///     println!("{}", result.diagnostics);
/// }
/// ```
pub fn check_video<S: DecodeSpawner>(
    spawner: &S,
    config: &CheckConfig,
    path: &Path,
) -> CoreResult<VideoCheckResult> {
    // An unreadable input is a per-file failure, never corruption.
    File::open(path).map_err(|source| CoreError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Checking {}", path.display());
    let start = Instant::now();

    let cmd = build_decode_command(config, path);
    let mut process = spawner.spawn(cmd)?;
    let output = process.wait_with_output(config.timeout)?;
    drop(process);

    let diagnostics = String::from_utf8(output.stderr)?;
    let result = VideoCheckResult::from_diagnostics(
        path.to_path_buf(),
        diagnostics,
        output.exit_code,
        start.elapsed().as_secs_f64(),
    );

    if result.corrupt {
        log::info!("Decode errors in {}", path.display());
    } else {
        log::debug!(
            "{} decoded cleanly in {:.2}s (exit code {:?})",
            path.display(),
            result.elapsed_secs,
            result.exit_code
        );
    }
    Ok(result)
}
