//! Configuration for the decode check.
//!
//! `CheckConfig` holds the command template used for every decode pass: which
//! binary to run, at which log level, and how long a single file may take.
//! It is created by the consumer (e.g. vidcheck-cli) and passed into the
//! check and scan functions, so tests can point it at a fake binary.

mod builder;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{CoreError, CoreResult};

pub use builder::CheckConfigBuilder;

// Default constants

/// Binary looked up on PATH when no explicit ffmpeg path is configured.
pub const DEFAULT_FFMPEG_BINARY: &str = "ffmpeg";

/// Only error-severity diagnostics are written to stderr at this level.
pub const DEFAULT_LOG_LEVEL: &str = "error";

/// Muxer used for the decode pass. Frames are decoded and thrown away.
pub const NULL_FORMAT: &str = "null";

/// Output target for the null muxer.
pub const NULL_SINK: &str = "-";

/// Files are checked one at a time unless more workers are requested.
pub const DEFAULT_JOBS: usize = 1;

/// Command template and limits for the decode pass.
///
/// # Examples
///
/// ```rust
/// use vidcheck_core::config::CheckConfigBuilder;
/// use std::time::Duration;
///
/// let config = CheckConfigBuilder::new()
///     .ffmpeg_path("/usr/local/bin/ffmpeg")
///     .timeout(Duration::from_secs(600))
///     .jobs(4)
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Path or bare name of the ffmpeg binary
    pub ffmpeg_path: PathBuf,

    /// Value passed to `-v`
    pub log_level: String,

    /// Extra arguments placed before `-i` (decoder selection, hwaccel, ...)
    pub input_args: Vec<String>,

    /// Upper bound for a single decode pass. `None` waits forever.
    pub timeout: Option<Duration>,

    /// Number of files checked concurrently
    pub jobs: usize,
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckConfigBuilder::new().build()
    }
}

impl CheckConfig {
    /// Name used for the tool in logs and error messages.
    pub fn tool_name(&self) -> String {
        self.ffmpeg_path.display().to_string()
    }

    /// Arguments for a decode pass over `input`:
    /// `-v <level> [input args] -i <input> -f null -`.
    pub fn decode_args(&self, input: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(7 + self.input_args.len());
        args.push("-v".into());
        args.push(self.log_level.as_str().into());
        args.extend(self.input_args.iter().map(OsString::from));
        args.push("-i".into());
        args.push(input.as_os_str().to_os_string());
        args.push("-f".into());
        args.push(NULL_FORMAT.into());
        args.push(NULL_SINK.into());
        args
    }

    /// Checks the configuration for values that cannot work.
    pub fn validate(&self) -> CoreResult<()> {
        if self.ffmpeg_path.as_os_str().is_empty() {
            return Err(CoreError::Config("ffmpeg path must not be empty".to_string()));
        }
        if self.log_level.trim().is_empty() {
            return Err(CoreError::Config("log level must not be empty".to_string()));
        }
        if self.jobs == 0 {
            return Err(CoreError::Config("jobs must be at least 1".to_string()));
        }
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(CoreError::Config("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }
}
