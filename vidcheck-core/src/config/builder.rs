// ============================================================================
// vidcheck-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CheckConfig
//
// Fluent construction of `CheckConfig` with defaults for every field. Call
// `CheckConfig::validate` on the result before scanning.

use std::path::PathBuf;
use std::time::Duration;

use super::CheckConfig;

/// Builder for creating CheckConfig instances.
#[derive(Debug, Clone)]
pub struct CheckConfigBuilder {
    ffmpeg_path: PathBuf,
    log_level: String,
    input_args: Vec<String>,
    timeout: Option<Duration>,
    jobs: usize,
}

impl Default for CheckConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self {
            ffmpeg_path: PathBuf::from(super::DEFAULT_FFMPEG_BINARY),
            log_level: super::DEFAULT_LOG_LEVEL.to_string(),
            input_args: Vec::new(),
            timeout: None,
            jobs: super::DEFAULT_JOBS,
        }
    }

    /// Sets the ffmpeg binary. A bare name is resolved through PATH.
    pub fn ffmpeg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ffmpeg_path = path.into();
        self
    }

    /// Sets the `-v` level of the decode pass.
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Appends one argument placed before `-i`.
    pub fn input_arg(mut self, arg: impl Into<String>) -> Self {
        self.input_args.push(arg.into());
        self
    }

    /// Sets the per-file timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets or clears the per-file timeout.
    pub fn timeout_opt(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the number of concurrent checks.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Builds the CheckConfig.
    pub fn build(self) -> CheckConfig {
        CheckConfig {
            ffmpeg_path: self.ffmpeg_path,
            log_level: self.log_level,
            input_args: self.input_args,
            timeout: self.timeout,
            jobs: self.jobs,
        }
    }
}
