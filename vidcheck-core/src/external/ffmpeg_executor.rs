// ============================================================================
// vidcheck-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: Decode Pass Process Management
//
// This module provides the abstraction for spawning a decode pass and
// collecting what it writes to stderr.
//
// KEY COMPONENTS:
// - DecodeProcess: Trait representing a running decode pass
// - DecodeSpawner: Trait for starting decode passes
// - SidecarSpawner / SidecarProcess: Implementation using ffmpeg-sidecar
//
// ffmpeg-sidecar only builds the command here. The inner `std::process::Command`
// is spawned directly: `FfmpegChild` requires all three pipes and
// `FfmpegCommand::spawn` appends `-n`, and the decode pass needs neither.
// The argument vector is exactly `<tool> -v <level> [input args] -i <path> -f null -`.
//
// A SidecarProcess owns its child for its whole lifetime. If it is dropped
// before the child was reaped (early return, timeout, panic while decoding
// output) the child is killed and waited on, so no zombies are left behind.

use crate::config::CheckConfig;
use crate::error::{CoreError, CoreResult, command_start_error, command_wait_error};

use ffmpeg_sidecar::command::FfmpegCommand;

use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How often a running decode pass is polled while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Everything a finished decode pass produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOutput {
    /// Raw bytes written to stderr
    pub stderr: Vec<u8>,
    /// Exit code, `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
}

// --- Decode Execution Abstraction ---

/// Trait representing a running decode pass.
pub trait DecodeProcess {
    /// Waits for the process to exit and returns its captured stderr.
    ///
    /// With a timeout, the process is killed and reaped once it runs longer
    /// than the limit and `CoreError::Timeout` is returned.
    fn wait_with_output(&mut self, timeout: Option<Duration>) -> CoreResult<DecodeOutput>;
}

/// Trait representing something that can start a decode pass.
pub trait DecodeSpawner {
    type Process: DecodeProcess;

    /// Spawns the command, consuming it.
    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;

    /// Verifies the decode binary can be started at all.
    fn ensure_available(&self, binary: &Path) -> CoreResult<()> {
        super::check_dependency(binary)
    }
}

/// Builds the decode pass command for one input file.
///
/// Built from a plain `Command` so ffmpeg-sidecar adds no `-loglevel` of its own.
pub fn build_decode_command(config: &CheckConfig, input: &Path) -> FfmpegCommand {
    let mut inner = Command::new(&config.ffmpeg_path);
    inner.args(config.decode_args(input));
    FfmpegCommand::from(inner)
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// A decode pass started through ffmpeg-sidecar.
pub struct SidecarProcess {
    tool: String,
    child: Option<Child>,
    stderr_reader: Option<JoinHandle<io::Result<Vec<u8>>>>,
}

impl SidecarProcess {
    fn new(tool: String, mut child: Child) -> Self {
        let stderr_reader = child.stderr.take().map(|mut stderr| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                stderr.read_to_end(&mut buf)?;
                Ok(buf)
            })
        });
        Self {
            tool,
            child: Some(child),
            stderr_reader,
        }
    }

    fn collect_stderr(&mut self) -> CoreResult<Vec<u8>> {
        let Some(handle) = self.stderr_reader.take() else {
            return Ok(Vec::new());
        };
        handle
            .join()
            .map_err(|_| command_wait_error(&self.tool, io::Error::other("stderr reader panicked")))?
            .map_err(|e| command_wait_error(&self.tool, e))
    }
}

impl DecodeProcess for SidecarProcess {
    fn wait_with_output(&mut self, timeout: Option<Duration>) -> CoreResult<DecodeOutput> {
        let Some(child) = self.child.as_mut() else {
            return Err(command_wait_error(
                &self.tool,
                io::Error::other("process was already waited on"),
            ));
        };

        let status = match timeout {
            None => child
                .wait()
                .map_err(|e| command_wait_error(&self.tool, e))?,
            Some(limit) => match wait_until(child, limit).map_err(|e| command_wait_error(&self.tool, e))? {
                Some(status) => status,
                None => {
                    log::warn!("{} exceeded {:?}, killing it", self.tool, limit);
                    if let Err(e) = child.kill() {
                        log::debug!("Kill after timeout failed: {}", e);
                    }
                    child.wait().map_err(|e| command_wait_error(&self.tool, e))?;
                    self.child = None;
                    // A grandchild may still hold the pipe open; leave the reader detached.
                    drop(self.stderr_reader.take());
                    return Err(CoreError::Timeout(limit));
                }
            },
        };
        self.child = None;

        let stderr = self.collect_stderr()?;
        Ok(DecodeOutput {
            stderr,
            exit_code: status.code(),
        })
    }
}

/// Polls until the child exits or `limit` elapses. `Ok(None)` means timed out.
fn wait_until(child: &mut Child, limit: Duration) -> io::Result<Option<ExitStatus>> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        let elapsed = start.elapsed();
        if elapsed >= limit {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL.min(limit - elapsed));
    }
}

impl Drop for SidecarProcess {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            log::debug!("Reaping unfinished {} process", self.tool);
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Concrete implementation of `DecodeSpawner` using ffmpeg-sidecar.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl DecodeSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let inner = cmd.as_inner_mut();
        let tool = inner.get_program().to_string_lossy().into_owned();
        inner
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        log::debug!("Running decode pass: {:?}", inner);
        let child = inner.spawn().map_err(|e| command_start_error(&tool, e))?;
        Ok(SidecarProcess::new(tool, child))
    }
}
