// vidcheck-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled for unit tests and when the "test-mocks" feature is enabled.

use super::ffmpeg_executor::{DecodeOutput, DecodeProcess, DecodeSpawner};
use crate::error::{CoreError, CoreResult, command_start_error};
use ffmpeg_sidecar::command::FfmpegCommand;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What a mocked decode pass does.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// The pass runs and writes `stderr`.
    Output { stderr: Vec<u8>, exit_code: i32 },
    /// Spawning fails with an io error of this kind.
    SpawnError(io::ErrorKind),
    /// The pass never finishes within its timeout.
    Hang,
}

impl MockOutcome {
    pub fn clean() -> Self {
        MockOutcome::Output {
            stderr: Vec::new(),
            exit_code: 0,
        }
    }

    pub fn corrupt(diagnostics: &str) -> Self {
        MockOutcome::Output {
            stderr: diagnostics.as_bytes().to_vec(),
            exit_code: 1,
        }
    }
}

/// Mock implementation of DecodeProcess.
#[derive(Debug, Clone)]
pub struct MockDecodeProcess {
    outcome: MockOutcome,
}

impl DecodeProcess for MockDecodeProcess {
    fn wait_with_output(&mut self, timeout: Option<Duration>) -> CoreResult<DecodeOutput> {
        match &self.outcome {
            MockOutcome::Output { stderr, exit_code } => Ok(DecodeOutput {
                stderr: stderr.clone(),
                exit_code: Some(*exit_code),
            }),
            MockOutcome::Hang => Err(CoreError::Timeout(timeout.unwrap_or(Duration::MAX))),
            MockOutcome::SpawnError(_) => unreachable!("spawn errors never produce a process"),
        }
    }
}

struct MockExpectation {
    input_pattern: String,
    outcome: MockOutcome,
}

/// Mock implementation of DecodeSpawner.
///
/// Expectations are matched against the `-i` argument by substring, first
/// match wins. Inputs without an expectation decode cleanly.
#[derive(Clone, Default)]
pub struct MockDecodeSpawner {
    expectations: Arc<Mutex<Vec<MockExpectation>>>,
    received_calls: Arc<Mutex<Vec<Vec<String>>>>,
    missing_binary: bool,
}

impl MockDecodeSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    /// A spawner whose binary is not installed.
    pub fn without_binary() -> Self {
        Self {
            missing_binary: true,
            ..Default::default()
        }
    }

    pub fn expect(&self, input_pattern: &str, outcome: MockOutcome) {
        self.expectations
            .lock()
            .expect("mock expectations poisoned")
            .push(MockExpectation {
                input_pattern: input_pattern.to_string(),
                outcome,
            });
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls
            .lock()
            .expect("mock calls poisoned")
            .clone()
    }

    /// The `-i` argument of every received call, in order.
    pub fn received_inputs(&self) -> Vec<String> {
        self.get_received_calls()
            .iter()
            .filter_map(|args| {
                let pos = args.iter().position(|a| a == "-i")?;
                args.get(pos + 1).cloned()
            })
            .collect()
    }
}

impl DecodeSpawner for MockDecodeSpawner {
    type Process = MockDecodeProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let inner = cmd.as_inner_mut();
        let tool = inner.get_program().to_string_lossy().into_owned();
        let args: Vec<String> = inner
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        self.received_calls
            .lock()
            .expect("mock calls poisoned")
            .push(args.clone());

        if self.missing_binary {
            return Err(command_start_error(tool, io::Error::from(io::ErrorKind::NotFound)));
        }

        let input = args
            .iter()
            .position(|a| a == "-i")
            .and_then(|pos| args.get(pos + 1))
            .cloned()
            .unwrap_or_default();

        let outcome = self
            .expectations
            .lock()
            .expect("mock expectations poisoned")
            .iter()
            .find(|exp| input.contains(&exp.input_pattern))
            .map(|exp| exp.outcome.clone())
            .unwrap_or_else(MockOutcome::clean);

        match outcome {
            MockOutcome::SpawnError(kind) => {
                log::warn!("MockDecodeSpawner simulating spawn error for {}", input);
                Err(command_start_error(tool, io::Error::from(kind)))
            }
            outcome => Ok(MockDecodeProcess { outcome }),
        }
    }

    fn ensure_available(&self, binary: &Path) -> CoreResult<()> {
        if self.missing_binary {
            Err(CoreError::DependencyNotFound(binary.display().to_string()))
        } else {
            Ok(())
        }
    }
}
