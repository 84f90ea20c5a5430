// ============================================================================
// vidcheck-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the Scan Orchestrator
//
// Every failure the library can report is a `CoreError`. Errors fall into a
// small taxonomy (`ErrorKind`) that decides how a scan reacts to them: input
// and environment errors stop the scan, per-file errors are attached to the
// file that caused them and the scan moves on.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Broad classification of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The scan target is missing or of the wrong type.
    Input,
    /// The decode tool is not available. No file can be checked.
    Environment,
    /// The decode pass for one file could not be run to completion.
    Invocation,
    /// The diagnostic stream of one file was not valid text.
    DecodingOutput,
    /// Configuration, serialization and other plumbing failures.
    Other,
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Expected a file but found a directory: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Expected a directory but found a file: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to walk directory: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Required external command '{0}' not found or not executable")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed to wait for command '{0}': {1}")]
    CommandWait(String, #[source] io::Error),

    #[error("Cannot read input file {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Decode pass timed out after {:.1}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("Diagnostic output is not valid UTF-8: {0}")]
    DiagnosticDecode(#[from] std::string::FromUtf8Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Classifies this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::PathNotFound(_)
            | CoreError::NotAFile(_)
            | CoreError::NotADirectory(_)
            | CoreError::Walkdir(_) => ErrorKind::Input,
            CoreError::DependencyNotFound(_) => ErrorKind::Environment,
            CoreError::CommandStart(..)
            | CoreError::CommandWait(..)
            | CoreError::FileUnreadable { .. }
            | CoreError::Timeout(_) => ErrorKind::Invocation,
            CoreError::DiagnosticDecode(_) => ErrorKind::DecodingOutput,
            CoreError::Config(_) | CoreError::Io(_) | CoreError::Json(_) => ErrorKind::Other,
        }
    }

    /// Returns true when the error ends the whole scan rather than one file.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self.kind(),
            ErrorKind::Invocation | ErrorKind::DecodingOutput
        )
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

// ---- Helper constructors ----

/// Maps a spawn failure to the matching error.
///
/// A missing binary is an environment problem, anything else only concerns
/// the file being checked.
pub fn command_start_error(cmd_name: impl Into<String>, error: io::Error) -> CoreError {
    let cmd_name = cmd_name.into();
    if error.kind() == io::ErrorKind::NotFound {
        CoreError::DependencyNotFound(cmd_name)
    } else {
        CoreError::CommandStart(cmd_name, error)
    }
}

pub fn command_wait_error(cmd_name: impl Into<String>, error: io::Error) -> CoreError {
    CoreError::CommandWait(cmd_name.into(), error)
}
