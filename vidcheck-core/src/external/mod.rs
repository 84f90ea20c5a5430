// ============================================================================
// vidcheck-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the ffmpeg Binary
//
// This module encapsulates every interaction with the external decode tool.
// Process creation goes through the `DecodeSpawner` trait so the scan loop can
// be driven by the real ffmpeg-sidecar backed spawner or by a mock.
//
// KEY COMPONENTS:
// - DecodeSpawner / DecodeProcess traits and the ffmpeg-sidecar implementation
// - Dependency checking

use crate::error::{CoreError, CoreResult};

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Traits and implementations for spawning decode passes
pub mod ffmpeg_executor;

/// Scriptable spawner for tests
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

pub use ffmpeg_executor::{
    DecodeOutput, DecodeProcess, DecodeSpawner, SidecarProcess, SidecarSpawner,
    build_decode_command,
};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that an external command can be started.
///
/// Runs `<binary> -version` with all output discarded. Only a failure to start
/// the process counts; the exit status is not inspected.
///
/// # Errors
///
/// * `CoreError::DependencyNotFound` - the binary does not exist
/// * `CoreError::CommandStart` - the binary exists but could not be started
pub fn check_dependency(binary: &Path) -> CoreResult<()> {
    let name = binary.display().to_string();
    let result = Command::new(binary)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::error!("Dependency '{}' not found.", name);
            Err(CoreError::DependencyNotFound(name))
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            log::error!("Dependency '{}' is not executable: {}", name, e);
            Err(CoreError::DependencyNotFound(name))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", name, e);
            Err(CoreError::CommandStart(name, e))
        }
    }
}
