//! Core library for detecting corrupt video files with ffmpeg.
//!
//! Each file gets a decode pass (`ffmpeg -v error -i <file> -f null -`). A file
//! is corrupt when that pass writes anything to stderr. This crate resolves
//! scan targets, runs the passes, keeps per-file failures from ending a scan
//! and aggregates the results.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vidcheck_core::{CheckConfigBuilder, ScanSummary, ScanTarget, run_scan};
//! use vidcheck_core::external::SidecarSpawner;
//! use std::path::PathBuf;
//! use std::time::Duration;
//!
//! let config = CheckConfigBuilder::new()
//!     .timeout(Duration::from_secs(900))
//!     .build();
//! let target = ScanTarget::Directory { path: PathBuf::from("/media/videos"), recursive: true };
//!
//! let mut summary = ScanSummary::new();
//! for entry in run_scan(&SidecarSpawner, &config, target).unwrap() {
//!     let entry = entry.unwrap();
//!     println!("{:?} {}", entry.status(), entry.path().display());
//!     summary.record(&entry);
//! }
//! summary.finish();
//! print!("{}", summary);
//! ```

pub mod check;
pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod reporting;
pub mod scan;
pub mod utils;

// Re-exports for public API
pub use check::{VideoCheckResult, check_video};
pub use config::{CheckConfig, CheckConfigBuilder};
pub use discovery::{ScanTarget, resolve_targets};
pub use error::{CoreError, CoreResult, ErrorKind};
pub use reporting::ScanSummary;
pub use scan::{
    FileFailure, ScanEntry, ScanIter, ScanPlan, ScanRecord, ScanStatus, prepare_scan, run_scan,
    run_scan_parallel,
};
pub use utils::format_duration;
