//! Target discovery for scans.
//!
//! Turns a [`ScanTarget`] into the ordered list of files that will get a
//! decode pass. Every regular file counts; no extension filtering is done
//! since ffmpeg decides what it can read.

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// What to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanTarget {
    /// One file.
    File(PathBuf),
    /// Every file in a directory, optionally including subdirectories.
    Directory { path: PathBuf, recursive: bool },
}

impl ScanTarget {
    pub fn path(&self) -> &Path {
        match self {
            ScanTarget::File(path) => path,
            ScanTarget::Directory { path, .. } => path,
        }
    }
}

/// Resolves a scan target to the files it covers.
///
/// Directory entries are returned in file name order within each directory.
/// Symlinks to files are included; symlinked directories are not descended. Entries that cannot be read below the root are
/// logged and skipped; a root that cannot be read is an error.
///
/// # Errors
///
/// * `CoreError::PathNotFound` - the path does not exist
/// * `CoreError::NotAFile` - a file was requested but the path is a directory
/// * `CoreError::NotADirectory` - a directory was requested but the path is not one
/// * `CoreError::Walkdir` - the root directory could not be read
///
/// # Examples
///
/// ```rust,no_run
/// use vidcheck_core::discovery::{resolve_targets, ScanTarget};
/// use std::path::PathBuf;
///
/// let target = ScanTarget::Directory { path: PathBuf::from("/videos"), recursive: true };
/// for file in resolve_targets(&target).unwrap() {
///     println!("{}", file.display());
/// }
/// ```
pub fn resolve_targets(target: &ScanTarget) -> CoreResult<Vec<PathBuf>> {
    let path = target.path();
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CoreError::PathNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(CoreError::Io(e)),
    };

    match target {
        ScanTarget::File(path) => {
            if metadata.is_dir() {
                return Err(CoreError::NotAFile(path.clone()));
            }
            Ok(vec![path.clone()])
        }
        ScanTarget::Directory { path, recursive } => {
            if !metadata.is_dir() {
                return Err(CoreError::NotADirectory(path.clone()));
            }
            walk_directory(path, *recursive)
        }
    }
}

fn walk_directory(root: &Path, recursive: bool) -> CoreResult<Vec<PathBuf>> {
    let mut walker = WalkDir::new(root).min_depth(1).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // depth 0 is the root itself
            Err(e) if e.depth() == 0 => return Err(CoreError::Walkdir(e)),
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        // is_file() follows symlinks, file_type() does not
        if entry.path().is_file() {
            files.push(entry.into_path());
        }
    }

    log::debug!(
        "Resolved {} file(s) under {} (recursive: {})",
        files.len(),
        root.display(),
        recursive
    );
    Ok(files)
}
