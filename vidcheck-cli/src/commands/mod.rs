//! Command implementations for the CLI.

/// Checks a file or a directory of files for corruption.
pub mod scan;
