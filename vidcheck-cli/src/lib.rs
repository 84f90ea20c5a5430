// vidcheck-cli/src/lib.rs
//
// Library portion of the vidcheck CLI application.
// Contains argument definitions, logging setup, output and command logic.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod output;

// Re-export items needed by the binary or integration tests
pub use cli::Cli;
pub use commands::scan::run as run_scan;
