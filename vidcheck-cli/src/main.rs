// vidcheck-cli/src/main.rs
//
// Entry point for the vidcheck binary.
//
// Exit codes:
// - 0: every file decoded cleanly
// - 1: at least one file is corrupt or could not be checked
// - 2: the scan could not run (bad input, missing ffmpeg, usage error)

use clap::Parser;
use std::process::ExitCode;

use vidcheck_cli::{Cli, logging, run_scan};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(&cli) {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(2);
    }

    match run_scan(&cli) {
        Ok(summary) if summary.has_problems() => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("Scan aborted: {:?}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
