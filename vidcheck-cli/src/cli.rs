// vidcheck-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::time::Duration;

use vidcheck_core::config::DEFAULT_FFMPEG_BINARY;
use vidcheck_core::{CheckConfig, CheckConfigBuilder, ScanTarget};

use crate::output::OutputFormat;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    name = "vidcheck",
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "vidcheck: find corrupt video files",
    long_about = "Runs an ffmpeg decode pass over each file and reports every file \
                  for which ffmpeg prints errors."
)]
#[command(group(
    ArgGroup::new("target")
        .required(true)
        .args(["file", "directory"]),
))]
pub struct Cli {
    /// Single video file to check. Prints ffmpeg's error output (empty if clean)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Check every file inside this directory
    #[arg(short = 'd', long = "directory", value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Descend into subdirectories (with --directory)
    #[arg(
        short = 'r',
        long = "recurse",
        requires = "directory",
        conflicts_with = "file"
    )]
    pub recurse: bool,

    /// ffmpeg binary to run; a bare name is looked up on PATH
    #[arg(long, value_name = "PATH", default_value = DEFAULT_FFMPEG_BINARY)]
    pub ffmpeg: PathBuf,

    /// Give up on a file after this many seconds
    #[arg(long, value_name = "SECONDS", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Number of files checked at the same time. Output is printed once all
    /// files are done when greater than 1
    #[arg(
        short = 'j',
        long,
        value_name = "N",
        default_value_t = 1,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub jobs: u16,

    /// Print one JSON object per file and a final summary object
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print corrupt and failed files
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Also write log records to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn target(&self) -> ScanTarget {
        match (&self.file, &self.directory) {
            (Some(file), _) => ScanTarget::File(file.clone()),
            (None, Some(directory)) => ScanTarget::Directory {
                path: directory.clone(),
                recursive: self.recurse,
            },
            // clap enforces the "target" group
            (None, None) => unreachable!("either --file or --directory is required"),
        }
    }

    pub fn check_config(&self) -> CheckConfig {
        CheckConfigBuilder::new()
            .ffmpeg_path(&self.ffmpeg)
            .timeout_opt(self.timeout)
            .jobs(usize::from(self.jobs))
            .build()
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

fn parse_timeout(value: &str) -> Result<Duration, String> {
    let secs: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", value))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err("timeout must be a positive number of seconds".to_string());
    }
    Ok(Duration::from_secs_f64(secs))
}
