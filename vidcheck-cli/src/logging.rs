// ============================================================================
// vidcheck-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console and Optional File Logging
//
// Log records go to stderr so stdout carries nothing but scan results.
//
// - Without `--log-file`: env_logger, honouring RUST_LOG on top of the
//   level picked from the flags.
// - With `--log-file`: fern, writing the same records to stderr and, with
//   timestamps and targets, to the file.
//
// Levels: `warn` by default, `debug` with `--verbose`, `error` with `--quiet`.

use anyhow::Context;
use console::style;
use log::LevelFilter;
use std::io::Write;
use std::path::Path;

use crate::cli::Cli;

/// Console level implied by the verbosity flags.
pub fn level_for(verbose: bool, quiet: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    }
}

/// Installs the global logger for this run.
pub fn init(cli: &Cli) -> anyhow::Result<()> {
    let level = level_for(cli.verbose, cli.quiet);
    match &cli.log_file {
        Some(path) => init_with_file(level, path),
        None => {
            env_logger::Builder::new()
                .filter_level(level)
                .parse_default_env()
                .format(|buf, record| {
                    writeln!(buf, "{} {}", styled_level(record.level()), record.args())
                })
                .try_init()
                .context("failed to initialize logger")?;
            Ok(())
        }
    }
}

fn init_with_file(level: LevelFilter, path: &Path) -> anyhow::Result<()> {
    let file = fern::log_file(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let console = fern::Dispatch::new()
        .level(level)
        .format(|out, message, record| {
            out.finish(format_args!("{} {}", styled_level(record.level()), message))
        })
        .chain(std::io::stderr());

    // The file keeps debug records whatever the console level.
    let file = fern::Dispatch::new()
        .level(LevelFilter::Debug.max(level))
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {:<5} [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(file);

    fern::Dispatch::new()
        .chain(console)
        .chain(file)
        .apply()
        .context("failed to initialize logger")?;
    log::debug!("Logging to {}", path.display());
    Ok(())
}

// Records go to stderr, so colour follows stderr's terminal, not stdout's.
fn styled_level(level: log::Level) -> console::StyledObject<&'static str> {
    let label = match level {
        log::Level::Error => style("error:").red().bold(),
        log::Level::Warn => style("warning:").yellow().bold(),
        log::Level::Info => style("info:").green(),
        log::Level::Debug => style("debug:").blue(),
        log::Level::Trace => style("trace:").magenta(),
    };
    label.for_stderr()
}
