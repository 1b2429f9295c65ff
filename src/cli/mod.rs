//! Entry point for test binaries.
//!
//! A binary registers its tests and calls [`run`]; the process exits with `0`
//! when every selected test passed and `-1` otherwise.

use std::process;

use clap::Parser;

use crate::cli::args::XsTestArgs;
use crate::config::RunConfig;
use crate::registry;
use crate::report::{ConsoleReporter, NullReporter, Reporter};
use crate::runner::Runner;

pub mod args;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = -1;

/// Parses the command line, runs the registered tests and exits.
pub fn run() -> ! {
    let config = XsTestArgs::parse().into_config();
    process::exit(run_all(&config));
}

/// Runs every test of the global registry selected by `config` and returns
/// the process exit code.
pub fn run_all(config: &RunConfig) -> i32 {
    let runner = Runner::from_registry(registry::global());
    if config.quiet {
        execute(&runner, config, &mut NullReporter)
    } else {
        let mut console = ConsoleReporter::stdout(config.color.choice());
        execute(&runner, config, &mut console)
    }
}

fn execute(runner: &Runner, config: &RunConfig, reporter: &mut dyn Reporter) -> i32 {
    match runner.execute(&config.filter, reporter) {
        Ok(summary) if summary.success => EXIT_SUCCESS,
        _ => EXIT_FAILURE,
    }
}
