//! Command-line arguments of a test binary.
//!
//! Uses the `clap` derive API.

use clap::Parser;

use crate::config::{ColorMode, RunConfig};
use crate::filter::Filter;

#[derive(Debug, Parser)]
#[command(version, about = "Runs the tests registered in this binary.")]
pub struct XsTestArgs {
    /// Tests to run, as `Suite` or `Suite.Case`. Runs everything when empty.
    pub tests: Vec<String>,

    /// When to colour the output.
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Print nothing; report the result through the exit code only.
    #[arg(short, long)]
    pub quiet: bool,
}

impl XsTestArgs {
    pub fn into_config(self) -> RunConfig {
        RunConfig {
            filter: Filter::new(self.tests),
            color: self.color,
            quiet: self.quiet,
        }
    }
}
