//! Run configuration.

use clap::ValueEnum;
use termcolor::ColorChoice;

use crate::filter::Filter;

/// When console output is coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    /// Colour when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn choice(self) -> ColorChoice {
        match self {
            ColorMode::Auto if atty::is(atty::Stream::Stdout) => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}

/// Configuration for test selection and reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    pub filter: Filter,
    pub color: ColorMode,
    /// Suppress all reporting; only the exit code carries the result.
    pub quiet: bool,
}
