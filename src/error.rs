//! Structural errors of a run.
//!
//! These never come out of a test body. They describe a run or a suite that
//! has nothing to execute, are reported through the [`Reporter`] sink, and
//! reach callers of `Suite::run`/`Runner::run` only as a `false` result.
//!
//! [`Reporter`]: crate::report::Reporter

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum HarnessError {
    #[error("no test to run")]
    #[diagnostic(
        code(xstest::no_tests),
        help("declare tests with `xs_test!`, or check the names passed on the command line")
    )]
    NoTests,

    #[error("suite '{name}' has no tests")]
    #[diagnostic(code(xstest::empty_suite))]
    EmptySuite { name: String },
}

/// Type-safe classification of [`HarnessError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarnessErrorKind {
    NoTests,
    EmptySuite,
}

impl HarnessErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HarnessErrorKind::NoTests => "NoTests",
            HarnessErrorKind::EmptySuite => "EmptySuite",
        }
    }
}

impl std::fmt::Display for HarnessErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl HarnessError {
    pub fn kind(&self) -> HarnessErrorKind {
        match self {
            HarnessError::NoTests => HarnessErrorKind::NoTests,
            HarnessError::EmptySuite { .. } => HarnessErrorKind::EmptySuite,
        }
    }
}
