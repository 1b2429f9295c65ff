//! The diagnostic payload of a failed assertion.
//!
//! A [`Failure`] is built once, at the point where an assertion decides the
//! test cannot continue, and is then only moved or cloned: into the `Err` of
//! a [`TestResult`], into a descriptor's run state, and finally into a report.

use miette::Diagnostic;
use thiserror::Error;

/// Outcome of a test body, set-up hook, or a single assertion.
pub type TestResult = Result<(), Failure>;

/// Separator placed between the descriptive parts of a derived description.
const DESCRIPTION_SEPARATOR: &str = " | ";

/// One assertion violation, or a free-form failure such as a caught panic.
///
/// Empty strings stand for absent fields; the accessors return `None` for them.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{description}")]
#[diagnostic(code(xstest::failure))]
pub struct Failure {
    expression: String,
    evaluated: String,
    expected: String,
    actual: String,
    description: String,
    file: String,
    line: u32,
}

impl Failure {
    /// Builds a failure from the asserted expression and both rendered sides.
    pub fn new(
        expression: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
        file: impl Into<String>,
        line: u32,
    ) -> Self {
        Self::with_evaluated(expression, String::new(), expected, actual, file, line)
    }

    /// Like [`Failure::new`], additionally recording the expression with its
    /// operands replaced by their runtime values.
    pub fn with_evaluated(
        expression: impl Into<String>,
        evaluated: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
        file: impl Into<String>,
        line: u32,
    ) -> Self {
        let expression = expression.into();
        let evaluated = evaluated.into();
        let expected = expected.into();
        let actual = actual.into();
        let description = derive_description(&expression, &evaluated, &expected, &actual);

        Self {
            expression,
            evaluated,
            expected,
            actual,
            description,
            file: file.into(),
            line,
        }
    }

    /// Builds a free-form failure with no expression context.
    pub fn described(description: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            expression: String::new(),
            evaluated: String::new(),
            expected: String::new(),
            actual: String::new(),
            description: description.into(),
            file: file.into(),
            line,
        }
    }

    /// Wraps something unexpected that escaped a test body.
    ///
    /// With a message the description reads
    /// `"Caught unexpected exception: <message>"`, without one it is the bare
    /// `"Caught unexpected exception"`.
    pub fn unexpected(message: Option<&str>, file: impl Into<String>, line: u32) -> Self {
        let description = match message {
            Some(message) => format!("Caught unexpected exception: {message}"),
            None => "Caught unexpected exception".to_string(),
        };
        Self::described(description, file, line)
    }

    pub fn expression(&self) -> Option<&str> {
        non_empty(&self.expression)
    }

    pub fn evaluated(&self) -> Option<&str> {
        non_empty(&self.evaluated)
    }

    pub fn expected(&self) -> Option<&str> {
        non_empty(&self.expected)
    }

    pub fn actual(&self) -> Option<&str> {
        non_empty(&self.actual)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// True when the evaluated form carries information the expression does not.
    pub fn has_distinct_evaluation(&self) -> bool {
        !self.evaluated.is_empty() && self.evaluated != self.expression
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn derive_description(expression: &str, evaluated: &str, expected: &str, actual: &str) -> String {
    let mut parts = Vec::with_capacity(4);
    if !expression.is_empty() {
        parts.push(format!("Expression: {expression}"));
    }
    // An evaluation identical to the source text adds nothing.
    if !evaluated.is_empty() && evaluated != expression {
        parts.push(format!("Evaluated: {evaluated}"));
    }
    if !expected.is_empty() {
        parts.push(format!("Expected: {expected}"));
    }
    if !actual.is_empty() {
        parts.push(format!("Actual: {actual}"));
    }
    parts.join(DESCRIPTION_SEPARATOR)
}
