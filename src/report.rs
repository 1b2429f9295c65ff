//! Reporting sinks.
//!
//! The runner layers never print directly. They emit structured events to a
//! [`Reporter`]; which sink is plugged in decides what the user sees:
//!
//! - [`NullReporter`] discards everything. Execution and results are the same
//!   as with any other sink.
//! - [`ConsoleReporter`] renders fixed-format coloured lines on any
//!   `termcolor::WriteColor`.
//! - [`EventLog`] records the events in order, for inspecting a run.

use std::time::Duration;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::descriptor::TestOutcome;
use crate::error::HarnessError;
use crate::failure::Failure;
use crate::runner::RunSummary;
use crate::util::{format_elapsed, numbered, numbered_with_plural};

// ============================================================================
// SINK TRAIT
// ============================================================================

/// Receiver of run events. Every method defaults to doing nothing.
pub trait Reporter {
    fn on_run_start(&mut self, _tests: usize, _suites: usize) {}

    fn on_global_set_up(&mut self) {}

    fn on_global_tear_down(&mut self) {}

    fn on_run_end(&mut self, _tests: usize, _suites: usize, _elapsed: Duration) {}

    fn on_suite_start(&mut self, _name: &str, _tests: usize) {}

    fn on_suite_end(&mut self, _name: &str, _tests: usize, _elapsed: Duration) {}

    fn on_test_start(&mut self, _suite: &str, _case: &str) {}

    fn on_test_end(
        &mut self,
        _suite: &str,
        _case: &str,
        _outcome: TestOutcome,
        _elapsed: Duration,
        _failure: Option<&Failure>,
    ) {
    }

    fn on_summary(&mut self, _summary: &RunSummary) {}

    /// A structural problem of the run itself, such as nothing to execute.
    fn on_error(&mut self, _error: &HarnessError) {}
}

/// A reporter that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {}

// ============================================================================
// CONSOLE
// ============================================================================

/// Renders events as coloured console lines.
pub struct ConsoleReporter<W: WriteColor> {
    out: W,
}

impl ConsoleReporter<StandardStream> {
    pub fn stdout(choice: ColorChoice) -> Self {
        Self::new(StandardStream::stdout(choice))
    }
}

impl<W: WriteColor> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&mut self, color: Color, text: &str) {
        let _ = self.out.set_color(ColorSpec::new().set_fg(Some(color)));
        let _ = write!(self.out, "{text}");
        let _ = self.out.reset();
    }

    fn log(&mut self, message: &str) {
        let _ = writeln!(self.out, "> {message}");
    }

    fn verdict(&mut self, passed: bool) {
        let (color, label) = if passed {
            (Color::Green, "PASSED")
        } else {
            (Color::Red, "FAILED")
        };
        let _ = write!(self.out, "[ ");
        self.paint(color, label);
        let _ = write!(self.out, " ]> ");
    }

    fn test_name(&mut self, suite: &str, case: &str) {
        self.paint(Color::Blue, suite);
        let _ = write!(self.out, ".");
        self.paint(Color::Magenta, case);
    }

    fn detail(&mut self, label: &str, color: Color, value: &str) {
        let _ = write!(self.out, "            - {:<12}", format!("{label}:"));
        self.paint(color, value);
        let _ = writeln!(self.out);
    }

    fn failure_details(&mut self, failure: &Failure) {
        let file = if failure.file().is_empty() {
            "<unknown>"
        } else {
            failure.file()
        };
        self.detail("File", Color::Yellow, &format!("{file}:{}", failure.line()));

        let Some(expression) = failure.expression() else {
            self.detail("Reason", Color::Red, failure.description());
            return;
        };
        self.detail("Expression", Color::Cyan, expression);
        if failure.has_distinct_evaluation() {
            if let Some(evaluated) = failure.evaluated() {
                self.detail("Evaluated", Color::Magenta, evaluated);
            }
        }
        if let Some(expected) = failure.expected() {
            self.detail("Expected", Color::Green, expected);
        }
        if let Some(actual) = failure.actual() {
            self.detail("Actual", Color::Red, actual);
        }
    }
}

impl<W: WriteColor> Reporter for ConsoleReporter<W> {
    fn on_run_start(&mut self, tests: usize, suites: usize) {
        self.log(&format!(
            "Running {} from {}",
            numbered("test", tests),
            numbered("suite", suites)
        ));
    }

    fn on_global_set_up(&mut self) {
        self.log("Global test environment set-up");
        let _ = writeln!(self.out);
    }

    fn on_global_tear_down(&mut self) {
        self.log("Global test environment tear-down");
    }

    fn on_run_end(&mut self, tests: usize, suites: usize, elapsed: Duration) {
        self.log(&format!(
            "{} from {} ran ({} total)",
            numbered("test", tests),
            numbered("suite", suites),
            format_elapsed(elapsed)
        ));
    }

    fn on_suite_start(&mut self, name: &str, tests: usize) {
        let _ = write!(self.out, "> {} from ", numbered("test", tests));
        self.paint(Color::Blue, name);
        let _ = writeln!(self.out);
    }

    fn on_suite_end(&mut self, name: &str, tests: usize, elapsed: Duration) {
        let _ = write!(self.out, "> {} from ", numbered("test", tests));
        self.paint(Color::Blue, name);
        let _ = writeln!(self.out, " ({} total)", format_elapsed(elapsed));
        let _ = writeln!(self.out);
    }

    fn on_test_end(
        &mut self,
        suite: &str,
        case: &str,
        outcome: TestOutcome,
        elapsed: Duration,
        failure: Option<&Failure>,
    ) {
        self.verdict(outcome == TestOutcome::Success);
        self.test_name(suite, case);
        let _ = writeln!(self.out, " - {}", format_elapsed(elapsed));
        if let Some(failure) = failure {
            self.failure_details(failure);
        }
    }

    fn on_summary(&mut self, summary: &RunSummary) {
        let _ = writeln!(self.out);
        self.log(&format!("{} passed", numbered("test", summary.passed.len())));
        if summary.skipped > 0 {
            self.log(&format!("{} skipped", numbered("test", summary.skipped)));
        }
        if !summary.failed.is_empty() {
            self.log(&format!(
                "{} failed, listed below:",
                numbered("test", summary.failed.len())
            ));
            for name in &summary.failed {
                self.verdict(false);
                let _ = writeln!(self.out, "{name}");
            }
            self.log(&numbered_with_plural(
                "FAILED TEST",
                summary.failed.len(),
                "FAILED TESTS",
            ));
        }
        let _ = writeln!(self.out);
        self.verdict(summary.success);
        let _ = writeln!(self.out);
        let _ = self.out.flush();
    }

    fn on_error(&mut self, error: &HarnessError) {
        let _ = self.out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
        let _ = write!(self.out, "error");
        let _ = self.out.reset();
        let _ = writeln!(self.out, ": {error}");
        let _ = self.out.flush();
    }
}

// ============================================================================
// RECORDING
// ============================================================================

/// One recorded event. Durations are left out so recordings compare equal
/// across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    RunStart { tests: usize, suites: usize },
    GlobalSetUp,
    GlobalTearDown,
    RunEnd { tests: usize, suites: usize },
    SuiteStart { name: String, tests: usize },
    SuiteEnd { name: String, tests: usize },
    TestStart { suite: String, case: String },
    TestEnd {
        suite: String,
        case: String,
        outcome: TestOutcome,
        failure: Option<Failure>,
    },
    Summary { passed: Vec<String>, failed: Vec<String> },
    Error(HarnessError),
}

/// Reporter recording every event it receives.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<ReportEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ReportEvent] {
        &self.events
    }

    /// `Suite.Case` of every finished test, in execution order.
    pub fn finished_tests(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ReportEvent::TestEnd { suite, case, .. } => Some(format!("{suite}.{case}")),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for EventLog {
    fn on_run_start(&mut self, tests: usize, suites: usize) {
        self.events.push(ReportEvent::RunStart { tests, suites });
    }

    fn on_global_set_up(&mut self) {
        self.events.push(ReportEvent::GlobalSetUp);
    }

    fn on_global_tear_down(&mut self) {
        self.events.push(ReportEvent::GlobalTearDown);
    }

    fn on_run_end(&mut self, tests: usize, suites: usize, _elapsed: Duration) {
        self.events.push(ReportEvent::RunEnd { tests, suites });
    }

    fn on_suite_start(&mut self, name: &str, tests: usize) {
        self.events.push(ReportEvent::SuiteStart {
            name: name.to_string(),
            tests,
        });
    }

    fn on_suite_end(&mut self, name: &str, tests: usize, _elapsed: Duration) {
        self.events.push(ReportEvent::SuiteEnd {
            name: name.to_string(),
            tests,
        });
    }

    fn on_test_start(&mut self, suite: &str, case: &str) {
        self.events.push(ReportEvent::TestStart {
            suite: suite.to_string(),
            case: case.to_string(),
        });
    }

    fn on_test_end(
        &mut self,
        suite: &str,
        case: &str,
        outcome: TestOutcome,
        _elapsed: Duration,
        failure: Option<&Failure>,
    ) {
        self.events.push(ReportEvent::TestEnd {
            suite: suite.to_string(),
            case: case.to_string(),
            outcome,
            failure: failure.cloned(),
        });
    }

    fn on_summary(&mut self, summary: &RunSummary) {
        self.events.push(ReportEvent::Summary {
            passed: summary.passed.clone(),
            failed: summary.failed.clone(),
        });
    }

    fn on_error(&mut self, error: &HarnessError) {
        self.events.push(ReportEvent::Error(error.clone()));
    }
}
