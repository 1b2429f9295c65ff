//! # Test descriptors
//!
//! A [`TestDescriptor`] is the unit of execution: suite and case names, the
//! factory producing fresh [`TestCase`] instances, the registration site, and
//! the state of its last run.
//!
//! Descriptors are shared as [`DescriptorHandle`]s (`Arc`). The registry,
//! every suite and the runner hold the same handles, so the state a run
//! writes is exactly the state the final summary reads.
//!
//! ## Run protocol
//!
//! 1. clear the captured failure, outcome becomes `Running`
//! 2. build a fresh instance from the factory
//! 3. `set_up`; a failure here fails the test and skips the body and tear-down
//! 4. time `run`, capturing a returned `Failure` verbatim and converting a
//!    panic into a failure
//! 5. `tear_down`, always, once `set_up` succeeded
//! 6. record outcome, failure and elapsed time, then report

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::case::{CaseFactory, TestCase};
use crate::failure::{Failure, TestResult};
use crate::report::Reporter;
use crate::util::panic_message;

/// Shared handle to a registered descriptor.
pub type DescriptorHandle = Arc<TestDescriptor>;

/// Lifecycle of one test execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TestOutcome {
    /// Not run yet, or skipped by a filter.
    #[default]
    Unknown,
    Running,
    Success,
    Failed,
}

impl TestOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestOutcome::Unknown => "Unknown",
            TestOutcome::Running => "Running",
            TestOutcome::Success => "Success",
            TestOutcome::Failed => "Failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TestOutcome::Success | TestOutcome::Failed)
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default)]
struct RunState {
    outcome: TestOutcome,
    failure: Option<Failure>,
    elapsed: Duration,
}

pub struct TestDescriptor {
    suite_name: String,
    case_name: String,
    factory: CaseFactory,
    file: String,
    line: u32,
    state: Mutex<RunState>,
}

impl TestDescriptor {
    pub fn new(
        suite_name: impl Into<String>,
        case_name: impl Into<String>,
        factory: CaseFactory,
        file: impl Into<String>,
        line: u32,
    ) -> Self {
        Self {
            suite_name: suite_name.into(),
            case_name: case_name.into(),
            factory,
            file: file.into(),
            line,
            state: Mutex::new(RunState::default()),
        }
    }

    /// `Suite.Case`
    pub fn name(&self) -> String {
        format!("{}.{}", self.suite_name, self.case_name)
    }

    pub fn suite_name(&self) -> &str {
        &self.suite_name
    }

    pub fn case_name(&self) -> &str {
        &self.case_name
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn outcome(&self) -> TestOutcome {
        self.state().outcome
    }

    pub fn failure(&self) -> Option<Failure> {
        self.state().failure.clone()
    }

    /// Duration of the last timed body, zero before the first run.
    pub fn elapsed(&self) -> Duration {
        self.state().elapsed
    }

    /// Runs the test once and returns whether it succeeded.
    pub fn run(&self, reporter: &mut dyn Reporter) -> bool {
        {
            let mut state = self.state();
            state.failure = None;
            state.outcome = TestOutcome::Running;
        }
        reporter.on_test_start(&self.suite_name, &self.case_name);

        let (result, elapsed) = self.execute();
        let outcome = match result {
            Ok(()) => TestOutcome::Success,
            Err(_) => TestOutcome::Failed,
        };
        let failure = result.err();

        {
            let mut state = self.state();
            state.outcome = outcome;
            state.failure = failure.clone();
            state.elapsed = elapsed;
        }
        reporter.on_test_end(
            &self.suite_name,
            &self.case_name,
            outcome,
            elapsed,
            failure.as_ref(),
        );

        outcome == TestOutcome::Success
    }

    fn execute(&self) -> (TestResult, Duration) {
        let mut case: Box<dyn TestCase> =
            match panic::catch_unwind(AssertUnwindSafe(|| (self.factory)())) {
                Ok(case) => case,
                Err(payload) => return (Err(self.unexpected(payload, None)), Duration::ZERO),
            };

        if let Err(failure) = self.guarded(|| case.set_up()) {
            return (Err(failure), Duration::ZERO);
        }

        let started = Instant::now();
        let result = self.guarded(|| case.run());
        let elapsed = started.elapsed();

        let torn_down = panic::catch_unwind(AssertUnwindSafe(|| case.tear_down()))
            .map_err(|payload| self.unexpected(payload, Some("during tear-down")));

        // A body failure is the more useful diagnostic; keep it over a tear-down one.
        (result.and(torn_down), elapsed)
    }

    fn guarded(&self, f: impl FnOnce() -> TestResult) -> TestResult {
        match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(result) => result,
            Err(payload) => Err(self.unexpected(payload, None)),
        }
    }

    /// Converts a caught panic payload into the failure to record.
    fn unexpected(&self, payload: Box<dyn Any + Send>, phase: Option<&str>) -> Failure {
        let payload = match payload.downcast::<Failure>() {
            Ok(failure) => return *failure,
            Err(payload) => payload,
        };
        match (panic_message(&*payload), phase) {
            (message, None) => Failure::unexpected(message, &self.file, self.line),
            (Some(message), Some(phase)) => Failure::described(
                format!("Caught unexpected exception {phase}: {message}"),
                &self.file,
                self.line,
            ),
            (None, Some(phase)) => Failure::described(
                format!("Caught unexpected exception {phase}"),
                &self.file,
                self.line,
            ),
        }
    }

    fn state(&self) -> MutexGuard<'_, RunState> {
        // Run state is plain data written in single assignments; a poisoned
        // lock still holds a consistent value.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for TestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("TestDescriptor")
            .field("suite_name", &self.suite_name)
            .field("case_name", &self.case_name)
            .field("file", &self.file)
            .field("line", &self.line)
            .field("outcome", &state.outcome)
            .field("failure", &state.failure)
            .finish()
    }
}
