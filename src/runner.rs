//! # Runner
//!
//! Orchestrates a whole run over a set of suites:
//!
//! 1. refuse to start when nothing is selected (`HarnessError::NoTests`)
//! 2. run-start banner, global set-up hook
//! 3. every entered suite, in the order shuffled at construction
//! 4. global tear-down hook, run-end banner
//! 5. re-collect outcomes from the shared descriptors and emit the summary
//!
//! The global hooks only produce events; they are the extension point for
//! process-wide environment preparation.

use std::time::{Duration, Instant};

use crate::descriptor::{DescriptorHandle, TestOutcome};
use crate::error::HarnessError;
use crate::filter::Filter;
use crate::registry::Registry;
use crate::report::Reporter;
use crate::suite::Suite;
use crate::util::shuffle;

/// Result of a completed run. Name lists are sorted by `Suite.Case`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: Vec<String>,
    pub failed: Vec<String>,
    /// Descriptors left out by the filter.
    pub skipped: usize,
    /// Tests executed.
    pub tests: usize,
    /// Suites entered.
    pub suites: usize,
    pub elapsed: Duration,
    pub success: bool,
}

#[derive(Debug, Clone)]
pub struct Runner {
    suites: Vec<Suite>,
}

impl Runner {
    pub fn new(mut suites: Vec<Suite>) -> Self {
        shuffle(&mut suites);
        Self { suites }
    }

    pub fn from_descriptors(descriptors: impl IntoIterator<Item = DescriptorHandle>) -> Self {
        Self::new(Suite::group(descriptors))
    }

    /// A runner over every test currently in `registry`.
    pub fn from_registry(registry: &Registry) -> Self {
        Self::from_descriptors(registry.descriptors())
    }

    /// Suites in execution order.
    pub fn suites(&self) -> &[Suite] {
        &self.suites
    }

    pub fn test_count(&self) -> usize {
        self.suites.iter().map(Suite::len).sum()
    }

    /// Runs every test; true iff the run completed and every test succeeded.
    pub fn run(&self, reporter: &mut dyn Reporter) -> bool {
        self.execute(&Filter::all(), reporter)
            .map(|summary| summary.success)
            .unwrap_or(false)
    }

    /// Runs the tests selected by `filter` and returns the summary.
    pub fn execute(
        &self,
        filter: &Filter,
        reporter: &mut dyn Reporter,
    ) -> Result<RunSummary, HarnessError> {
        let tests: usize = self.suites.iter().map(|s| s.selected(filter)).sum();
        if tests == 0 {
            let error = HarnessError::NoTests;
            reporter.on_error(&error);
            return Err(error);
        }
        let suites = self
            .suites
            .iter()
            .filter(|s| s.selected(filter) > 0)
            .count();

        reporter.on_run_start(tests, suites);
        reporter.on_global_set_up();

        let started = Instant::now();
        let mut success = true;
        for suite in &self.suites {
            success &= suite.run_filtered(filter, reporter);
        }
        let elapsed = started.elapsed();

        reporter.on_global_tear_down();
        reporter.on_run_end(tests, suites, elapsed);

        let summary = self.summarize(filter, tests, suites, elapsed, success);
        reporter.on_summary(&summary);
        Ok(summary)
    }

    fn summarize(
        &self,
        filter: &Filter,
        tests: usize,
        suites: usize,
        elapsed: Duration,
        success: bool,
    ) -> RunSummary {
        let mut passed = Vec::new();
        let mut failed = Vec::new();
        let mut skipped = 0;

        for descriptor in self.suites.iter().flat_map(Suite::descriptors) {
            if !filter.should_run(descriptor.suite_name(), descriptor.case_name()) {
                skipped += 1;
                continue;
            }
            match descriptor.outcome() {
                TestOutcome::Success => passed.push(descriptor.name()),
                TestOutcome::Failed => failed.push(descriptor.name()),
                TestOutcome::Unknown | TestOutcome::Running => {}
            }
        }
        passed.sort();
        failed.sort();

        RunSummary {
            success: success && failed.is_empty(),
            passed,
            failed,
            skipped,
            tests,
            suites,
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::from_fn;
    use crate::failure::Failure;
    use crate::report::{EventLog, NullReporter, ReportEvent};

    fn sum_registry() -> Registry {
        let registry = Registry::new();
        registry.register("Sum", "Pass", from_fn(|| Ok(())), "runner.rs", 1);
        registry.register(
            "Sum",
            "Fail",
            from_fn(|| Err(Failure::new("1 + 1 == 3", "True", "False", "runner.rs", 2))),
            "runner.rs",
            2,
        );
        registry
    }

    #[test]
    fn test_no_suites_fails() {
        let runner = Runner::new(Vec::new());
        let mut log = EventLog::new();
        assert!(!runner.run(&mut log));
        assert_eq!(log.events(), &[ReportEvent::Error(HarnessError::NoTests)]);
    }

    #[test]
    fn test_summary_partitions_and_sorts() {
        let registry = sum_registry();
        registry.register("Alpha", "Zero", from_fn(|| Ok(())), "runner.rs", 3);
        let runner = Runner::from_registry(&registry);
        let summary = runner.execute(&Filter::all(), &mut NullReporter).unwrap();
        assert!(!summary.success);
        assert_eq!(summary.passed, vec!["Alpha.Zero", "Sum.Pass"]);
        assert_eq!(summary.failed, vec!["Sum.Fail"]);
        assert_eq!(summary.tests, 3);
        assert_eq!(summary.suites, 2);
        assert_eq!(summary.skipped, 0);
    }

    #[test]
    fn test_event_protocol() {
        let registry = Registry::new();
        registry.register("Only", "One", from_fn(|| Ok(())), "runner.rs", 1);
        let mut log = EventLog::new();
        assert!(Runner::from_registry(&registry).run(&mut log));

        let events = log.events();
        assert_eq!(events[0], ReportEvent::RunStart { tests: 1, suites: 1 });
        assert_eq!(events[1], ReportEvent::GlobalSetUp);
        assert_eq!(
            events[2],
            ReportEvent::SuiteStart {
                name: "Only".to_string(),
                tests: 1
            }
        );
        assert_eq!(events[events.len() - 3], ReportEvent::GlobalTearDown);
        assert_eq!(events[events.len() - 2], ReportEvent::RunEnd { tests: 1, suites: 1 });
        assert_eq!(
            events[events.len() - 1],
            ReportEvent::Summary {
                passed: vec!["Only.One".to_string()],
                failed: Vec::new(),
            }
        );
    }

    #[test]
    fn test_filter_selecting_nothing_is_an_error() {
        let runner = Runner::from_registry(&sum_registry());
        let result = runner.execute(&Filter::new(["Missing"]), &mut NullReporter);
        assert_eq!(result, Err(HarnessError::NoTests));
    }

    #[test]
    fn test_filtered_run_counts_skipped() {
        let runner = Runner::from_registry(&sum_registry());
        let summary = runner
            .execute(&Filter::new(["Sum.Pass"]), &mut NullReporter)
            .unwrap();
        assert!(summary.success);
        assert_eq!(summary.passed, vec!["Sum.Pass"]);
        assert!(summary.failed.is_empty());
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.tests, 1);
    }
}
