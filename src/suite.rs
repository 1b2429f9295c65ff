//! Named groups of descriptors.
//!
//! A suite shuffles its descriptors when it is built, from a freshly seeded
//! generator, so two suites over the same tests generally run them in
//! different orders.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::descriptor::{DescriptorHandle, TestOutcome};
use crate::error::HarnessError;
use crate::filter::Filter;
use crate::report::Reporter;
use crate::util::shuffle;

#[derive(Debug, Clone)]
pub struct Suite {
    name: String,
    descriptors: Vec<DescriptorHandle>,
}

/// Outcome counts over a suite's descriptors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
    pub not_run: usize,
}

impl Suite {
    /// Builds a suite and shuffles its descriptors.
    ///
    /// Every descriptor must belong to the suite `name`; debug builds panic
    /// otherwise. Use [`Suite::group`] to build suites from a mixed set.
    pub fn new(name: impl Into<String>, mut descriptors: Vec<DescriptorHandle>) -> Self {
        let name = name.into();
        debug_assert!(
            descriptors.iter().all(|d| d.suite_name() == name),
            "suite '{name}' given a descriptor of another suite"
        );
        shuffle(&mut descriptors);
        Self { name, descriptors }
    }

    /// Groups descriptors by suite name, one suite per distinct name in
    /// lexical order.
    pub fn group(descriptors: impl IntoIterator<Item = DescriptorHandle>) -> Vec<Suite> {
        let mut groups: BTreeMap<String, Vec<DescriptorHandle>> = BTreeMap::new();
        for descriptor in descriptors {
            groups
                .entry(descriptor.suite_name().to_string())
                .or_default()
                .push(descriptor);
        }
        groups
            .into_iter()
            .map(|(name, descriptors)| Suite::new(name, descriptors))
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Descriptors in execution order.
    pub fn descriptors(&self) -> &[DescriptorHandle] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Runs every descriptor; true iff all of them succeeded.
    pub fn run(&self, reporter: &mut dyn Reporter) -> bool {
        self.run_filtered(&Filter::all(), reporter)
    }

    /// Runs the descriptors selected by `filter`.
    ///
    /// An empty suite fails without running anything. A suite none of whose
    /// descriptors is selected is not entered and counts as successful.
    pub fn run_filtered(&self, filter: &Filter, reporter: &mut dyn Reporter) -> bool {
        if self.descriptors.is_empty() {
            reporter.on_error(&HarnessError::EmptySuite {
                name: self.name.clone(),
            });
            return false;
        }

        let selected: Vec<&DescriptorHandle> = self
            .descriptors
            .iter()
            .filter(|d| filter.should_run(d.suite_name(), d.case_name()))
            .collect();
        if selected.is_empty() {
            return true;
        }

        reporter.on_suite_start(&self.name, selected.len());
        let started = Instant::now();
        let mut success = true;
        for descriptor in selected.iter() {
            // No short-circuit: every selected test runs.
            success &= descriptor.run(reporter);
        }
        reporter.on_suite_end(&self.name, selected.len(), started.elapsed());

        success
    }

    /// Number of descriptors selected by `filter`.
    pub fn selected(&self, filter: &Filter) -> usize {
        self.descriptors
            .iter()
            .filter(|d| filter.should_run(d.suite_name(), d.case_name()))
            .count()
    }

    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for descriptor in &self.descriptors {
            match descriptor.outcome() {
                TestOutcome::Success => tally.passed += 1,
                TestOutcome::Failed => tally.failed += 1,
                TestOutcome::Unknown | TestOutcome::Running => tally.not_run += 1,
            }
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::from_fn;
    use crate::descriptor::TestDescriptor;
    use crate::failure::Failure;
    use crate::report::{EventLog, NullReporter, ReportEvent};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn handle(suite: &str, case: &str, pass: bool) -> DescriptorHandle {
        let factory = from_fn(move || {
            if pass {
                Ok(())
            } else {
                Err(Failure::described("fails", "suite.rs", 1))
            }
        });
        Arc::new(TestDescriptor::new(suite, case, factory, "suite.rs", 1))
    }

    #[test]
    fn test_empty_suite_fails() {
        let suite = Suite::new("Empty", Vec::new());
        let mut log = EventLog::new();
        assert!(!suite.run(&mut log));
        assert_eq!(
            log.events(),
            &[ReportEvent::Error(HarnessError::EmptySuite {
                name: "Empty".to_string()
            })]
        );
    }

    #[test]
    fn test_every_descriptor_runs_even_after_failure() {
        let suite = Suite::new(
            "Mixed",
            vec![
                handle("Mixed", "A", false),
                handle("Mixed", "B", true),
                handle("Mixed", "C", false),
            ],
        );
        assert!(!suite.run(&mut NullReporter));
        assert_eq!(
            suite.tally(),
            Tally {
                passed: 1,
                failed: 2,
                not_run: 0
            }
        );
    }

    #[test]
    fn test_shuffle_keeps_the_same_descriptors() {
        let handles: Vec<_> = (0..16)
            .map(|i| handle("S", &format!("C{i}"), true))
            .collect();
        let suite = Suite::new("S", handles.clone());
        assert_eq!(suite.len(), 16);
        let names: HashSet<String> = suite.descriptors().iter().map(|d| d.name()).collect();
        let expected: HashSet<String> = handles.iter().map(|d| d.name()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_group_is_lexical() {
        let suites = Suite::group(vec![
            handle("Zeta", "A", true),
            handle("Alpha", "A", true),
            handle("Zeta", "B", true),
        ]);
        let names: Vec<&str> = suites.iter().map(Suite::name).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
        assert_eq!(suites[1].len(), 2);
    }

    #[test]
    fn test_filtered_run_skips_unselected() {
        let suite = Suite::new("Sum", vec![handle("Sum", "Pass", true), handle("Sum", "Fail", false)]);
        let filter = Filter::new(["Sum.Pass"]);
        assert_eq!(suite.selected(&filter), 1);
        assert!(suite.run_filtered(&filter, &mut NullReporter));
        assert_eq!(
            suite.tally(),
            Tally {
                passed: 1,
                failed: 0,
                not_run: 1
            }
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "given a descriptor of another suite")]
    fn test_foreign_descriptor_is_rejected() {
        Suite::new("A", vec![handle("B", "Case", true)]);
    }

    #[test]
    fn test_unselected_suite_is_not_entered() {
        let suite = Suite::new("Sum", vec![handle("Sum", "Pass", true)]);
        let mut log = EventLog::new();
        assert!(suite.run_filtered(&Filter::new(["Other"]), &mut log));
        assert!(log.events().is_empty());
    }
}
