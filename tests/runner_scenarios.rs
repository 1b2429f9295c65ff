// End-to-end runs over private registries.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use xstest::descriptor::TestOutcome;
use xstest::prelude::*;
use xstest::registry::Registry;
use xstest::report::{EventLog, ReportEvent};
use xstest::suite::Suite;

fn sum_registry() -> Registry {
    let registry = Registry::new();
    xs_test!(registry => Sum, Pass, { xs_assert_eq!(1 + 1, 2) });
    xs_test!(registry => Sum, Fail, { xs_assert_eq!(1 + 1, 3) });
    registry
}

#[test]
fn sum_suite_reports_one_failure() {
    let registry = sum_registry();
    let runner = Runner::from_registry(&registry);
    let summary = runner.execute(&Filter::all(), &mut NullReporter).unwrap();

    assert!(!summary.success);
    assert_eq!(summary.passed, vec!["Sum.Pass"]);
    assert_eq!(summary.failed, vec!["Sum.Fail"]);

    let failing = registry
        .descriptors()
        .into_iter()
        .find(|d| d.case_name() == "Fail")
        .unwrap();
    let failure = failing.failure().unwrap();
    assert_eq!(failure.expression(), Some("1 + 1 == 3"));
    assert_eq!(failure.evaluated(), Some("2 == 3"));
    assert_eq!(failure.expected(), Some("True"));
    assert_eq!(failure.actual(), Some("False"));
}

#[test]
fn sum_suite_run_directly_fails() {
    let registry = sum_registry();
    let suite = Suite::new("Sum", registry.descriptors());
    assert!(!suite.run(&mut NullReporter));
    let tally = suite.tally();
    assert_eq!((tally.passed, tally.failed), (1, 1));
}

#[test]
fn panicking_body_is_captured() {
    let registry = Registry::new();
    let handle = xs_test!(registry => Crash, Boom, {
        panic!("boom");
    });
    assert!(!Runner::from_registry(&registry).run(&mut NullReporter));
    assert_eq!(handle.outcome(), TestOutcome::Failed);
    assert_eq!(
        handle.failure().unwrap().description(),
        "Caught unexpected exception: boom"
    );
}

#[test]
fn body_without_assertions_succeeds() {
    let registry = Registry::new();
    let handle = xs_test!(registry => Quiet, Nothing, { Ok(()) });
    assert!(Runner::from_registry(&registry).run(&mut NullReporter));
    assert_eq!(handle.outcome(), TestOutcome::Success);
    assert!(handle.failure().is_none());
}

#[test]
fn outcomes_are_stable_across_fresh_runners() {
    let registry = Registry::new();
    for _ in 0..4 {
        xs_test!(registry => Stable, Pass, { xs_assert!(true) });
        xs_test!(registry => Stable, Fail, { xs_assert!(false) });
    }
    xs_test!(registry => Other, Pass, { xs_assert_lt!(1, 2) });

    let first = Runner::from_registry(&registry)
        .execute(&Filter::all(), &mut NullReporter)
        .unwrap();
    let second = Runner::from_registry(&registry)
        .execute(&Filter::all(), &mut NullReporter)
        .unwrap();
    assert_eq!(first.passed, second.passed);
    assert_eq!(first.failed, second.failed);
    assert_eq!(first.failed.len(), 4);
}

#[test]
fn every_test_runs_once_whatever_the_order() {
    let registry = Registry::new();
    let count = Arc::new(AtomicUsize::new(0));
    for _ in 0..10 {
        let count = Arc::clone(&count);
        xs_test!(registry => Counted, Hit, {
            count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
    }
    let mut log = EventLog::new();
    assert!(Runner::from_registry(&registry).run(&mut log));
    assert_eq!(count.load(Ordering::SeqCst), 10);
    assert_eq!(log.finished_tests().len(), 10);
}

#[test]
fn suites_are_entered_and_left_in_pairs() {
    let registry = sum_registry();
    xs_test!(registry => Product, Zero, { xs_assert_eq!(3 * 0, 0) });
    let mut log = EventLog::new();
    Runner::from_registry(&registry).run(&mut log);

    let starts = log
        .events()
        .iter()
        .filter(|e| matches!(e, ReportEvent::SuiteStart { .. }))
        .count();
    let ends = log
        .events()
        .iter()
        .filter(|e| matches!(e, ReportEvent::SuiteEnd { .. }))
        .count();
    assert_eq!((starts, ends), (2, 2));
}

#[derive(Default)]
struct Resource {
    opened: bool,
}

impl Fixture for Resource {
    fn set_up(&mut self) -> TestResult {
        self.opened = true;
        Ok(())
    }
}

#[test]
fn fixture_tests_see_prepared_state() {
    let registry = Registry::new();
    let handle = xs_fixture!(registry => Files, Open, Resource, |resource| {
        xs_assert!(resource.opened)
    });
    assert!(Runner::from_registry(&registry).run(&mut NullReporter));
    assert_eq!(handle.outcome(), TestOutcome::Success);
}

#[test]
fn filter_skips_unselected_tests() {
    let registry = sum_registry();
    xs_test!(registry => Product, Zero, { xs_assert_eq!(3 * 0, 0) });
    let summary = Runner::from_registry(&registry)
        .execute(&Filter::new(["Product"]), &mut NullReporter)
        .unwrap();
    assert!(summary.success);
    assert_eq!(summary.passed, vec!["Product.Zero"]);
    assert_eq!(summary.skipped, 2);

    let untouched = registry
        .descriptors()
        .into_iter()
        .filter(|d| d.suite_name() == "Sum")
        .all(|d| d.outcome() == TestOutcome::Unknown);
    assert!(untouched);
}

#[test]
fn empty_registry_has_nothing_to_run() {
    let registry = Registry::new();
    assert!(!Runner::from_registry(&registry).run(&mut NullReporter));
}

#[test]
fn dotted_suite_names_are_selectable() {
    let registry = Registry::new();
    registry.register("Net.Http", "Get", xstest::case::from_fn(|| Ok(())), file!(), line!());
    registry.register("Net.Http", "Post", xstest::case::from_fn(|| Ok(())), file!(), line!());
    let summary = Runner::from_registry(&registry)
        .execute(&Filter::new(["Net.Http.Get"]), &mut NullReporter)
        .unwrap();
    assert_eq!(summary.passed, vec!["Net.Http.Get"]);
    assert_eq!(summary.skipped, 1);
}
