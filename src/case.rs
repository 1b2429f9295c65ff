//! Test instances and the factories that manufacture them.
//!
//! A [`TestCase`] is one instantiation of a test body together with its
//! set-up and tear-down hooks. Instances are never reused: every run of a
//! descriptor asks its [`CaseFactory`] for a fresh one.

use std::sync::Arc;

use crate::failure::TestResult;

/// A runnable test instance.
pub trait TestCase {
    fn set_up(&mut self) -> TestResult {
        Ok(())
    }

    /// The asserted behaviour.
    fn run(&mut self) -> TestResult;

    fn tear_down(&mut self) {}
}

/// Zero-argument constructor of fresh test instances.
pub type CaseFactory = Arc<dyn Fn() -> Box<dyn TestCase> + Send + Sync>;

type CaseBody = Arc<dyn Fn() -> TestResult + Send + Sync>;

/// A test instance whose body is a plain function with no hooks.
pub struct FnCase {
    body: CaseBody,
}

impl TestCase for FnCase {
    fn run(&mut self) -> TestResult {
        (self.body)()
    }
}

/// Shared state prepared before and released after each test of a fixture.
///
/// A fresh `Default` value is built for every run, so tests sharing a fixture
/// type never observe each other's state.
pub trait Fixture: Default + 'static {
    fn set_up(&mut self) -> TestResult {
        Ok(())
    }

    fn tear_down(&mut self) {}
}

type FixtureBody<F> = Arc<dyn Fn(&mut F) -> TestResult + Send + Sync>;

/// A test instance running its body against a fixture value.
pub struct FixtureCase<F: Fixture> {
    fixture: F,
    body: FixtureBody<F>,
}

impl<F: Fixture> FixtureCase<F> {
    pub fn fixture(&self) -> &F {
        &self.fixture
    }
}

impl<F: Fixture> TestCase for FixtureCase<F> {
    fn set_up(&mut self) -> TestResult {
        self.fixture.set_up()
    }

    fn run(&mut self) -> TestResult {
        (self.body)(&mut self.fixture)
    }

    fn tear_down(&mut self) {
        self.fixture.tear_down();
    }
}

/// Factory for a hook-less test whose body is `body`.
pub fn from_fn<B>(body: B) -> CaseFactory
where
    B: Fn() -> TestResult + Send + Sync + 'static,
{
    let body: CaseBody = Arc::new(body);
    Arc::new(move || {
        Box::new(FnCase {
            body: Arc::clone(&body),
        }) as Box<dyn TestCase>
    })
}

/// Factory for a test running `body` against a fresh `F::default()`.
pub fn from_fixture<F, B>(body: B) -> CaseFactory
where
    F: Fixture,
    B: Fn(&mut F) -> TestResult + Send + Sync + 'static,
{
    let body: FixtureBody<F> = Arc::new(body);
    Arc::new(move || {
        Box::new(FixtureCase {
            fixture: F::default(),
            body: Arc::clone(&body),
        }) as Box<dyn TestCase>
    })
}

/// Factory for a hand-written [`TestCase`] type.
pub fn from_factory<T, C>(create: C) -> CaseFactory
where
    T: TestCase + 'static,
    C: Fn() -> T + Send + Sync + 'static,
{
    Arc::new(move || Box::new(create()) as Box<dyn TestCase>)
}
