//! xstest: a lightweight unit-testing framework.
//!
//! Tests are registered with [`xs_test!`] or [`xs_fixture!`], grouped into
//! suites, shuffled, and run by a [`Runner`](runner::Runner) that reports
//! through a [`Reporter`](report::Reporter) sink.

pub use crate::error::HarnessError;
pub use crate::failure::{Failure, TestResult};

pub mod assert;
pub mod case;
pub mod cli;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod failure;
pub mod filter;
pub mod macros;
pub mod registry;
pub mod report;
pub mod runner;
pub mod suite;
pub mod util;

/// Everything a test binary usually needs.
pub mod prelude {
    pub use crate::case::{Fixture, TestCase};
    pub use crate::failure::{Failure, TestResult};
    pub use crate::filter::Filter;
    pub use crate::report::{ConsoleReporter, NullReporter, Reporter};
    pub use crate::runner::Runner;
    pub use crate::{
        xs_assert, xs_assert_any_panic, xs_assert_double_eq, xs_assert_double_ne, xs_assert_eq,
        xs_assert_false, xs_assert_float_eq, xs_assert_float_ne, xs_assert_ge, xs_assert_gt,
        xs_assert_le, xs_assert_lt, xs_assert_ne, xs_assert_no_panic, xs_assert_panics,
        xs_assert_str_case_eq, xs_assert_str_case_ne, xs_assert_str_eq, xs_assert_str_ne,
        xs_fixture, xs_test,
    };
}
