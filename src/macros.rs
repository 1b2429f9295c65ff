//! Registration and assertion macros.
//!
//! Assertion macros capture the source text of their operands together with
//! `file!()` and `line!()`, and evaluate to a `TestResult`. Test bodies
//! propagate them with `?`:
//!
//! ```
//! use xstest::prelude::*;
//! use xstest::registry::Registry;
//!
//! let registry = Registry::new();
//! xs_test!(registry => Sum, Pass, {
//!     xs_assert_eq!(1 + 1, 2)?;
//!     xs_assert!(2 > 1)
//! });
//! assert!(Runner::from_registry(&registry).run(&mut NullReporter));
//! ```

// ============================================================================
// REGISTRATION
// ============================================================================

/// Registers a test whose body is a block evaluating to `TestResult`.
///
/// `xs_test!(Suite, Case, { ... })` registers in the process-wide registry;
/// `xs_test!(registry => Suite, Case, { ... })` in the given one. Evaluates
/// to the descriptor handle.
#[macro_export]
macro_rules! xs_test {
    ($suite:ident, $case:ident, $body:block) => {
        $crate::registry::register(
            stringify!($suite),
            stringify!($case),
            $crate::case::from_fn(move || -> $crate::failure::TestResult { $body }),
            file!(),
            line!(),
        )
    };
    ($registry:expr => $suite:ident, $case:ident, $body:block) => {
        $registry.register(
            stringify!($suite),
            stringify!($case),
            $crate::case::from_fn(move || -> $crate::failure::TestResult { $body }),
            file!(),
            line!(),
        )
    };
}

/// Registers a test running against a fresh value of a `Fixture` type.
///
/// `xs_fixture!(Suite, Case, Fixture, |fx| { ... })`, optionally prefixed by
/// `registry =>`.
#[macro_export]
macro_rules! xs_fixture {
    ($suite:ident, $case:ident, $fixture:ty, |$fx:ident| $body:block) => {
        $crate::registry::register(
            stringify!($suite),
            stringify!($case),
            $crate::case::from_fixture::<$fixture, _>(
                move |$fx: &mut $fixture| -> $crate::failure::TestResult { $body },
            ),
            file!(),
            line!(),
        )
    };
    ($registry:expr => $suite:ident, $case:ident, $fixture:ty, |$fx:ident| $body:block) => {
        $registry.register(
            stringify!($suite),
            stringify!($case),
            $crate::case::from_fixture::<$fixture, _>(
                move |$fx: &mut $fixture| -> $crate::failure::TestResult { $body },
            ),
            file!(),
            line!(),
        )
    };
}

// ============================================================================
// BOOLEAN AND RELATIONAL
// ============================================================================

#[macro_export]
macro_rules! xs_assert {
    ($e:expr $(,)?) => {
        $crate::assert::boolean($e, true, stringify!($e), file!(), line!())
    };
}

#[macro_export]
macro_rules! xs_assert_false {
    ($e:expr $(,)?) => {
        $crate::assert::boolean($e, false, stringify!($e), file!(), line!())
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __xs_relation {
    ($check:ident, $a:expr, $b:expr) => {
        $crate::assert::$check(
            &$a,
            &$b,
            stringify!($a),
            stringify!($b),
            file!(),
            line!(),
        )
    };
}

#[macro_export]
macro_rules! xs_assert_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::__xs_relation!(equal, $a, $b)
    };
}

#[macro_export]
macro_rules! xs_assert_ne {
    ($a:expr, $b:expr $(,)?) => {
        $crate::__xs_relation!(not_equal, $a, $b)
    };
}

#[macro_export]
macro_rules! xs_assert_lt {
    ($a:expr, $b:expr $(,)?) => {
        $crate::__xs_relation!(less, $a, $b)
    };
}

#[macro_export]
macro_rules! xs_assert_le {
    ($a:expr, $b:expr $(,)?) => {
        $crate::__xs_relation!(less_or_equal, $a, $b)
    };
}

#[macro_export]
macro_rules! xs_assert_gt {
    ($a:expr, $b:expr $(,)?) => {
        $crate::__xs_relation!(greater, $a, $b)
    };
}

#[macro_export]
macro_rules! xs_assert_ge {
    ($a:expr, $b:expr $(,)?) => {
        $crate::__xs_relation!(greater_or_equal, $a, $b)
    };
}

// ============================================================================
// STRINGS
// ============================================================================

// Operands may be `&str`, `String`, or an `Option` of either; `None` is a
// null string.
#[doc(hidden)]
#[macro_export]
macro_rules! __xs_string {
    ($a:expr, $b:expr, $equal:expr, $case_insensitive:expr) => {
        $crate::assert::string_equality(
            $crate::assert::NullableStr::as_nullable_str(&$a),
            $crate::assert::NullableStr::as_nullable_str(&$b),
            $equal,
            $case_insensitive,
            stringify!($a),
            stringify!($b),
            file!(),
            line!(),
        )
    };
}

#[macro_export]
macro_rules! xs_assert_str_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::__xs_string!($a, $b, true, false)
    };
}

#[macro_export]
macro_rules! xs_assert_str_ne {
    ($a:expr, $b:expr $(,)?) => {
        $crate::__xs_string!($a, $b, false, false)
    };
}

#[macro_export]
macro_rules! xs_assert_str_case_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::__xs_string!($a, $b, true, true)
    };
}

#[macro_export]
macro_rules! xs_assert_str_case_ne {
    ($a:expr, $b:expr $(,)?) => {
        $crate::__xs_string!($a, $b, false, true)
    };
}

// ============================================================================
// FLOATING POINT
// ============================================================================

#[doc(hidden)]
#[macro_export]
macro_rules! __xs_float {
    ($ty:ty, $a:expr, $b:expr, $equal:expr) => {
        $crate::assert::floating_equality::<$ty>(
            $a,
            $b,
            $equal,
            stringify!($a),
            stringify!($b),
            file!(),
            line!(),
        )
    };
}

/// `f32` equality within four ULPs.
#[macro_export]
macro_rules! xs_assert_float_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::__xs_float!(f32, $a, $b, true)
    };
}

#[macro_export]
macro_rules! xs_assert_float_ne {
    ($a:expr, $b:expr $(,)?) => {
        $crate::__xs_float!(f32, $a, $b, false)
    };
}

/// `f64` equality within four ULPs.
#[macro_export]
macro_rules! xs_assert_double_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::__xs_float!(f64, $a, $b, true)
    };
}

#[macro_export]
macro_rules! xs_assert_double_ne {
    ($a:expr, $b:expr $(,)?) => {
        $crate::__xs_float!(f64, $a, $b, false)
    };
}

// ============================================================================
// PANICS
// ============================================================================

/// Passes iff evaluating the expression panics with a payload of type `$ty`.
#[macro_export]
macro_rules! xs_assert_panics {
    ($e:expr, $ty:ty $(,)?) => {
        $crate::assert::panics::<$ty, _>(
            || {
                let _ = $e;
            },
            stringify!($ty),
            stringify!($e),
            file!(),
            line!(),
        )
    };
}

#[macro_export]
macro_rules! xs_assert_no_panic {
    ($e:expr $(,)?) => {
        $crate::assert::panicking(
            || {
                let _ = $e;
            },
            false,
            stringify!($e),
            file!(),
            line!(),
        )
    };
}

#[macro_export]
macro_rules! xs_assert_any_panic {
    ($e:expr $(,)?) => {
        $crate::assert::panicking(
            || {
                let _ = $e;
            },
            true,
            stringify!($e),
            file!(),
            line!(),
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::failure::Failure;
    use crate::registry::Registry;

    #[test]
    fn test_relational_macros_capture_source() {
        let failure = xs_assert_eq!(1 + 1, 3).unwrap_err();
        assert_eq!(failure.expression(), Some("1 + 1 == 3"));
        assert_eq!(failure.evaluated(), Some("2 == 3"));
        assert_eq!(failure.expected(), Some("True"));
        assert_eq!(failure.actual(), Some("False"));
        assert!(failure.file().ends_with("macros.rs"));
        assert!(xs_assert_lt!(1, 2).is_ok());
        assert!(xs_assert_ge!(2, 2).is_ok());
        assert!(xs_assert_ne!("a", "b").is_ok());
    }

    #[test]
    fn test_boolean_macros() {
        assert!(xs_assert!(true).is_ok());
        assert!(xs_assert_false!(1 > 2).is_ok());
        let failure = xs_assert!(1 > 2).unwrap_err();
        assert_eq!(failure.expression(), Some("1 > 2"));
    }

    #[test]
    fn test_string_macros_accept_nulls() {
        let absent: Option<&str> = None;
        assert!(xs_assert_str_eq!("foo", String::from("foo")).is_ok());
        assert!(xs_assert_str_case_eq!("FOO", "foo").is_ok());
        assert!(xs_assert_str_eq!(absent, absent).is_err());
        assert!(xs_assert_str_ne!(absent, "foo").is_ok());
        assert!(xs_assert_str_case_ne!("abc", "ABD").is_ok());
    }

    #[test]
    fn test_float_macros() {
        assert!(xs_assert_float_eq!(0.1_f32 + 0.2_f32, 0.3_f32).is_ok());
        assert!(xs_assert_double_eq!(0.1 + 0.2, 0.3).is_ok());
        assert!(xs_assert_double_ne!(1.0, 1.1).is_ok());
        assert!(xs_assert_float_ne!(f32::NAN, f32::NAN).is_ok());
    }

    #[test]
    fn test_panic_macros() {
        assert!(xs_assert_panics!(std::panic::panic_any(Failure::described("x", "f", 1)), Failure).is_ok());
        assert!(xs_assert_any_panic!("x".parse::<u8>().unwrap()).is_ok());
        assert!(xs_assert_no_panic!(1 + 1).is_ok());
        let failure = xs_assert_panics!(1 + 1, String).unwrap_err();
        assert_eq!(failure.expected(), Some("Panics with String"));
        assert_eq!(failure.actual(), Some("Doesn't panic"));
    }

    #[test]
    fn test_registration_into_local_registry() {
        let registry = Registry::new();
        let handle = xs_test!(registry => Sum, Pass, { xs_assert_eq!(1 + 1, 2) });
        assert_eq!(handle.name(), "Sum.Pass");
        assert_eq!(registry.len(), 1);
    }
}
