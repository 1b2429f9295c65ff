//! # Comparison and diagnostics engine
//!
//! Every function here decides pass/fail for one assertion. On failure it
//! returns a [`Failure`] carrying the asserted source text, the evaluated
//! expression where one can be rendered, what was expected and what happened.
//! Test bodies propagate that `Err` with `?`, which ends the test at the
//! assertion; the descriptor's run protocol is the only place that consumes it.
//!
//! The `xs_assert*!` macros are the usual way in; they capture the source
//! text, file and line for the functions below.
//!
//! ## Diagnostic vocabulary
//!
//! - boolean and relational checks: `"True"` / `"False"`
//! - string and floating point equality: `"Equal"` / `"Not equal"`
//! - panicking checks: `"Panics with <T>"`, `"Panics"`, `"Doesn't panic"`

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::failure::{Failure, TestResult};
use crate::util::panic_message;

pub mod float;
pub mod operand;

pub use float::{float_equals, FloatingPoint, Ulps, MAX_ULPS};
pub use operand::{NullableStr, Operand};

// ============================================================================
// BOOLEAN
// ============================================================================

/// Fails when `value != expected`.
pub fn boolean(value: bool, expected: bool, expression: &str, file: &str, line: u32) -> TestResult {
    boolean_evaluated(value, expected, expression, "", file, line)
}

/// [`boolean`] with an evaluated rendering of the expression attached.
pub fn boolean_evaluated(
    value: bool,
    expected: bool,
    expression: &str,
    evaluated: &str,
    file: &str,
    line: u32,
) -> TestResult {
    if value == expected {
        return Ok(());
    }
    Err(Failure::with_evaluated(
        expression,
        evaluated,
        truth(expected),
        truth(value),
        file,
        line,
    ))
}

fn truth(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn equality(equal: bool) -> &'static str {
    if equal {
        "Equal"
    } else {
        "Not equal"
    }
}

// ============================================================================
// RELATIONAL COMPARISONS
// ============================================================================

/// The six ordinary comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl Relation {
    pub fn symbol(&self) -> &'static str {
        match self {
            Relation::Equal => "==",
            Relation::NotEqual => "!=",
            Relation::Less => "<",
            Relation::LessOrEqual => "<=",
            Relation::Greater => ">",
            Relation::GreaterOrEqual => ">=",
        }
    }
}

/// Funnels an evaluated comparison into [`boolean_evaluated`].
///
/// The evaluated form is only synthesized when both operands render; for
/// anything else the report carries the source expression alone.
#[allow(clippy::too_many_arguments)]
pub fn relation<A, B>(
    holds: bool,
    relation: Relation,
    v1: &A,
    v2: &B,
    expr1: &str,
    expr2: &str,
    file: &str,
    line: u32,
) -> TestResult
where
    A: Operand + ?Sized,
    B: Operand + ?Sized,
{
    if holds {
        return Ok(());
    }
    let symbol = relation.symbol();
    let expression = format!("{expr1} {symbol} {expr2}");
    let evaluated = match (v1.render(), v2.render()) {
        (Some(r1), Some(r2)) => format!("{r1} {symbol} {r2}"),
        _ => String::new(),
    };
    boolean_evaluated(holds, true, &expression, &evaluated, file, line)
}

pub fn equal<A, B>(v1: &A, v2: &B, expr1: &str, expr2: &str, file: &str, line: u32) -> TestResult
where
    A: PartialEq<B> + Operand + ?Sized,
    B: Operand + ?Sized,
{
    relation(v1 == v2, Relation::Equal, v1, v2, expr1, expr2, file, line)
}

pub fn not_equal<A, B>(v1: &A, v2: &B, expr1: &str, expr2: &str, file: &str, line: u32) -> TestResult
where
    A: PartialEq<B> + Operand + ?Sized,
    B: Operand + ?Sized,
{
    relation(v1 != v2, Relation::NotEqual, v1, v2, expr1, expr2, file, line)
}

pub fn less<A, B>(v1: &A, v2: &B, expr1: &str, expr2: &str, file: &str, line: u32) -> TestResult
where
    A: PartialOrd<B> + Operand + ?Sized,
    B: Operand + ?Sized,
{
    relation(v1 < v2, Relation::Less, v1, v2, expr1, expr2, file, line)
}

pub fn less_or_equal<A, B>(
    v1: &A,
    v2: &B,
    expr1: &str,
    expr2: &str,
    file: &str,
    line: u32,
) -> TestResult
where
    A: PartialOrd<B> + Operand + ?Sized,
    B: Operand + ?Sized,
{
    relation(v1 <= v2, Relation::LessOrEqual, v1, v2, expr1, expr2, file, line)
}

pub fn greater<A, B>(v1: &A, v2: &B, expr1: &str, expr2: &str, file: &str, line: u32) -> TestResult
where
    A: PartialOrd<B> + Operand + ?Sized,
    B: Operand + ?Sized,
{
    relation(v1 > v2, Relation::Greater, v1, v2, expr1, expr2, file, line)
}

pub fn greater_or_equal<A, B>(
    v1: &A,
    v2: &B,
    expr1: &str,
    expr2: &str,
    file: &str,
    line: u32,
) -> TestResult
where
    A: PartialOrd<B> + Operand + ?Sized,
    B: Operand + ?Sized,
{
    relation(v1 >= v2, Relation::GreaterOrEqual, v1, v2, expr1, expr2, file, line)
}

// ============================================================================
// STRINGS
// ============================================================================

/// Byte-wise string (in)equality with null handling.
///
/// A `None` operand never satisfies an equality check and always satisfies
/// an inequality check, whatever the other operand is. Case-insensitive
/// comparison folds ASCII letters only.
#[allow(clippy::too_many_arguments)]
pub fn string_equality(
    s1: Option<&str>,
    s2: Option<&str>,
    expected_equal: bool,
    case_insensitive: bool,
    expr1: &str,
    expr2: &str,
    file: &str,
    line: u32,
) -> TestResult {
    let equal = match (s1, s2) {
        (Some(a), Some(b)) if case_insensitive => a.eq_ignore_ascii_case(b),
        (Some(a), Some(b)) => a == b,
        _ => false,
    };
    if equal == expected_equal {
        return Ok(());
    }
    let symbol = if expected_equal { "==" } else { "!=" };
    let expression = format!("{expr1} {symbol} {expr2}");
    let evaluated = format!("{} {symbol} {}", quoted_or_null(s1), quoted_or_null(s2));
    Err(Failure::with_evaluated(
        expression,
        evaluated,
        equality(expected_equal),
        equality(!expected_equal),
        file,
        line,
    ))
}

fn quoted_or_null(s: Option<&str>) -> String {
    match s {
        Some(s) => format!("\"{s}\""),
        None => "null".to_string(),
    }
}

// ============================================================================
// FLOATING POINT
// ============================================================================

/// ULP-aware (in)equality; see [`float_equals`].
pub fn floating_equality<F: FloatingPoint>(
    v1: F,
    v2: F,
    expected_equal: bool,
    expr1: &str,
    expr2: &str,
    file: &str,
    line: u32,
) -> TestResult {
    let equal = float_equals(v1, v2);
    if equal == expected_equal {
        return Ok(());
    }
    let symbol = if expected_equal { "==" } else { "!=" };
    Err(Failure::with_evaluated(
        format!("{expr1} {symbol} {expr2}"),
        format!("{v1} {symbol} {v2}"),
        equality(expected_equal),
        equality(!expected_equal),
        file,
        line,
    ))
}

// ============================================================================
// PANICS
// ============================================================================

/// Passes iff `f` panics with a payload of type `E`.
///
/// `expected` names `E` in the diagnostic. A payload of another type fails
/// with a description of what was actually caught; no panic at all fails
/// with `"Doesn't panic"`.
pub fn panics<E, F>(f: F, expected: &str, expression: &str, file: &str, line: u32) -> TestResult
where
    E: Any,
    F: FnOnce(),
{
    let expected = format!("Panics with {expected}");
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => Err(Failure::new(expression, expected, "Doesn't panic", file, line)),
        Err(payload) if payload.is::<E>() => Ok(()),
        Err(payload) => Err(Failure::new(
            expression,
            expected,
            describe_payload(&*payload),
            file,
            line,
        )),
    }
}

/// Boolean-only form of [`panics`]: checks whether `f` panics at all.
pub fn panicking<F>(f: F, expected: bool, expression: &str, file: &str, line: u32) -> TestResult
where
    F: FnOnce(),
{
    let panicked = panic::catch_unwind(AssertUnwindSafe(f)).is_err();
    if panicked == expected {
        return Ok(());
    }
    Err(Failure::new(
        expression,
        panic_state(expected),
        panic_state(panicked),
        file,
        line,
    ))
}

fn panic_state(panicked: bool) -> &'static str {
    if panicked {
        "Panics"
    } else {
        "Doesn't panic"
    }
}

/// Describes a caught panic payload for a diagnostic.
pub fn describe_payload(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = panic_message(payload) {
        return format!("Panics with a message: {message}");
    }
    if let Some(failure) = payload.downcast_ref::<Failure>() {
        return format!("Panics with a failure: {}", failure.description());
    }
    "Panics with a different payload".to_string()
}
