//! Small helpers shared by the runner layers.

use std::any::Any;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// `"1 test"`, `"2 tests"`; the plural is formed by appending `s`.
pub fn numbered(noun: &str, count: usize) -> String {
    numbered_with_plural(noun, count, &format!("{noun}s"))
}

/// Like [`numbered`] with an explicit plural form.
pub fn numbered_with_plural(noun: &str, count: usize, plural: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {plural}")
    }
}

/// Uniformly permutes `items` using a freshly seeded generator.
///
/// Every call draws a new seed from the operating system, so two shuffles of
/// the same input are independent and runs are not reproducible.
pub fn shuffle<T>(items: &mut [T]) {
    let mut rng = StdRng::from_entropy();
    items.shuffle(&mut rng);
}

pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{} ms", elapsed.as_millis())
}

/// The message of a panic raised with `panic!`, if the payload carries one.
pub fn panic_message(payload: &(dyn Any + Send)) -> Option<&str> {
    payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&'static str>().copied())
}
