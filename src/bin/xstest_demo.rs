// Demo test binary: registers a handful of tests and runs them.
// Usage: cargo run --bin xstest_demo [Suite | Suite.Case ...] [--color never] [-q]

use xstest::prelude::*;

#[derive(Default)]
struct Stack {
    items: Vec<i32>,
}

impl Fixture for Stack {
    fn set_up(&mut self) -> TestResult {
        self.items.extend([1, 2, 3]);
        Ok(())
    }

    fn tear_down(&mut self) {
        self.items.clear();
    }
}

fn register_tests() {
    xs_test!(Sum, Pass, { xs_assert_eq!(1 + 1, 2) });

    xs_test!(Sum, Fail, { xs_assert_eq!(1 + 1, 3) });

    xs_test!(Strings, Compare, {
        xs_assert_str_eq!("xstest", String::from("xstest"))?;
        xs_assert_str_case_eq!("XSTest", "xstest")?;
        xs_assert_str_ne!(None::<&str>, "xstest")
    });

    xs_test!(Floats, Ulps, {
        xs_assert_double_eq!(0.1 + 0.2, 0.3)?;
        xs_assert_float_ne!(1.0_f32, 1.1_f32)
    });

    xs_test!(Panics, Payload, {
        xs_assert_panics!(std::panic::panic_any(7_u32), u32)?;
        xs_assert_no_panic!(vec![1, 2, 3].len())
    });

    xs_fixture!(Stacks, Pop, Stack, |stack| {
        xs_assert_eq!(stack.items.pop(), Some(3))?;
        xs_assert_eq!(stack.items.len(), 2)
    });
}

fn main() {
    register_tests();
    xstest::cli::run();
}
