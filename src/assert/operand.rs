//! How an assertion operand shows up in an evaluated expression.
//!
//! Numbers render in their natural textual form, strings and characters
//! render quoted. Any other type can take part in a comparison by
//! implementing [`Operand`] with the default method; such operands are
//! reported through their source text only.
//!
//! ```
//! use xstest::assert::Operand;
//!
//! #[derive(PartialEq)]
//! struct Token(u8);
//! impl Operand for Token {}
//!
//! assert_eq!(3_i32.render().as_deref(), Some("3"));
//! assert_eq!("foo".render().as_deref(), Some("\"foo\""));
//! assert_eq!(Token(1).render(), None);
//! ```

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

pub trait Operand {
    /// Runtime rendering, or `None` when the type has no textual form.
    fn render(&self) -> Option<String> {
        None
    }
}

macro_rules! natural_operand {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Operand for $ty {
                fn render(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

natural_operand!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool
);

impl Operand for str {
    fn render(&self) -> Option<String> {
        Some(format!("\"{self}\""))
    }
}

impl Operand for String {
    fn render(&self) -> Option<String> {
        self.as_str().render()
    }
}

impl Operand for Cow<'_, str> {
    fn render(&self) -> Option<String> {
        self.as_ref().render()
    }
}

impl Operand for char {
    fn render(&self) -> Option<String> {
        Some(format!("'{self}'"))
    }
}

impl<T: Operand + ?Sized> Operand for &T {
    fn render(&self) -> Option<String> {
        (**self).render()
    }
}

impl<T: Operand + ?Sized> Operand for &mut T {
    fn render(&self) -> Option<String> {
        (**self).render()
    }
}

impl<T: Operand + ?Sized> Operand for Box<T> {
    fn render(&self) -> Option<String> {
        (**self).render()
    }
}

impl<T: Operand + ?Sized> Operand for Rc<T> {
    fn render(&self) -> Option<String> {
        (**self).render()
    }
}

impl<T: Operand + ?Sized> Operand for Arc<T> {
    fn render(&self) -> Option<String> {
        (**self).render()
    }
}

impl Operand for () {}
impl<T> Operand for Option<T> {}
impl<T, E> Operand for Result<T, E> {}
impl<T> Operand for Vec<T> {}
impl<T> Operand for [T] {}
impl<T, const N: usize> Operand for [T; N] {}

/// A string operand that may be absent, the analogue of a null C string.
pub trait NullableStr {
    fn as_nullable_str(&self) -> Option<&str>;
}

impl NullableStr for str {
    fn as_nullable_str(&self) -> Option<&str> {
        Some(self)
    }
}

impl NullableStr for String {
    fn as_nullable_str(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: NullableStr + ?Sized> NullableStr for &T {
    fn as_nullable_str(&self) -> Option<&str> {
        (**self).as_nullable_str()
    }
}

impl<T: NullableStr> NullableStr for Option<T> {
    fn as_nullable_str(&self) -> Option<&str> {
        self.as_ref().and_then(NullableStr::as_nullable_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_render_naturally() {
        assert_eq!(42_u8.render().as_deref(), Some("42"));
        assert_eq!((-7_i64).render().as_deref(), Some("-7"));
        assert_eq!(0.5_f64.render().as_deref(), Some("0.5"));
        assert_eq!(true.render().as_deref(), Some("true"));
    }

    #[test]
    fn test_text_renders_quoted() {
        assert_eq!("foo".render().as_deref(), Some("\"foo\""));
        assert_eq!(String::from("bar").render().as_deref(), Some("\"bar\""));
        assert_eq!('x'.render().as_deref(), Some("'x'"));
        assert_eq!((&&"baz").render().as_deref(), Some("\"baz\""));
    }

    #[test]
    fn test_containers_have_no_rendering() {
        assert_eq!(vec![1, 2].render(), None);
        assert_eq!(Some(3).render(), None);
        assert_eq!(().render(), None);
    }

    #[test]
    fn test_nullable_strings() {
        let none: Option<&str> = None;
        assert_eq!(none.as_nullable_str(), None);
        assert_eq!(Some("a").as_nullable_str(), Some("a"));
        assert_eq!(String::from("b").as_nullable_str(), Some("b"));
        assert_eq!(Some(String::from("c")).as_nullable_str(), Some("c"));
    }
}
