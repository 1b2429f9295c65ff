//! Selection of the tests to execute.
//!
//! A token selects either a whole suite (`Sum`) or a single test
//! (`Sum.Pass`). An empty filter selects everything.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    tokens: Vec<String>,
}

impl Filter {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// A filter selecting every test.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn should_run(&self, suite_name: &str, case_name: &str) -> bool {
        self.tokens.is_empty()
            || self.tokens.iter().any(|token| {
                token == suite_name
                    || token
                        .strip_prefix(suite_name)
                        .and_then(|rest| rest.strip_prefix('.'))
                        == Some(case_name)
            })
    }
}
