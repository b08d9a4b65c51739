use crate::{
    filter::{FilteredTests, TestFilter},
    test::Test,
};

/// Name based filter, similar to the one of the built in Rust test harness.
///
/// A test is kept when it matches any of the filters (or there are none) and
/// none of the skips. By default a pattern matches when it is a substring of
/// the full test name, with [`exact`](Self::exact) it has to be equal.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DefaultFilter {
    exact: bool,
    filter: Vec<String>,
    skip: Vec<String>,
}

impl DefaultFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exact(self, exact: bool) -> Self {
        Self { exact, ..self }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter.push(filter.into());
        self
    }

    pub fn with_skip(mut self, skip: impl Into<String>) -> Self {
        self.skip.push(skip.into());
        self
    }

    /// Build a filter from command line arguments.
    ///
    /// Understands `--exact`, `--skip <pattern>` and positional filters.
    /// Other flags are ignored.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut filter = Self::default();
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--exact" => filter.exact = true,
                "--skip" => match args.next() {
                    Some(skip) => filter.skip.push(skip),
                    None => tracing::warn!("`--skip` without a pattern"),
                },
                flag if flag.starts_with('-') => tracing::debug!(flag, "ignoring argument"),
                _ => filter.filter.push(arg),
            }
        }
        filter
    }

    fn matches(&self, name: &str, pattern: &str) -> bool {
        match self.exact {
            true => name == pattern,
            false => name.contains(pattern),
        }
    }
}

impl TestFilter for DefaultFilter {
    fn filter<'t>(&self, tests: Vec<&'t Test>) -> FilteredTests<'t> {
        if self.filter.is_empty() && self.skip.is_empty() {
            return FilteredTests {
                tests,
                filtered_out: 0,
            };
        }

        let total = tests.len();
        let remaining: Vec<_> = tests
            .into_iter()
            .filter(|test| {
                let name = test.full_name();
                let in_filter = self.filter.is_empty()
                    || self.filter.iter().any(|filter| self.matches(name, filter));
                in_filter && !self.skip.iter().any(|skip| self.matches(name, skip))
            })
            .collect();

        FilteredTests {
            filtered_out: total - remaining.len(),
            tests: remaining,
        }
    }
}
