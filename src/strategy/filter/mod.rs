//! Test filtering for the host runner.
//!
//! A filter decides which registered tests take part in a run. Tests that do
//! not match are removed before anything executes and only show up as the
//! "filtered out" count of the summary.
//!
//! Filtering works on the full test name (`"<case>::test that it <description>"`),
//! so a filter can select a whole `describe` group as well as a single test.

use crate::test::Test;

mod no;
pub use no::*;

mod default;
pub use default::*;

/// The result of applying a [`TestFilter`].
#[derive(Debug)]
pub struct FilteredTests<'t> {
    /// The tests that are included in the run, in the order they were given.
    pub tests: Vec<&'t Test>,

    /// The number of tests that were filtered out.
    pub filtered_out: usize,
}

/// A strategy for selecting which tests are included in a test run.
pub trait TestFilter {
    fn filter<'t>(&self, tests: Vec<&'t Test>) -> FilteredTests<'t>;
}
