use crate::{
    filter::{FilteredTests, TestFilter},
    test::Test,
};

/// A [`TestFilter`] that keeps every test.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NoFilter;

impl TestFilter for NoFilter {
    fn filter<'t>(&self, tests: Vec<&'t Test>) -> FilteredTests<'t> {
        FilteredTests {
            tests,
            filtered_out: 0,
        }
    }
}
