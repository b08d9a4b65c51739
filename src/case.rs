//! Test containers handed to the host runner.
//!
//! Every frame owns one container, named after the frame's qualified name.
//! The host enumerates containers and invokes the tests inside them.
//!
//! Implement [`TestCase`] and [`TestCaseFactory`] to store entries in a host
//! specific way. [`DefaultTestCase`] keeps entries in declaration order.

use crate::test::Test;

/// A mutable registry of named tests for one frame.
pub trait TestCase {
    /// The qualified name this container is scoped to.
    fn name(&self) -> &str;

    fn contains(&self, entry_name: &str) -> bool;

    /// Add an entry. The registry checks [`contains`](Self::contains) before.
    fn insert(&mut self, test: Test);

    /// Remove every entry.
    fn clear(&mut self);

    fn tests(&self) -> impl ExactSizeIterator<Item = &Test>;

    fn len(&self) -> usize {
        self.tests().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Creates the container of a new frame.
pub trait TestCaseFactory {
    type Case: TestCase;

    fn create(&self, qualified_name: &str) -> Self::Case;
}

/// Container keeping its entries in insertion order.
#[derive(Debug, Default)]
pub struct DefaultTestCase {
    name: String,
    tests: Vec<Test>,
}

impl DefaultTestCase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: Vec::new(),
        }
    }
}

impl TestCase for DefaultTestCase {
    fn name(&self) -> &str {
        &self.name
    }

    fn contains(&self, entry_name: &str) -> bool {
        self.tests.iter().any(|test| test.name == entry_name)
    }

    fn insert(&mut self, test: Test) {
        self.tests.push(test);
    }

    fn clear(&mut self) {
        self.tests.clear();
    }

    fn tests(&self) -> impl ExactSizeIterator<Item = &Test> {
        self.tests.iter()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTestCaseFactory;

impl TestCaseFactory for DefaultTestCaseFactory {
    type Case = DefaultTestCase;

    fn create(&self, qualified_name: &str) -> Self::Case {
        DefaultTestCase::new(qualified_name)
    }
}
