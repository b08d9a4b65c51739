//! Test execution and scheduling for the host runner.
//!
//! The harness passes the runner an iterator of test execution functions.
//! These already include panic handling (they return a [`TestStatus`]), so the
//! runner only decides when and where each test runs and measures how long it
//! took.

use std::{num::NonZeroUsize, thread::Scope};

use crate::{
    outcome::{TestOutcome, TestStatus},
    test::TestMeta,
};

mod default;
pub use default::*;

mod simple;
pub use simple::*;

/// A strategy for running tests and producing [`TestOutcome`] values.
///
/// The produced iterator does not have to keep the order of the incoming
/// tests.
pub trait TestRunner {
    /// Run the given tests and return their outcomes.
    ///
    /// The runner receives a [`Scope`] so it can spawn threads while still
    /// borrowing the test metadata with lifetime `'t`.
    fn run<'t, 's, I, F>(
        &self,
        tests: I,
        scope: &'s Scope<'s, 't>,
    ) -> impl Iterator<Item = (&'t TestMeta, TestOutcome)>
    where
        I: ExactSizeIterator<Item = (F, &'t TestMeta)>,
        F: (Fn() -> TestStatus) + Send + 's;

    /// Number of workers this runner would use for `tests_count` tests.
    fn worker_count(&self, tests_count: usize) -> NonZeroUsize;
}
