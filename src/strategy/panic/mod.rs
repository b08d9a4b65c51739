//! Panic handling for the host runner.
//!
//! Spec bodies and hooks can panic. A panic handler executes a registered
//! [`Test`](crate::test::Test) and turns a panic into a [`TestStatus`].
//! The test itself already runs its after hooks before the panic reaches the
//! handler.

use std::panic::UnwindSafe;

use crate::{
    outcome::TestStatus,
    test::{TestMeta, TestResult},
};

mod no;
pub use no::*;

mod default;
pub use default::*;

/// A strategy for executing a test function and translating panics into a [`TestStatus`].
///
/// Panic handlers can be called from worker threads, so the handler is passed
/// by shared reference.
pub trait TestPanicHandler {
    /// Execute `f` and return its [`TestStatus`].
    fn handle<F: FnOnce() -> TestResult + UnwindSafe>(&self, f: F, meta: &TestMeta) -> TestStatus;
}
