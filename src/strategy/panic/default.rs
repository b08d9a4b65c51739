use std::{
    any::Any,
    panic::{UnwindSafe, catch_unwind},
};

use crate::{
    outcome::{TestFailure, TestStatus},
    panic::TestPanicHandler,
    test::{TestMeta, TestResult},
};

/// The [`TestPanicHandler`] used by the default harness.
///
/// A test passes when it returns `Ok(())` and does not panic. A panic becomes
/// [`TestFailure::Panicked`] with the panic message.
#[derive(Debug, Default, Clone)]
pub struct DefaultPanicHandler;

impl DefaultPanicHandler {
    /// Convert a panic payload into a string.
    ///
    /// This matches the payload types produced by `panic!` (`&'static str` and `String`).
    pub fn payload_as_string(err: Box<dyn Any + Send + 'static>) -> String {
        err.downcast::<&'static str>()
            .map(|s| s.to_string())
            .or_else(|err| err.downcast::<String>().map(|s| *s))
            .unwrap_or_else(|_| String::from("Box<dyn Any>"))
    }
}

impl TestPanicHandler for DefaultPanicHandler {
    fn handle<F: FnOnce() -> TestResult + UnwindSafe>(&self, f: F, meta: &TestMeta) -> TestStatus {
        match catch_unwind(f) {
            Ok(result) => result.into(),
            Err(err) => {
                let msg = Self::payload_as_string(err);
                tracing::debug!(test = meta.full_name(), panic = %msg, "spec panicked");
                TestStatus::Failed(TestFailure::Panicked(msg))
            }
        }
    }
}
