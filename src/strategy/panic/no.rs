use crate::{
    outcome::TestStatus,
    panic::TestPanicHandler,
    test::{TestMeta, TestResult},
};

/// A [`TestPanicHandler`] that does not catch panics.
///
/// Panics unwind through the runner. Useful when the process embedding the
/// registry has its own panic reporting.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NoPanicHandler;

impl TestPanicHandler for NoPanicHandler {
    fn handle<F: FnOnce() -> TestResult>(&self, f: F, _: &TestMeta) -> TestStatus {
        f().into()
    }
}
