//! Observing assertion results.
//!
//! An assertion library reports one [`AssertionResult`] per check. Failing
//! checks are turned into an [`AssertionFailure`] right away so the test body
//! can stop with `?` instead of recording the failure and going on.

use std::fmt::Debug;

use crate::error::AssertionFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    /// Informational output, never a failure.
    Message,
    Expectation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionResult {
    pub kind: ResultKind,
    pub passed: bool,
    pub message: String,
}

impl AssertionResult {
    pub fn passed(&self) -> bool {
        self.passed
    }
}

/// Translate one observed result into a pass or failure signal.
pub fn observe_result(result: &AssertionResult) -> Result<(), AssertionFailure> {
    match result.kind {
        ResultKind::Message => Ok(()),
        ResultKind::Expectation if result.passed() => Ok(()),
        ResultKind::Expectation => {
            tracing::debug!(message = %result.message, "assertion failed");
            Err(AssertionFailure {
                message: result.message.clone(),
            })
        }
    }
}

pub fn message(text: impl Into<String>) -> AssertionResult {
    AssertionResult {
        kind: ResultKind::Message,
        passed: true,
        message: text.into(),
    }
}

pub fn expect_true(value: bool, what: impl Into<String>) -> AssertionResult {
    let what = what.into();
    AssertionResult {
        kind: ResultKind::Expectation,
        passed: value,
        message: match value {
            true => "Passed.".to_string(),
            false => format!("Expected {what} to be true."),
        },
    }
}

pub fn expect_eq<T: PartialEq + Debug>(actual: T, expected: T) -> AssertionResult {
    let passed = actual == expected;
    AssertionResult {
        kind: ResultKind::Expectation,
        passed,
        message: match passed {
            true => "Passed.".to_string(),
            false => format!("Expected {actual:?} to equal {expected:?}."),
        },
    }
}

/// Records every result of a running test.
///
/// [`add`](Self::add) keeps the result and escalates it through
/// [`observe_result`].
#[derive(Debug, Default, Clone)]
pub struct Results {
    items: Vec<AssertionResult>,
}

impl Results {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, result: AssertionResult) -> Result<(), AssertionFailure> {
        let observed = observe_result(&result);
        self.items.push(result);
        observed
    }

    pub fn items(&self) -> &[AssertionResult] {
        &self.items
    }

    pub fn passed(&self) -> bool {
        self.items
            .iter()
            .all(|item| item.kind == ResultKind::Message || item.passed)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn messages_never_fail() {
        let mut result = message("just saying");
        result.passed = false;
        assert_eq!(observe_result(&result), Ok(()));
    }

    #[test]
    fn failing_expectation_escalates() {
        let result = expect_eq(1, 2);
        assert_eq!(
            observe_result(&result),
            Err(AssertionFailure {
                message: "Expected 1 to equal 2.".to_string()
            })
        );
    }

    #[test]
    fn results_stop_at_first_failure() {
        fn body(results: &mut Results) -> Result<(), AssertionFailure> {
            results.add(message("starting"))?;
            results.add(expect_true(true, "first"))?;
            results.add(expect_true(false, "second"))?;
            results.add(expect_eq("never", "checked"))?;
            Ok(())
        }

        let mut results = Results::new();
        let err = body(&mut results).unwrap_err();
        assert_eq!(err.to_string(), "Expected second to be true.");
        assert_eq!(results.items().len(), 3);
        assert!(!results.passed());
    }
}
