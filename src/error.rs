use thiserror::Error;

/// Errors raised while declaring specs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DeclareError {
    /// Two tests in the same frame resolve to the same entry name.
    #[error("Spec with name '{description}' already exists.")]
    DuplicateSpec { description: String, case: String },
}

/// A failing assertion result, escalated into a test failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssertionFailure {
    pub message: String,
}
