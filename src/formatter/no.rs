use crate::formatter::*;

/// A formatter that produces no output.
///
/// Useful when the outcomes are inspected through the returned report only,
/// for example in tests.
#[derive(Debug, Default, Clone)]
pub struct NoFormatter;

impl TestFormatter for NoFormatter {
    type Error = ();
}

impl TestListFormatter for NoFormatter {
    type Error = ();
}
