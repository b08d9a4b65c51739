use std::{
    process::{ExitCode, Termination},
    time::Duration,
};

use crate::{formatter::FormatError, outcome::TestOutcome};

pub type TestOutcomes<'t> = Vec<(&'t str, TestOutcome)>;

/// Everything a finished run produced.
///
/// Outcomes are keyed by full test name, in the order the runner finished them.
#[derive(Debug)]
#[non_exhaustive]
pub struct TestReport<'t, FmtError: 't> {
    pub outcomes: TestOutcomes<'t>,
    pub duration: Duration,
    pub fmt_errors: Vec<(FormatError, FmtError)>,
}

impl<'t, FmtError> TestReport<'t, FmtError> {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.failed()).count()
    }

    pub fn outcome(&self, full_name: &str) -> Option<&TestOutcome> {
        self.outcomes
            .iter()
            .find_map(|(name, outcome)| (*name == full_name).then_some(outcome))
    }

    pub fn exit_code(&self) -> ExitCode {
        match self.failed() {
            0 => ExitCode::SUCCESS,
            _ => ExitCode::FAILURE,
        }
    }
}

impl<'t, FmtError> Termination for TestReport<'t, FmtError> {
    fn report(self) -> ExitCode {
        self.exit_code()
    }
}
