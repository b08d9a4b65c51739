//! Output formatting for the host runner.
//!
//! The harness reports progress as a sequence of events. A formatter decides
//! what, if anything, to write for each of them. Every method has a default
//! that writes nothing, so a formatter only implements the events it cares
//! about.

use std::time::Duration;

use crate::{outcome::TestOutcome, test::TestMeta};

pub mod common;
pub mod no;
pub mod pretty;

/// Which formatter event failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    RunStart,
    TestOutcome,
    RunOutcomes,
    ListTest,
    EndListing,
}

#[derive(Debug, Clone, Copy)]
pub struct FmtRunStart {
    /// Tests that will run.
    pub active: usize,
    pub filtered_out: usize,
    /// Whether the registry was left in focus mode by the declaration pass.
    pub focused: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct FmtTestOutcome<'t, 'o> {
    pub meta: &'t TestMeta,
    pub outcome: &'o TestOutcome,
}

#[derive(Debug, Clone, Copy)]
pub struct FmtRunOutcomes<'t, 'o> {
    pub outcomes: &'o [(&'t str, TestOutcome)],
    pub filtered_out: usize,
    pub duration: Duration,
}

#[derive(Debug, Clone, Copy)]
pub struct FmtListTest<'t> {
    pub meta: &'t TestMeta,
}

#[derive(Debug, Clone, Copy)]
pub struct FmtEndListing {
    pub active: usize,
    pub filtered_out: usize,
}

pub trait TestFormatter {
    type Error;

    fn fmt_run_start(&mut self, data: FmtRunStart) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_test_outcome(&mut self, data: FmtTestOutcome<'_, '_>) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_run_outcomes(&mut self, data: FmtRunOutcomes<'_, '_>) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }
}

pub trait TestListFormatter {
    type Error;

    fn fmt_list_test(&mut self, data: FmtListTest<'_>) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_end_listing(&mut self, data: FmtEndListing) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }
}

/// Collects formatter errors without interrupting the run.
pub(crate) trait FmtErrors<E> {
    fn push_on_error(&mut self, event: FormatError, result: Result<(), E>);
}

impl<E> FmtErrors<E> for Vec<(FormatError, E)> {
    fn push_on_error(&mut self, event: FormatError, result: Result<(), E>) {
        if let Err(err) = result {
            self.push((event, err));
        }
    }
}
