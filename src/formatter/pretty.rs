use std::io;

use crate::{
    formatter::{
        common::color::{ColorSetting, SupportsColor, colors::*},
        *,
    },
    outcome::{TestFailure, TestStatus},
};

/// Formatter modeled after the output of the built in Rust test harness.
///
/// Every test gets one line, failures are repeated with their message at the
/// end, followed by the summary line.
#[derive(Debug)]
pub struct PrettyFormatter<W: io::Write> {
    target: W,
    color_setting: ColorSetting,
}

impl Default for PrettyFormatter<io::Stdout> {
    fn default() -> Self {
        Self {
            target: io::stdout(),
            color_setting: ColorSetting::default(),
        }
    }
}

impl<W: io::Write> PrettyFormatter<W> {
    pub fn with_target<WithTarget: io::Write>(
        self,
        target: WithTarget,
    ) -> PrettyFormatter<WithTarget> {
        PrettyFormatter {
            target,
            color_setting: self.color_setting,
        }
    }

    pub fn with_color_setting(self, color_setting: impl Into<ColorSetting>) -> Self {
        Self {
            color_setting: color_setting.into(),
            ..self
        }
    }
}

impl<W: io::Write + SupportsColor> PrettyFormatter<W> {
    fn use_color(&self) -> bool {
        self.color_setting.use_color(&self.target)
    }

    fn write_status(&mut self, ok: bool, text: &str) -> io::Result<()> {
        match (ok, self.use_color()) {
            (_, false) => write!(self.target, "{text}"),
            (true, true) => write!(self.target, "{GREEN}{text}{RESET}"),
            (false, true) => write!(self.target, "{RED}{text}{RESET}"),
        }
    }
}

impl<W: io::Write + SupportsColor> TestFormatter for PrettyFormatter<W> {
    type Error = io::Error;

    fn fmt_run_start(&mut self, data: FmtRunStart) -> Result<(), Self::Error> {
        if data.focused {
            match self.use_color() {
                true => write!(self.target, "\n{YELLOW}note{RESET}: ")?,
                false => write!(self.target, "\nnote: ")?,
            }
            writeln!(self.target, "focus mode, only focused specs were registered")?;
        }
        match data.active {
            1 => writeln!(self.target, "\nrunning 1 test"),
            count => writeln!(self.target, "\nrunning {count} tests"),
        }
    }

    fn fmt_test_outcome(&mut self, data: FmtTestOutcome<'_, '_>) -> Result<(), Self::Error> {
        write!(self.target, "test {} ... ", data.meta.full_name())?;
        match data.outcome.status {
            TestStatus::Passed => self.write_status(true, "ok")?,
            TestStatus::Failed(_) => self.write_status(false, "FAILED")?,
        }
        writeln!(self.target)
    }

    fn fmt_run_outcomes(&mut self, data: FmtRunOutcomes<'_, '_>) -> Result<(), Self::Error> {
        let failures: Vec<_> = data
            .outcomes
            .iter()
            .filter_map(|(name, outcome)| match &outcome.status {
                TestStatus::Failed(failure) => Some((*name, failure)),
                TestStatus::Passed => None,
            })
            .collect();
        let passed = data.outcomes.len() - failures.len();

        if !failures.is_empty() {
            writeln!(self.target)?;
            writeln!(self.target, "failures:")?;
            writeln!(self.target)?;
            for (name, failure) in failures.iter() {
                writeln!(self.target, "---- {name} stdout ----")?;
                match failure {
                    TestFailure::Error(err) => writeln!(self.target, "Error: {err}")?,
                    TestFailure::Panicked(msg) => writeln!(self.target, "panicked: {msg}")?,
                }
                writeln!(self.target)?;
            }
            writeln!(self.target)?;
            writeln!(self.target, "failures:")?;
            for (name, _) in failures.iter() {
                writeln!(self.target, "    {name}")?;
            }
        }

        writeln!(self.target)?;
        write!(self.target, "test result: ")?;
        match failures.is_empty() {
            true => self.write_status(true, "ok")?,
            false => self.write_status(false, "FAILED")?,
        }
        writeln!(
            self.target,
            ". {passed} passed; {} failed; 0 ignored; 0 measured; {} filtered out; finished in {:.2}s",
            failures.len(),
            data.filtered_out,
            data.duration.as_secs_f64()
        )?;
        writeln!(self.target)
    }
}

impl<W: io::Write> TestListFormatter for PrettyFormatter<W> {
    type Error = io::Error;

    fn fmt_list_test(&mut self, data: FmtListTest<'_>) -> Result<(), Self::Error> {
        writeln!(self.target, "{}: test", data.meta.full_name())
    }

    fn fmt_end_listing(&mut self, data: FmtEndListing) -> Result<(), Self::Error> {
        match data.active {
            1 => writeln!(self.target, "\n1 test"),
            count => writeln!(self.target, "\n{count} tests"),
        }
    }
}
