use std::{sync::Arc, time::Instant};

use crate::{
    TestReport,
    case::TestCaseFactory,
    filter::{FilteredTests, TestFilter},
    formatter::*,
    panic::TestPanicHandler,
    registry::Registry,
    runner::TestRunner,
};

/// Runs the tests of a [`Registry`] the way a host runner would.
///
/// Built with [`harness`](crate::harness) and configured with the `with_*`
/// methods.
pub struct SpecHarness<'r, Factory: TestCaseFactory, Filter, PanicHandler, Runner, Formatter> {
    pub(crate) registry: &'r Registry<Factory>,
    pub(crate) filter: Filter,
    pub(crate) panic_handler: PanicHandler,
    pub(crate) runner: Runner,
    pub(crate) formatter: Formatter,
}

impl<
    'r,
    Factory: TestCaseFactory,
    Filter: TestFilter,
    PanicHandler: TestPanicHandler + Send + Sync + 'r,
    Runner: TestRunner,
    Formatter: TestFormatter,
> SpecHarness<'r, Factory, Filter, PanicHandler, Runner, Formatter>
{
    #[tracing::instrument(skip_all)]
    pub fn run(self) -> TestReport<'r, Formatter::Error> {
        let now = Instant::now();

        let mut formatter = self.formatter;
        let mut fmt_errors = Vec::new();
        let focused = self.registry.is_focused();

        let FilteredTests {
            tests,
            filtered_out,
        } = self.filter.filter(self.registry.tests().collect());
        tracing::debug!(active = tests.len(), filtered_out, focused, "starting run");
        fmt_errors.push_on_error(
            FormatError::RunStart,
            formatter.fmt_run_start(FmtRunStart {
                active: tests.len(),
                filtered_out,
                focused,
            }),
        );

        let panic_handler = Arc::new(self.panic_handler);
        let runner = self.runner;
        let outcomes = std::thread::scope(|scope| {
            let test_runs = tests.into_iter().map(|test| {
                let panic_handler = Arc::clone(&panic_handler);
                (
                    move || panic_handler.handle(|| test.call(), &test.meta),
                    &test.meta,
                )
            });

            runner
                .run(test_runs, scope)
                .inspect(|(meta, outcome)| {
                    fmt_errors.push_on_error(
                        FormatError::TestOutcome,
                        formatter.fmt_test_outcome(FmtTestOutcome { meta, outcome }),
                    );
                })
                .map(|(meta, outcome)| (meta.full_name(), outcome))
                .collect::<Vec<_>>()
        });

        let duration = now.elapsed();
        fmt_errors.push_on_error(
            FormatError::RunOutcomes,
            formatter.fmt_run_outcomes(FmtRunOutcomes {
                outcomes: &outcomes,
                filtered_out,
                duration,
            }),
        );

        TestReport {
            outcomes,
            duration,
            fmt_errors,
        }
    }
}

impl<'r, Factory: TestCaseFactory, Filter: TestFilter, PanicHandler, Runner, Formatter>
    SpecHarness<'r, Factory, Filter, PanicHandler, Runner, Formatter>
where
    Formatter: TestListFormatter,
{
    /// Write the names of all tests that would run.
    pub fn list(self) -> Vec<(FormatError, Formatter::Error)> {
        let mut formatter = self.formatter;
        let mut fmt_errors = Vec::new();

        let FilteredTests {
            tests,
            filtered_out,
        } = self.filter.filter(self.registry.tests().collect());
        for test in tests.iter() {
            fmt_errors.push_on_error(
                FormatError::ListTest,
                formatter.fmt_list_test(FmtListTest { meta: &test.meta }),
            );
        }
        fmt_errors.push_on_error(
            FormatError::EndListing,
            formatter.fmt_end_listing(FmtEndListing {
                active: tests.len(),
                filtered_out,
            }),
        );

        fmt_errors
    }
}

impl<'r, Factory: TestCaseFactory, Filter, PanicHandler, Runner, Formatter>
    SpecHarness<'r, Factory, Filter, PanicHandler, Runner, Formatter>
{
    pub fn with_filter<WithFilter: TestFilter>(
        self,
        filter: WithFilter,
    ) -> SpecHarness<'r, Factory, WithFilter, PanicHandler, Runner, Formatter> {
        SpecHarness {
            registry: self.registry,
            filter,
            panic_handler: self.panic_handler,
            runner: self.runner,
            formatter: self.formatter,
        }
    }

    pub fn with_panic_handler<WithPanicHandler: TestPanicHandler>(
        self,
        panic_handler: WithPanicHandler,
    ) -> SpecHarness<'r, Factory, Filter, WithPanicHandler, Runner, Formatter> {
        SpecHarness {
            registry: self.registry,
            filter: self.filter,
            panic_handler,
            runner: self.runner,
            formatter: self.formatter,
        }
    }

    pub fn with_runner<WithRunner: TestRunner>(
        self,
        runner: WithRunner,
    ) -> SpecHarness<'r, Factory, Filter, PanicHandler, WithRunner, Formatter> {
        SpecHarness {
            registry: self.registry,
            filter: self.filter,
            panic_handler: self.panic_handler,
            runner,
            formatter: self.formatter,
        }
    }

    pub fn with_formatter<WithFormatter>(
        self,
        formatter: WithFormatter,
    ) -> SpecHarness<'r, Factory, Filter, PanicHandler, Runner, WithFormatter> {
        SpecHarness {
            registry: self.registry,
            filter: self.filter,
            panic_handler: self.panic_handler,
            runner: self.runner,
            formatter,
        }
    }
}
