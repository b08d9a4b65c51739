use std::io;

mod spec;
pub use spec::SpecHarness;

use crate::{
    case::TestCaseFactory, filter::DefaultFilter, formatter::pretty::PrettyFormatter,
    panic::DefaultPanicHandler, registry::Registry, runner::DefaultRunner,
};

/// Create a harness over every test registered in `registry`, with the default
/// strategies.
pub fn harness<Factory: TestCaseFactory>(
    registry: &Registry<Factory>,
) -> SpecHarness<
    '_,
    Factory,
    DefaultFilter,
    DefaultPanicHandler,
    DefaultRunner,
    PrettyFormatter<io::Stdout>,
> {
    SpecHarness {
        registry,
        filter: DefaultFilter::default(),
        panic_handler: DefaultPanicHandler,
        runner: DefaultRunner::default(),
        formatter: PrettyFormatter::default(),
    }
}
