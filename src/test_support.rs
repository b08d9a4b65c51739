use std::{
    io,
    sync::{Arc, LazyLock, Mutex, PoisonError},
};

use regex::Regex;

use crate::{
    SpecHarness,
    case::TestCaseFactory,
    error::DeclareError,
    filter::NoFilter,
    formatter::no::NoFormatter,
    panic::DefaultPanicHandler,
    registry::Registry,
    runner::SimpleRunner,
};

/// Build a registry by running a declaration pass.
pub fn registry<F>(declare: F) -> Registry
where
    F: FnOnce(&mut Registry) -> Result<(), DeclareError>,
{
    let mut registry = Registry::new();
    declare(&mut registry).expect("declarations should be valid");
    registry
}

/// A quiet harness running tests in declaration order.
pub fn harness<Factory: TestCaseFactory>(
    registry: &Registry<Factory>,
) -> SpecHarness<'_, Factory, NoFilter, DefaultPanicHandler, SimpleRunner, NoFormatter> {
    SpecHarness {
        registry,
        filter: NoFilter,
        panic_handler: DefaultPanicHandler,
        runner: SimpleRunner,
        formatter: NoFormatter,
    }
}

/// Shared in-memory output target for formatter tests.
#[derive(Debug, Default, Clone)]
pub struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        io::Write::write(&mut *guard, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl crate::formatter::common::color::SupportsColor for Buffer {
    fn supports_color(&self) -> bool {
        false
    }
}

impl std::fmt::Display for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f.write_str(&String::from_utf8_lossy(&bytes))
    }
}

static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"finished in \d+\.\d{2}s").unwrap());

pub fn sanitize_duration(input: &str) -> String {
    DURATION_RE
        .replace_all(input, "finished in <duration>")
        .into_owned()
}

macro_rules! nonzero {
    (0) => {
        compile_error!("0 is zero")
    };

    ($value:literal) => {
        std::num::NonZeroUsize::new($value).unwrap()
    };
}

pub(crate) use nonzero;
