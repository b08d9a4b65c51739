use std::{num::NonZeroUsize, thread::Scope, time::Instant};

use crate::{
    outcome::{TestOutcome, TestStatus},
    runner::TestRunner,
    test::TestMeta,
};

/// Runs every test on the calling thread, in declaration order.
#[derive(Debug, Default, Clone)]
pub struct SimpleRunner;

impl SimpleRunner {
    pub fn new() -> Self {
        Self
    }
}

impl TestRunner for SimpleRunner {
    fn run<'t, 's, I, F>(
        &self,
        tests: I,
        _: &'s Scope<'s, 't>,
    ) -> impl Iterator<Item = (&'t TestMeta, TestOutcome)>
    where
        I: ExactSizeIterator<Item = (F, &'t TestMeta)>,
        F: (Fn() -> TestStatus) + Send + 's,
    {
        tests.map(|(test, meta)| {
            let now = Instant::now();
            let status = test();
            let duration = now.elapsed();
            (meta, TestOutcome { status, duration })
        })
    }

    fn worker_count(&self, _: usize) -> NonZeroUsize {
        NonZeroUsize::MIN
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{registry::Declare, test_support::*};

    #[test]
    fn run_linear() {
        let registry = registry(|r| {
            r.it("first", || ())?;
            r.describe("group", |r| r.it("second", || ()))?;
            r.it("third", || ())?;
            Ok(())
        });

        let report = harness(&registry).with_runner(SimpleRunner::default()).run();
        let test_names: Vec<_> = report.outcomes.into_iter().map(|(key, _)| key).collect();

        assert_eq!(
            test_names,
            [
                "test that it first",
                "test that it third",
                "group::test that it second",
            ]
        );
    }
}
