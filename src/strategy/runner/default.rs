use std::{
    cmp,
    num::NonZeroUsize,
    thread::{Scope, ScopedJoinHandle},
    time::Instant,
};

use crate::{
    outcome::{TestOutcome, TestStatus},
    runner::TestRunner,
    test::TestMeta,
};

/// Runs tests on a pool of scoped worker threads.
///
/// Jobs are handed to the workers over a channel, outcomes come back in
/// completion order.
#[derive(Debug)]
pub struct DefaultRunner {
    threads: NonZeroUsize,
}

impl Default for DefaultRunner {
    fn default() -> Self {
        Self {
            threads: std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl DefaultRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thread_count(self, count: NonZeroUsize) -> Self {
        Self { threads: count }
    }
}

struct DefaultRunnerIterator<'t, 's, I, F>
where
    I: Iterator<Item = (F, &'t TestMeta)>,
    F: (Fn() -> TestStatus) + Send,
{
    source: I,
    push_job: crossbeam_channel::Sender<Option<(F, &'t TestMeta)>>,
    wait_job: crossbeam_channel::Receiver<(&'t TestMeta, TestOutcome)>,
    pending: usize,
    workers: Vec<ScopedJoinHandle<'s, ()>>,
}

impl<'t, 's, I, F> DefaultRunnerIterator<'t, 's, I, F>
where
    I: Iterator<Item = (F, &'t TestMeta)>,
    F: (Fn() -> TestStatus) + Send + 's,
{
    fn new(worker_count: NonZeroUsize, mut source: I, scope: &'s Scope<'s, 't>) -> Self {
        let (itx, irx) = crossbeam_channel::unbounded();
        let (otx, orx) = crossbeam_channel::bounded(worker_count.get());

        let mut pending = 0;
        for _ in 0..worker_count.get() {
            match source.next() {
                Some(job) => {
                    pending += 1;
                    // The receiver is alive, `irx` is still held here.
                    let _ = itx.send(Some(job));
                }
                None => break,
            }
        }

        let workers = (0..worker_count.get())
            .map(|_| {
                let irx = irx.clone();
                let otx = otx.clone();
                scope.spawn(move || {
                    while let Ok(Some((f, meta))) = irx.recv() {
                        let now = Instant::now();
                        let status = f();
                        let duration = now.elapsed();
                        if otx.send((meta, TestOutcome { status, duration })).is_err() {
                            // The iterator was dropped, nobody waits for this outcome anymore.
                            return;
                        }
                    }
                })
            })
            .collect();

        Self {
            source,
            push_job: itx,
            wait_job: orx,
            pending,
            workers,
        }
    }
}

impl<'t, 's, I, F> Iterator for DefaultRunnerIterator<'t, 's, I, F>
where
    I: Iterator<Item = (F, &'t TestMeta)>,
    F: (Fn() -> TestStatus) + Send + 's,
{
    type Item = (&'t TestMeta, TestOutcome);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending == 0 {
            return None;
        }

        let out = self.wait_job.recv().ok();
        self.pending -= 1;
        if let Some(job) = self.source.next() {
            self.pending += 1;
            let _ = self.push_job.send(Some(job));
        }
        out
    }
}

impl<'t, 's, I, F> Drop for DefaultRunnerIterator<'t, 's, I, F>
where
    I: Iterator<Item = (F, &'t TestMeta)>,
    F: (Fn() -> TestStatus) + Send,
{
    fn drop(&mut self) {
        // Workers blocked on `recv` need a stop signal or the scope never ends.
        for _ in 0..self.workers.len() {
            let _ = self.push_job.send(None);
        }
    }
}

impl TestRunner for DefaultRunner {
    fn run<'t, 's, I, F>(
        &self,
        tests: I,
        scope: &'s Scope<'s, 't>,
    ) -> impl Iterator<Item = (&'t TestMeta, TestOutcome)>
    where
        I: ExactSizeIterator<Item = (F, &'t TestMeta)>,
        F: (Fn() -> TestStatus) + Send + 's,
    {
        let worker_count = self.worker_count(tests.len());
        DefaultRunnerIterator::new(worker_count, tests, scope)
    }

    fn worker_count(&self, test_count: usize) -> NonZeroUsize {
        NonZeroUsize::new(cmp::min(self.threads.get(), test_count)).unwrap_or(NonZeroUsize::MIN)
    }
}
