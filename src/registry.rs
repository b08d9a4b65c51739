//! The frame registry and focus gate.
//!
//! A [`Registry`] turns nested `describe`/`it` declarations into flat test
//! containers, one per frame. Declarations go through the [`Declare`] trait:
//!
//! - [`describe`](Declare::describe) opens a child frame for the duration of its body
//! - [`it`](Declare::it) registers an ordinary test in the current frame
//! - [`iit`](Declare::iit) registers a focused test and switches focus mode on
//! - [`xit`](Declare::xit) declares a disabled test, which registers nothing
//! - [`before_each`](Declare::before_each) and [`after_each`](Declare::after_each)
//!   attach hooks to the current frame
//!
//! In focus mode only focused tests are registered. Switching it on removes all
//! tests registered so far. Focus mode is switched off again by the first
//! focused test that runs.

use std::{fmt, panic::RefUnwindSafe, sync::Arc};

use crate::{
    case::{DefaultTestCaseFactory, TestCase, TestCaseFactory},
    error::{AssertionFailure, DeclareError},
    expect::{self, AssertionResult},
    frame::{Frame, FrameId, qualify},
    gate::FocusGate,
    test::{Test, TestFnHandle, TestMeta, TestResult},
};

const ENTRY_PREFIX: &str = "test that it ";

/// Entry name generated for a test description.
pub fn entry_name(description: &str) -> String {
    format!("{ENTRY_PREFIX}{description}")
}

/// What happened to a test declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declared {
    /// The test was added to the container of `case` under `name`.
    Registered { case: String, name: String },
    /// Focus mode is on and the test is not focused.
    Suppressed,
    /// The test was declared with `xit`.
    Disabled,
}

impl Declared {
    pub fn is_registered(&self) -> bool {
        matches!(self, Declared::Registered { .. })
    }
}

/// The declaration surface of a spec file.
pub trait Declare {
    /// Declare a group. The body runs right away with the new frame as the
    /// current frame.
    fn describe<R, B>(&mut self, name: &str, body: B) -> Result<R, DeclareError>
    where
        B: FnOnce(&mut Self) -> Result<R, DeclareError>;

    /// Declare an ordinary test.
    fn it<F, T>(&mut self, description: &str, body: F) -> Result<Declared, DeclareError>
    where
        F: Fn() -> T + Send + Sync + RefUnwindSafe + 'static,
        T: Into<TestResult>;

    /// Declare a focused test.
    fn iit<F, T>(&mut self, description: &str, body: F) -> Result<Declared, DeclareError>
    where
        F: Fn() -> T + Send + Sync + RefUnwindSafe + 'static,
        T: Into<TestResult>;

    /// Declare a disabled test.
    fn xit<F, T>(&mut self, description: &str, body: F) -> Declared
    where
        F: Fn() -> T + Send + Sync + RefUnwindSafe + 'static,
        T: Into<TestResult>;

    fn before_each<H, T>(&mut self, hook: H)
    where
        H: Fn() -> T + Send + Sync + RefUnwindSafe + 'static,
        T: Into<TestResult>;

    fn after_each<H, T>(&mut self, hook: H)
    where
        H: Fn() -> T + Send + Sync + RefUnwindSafe + 'static,
        T: Into<TestResult>;

    /// Escalate a failing assertion result.
    fn observe_result(&self, result: &AssertionResult) -> Result<(), AssertionFailure> {
        expect::observe_result(result)
    }
}

/// Owner of the frame tree and the focus gate.
///
/// A registry starts with a single unnamed root frame. Use [`reset`](Self::reset)
/// to start a new declaration pass from scratch.
pub struct Registry<Factory: TestCaseFactory = DefaultTestCaseFactory> {
    factory: Factory,
    frames: Vec<Frame<Factory::Case>>,
    current: FrameId,
    gate: FocusGate,
}

impl<Factory: TestCaseFactory> fmt::Debug for Registry<Factory> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("frames", &self.frames.len())
            .field("current", &self.current)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

impl Default for Registry<DefaultTestCaseFactory> {
    fn default() -> Self {
        Self::with_factory(DefaultTestCaseFactory)
    }
}

impl Registry<DefaultTestCaseFactory> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<Factory: TestCaseFactory> Registry<Factory> {
    pub fn with_factory(factory: Factory) -> Self {
        let root = Frame::root(factory.create(""));
        Self {
            factory,
            frames: vec![root],
            current: FrameId::ROOT,
            gate: FocusGate::new(),
        }
    }

    /// Drop every frame but a fresh root and switch focus mode off.
    pub fn reset(&mut self) {
        self.frames = vec![Frame::root(self.factory.create(""))];
        self.current = FrameId::ROOT;
        self.gate.clear();
        tracing::debug!("registry reset");
    }

    pub fn is_focused(&self) -> bool {
        self.gate.is_active()
    }

    pub fn gate(&self) -> &FocusGate {
        &self.gate
    }

    pub fn root(&self) -> &Frame<Factory::Case> {
        &self.frames[FrameId::ROOT.0]
    }

    pub fn current(&self) -> FrameId {
        self.current
    }

    pub fn frame(&self, id: FrameId) -> Option<&Frame<Factory::Case>> {
        self.frames.get(id.0)
    }

    /// Frame ids in declaration order, parents before children.
    pub fn frame_ids(&self) -> Vec<FrameId> {
        let mut ids = Vec::with_capacity(self.frames.len());
        let mut stack = vec![FrameId::ROOT];
        while let Some(id) = stack.pop() {
            ids.push(id);
            stack.extend(self.frames[id.0].children.iter().rev().copied());
        }
        ids
    }

    /// Every frame's container, parents before children.
    pub fn cases(&self) -> impl Iterator<Item = &Factory::Case> {
        self.frame_ids()
            .into_iter()
            .map(|id| &self.frames[id.0].case)
    }

    /// Every registered test, parents before children.
    pub fn tests(&self) -> impl Iterator<Item = &Test> {
        self.cases().flat_map(|case| case.tests())
    }

    /// `(case, entry)` name pairs of every registered test.
    pub fn entry_names(&self) -> Vec<(&str, &str)> {
        self.tests()
            .map(|test| (test.case.as_str(), test.name.as_str()))
            .collect()
    }

    fn current_frame_mut(&mut self) -> &mut Frame<Factory::Case> {
        &mut self.frames[self.current.0]
    }

    fn push_frame(&mut self, name: &str) -> FrameId {
        let id = FrameId(self.frames.len());
        let parent = &self.frames[self.current.0];
        let case = self.factory.create(&qualify(&parent.qualified_name, name));
        let frame = Frame::child_of(self.current, parent, name, case);
        tracing::debug!(frame = %frame.qualified_name, "opened frame");
        self.frames.push(frame);
        self.frames[self.current.0].children.push(id);
        self.current = id;
        id
    }

    fn pop_frame(&mut self) {
        if let Some(parent) = self.frames[self.current.0].parent {
            self.current = parent;
        }
    }

    /// Remove every registered test from every frame.
    fn silence_existing_tests(&mut self) {
        let mut silenced = 0;
        for id in self.frame_ids() {
            let case = &mut self.frames[id.0].case;
            silenced += case.len();
            case.clear();
        }
        tracing::debug!(silenced, "silenced existing specs for focus mode");
    }

    fn register<F, T>(
        &mut self,
        description: &str,
        body: F,
        focused: bool,
    ) -> Result<Declared, DeclareError>
    where
        F: Fn() -> T + Send + Sync + RefUnwindSafe + 'static,
        T: Into<TestResult>,
    {
        let name = entry_name(description);
        let gate = focused.then(|| self.gate.clone());
        let frame = self.current_frame_mut();
        if frame.case.contains(&name) {
            return Err(DeclareError::DuplicateSpec {
                description: description.to_string(),
                case: frame.qualified_name.clone(),
            });
        }

        let case = frame.qualified_name.clone();
        let test = Test::new(
            TestFnHandle::from_boxed(body),
            Arc::clone(&frame.hooks),
            gate,
            TestMeta::new(case.clone(), name.clone(), focused),
        );
        frame.case.insert(test);
        tracing::debug!(case = %case, entry = %name, focused, "registered spec");

        Ok(Declared::Registered { case, name })
    }
}

impl<Factory: TestCaseFactory> Declare for Registry<Factory> {
    fn describe<R, B>(&mut self, name: &str, body: B) -> Result<R, DeclareError>
    where
        B: FnOnce(&mut Self) -> Result<R, DeclareError>,
    {
        self.push_frame(name);
        let result = body(self);
        self.pop_frame();
        result
    }

    fn it<F, T>(&mut self, description: &str, body: F) -> Result<Declared, DeclareError>
    where
        F: Fn() -> T + Send + Sync + RefUnwindSafe + 'static,
        T: Into<TestResult>,
    {
        if self.gate.is_active() {
            tracing::debug!(description, "suppressed spec in focus mode");
            return Ok(Declared::Suppressed);
        }
        self.register(description, body, false)
    }

    fn iit<F, T>(&mut self, description: &str, body: F) -> Result<Declared, DeclareError>
    where
        F: Fn() -> T + Send + Sync + RefUnwindSafe + 'static,
        T: Into<TestResult>,
    {
        if self.gate.activate() {
            self.silence_existing_tests();
        }
        self.register(description, body, true)
    }

    fn xit<F, T>(&mut self, description: &str, _body: F) -> Declared
    where
        F: Fn() -> T + Send + Sync + RefUnwindSafe + 'static,
        T: Into<TestResult>,
    {
        tracing::debug!(description, "disabled spec");
        Declared::Disabled
    }

    fn before_each<H, T>(&mut self, hook: H)
    where
        H: Fn() -> T + Send + Sync + RefUnwindSafe + 'static,
        T: Into<TestResult>,
    {
        self.current_frame_mut().hooks.push_before(Arc::new(hook));
    }

    fn after_each<H, T>(&mut self, hook: H)
    where
        H: Fn() -> T + Send + Sync + RefUnwindSafe + 'static,
        T: Into<TestResult>,
    {
        self.current_frame_mut().hooks.push_after(Arc::new(hook));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::expect::expect_eq;

    type Log = Arc<Mutex<Vec<String>>>;

    fn push(log: &Log, label: &str) -> impl Fn() + Send + Sync + RefUnwindSafe + 'static {
        let log = Arc::clone(log);
        let label = label.to_string();
        move || log.lock().unwrap().push(label.clone())
    }

    fn names(registry: &Registry) -> Vec<String> {
        registry
            .tests()
            .map(|test| test.full_name().to_string())
            .collect()
    }

    fn find<'r>(registry: &'r Registry, full_name: &str) -> &'r Test {
        registry
            .tests()
            .find(|test| test.full_name() == full_name)
            .unwrap()
    }

    #[test]
    fn root_frame_is_unnamed() {
        let registry = Registry::new();
        let root = registry.root();
        assert_eq!(root.name(), "");
        assert_eq!(root.qualified_name(), "");
        assert_eq!(root.parent(), None);
        assert_eq!(registry.current(), FrameId::ROOT);
    }

    #[test]
    fn nested_groups_build_qualified_names() {
        let mut registry = Registry::new();
        registry
            .describe("outer", |r| {
                r.it("works", || ())?;
                r.describe("inner", |r| r.it("works too", || ()))?;
                r.describe("empty", |_| Ok(()))
            })
            .unwrap();
        registry.it("runs at root", || ()).unwrap();

        assert_eq!(
            names(&registry),
            [
                "test that it runs at root",
                "outer::test that it works",
                "outer inner::test that it works too",
            ]
        );

        let case_names: Vec<_> = registry.cases().map(|case| case.name()).collect();
        assert_eq!(case_names, ["", "outer", "outer inner", "outer empty"]);
        assert_eq!(registry.current(), FrameId::ROOT);
    }

    #[test]
    fn duplicate_in_same_frame_fails() {
        let mut registry = Registry::new();
        let err = registry
            .describe("group", |r| {
                r.it("does a thing", || ())?;
                r.it("does a thing", || ())
            })
            .unwrap_err();

        assert_eq!(
            err,
            DeclareError::DuplicateSpec {
                description: "does a thing".to_string(),
                case: "group".to_string(),
            }
        );
        assert_eq!(err.to_string(), "Spec with name 'does a thing' already exists.");
        assert_eq!(registry.current(), FrameId::ROOT);
    }

    #[test]
    fn same_description_in_different_frames_is_fine() {
        let mut registry = Registry::new();
        registry
            .describe("first", |r| r.it("does a thing", || ()))
            .unwrap();
        registry
            .describe("second", |r| r.it("does a thing", || ()))
            .unwrap();
        assert_eq!(registry.tests().count(), 2);
    }

    #[test]
    fn focus_purges_and_suppresses() {
        let mut registry = Registry::new();
        registry.describe("G1", |r| r.it("a", || ())).unwrap();
        let declared = registry
            .describe("G2", |r| {
                let b = r.iit("b", || ())?;
                let c = r.it("c", || ())?;
                Ok((b, c))
            })
            .unwrap();

        assert!(declared.0.is_registered());
        assert_eq!(declared.1, Declared::Suppressed);
        assert_eq!(names(&registry), ["G2::test that it b"]);
        assert!(registry.is_focused());
        assert_eq!(registry.frame_ids().len(), 3);
    }

    #[test]
    fn only_the_first_focused_test_purges() {
        let mut registry = Registry::new();
        registry.it("early", || ()).unwrap();
        registry.iit("first focus", || ()).unwrap();
        registry.iit("second focus", || ()).unwrap();
        assert_eq!(
            names(&registry),
            ["test that it first focus", "test that it second focus"]
        );
    }

    #[test]
    fn gate_turned_on_elsewhere_skips_purge() {
        let mut registry = Registry::new();
        registry.it("kept", || ()).unwrap();
        assert!(registry.gate().activate());

        registry.iit("focused", || ()).unwrap();
        assert_eq!(
            names(&registry),
            ["test that it kept", "test that it focused"]
        );
    }

    #[test]
    fn focused_tests_are_not_suppressed() {
        let mut registry = Registry::new();
        registry.iit("one", || ()).unwrap();
        registry.describe("group", |r| r.iit("two", || ())).unwrap();
        assert_eq!(
            names(&registry),
            ["test that it one", "group::test that it two"]
        );
    }

    #[test]
    fn running_focused_test_clears_gate() {
        let mut registry = Registry::new();
        registry.describe("focus", |r| r.iit("x", || ())).unwrap();
        assert!(registry.is_focused());

        find(&registry, "focus::test that it x").call().0.unwrap();
        assert!(!registry.is_focused());

        let declared = registry.describe("fresh", |r| r.it("y", || ())).unwrap();
        assert!(declared.is_registered());
        assert_eq!(find(&registry, "fresh::test that it y").call().0, Ok(()));
    }

    #[test]
    fn disabled_tests_register_nothing() {
        let mut registry = Registry::new();
        assert_eq!(registry.xit("skipped", || ()), Declared::Disabled);
        assert_eq!(registry.tests().count(), 0);
        assert!(!registry.is_focused());
    }

    #[test]
    fn hooks_wrap_tests_in_frame_order() {
        let log = Log::default();
        let mut registry = Registry::new();
        registry.before_each(push(&log, "root before"));
        registry.after_each(push(&log, "root after"));
        registry
            .describe("outer", |r| {
                r.before_each(push(&log, "outer before"));
                r.after_each(push(&log, "outer after"));
                r.describe("inner", |r| {
                    r.before_each(push(&log, "inner before"));
                    r.after_each(push(&log, "inner after 1"));
                    r.after_each(push(&log, "inner after 2"));
                    r.it("runs", push(&log, "body"))
                })
            })
            .unwrap();

        find(&registry, "outer inner::test that it runs")
            .call()
            .0
            .unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            [
                "root before",
                "outer before",
                "inner before",
                "body",
                "inner after 1",
                "inner after 2",
                "outer after",
                "root after",
            ]
        );
    }

    #[test]
    fn hooks_declared_later_still_apply() {
        let log = Log::default();
        let mut registry = Registry::new();
        registry
            .describe("group", |r| {
                r.it("runs", push(&log, "body"))?;
                r.before_each(push(&log, "late before"));
                r.after_each(push(&log, "late after"));
                Ok(())
            })
            .unwrap();

        find(&registry, "group::test that it runs").call().0.unwrap();
        assert_eq!(*log.lock().unwrap(), ["late before", "body", "late after"]);
    }

    #[test]
    fn sibling_hooks_do_not_leak() {
        let log = Log::default();
        let mut registry = Registry::new();
        registry
            .describe("first", |r| {
                r.before_each(push(&log, "first before"));
                Ok(())
            })
            .unwrap();
        registry
            .describe("second", |r| r.it("runs", push(&log, "body")))
            .unwrap();

        find(&registry, "second::test that it runs").call().0.unwrap();
        assert_eq!(*log.lock().unwrap(), ["body"]);
    }

    #[test]
    fn observed_failure_fails_test() {
        let mut registry = Registry::new();
        registry
            .it("compares", || {
                expect::observe_result(&expect_eq(1 + 1, 3))?;
                Ok::<(), AssertionFailure>(())
            })
            .unwrap();

        let result = find(&registry, "test that it compares").call();
        assert!(result.0.unwrap_err().contains("Expected 2 to equal 3."));
    }

    #[test]
    fn reset_starts_over() {
        let mut registry = Registry::new();
        registry.describe("group", |r| r.iit("focused", || ())).unwrap();
        registry.reset();

        assert!(!registry.is_focused());
        assert_eq!(registry.tests().count(), 0);
        assert_eq!(registry.frame_ids(), [FrameId::ROOT]);
    }
}
