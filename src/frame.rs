//! Frames mirror the nesting of `describe` blocks.
//!
//! Frames live in an arena owned by the [`Registry`](crate::registry::Registry)
//! and refer to each other by [`FrameId`]. Hooks are kept apart in
//! [`FrameHooks`], which registered tests share, so hooks added after a test
//! was declared still apply to it.

use std::{
    fmt::{self, Debug},
    sync::{Arc, PoisonError, RwLock},
};

use crate::test::Hook;

/// Index of a frame in the registry's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub(crate) usize);

impl FrameId {
    pub const ROOT: FrameId = FrameId(0);
}

/// One `describe` scope.
#[derive(Debug)]
pub struct Frame<C> {
    pub(crate) name: String,
    pub(crate) qualified_name: String,
    pub(crate) parent: Option<FrameId>,
    pub(crate) children: Vec<FrameId>,
    pub(crate) hooks: Arc<FrameHooks>,
    pub(crate) case: C,
}

impl<C> Frame<C> {
    pub(crate) fn root(case: C) -> Self {
        Self {
            name: String::new(),
            qualified_name: String::new(),
            parent: None,
            children: Vec::new(),
            hooks: Arc::new(FrameHooks::default()),
            case,
        }
    }

    pub(crate) fn child_of(parent_id: FrameId, parent: &Frame<C>, name: &str, case: C) -> Self {
        Self {
            name: name.to_string(),
            qualified_name: qualify(&parent.qualified_name, name),
            parent: Some(parent_id),
            children: Vec::new(),
            hooks: FrameHooks::child(&parent.hooks),
            case,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn parent(&self) -> Option<FrameId> {
        self.parent
    }

    pub fn children(&self) -> &[FrameId] {
        &self.children
    }

    pub fn case(&self) -> &C {
        &self.case
    }

    pub fn hooks(&self) -> &FrameHooks {
        &self.hooks
    }
}

/// Join a parent's qualified name with a child name.
pub(crate) fn qualify(parent: &str, name: &str) -> String {
    match parent.is_empty() {
        true => name.to_string(),
        false => format!("{parent} {name}"),
    }
}

/// Before and after hooks of a frame, linked to the hooks of its parent.
#[derive(Default)]
pub struct FrameHooks {
    parent: Option<Arc<FrameHooks>>,
    before: RwLock<Vec<Hook>>,
    after: RwLock<Vec<Hook>>,
}

impl FrameHooks {
    pub(crate) fn child(parent: &Arc<FrameHooks>) -> Arc<Self> {
        Arc::new(Self {
            parent: Some(Arc::clone(parent)),
            ..Default::default()
        })
    }

    pub(crate) fn push_before(&self, hook: Hook) {
        self.before
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(hook);
    }

    pub(crate) fn push_after(&self, hook: Hook) {
        self.after
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(hook);
    }

    /// Hooks to run before a test: outermost frame first, each frame in
    /// registration order.
    pub fn before_chain(&self) -> Vec<Hook> {
        let mut chain = match &self.parent {
            Some(parent) => parent.before_chain(),
            None => Vec::new(),
        };
        chain.extend(
            self.before
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .cloned(),
        );
        chain
    }

    /// Hooks to run after a test: this frame first in registration order, then
    /// the parent chain outwards.
    pub fn after_chain(&self) -> Vec<Hook> {
        let mut chain: Vec<Hook> = self
            .after
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .to_vec();
        if let Some(parent) = &self.parent {
            chain.extend(parent.after_chain());
        }
        chain
    }

    fn counts(&self) -> (usize, usize) {
        (
            self.before
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .len(),
            self.after
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .len(),
        )
    }
}

impl Debug for FrameHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (before, after) = self.counts();
        f.debug_struct("FrameHooks")
            .field("before", &before)
            .field("after", &after)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}
