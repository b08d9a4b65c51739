//! The focus gate.
//!
//! Once a focused test (`iit`) is declared, the gate turns on and only focused
//! tests get registered from then on. The gate turns off again when a focused
//! test is actually invoked by the host, so a following declaration pass starts
//! with a clean gate.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared handle to the focus flag.
///
/// Clones share the same flag. The registry keeps one handle and every focused
/// [`Test`](crate::test::Test) keeps another so it can clear the gate when it runs.
#[derive(Debug, Clone, Default)]
pub struct FocusGate(Arc<AtomicBool>);

impl FocusGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Turn the gate on.
    ///
    /// Returns `true` if the gate was off before, which is the moment the
    /// registry has to purge every registered entry.
    pub fn activate(&self) -> bool {
        let was_active = self.0.swap(true, Ordering::SeqCst);
        if !was_active {
            tracing::debug!("focus mode activated");
        }
        !was_active
    }

    pub fn clear(&self) {
        if self.0.swap(false, Ordering::SeqCst) {
            tracing::debug!("focus mode cleared");
        }
    }
}
