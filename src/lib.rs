//! Nested `describe`/`it` specs, run as flat test cases.
//!
//! Specs are declared against a [`Registry`](registry::Registry) through the
//! [`Declare`](registry::Declare) trait. Each `describe` block becomes a frame
//! with its own test container, each `it` becomes a named entry
//! `"test that it <description>"` in the container of the enclosing frame.
//! Entries run the `before_each` hooks of all enclosing frames, the test body
//! and the `after_each` hooks.
//!
//! Declaring a focused test with [`iit`](registry::Declare::iit) switches the
//! registry into focus mode: every test registered so far is dropped and
//! ordinary tests declared afterwards are ignored. The first focused test that
//! runs switches focus mode off again.
//!
//! ```
//! use kispec::prelude::*;
//!
//! let mut registry = Registry::new();
//! registry
//!     .describe("a stack", |r| {
//!         r.it("starts empty", || assert!(Vec::<u8>::new().is_empty()))?;
//!         r.describe("after a push", |r| {
//!             r.it("has one element", || assert_eq!(vec![1].len(), 1))
//!         })?;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let report = kispec::harness(&registry).run();
//! assert_eq!(report.failed(), 0);
//! ```

pub mod case;
pub mod error;
pub mod expect;
pub mod formatter;
pub mod frame;
pub mod gate;
pub mod outcome;
pub mod registry;

mod strategy;
pub use strategy::*;

mod harness;
pub use harness::*;

mod report;
pub use report::*;

#[cfg(test)]
pub(crate) mod test_support;

pub mod prelude {
    pub use crate::{
        TestReport,
        case::{DefaultTestCase, TestCase, TestCaseFactory},
        error::{AssertionFailure, DeclareError},
        expect::{AssertionResult, ResultKind, Results, expect_eq, expect_true, message},
        filter::{DefaultFilter, TestFilter},
        outcome::{TestFailure, TestOutcome, TestStatus},
        panic::{DefaultPanicHandler, TestPanicHandler},
        registry::{Declare, Declared, Registry},
        runner::{DefaultRunner, SimpleRunner, TestRunner},
        test::{Test, TestMeta, TestResult},
    };
}
