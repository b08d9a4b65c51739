//! Helpers shared by formatter implementations.

pub mod color;
