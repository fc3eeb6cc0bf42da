//! Common test utilities for hikr-dl integration tests

#[allow(dead_code)]
pub mod fixtures;
#[allow(dead_code)]
pub mod workspace;

#[allow(unused_imports)]
pub use fixtures::*;
pub use workspace::*;
