//! Common utilities for integration tests

pub mod fixtures;
pub mod test_helpers;

// Re-export commonly used items
pub use fixtures::{cubic_lattice, linear_chain, water};
pub use test_helpers::{assert_vectors_close, relative_error};
