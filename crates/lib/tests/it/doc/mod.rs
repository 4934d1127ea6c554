//! Document model integration tests
//!
//! Organized by operation family for better maintainability.

mod copy_compare;
mod merge;
mod paths;
