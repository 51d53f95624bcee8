//! Integration test entry point.

mod determinism_tests;
mod invariant_tests;
