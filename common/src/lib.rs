pub mod config;

/// Common utilities shared across the return prediction service
///
/// This crate provides shared functionality used by the service crates,
/// including:
///
/// - Configuration loading
/// - Shared test utilities and request helpers

// Test helpers module - available for both development and test builds
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

// Re-export commonly used test utilities for easier access
#[cfg(any(test, feature = "test-helpers"))]
pub use test_helpers::{TestError, TestResult};
