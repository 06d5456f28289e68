//! Common test utilities for littoral.
//!
//! This module provides shared utilities for testing the littoral pipeline.

// Re-export all common test utilities
pub mod assertions;
pub mod test_data;
