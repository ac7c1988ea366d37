//! Shared test utilities for podcatalog integration tests.
//!
//! This module provides:
//! - `TestHarness` for isolated export runs against a temporary store
//! - Builder patterns for creating source rows programmatically
//! - `ScriptedClient` for crawls without network access

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::{ScriptedClient, TestHarness};
