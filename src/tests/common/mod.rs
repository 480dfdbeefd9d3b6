//! Common Test Utilities
//!
//! Shared fixtures used across test modules: the reference pharmacy catalog,
//! a small lemmatizer vocabulary and search handles over the fixture
//! language resources.

pub mod fixtures;

pub use fixtures::*;
