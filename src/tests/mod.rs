//! In-crate test suites
//!
//! - `common`: shared catalog and language-resource fixtures
//! - `unit`: search flows over the in-memory catalog
//! - `property`: proptest invariants for normalization, filtering and ranking

pub(crate) mod common;
mod property;
mod unit;
