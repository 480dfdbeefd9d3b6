//! Search Flow Unit Tests
//!
//! End-to-end searches over in-memory catalogs using the fixture language
//! resources.

mod catalog_search_tests;
