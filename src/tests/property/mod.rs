//! Property-based tests for the search pipeline
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Test Modules
//!
//! - `normalize_props`: query normalization
//!   - Output is lowercase, alphabetic and stopword-free
//!   - Normalizing twice changes nothing
//!
//! - `filter_props`: candidate filtering
//!   - Result is a subsequence of the catalog, in catalog order
//!   - Exactly the matching items are kept
//!
//! - `ranking_props`: semantic ranking
//!   - Result is a permutation of the candidates
//!   - Scores never increase
//!   - Equal scores keep candidate order
//!   - Same query returns same order
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable.

mod filter_props;
mod normalize_props;
mod ranking_props;
