pub mod error;
pub mod logging;

// Item/Category read model and catalog sources
pub mod catalog;

// Spelling correction, normalization, synonym expansion
pub mod preprocess;

// Candidate filtering, embeddings, ranking and the search entry point
pub mod search;
