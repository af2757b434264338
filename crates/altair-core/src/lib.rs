//! Altair Core Library
//!
//! Evaluation pipeline for document-vectorization methods: load a
//! labeled corpus, vectorize it with a pre-fitted model, score every
//! document's nearest neighbors by cosine similarity in parallel, and
//! aggregate top-1/top-N accuracy metrics.

pub mod artifact;
pub mod corpus;
pub mod error;
pub mod kwargs;
pub mod logging;
pub mod matrix;
pub mod pipeline;
pub mod scoring;
pub mod text;
pub mod vectorizer;
