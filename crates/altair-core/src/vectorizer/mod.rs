//! Pluggable document vectorizers
//!
//! One implementation per vectorization method. Every vectorizer loads
//! its fitted artifact at construction and is read-only afterwards, so a
//! `&dyn Vectorizer` can be shared freely once built.

mod bow_all;
mod bow_import;
mod doc2vec;
mod lda;
mod tfidf;

pub use bow_all::BowAllVectorizer;
pub use bow_import::BowImportVectorizer;
pub use doc2vec::Doc2VecVectorizer;
pub use lda::LdaVectorizer;
pub use tfidf::TfidfVectorizer;

use crate::error::Result;
use crate::matrix::FeatureMatrix;

/// A document-to-vector transform backed by a pre-fitted model.
///
/// `vectorize_multi` must produce exactly the rows that mapping
/// `vectorize` over the documents would, in the same order; the default
/// implementation does precisely that.
pub trait Vectorizer: Send + Sync {
    /// Transform one document into a feature vector
    fn vectorize(&self, document: &str) -> Result<Vec<f64>>;

    /// Transform a batch of documents into a feature matrix, one row per
    /// document in input order
    fn vectorize_multi(&self, documents: &[&str]) -> Result<FeatureMatrix> {
        let rows = documents
            .iter()
            .map(|doc| self.vectorize(doc))
            .collect::<Result<Vec<_>>>()?;
        FeatureMatrix::from_rows(rows)
    }

    /// Width of the vectors this vectorizer produces
    fn dimensions(&self) -> usize;
}
