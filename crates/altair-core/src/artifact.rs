//! Fitted model artifacts
//!
//! The pipeline never trains anything; every vectorizer loads a
//! pre-fitted artifact from disk at construction time. All artifacts are
//! JSON: a vocabulary (bare term array, or an object carrying offline
//! document-frequency statistics), an LDA topic-word matrix, or a Doc2Vec
//! embedding table. A missing or corrupt artifact fails construction;
//! there is no partial vectorizer.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{AltairError, Result};

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|source| AltairError::ArtifactRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| AltairError::ArtifactInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// On-disk vocabulary: either a bare ordered term list, or an object with
/// offline-fitted document frequencies for IDF weighting
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum VocabularyFile {
    Terms(Vec<String>),
    WithStats {
        terms: Vec<String>,
        #[serde(default)]
        doc_freq: Option<Vec<u64>>,
        #[serde(default)]
        doc_count: Option<u64>,
    },
}

/// An ordered vocabulary. Term order defines the feature columns, so it
/// must match the order the model was fitted with.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
    doc_freq: Option<Vec<u64>>,
    doc_count: Option<u64>,
}

impl Vocabulary {
    /// Load a vocabulary artifact from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let (terms, doc_freq, doc_count) = match load_json::<VocabularyFile>(path)? {
            VocabularyFile::Terms(terms) => (terms, None, None),
            VocabularyFile::WithStats {
                terms,
                doc_freq,
                doc_count,
            } => (terms, doc_freq, doc_count),
        };

        if terms.is_empty() {
            return Err(AltairError::ArtifactInvalid {
                path: path.to_path_buf(),
                reason: "vocabulary is empty".to_string(),
            });
        }
        if let Some(df) = &doc_freq {
            if df.len() != terms.len() {
                return Err(AltairError::ArtifactInvalid {
                    path: path.to_path_buf(),
                    reason: format!(
                        "doc_freq has {} entries for {} terms",
                        df.len(),
                        terms.len()
                    ),
                });
            }
        }

        let mut index = HashMap::with_capacity(terms.len());
        for (i, term) in terms.iter().enumerate() {
            if index.insert(term.clone(), i).is_some() {
                return Err(AltairError::ArtifactInvalid {
                    path: path.to_path_buf(),
                    reason: format!("duplicate term {:?}", term),
                });
            }
        }

        debug!(terms = terms.len(), path = %path.display(), "vocabulary_loaded");
        Ok(Self {
            terms,
            index,
            doc_freq,
            doc_count,
        })
    }

    /// Number of terms, which is also the feature-vector width
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Column index of a term, if it is in the vocabulary
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Count vocabulary terms in a token stream into a dense vector
    pub fn count_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<f64> {
        let mut counts = vec![0.0; self.terms.len()];
        for token in tokens {
            if let Some(idx) = self.index_of(token.as_ref()) {
                counts[idx] += 1.0;
            }
        }
        counts
    }

    /// Offline-fitted document frequency per term, if the artifact carries one
    pub fn doc_freq(&self) -> Option<&[u64]> {
        self.doc_freq.as_deref()
    }

    /// Offline-fitted corpus size, if the artifact carries one
    pub fn doc_count(&self) -> Option<u64> {
        self.doc_count
    }
}

/// A fitted LDA model: one word distribution per topic, over the columns
/// of a companion vocabulary
#[derive(Debug, Deserialize)]
pub struct LdaModel {
    /// Topic-word weight matrix, `num_topics` rows of vocabulary width
    pub topics: Vec<Vec<f64>>,
}

impl LdaModel {
    pub fn load(path: &Path, vocab_len: usize) -> Result<Self> {
        let model: LdaModel = load_json(path)?;
        if model.topics.is_empty() {
            return Err(AltairError::ArtifactInvalid {
                path: path.to_path_buf(),
                reason: "model has no topics".to_string(),
            });
        }
        for (i, topic) in model.topics.iter().enumerate() {
            if topic.len() != vocab_len {
                return Err(AltairError::ArtifactInvalid {
                    path: path.to_path_buf(),
                    reason: format!(
                        "topic {} has {} weights for a vocabulary of {}",
                        i,
                        topic.len(),
                        vocab_len
                    ),
                });
            }
        }
        debug!(topics = model.topics.len(), path = %path.display(), "lda_model_loaded");
        Ok(model)
    }

    pub fn num_topics(&self) -> usize {
        self.topics.len()
    }
}

/// A fitted Doc2Vec model: per-word embeddings plus the dimensionality of
/// inferred document vectors
#[derive(Debug, Deserialize)]
pub struct Doc2VecModel {
    /// Embedding dimensionality
    pub dim: usize,
    /// Word embedding table
    pub vectors: HashMap<String, Vec<f64>>,
}

impl Doc2VecModel {
    pub fn load(path: &Path) -> Result<Self> {
        let model: Doc2VecModel = load_json(path)?;
        if model.dim == 0 {
            return Err(AltairError::ArtifactInvalid {
                path: path.to_path_buf(),
                reason: "embedding dimension is zero".to_string(),
            });
        }
        for (word, vector) in &model.vectors {
            if vector.len() != model.dim {
                return Err(AltairError::ArtifactInvalid {
                    path: path.to_path_buf(),
                    reason: format!(
                        "vector for {:?} has {} components, expected {}",
                        word,
                        vector.len(),
                        model.dim
                    ),
                });
            }
        }
        debug!(
            words = model.vectors.len(),
            dim = model.dim,
            path = %path.display(),
            "doc2vec_model_loaded"
        );
        Ok(model)
    }
}
