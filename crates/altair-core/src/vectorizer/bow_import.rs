//! Bag-of-words over imported library names only
//!
//! Instead of the full document text, only the base names of imported
//! libraries are counted, against a library-name vocabulary fitted
//! offline. Two scripts that import the same stack look alike even when
//! their bodies share no tokens.

use std::path::Path;

use crate::artifact::Vocabulary;
use crate::error::Result;
use crate::kwargs::Kwargs;
use crate::text::extract_imports;
use crate::vectorizer::Vectorizer;

#[derive(Debug)]
pub struct BowImportVectorizer {
    vocab: Vocabulary,
    lowercase: bool,
}

impl BowImportVectorizer {
    /// Load the library-name vocabulary and apply `--vectorizer_kwargs`
    /// (`lowercase`, default true)
    pub fn new(libraries_path: &Path, mut kwargs: Kwargs) -> Result<Self> {
        let vocab = Vocabulary::load(libraries_path)?;
        let lowercase = kwargs.take_bool("lowercase", true)?;
        kwargs.finish(&["lowercase"])?;
        Ok(Self { vocab, lowercase })
    }
}

impl Vectorizer for BowImportVectorizer {
    fn vectorize(&self, document: &str) -> Result<Vec<f64>> {
        let libraries: Vec<String> = extract_imports(document)
            .into_iter()
            .map(|lib| {
                if self.lowercase {
                    lib.to_lowercase()
                } else {
                    lib
                }
            })
            .collect();
        Ok(self.vocab.count_tokens(&libraries))
    }

    fn dimensions(&self) -> usize {
        self.vocab.len()
    }
}
