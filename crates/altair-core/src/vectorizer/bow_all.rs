//! Bag-of-words over the full document text

use std::path::Path;

use crate::artifact::Vocabulary;
use crate::error::Result;
use crate::kwargs::Kwargs;
use crate::text::tokenize;
use crate::vectorizer::Vectorizer;

/// Counts every vocabulary token in the document
#[derive(Debug)]
pub struct BowAllVectorizer {
    vocab: Vocabulary,
    lowercase: bool,
    binary: bool,
}

impl BowAllVectorizer {
    /// Load the vocabulary artifact and apply `--vectorizer_kwargs`
    /// (`lowercase`, default true; `binary`, default false)
    pub fn new(vocab_path: &Path, mut kwargs: Kwargs) -> Result<Self> {
        let vocab = Vocabulary::load(vocab_path)?;
        let lowercase = kwargs.take_bool("lowercase", true)?;
        let binary = kwargs.take_bool("binary", false)?;
        kwargs.finish(&["lowercase", "binary"])?;
        Ok(Self {
            vocab,
            lowercase,
            binary,
        })
    }
}

impl Vectorizer for BowAllVectorizer {
    fn vectorize(&self, document: &str) -> Result<Vec<f64>> {
        let tokens = tokenize(document, self.lowercase);
        let mut counts = self.vocab.count_tokens(&tokens);
        if self.binary {
            for count in &mut counts {
                if *count > 0.0 {
                    *count = 1.0;
                }
            }
        }
        Ok(counts)
    }

    fn dimensions(&self) -> usize {
        self.vocab.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vocab_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create vocab");
        file.write_all(br#"["numpy", "pandas", "plot"]"#)
            .expect("write vocab");
        file
    }

    #[test]
    fn counts_vocabulary_tokens() {
        let file = vocab_file();
        let vectorizer =
            BowAllVectorizer::new(file.path(), Kwargs::default()).expect("build vectorizer");
        let vector = vectorizer
            .vectorize("numpy plot numpy something")
            .expect("vectorize");
        assert_eq!(vector, vec![2.0, 0.0, 1.0]);
    }

    #[test]
    fn binary_mode_caps_counts_at_one() {
        let file = vocab_file();
        let kwargs = Kwargs::parse(Some("binary=true")).expect("parse kwargs");
        let vectorizer = BowAllVectorizer::new(file.path(), kwargs).expect("build vectorizer");
        let vector = vectorizer.vectorize("numpy numpy numpy").expect("vectorize");
        assert_eq!(vector, vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn lowercase_can_be_disabled() {
        let file = vocab_file();
        let kwargs = Kwargs::parse(Some("lowercase=false")).expect("parse kwargs");
        let vectorizer = BowAllVectorizer::new(file.path(), kwargs).expect("build vectorizer");
        let vector = vectorizer.vectorize("NumPy numpy").expect("vectorize");
        // Only the exact-case token matches
        assert_eq!(vector, vec![1.0, 0.0, 0.0]);
    }
}
