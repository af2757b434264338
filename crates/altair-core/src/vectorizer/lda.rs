//! LDA topic-distribution vectorizer
//!
//! Counts vocabulary terms, then folds the counts into the fitted
//! topic-word matrix with a fixed-point expectation step. The feature
//! vector is the normalized document-topic distribution, so its width is
//! the number of topics, not the vocabulary size. The fold-in is fully
//! deterministic: uniform initialization, no sampling.

use std::path::Path;

use crate::artifact::{LdaModel, Vocabulary};
use crate::error::Result;
use crate::kwargs::Kwargs;
use crate::text::tokenize;
use crate::vectorizer::Vectorizer;

const DEFAULT_MAX_ITER: usize = 10;

#[derive(Debug)]
pub struct LdaVectorizer {
    vocab: Vocabulary,
    model: LdaModel,
    lowercase: bool,
    max_iter: usize,
}

impl LdaVectorizer {
    /// Load the vocabulary and topic-model artifacts and apply
    /// `--vectorizer_kwargs` (`lowercase`, default true; `max_iter`,
    /// default 10)
    pub fn new(vocab_path: &Path, model_path: &Path, mut kwargs: Kwargs) -> Result<Self> {
        let vocab = Vocabulary::load(vocab_path)?;
        let model = LdaModel::load(model_path, vocab.len())?;
        let lowercase = kwargs.take_bool("lowercase", true)?;
        let max_iter = kwargs.take_usize("max_iter", DEFAULT_MAX_ITER)?;
        kwargs.finish(&["lowercase", "max_iter"])?;
        Ok(Self {
            vocab,
            model,
            lowercase,
            max_iter,
        })
    }

    /// Fixed-point E-step: start from a uniform topic mix and repeatedly
    /// redistribute each term's count across topics in proportion to
    /// `topic_weight * current_mix`
    fn fold_in(&self, counts: &[f64]) -> Vec<f64> {
        let k = self.model.num_topics();
        let total: f64 = counts.iter().sum();
        if total == 0.0 {
            // No vocabulary terms present: uniform distribution
            return vec![1.0 / k as f64; k];
        }

        let mut gamma = vec![1.0 / k as f64; k];
        for _ in 0..self.max_iter {
            let mut next = vec![0.0; k];
            for (w, &count) in counts.iter().enumerate() {
                if count == 0.0 {
                    continue;
                }
                let mut resp: Vec<f64> = (0..k)
                    .map(|t| self.model.topics[t][w] * gamma[t])
                    .collect();
                let denom: f64 = resp.iter().sum();
                if denom <= f64::EPSILON {
                    continue;
                }
                for r in &mut resp {
                    *r /= denom;
                }
                for (t, r) in resp.iter().enumerate() {
                    next[t] += count * r;
                }
            }
            let sum: f64 = next.iter().sum();
            if sum <= f64::EPSILON {
                break;
            }
            for value in &mut next {
                *value /= sum;
            }
            gamma = next;
        }
        gamma
    }
}

impl Vectorizer for LdaVectorizer {
    fn vectorize(&self, document: &str) -> Result<Vec<f64>> {
        let tokens = tokenize(document, self.lowercase);
        let counts = self.vocab.count_tokens(&tokens);
        Ok(self.fold_in(&counts))
    }

    fn dimensions(&self) -> usize {
        self.model.num_topics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn artifacts() -> (tempfile::NamedTempFile, tempfile::NamedTempFile) {
        let mut vocab = tempfile::NamedTempFile::new().expect("create vocab");
        vocab
            .write_all(br#"["regression", "tree", "neural", "layer"]"#)
            .expect("write vocab");

        // Topic 0 is about regression/trees, topic 1 about neural nets
        let mut model = tempfile::NamedTempFile::new().expect("create model");
        model
            .write_all(br#"{"topics": [[0.6, 0.35, 0.03, 0.02], [0.02, 0.03, 0.55, 0.4]]}"#)
            .expect("write model");
        (vocab, model)
    }

    #[test]
    fn produces_a_topic_distribution() {
        let (vocab, model) = artifacts();
        let vectorizer = LdaVectorizer::new(vocab.path(), model.path(), Kwargs::default())
            .expect("build vectorizer");
        assert_eq!(vectorizer.dimensions(), 2);

        let vector = vectorizer
            .vectorize("regression tree regression")
            .expect("vectorize");
        let sum: f64 = vector.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(vector[0] > vector[1]);
    }

    #[test]
    fn topic_assignment_follows_term_usage() {
        let (vocab, model) = artifacts();
        let vectorizer = LdaVectorizer::new(vocab.path(), model.path(), Kwargs::default())
            .expect("build vectorizer");
        let neural = vectorizer.vectorize("neural layer layer").expect("vectorize");
        assert!(neural[1] > neural[0]);
    }

    #[test]
    fn document_without_vocabulary_terms_is_uniform() {
        let (vocab, model) = artifacts();
        let vectorizer = LdaVectorizer::new(vocab.path(), model.path(), Kwargs::default())
            .expect("build vectorizer");
        let vector = vectorizer.vectorize("nothing matches here").expect("vectorize");
        assert_eq!(vector, vec![0.5, 0.5]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let (vocab, model) = artifacts();
        let vectorizer = LdaVectorizer::new(vocab.path(), model.path(), Kwargs::default())
            .expect("build vectorizer");
        let first = vectorizer.vectorize("regression neural").expect("vectorize");
        let second = vectorizer.vectorize("regression neural").expect("vectorize");
        assert_eq!(first, second);
    }
}
