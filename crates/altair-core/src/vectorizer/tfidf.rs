//! TF-IDF weighted bag of words
//!
//! IDF weights come entirely from the artifact: a vocabulary fitted
//! offline together with per-term document frequencies. Nothing is
//! fitted at transform time, so batch and single-document transforms are
//! identical by construction. A bare term-list artifact carries no
//! frequencies and degrades to normalized term counts (idf = 1).

use std::path::Path;

use crate::artifact::Vocabulary;
use crate::error::{AltairError, Result};
use crate::kwargs::Kwargs;
use crate::text::tokenize;
use crate::vectorizer::Vectorizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Norm {
    L1,
    L2,
    None,
}

#[derive(Debug)]
pub struct TfidfVectorizer {
    vocab: Vocabulary,
    lowercase: bool,
    sublinear_tf: bool,
    norm: Norm,
    /// Per-term IDF weights, precomputed at construction
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Load the vocabulary artifact and apply `--vectorizer_kwargs`
    /// (`lowercase`, default true) and `--transformer_kwargs`
    /// (`smooth_idf` default true, `sublinear_tf` default false, `norm`
    /// one of `l1`/`l2`/`none`, default `l2`)
    pub fn new(
        vocab_path: &Path,
        mut vectorizer_kwargs: Kwargs,
        mut transformer_kwargs: Kwargs,
    ) -> Result<Self> {
        let vocab = Vocabulary::load(vocab_path)?;

        let lowercase = vectorizer_kwargs.take_bool("lowercase", true)?;
        vectorizer_kwargs.finish(&["lowercase"])?;

        let smooth_idf = transformer_kwargs.take_bool("smooth_idf", true)?;
        let sublinear_tf = transformer_kwargs.take_bool("sublinear_tf", false)?;
        let norm_raw = transformer_kwargs.take_str("norm", "l2");
        transformer_kwargs.finish(&["smooth_idf", "sublinear_tf", "norm"])?;

        let norm = match norm_raw.as_str() {
            "l1" => Norm::L1,
            "l2" => Norm::L2,
            "none" => Norm::None,
            _ => {
                return Err(AltairError::InvalidOptionValue {
                    key: "norm".to_string(),
                    value: norm_raw,
                    reason: "expected l1, l2, or none".to_string(),
                })
            }
        };

        let idf = compute_idf(&vocab, smooth_idf);
        Ok(Self {
            vocab,
            lowercase,
            sublinear_tf,
            norm,
            idf,
        })
    }
}

fn compute_idf(vocab: &Vocabulary, smooth: bool) -> Vec<f64> {
    let (Some(doc_freq), Some(doc_count)) = (vocab.doc_freq(), vocab.doc_count()) else {
        return vec![1.0; vocab.len()];
    };
    let n = doc_count as f64;
    doc_freq
        .iter()
        .map(|&df| {
            let df = df as f64;
            if smooth {
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            } else {
                (n / df.max(1.0)).ln() + 1.0
            }
        })
        .collect()
}

impl Vectorizer for TfidfVectorizer {
    fn vectorize(&self, document: &str) -> Result<Vec<f64>> {
        let tokens = tokenize(document, self.lowercase);
        let mut weights = self.vocab.count_tokens(&tokens);

        for (weight, idf) in weights.iter_mut().zip(&self.idf) {
            if self.sublinear_tf && *weight > 0.0 {
                *weight = 1.0 + weight.ln();
            }
            *weight *= idf;
        }

        match self.norm {
            Norm::L1 => {
                let sum: f64 = weights.iter().map(|w| w.abs()).sum();
                if sum > 0.0 {
                    for weight in &mut weights {
                        *weight /= sum;
                    }
                }
            }
            Norm::L2 => {
                let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for weight in &mut weights {
                        *weight /= norm;
                    }
                }
            }
            Norm::None => {}
        }

        Ok(weights)
    }

    fn dimensions(&self) -> usize {
        self.vocab.len()
    }
}
