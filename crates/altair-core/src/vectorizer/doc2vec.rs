//! Doc2Vec embedding vectorizer
//!
//! Loads a fitted embedding table and infers a document vector by
//! seeded-random initialization followed by gradient steps toward the
//! document's word vectors with a decaying learning rate. The RNG is
//! reseeded immediately before every inference, so identical input
//! yields bit-identical vectors across calls and across runs; without
//! that, the accuracy metrics would drift run to run.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::artifact::Doc2VecModel;
use crate::error::Result;
use crate::kwargs::Kwargs;
use crate::text::{normalize_text, NormalizeOptions};
use crate::vectorizer::Vectorizer;

const DEFAULT_EPOCHS: usize = 20;
const DEFAULT_ALPHA: f64 = 0.1;
const DEFAULT_MIN_ALPHA: f64 = 1e-4;
const DEFAULT_SEED: u64 = 0;

#[derive(Debug)]
pub struct Doc2VecVectorizer {
    model: Doc2VecModel,
    normalize: NormalizeOptions,
    epochs: usize,
    alpha: f64,
    min_alpha: f64,
    seed: u64,
}

impl Doc2VecVectorizer {
    /// Load the embedding artifact and apply `--normalizer_kwargs`
    /// (`remove_stop_words`, `only_letters`, `remove_one_char_words`) and
    /// `--infer_kwargs` (`epochs`, `alpha`, `min_alpha`, `seed`).
    ///
    /// The embedding expects word lists that keep stop words and
    /// non-letter tokens, so those normalizer options default to off here.
    pub fn new(
        model_path: &Path,
        mut normalizer_kwargs: Kwargs,
        mut infer_kwargs: Kwargs,
    ) -> Result<Self> {
        let model = Doc2VecModel::load(model_path)?;

        let normalize = NormalizeOptions {
            remove_stop_words: normalizer_kwargs.take_bool("remove_stop_words", false)?,
            only_letters: normalizer_kwargs.take_bool("only_letters", false)?,
            remove_one_char_words: normalizer_kwargs.take_bool("remove_one_char_words", true)?,
        };
        normalizer_kwargs.finish(&[
            "remove_stop_words",
            "only_letters",
            "remove_one_char_words",
        ])?;

        let epochs = infer_kwargs.take_usize("epochs", DEFAULT_EPOCHS)?;
        let alpha = infer_kwargs.take_f64("alpha", DEFAULT_ALPHA)?;
        let min_alpha = infer_kwargs.take_f64("min_alpha", DEFAULT_MIN_ALPHA)?;
        let seed = infer_kwargs.take_usize("seed", DEFAULT_SEED as usize)? as u64;
        infer_kwargs.finish(&["epochs", "alpha", "min_alpha", "seed"])?;

        Ok(Self {
            model,
            normalize,
            epochs,
            alpha,
            min_alpha,
            seed,
        })
    }

    fn infer(&self, words: &[String]) -> Vec<f64> {
        let dim = self.model.dim;

        // Reseed right before inference: determinism contract
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut doc: Vec<f64> = (0..dim)
            .map(|_| (rng.gen::<f64>() - 0.5) / dim as f64)
            .collect();

        let word_vectors: Vec<&Vec<f64>> = words
            .iter()
            .filter_map(|word| self.model.vectors.get(word))
            .collect();
        if word_vectors.is_empty() {
            return doc;
        }

        for epoch in 0..self.epochs {
            let progress = if self.epochs > 1 {
                epoch as f64 / (self.epochs - 1) as f64
            } else {
                0.0
            };
            let alpha = self.alpha - (self.alpha - self.min_alpha) * progress;
            for word_vector in &word_vectors {
                for (component, target) in doc.iter_mut().zip(word_vector.iter()) {
                    *component += alpha * (target - *component);
                }
            }
        }

        doc
    }
}

impl Vectorizer for Doc2VecVectorizer {
    fn vectorize(&self, document: &str) -> Result<Vec<f64>> {
        let words = normalize_text(document, &self.normalize);
        Ok(self.infer(&words))
    }

    fn dimensions(&self) -> usize {
        self.model.dim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn model_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create model");
        file.write_all(
            br#"{"dim": 3, "vectors": {
                "numpy": [1.0, 0.0, 0.0],
                "pandas": [0.9, 0.1, 0.0],
                "flask": [0.0, 0.0, 1.0]
            }}"#,
        )
        .expect("write model");
        file
    }

    fn vectorizer() -> (tempfile::NamedTempFile, Doc2VecVectorizer) {
        let file = model_file();
        let vectorizer =
            Doc2VecVectorizer::new(file.path(), Kwargs::default(), Kwargs::default())
                .expect("build vectorizer");
        (file, vectorizer)
    }

    #[test]
    fn inference_is_bit_identical_across_calls() {
        let (_file, vectorizer) = vectorizer();
        let first = vectorizer.vectorize("numpy pandas analysis").expect("vectorize");
        let second = vectorizer.vectorize("numpy pandas analysis").expect("vectorize");
        assert_eq!(first, second);
    }

    #[test]
    fn inferred_vector_approaches_its_word_vectors() {
        let (_file, vectorizer) = vectorizer();
        let vector = vectorizer.vectorize("numpy numpy pandas").expect("vectorize");
        // Pulled strongly toward the first embedding axis
        assert!(vector[0] > 0.5);
        assert!(vector[2] < 0.2);
    }

    #[test]
    fn unknown_words_still_give_a_deterministic_vector() {
        let (_file, vectorizer) = vectorizer();
        let first = vectorizer.vectorize("completely unknown words").expect("vectorize");
        let second = vectorizer.vectorize("completely unknown words").expect("vectorize");
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn different_seeds_give_different_vectors() {
        let file = model_file();
        let seeded = Doc2VecVectorizer::new(
            file.path(),
            Kwargs::default(),
            Kwargs::parse(Some("seed=7")).expect("parse kwargs"),
        )
        .expect("build vectorizer");
        let (_file2, default) = vectorizer();
        // With no known words the output is purely the seeded init
        let a = seeded.vectorize("zzz").expect("vectorize");
        let b = default.vectorize("zzz").expect("vectorize");
        assert_ne!(a, b);
    }
}
