//! Evaluation pipeline: vectorize the corpus, score every document
//! against every other in parallel, and aggregate the match ratios.
//!
//! Workers share the feature matrix and group labels read-only; the only
//! mutable shared resource is the result channel. The channel is
//! unbounded, so producers never block on a consumer that only drains
//! after the pool finishes.

use std::sync::mpsc;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::corpus::Corpus;
use crate::debug_time;
use crate::error::{AltairError, Result};
use crate::matrix::FeatureMatrix;
use crate::scoring::{score_document, ScoreTriple};
use crate::vectorizer::Vectorizer;

/// Corpus-level accuracy ratios
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    /// Fraction of documents whose nearest neighbor shares their group
    pub top1_accuracy: f64,
    /// Fraction with at least one same-group document in the top N
    pub topn_any_accuracy: f64,
    /// Fraction with only same-group documents in the top N
    pub topn_all_accuracy: f64,
    /// Documents actually scored (the denominator)
    pub scored: usize,
    /// Documents that failed scoring and were excluded
    pub failed: usize,
    /// The N used for the top-N metrics
    pub top_n: usize,
}

/// Run the full pipeline over an already-filtered corpus.
///
/// `top_n` must be at least 2 and `num_cores` at least 1.
pub fn evaluate(
    corpus: &Corpus,
    vectorizer: &dyn Vectorizer,
    num_cores: usize,
    top_n: usize,
) -> Result<Evaluation> {
    if top_n < 2 {
        return Err(AltairError::InvalidTopN(top_n));
    }
    if num_cores < 1 {
        return Err(AltairError::InvalidNumCores(num_cores));
    }
    if corpus.is_empty() {
        return Err(AltairError::EmptyCorpus);
    }

    let start = Instant::now();
    let texts = corpus.texts();
    let matrix = vectorizer.vectorize_multi(&texts)?;
    debug_time!(start, "vectorize", rows = matrix.rows(), cols = matrix.cols());

    let group_ids = corpus.group_ids();
    score_matrix(&matrix, &group_ids, num_cores, top_n)
}

/// Score every row of a prebuilt feature matrix across a worker pool and
/// fold the per-document triples into corpus-level ratios
pub fn score_matrix(
    matrix: &FeatureMatrix,
    group_ids: &[&str],
    num_cores: usize,
    top_n: usize,
) -> Result<Evaluation> {
    if matrix.is_empty() {
        return Err(AltairError::EmptyCorpus);
    }

    let start = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_cores)
        .build()
        .map_err(|e| AltairError::Other(format!("cannot build worker pool: {e}")))?;

    let (sender, receiver) = mpsc::channel::<ScoreTriple>();
    let total = matrix.rows();
    pool.install(|| {
        (0..total)
            .into_par_iter()
            .for_each_with(sender, |sender, i| {
                match score_document(matrix, group_ids, i, top_n) {
                    // The receiver outlives the pool; a send can only
                    // fail if it was dropped by a panic upstream.
                    Ok(triple) => {
                        let _ = sender.send(triple);
                    }
                    Err(e) => warn!(index = i, error = %e, "document_scoring_failed"),
                }
            });
    });

    // All senders are gone once install returns; drain what was produced.
    let triples: Vec<ScoreTriple> = receiver.iter().collect();
    debug_time!(start, "score", scored = triples.len(), total = total);

    aggregate(&triples, total - triples.len(), top_n)
}

/// Fold score triples into ratios. The denominator is the number of
/// documents actually scored, never the raw corpus size.
fn aggregate(triples: &[ScoreTriple], failed: usize, top_n: usize) -> Result<Evaluation> {
    if triples.is_empty() {
        return Err(AltairError::EmptyCorpus);
    }

    let scored = triples.len();
    let mut top1 = 0usize;
    let mut topn_any = 0usize;
    let mut topn_all = 0usize;
    for triple in triples {
        top1 += triple.top1 as usize;
        topn_any += triple.topn_any as usize;
        topn_all += triple.topn_all as usize;
    }

    if failed > 0 {
        debug!(failed, scored, "documents_excluded_from_denominator");
    }

    let denom = scored as f64;
    Ok(Evaluation {
        top1_accuracy: top1 as f64 / denom,
        topn_any_accuracy: topn_any as f64 / denom,
        topn_all_accuracy: topn_all as f64 / denom,
        scored,
        failed,
        top_n,
    })
}
