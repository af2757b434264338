//! Per-document nearest-neighbor scoring
//!
//! For one document: cosine similarity against every other row of the
//! feature matrix, rank the candidates, and check whether the nearest
//! neighbors share the document's group label. Self-similarity is always
//! 1.0, so the document's own index is excluded before the top-N cut.
//! Ties in similarity break by index order to keep rankings reproducible.

use crate::error::{AltairError, Result};
use crate::matrix::FeatureMatrix;

/// Cosine similarity between two dense vectors, 0.0 when either has
/// zero norm
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Match outcome for one scored document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreTriple {
    /// Nearest neighbor shares the group label
    pub top1: bool,
    /// At least one of the top N shares the group label
    pub topn_any: bool,
    /// Every one of the top N shares the group label
    pub topn_all: bool,
}

/// Indices of the `top_n` most similar rows to row `index`, excluding
/// `index` itself, similarity descending with index ascending on ties
pub fn top_candidates(matrix: &FeatureMatrix, index: usize, top_n: usize) -> Result<Vec<usize>> {
    let query = matrix.row(index);
    if query.iter().all(|&x| x == 0.0) {
        return Err(AltairError::ZeroVector { index });
    }

    let mut ranked: Vec<(usize, f64)> = (0..matrix.rows())
        .filter(|&j| j != index)
        .map(|j| (j, cosine_similarity(query, matrix.row(j))))
        .collect();
    ranked.sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(top_n);

    Ok(ranked.into_iter().map(|(j, _)| j).collect())
}

/// Score one document against the whole matrix.
///
/// An empty candidate set (single-row matrix) scores false on all three
/// metrics; the document still counts toward the denominator.
pub fn score_document(
    matrix: &FeatureMatrix,
    group_ids: &[&str],
    index: usize,
    top_n: usize,
) -> Result<ScoreTriple> {
    let candidates = top_candidates(matrix, index, top_n)?;
    let matches: Vec<bool> = candidates
        .iter()
        .map(|&j| group_ids[j] == group_ids[index])
        .collect();

    Ok(ScoreTriple {
        top1: matches.first().copied().unwrap_or(false),
        topn_any: matches.iter().any(|&m| m),
        topn_all: !matches.is_empty() && matches.iter().all(|&m| m),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<f64>>) -> FeatureMatrix {
        FeatureMatrix::from_rows(rows).expect("build matrix")
    }

    #[test]
    fn cosine_of_parallel_vectors_is_one() {
        let sim = cosine_similarity(&[1.0, 2.0], &[2.0, 4.0]);
        assert!((sim - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]);
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn cosine_with_zero_vector_is_zero() {
        let sim = cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]);
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn self_index_never_appears_among_candidates() {
        // Row 0 and row 2 are identical, so similarity between them is
        // maximal; 0's own row must still be excluded.
        let m = matrix(vec![
            vec![1.0, 0.0],
            vec![0.5, 0.5],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
        ]);
        for i in 0..4 {
            let candidates = top_candidates(&m, i, 4).expect("rank");
            assert!(!candidates.contains(&i));
            assert_eq!(candidates.len(), 3);
        }
    }

    #[test]
    fn ties_break_by_index_order() {
        // Rows 1, 2, 3 are all identical to the query row.
        let m = matrix(vec![
            vec![1.0, 1.0],
            vec![2.0, 2.0],
            vec![3.0, 3.0],
            vec![4.0, 4.0],
        ]);
        let candidates = top_candidates(&m, 0, 2).expect("rank");
        assert_eq!(candidates, vec![1, 2]);
    }

    #[test]
    fn top1_match_when_nearest_neighbor_shares_group() {
        // Doc 0's nearest non-self neighbor is doc 1 (same group A).
        let m = matrix(vec![
            vec![1.0, 0.0, 0.0],
            vec![0.9, 0.1, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.9, 0.1],
        ]);
        let groups = ["A", "A", "B", "B"];
        let triple = score_document(&m, &groups, 0, 2).expect("score");
        assert!(triple.top1);
        assert!(triple.topn_any);
    }

    #[test]
    fn zero_query_vector_is_a_scoring_error() {
        let m = matrix(vec![vec![0.0, 0.0], vec![1.0, 0.0]]);
        let err = score_document(&m, &["A", "A"], 0, 1).expect_err("should fail");
        assert!(matches!(err, AltairError::ZeroVector { index: 0 }));
    }

    #[test]
    fn single_row_matrix_scores_all_false() {
        let m = matrix(vec![vec![1.0, 0.0]]);
        let triple = score_document(&m, &["A"], 0, 3).expect("score");
        assert!(!triple.top1);
        assert!(!triple.topn_any);
        assert!(!triple.topn_all);
    }
}
