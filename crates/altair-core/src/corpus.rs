//! Corpus loading and filtering
//!
//! The corpus is a UTF-8 file with one JSON object per line. Required
//! fields are `ScriptContent` (document text) and `CompetitionId` (the
//! ground-truth group label); `ScriptTitle` is optional. A line that fails
//! to parse aborts the whole load: downstream scoring addresses documents
//! by index, so a partially loaded corpus would silently misalign group
//! labels with feature rows.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{AltairError, Result};

/// One corpus record. Immutable once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Raw document text
    #[serde(rename = "ScriptContent")]
    pub content: String,

    /// Ground-truth group label, only ever compared, never vectorized
    #[serde(rename = "CompetitionId")]
    pub competition_id: String,

    /// Optional human-readable title
    #[serde(rename = "ScriptTitle", default)]
    pub title: Option<String>,
}

/// An ordered sequence of documents. Insertion order defines each
/// document's index in the feature matrix, so filtering must happen
/// before the corpus is handed to a vectorizer.
#[derive(Debug, Default)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// Load a corpus from a JSON-lines file.
    ///
    /// Fails on the first unreadable or unparsable line; no best-effort
    /// partial load.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| AltairError::CorpusRead {
            path: path.to_path_buf(),
            source,
        })?;

        let mut documents = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| AltairError::CorpusRead {
                path: path.to_path_buf(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let document: Document =
                serde_json::from_str(&line).map_err(|e| AltairError::CorpusParse {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    reason: e.to_string(),
                })?;
            documents.push(document);
        }

        debug!(documents = documents.len(), path = %path.display(), "corpus_loaded");
        Ok(Self { documents })
    }

    /// Drop records from excluded competitions and records whose text is
    /// empty after trimming. Runs before indices are assigned, so the
    /// surviving sequence stays contiguous and index-aligned with its
    /// group labels.
    pub fn filter(&mut self, excluded_competitions: &HashSet<String>) {
        let before = self.documents.len();
        self.documents.retain(|doc| {
            !doc.content.trim().is_empty() && !excluded_competitions.contains(&doc.competition_id)
        });
        let dropped = before - self.documents.len();
        if dropped > 0 {
            debug!(dropped, remaining = self.documents.len(), "corpus_filtered");
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Document texts in index order
    pub fn texts(&self) -> Vec<&str> {
        self.documents.iter().map(|d| d.content.as_str()).collect()
    }

    /// Group labels in index order, aligned with `texts()`
    pub fn group_ids(&self) -> Vec<&str> {
        self.documents
            .iter()
            .map(|d| d.competition_id.as_str())
            .collect()
    }
}

impl From<Vec<Document>> for Corpus {
    fn from(documents: Vec<Document>) -> Self {
        Self { documents }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_corpus(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp corpus");
        for line in lines {
            writeln!(file, "{}", line).expect("write corpus line");
        }
        file
    }

    #[test]
    fn loads_documents_in_order() {
        let file = write_corpus(&[
            r#"{"ScriptContent": "import numpy", "CompetitionId": "10", "ScriptTitle": "a"}"#,
            r#"{"ScriptContent": "import pandas", "CompetitionId": "20"}"#,
        ]);

        let corpus = Corpus::load(file.path()).expect("load corpus");
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.group_ids(), vec!["10", "20"]);
        assert_eq!(corpus.documents()[0].title.as_deref(), Some("a"));
        assert_eq!(corpus.documents()[1].title, None);
    }

    #[test]
    fn malformed_line_aborts_load_with_line_number() {
        let file = write_corpus(&[
            r#"{"ScriptContent": "x", "CompetitionId": "1"}"#,
            "not json",
        ]);

        let err = Corpus::load(file.path()).expect_err("load should fail");
        match err {
            AltairError::CorpusParse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Corpus::load(Path::new("/nonexistent/corpus.json")).expect_err("should fail");
        assert!(matches!(err, AltairError::CorpusRead { .. }));
    }

    #[test]
    fn filter_drops_empty_and_excluded_in_lockstep() {
        let file = write_corpus(&[
            r#"{"ScriptContent": "keep me", "CompetitionId": "1"}"#,
            r#"{"ScriptContent": "   ", "CompetitionId": "1"}"#,
            r#"{"ScriptContent": "tutorial", "CompetitionId": "4353"}"#,
            r#"{"ScriptContent": "keep me too", "CompetitionId": "2"}"#,
        ]);

        let mut corpus = Corpus::load(file.path()).expect("load corpus");
        let excluded: HashSet<String> = ["4353".to_string()].into_iter().collect();
        corpus.filter(&excluded);

        assert_eq!(corpus.len(), 2);
        // No gaps: indices 0 and 1 are the two survivors, labels aligned.
        assert_eq!(corpus.group_ids(), vec!["1", "2"]);
        assert_eq!(corpus.texts(), vec!["keep me", "keep me too"]);
    }
}
