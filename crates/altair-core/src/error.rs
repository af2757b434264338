//! Error types and exit codes for altair
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, malformed kwargs)
//! - 3: Data error (unreadable corpus, corrupt model artifact)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the altair CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - bad corpus or artifact (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during pipeline operations
#[derive(Error, Debug)]
pub enum AltairError {
    // Usage errors (exit code 2)
    #[error("invalid option string {raw:?}: {reason}")]
    InvalidKwargs { raw: String, reason: String },

    #[error("unknown option {key:?} (expected one of: {expected})")]
    UnknownOption { key: String, expected: String },

    #[error("invalid value {value:?} for option {key:?}: {reason}")]
    InvalidOptionValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("top_n must be at least 2 (got {0})")]
    InvalidTopN(usize),

    #[error("num_cores must be at least 1 (got {0})")]
    InvalidNumCores(usize),

    #[error("{0}")]
    UsageError(String),

    // Data errors (exit code 3)
    #[error("cannot read corpus {path:?}: {source}")]
    CorpusRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("corpus {path:?} line {line}: {reason}")]
    CorpusParse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("no documents to score (corpus empty after filtering)")]
    EmptyCorpus,

    #[error("cannot read model artifact {path:?}: {source}")]
    ArtifactRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid model artifact {path:?}: {reason}")]
    ArtifactInvalid { path: PathBuf, reason: String },

    #[error("feature matrix row {row} has {got} columns, expected {expected}")]
    DimensionMismatch {
        row: usize,
        got: usize,
        expected: usize,
    },

    // Per-document scoring failures; logged and excluded, never fatal
    #[error("document {index} has a zero-norm feature vector")]
    ZeroVector { index: usize },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl AltairError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AltairError::InvalidKwargs { .. }
            | AltairError::UnknownOption { .. }
            | AltairError::InvalidOptionValue { .. }
            | AltairError::InvalidTopN(_)
            | AltairError::InvalidNumCores(_)
            | AltairError::UsageError(_) => ExitCode::Usage,

            AltairError::CorpusRead { .. }
            | AltairError::CorpusParse { .. }
            | AltairError::EmptyCorpus
            | AltairError::ArtifactRead { .. }
            | AltairError::ArtifactInvalid { .. }
            | AltairError::DimensionMismatch { .. } => ExitCode::Data,

            AltairError::ZeroVector { .. }
            | AltairError::Io(_)
            | AltairError::Json(_)
            | AltairError::Other(_) => ExitCode::Failure,
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            AltairError::InvalidKwargs { .. } => "invalid_kwargs",
            AltairError::UnknownOption { .. } => "unknown_option",
            AltairError::InvalidOptionValue { .. } => "invalid_option_value",
            AltairError::InvalidTopN(_) => "invalid_top_n",
            AltairError::InvalidNumCores(_) => "invalid_num_cores",
            AltairError::UsageError(_) => "usage_error",
            AltairError::CorpusRead { .. } => "corpus_read",
            AltairError::CorpusParse { .. } => "corpus_parse",
            AltairError::EmptyCorpus => "empty_corpus",
            AltairError::ArtifactRead { .. } => "artifact_read",
            AltairError::ArtifactInvalid { .. } => "artifact_invalid",
            AltairError::DimensionMismatch { .. } => "dimension_mismatch",
            AltairError::ZeroVector { .. } => "zero_vector",
            AltairError::Io(_) => "io_error",
            AltairError::Json(_) => "json_error",
            AltairError::Other(_) => "other",
        }
    }
}

/// Result type alias for altair operations
pub type Result<T> = std::result::Result<T, AltairError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_map_to_exit_code_2() {
        let err = AltairError::InvalidTopN(0);
        assert_eq!(err.exit_code(), ExitCode::Usage);
    }

    #[test]
    fn data_errors_map_to_exit_code_3() {
        let err = AltairError::EmptyCorpus;
        assert_eq!(err.exit_code(), ExitCode::Data);
        assert_eq!(err.to_json()["error"]["type"], "empty_corpus");
    }
}
