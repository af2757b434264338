//! CLI argument parsing for altair
//!
//! Uses clap for argument parsing. The corpus path and scoring
//! parameters are global; a required subcommand selects the vectorizer
//! variant and carries its artifact paths and option strings.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Altair - evaluate document vectorizers on same-origin recovery
#[derive(Parser, Debug)]
#[command(name = "altair")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Location of the JSON-lines corpus file
    pub data_path: PathBuf,

    /// Number of cores for parallel scoring
    #[arg(long = "num_cores", default_value_t = 1)]
    pub num_cores: usize,

    /// N for the Top N (Any) and Top N (All) metrics
    #[arg(long = "top_n", default_value_t = 3)]
    pub top_n: usize,

    /// Competition id to exclude from the corpus (repeatable)
    #[arg(long, action = clap::ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Explicit log level filter (overrides --verbose)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub vectorizer: VectorizerCommand,
}

/// Output format for the evaluation report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
}

#[derive(Subcommand, Debug)]
pub enum VectorizerCommand {
    /// Bag of words vectorizer (entire script)
    BowAll {
        /// Path to the vocabulary JSON file, fitted offline
        vocab_path: PathBuf,

        /// Vectorizer options. Format: key1=val;key2=val2
        #[arg(long = "vectorizer_kwargs")]
        vectorizer_kwargs: Option<String>,
    },

    /// Bag of words vectorizer (imported libraries only)
    BowImport {
        /// Path to the library-name vocabulary JSON file, fitted offline
        libraries_path: PathBuf,

        /// Vectorizer options. Format: key1=val;key2=val2
        #[arg(long = "vectorizer_kwargs")]
        vectorizer_kwargs: Option<String>,
    },

    /// TF-IDF (Term Frequency, Inverse Document Frequency) vectorizer
    Tfidf {
        /// Path to the vocabulary JSON file, fitted offline
        vocab_path: PathBuf,

        /// Vectorizer options. Format: key1=val;key2=val2
        #[arg(long = "vectorizer_kwargs")]
        vectorizer_kwargs: Option<String>,

        /// Transformer options (smooth_idf, sublinear_tf, norm)
        #[arg(long = "transformer_kwargs")]
        transformer_kwargs: Option<String>,
    },

    /// Latent Dirichlet Allocation topic-distribution vectorizer
    Lda {
        /// Path to the vocabulary JSON file, fitted offline
        vocab_path: PathBuf,

        /// Path to the fitted topic-model JSON file
        model_path: PathBuf,

        /// Vectorizer options. Format: key1=val;key2=val2
        #[arg(long = "vectorizer_kwargs")]
        vectorizer_kwargs: Option<String>,
    },

    /// Doc2Vec embedding vectorizer (Le, Mikolov 2014)
    Doc2vec {
        /// Path to the fitted embedding-model JSON file
        model_path: PathBuf,

        /// Text normalization options. Format: key1=val;key2=val2
        #[arg(long = "normalizer_kwargs")]
        normalizer_kwargs: Option<String>,

        /// Inference options (epochs, alpha, min_alpha, seed)
        #[arg(long = "infer_kwargs")]
        infer_kwargs: Option<String>,
    },
}
