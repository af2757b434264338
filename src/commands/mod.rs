//! Command execution for altair
//!
//! Builds the selected vectorizer from its subcommand arguments, runs
//! the evaluation pipeline, and prints the report.

use std::collections::HashSet;
use std::time::Instant;

use tracing::debug;

use altair_core::corpus::Corpus;
use altair_core::error::Result;
use altair_core::kwargs::Kwargs;
use altair_core::pipeline::{self, Evaluation};
use altair_core::vectorizer::{
    BowAllVectorizer, BowImportVectorizer, Doc2VecVectorizer, LdaVectorizer, TfidfVectorizer,
    Vectorizer,
};

use crate::cli::{Cli, OutputFormat, VectorizerCommand};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let vectorizer = build_vectorizer(&cli.vectorizer)?;
    debug!(elapsed = ?start.elapsed(), dimensions = vectorizer.dimensions(), "vectorizer_ready");

    let mut corpus = Corpus::load(&cli.data_path)?;
    let excluded: HashSet<String> = cli.exclude.iter().cloned().collect();
    corpus.filter(&excluded);
    debug!(elapsed = ?start.elapsed(), documents = corpus.len(), "corpus_ready");

    let evaluation = pipeline::evaluate(&corpus, vectorizer.as_ref(), cli.num_cores, cli.top_n)?;
    debug!(elapsed = ?start.elapsed(), "pipeline_done");

    print_report(&evaluation, cli.format)?;
    Ok(())
}

/// Construct the vectorizer selected on the command line, loading its
/// artifacts and parsing its option strings
fn build_vectorizer(command: &VectorizerCommand) -> Result<Box<dyn Vectorizer>> {
    match command {
        VectorizerCommand::BowAll {
            vocab_path,
            vectorizer_kwargs,
        } => {
            let kwargs = Kwargs::parse(vectorizer_kwargs.as_deref())?;
            Ok(Box::new(BowAllVectorizer::new(vocab_path, kwargs)?))
        }
        VectorizerCommand::BowImport {
            libraries_path,
            vectorizer_kwargs,
        } => {
            let kwargs = Kwargs::parse(vectorizer_kwargs.as_deref())?;
            Ok(Box::new(BowImportVectorizer::new(libraries_path, kwargs)?))
        }
        VectorizerCommand::Tfidf {
            vocab_path,
            vectorizer_kwargs,
            transformer_kwargs,
        } => {
            let vectorizer_kwargs = Kwargs::parse(vectorizer_kwargs.as_deref())?;
            let transformer_kwargs = Kwargs::parse(transformer_kwargs.as_deref())?;
            Ok(Box::new(TfidfVectorizer::new(
                vocab_path,
                vectorizer_kwargs,
                transformer_kwargs,
            )?))
        }
        VectorizerCommand::Lda {
            vocab_path,
            model_path,
            vectorizer_kwargs,
        } => {
            let kwargs = Kwargs::parse(vectorizer_kwargs.as_deref())?;
            Ok(Box::new(LdaVectorizer::new(vocab_path, model_path, kwargs)?))
        }
        VectorizerCommand::Doc2vec {
            model_path,
            normalizer_kwargs,
            infer_kwargs,
        } => {
            let normalizer_kwargs = Kwargs::parse(normalizer_kwargs.as_deref())?;
            let infer_kwargs = Kwargs::parse(infer_kwargs.as_deref())?;
            Ok(Box::new(Doc2VecVectorizer::new(
                model_path,
                normalizer_kwargs,
                infer_kwargs,
            )?))
        }
    }
}

fn print_report(evaluation: &Evaluation, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            println!("Top 1: {}", evaluation.top1_accuracy);
            println!("Top N (Any): {}", evaluation.topn_any_accuracy);
            println!("Top N (All): {}", evaluation.topn_all_accuracy);
            println!("(N = {})", evaluation.top_n);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(evaluation)?);
        }
    }
    Ok(())
}
