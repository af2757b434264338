//! Text processing: tokenization, normalization, import extraction
//!
//! The counting vectorizers share one tokenizer (lowercased word tokens of
//! two or more characters). `normalize_text` is the heavier cleanup used by
//! the embedding vectorizer; `extract_imports` recovers the library names a
//! script depends on for the imports-only bag of words.

use std::collections::{BTreeSet, HashSet};
use std::sync::OnceLock;

use regex::Regex;

/// Word tokens: two or more word characters, as in the counting
/// vectorizers the models were fitted with
static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

/// Web links (protocol-relative and beyond), stripped before normalization
static LINK_RE: OnceLock<Regex> = OnceLock::new();

/// Markup tags, stripped before normalization
static TAG_RE: OnceLock<Regex> = OnceLock::new();

/// Anything that is not an ASCII letter
static NON_LETTER_RE: OnceLock<Regex> = OnceLock::new();

/// Common English stop words filtered during normalization
static ENGLISH_STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();

/// Python keywords in lower case, treated as stop words for code
static PYTHON_STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();

fn token_re() -> &'static Regex {
    TOKEN_RE.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("valid token pattern"))
}

fn english_stop_words() -> &'static HashSet<&'static str> {
    ENGLISH_STOP_WORDS.get_or_init(|| {
        [
            "a", "about", "above", "after", "again", "all", "also", "am", "an", "and", "any",
            "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
            "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
            "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
            "here", "hers", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its",
            "just", "me", "more", "most", "my", "no", "nor", "not", "now", "of", "off", "on",
            "once", "only", "or", "other", "our", "out", "over", "own", "same", "she", "should",
            "so", "some", "such", "than", "that", "the", "their", "them", "then", "there",
            "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
            "very", "was", "we", "were", "what", "when", "where", "which", "while", "who",
            "whom", "why", "will", "with", "you", "your", "yours",
        ]
        .iter()
        .copied()
        .collect()
    })
}

fn python_stop_words() -> &'static HashSet<&'static str> {
    PYTHON_STOP_WORDS.get_or_init(|| {
        [
            "false", "none", "true", "and", "as", "assert", "break", "class", "continue", "def",
            "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import",
            "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
            "while", "with", "yield",
        ]
        .iter()
        .copied()
        .collect()
    })
}

/// Tokenize text the way the counting vectorizers expect: word tokens of
/// length two or more, optionally lowercased
pub fn tokenize(text: &str, lowercase: bool) -> Vec<String> {
    let source = if lowercase {
        text.to_lowercase()
    } else {
        text.to_string()
    };
    token_re()
        .find_iter(&source)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Options for [`normalize_text`]. Defaults match the fitted models'
/// training-time cleanup.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Remove English and Python-keyword stop words
    pub remove_stop_words: bool,
    /// Replace every non-letter character with a space before splitting
    pub only_letters: bool,
    /// Drop words that are a single character long
    pub remove_one_char_words: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            remove_stop_words: true,
            only_letters: true,
            remove_one_char_words: true,
        }
    }
}

/// Clean raw text into a list of lowercase words.
///
/// Steps: strip web links, strip markup tags, optionally drop non-letter
/// characters, lowercase and split on whitespace, then apply the stop-word
/// and word-length filters from `options`.
pub fn normalize_text(raw_text: &str, options: &NormalizeOptions) -> Vec<String> {
    let link_re = LINK_RE.get_or_init(|| {
        Regex::new(r"/{2}[\d\w-]+(\.[\d\w-]+)*(?:(?:/[^\s/]*))*").expect("valid link pattern")
    });
    let tag_re = TAG_RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

    let text = link_re.replace_all(raw_text, "");
    let text = tag_re.replace_all(&text, " ");

    let text = if options.only_letters {
        let non_letter_re =
            NON_LETTER_RE.get_or_init(|| Regex::new(r"[^a-zA-Z]").expect("valid letter pattern"));
        non_letter_re.replace_all(&text, " ").into_owned()
    } else {
        text.into_owned()
    };

    let mut words: Vec<String> = text
        .to_lowercase()
        .split_whitespace()
        .map(|w| w.to_string())
        .collect();

    if options.remove_stop_words {
        let english = english_stop_words();
        let python = python_stop_words();
        words.retain(|w| !python.contains(w.as_str()) && !english.contains(w.as_str()));
    }

    if options.remove_one_char_words {
        words.retain(|w| w.chars().count() > 1);
    }

    words
}

/// Extract the base names of imported libraries from a script.
///
/// `import xml.parser` and `from xml.parser import tree` both yield `xml`;
/// `import numpy as np` yields `numpy`; relative imports (`from .util ...`)
/// are skipped. Returns a sorted, deduplicated set so the resulting
/// pseudo-document is stable.
pub fn extract_imports(document: &str) -> BTreeSet<String> {
    let mut libraries = BTreeSet::new();

    for line in document.lines() {
        let line = line.trim_start();
        if let Some(rest) = line.strip_prefix("import ") {
            // Comma-separated imports: `import os, sys`
            for clause in rest.split(',') {
                if let Some(name) = base_library(clause) {
                    libraries.insert(name);
                }
            }
        } else if let Some(rest) = line.strip_prefix("from ") {
            let module = rest.split_whitespace().next().unwrap_or("");
            // Skip relative imports; they never name an external library
            if module.starts_with('.') {
                continue;
            }
            if let Some(name) = base_library(module) {
                libraries.insert(name);
            }
        }
    }

    libraries
}

/// Reduce an import clause to its base library name: strip `as` aliases
/// and dotted segments (`xml.parser as xp` -> `xml`)
fn base_library(clause: &str) -> Option<String> {
    let name = clause.split_whitespace().next()?;
    let base = name.split('.').next()?;
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_drops_single_characters() {
        let tokens = tokenize("a bb ccc 1 22", true);
        assert_eq!(tokens, vec!["bb", "ccc", "22"]);
    }

    #[test]
    fn tokenize_lowercases_by_default() {
        let tokens = tokenize("NumPy Pandas", true);
        assert_eq!(tokens, vec!["numpy", "pandas"]);
        let tokens = tokenize("NumPy Pandas", false);
        assert_eq!(tokens, vec!["NumPy", "Pandas"]);
    }

    #[test]
    fn normalize_removes_links_and_stop_words() {
        let words = normalize_text(
            "see //example.com/page for the dataset import numpy",
            &NormalizeOptions::default(),
        );
        assert!(!words.iter().any(|w| w.contains("example")));
        assert!(!words.contains(&"the".to_string()));
        assert!(!words.contains(&"for".to_string()));
        // `import` is a Python keyword, also filtered
        assert!(!words.contains(&"import".to_string()));
        assert!(words.contains(&"dataset".to_string()));
        assert!(words.contains(&"numpy".to_string()));
    }

    #[test]
    fn normalize_keeps_everything_when_disabled() {
        let options = NormalizeOptions {
            remove_stop_words: false,
            only_letters: false,
            remove_one_char_words: false,
        };
        let words = normalize_text("the x1 value", &options);
        assert_eq!(words, vec!["the", "x1", "value"]);
    }

    #[test]
    fn extract_imports_takes_base_segments() {
        let script = "import xml.parser\nimport numpy as np\nfrom pandas.core import frame\n";
        let libs = extract_imports(script);
        let expected: Vec<&str> = vec!["numpy", "pandas", "xml"];
        assert_eq!(libs.iter().map(String::as_str).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn extract_imports_skips_relative_imports() {
        let script = "from .util import helper\nimport os, sys\n";
        let libs = extract_imports(script);
        let expected: Vec<&str> = vec!["os", "sys"];
        assert_eq!(libs.iter().map(String::as_str).collect::<Vec<_>>(), expected);
    }
}
