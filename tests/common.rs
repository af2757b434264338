use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

pub fn altair() -> Command {
    cargo_bin_cmd!("altair")
}

/// Write a JSON-lines corpus of (text, competition id) pairs
#[allow(dead_code)]
pub fn write_corpus(dir: &Path, records: &[(&str, &str)]) -> PathBuf {
    let path = dir.join("corpus.json");
    let lines: Vec<String> = records
        .iter()
        .map(|(content, competition)| {
            serde_json::json!({
                "ScriptContent": content,
                "CompetitionId": competition,
            })
            .to_string()
        })
        .collect();
    fs::write(&path, lines.join("\n")).expect("write corpus");
    path
}

/// Write a bare term-list vocabulary artifact
#[allow(dead_code)]
pub fn write_vocab(dir: &Path, terms: &[&str]) -> PathBuf {
    let path = dir.join("vocab.json");
    fs::write(&path, serde_json::to_string(terms).expect("serialize vocab"))
        .expect("write vocab");
    path
}
