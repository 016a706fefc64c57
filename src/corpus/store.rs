use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use tracing::{info, warn};

use crate::corpus::{Corpus, Observation};

static SAMPLE_CORPUS_JSON: &str = include_str!("../../data/sample_corpus.json");

static SAMPLE_OBSERVATIONS: Lazy<Vec<Observation>> = Lazy::new(|| {
    serde_json::from_str(SAMPLE_CORPUS_JSON).expect("embedded sample corpus is valid JSON")
});

/// Built-in evidence set used when no corpus file is supplied.
pub fn sample_corpus() -> Corpus {
    Corpus::with_fingerprint(SAMPLE_OBSERVATIONS.clone())
}

pub fn load_corpus(path: &Path) -> Result<Corpus> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading corpus file: {}", path.display()))?;
    let observations: Vec<Observation> = serde_json::from_str(&data)
        .with_context(|| format!("failed parsing corpus JSON: {}", path.display()))?;
    if observations.is_empty() {
        warn!("corpus file {} contains no observations", path.display());
    }
    let corpus = Corpus::with_fingerprint(observations);
    let short_print = &corpus.fingerprint[..corpus.fingerprint.len().min(12)];
    info!(
        count = corpus.len(),
        fingerprint = short_print,
        "loaded corpus from {}",
        path.display()
    );
    Ok(corpus)
}

pub fn load_or_sample(path: Option<&Path>) -> Result<Corpus> {
    match path {
        Some(path) => load_corpus(path),
        None => {
            let corpus = sample_corpus();
            info!(count = corpus.len(), "using built-in sample corpus");
            Ok(corpus)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::corpus::store::{load_corpus, sample_corpus};

    #[test]
    fn sample_corpus_parses_and_fingerprints() {
        let corpus = sample_corpus();
        assert!(corpus.len() >= 20);
        assert_eq!(corpus.fingerprint.len(), 64);
        // the fingerprint is a function of content only
        assert_eq!(corpus.fingerprint, sample_corpus().fingerprint);
    }

    #[test]
    fn loads_corpus_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        let body = serde_json::to_string(&sample_corpus().observations).expect("serialize");
        file.write_all(body.as_bytes()).expect("write corpus");
        let corpus = load_corpus(file.path()).expect("load corpus");
        assert_eq!(corpus.len(), sample_corpus().len());
    }

    #[test]
    fn rejects_malformed_corpus() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"{ not json ]").expect("write corpus");
        assert!(load_corpus(file.path()).is_err());
    }
}
