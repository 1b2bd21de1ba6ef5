use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Lowercase set of filler (stop) words excluded from scoring when filtering is on.
#[derive(Debug, Clone, Default)]
pub struct FillerWords {
    words: HashSet<String>,
}

impl FillerWords {
    pub fn new() -> Self { Self::default() }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Load a filler list: either a JSON array of strings, or plain text with one
    /// word per line (`#` starts a comment line).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading filler list {}", path.display()))?;
        if raw.trim_start().starts_with('[') {
            let words: Vec<String> = serde_json::from_str(&raw)
                .with_context(|| format!("parsing filler list {}", path.display()))?;
            return Ok(Self::from_words(words));
        }
        Ok(Self::from_words(
            raw.lines().filter(|line| !line.trim_start().starts_with('#')),
        ))
    }

    /// Like [`FillerWords::load`], but a missing or malformed list only produces a
    /// warning and an empty set.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path.as_ref()) {
            Ok(words) => words,
            Err(err) => {
                tracing::warn!(path = %path.as_ref().display(), error = %err, "filler list unavailable, continuing without filler words");
                Self::default()
            }
        }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}
