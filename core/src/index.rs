use crate::fillers::FillerWords;
use crate::tokenizer::{segment_sentences, tokenize, tokenize_stemmed};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub type SentenceId = usize;

/// Sparse symmetric co-occurrence counts: stem -> (stem -> number of sentences
/// containing both). Self pairs are never stored.
pub type CoOccurrenceMatrix = HashMap<String, HashMap<String, u32>>;

/// Summary numbers about an indexed corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    pub token_count: usize,
    pub filtered_token_count: usize,
    pub sentence_count: usize,
    pub vocabulary_size: usize,
    pub filler_word_count: usize,
    pub co_occurrence_pairs: usize,
    pub idf_cache_size: usize,
}

/// Smoothed inverse document frequency from a document count and a document frequency.
pub fn idf_from_df(num_docs: usize, df: usize) -> f64 {
    if num_docs == 0 {
        return 0.0;
    }
    ((num_docs as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0
}

/// IDF of `token` over `documents`, counting each document at most once.
pub fn idf(token: &str, documents: &[Vec<String>]) -> f64 {
    let df = documents.iter().filter(|doc| doc.iter().any(|t| t == token)).count();
    idf_from_df(documents.len(), df)
}

/// Relative frequency of `token` in `words`; 0 for an empty list.
pub fn tf(token: &str, words: &[String]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let count = words.iter().filter(|w| w.as_str() == token).count();
    count as f64 / words.len() as f64
}

/// In-memory index over one corpus text. Built once; afterwards only the IDF
/// cache grows, for stems first seen in queries.
pub struct CorpusIndex {
    tokens: Vec<String>,
    sentences: Vec<String>,
    filler_words: FillerWords,
    filtered_tokens: Vec<String>,
    corpus_docs: Vec<Vec<String>>,
    stemmed_tokens: Vec<String>,
    /// stem -> ascending ids of the sentences whose document contains it
    membership: HashMap<String, Vec<SentenceId>>,
    idf_cache: RwLock<HashMap<String, f64>>,
    co_occurrence: CoOccurrenceMatrix,
}

impl CorpusIndex {
    pub fn new(text: &str, filler_words: FillerWords) -> Self {
        let tokens = tokenize(text);
        let sentences = segment_sentences(text);
        let filtered_tokens: Vec<String> = tokens
            .iter()
            .filter(|t| !filler_words.contains(t))
            .cloned()
            .collect();
        let corpus_docs: Vec<Vec<String>> = sentences
            .iter()
            .map(|s| tokenize_stemmed(s, None))
            .collect();
        let stemmed_tokens = tokenize_stemmed(text, None);

        let mut membership: HashMap<String, Vec<SentenceId>> = HashMap::new();
        for (sid, doc) in corpus_docs.iter().enumerate() {
            let mut seen_in_doc: HashSet<&str> = HashSet::new();
            for stem in doc {
                if seen_in_doc.insert(stem.as_str()) {
                    membership.entry(stem.clone()).or_default().push(sid);
                }
            }
        }

        let num_docs = corpus_docs.len();
        let mut idf_cache: HashMap<String, f64> = HashMap::new();
        for stem in &stemmed_tokens {
            if idf_cache.contains_key(stem) {
                continue;
            }
            let df = membership.get(stem).map_or(0, Vec::len);
            idf_cache.insert(stem.clone(), idf_from_df(num_docs, df));
        }

        let co_occurrence = build_co_occurrence(&corpus_docs);

        let index = Self {
            tokens,
            sentences,
            filler_words,
            filtered_tokens,
            corpus_docs,
            stemmed_tokens,
            membership,
            idf_cache: RwLock::new(idf_cache),
            co_occurrence,
        };
        tracing::info!(
            sentences = index.sentences.len(),
            vocabulary = index.membership.len(),
            co_occurrence_pairs = index.co_occurrence_pair_count(),
            "corpus index built"
        );
        index
    }

    pub fn tokens(&self) -> &[String] { &self.tokens }
    pub fn sentences(&self) -> &[String] { &self.sentences }
    pub fn filler_words(&self) -> &FillerWords { &self.filler_words }
    pub fn filtered_tokens(&self) -> &[String] { &self.filtered_tokens }
    pub fn corpus_docs(&self) -> &[Vec<String>] { &self.corpus_docs }
    pub fn stemmed_tokens(&self) -> &[String] { &self.stemmed_tokens }
    pub fn co_occurrence(&self) -> &CoOccurrenceMatrix { &self.co_occurrence }

    /// Stem and tokenize `text` against this corpus' filler list.
    pub fn tokenize_stemmed(&self, text: &str, filter_fillers: bool) -> Vec<String> {
        let fillers = filter_fillers.then_some(&self.filler_words);
        tokenize_stemmed(text, fillers)
    }

    /// Ids of the sentences whose document contains `stem`, ascending.
    pub fn sentence_ids(&self, stem: &str) -> &[SentenceId] {
        self.membership.get(stem).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of sentences in which both stems occur; 0 for identical stems.
    pub fn co_occurrence_count(&self, a: &str, b: &str) -> u32 {
        self.co_occurrence
            .get(a)
            .and_then(|row| row.get(b))
            .copied()
            .unwrap_or(0)
    }

    /// Cached IDF of a stem, computed and remembered on first use.
    pub fn get_idf(&self, stem: &str) -> f64 {
        if let Some(&v) = self.idf_cache.read().get(stem) {
            return v;
        }
        let value = idf_from_df(self.corpus_docs.len(), self.sentence_ids(stem).len());
        *self
            .idf_cache
            .write()
            .entry(stem.to_string())
            .or_insert(value)
    }

    pub fn idf_cache_len(&self) -> usize { self.idf_cache.read().len() }

    fn co_occurrence_pair_count(&self) -> usize {
        self.co_occurrence.values().map(HashMap::len).sum()
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            token_count: self.tokens.len(),
            filtered_token_count: self.filtered_tokens.len(),
            sentence_count: self.sentences.len(),
            vocabulary_size: self.membership.len(),
            filler_word_count: self.filler_words.len(),
            co_occurrence_pairs: self.co_occurrence_pair_count(),
            idf_cache_size: self.idf_cache_len(),
        }
    }
}

fn build_co_occurrence(docs: &[Vec<String>]) -> CoOccurrenceMatrix {
    let mut matrix = CoOccurrenceMatrix::new();
    for doc in docs {
        let mut seen: HashSet<&str> = HashSet::new();
        let unique: Vec<&str> = doc
            .iter()
            .map(String::as_str)
            .filter(|s| seen.insert(*s))
            .collect();
        for (i, a) in unique.iter().enumerate() {
            for (j, b) in unique.iter().enumerate() {
                if i == j {
                    continue;
                }
                *matrix
                    .entry((*a).to_string())
                    .or_default()
                    .entry((*b).to_string())
                    .or_insert(0) += 1;
            }
        }
    }
    matrix
}
