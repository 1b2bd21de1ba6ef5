//! Sentence similarity measures over a [`CorpusIndex`].
//!
//! Four scorers are combined into one weighted score:
//! - TF-IDF cosine similarity of stemmed token vectors
//! - character similarity (longest common subsequence ratio)
//! - co-occurrence similarity, either Jaccard or PMI based

use crate::index::{tf, CorpusIndex};
use crate::options::{CoOccurrenceMethod, RankOptions};
use std::collections::HashSet;

const PMI_EPSILON: f64 = 0.0001;

/// Length of the longest common subsequence of two character slices.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// LCS length over the longer input's length, case-insensitive.
/// Identical inputs score 1, an empty input scores 0.
pub fn character_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return 1.0;
    }
    lcs_len(&a, &b) as f64 / max_len as f64
}

fn cosine(v1: &[f64], v2: &[f64]) -> f64 {
    let dot: f64 = v1.iter().zip(v2).map(|(x, y)| x * y).sum();
    let norm1 = v1.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm2 = v2.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm1 == 0.0 || norm2 == 0.0 {
        return 0.0;
    }
    dot / (norm1 * norm2)
}

fn unique_in_order(words: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    words.into_iter().filter(|w| seen.insert(w.clone())).collect()
}

impl CorpusIndex {
    /// Cosine similarity of the TF-IDF vectors of two texts.
    pub fn tfidf_similarity(&self, a: &str, b: &str, filter_fillers: bool) -> f64 {
        let words1 = self.tokenize_stemmed(a, filter_fillers);
        let words2 = self.tokenize_stemmed(b, filter_fillers);
        if words1.is_empty() || words2.is_empty() {
            return 0.0;
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let vocabulary: Vec<&str> = words1
            .iter()
            .chain(words2.iter())
            .map(String::as_str)
            .filter(|w| seen.insert(*w))
            .collect();

        let mut vec1 = Vec::with_capacity(vocabulary.len());
        let mut vec2 = Vec::with_capacity(vocabulary.len());
        for token in vocabulary {
            let idf = self.get_idf(token);
            vec1.push(tf(token, &words1) * idf);
            vec2.push(tf(token, &words2) * idf);
        }
        cosine(&vec1, &vec2)
    }

    /// Co-occurrence score of two words, stemmed first.
    pub fn co_occurrence_score(&self, word1: &str, word2: &str, method: CoOccurrenceMethod) -> f64 {
        let stem1 = crate::stemmer::stem(word1);
        let stem2 = crate::stemmer::stem(word2);
        self.stem_co_occurrence_score(&stem1, &stem2, method)
    }

    /// Co-occurrence score of two already stemmed tokens.
    pub fn stem_co_occurrence_score(&self, stem1: &str, stem2: &str, method: CoOccurrenceMethod) -> f64 {
        if stem1 == stem2 {
            return 1.0;
        }
        let together = self.co_occurrence_count(stem1, stem2);
        if together == 0 {
            return 0.0;
        }
        let ids1 = self.sentence_ids(stem1);
        let ids2 = self.sentence_ids(stem2);
        match method {
            CoOccurrenceMethod::Jaccard => {
                let set1: HashSet<usize> = ids1.iter().copied().collect();
                let intersection = ids2.iter().filter(|id| set1.contains(id)).count();
                let union = ids1.len() + ids2.len() - intersection;
                if union == 0 {
                    return 0.0;
                }
                intersection as f64 / union as f64
            }
            CoOccurrenceMethod::Pmi => {
                let total = self.sentences().len() as f64;
                let p_x = ids1.len() as f64 / total;
                let p_y = ids2.len() as f64 / total;
                let p_xy = together as f64 / total;
                ((p_xy + PMI_EPSILON) / (p_x * p_y + PMI_EPSILON)).log2()
            }
        }
    }

    /// Average pairwise co-occurrence score over the distinct stems of two texts,
    /// normalized into [0, 1].
    pub fn co_occurrence_similarity(
        &self,
        a: &str,
        b: &str,
        filter_fillers: bool,
        method: CoOccurrenceMethod,
    ) -> f64 {
        let words1 = unique_in_order(self.tokenize_stemmed(a, filter_fillers));
        let words2 = unique_in_order(self.tokenize_stemmed(b, filter_fillers));
        if words1.is_empty() || words2.is_empty() {
            return 0.0;
        }

        let mut total = 0.0;
        for w1 in &words1 {
            for w2 in &words2 {
                total += self.stem_co_occurrence_score(w1, w2, method);
            }
        }
        let avg = total / (words1.len() * words2.len()) as f64;
        match method {
            CoOccurrenceMethod::Jaccard => avg,
            CoOccurrenceMethod::Pmi => ((avg + 5.0) / 10.0).clamp(0.0, 1.0),
        }
    }

    /// Weighted blend of TF-IDF, character and (optionally) co-occurrence similarity.
    pub fn combined_similarity(&self, a: &str, b: &str, opts: &RankOptions) -> f64 {
        let mut weighted_sum = self.tfidf_similarity(a, b, opts.filter_fillers) * opts.tfidf_weight
            + character_similarity(a, b) * opts.char_weight;
        let mut total_weight = opts.tfidf_weight + opts.char_weight;

        if opts.co_occurrence_weight > 0.0 {
            let co = self.co_occurrence_similarity(a, b, opts.filter_fillers, opts.co_occurrence_method);
            weighted_sum += co * opts.co_occurrence_weight;
            total_weight += opts.co_occurrence_weight;
        }

        if total_weight == 0.0 {
            return 0.0;
        }
        weighted_sum / total_weight
    }
}
