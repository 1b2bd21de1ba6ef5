use crate::index::{CorpusIndex, SentenceId};
use crate::options::RankOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSentence {
    /// Position of the sentence in the corpus.
    pub index: SentenceId,
    pub sentence: String,
    pub score: f64,
}

impl CorpusIndex {
    /// Score every sentence against `query` and return those with a positive
    /// score, best first. Equal scores keep corpus order.
    pub fn rank_sentences(&self, query: &str, opts: &RankOptions) -> Vec<RankedSentence> {
        if query.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<RankedSentence> = self
            .sentences()
            .iter()
            .enumerate()
            .filter_map(|(index, sentence)| {
                let score = self.combined_similarity(query, sentence, opts);
                (score > 0.0).then(|| RankedSentence { index, sentence: sentence.clone(), score })
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        tracing::debug!(query, hits = scored.len(), "ranked sentences");

        if opts.top_n > 0 {
            scored.truncate(opts.top_n);
        }
        scored
    }
}
