use crate::index::CorpusIndex;
use crate::options::NgramOptions;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    pub token: String,
    pub count: usize,
}

impl CorpusIndex {
    /// Count corpus stems found around n-grams the query shares with the corpus.
    ///
    /// Every query window of `n` stems is compared with every corpus window. On a
    /// full match each stem of the corpus window, widened by `context` positions
    /// on both sides, is counted once. Stems of the query itself are removed
    /// from the result, which is ordered by count, then by stem.
    pub fn find_most_common_tokens_from_query_ngrams(&self, query: &str, opts: &NgramOptions) -> Vec<TokenCount> {
        let n = opts.n;
        let query_tokens = self.tokenize_stemmed(query, opts.filter_fillers);
        if n == 0 || query_tokens.len() < n {
            return Vec::new();
        }

        let corpus = self.stemmed_tokens();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for query_window in query_tokens.windows(n) {
            for (start, corpus_window) in corpus.windows(n).enumerate() {
                if corpus_window != query_window {
                    continue;
                }
                let from = start.saturating_sub(opts.context);
                let to = start.saturating_add(n).saturating_add(opts.context).min(corpus.len());
                for token in &corpus[from..to] {
                    *counts.entry(token.as_str()).or_insert(0) += 1;
                }
            }
        }

        let own: HashSet<&str> = query_tokens.iter().map(String::as_str).collect();
        let mut ranked: Vec<TokenCount> = counts
            .into_iter()
            .filter(|(token, _)| !own.contains(token))
            .map(|(token, count)| TokenCount { token: token.to_string(), count })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.token.cmp(&b.token)));
        if opts.top_n > 0 {
            ranked.truncate(opts.top_n);
        }
        ranked
    }
}
