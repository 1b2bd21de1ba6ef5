use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How two stems' sentence-level co-occurrence is turned into a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoOccurrenceMethod {
    /// Overlap of the sentence sets containing each stem, in [0, 1].
    #[default]
    Jaccard,
    /// Pointwise mutual information over sentence probabilities (log2).
    Pmi,
}

impl FromStr for CoOccurrenceMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jaccard" => Ok(Self::Jaccard),
            "pmi" => Ok(Self::Pmi),
            other => Err(format!("unknown co-occurrence method '{other}', expected 'jaccard' or 'pmi'")),
        }
    }
}

impl fmt::Display for CoOccurrenceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jaccard => f.write_str("jaccard"),
            Self::Pmi => f.write_str("pmi"),
        }
    }
}

/// Weights and switches for sentence ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankOptions {
    /// Weight of TF-IDF cosine similarity. Default 0.95.
    pub tfidf_weight: f64,
    /// Weight of character LCS similarity. Default 0.05.
    pub char_weight: f64,
    /// Drop filler words before stemming. Default off.
    pub filter_fillers: bool,
    /// Weight of co-occurrence similarity; 0 (default) leaves it out entirely.
    pub co_occurrence_weight: f64,
    pub co_occurrence_method: CoOccurrenceMethod,
    /// Keep only the best `top_n` results; 0 keeps all.
    pub top_n: usize,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            tfidf_weight: 0.95,
            char_weight: 0.05,
            filter_fillers: false,
            co_occurrence_weight: 0.0,
            co_occurrence_method: CoOccurrenceMethod::Jaccard,
            top_n: 0,
        }
    }
}

/// Parameters for query n-gram matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NgramOptions {
    /// Window length. Default 2.
    pub n: usize,
    pub filter_fillers: bool,
    /// Number of tokens returned; 0 returns all. Default 10.
    pub top_n: usize,
    /// Extra positions counted on each side of a matching corpus window. Default 0.
    pub context: usize,
}

impl Default for NgramOptions {
    fn default() -> Self {
        Self { n: 2, filter_fillers: false, top_n: 10, context: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_methods() {
        assert_eq!("jaccard".parse::<CoOccurrenceMethod>(), Ok(CoOccurrenceMethod::Jaccard));
        assert_eq!("PMI".parse::<CoOccurrenceMethod>(), Ok(CoOccurrenceMethod::Pmi));
        assert!("cosine".parse::<CoOccurrenceMethod>().is_err());
        assert_eq!(CoOccurrenceMethod::Pmi.to_string(), "pmi");
    }

    #[test]
    fn defaults() {
        let opts = RankOptions::default();
        assert_eq!(opts.tfidf_weight, 0.95);
        assert_eq!(opts.char_weight, 0.05);
        assert_eq!(opts.co_occurrence_method, CoOccurrenceMethod::Jaccard);
        assert_eq!(NgramOptions::default().n, 2);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let opts: RankOptions = serde_json::from_str(r#"{"co_occurrence_weight":0.2,"co_occurrence_method":"pmi"}"#).unwrap();
        assert_eq!(opts.co_occurrence_method, CoOccurrenceMethod::Pmi);
        assert_eq!(opts.tfidf_weight, 0.95);
    }
}
