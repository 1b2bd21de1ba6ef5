use crate::fillers::FillerWords;
use crate::stemmer::stem;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"[\p{L}\p{N}]+").expect("valid regex");
    static ref SENTENCE_BREAK_RE: Regex = Regex::new(r#"[.!?,"':;\n]+"#).expect("valid regex");
}

/// Split text into maximal runs of Unicode letters and digits, keeping original case.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD_RE.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Split text into sentences on runs of `. ! ? , " ' : ;` and newlines.
/// Pieces are trimmed and empty ones dropped.
pub fn segment_sentences(text: &str) -> Vec<String> {
    SENTENCE_BREAK_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokenize, optionally drop filler words, then stem what is left.
pub fn tokenize_stemmed(text: &str, fillers: Option<&FillerWords>) -> Vec<String> {
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|token| fillers.map_or(true, |f| !f.contains(token)))
        .map(stem)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_non_word_runs() {
        assert_eq!(tokenize("Hello,  world -- 42 times!"), vec!["Hello", "world", "42", "times"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize(" ... ").is_empty());
    }

    #[test]
    fn keeps_unicode_letters() {
        assert_eq!(tokenize("Café über naïve"), vec!["Café", "über", "naïve"]);
    }

    #[test]
    fn sentence_delimiters_collapse() {
        let s = segment_sentences("First one... Second: part; \"quoted\"\n\nlast!?");
        assert_eq!(s, vec!["First one", "Second", "part", "quoted", "last"]);
        assert!(segment_sentences("").is_empty());
        assert!(segment_sentences("?!.").is_empty());
    }

    #[test]
    fn stemmed_tokens_are_lowercase_roots() {
        assert_eq!(tokenize_stemmed("The Cats were RUNNING", None), vec!["the", "cat", "were", "run"]);
    }

    #[test]
    fn filler_filter_is_case_insensitive() {
        let fillers = FillerWords::from_words(["the", "were"]);
        assert_eq!(tokenize_stemmed("The Cats WERE running", Some(&fillers)), vec!["cat", "run"]);
    }
}
