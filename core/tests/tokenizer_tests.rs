use sentrank_core::stem;
use sentrank_core::tokenizer::{segment_sentences, tokenize, tokenize_stemmed};
use sentrank_core::FillerWords;

#[test]
fn it_stems_and_lowercases() {
    let words = tokenize_stemmed("Running Runners RUN! The café's menu.", None);
    assert!(words.contains(&"run".to_string()));
    // The apostrophe splits "café's" into "café" and "s".
    assert!(words.contains(&"café".to_string()));
    assert!(words.iter().all(|w| *w == w.to_lowercase()));
}

#[test]
fn it_filters_fillers() {
    let fillers = FillerWords::from_words(["the", "and"]);
    let words = tokenize_stemmed("The quick brown fox and the lazy dog", Some(&fillers));
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert_eq!(words.len(), 5);
}

#[test]
fn short_words_only_fold_case() {
    for w in ["a", "I", "Ox", "to", "É"] {
        assert_eq!(stem(w), w.to_lowercase());
    }
}

#[test]
fn display_tokens_keep_case() {
    assert_eq!(tokenize("Rust's 2024 Edition"), vec!["Rust", "s", "2024", "Edition"]);
}

#[test]
fn sentences_keep_order_and_case() {
    let s = segment_sentences("One, Two; three\nFour!");
    assert_eq!(s, vec!["One", "Two", "three", "Four"]);
}
