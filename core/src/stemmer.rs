//! Rule-based suffix stripping for English words.
//!
//! Suffixes are tried in priority order, the inflectional ones get a small
//! clean-up step, and plural rules apply when no suffix matched. Output is an
//! approximate root, not a dictionary lemma.

/// Derivational and inflectional suffixes, most specific first.
const SUFFIXES: &[&str] = &[
    "ational", "ization", "tional", "ousness", "iveness", "fulness", "ousli", "alism", "aliti",
    "ation", "ator", "ement", "ment", "able", "ible", "ance", "ence", "ness", "tion", "sion",
    "ing", "ed", "er", "est", "ly", "ful", "less",
];

/// Shortest stem a suffix may leave behind.
const MIN_STEM_LEN: usize = 2;

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_consonant(c: char) -> bool {
    c.is_ascii_lowercase() && !is_vowel(c)
}

/// Reduce `word` to an approximate root form.
///
/// The result is always lowercase. Words shorter than three characters are
/// returned lowercased but otherwise untouched.
pub fn stem(word: &str) -> String {
    let word = word.to_lowercase();
    if word.chars().count() < 3 {
        return word;
    }

    match word.as_str() {
        "was" | "is" | "are" => return word,
        "has" | "had" | "have" => return "hav".to_string(),
        _ => {}
    }

    for suffix in SUFFIXES {
        if let Some(base) = word.strip_suffix(suffix) {
            if base.chars().count() >= MIN_STEM_LEN {
                return clean_up(base, suffix);
            }
        }
    }

    strip_plural(&word)
}

/// Post-processing for `ed`, `ing`, `er` and `est`: drop a dangling `e`, or
/// undo consonant doubling (`runn` -> `run`) after `ed`/`ing`.
fn clean_up(base: &str, suffix: &str) -> String {
    if !matches!(suffix, "ed" | "ing" | "er" | "est") {
        return base.to_string();
    }
    let chars: Vec<char> = base.chars().collect();
    let len = chars.len();
    if len > 1 && chars[len - 1] == 'e' {
        return chars[..len - 1].iter().collect();
    }
    if matches!(suffix, "ed" | "ing") && len > 2 {
        let last = chars[len - 1];
        let before = chars[len - 2];
        if last == before && is_consonant(last) && !is_vowel(before) {
            return chars[..len - 1].iter().collect();
        }
    }
    base.to_string()
}

fn strip_plural(word: &str) -> String {
    let len = word.chars().count();
    if len > 4 {
        if let Some(base) = word.strip_suffix("ies") {
            return format!("{base}y");
        }
        if let Some(base) = word.strip_suffix("es") {
            return base.to_string();
        }
    }
    if len > 3 && word.ends_with('s') && !word.ends_with("ss") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}
