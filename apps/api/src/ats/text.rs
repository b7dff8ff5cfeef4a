//! Text utilities for ATS matching: normalization, phrase containment,
//! stopword-filtered tokenization and frequency ranking.
//!
//! Everything here is pure and allocation-light. The normalized alphabet is
//! `[a-z0-9 +#.]`, which keeps atoms such as `c++`, `c#` and `node.js` intact.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

static NON_TOKEN_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9 +#.]+").expect("static regex"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Anything between `<` and the next `>`. An unclosed `<` is left alone and
/// later dropped by `normalize`.
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("static regex"));

/// Common English function words dropped during keyword extraction.
/// Never applied to skill matching.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
        "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
        "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down",
        "during", "each", "etc", "few", "for", "from", "further", "had", "has", "have",
        "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how", "i",
        "if", "in", "into", "is", "it", "its", "itself", "just", "may", "me", "might", "more",
        "most", "must", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
        "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same",
        "shall", "she", "should", "so", "some", "such", "than", "that", "the", "their",
        "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those",
        "through", "to", "too", "under", "until", "up", "us", "very", "was", "we", "were",
        "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with",
        "within", "would", "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

pub const MIN_TOKEN_CHARS: usize = 2;

/// Lowercases, replaces every run outside `[a-z0-9 +#.]` with one space,
/// collapses whitespace and trims.
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let replaced = NON_TOKEN_CHARS.replace_all(&lower, " ");
    WHITESPACE.replace_all(&replaced, " ").trim().to_string()
}

/// Returns true when the normalized `needle` occurs in `haystack` as a whole
/// phrase, i.e. delimited by spaces on both sides.
///
/// `haystack` must already be normalized. Callers scoring many needles
/// against one text should pass it pre-padded (`" " + text + " "`) to skip
/// the per-call allocation.
pub fn contains_phrase(haystack: &str, needle: &str) -> bool {
    let needle = normalize(needle);
    if needle.is_empty() {
        return false;
    }

    let haystack: Cow<'_, str> = if haystack.starts_with(' ') && haystack.ends_with(' ') {
        Cow::Borrowed(haystack)
    } else {
        Cow::Owned(format!(" {haystack} "))
    };

    haystack.contains(&format!(" {needle} "))
}

/// Replaces tag-like runs with a space, collapses whitespace and trims.
/// Regex based, not a parser: malformed markup passes through without error.
pub fn strip_html(html: &str) -> String {
    let without_tags = HTML_TAG.replace_all(html, " ");
    WHITESPACE.replace_all(&without_tags, " ").trim().to_string()
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Normalized tokens with stopwords and one-character tokens removed,
/// in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|token| !token.is_empty())
        .filter(|token| !is_stopword(token))
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// The `top_n` most frequent tokens of `text`, most frequent first.
/// Equal counts keep first-seen order.
pub fn top_keywords(text: &str, top_n: usize) -> Vec<String> {
    let tokens = tokenize(text);

    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut ranked: Vec<(&str, usize)> = Vec::new();
    for token in &tokens {
        match positions.get(token.as_str()) {
            Some(&idx) => ranked[idx].1 += 1,
            None => {
                positions.insert(token.as_str(), ranked.len());
                ranked.push((token.as_str(), 1));
            }
        }
    }

    // sort_by is stable, so ties stay in first-seen order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(top_n)
        .map(|(token, _)| token.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_collapses() {
        assert_eq!(normalize("  Senior   RUST\tEngineer\n"), "senior rust engineer");
    }

    #[test]
    fn test_normalize_keeps_language_atoms() {
        assert_eq!(
            normalize("C++, C# and Node.js (TypeScript)!"),
            "c++ c# and node.js typescript"
        );
    }

    #[test]
    fn test_normalize_replaces_non_ascii_runs() {
        assert_eq!(normalize("café—crème"), "caf cr me");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  !!! ---  "), "");
    }

    #[test]
    fn test_contains_phrase_respects_word_boundaries() {
        let norm = normalize("javascript");
        assert!(!contains_phrase(&norm, "java"));
        assert!(contains_phrase(&norm, "JavaScript"));
    }

    #[test]
    fn test_contains_phrase_multi_word() {
        let resume = format!(" {} ", normalize("Built distributed systems in Go"));
        assert!(contains_phrase(&resume, "Distributed Systems"));
        assert!(!contains_phrase(&resume, "systems design"));
    }

    #[test]
    fn test_contains_phrase_unpadded_haystack() {
        assert!(contains_phrase("python docker", "docker"));
        assert!(contains_phrase("python docker", "python"));
    }

    #[test]
    fn test_contains_phrase_empty_needle_never_matches() {
        assert!(!contains_phrase(" anything at all ", ""));
        assert!(!contains_phrase(" anything at all ", " !? "));
    }

    #[test]
    fn test_contains_phrase_symbol_skills() {
        let resume = format!(" {} ", normalize("Shipped C++ and C# services, some Node.js"));
        assert!(contains_phrase(&resume, "c++"));
        assert!(contains_phrase(&resume, "C#"));
        assert!(contains_phrase(&resume, "node.js"));
        assert!(!contains_phrase(&resume, "c"));
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("<p>Build <b>APIs</b></p><br/>now"),
            "Build APIs now"
        );
    }

    #[test]
    fn test_strip_html_tolerates_malformed_markup() {
        assert_eq!(strip_html("<div>open <span unclosed"), "open <span unclosed");
        assert_eq!(strip_html("a > b"), "a > b");
        assert_eq!(strip_html(""), "");
    }

    #[test]
    fn test_tokenize_drops_stopwords_and_short_tokens() {
        assert_eq!(
            tokenize("The engineer will build a Rust API with x and y"),
            vec!["engineer", "build", "rust", "api"]
        );
    }

    #[test]
    fn test_tokenize_stopwords_case_insensitive() {
        assert!(tokenize("THE AND WITH").is_empty());
    }

    #[test]
    fn test_top_keywords_orders_by_frequency_then_first_seen() {
        let text = "docker python kubernetes python docker python aws";
        assert_eq!(
            top_keywords(text, 30),
            vec!["python", "docker", "kubernetes", "aws"]
        );
    }

    #[test]
    fn test_top_keywords_caps_result() {
        let text = "alpha beta gamma delta epsilon";
        assert_eq!(top_keywords(text, 2), vec!["alpha", "beta"]);
        assert!(top_keywords(text, 0).is_empty());
    }

    #[test]
    fn test_top_keywords_empty_input() {
        assert!(top_keywords("", 30).is_empty());
        assert!(top_keywords("the of and", 30).is_empty());
    }

    #[test]
    fn test_top_keywords_is_deterministic() {
        let text = "rust go rust python go java kotlin scala rust";
        let first = top_keywords(text, 30);
        for _ in 0..10 {
            assert_eq!(top_keywords(text, 30), first);
        }
    }
}
