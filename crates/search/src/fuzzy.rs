//! Approximate word matching.
//!
//! Two strategies are available. [`FuzzyMode::Heuristic`] is the storefront's
//! historical rule: a cheap stem comparison that tolerates roughly one trailing
//! typo. [`FuzzyMode::EditDistance`] compares words by Levenshtein distance.

use serde::{Deserialize, Serialize};

/// Strategy used for the fuzzy candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum FuzzyMode {
    /// Stem containment / shared-prefix heuristic
    Heuristic,
    /// Bounded Levenshtein distance between words
    EditDistance {
        /// Largest accepted distance
        max_distance: usize,
    },
}

impl Default for FuzzyMode {
    fn default() -> Self {
        Self::Heuristic
    }
}

impl FuzzyMode {
    /// Whether two normalized words are similar under this strategy.
    #[must_use]
    pub fn words_match(self, a: &str, b: &str) -> bool {
        match self {
            Self::Heuristic => similar_words(a, b),
            Self::EditDistance { max_distance } => {
                // Cheap length guard before running the DP
                let (la, lb) = (a.chars().count(), b.chars().count());
                la.abs_diff(lb) <= max_distance && levenshtein_distance(a, b) <= max_distance
            }
        }
    }
}

/// Storefront similarity heuristic between two normalized words.
///
/// Matches when either
/// - one word of at least three characters contains the other word minus its
///   last character, or
/// - the lengths differ by at most one and both words agree on their shared
///   length minus one leading characters.
///
/// This is not an edit-distance bound: a one-character word has an empty stem
/// and therefore matches nearly every word.
#[must_use]
pub fn similar_words(a: &str, b: &str) -> bool {
    let la = a.chars().count();
    let lb = b.chars().count();

    if (la >= 3 && a.contains(stem(b))) || (lb >= 3 && b.contains(stem(a))) {
        return true;
    }

    if la.abs_diff(lb) <= 1 {
        let shared = la.min(lb).saturating_sub(1);
        return prefix(a, shared) == prefix(b, shared);
    }

    false
}

/// Word without its last character.
fn stem(word: &str) -> &str {
    word.char_indices().last().map_or(word, |(idx, _)| &word[..idx])
}

/// First `n` characters of a word.
fn prefix(word: &str, n: usize) -> &str {
    word.char_indices().nth(n).map_or(word, |(idx, _)| &word[..idx])
}

/// Whether every query word is similar to at least one name word.
pub fn fuzzy_matches(query_words: &[&str], name_words: &[&str], mode: FuzzyMode) -> bool {
    !query_words.is_empty()
        && query_words
            .iter()
            .all(|q| name_words.iter().any(|w| mode.words_match(q, w)))
}

/// Calculate Levenshtein edit distance between two strings.
///
/// # Returns
/// Number of single-character edits needed to transform a into b
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rolling rows
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_typo_matches() {
        assert!(similar_words("arros", "arroz"));
        assert!(similar_words("feija", "feijao"));
    }

    #[test]
    fn test_stem_containment() {
        // "integral" contains "integ" (stem of "integr")
        assert!(similar_words("integr", "integral"));
    }

    #[test]
    fn test_unrelated_words() {
        assert!(!similar_words("arroz", "feijao"));
        assert!(!similar_words("leite", "cafe"));
    }

    #[test]
    fn test_single_char_matches_almost_anything() {
        assert!(similar_words("x", "arroz"));
        assert!(similar_words("x", "y"));
    }

    #[test]
    fn test_multibyte_words() {
        assert!(similar_words("maçã", "maçãs"));
        assert_eq!(stem("maçã"), "maç");
        assert_eq!(prefix("maçã", 2), "ma");
    }

    #[test]
    fn test_all_query_words_required() {
        let name = ["arroz", "integral", "5kg"];
        assert!(fuzzy_matches(&["arros", "integra"], &name, FuzzyMode::Heuristic));
        assert!(!fuzzy_matches(&["arros", "chocolate"], &name, FuzzyMode::Heuristic));
        assert!(!fuzzy_matches(&[], &name, FuzzyMode::Heuristic));
    }

    #[test]
    fn test_edit_distance_mode() {
        let mode = FuzzyMode::EditDistance { max_distance: 1 };
        assert!(mode.words_match("arros", "arroz"));
        assert!(!mode.words_match("x", "arroz"));
        assert!(!mode.words_match("aroz", "arrozes"));
    }

    #[test]
    fn test_levenshtein_same() {
        assert_eq!(levenshtein_distance("arroz", "arroz"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein_distance("arroz", "arros"), 1);
        assert_eq!(levenshtein_distance("acucar", "acuar"), 1);
        assert_eq!(levenshtein_distance("", "sal"), 3);
    }
}
