//! Text normalization for case and accent insensitive comparison.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize text for comparison.
///
/// Decomposes to NFD, drops combining marks (accents), lowercases, removes
/// every character that is neither alphanumeric nor whitespace and collapses
/// runs of whitespace to a single space.
///
/// ```
/// use storefront_search::normalize;
///
/// assert_eq!(normalize("  Café  Pilão, 500g! "), "cafe pilao 500g");
/// assert_eq!(normalize("Pão-de-Açúcar"), "paodeacucar");
/// ```
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.nfd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase) {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else if ch.is_alphanumeric() {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }

    out
}

/// Normalize an optional field, treating `None` as empty.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Split normalized text into words.
pub fn words(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_accents_and_case() {
        assert_eq!(normalize("AÇÚCAR Refinado"), "acucar refinado");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("\tarroz   \n integral  "), "arroz integral");
    }

    #[test]
    fn test_drops_punctuation() {
        assert_eq!(normalize("Óleo (soja) 900ml."), "oleo soja 900ml");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("!!!"), "");
        assert_eq!(normalize_opt(None), "");
    }

    #[test]
    fn test_punctuation_only_word_does_not_leave_double_space() {
        assert_eq!(normalize("leite - integral"), "leite integral");
    }

    #[test]
    fn test_words() {
        let n = normalize("Feijão Carioca 1kg");
        assert_eq!(words(&n).collect::<Vec<_>>(), vec!["feijao", "carioca", "1kg"]);
    }
}
