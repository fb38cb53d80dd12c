//! Candidate answer-sentence extraction from a cleaned reply body.
//!
//! One sentence per line, top to bottom, in order. Enumeration markers
//! ("1.", "2)") are stripped; bare pronoun labels and punctuation-only
//! lines are skipped.

use std::sync::LazyLock;

use regex::Regex;

/// Default maximum number of sentences pulled from a reply.
pub const MAX_SENTENCES: usize = 5;

static ENUMERATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[.)]\s*").unwrap());

static PUNCTUATION_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s\W]+$").unwrap());

static SPANISH_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-ZáéíóúñÁÉÍÓÚÑ]").unwrap());

/// Pronoun tokens that appear alone on a line when the user labels answers.
const BARE_PRONOUNS: [&str; 8] = [
    "yo", "tú", "él", "ella", "nosotros", "nosotras", "ellos", "ellas",
];

/// Extract up to `max` candidate sentences, preserving line order.
/// Never fails; returns an empty list when nothing qualifies.
pub fn extract_sentences(text: &str, max: usize) -> Vec<String> {
    let mut sentences = Vec::new();
    for raw_line in text.lines() {
        let line = ENUMERATION.replace(raw_line.trim(), "").trim().to_string();
        if line.is_empty() || PUNCTUATION_ONLY.is_match(&line) {
            continue;
        }
        let lower = line.to_lowercase();
        if BARE_PRONOUNS.iter().any(|pronoun| lower == *pronoun) {
            continue;
        }
        if SPANISH_LETTER.is_match(&line) && line.chars().count() > 2 {
            sentences.push(line);
            if sentences.len() >= max {
                break;
            }
        }
    }
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_sentence_per_line_in_order() {
        let text = "Yo llevaré el libro.\nTú llevabas el bolso.\nElla lleva la maleta.";
        assert_eq!(
            extract_sentences(text, MAX_SENTENCES),
            vec![
                "Yo llevaré el libro.",
                "Tú llevabas el bolso.",
                "Ella lleva la maleta.",
            ]
        );
    }

    #[test]
    fn enumeration_markers_are_stripped() {
        let text = "1. Yo llevaré el libro.\n2) Tú llevabas el bolso.\n 3.  Ella lleva la maleta.";
        assert_eq!(
            extract_sentences(text, MAX_SENTENCES),
            vec![
                "Yo llevaré el libro.",
                "Tú llevabas el bolso.",
                "Ella lleva la maleta.",
            ]
        );
    }

    #[test]
    fn bare_pronoun_lines_are_skipped() {
        assert_eq!(
            extract_sentences("yo\ntú\nComí pan.", MAX_SENTENCES),
            vec!["Comí pan."]
        );
    }

    #[test]
    fn bare_pronoun_check_is_case_insensitive() {
        assert_eq!(
            extract_sentences("YO\nEllos\nNosotras comimos pan.", MAX_SENTENCES),
            vec!["Nosotras comimos pan."]
        );
    }

    #[test]
    fn punctuation_only_lines_are_skipped() {
        let text = "---\n...\n!!!\nComí pan.";
        assert_eq!(extract_sentences(text, MAX_SENTENCES), vec!["Comí pan."]);
    }

    #[test]
    fn blank_and_numbered_blank_lines_are_skipped() {
        let text = "\n  \n4.\nComí pan.";
        assert_eq!(extract_sentences(text, MAX_SENTENCES), vec!["Comí pan."]);
    }

    #[test]
    fn short_fragments_are_skipped() {
        // Two characters or fewer never qualify.
        assert_eq!(extract_sentences("sí\nno\nComí pan.", MAX_SENTENCES), vec!["Comí pan."]);
    }

    #[test]
    fn accented_sentences_are_accepted() {
        let text = "Él comió ñoquis.";
        assert_eq!(extract_sentences(text, MAX_SENTENCES), vec!["Él comió ñoquis."]);
    }

    #[test]
    fn cap_is_enforced() {
        let text = "Uno dos tres.\nCuatro cinco.\nSeis siete.\nOcho nueve.\nDiez once.\nDoce trece.\nCatorce quince.";
        let sentences = extract_sentences(text, 5);
        assert_eq!(sentences.len(), 5);
        assert_eq!(sentences[0], "Uno dos tres.");
        assert_eq!(sentences[4], "Diez once.");
    }

    #[test]
    fn extraction_never_reorders() {
        let text = "yo\nZeta al final no.\n...\nAlfa primero sí.";
        assert_eq!(
            extract_sentences(text, MAX_SENTENCES),
            vec!["Zeta al final no.", "Alfa primero sí."]
        );
    }

    #[test]
    fn nothing_qualifying_yields_empty() {
        assert!(extract_sentences("", MAX_SENTENCES).is_empty());
        assert!(extract_sentences("1.\n2.\n---", MAX_SENTENCES).is_empty());
        assert!(extract_sentences("yo\ntú\nél", MAX_SENTENCES).is_empty());
    }
}
