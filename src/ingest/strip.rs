//! Quote and signature stripping.
//!
//! Quote boundaries are an ordered rule table evaluated for the *leftmost*
//! match across all rules, not the first rule that matches anywhere. The
//! body is truncated at that boundary, then again at the earliest signature
//! delimiter, then trimmed.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// What a quote-boundary rule recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    /// "On ... wrote:" attribution line.
    OnWrote,
    /// "----- Original Message -----" banner.
    OriginalMessage,
    /// A horizontal rule of 3 or more underscores.
    UnderscoreRule,
    /// Forwarded "From:/Sent:/To:" header block.
    HeaderBlock,
    /// "El ... escribió:" attribution line.
    ElEscribio,
    /// A line starting with the ">" quote marker.
    QuotedLine,
}

/// A quote-boundary rule: everything from its match onward is quoted text.
struct QuoteRule {
    kind: QuoteKind,
    regex: Regex,
}

static QUOTE_RULES: LazyLock<Vec<QuoteRule>> = LazyLock::new(|| {
    [
        (QuoteKind::OnWrote, r"(?im)^\s*On\s+.+wrote:\s*$"),
        (QuoteKind::OriginalMessage, r"(?i)-{3,}\s*Original Message\s*-{3,}"),
        (QuoteKind::UnderscoreRule, r"(?m)^_{3,}"),
        (QuoteKind::HeaderBlock, r"(?ims)^From:.+?Sent:.+?To:"),
        (QuoteKind::ElEscribio, r"(?im)^\s*El\s+.+escribió:\s*$"),
        (QuoteKind::QuotedLine, r"(?m)^>"),
    ]
    .into_iter()
    .map(|(kind, pattern)| QuoteRule {
        kind,
        regex: Regex::new(pattern).unwrap(),
    })
    .collect()
});

/// Signature delimiters, tried in order; the earliest index found wins.
const SIGNATURE_DELIMITERS: [&str; 6] =
    ["-- ", "\n--\n", "\n___", "\n---", "\nSaludos,", "\nGracias,"];

/// Find the earliest quote boundary over the union of all rules.
pub fn find_quote_boundary(text: &str) -> Option<(usize, QuoteKind)> {
    let mut earliest: Option<(usize, QuoteKind)> = None;
    for rule in QUOTE_RULES.iter() {
        if let Some(m) = rule.regex.find(text)
            && earliest.is_none_or(|(start, _)| m.start() < start)
        {
            earliest = Some((m.start(), rule.kind));
        }
    }
    earliest
}

/// Remove quoted original messages and the trailing signature from a reply
/// body. Absence of any marker returns the input trimmed unchanged; the
/// operation is a projection (`strip(strip(x)) == strip(x)`).
pub fn strip_quotes_and_signature(body: &str) -> String {
    let mut text = body.trim();

    if let Some((start, kind)) = find_quote_boundary(text) {
        debug!(kind = ?kind, "Truncating quoted text");
        text = text[..start].trim_end();
    }

    let mut cut: Option<usize> = None;
    for delimiter in SIGNATURE_DELIMITERS {
        if let Some(idx) = text.find(delimiter) {
            cut = Some(cut.map_or(idx, |earliest| earliest.min(idx)));
        }
    }
    if let Some(idx) = cut {
        text = &text[..idx];
    }

    text.trim().to_string()
}
