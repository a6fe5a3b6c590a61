//! Inflected-form detection and base-lemma resolution.
//!
//! Pages for conjugated or declined forms carry "this is a form of X"
//! markers instead of full grammar tables; the caller uses these helpers
//! to decide whether to fetch the base lemma's page and merge it in.

use lazy_static::lazy_static;
use regex::Regex;

use crate::cleanup::{cleanup_value, is_unknown};
use crate::sections::grammar_section;

lazy_static! {
    // Ordered: explicit lemma-reference templates first, then free-text
    // "Grundform:" links, then plural-of-noun phrasings.
    static ref LEMMA_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)\{\{\s*Grundformverweis[^|}]*\|([^|}\n]+)[^}]*\}\}").unwrap(),
        Regex::new(r"(?i)\{\{\s*Form von\|([^|}\n]+)[^}]*\}\}").unwrap(),
        Regex::new(r"(?i)Grundform:\s*\[\[([^\]|]+)(?:\|[^\]]+)?\]\]").unwrap(),
        Regex::new(r"(?i)Plural(?:form)?(?:\s+des\s+Substantivs)?\s*\[\[([^\]|]+)(?:\|[^\]]+)?\]\]")
            .unwrap(),
        Regex::new(r"(?i)Nominativ\s+Plural\s+des\s+Substantivs\s*\[\[([^\]|]+)(?:\|[^\]]+)?\]\]")
            .unwrap(),
    ];
    static ref INFLECTED_MARKERS: Regex = Regex::new(
        r"(?i)Grundformverweis|Form von|Grundform:|flektierte Form|Nominativ\s+Plural\s+des\s+Substantivs|Pluralform\s+des\s+Substantivs"
    )
    .unwrap();
}

/// First cleaned lemma target (from the grammar section, else the whole
/// entry) whose normalized form differs from the current title.
pub fn extract_lemma_candidate(wikitext: &str, title: &str) -> Option<String> {
    let grammar = grammar_section(wikitext);
    let zone = if grammar.is_empty() { wikitext } else { &grammar };

    for pattern in LEMMA_PATTERNS.iter() {
        if let Some(cap) = pattern.captures(zone) {
            let lemma = cleanup_value(&cap[1]);
            if !is_unknown(&lemma) && lemma.to_lowercase() != title.to_lowercase() {
                return Some(lemma);
            }
        }
    }
    None
}

/// Quick test for any inflected-form marker vocabulary; used to decide
/// whether lemma resolution is worth attempting for an entry with an
/// unknown part of speech.
pub fn has_inflected_form_markers(wikitext: &str) -> bool {
    let grammar = grammar_section(wikitext);
    let zone = if grammar.is_empty() { wikitext } else { &grammar };
    INFLECTED_MARKERS.is_match(zone)
}
