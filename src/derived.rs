//! Derived-term candidates: compounds, word formations and subterms that
//! point back at the current headword.

use lazy_static::lazy_static;
use regex::Regex;

use crate::cleanup::{cleanup_value, is_unknown};

const MAX_DERIVED: usize = 30;

/// Heading-text substrings whose zones carry derived terms.
const DERIVED_HEADINGS: &[&str] = &[
    "Abgeleitete Begriffe",
    "Wortbildungen",
    "Unterbegriffe",
    "Wortfamilie",
];

lazy_static! {
    static ref LINK_TARGET: Regex = Regex::new(r"\[\[([^\]|]+)(?:\|[^\]]+)?\]\]").unwrap();
    static ref DERIVATION_TEMPLATE: Regex =
        Regex::new(r"(?i)\{\{(?:Derivat(?:iv)?|Wortbildung)[^}|]*\|([^}|]+)[^}]*\}\}").unwrap();
}

/// Slice the zone under any heading whose text contains `substring`.
fn heading_zone(wikitext: &str, substring: &str) -> String {
    let pattern = format!(
        r"(?is)==+[^=\n]*{}[^=\n]*==+(.*?)(\n==+[^=\n]+==+|$)",
        regex::escape(substring)
    );
    match Regex::new(&pattern) {
        Ok(re) => re
            .captures(wikitext)
            .map(|cap| cap[1].to_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

fn collect_targets(zone: &str, title: &str, out: &mut Vec<String>) {
    let mut push = |raw: &str| {
        let cleaned = cleanup_value(raw);
        if is_unknown(&cleaned) {
            return;
        }
        if cleaned.to_lowercase() == title.to_lowercase() {
            return;
        }
        if !out.contains(&cleaned) {
            out.push(cleaned);
        }
    };

    for cap in LINK_TARGET.captures_iter(zone) {
        push(&cap[1]);
    }
    for cap in DERIVATION_TEMPLATE.captures_iter(zone) {
        push(&cap[1]);
    }
}

/// Collect candidate derived terms from the derived-term heading zones,
/// excluding the entry's own title. When the zones yield nothing, fall
/// back to scanning the whole document for link/template targets that
/// contain the title as a substring. Capped at 30.
pub fn extract_derived_variants(wikitext: &str, title: &str) -> Vec<String> {
    let mut variants: Vec<String> = Vec::new();

    for heading in DERIVED_HEADINGS {
        let zone = heading_zone(wikitext, heading);
        if !zone.is_empty() {
            collect_targets(&zone, title, &mut variants);
        }
    }

    if variants.is_empty() && !title.is_empty() {
        let needle = title.to_lowercase();
        let mut push = |raw: &str| {
            let cleaned = cleanup_value(raw);
            if is_unknown(&cleaned) {
                return;
            }
            let lowered = cleaned.to_lowercase();
            if lowered == needle || !lowered.contains(&needle) {
                return;
            }
            if !variants.contains(&cleaned) {
                variants.push(cleaned);
            }
        };
        for cap in LINK_TARGET.captures_iter(wikitext) {
            push(&cap[1]);
        }
        for cap in DERIVATION_TEMPLATE.captures_iter(wikitext) {
            push(&cap[1]);
        }
    }

    variants.truncate(MAX_DERIVED);
    variants
}
