//! Noun extraction: grammatical gender (rendered as the definite article)
//! and the plural surface form.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::cleanup::UNKNOWN;
use crate::fields::pick_first_field;

lazy_static! {
    static ref NOUN_MARKER: Regex = Regex::new(r"(?i)\{\{\s*Wortart\|Substantiv\|Deutsch").unwrap();
    static ref NOUN_OVERVIEW: Regex = Regex::new(r"(?i)Deutsch Substantiv Übersicht").unwrap();
    static ref GENUS_M: Regex = Regex::new(r"(?i)\|\s*Genus\s*=\s*m\b").unwrap();
    static ref GENUS_F: Regex = Regex::new(r"(?i)\|\s*Genus\s*=\s*f\b").unwrap();
    static ref GENUS_N: Regex = Regex::new(r"(?i)\|\s*Genus\s*=\s*n\b").unwrap();
    // The bare gender markers are case-sensitive: {{M}} is a different template.
    static ref BARE_M: Regex = Regex::new(r"\{\{\s*m\s*\}\}").unwrap();
    static ref BARE_F: Regex = Regex::new(r"\{\{\s*f\s*\}\}").unwrap();
    static ref BARE_N: Regex = Regex::new(r"\{\{\s*n\s*\}\}").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounInfo {
    /// "der" / "die" / "das", or the sentinel.
    pub article: String,
    pub plural: String,
}

/// Extract gender and plural for entries carrying a noun word-class or
/// overview-template marker; `None` otherwise. Gender resolution order:
/// explicit `Genus=` field, then bare `{{m}}/{{f}}/{{n}}` marker, else
/// unknown. Gender and plural are never cross-validated.
pub fn extract_noun_info(wikitext: &str) -> Option<NounInfo> {
    if !NOUN_MARKER.is_match(wikitext) && !NOUN_OVERVIEW.is_match(wikitext) {
        return None;
    }

    let article = if GENUS_M.is_match(wikitext) || BARE_M.is_match(wikitext) {
        "der"
    } else if GENUS_F.is_match(wikitext) || BARE_F.is_match(wikitext) {
        "die"
    } else if GENUS_N.is_match(wikitext) || BARE_N.is_match(wikitext) {
        "das"
    } else {
        UNKNOWN
    };

    let plural = pick_first_field(wikitext, &["Nominativ Plural", "Plural"]);

    Some(NounInfo {
        article: article.to_string(),
        plural,
    })
}
