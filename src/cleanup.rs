//! Markup normalization: best-effort plain text out of wikitext fragments.
//!
//! Every extractor works on the output of these helpers, so they never fail:
//! unmatched markup is simply left in place and empty/placeholder values
//! collapse to the [`UNKNOWN`] sentinel.

use lazy_static::lazy_static;
use regex::Regex;

/// Sentinel for any field that could not be extracted.
pub const UNKNOWN: &str = "Unknown";

lazy_static! {
    static ref HTML_COMMENT: Regex = Regex::new(r"<!--.*?-->").unwrap();
    static ref REF_BLOCK: Regex = Regex::new(r"(?is)<ref[^>]*>.*?</ref>").unwrap();
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref PIPED_LINK: Regex = Regex::new(r"\[\[([^|\]]+)\|([^\]]+)\]\]").unwrap();
    static ref PLAIN_LINK: Regex = Regex::new(r"\[\[([^\]]+)\]\]").unwrap();
    // Only templates without nested braces; anything deeper stays literal.
    static ref FLAT_TEMPLATE: Regex = Regex::new(r"\{\{[^{}]*\}\}").unwrap();
    static ref QUOTE_MARKUP: Regex = Regex::new(r"'''+|''").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// True for the empty string and the `"Unknown"` sentinel.
pub fn is_unknown(value: &str) -> bool {
    value.is_empty() || value == UNKNOWN
}

/// Strip comments, refs, tags, links, flat templates and quote markup from
/// a wikitext fragment and collapse whitespace. Empty or placeholder
/// ("-", "—") results become [`UNKNOWN`].
pub fn cleanup_value(value: &str) -> String {
    let cleaned = value.trim();
    let cleaned = HTML_COMMENT.replace_all(cleaned, "");
    let cleaned = REF_BLOCK.replace_all(&cleaned, "");
    let cleaned = HTML_TAG.replace_all(&cleaned, "");
    let cleaned = PIPED_LINK.replace_all(&cleaned, "$2");
    let cleaned = PLAIN_LINK.replace_all(&cleaned, "$1");
    let cleaned = FLAT_TEMPLATE.replace_all(&cleaned, "");
    let cleaned = QUOTE_MARKUP.replace_all(&cleaned, "");
    let cleaned = WHITESPACE.replace_all(&cleaned, " ");
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned == "-" || cleaned == "—" {
        UNKNOWN.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Lighter normalization for pattern scanning: resolve links to display
/// text, blank out tags and quote markup, collapse whitespace. Unlike
/// [`cleanup_value`] this keeps template bodies, since the governance and
/// reflexivity rules match inside them.
pub fn to_searchable_text(value: &str) -> String {
    let text = PIPED_LINK.replace_all(value, "$2");
    let text = PLAIN_LINK.replace_all(&text, "$1");
    let text = HTML_TAG.replace_all(&text, " ");
    let text = QUOTE_MARKUP.replace_all(&text, "");
    WHITESPACE.replace_all(&text, " ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_unknown() {
        assert_eq!(cleanup_value(""), UNKNOWN);
        assert_eq!(cleanup_value("   "), UNKNOWN);
    }

    #[test]
    fn placeholder_dashes_are_unknown() {
        assert_eq!(cleanup_value("-"), UNKNOWN);
        assert_eq!(cleanup_value("—"), UNKNOWN);
    }

    #[test]
    fn strips_comments_and_refs() {
        assert_eq!(cleanup_value("geht<!-- check -->"), "geht");
        assert_eq!(cleanup_value("geht<ref name=\"x\">Quelle</ref>"), "geht");
    }

    #[test]
    fn resolves_links_to_display_text() {
        assert_eq!(cleanup_value("[[gehen]]"), "gehen");
        assert_eq!(cleanup_value("[[gehen|ging]]"), "ging");
    }

    #[test]
    fn strips_flat_templates_but_keeps_nested_literal() {
        assert_eq!(cleanup_value("vor {{m}} Haus"), "vor Haus");
        // Nested braces do not match the flat-template pattern; the inner
        // pair is removed, the outer shell stays literal.
        let cleaned = cleanup_value("{{a|{{b}}}}");
        assert!(cleaned.contains("{{a|"));
    }

    #[test]
    fn collapses_quote_markup_and_whitespace() {
        assert_eq!(cleanup_value("'''ging'''   weg"), "ging weg");
        assert_eq!(cleanup_value("''kursiv''"), "kursiv");
    }

    #[test]
    fn unmatched_markup_stays_literal() {
        assert_eq!(cleanup_value("[[kaputt"), "[[kaputt");
    }

    #[test]
    fn searchable_text_keeps_template_bodies() {
        let text = to_searchable_text("{{K|mit [[Dativ]]}}");
        assert!(text.contains("mit Dativ"));
    }

    #[test]
    fn is_unknown_matches_sentinel_and_empty() {
        assert!(is_unknown(""));
        assert!(is_unknown(UNKNOWN));
        assert!(!is_unknown("gehen"));
    }
}
