//! Heading-scoped slicing of wikitext.
//!
//! German Wiktionary entries hang their grammar, meaning, translation and
//! example blocks under `== ... ==` headings of varying depth; the
//! extractors scope their regex heuristics to one such span at a time.

use regex::Regex;

/// Return the text strictly between a `==heading==` marker (any depth ≥ 2,
/// case-insensitive, whitespace-tolerant) and the next heading of any
/// depth, or the end of the text. Empty string when the heading is absent.
pub fn extract_section(wikitext: &str, heading: &str) -> String {
    let pattern = format!(
        r"(?is)==+\s*{}\s*==+(.*?)(\n==+[^=\n]+==+|$)",
        regex::escape(heading)
    );
    // The heading is regex-escaped, so this pattern always compiles.
    match Regex::new(&pattern) {
        Ok(re) => re
            .captures(wikitext)
            .map(|cap| cap[1].to_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

/// The "Grammatische Merkmale" span, where rection and inflection notes live.
pub fn grammar_section(wikitext: &str) -> String {
    extract_section(wikitext, "Grammatische Merkmale")
}

/// The "Bedeutungen" span, the definition lines.
pub fn meanings_section(wikitext: &str) -> String {
    extract_section(wikitext, "Bedeutungen")
}
