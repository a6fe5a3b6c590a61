//! English gloss translations from `{{Ü|en|...}}`-family templates.

use lazy_static::lazy_static;
use regex::Regex;

use crate::cleanup::{cleanup_value, is_unknown};
use crate::sections::extract_section;

const MAX_TRANSLATIONS: usize = 10;

lazy_static! {
    // Covers the template-name spellings Ü, Ü?, Üt, Üxx with an English
    // target as the second parameter.
    static ref EN_TRANSLATION: Regex = Regex::new(r"\{\{Ü[^|}]*\|en\|([^}|]+)[^}]*\}\}").unwrap();
    // Informal fallback lines: "{{en}}: [[run]], [[sprint]]"
    static ref INFORMAL_EN_LINE: Regex = Regex::new(r"(?im)^[*:#\s]*\{\{en\}\}\s*:\s*(.+)$").unwrap();
    static ref LINK_TARGET: Regex = Regex::new(r"\[\[([^\]|]+)(?:\|[^\]]+)?\]\]").unwrap();
}

fn collect_templates(text: &str, out: &mut Vec<String>) {
    for cap in EN_TRANSLATION.captures_iter(text) {
        let cleaned = cleanup_value(&cap[1]);
        if !is_unknown(&cleaned) && !out.contains(&cleaned) {
            out.push(cleaned);
        }
    }
}

/// Scan the "Übersetzungen" section for English-target templates; rescan
/// the whole entry when the section yields nothing; finally fall back to
/// informal "{{en}}: [[term]], [[term]]" lines. Deduplicated, first-seen
/// order, capped at 10.
pub fn extract_translations(wikitext: &str) -> Vec<String> {
    let mut translations: Vec<String> = Vec::new();

    let section = extract_section(wikitext, "Übersetzungen");
    if !section.is_empty() {
        collect_templates(&section, &mut translations);
    }
    if translations.is_empty() {
        collect_templates(wikitext, &mut translations);
    }
    if translations.is_empty() {
        for cap in INFORMAL_EN_LINE.captures_iter(wikitext) {
            for link in LINK_TARGET.captures_iter(&cap[1]) {
                let cleaned = cleanup_value(&link[1]);
                if !is_unknown(&cleaned) && !translations.contains(&cleaned) {
                    translations.push(cleaned);
                }
            }
        }
    }

    translations.truncate(MAX_TRANSLATIONS);
    translations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_uebersetzungen_section() {
        let text = "== Übersetzungen ==\n{{Ü|en|go}} {{Ü|en|walk}}\n";
        assert_eq!(extract_translations(text), ["go", "walk"]);
    }

    #[test]
    fn handles_uet_spelling_with_extra_params() {
        let text = "== Übersetzungen ==\n{{Üt|en|run|ran}}\n";
        assert_eq!(extract_translations(text), ["run"]);
    }

    #[test]
    fn rescans_whole_entry_when_section_is_missing() {
        let text = "== Anderes ==\n{{Ü|en|run}}\n";
        assert_eq!(extract_translations(text), ["run"]);
    }

    #[test]
    fn informal_line_is_the_last_resort() {
        let text = "*{{en}}: [[run]], [[sprint]]\n";
        assert_eq!(extract_translations(text), ["run", "sprint"]);
    }

    #[test]
    fn template_hits_suppress_the_informal_fallback() {
        let text = "{{Ü|en|go}}\n*{{en}}: [[run]]\n";
        assert_eq!(extract_translations(text), ["go"]);
    }

    #[test]
    fn deduplicates_and_caps_at_ten() {
        let mut text = String::from("== Übersetzungen ==\n{{Ü|en|go}} {{Ü|en|go}}\n");
        for i in 0..12 {
            text.push_str(&format!("{{{{Ü|en|word{}}}}}\n", i));
        }
        let translations = extract_translations(&text);
        assert_eq!(translations.len(), 10);
        assert_eq!(translations[0], "go");
        assert_eq!(translations.iter().filter(|t| *t == "go").count(), 1);
    }

    #[test]
    fn ignores_non_english_targets() {
        let text = "== Übersetzungen ==\n{{Ü|fr|aller}}\n";
        assert!(extract_translations(text).is_empty());
    }

    #[test]
    fn empty_everywhere_yields_empty_list() {
        assert!(extract_translations("nichts hier").is_empty());
    }
}
