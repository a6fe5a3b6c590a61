//! Example-sentence highlighting: wrap the surface forms implied by an
//! entry's verb/adjective data in `<strong>` tags, on top of an
//! HTML-escaped copy of the sentence.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::entry::Entry;
use crate::pos::PartOfSpeech;
use crate::verb::VerbInfo;

/// Prefixes that detach from separable German verbs ("kam ... an").
static SEPARABLE_PREFIXES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "ab",
        "an",
        "auf",
        "aus",
        "bei",
        "ein",
        "empor",
        "entgegen",
        "fern",
        "fest",
        "fort",
        "frei",
        "gegenueber",
        "gegenüber",
        "gleich",
        "heim",
        "her",
        "herab",
        "heran",
        "herauf",
        "heraus",
        "herein",
        "herum",
        "herunter",
        "hin",
        "hinab",
        "hinauf",
        "hinaus",
        "hinein",
        "hinterher",
        "hinweg",
        "hoch",
        "los",
        "mit",
        "nach",
        "nieder",
        "preis",
        "vor",
        "voran",
        "vorbei",
        "vorweg",
        "weg",
        "weiter",
        "wieder",
        "zurecht",
        "zurueck",
        "zurück",
        "zusammen",
        "zu",
    ])
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// A conjugated form written as "stem prefix" ("kam an"); the prefix
/// rejoins the stem in the infinitive and joined preterite forms.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SeparablePair {
    stem: String,
    prefix: String,
}

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Run `replace` over the text segments of `html` only; anything shaped
/// like a tag passes through untouched, so earlier passes' `<strong>`
/// wrappers are never matched again.
fn apply_on_text_segments<F: Fn(&str) -> String>(html: &str, replace: F) -> String {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for tag in TAG.find_iter(html) {
        out.push_str(&replace(&html[last..tag.start()]));
        out.push_str(tag.as_str());
        last = tag.end();
    }
    out.push_str(&replace(&html[last..]));
    out
}

fn is_skippable_token(token: &str) -> bool {
    token.is_empty() || token.eq_ignore_ascii_case("unknown")
}

fn add_token(tokens: &mut Vec<String>, value: &str) {
    let token = value.trim();
    if is_skippable_token(token) || token.contains(char::is_whitespace) {
        return;
    }
    if !tokens.iter().any(|t| t == token) {
        tokens.push(token.to_string());
    }
}

/// Parse a "stem prefix" two-token form; both tokens must be at least
/// two characters and the second must be a known separable prefix.
fn parse_separable_pair(value: &str) -> Option<SeparablePair> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    let &[stem, prefix] = parts.as_slice() else {
        return None;
    };
    if stem.chars().count() < 2 || prefix.chars().count() < 2 {
        return None;
    }
    if !SEPARABLE_PREFIXES.contains(prefix.to_lowercase().as_str()) {
        return None;
    }
    Some(SeparablePair {
        stem: stem.to_string(),
        prefix: prefix.to_string(),
    })
}

fn collect_verb_tokens(
    verb: &VerbInfo,
    tokens: &mut Vec<String>,
    pairs: &mut Vec<SeparablePair>,
    pair_prefixes: &mut HashSet<String>,
) {
    add_token(tokens, &verb.present);
    add_token(tokens, &verb.preterite);
    add_token(tokens, &verb.past_participle);

    for form in &verb.infinitive_forms {
        add_token(tokens, form);
        if let Some(pair) = parse_separable_pair(form) {
            pair_prefixes.insert(pair.prefix.to_lowercase());
            if !pairs.contains(&pair) {
                pairs.push(pair);
            }
        }
    }

    for table in [&verb.present_conjugation, &verb.preterite_conjugation] {
        for form in table.forms() {
            add_token(tokens, form);
            if let Some(pair) = parse_separable_pair(form) {
                pair_prefixes.insert(pair.prefix.to_lowercase());
                let joined = format!("{}{}", pair.prefix, pair.stem);
                // Joined preterite-like inflection: "ankam" -> "ankamen".
                if !joined.to_lowercase().ends_with("en") {
                    add_token(tokens, &format!("{}en", joined));
                }
                add_token(tokens, &joined);
                if !pairs.contains(&pair) {
                    pairs.push(pair);
                }
            }
        }
    }
}

/// Tokens and separable pairs implied by the entry, tokens sorted by
/// descending length so longer matches are wrapped first.
fn build_match_inventory(entry: &Entry) -> (Vec<String>, Vec<SeparablePair>) {
    let mut tokens: Vec<String> = Vec::new();
    let mut pairs: Vec<SeparablePair> = Vec::new();
    let mut pair_prefixes: HashSet<String> = HashSet::new();

    add_token(&mut tokens, &entry.source_word);
    add_token(&mut tokens, &entry.title);

    if let Some(verb) = &entry.verb_info {
        collect_verb_tokens(verb, &mut tokens, &mut pairs, &mut pair_prefixes);
    }

    let title = entry.title.trim();
    if !title.is_empty() && entry.part_of_speech == PartOfSpeech::Verb {
        for prefix in &pair_prefixes {
            if title.to_lowercase().starts_with(prefix.as_str())
                && title.chars().count() > prefix.chars().count() + 1
            {
                let base = &title[prefix.len()..];
                add_token(&mut tokens, &format!("{}zu{}", prefix, base));
            }
        }
    }

    tokens.sort_by(|a, b| b.len().cmp(&a.len()));
    (tokens, pairs)
}

/// HTML-escape the sentence and wrap every surface occurrence of the
/// entry's match inventory in `<strong>` tags: split separable pairs
/// first (stem and prefix up to 120 characters apart), then whole-word
/// tokens, then adjective inflectional endings.
pub fn highlight_example_text(raw: &str, entry: &Entry) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let (tokens, pairs) = build_match_inventory(entry);
    let mut html = escape_html(raw);

    for pair in &pairs {
        let pattern = format!(
            r"(?is)\b({})\b(.{{0,120}}?)\b({})\b",
            regex::escape(&pair.stem),
            regex::escape(&pair.prefix)
        );
        if let Ok(re) = Regex::new(&pattern) {
            html = apply_on_text_segments(&html, |segment| {
                re.replace_all(segment, "<strong>$1</strong>$2<strong>$3</strong>")
                    .into_owned()
            });
        }
    }

    for token in &tokens {
        let pattern = format!(r"(?i)\b({})\b", regex::escape(token));
        if let Ok(re) = Regex::new(&pattern) {
            html = apply_on_text_segments(&html, |segment| {
                re.replace_all(segment, "<strong>$1</strong>").into_owned()
            });
        }
    }

    highlight_adjective_inflections(&html, entry)
}

/// For adjective entries with a purely alphabetic title, also wrap the
/// title plus any of the endings e/en/em/er/es.
fn highlight_adjective_inflections(html: &str, entry: &Entry) -> String {
    if entry.part_of_speech != PartOfSpeech::Adjective {
        return html.to_string();
    }
    let lemma = entry.title.trim();
    if lemma.is_empty() || !lemma.chars().all(|c| c.is_alphabetic()) {
        return html.to_string();
    }

    let pattern = format!(r"(?i)\b({}(?:e|en|em|er|es))\b", regex::escape(lemma));
    match Regex::new(&pattern) {
        Ok(re) => apply_on_text_segments(html, |segment| {
            re.replace_all(segment, "<strong>$1</strong>").into_owned()
        }),
        Err(_) => html.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::parse_entry;

    const ANKOMMEN: &str = "\
{{Wortart|Verb|Deutsch}}\n\
{{Deutsch Verb Übersicht\n\
|Präsens_ich=komme an\n\
|Präsens_du=kommst an\n\
|Präteritum_ich=kam an\n\
|Partizip II=angekommen\n\
|Hilfsverb=sein\n\
}}\n";

    fn ankommen_entry() -> Entry {
        parse_entry("ankommen", "ankommen", ANKOMMEN, None)
    }

    #[test]
    fn escapes_html_and_still_highlights() {
        let entry = parse_entry("klar", "klar", "{{Wortart|Adjektiv|Deutsch}}", None);
        let html = highlight_example_text("<b>klar</b> & klarer", &entry);
        assert!(!html.contains("<b>"));
        assert!(html.contains("&amp;"));
        assert!(html.contains("<strong>klar</strong>"));
    }

    #[test]
    fn split_separable_form_marks_stem_and_prefix() {
        let entry = ankommen_entry();
        let html = highlight_example_text("Er kam gestern spät an.", &entry);
        assert!(html.contains("<strong>kam</strong>"));
        assert!(html.contains("<strong>an</strong>"));
    }

    #[test]
    fn joined_preterite_forms_are_marked() {
        let entry = ankommen_entry();
        assert!(
            highlight_example_text("Als er ankam, war es dunkel.", &entry)
                .contains("<strong>ankam</strong>")
        );
        assert!(
            highlight_example_text("Sie ankamen spät.", &entry)
                .contains("<strong>ankamen</strong>")
        );
    }

    #[test]
    fn unrelated_compounds_are_left_alone() {
        let entry = ankommen_entry();
        let html = highlight_example_text("Der Ankömmling wartete.", &entry);
        assert!(!html.contains("<strong>"));
    }

    #[test]
    fn zu_infinitive_is_synthesized_for_separable_verbs() {
        let entry = ankommen_entry();
        let html = highlight_example_text("Es ist schwer, pünktlich anzukommen.", &entry);
        assert!(html.contains("<strong>anzukommen</strong>"));
    }

    #[test]
    fn infinitive_itself_is_marked() {
        let entry = ankommen_entry();
        let html = highlight_example_text("Wir werden morgen ankommen.", &entry);
        assert!(html.contains("<strong>ankommen</strong>"));
    }

    #[test]
    fn adjective_endings_are_covered() {
        let entry = parse_entry("schnell", "schnell", "{{Wortart|Adjektiv|Deutsch}}", None);
        let html = highlight_example_text("Ein schnelles Auto ist schnell.", &entry);
        assert!(html.contains("<strong>schnelles</strong>"));
        assert!(html.contains("<strong>schnell</strong>"));
    }

    #[test]
    fn earlier_markup_is_never_rewrapped() {
        let entry = ankommen_entry();
        let html = highlight_example_text("Er kam an und kam an.", &entry);
        assert!(!html.contains("<strong><strong>"));
    }

    #[test]
    fn unknown_and_multiword_tokens_are_excluded() {
        let entry = parse_entry("Unknown", "Unknown", "nichts", None);
        let html = highlight_example_text("Das ist unknown.", &entry);
        assert!(!html.contains("<strong>"));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(highlight_example_text("", &ankommen_entry()), "");
    }

    #[test]
    fn tokens_with_regex_metacharacters_are_escaped() {
        let entry = parse_entry("a.b", "a.b", "nichts", None);
        let html = highlight_example_text("axb steht hier.", &entry);
        assert!(!html.contains("<strong>"));
    }
}
