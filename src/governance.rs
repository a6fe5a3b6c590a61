//! Case-government (valency) and reflexivity detection.
//!
//! Rection markers are scattered across grammar sections, meaning lines
//! and free text, in a dozen overlapping notations. Each notation is one
//! evidence rule; the rules run in a fixed order over the section-scoped
//! text (with the whole entry as secondary source, since many entries put
//! their markers outside the strict section blocks) and the matches are
//! normalized and deduplicated into one ordered detail list.

use lazy_static::lazy_static;
use regex::Regex;

use crate::cleanup::{is_unknown, to_searchable_text, UNKNOWN};
use crate::sections::{grammar_section, meanings_section};

lazy_static! {
    static ref SIMPLE_CASE: Regex = Regex::new(r"(?i)mit\s+(Akkusativ|Dativ|Genitiv)\b").unwrap();
    static ref COMBINED_CASE: Regex =
        Regex::new(r"(?i)mit\s+(Akkusativ|Dativ|Genitiv)\s+und\s+(Akkusativ|Dativ|Genitiv)\b")
            .unwrap();
    static ref PERSON_MARKER: Regex =
        Regex::new(r"(?i)jemande[mnrs]?\s*\((Dativ|Akkusativ|Genitiv)\)").unwrap();
    static ref PERSON_MARKER_SHORT: Regex =
        Regex::new(r"(?i)jemande[mnrs]?\s*\((Dat\.|Akk\.|Gen\.)\)").unwrap();
    static ref PREP_CASE: Regex =
        Regex::new(r"(?i)mit\s+([a-zäöüß]{1,18})\s*\+\s*(Akkusativ|Dativ|Genitiv)\b").unwrap();
    // No trailing \b after the abbreviation groups: a word boundary can
    // never sit between the literal dot and a following space, and the dot
    // is already a hard delimiter.
    static ref PREP_CASE_SHORT: Regex =
        Regex::new(r"(?i)(?:mit\s+)?([a-zäöüß]{1,18})\s*\+\s*(Akk\.|Dat\.|Gen\.)").unwrap();
    static ref CASE_OBJECT: Regex =
        Regex::new(r"(?i)(Akkusativobjekt|Dativobjekt|Genitivobjekt)").unwrap();
    static ref GENERIC_CASE: Regex =
        Regex::new(r"(?i)(?:\(|\b)(Akk\.|Dat\.|Gen\.)").unwrap();
    static ref SHORTHAND: Regex =
        Regex::new(r"(?i)\b(etw\.|jdn\.|jdm\.)\s*(Akk\.|Dat\.|Gen\.)").unwrap();
    static ref BARE_JDM: Regex = Regex::new(r"(?i)\bjdm\.").unwrap();
    static ref BARE_JDN: Regex = Regex::new(r"(?i)\bjdn\.").unwrap();
    static ref BARE_JMDN: Regex = Regex::new(r"(?i)\bjmdn\.").unwrap();
    static ref PREP_VALENCY: Regex =
        Regex::new(r"(?i)\b([a-zäöüß]{2,16})\s+(jdm\.|jdn\.|jmdn\.)").unwrap();

    // Detail normalization: fold the case spellings to canonical forms.
    static ref WS: Regex = Regex::new(r"\s+").unwrap();
    static ref AKK_WORD: Regex = Regex::new(r"(?i)\bakkusativ\b").unwrap();
    static ref AKK_ABBR: Regex = Regex::new(r"(?i)akk\.").unwrap();
    static ref DAT_WORD: Regex = Regex::new(r"(?i)\bdativ\b").unwrap();
    static ref DAT_ABBR: Regex = Regex::new(r"(?i)dat\.").unwrap();
    static ref GEN_WORD: Regex = Regex::new(r"(?i)\bgenitiv\b").unwrap();
    static ref GEN_ABBR: Regex = Regex::new(r"(?i)gen\.").unwrap();

    // Reflexivity markers.
    static ref REFLEXIV_WORD: Regex = Regex::new(r"(?i)\breflexiv\b").unwrap();
    static ref REFLEXIVE_WORTART: Regex =
        Regex::new(r"(?i)Wortart\|reflexives?\s+Verb\|Deutsch").unwrap();
    static ref REFL_TEMPLATE: Regex = Regex::new(r"(?i)\{\{\s*refl\.?\s*\}\}|\{\{\s*refl\|").unwrap();
    static ref SICH_VALENCY: Regex = Regex::new(
        r"(?i)jdn\.\s*/\s*sich|jdm\.\s*/\s*sich|sich\s*/\s*jdn\.|sich\s*/\s*jdm\."
    )
    .unwrap();
}

/// Canonicalize one evidence string: collapse whitespace and fold
/// akkusativ/Akk./dativ/Dat./genitiv/Gen. spellings.
fn normalize_governance_detail(detail: &str) -> String {
    let d = WS.replace_all(detail, " ");
    let d = AKK_WORD.replace_all(&d, "Akkusativ");
    let d = AKK_ABBR.replace_all(&d, "Akkusativ");
    let d = DAT_WORD.replace_all(&d, "Dativ");
    let d = DAT_ABBR.replace_all(&d, "Dativ");
    let d = GEN_WORD.replace_all(&d, "Genitiv");
    let d = GEN_ABBR.replace_all(&d, "Genitiv");
    d.trim().to_string()
}

/// Grammar + meanings sections first, whole entry appended as secondary
/// source, resolved to plain searchable text.
fn searchable_scope(wikitext: &str) -> String {
    let grammar = grammar_section(wikitext);
    let meanings = meanings_section(wikitext);
    let mut parts: Vec<&str> = Vec::new();
    if !grammar.is_empty() {
        parts.push(&grammar);
    }
    if !meanings.is_empty() {
        parts.push(&meanings);
    }
    if !wikitext.is_empty() {
        parts.push(wikitext);
    }
    to_searchable_text(&parts.join("\n"))
}

/// Run the evidence-rule cascade and return the ordered, deduplicated
/// detail list.
pub fn extract_case_governance_details(wikitext: &str) -> Vec<String> {
    let text = searchable_scope(wikitext);
    if text.is_empty() {
        return Vec::new();
    }

    let mut details: Vec<String> = Vec::new();
    let mut push = |value: String| {
        let normalized = normalize_governance_detail(&value);
        if !normalized.is_empty() && !details.contains(&normalized) {
            details.push(normalized);
        }
    };

    for cap in SIMPLE_CASE.captures_iter(&text) {
        push(format!("mit {}", &cap[1]));
    }
    for cap in COMBINED_CASE.captures_iter(&text) {
        push(format!("mit {} und {}", &cap[1], &cap[2]));
    }
    for cap in PERSON_MARKER.captures_iter(&text) {
        push(format!("Marker: {}", &cap[1]));
    }
    for cap in PERSON_MARKER_SHORT.captures_iter(&text) {
        push(format!("Marker: {}", &cap[1]));
    }
    for cap in PREP_CASE.captures_iter(&text) {
        push(format!("{} + {}", &cap[1], &cap[2]));
    }
    for cap in PREP_CASE_SHORT.captures_iter(&text) {
        push(format!("{} + {}", &cap[1], &cap[2]));
    }
    for cap in CASE_OBJECT.captures_iter(&text) {
        let raw = cap[1].to_lowercase();
        if raw.starts_with("akkusativ") {
            push("Akkusativobjekt".to_string());
        } else if raw.starts_with("dativ") {
            push("Dativobjekt".to_string());
        } else {
            push("Genitivobjekt".to_string());
        }
    }
    // Abbreviated case markers that appear on their own in rection lines.
    for cap in GENERIC_CASE.captures_iter(&text) {
        push(format!("Marker: {}", &cap[1]));
    }
    // Dictionary shorthand: "etw. Akk.", "jdn. Akk.", "jdm. Dat."
    for cap in SHORTHAND.captures_iter(&text) {
        push(format!("{} {}", &cap[1], &cap[2]));
    }
    // Valency shorthand without an explicit case suffix.
    if BARE_JDM.is_match(&text) {
        push("jdm. (Dativ)".to_string());
    }
    if BARE_JDN.is_match(&text) {
        push("jdn. (Akkusativ)".to_string());
    }
    if BARE_JMDN.is_match(&text) {
        push("jmdn. (Akkusativ)".to_string());
    }
    // Preposition + valency shorthand: "bei jdm.", "auf jdn."
    for cap in PREP_VALENCY.captures_iter(&text) {
        let prep = &cap[1];
        if cap[2].eq_ignore_ascii_case("jdm.") {
            push(format!("{} + Dativ", prep));
        } else {
            push(format!("{} + Akkusativ", prep));
        }
    }

    details
}

/// Fold the detail list into one summary tag. Genitiv evidence stays in
/// the details but does not get its own summary tag; Genitiv-only
/// government therefore summarizes as unknown (observed source behavior).
pub fn summarize_case_governance(details: &[String]) -> String {
    if details.is_empty() {
        return UNKNOWN.to_string();
    }

    let text = details.join(" ").to_lowercase();
    let has_akk = text.contains("akkusativ") || text.contains("akk.");
    let has_dat = text.contains("dativ") || text.contains("dat.");

    if has_akk && has_dat {
        "Akkusativ+Dativ".to_string()
    } else if has_akk {
        "Akkusativ".to_string()
    } else if has_dat {
        "Dativ".to_string()
    } else {
        UNKNOWN.to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReflexiveInfo {
    pub is_reflexive: bool,
    pub details: Vec<String>,
}

/// Detect reflexive usage: a literal "reflexiv" token, a reflexive-verb
/// word-class marker, a `{{refl}}` template, "sich" within 40 characters
/// of the infinitive, or "/sich" valency notation. Any single hit sets
/// the flag; each hit is recorded as evidence.
pub fn detect_reflexive_info(wikitext: &str, infinitive: &str) -> ReflexiveInfo {
    let grammar = grammar_section(wikitext);
    let meanings = meanings_section(wikitext);
    let mut parts: Vec<&str> = Vec::new();
    if !grammar.is_empty() {
        parts.push(&grammar);
    }
    if !meanings.is_empty() {
        parts.push(&meanings);
    }
    if !wikitext.is_empty() {
        parts.push(wikitext);
    }
    let raw = parts.join("\n");
    if raw.is_empty() {
        return ReflexiveInfo::default();
    }
    let searchable = to_searchable_text(&raw);

    let mut details: Vec<String> = Vec::new();
    let mut push = |value: String| {
        let cleaned = WS.replace_all(&value, " ").trim().to_string();
        if !cleaned.is_empty() && !details.contains(&cleaned) {
            details.push(cleaned);
        }
    };

    if REFLEXIV_WORD.is_match(&searchable) {
        push("reflexiv".to_string());
    }
    if REFLEXIVE_WORTART.is_match(&raw) {
        push("Wortart: reflexives Verb".to_string());
    }
    if REFL_TEMPLATE.is_match(&raw) {
        push("refl. marker".to_string());
    }
    if !is_unknown(infinitive) {
        let pattern = format!(r"(?i)\bsich\b[^\n]{{0,40}}\b{}\b", regex::escape(infinitive));
        if let Ok(re) = Regex::new(&pattern) {
            if re.is_match(&searchable) {
                push(format!("sich {}", infinitive));
            }
        }
    }
    if SICH_VALENCY.is_match(&searchable) {
        push("valency: /sich".to_string());
    }

    ReflexiveInfo {
        is_reflexive: !details.is_empty(),
        details,
    }
}
