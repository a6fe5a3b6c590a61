//! Verb extraction: infinitive, person-conjugation tables with
//! morphological fallback completion, participle, auxiliaries, the
//! derived perfect tense, case government and reflexivity.

use lazy_static::lazy_static;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::cleanup::{cleanup_value, is_unknown, UNKNOWN};
use crate::fields::{build_field_map, pick_first_field_from_map, FieldMap};
use crate::governance::{
    detect_reflexive_info, extract_case_governance_details, summarize_case_governance,
};

lazy_static! {
    static ref VERB_MARKER: Regex = Regex::new(r"(?i)\{\{\s*Wortart\|Verb\|Deutsch").unwrap();
    static ref VERB_OVERVIEW: Regex = Regex::new(r"(?i)Deutsch Verb Übersicht").unwrap();
}

/// Fixed six-person conjugation table. After fallback completion every
/// slot is populated to best effort; a slot stays at the sentinel only
/// when no extraction or morphological rule applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conjugation {
    pub ich: String,
    pub du: String,
    #[serde(rename = "er/sie/es")]
    pub er_sie_es: String,
    pub wir: String,
    pub ihr: String,
    pub sie: String,
}

impl Default for Conjugation {
    fn default() -> Self {
        Conjugation {
            ich: UNKNOWN.to_string(),
            du: UNKNOWN.to_string(),
            er_sie_es: UNKNOWN.to_string(),
            wir: UNKNOWN.to_string(),
            ihr: UNKNOWN.to_string(),
            sie: UNKNOWN.to_string(),
        }
    }
}

impl Conjugation {
    pub fn forms(&self) -> [&str; 6] {
        [
            &self.ich,
            &self.du,
            &self.er_sie_es,
            &self.wir,
            &self.ihr,
            &self.sie,
        ]
    }

    fn from_forms(forms: [String; 6]) -> Self {
        let [ich, du, er_sie_es, wir, ihr, sie] = forms;
        Conjugation {
            ich,
            du,
            er_sie_es,
            wir,
            ihr,
            sie,
        }
    }

    fn has_any_known(&self) -> bool {
        self.forms().iter().any(|form| !is_unknown(form))
    }
}

/// Closed alias-key groups for one tense. Overview templates spell the
/// person keys with umlauts or ASCII transliteration and with combined or
/// separate "wir, sie" slots; each group lists every observed spelling in
/// preference order.
pub struct ConjugationAliases {
    pub ich: &'static [&'static str],
    pub du: &'static [&'static str],
    pub er_sie_es: &'static [&'static str],
    pub wir: &'static [&'static str],
    pub ihr: &'static [&'static str],
    pub sie: &'static [&'static str],
}

pub const PRESENT_ALIASES: ConjugationAliases = ConjugationAliases {
    ich: &["Präsens_ich", "Praesens_ich"],
    du: &["Präsens_du", "Praesens_du"],
    er_sie_es: &[
        "Präsens_er, sie, es",
        "Präsens_er_sie_es",
        "Praesens_er,sie,es",
        "Praesens_er_sie_es",
    ],
    wir: &[
        "Präsens_wir",
        "Praesens_wir",
        "Präsens_wir, sie",
        "Präsens_wir_sie",
        "Praesens_wir,sie",
        "Praesens_wir_sie",
    ],
    ihr: &["Präsens_ihr", "Praesens_ihr"],
    sie: &[
        "Präsens_sie",
        "Praesens_sie",
        "Präsens_wir, sie",
        "Präsens_wir_sie",
        "Praesens_wir,sie",
        "Praesens_wir_sie",
    ],
};

pub const PRETERITE_ALIASES: ConjugationAliases = ConjugationAliases {
    ich: &["Präteritum_ich", "Praeteritum_ich"],
    du: &["Präteritum_du", "Praeteritum_du"],
    er_sie_es: &[
        "Präteritum_er, sie, es",
        "Präteritum_er_sie_es",
        "Praeteritum_er,sie,es",
        "Praeteritum_er_sie_es",
    ],
    wir: &[
        "Präteritum_wir",
        "Praeteritum_wir",
        "Präteritum_wir, sie",
        "Präteritum_wir_sie",
        "Praeteritum_wir,sie",
        "Praeteritum_wir_sie",
    ],
    ihr: &["Präteritum_ihr", "Praeteritum_ihr"],
    sie: &[
        "Präteritum_sie",
        "Praeteritum_sie",
        "Präteritum_wir, sie",
        "Präteritum_wir_sie",
        "Praeteritum_wir,sie",
        "Praeteritum_wir_sie",
    ],
};

/// Closed auxiliary conjugations used to derive the perfect tense.
static AUX_CONJUGATIONS: Lazy<HashMap<&'static str, [&'static str; 6]>> = Lazy::new(|| {
    HashMap::from([
        ("haben", ["habe", "hast", "hat", "haben", "habt", "haben"]),
        ("sein", ["bin", "bist", "ist", "sind", "seid", "sind"]),
    ])
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerbInfo {
    /// Infinitive (present) form.
    pub present: String,
    /// First/third-person singular preterite as a convenience scalar.
    pub preterite: String,
    pub past_participle: String,
    /// Summarized case tag; emitted under both of the original's keys.
    pub case_governance: String,
    pub case_governance_summary: String,
    pub case_governance_details: Vec<String>,
    pub infinitive_forms: Vec<String>,
    /// "Yes" when any reflexivity evidence was found, else the sentinel.
    pub reflexive: String,
    pub reflexive_details: Vec<String>,
    pub present_conjugation: Conjugation,
    pub preterite_conjugation: Conjugation,
    pub auxiliary_verbs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub perfect_conjugation: Option<Conjugation>,
}

/// Resolve one tense table from the field map. `None` only when every
/// person slot is unknown.
pub fn extract_conjugation(field_map: &FieldMap, aliases: &ConjugationAliases) -> Option<Conjugation> {
    let table = Conjugation {
        ich: pick_first_field_from_map(field_map, aliases.ich),
        du: pick_first_field_from_map(field_map, aliases.du),
        er_sie_es: pick_first_field_from_map(field_map, aliases.er_sie_es),
        wir: pick_first_field_from_map(field_map, aliases.wir),
        ihr: pick_first_field_from_map(field_map, aliases.ihr),
        sie: pick_first_field_from_map(field_map, aliases.sie),
    };
    table.has_any_known().then_some(table)
}

/// Case-insensitive ASCII suffix swap; `None` when the suffix is absent.
fn swap_suffix(form: &str, suffix: &str, replacement: &str) -> Option<String> {
    if ends_with_ci(form, suffix) {
        Some(format!("{}{}", &form[..form.len() - suffix.len()], replacement))
    } else {
        None
    }
}

fn ends_with_ci(form: &str, suffix: &str) -> bool {
    form.len() >= suffix.len()
        && form.is_char_boundary(form.len() - suffix.len())
        && form[form.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

/// Complete unknown present-tense slots from the infinitive: "wir" takes
/// the bare infinitive ("sind" for sein), "sie" copies "wir", "ihr" comes
/// from the sein/haben irregulars or from the "-en"→"-t" / "-st"→"-t"
/// endings of a known "wir" or "du".
pub fn fill_present_fallback(conjugation: Option<&Conjugation>, infinitive: &str) -> Conjugation {
    let mut result = conjugation.cloned().unwrap_or_default();
    if is_unknown(infinitive) {
        return result;
    }
    let inf = infinitive.to_lowercase();

    if is_unknown(&result.wir) {
        result.wir = if inf == "sein" {
            "sind".to_string()
        } else {
            infinitive.to_string()
        };
    }

    if is_unknown(&result.sie) && !is_unknown(&result.wir) {
        result.sie = result.wir.clone();
    }

    if is_unknown(&result.ihr) {
        if inf == "sein" {
            result.ihr = "seid".to_string();
        } else if inf == "haben" {
            result.ihr = "habt".to_string();
        } else if !is_unknown(&result.wir) && ends_with_ci(&result.wir, "en") {
            if let Some(form) = swap_suffix(&result.wir, "en", "t") {
                result.ihr = form;
            }
        } else if !is_unknown(&result.du) && ends_with_ci(&result.du, "st") {
            if let Some(form) = swap_suffix(&result.du, "st", "t") {
                result.ihr = form;
            }
        }
    }

    result
}

/// Complete unknown preterite slots. Irregular closed tables for sein and
/// haben; otherwise a known "ich" (or failing that "er/sie/es") becomes
/// the singular base, and the remaining persons derive from it by weak
/// endings. Extracted slots are never overwritten.
pub fn fill_preterite_fallback(conjugation: Option<&Conjugation>, infinitive: &str) -> Conjugation {
    let mut result = conjugation.cloned().unwrap_or_default();
    let inf = infinitive.to_lowercase();

    let irregular: Option<[&str; 6]> = match inf.as_str() {
        "sein" => Some(["war", "warst", "war", "waren", "wart", "waren"]),
        "haben" => Some(["hatte", "hattest", "hatte", "hatten", "hattet", "hatten"]),
        _ => None,
    };
    if let Some([ich, du, er, wir, ihr, sie]) = irregular {
        if is_unknown(&result.ich) {
            result.ich = ich.to_string();
        }
        if is_unknown(&result.du) {
            result.du = du.to_string();
        }
        if is_unknown(&result.er_sie_es) {
            result.er_sie_es = er.to_string();
        }
        if is_unknown(&result.wir) {
            result.wir = wir.to_string();
        }
        if is_unknown(&result.ihr) {
            result.ihr = ihr.to_string();
        }
        if is_unknown(&result.sie) {
            result.sie = sie.to_string();
        }
        return result;
    }

    if is_unknown(&result.ich) && !is_unknown(&result.er_sie_es) {
        // Reuse er/sie/es as the singular base.
        result.ich = result.er_sie_es.clone();
    }

    let singular_base = if !is_unknown(&result.ich) {
        result.ich.clone()
    } else if !is_unknown(&result.er_sie_es) {
        result.er_sie_es.clone()
    } else {
        return result;
    };

    if is_unknown(&result.er_sie_es) {
        result.er_sie_es = singular_base.clone();
    }
    if is_unknown(&result.wir) {
        result.wir = if ends_with_ci(&singular_base, "te") {
            format!("{}n", singular_base)
        } else {
            format!("{}en", singular_base)
        };
    }
    if is_unknown(&result.sie) && !is_unknown(&result.wir) {
        result.sie = result.wir.clone();
    }
    if is_unknown(&result.du) {
        result.du = format!("{}st", singular_base);
    }
    if is_unknown(&result.ihr) {
        if !is_unknown(&result.wir) && ends_with_ci(&result.wir, "en") {
            if let Some(form) = swap_suffix(&result.wir, "en", "t") {
                result.ihr = form;
            }
        } else {
            result.ihr = format!("{}t", singular_base);
        }
    }

    result
}

/// Auxiliary lemmas in declared order, deduplicated.
pub fn extract_auxiliary_verbs(field_map: &FieldMap) -> Vec<String> {
    let keys = ["Hilfsverb", "Hilfsverb_1", "Hilfsverb_2", "Perfekthilfsverb"];
    let mut values: Vec<String> = Vec::new();
    for key in keys {
        for value in field_map.get(key) {
            if !values.contains(value) {
                values.push(value.clone());
            }
        }
    }
    values
}

/// Derive the perfect table: per person, join the conjugated auxiliaries
/// (declared order, deduplicated, "/"-separated) with the participle.
/// `None` unless a participle and at least one mappable auxiliary exist.
pub fn build_perfect_conjugation(
    auxiliary_verbs: &[String],
    participle: &str,
) -> Option<Conjugation> {
    if is_unknown(participle) || auxiliary_verbs.is_empty() {
        return None;
    }

    let mut has_any = false;
    let forms: [String; 6] = std::array::from_fn(|person| {
        let mut aux_forms: Vec<&str> = Vec::new();
        for aux in auxiliary_verbs {
            if let Some(table) = AUX_CONJUGATIONS.get(aux.to_lowercase().as_str()) {
                if !aux_forms.contains(&table[person]) {
                    aux_forms.push(table[person]);
                }
            }
        }
        if aux_forms.is_empty() {
            UNKNOWN.to_string()
        } else {
            has_any = true;
            format!("{} {}", aux_forms.join("/"), participle)
        }
    });

    has_any.then(|| Conjugation::from_forms(forms))
}

/// Extract everything verb-shaped from an entry carrying a verb
/// word-class or overview-template marker; `None` otherwise.
/// `lemma_title` backstops the infinitive when no field supplies one.
pub fn extract_verb_info(wikitext: &str, lemma_title: &str) -> Option<VerbInfo> {
    if !VERB_MARKER.is_match(wikitext) && !VERB_OVERVIEW.is_match(wikitext) {
        return None;
    }

    let field_map = build_field_map(wikitext);

    let mut present = pick_first_field_from_map(
        &field_map,
        &["Infinitiv", "Infinitiv Präsens", "Infinitiv I", "Grundform"],
    );
    if is_unknown(&present) && !lemma_title.is_empty() {
        present = cleanup_value(lemma_title);
    }

    let present_conjugation = extract_conjugation(&field_map, &PRESENT_ALIASES);
    let preterite_conjugation = extract_conjugation(&field_map, &PRETERITE_ALIASES);

    let past_participle =
        pick_first_field_from_map(&field_map, &["Partizip II", "Partizip Perfekt"]);

    let auxiliary_verbs = extract_auxiliary_verbs(&field_map);
    let perfect_conjugation = build_perfect_conjugation(&auxiliary_verbs, &past_participle);

    let case_governance_details = extract_case_governance_details(wikitext);
    let case_governance_summary = summarize_case_governance(&case_governance_details);
    let reflexive_info = detect_reflexive_info(wikitext, &present);

    let completed_present = fill_present_fallback(present_conjugation.as_ref(), &present);
    let completed_preterite = fill_preterite_fallback(preterite_conjugation.as_ref(), &present);

    let mut infinitive_forms = vec![present.clone()];
    if reflexive_info.is_reflexive && !is_unknown(&present) {
        let reflexive_form = format!("sich {}", present);
        if !infinitive_forms.contains(&reflexive_form) {
            infinitive_forms.push(reflexive_form);
        }
    }

    let preterite = pick_first_field_from_map(
        &field_map,
        &[
            "Präteritum_ich",
            "Präteritum_er, sie, es",
            "Praeteritum_ich",
            "Praeteritum_er,sie,es",
            "Präteritum",
        ],
    );

    Some(VerbInfo {
        present,
        preterite,
        past_participle,
        case_governance: case_governance_summary.clone(),
        case_governance_summary,
        case_governance_details,
        infinitive_forms,
        reflexive: if reflexive_info.is_reflexive {
            "Yes".to_string()
        } else {
            UNKNOWN.to_string()
        },
        reflexive_details: reflexive_info.details,
        present_conjugation: completed_present,
        preterite_conjugation: completed_preterite,
        auxiliary_verbs,
        perfect_conjugation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEHEN: &str = "\
{{Wortart|Verb|Deutsch}}\n\
{{Deutsch Verb Übersicht\n\
|Präsens_ich=gehe\n\
|Präsens_du=gehst\n\
|Präsens_er, sie, es=geht\n\
|Präteritum_ich=ging\n\
|Partizip II=gegangen\n\
|Hilfsverb_1=sein\n\
}}\n";

    #[test]
    fn gehen_fixture_builds_the_full_record() {
        let info = extract_verb_info(GEHEN, "gehen").unwrap();
        assert_eq!(info.present, "gehen");
        assert_eq!(info.preterite, "ging");
        assert_eq!(info.past_participle, "gegangen");
        assert_eq!(info.auxiliary_verbs, ["sein"]);

        let perfect = info.perfect_conjugation.unwrap();
        assert_eq!(perfect.ich, "bin gegangen");
        assert_eq!(perfect.wir, "sind gegangen");
    }

    #[test]
    fn present_fallback_completes_plural_slots() {
        let info = extract_verb_info(GEHEN, "gehen").unwrap();
        let present = &info.present_conjugation;
        assert_eq!(present.ich, "gehe");
        assert_eq!(present.wir, "gehen");
        assert_eq!(present.sie, "gehen");
        assert_eq!(present.ihr, "geht");
    }

    #[test]
    fn preterite_fallback_derives_weak_endings() {
        let table = Conjugation {
            ich: "machte".to_string(),
            ..Conjugation::default()
        };
        let filled = fill_preterite_fallback(Some(&table), "machen");
        assert_eq!(filled.er_sie_es, "machte");
        assert_eq!(filled.wir, "machten");
        assert_eq!(filled.sie, "machten");
        assert_eq!(filled.du, "machtest");
        // "ihr" comes from wir "-en"->"-t", so weak verbs get "machtt"
        // rather than the grammatical "machtet"; observed source behavior,
        // not a contract.
        assert_eq!(filled.ihr, "machtt");
    }

    #[test]
    fn preterite_fallback_uses_er_sie_es_as_base() {
        let table = Conjugation {
            er_sie_es: "ging".to_string(),
            ..Conjugation::default()
        };
        let filled = fill_preterite_fallback(Some(&table), "gehen");
        assert_eq!(filled.ich, "ging");
        assert_eq!(filled.wir, "gingen");
        assert_eq!(filled.ihr, "gingt");
    }

    #[test]
    fn preterite_fallback_never_overwrites_extracted_slots() {
        let table = Conjugation {
            ich: "ging".to_string(),
            ihr: "ginget".to_string(),
            ..Conjugation::default()
        };
        let filled = fill_preterite_fallback(Some(&table), "gehen");
        assert_eq!(filled.ihr, "ginget");
    }

    #[test]
    fn sein_and_haben_use_irregular_tables() {
        let sein = fill_preterite_fallback(None, "sein");
        assert_eq!(sein.ich, "war");
        assert_eq!(sein.ihr, "wart");
        let haben = fill_preterite_fallback(None, "haben");
        assert_eq!(haben.du, "hattest");
        assert_eq!(haben.sie, "hatten");

        let present_sein = fill_present_fallback(None, "sein");
        assert_eq!(present_sein.wir, "sind");
        assert_eq!(present_sein.ihr, "seid");
    }

    #[test]
    fn no_base_leaves_preterite_unknown() {
        let filled = fill_preterite_fallback(None, "rennen");
        assert_eq!(filled.ich, UNKNOWN);
        assert_eq!(filled.wir, UNKNOWN);
    }

    #[test]
    fn unknown_infinitive_leaves_present_untouched() {
        let filled = fill_present_fallback(None, UNKNOWN);
        assert_eq!(filled.wir, UNKNOWN);
    }

    #[test]
    fn ihr_derives_from_du_when_wir_has_no_en_ending() {
        let table = Conjugation {
            du: "läufst".to_string(),
            wir: "laufex".to_string(),
            ..Conjugation::default()
        };
        let filled = fill_present_fallback(Some(&table), "laufen");
        assert_eq!(filled.ihr, "läuft");
    }

    #[test]
    fn auxiliaries_are_deduplicated_in_order() {
        let map = build_field_map("|Hilfsverb=haben\n|Hilfsverb_1=sein\n|Hilfsverb_2=haben\n");
        assert_eq!(extract_auxiliary_verbs(&map), ["haben", "sein"]);
    }

    #[test]
    fn perfect_joins_multiple_auxiliaries_with_slash() {
        let aux = vec!["haben".to_string(), "sein".to_string()];
        let perfect = build_perfect_conjugation(&aux, "geflogen").unwrap();
        assert_eq!(perfect.ich, "habe/bin geflogen");
        assert_eq!(perfect.er_sie_es, "hat/ist geflogen");
    }

    #[test]
    fn perfect_requires_participle_and_auxiliary() {
        assert!(build_perfect_conjugation(&[], "gegangen").is_none());
        assert!(build_perfect_conjugation(&["sein".to_string()], UNKNOWN).is_none());
        // An auxiliary outside the closed vocabulary maps nothing.
        assert!(build_perfect_conjugation(&["werden".to_string()], "gegangen").is_none());
    }

    #[test]
    fn ascii_alias_keys_resolve_like_umlaut_keys() {
        let map = build_field_map("|Praesens_ich=gehe\n|Praeteritum_er,sie,es=ging\n");
        let present = extract_conjugation(&map, &PRESENT_ALIASES).unwrap();
        assert_eq!(present.ich, "gehe");
        let preterite = extract_conjugation(&map, &PRETERITE_ALIASES).unwrap();
        assert_eq!(preterite.er_sie_es, "ging");
    }

    #[test]
    fn combined_wir_sie_key_fills_both_slots() {
        let map = build_field_map("|Präsens_wir, sie=gehen\n");
        let present = extract_conjugation(&map, &PRESENT_ALIASES).unwrap();
        assert_eq!(present.wir, "gehen");
        assert_eq!(present.sie, "gehen");
    }

    #[test]
    fn all_unknown_table_is_absent() {
        let map = build_field_map("|Genus=n\n");
        assert!(extract_conjugation(&map, &PRESENT_ALIASES).is_none());
    }

    #[test]
    fn reflexive_entry_gets_sich_infinitive_form() {
        let text = "\
{{Wortart|Verb|Deutsch}}\n\
|Infinitiv=erinnern\n\
== Grammatische Merkmale ==\nreflexiv\n";
        let info = extract_verb_info(text, "erinnern").unwrap();
        assert_eq!(info.reflexive, "Yes");
        assert_eq!(
            info.infinitive_forms,
            ["erinnern".to_string(), "sich erinnern".to_string()]
        );
    }

    #[test]
    fn erinnern_fixture_case_governance() {
        let text = "\
{{Wortart|Verb|Deutsch}}\n\
|Infinitiv=erinnern\n\
== Grammatische Merkmale ==\nreflexiv\n\
== Bedeutungen ==\njdn. Akk. an etw. Akk. erinnern\n";
        let info = extract_verb_info(text, "erinnern").unwrap();
        assert_eq!(info.case_governance, "Akkusativ");
        assert_eq!(info.reflexive, "Yes");
        assert!(info
            .case_governance_details
            .contains(&"jdn. (Akkusativ)".to_string()));
    }

    #[test]
    fn lemma_title_backstops_the_infinitive() {
        let info = extract_verb_info("{{Wortart|Verb|Deutsch}}", "laufen").unwrap();
        assert_eq!(info.present, "laufen");
        assert_eq!(info.present_conjugation.wir, "laufen");
    }

    #[test]
    fn non_verb_entries_yield_nothing() {
        assert!(extract_verb_info("{{Wortart|Substantiv|Deutsch}}", "Haus").is_none());
    }
}
