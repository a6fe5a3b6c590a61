//! The top-level entry record and the two-pass parse with fallback merge.
//!
//! `parse_entry` runs every extractor over one entry's wikitext. When a
//! second parsed entry is supplied (typically the base lemma's page for
//! an inflected form), its known values fill the primary entry's unknown
//! slots without ever overwriting extracted data.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::cleanup::is_unknown;
use crate::derived::extract_derived_variants;
use crate::examples::{extract_examples, Example};
use crate::noun::{extract_noun_info, NounInfo};
use crate::pos::{detect_part_of_speech, PartOfSpeech};
use crate::translations::extract_translations;
use crate::verb::{extract_verb_info, Conjugation, VerbInfo};

/// Note appended when no translation source produced anything.
const NO_TRANSLATIONS_NOTE: &str = "No English translations were extracted from this entry.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// The word the caller asked about, NFC-normalized.
    pub source_word: String,
    /// The page title the wikitext came from, NFC-normalized.
    pub title: String,
    pub part_of_speech: PartOfSpeech,
    pub translations: Vec<String>,
    pub examples: Vec<Example>,
    pub derived_variants: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub noun_info: Option<NounInfo>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub verb_info: Option<VerbInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
}

/// Fill-only merge: known values in `self` always win; unknown or empty
/// slots take the fallback's value. Merging is recursive through nested
/// records and never mixes values within one collection.
pub trait MergeUnknown {
    fn merge_unknown(&mut self, fallback: &Self);
}

impl MergeUnknown for String {
    fn merge_unknown(&mut self, fallback: &Self) {
        if is_unknown(self) && !is_unknown(fallback) {
            *self = fallback.clone();
        }
    }
}

impl MergeUnknown for Vec<String> {
    fn merge_unknown(&mut self, fallback: &Self) {
        if self.is_empty() && !fallback.is_empty() {
            *self = fallback.clone();
        }
    }
}

impl MergeUnknown for Vec<Example> {
    fn merge_unknown(&mut self, fallback: &Self) {
        if self.is_empty() && !fallback.is_empty() {
            *self = fallback.clone();
        }
    }
}

impl<T: MergeUnknown + Clone> MergeUnknown for Option<T> {
    fn merge_unknown(&mut self, fallback: &Self) {
        match (self.as_mut(), fallback) {
            (Some(primary), Some(secondary)) => primary.merge_unknown(secondary),
            (None, Some(secondary)) => *self = Some(secondary.clone()),
            _ => {}
        }
    }
}

impl MergeUnknown for PartOfSpeech {
    fn merge_unknown(&mut self, fallback: &Self) {
        if *self == PartOfSpeech::Unknown {
            *self = *fallback;
        }
    }
}

impl MergeUnknown for Conjugation {
    fn merge_unknown(&mut self, fallback: &Self) {
        self.ich.merge_unknown(&fallback.ich);
        self.du.merge_unknown(&fallback.du);
        self.er_sie_es.merge_unknown(&fallback.er_sie_es);
        self.wir.merge_unknown(&fallback.wir);
        self.ihr.merge_unknown(&fallback.ihr);
        self.sie.merge_unknown(&fallback.sie);
    }
}

impl MergeUnknown for NounInfo {
    fn merge_unknown(&mut self, fallback: &Self) {
        self.article.merge_unknown(&fallback.article);
        self.plural.merge_unknown(&fallback.plural);
    }
}

impl MergeUnknown for VerbInfo {
    fn merge_unknown(&mut self, fallback: &Self) {
        self.present.merge_unknown(&fallback.present);
        self.preterite.merge_unknown(&fallback.preterite);
        self.past_participle.merge_unknown(&fallback.past_participle);
        self.case_governance.merge_unknown(&fallback.case_governance);
        self.case_governance_summary
            .merge_unknown(&fallback.case_governance_summary);
        self.case_governance_details
            .merge_unknown(&fallback.case_governance_details);
        self.infinitive_forms.merge_unknown(&fallback.infinitive_forms);
        self.reflexive.merge_unknown(&fallback.reflexive);
        self.reflexive_details.merge_unknown(&fallback.reflexive_details);
        self.present_conjugation
            .merge_unknown(&fallback.present_conjugation);
        self.preterite_conjugation
            .merge_unknown(&fallback.preterite_conjugation);
        self.auxiliary_verbs.merge_unknown(&fallback.auxiliary_verbs);
        self.perfect_conjugation
            .merge_unknown(&fallback.perfect_conjugation);
    }
}

impl MergeUnknown for Entry {
    fn merge_unknown(&mut self, fallback: &Self) {
        self.part_of_speech.merge_unknown(&fallback.part_of_speech);
        self.translations.merge_unknown(&fallback.translations);
        self.examples.merge_unknown(&fallback.examples);
        self.derived_variants.merge_unknown(&fallback.derived_variants);
        self.noun_info.merge_unknown(&fallback.noun_info);
        self.verb_info.merge_unknown(&fallback.verb_info);
    }
}

/// Parse one entry's wikitext into a structured record. The optional
/// `fallback` entry fills any remaining unknown slots; a note is added
/// when even the merged record has no translations.
pub fn parse_entry(
    source_word: &str,
    title: &str,
    wikitext: &str,
    fallback: Option<&Entry>,
) -> Entry {
    let title: String = title.nfc().collect();

    let mut entry = Entry {
        source_word: source_word.nfc().collect(),
        part_of_speech: detect_part_of_speech(wikitext),
        translations: extract_translations(wikitext),
        examples: extract_examples(wikitext),
        derived_variants: extract_derived_variants(wikitext, &title),
        noun_info: extract_noun_info(wikitext),
        verb_info: extract_verb_info(wikitext, &title),
        notes: Vec::new(),
        title,
    };

    if let Some(fallback) = fallback {
        entry.merge_unknown(fallback);
    }

    if entry.translations.is_empty() {
        entry.notes.push(NO_TRANSLATIONS_NOTE.to_string());
    }

    entry
}
