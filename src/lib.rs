//! Extraction of structured German dictionary records from German
//! Wiktionary wikitext, plus an example-sentence highlighter built on the
//! extracted data.
//!
//! The entry point for whole pages is [`parse_entry`]; the individual
//! extractors are exported for callers that only need one aspect.

pub mod cleanup;
pub mod derived;
pub mod entry;
pub mod examples;
pub mod fields;
pub mod governance;
pub mod highlight;
pub mod lemma;
pub mod noun;
pub mod pos;
pub mod sections;
pub mod translations;
pub mod verb;

pub use cleanup::{cleanup_value, is_unknown, to_searchable_text, UNKNOWN};
pub use derived::extract_derived_variants;
pub use entry::{parse_entry, Entry, MergeUnknown};
pub use examples::{extract_examples, Example};
pub use fields::{build_field_map, FieldMap};
pub use governance::{
    detect_reflexive_info, extract_case_governance_details, summarize_case_governance,
    ReflexiveInfo,
};
pub use highlight::{escape_html, highlight_example_text};
pub use lemma::{extract_lemma_candidate, has_inflected_form_markers};
pub use noun::{extract_noun_info, NounInfo};
pub use pos::{detect_part_of_speech, PartOfSpeech};
pub use translations::extract_translations;
pub use verb::{extract_verb_info, Conjugation, VerbInfo};
