//! Word-class detection from `{{Wortart|...|Deutsch}}` marker templates.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    static ref VERB_MARKER: Regex = Regex::new(r"(?i)\{\{\s*Wortart\|Verb\|Deutsch").unwrap();
    static ref NOUN_MARKER: Regex = Regex::new(r"(?i)\{\{\s*Wortart\|Substantiv\|Deutsch").unwrap();
    static ref ADJECTIVE_MARKER: Regex =
        Regex::new(r"(?i)\{\{\s*Wortart\|Adjektiv\|Deutsch").unwrap();
}

/// The four word-class tags an entry can carry. No multi-class support:
/// the first matching marker wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PartOfSpeech {
    Verb,
    Noun,
    Adjective,
    #[default]
    Unknown,
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            PartOfSpeech::Verb => "Verb",
            PartOfSpeech::Noun => "Noun",
            PartOfSpeech::Adjective => "Adjective",
            PartOfSpeech::Unknown => "Unknown",
        };
        f.write_str(tag)
    }
}

/// Test the word-class markers in Verb → Noun → Adjective order.
pub fn detect_part_of_speech(wikitext: &str) -> PartOfSpeech {
    if VERB_MARKER.is_match(wikitext) {
        PartOfSpeech::Verb
    } else if NOUN_MARKER.is_match(wikitext) {
        PartOfSpeech::Noun
    } else if ADJECTIVE_MARKER.is_match(wikitext) {
        PartOfSpeech::Adjective
    } else {
        PartOfSpeech::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_each_marker() {
        assert_eq!(
            detect_part_of_speech("{{Wortart|Verb|Deutsch}}"),
            PartOfSpeech::Verb
        );
        assert_eq!(
            detect_part_of_speech("{{Wortart|Substantiv|Deutsch}}"),
            PartOfSpeech::Noun
        );
        assert_eq!(
            detect_part_of_speech("{{Wortart|Adjektiv|Deutsch}}"),
            PartOfSpeech::Adjective
        );
    }

    #[test]
    fn verb_marker_wins_over_later_noun_marker() {
        let text = "{{Wortart|Verb|Deutsch}} {{Wortart|Substantiv|Deutsch}}";
        assert_eq!(detect_part_of_speech(text), PartOfSpeech::Verb);
    }

    #[test]
    fn tolerates_leading_whitespace_and_case() {
        assert_eq!(
            detect_part_of_speech("{{ wortart|verb|deutsch}}"),
            PartOfSpeech::Verb
        );
    }

    #[test]
    fn no_marker_is_unknown() {
        assert_eq!(
            detect_part_of_speech("== irgendein Text =="),
            PartOfSpeech::Unknown
        );
        assert_eq!(
            detect_part_of_speech("{{Wortart|Verb|Englisch}}"),
            PartOfSpeech::Unknown
        );
    }

    #[test]
    fn serializes_as_plain_tag() {
        assert_eq!(
            serde_json::to_string(&PartOfSpeech::Adjective).unwrap(),
            "\"Adjective\""
        );
    }
}
