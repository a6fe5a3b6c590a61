//! Example-sentence extraction, with an optional paired English gloss.
//!
//! Three layered sources feed the list, each consulted only while the
//! running total is still under the cap: the "Beispiele" section, the
//! `{{Beispiele}}` template block, and finally generic numbered list
//! lines anywhere in the document.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::cleanup::{cleanup_value, is_unknown};
use crate::sections::extract_section;

const MAX_EXAMPLES: usize = 5;

lazy_static! {
    // Leading list markers and [1]-style sense indices.
    static ref LIST_MARKER: Regex = Regex::new(r"^[:#*\s]*(?:\[[^\]]*\]\s*)?").unwrap();
    static ref BEISPIELE_BLOCK: Regex =
        Regex::new(r"(?s)\{\{Beispiele\}\}(.*?)(\n\{\{|\z)").unwrap();
    static ref NUMBERED_LINE: Regex = Regex::new(r"(?m)^\s*:?\s*\[\d+[^\]]*\]\s*(.+)$").unwrap();
    // An em/en-dash or hyphen surrounded by spaces splits German from an
    // English gloss.
    static ref GLOSS_DASH: Regex = Regex::new(r"\s[—–-]\s").unwrap();
}

/// Common English stopwords; one hit marks the right-hand side of a
/// dash-split line as an English gloss rather than more German.
const ENGLISH_STOPWORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "to", "of", "and", "he", "she", "it", "they",
    "you", "i", "we", "his", "her", "their", "in", "on", "at", "with", "for", "that", "this",
    "not", "have", "has", "had", "my", "your",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub de: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub en: Option<String>,
}

fn looks_english(text: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|token| !token.is_empty())
        .any(|token| ENGLISH_STOPWORDS.contains(&token.to_lowercase().as_str()))
}

/// Clean one candidate line, split off an English gloss when the
/// right-hand side of a spaced dash looks English, and append the result
/// unless the German text is already collected.
fn push_line(line: &str, examples: &mut Vec<Example>) {
    if examples.len() >= MAX_EXAMPLES {
        return;
    }
    let stripped = LIST_MARKER.replace(line.trim(), "");
    let cleaned = cleanup_value(&stripped);
    if is_unknown(&cleaned) {
        return;
    }

    let example = match GLOSS_DASH.find(&cleaned) {
        Some(dash) => {
            let left = cleaned[..dash.start()].trim();
            let right = cleaned[dash.end()..].trim();
            if !left.is_empty() && !right.is_empty() && looks_english(right) {
                Example {
                    de: left.to_string(),
                    en: Some(right.to_string()),
                }
            } else {
                Example {
                    de: cleaned.clone(),
                    en: None,
                }
            }
        }
        None => Example {
            de: cleaned.clone(),
            en: None,
        },
    };

    if !examples.iter().any(|existing| existing.de == example.de) {
        examples.push(example);
    }
}

/// Collect up to five example sentences in document order.
pub fn extract_examples(wikitext: &str) -> Vec<Example> {
    let mut examples: Vec<Example> = Vec::new();

    let section = extract_section(wikitext, "Beispiele");
    for line in section.lines() {
        push_line(line, &mut examples);
    }

    if examples.len() < MAX_EXAMPLES {
        if let Some(cap) = BEISPIELE_BLOCK.captures(wikitext) {
            for line in cap[1].lines() {
                push_line(line, &mut examples);
            }
        }
    }

    if examples.len() < MAX_EXAMPLES {
        for cap in NUMBERED_LINE.captures_iter(wikitext) {
            push_line(&cap[1], &mut examples);
        }
    }

    examples
}
