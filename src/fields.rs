//! Template field map: the primary structured-data source.
//!
//! German Wiktionary overview templates ("Deutsch Verb Übersicht",
//! "Deutsch Substantiv Übersicht", ...) carry their data as one
//! `|key=value` parameter per line. Keys drift between ASCII and umlaut
//! spellings and between spaced/underscored variants, so lookups go
//! through a normalized key form and every logical field keeps an ordered
//! alias-key group on the caller side.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

use crate::cleanup::{cleanup_value, is_unknown, UNKNOWN};

lazy_static! {
    static ref PARAM_LINE: Regex = Regex::new(r"(?m)^\|\s*([^=\n]+?)\s*=\s*([^\n]*)").unwrap();
    static ref KEY_JUNK: Regex = Regex::new(r"[,\s_/.\-]+").unwrap();
}

/// Normalized field key → insertion-ordered, deduplicated cleaned values.
#[derive(Debug, Default, Clone)]
pub struct FieldMap {
    map: HashMap<String, Vec<String>>,
}

impl FieldMap {
    /// Values recorded under a (raw) key, empty slice when absent.
    pub fn get(&self, key: &str) -> &[String] {
        self.map
            .get(&normalize_field_name(key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn push(&mut self, key: String, value: String) {
        let values = self.map.entry(key).or_default();
        if !values.contains(&value) {
            values.push(value);
        }
    }
}

/// Lowercase a key and strip commas, whitespace, underscores, slashes,
/// dots and hyphens, so "Präsens_er, sie, es" and "Präsens_er_sie_es"
/// land on the same slot.
pub fn normalize_field_name(name: &str) -> String {
    KEY_JUNK.replace_all(&name.to_lowercase(), "").to_string()
}

/// Scan every single-line `|key=value` template parameter of the fragment.
/// Values go through [`cleanup_value`]; pairs whose cleaned value is
/// unknown are dropped entirely.
pub fn build_field_map(wikitext: &str) -> FieldMap {
    let mut map = FieldMap::default();
    for cap in PARAM_LINE.captures_iter(wikitext) {
        let key = normalize_field_name(&cap[1]);
        let value = cleanup_value(&cap[2]);
        if is_unknown(&value) {
            continue;
        }
        map.push(key, value);
    }
    map
}

/// First value found under the first alias key that has any, else the
/// sentinel. Callers express "first is preferred" through the order of
/// `keys`, not by overwriting the map.
pub fn pick_first_field_from_map(field_map: &FieldMap, keys: &[&str]) -> String {
    for key in keys {
        if let Some(value) = field_map.get(key).first() {
            return value.clone();
        }
    }
    UNKNOWN.to_string()
}

/// Convenience for one-off lookups that do not reuse the map.
pub fn pick_first_field(wikitext: &str, keys: &[&str]) -> String {
    pick_first_field_from_map(&build_field_map(wikitext), keys)
}
