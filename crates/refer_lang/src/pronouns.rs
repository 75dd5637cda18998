//! Pronoun set model.
//!
//! A pronoun set is a named mapping from canonical `"female|male"` phrase pairs to the
//! replacement wording a player selected for a Sim. Built-in sets ship with each language
//! handler; user-authored sets arrive as JSON and are merged underneath the built-ins.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::handlers::LanguageHandler;

/// All pronoun sets known to a resolution call, keyed by set id.
pub type PronounSetTable = IndexMap<String, PronounSet>;

/// One named pronoun set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PronounSet {
    /// Display title, e.g. "They / Them".
    #[serde(rename = "Title")]
    pub title: String,

    /// Replacements keyed by the canonical `"female|male"` pair identifier.
    #[serde(rename = "Set")]
    pub pairs: IndexMap<String, PairValue>,
}

/// The replacement a pronoun set assigns to one gendered pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PairValue {
    /// Keep one side of the pair: `0` for the female-side text, `1` for the male-side text.
    /// Any other value behaves like no selection at all.
    Selector(i64),

    /// Replace the pair with this text verbatim. Empty or whitespace-only text behaves
    /// like an absent entry.
    Literal(String),

    /// Replacements that vary per string and per occurrence within that string.
    Cases(CaseTable),
}

/// Per-string replacement overrides for one pair.
///
/// `cases` maps a string's key to replacements for each eligible pair occurrence in that
/// string, in document order. A missing key, an out-of-range occurrence, or an explicit
/// `null` entry falls back to `default`, and past that to the subject's fallback selector.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseTable {
    #[serde(rename = "Default", default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(rename = "Cases", default, deserialize_with = "deserialize_case_keys")]
    pub cases: HashMap<u32, Vec<Option<String>>>,
}

/// Parse the `Cases` map with explicit string-to-`u32` key conversion.
///
/// JSON map keys are always strings, and serde_json's usual numeric key coercion is lost
/// when this table is reached through `PairValue`'s untagged-enum buffering, so the keys
/// have to be parsed by hand.
fn deserialize_case_keys<'de, D>(
    deserializer: D,
) -> std::result::Result<HashMap<u32, Vec<Option<String>>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = HashMap::<String, Vec<Option<String>>>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| {
            let key = key
                .parse::<u32>()
                .map_err(|_| D::Error::custom(format!("invalid case key `{key}`")))?;
            Ok((key, value))
        })
        .collect()
}

/// Parse user-authored pronoun sets from their JSON shape:
/// `{"<set id>": {"Title": "...", "Set": {"she|he": "they", ...}}}`.
pub fn custom_sets_from_json(json: &str) -> Result<PronounSetTable> {
    Ok(serde_json::from_str(json)?)
}

/// Merge custom sets with a handler's built-in sets into one lookup table.
///
/// Custom sets go in first and built-ins are layered on top, so a custom set that reuses a
/// reserved id loses to the canonical built-in definition.
pub fn merged_pronoun_sets(
    custom_sets: &PronounSetTable,
    handler: &dyn LanguageHandler,
) -> PronounSetTable {
    let mut merged = custom_sets.clone();
    merged.extend(handler.standard_pronoun_sets());
    merged
}

/// Build the canonical `"female|male"` lookup identifier for a pair of tag texts.
///
/// Each side is canonicalized by the handler and stripped of any `|` it may contain, so the
/// separator stays unambiguous.
pub fn pair_identifier(
    female_text: &str,
    male_text: &str,
    handler: &dyn LanguageHandler,
) -> String {
    let female_part = handler.tag_text_identifier_part(female_text).replace('|', "");
    let male_part = handler.tag_text_identifier_part(male_text).replace('|', "");

    format!("{female_part}|{male_part}")
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::handlers::english::EnglishHandler;
    use crate::pronouns::{
        custom_sets_from_json, merged_pronoun_sets, pair_identifier, PairValue,
    };

    #[test]
    fn custom_sets_parse_from_json() {
        let sets = custom_sets_from_json(
            r#"{
                "my-set": {
                    "Title": "Custom",
                    "Set": {
                        "she|he": "they",
                        "her|him": 1,
                        "she’s|he’s": { "Default": "they’re", "Cases": { "42": ["they’ve", null] } }
                    }
                }
            }"#,
        )
        .unwrap();

        let set = &sets["my-set"];
        assert_eq!(set.title, "Custom");
        assert_eq!(set.pairs["she|he"], PairValue::Literal("they".to_owned()));
        assert_eq!(set.pairs["her|him"], PairValue::Selector(1));

        let PairValue::Cases(table) = &set.pairs["she’s|he’s"] else {
            panic!("expected a case table");
        };
        assert_eq!(table.default.as_deref(), Some("they’re"));
        assert_eq!(
            table.cases[&42],
            vec![Some("they’ve".to_owned()), None]
        );
    }

    #[test]
    fn built_in_sets_win_id_collisions() {
        let handler = EnglishHandler;
        let reserved_id = EnglishHandler::THEY_THEM_SET_ID;

        let custom = custom_sets_from_json(&format!(
            r#"{{ "{reserved_id}": {{ "Title": "Impostor", "Set": {{}} }} }}"#
        ))
        .unwrap();

        let merged = merged_pronoun_sets(&custom, &handler);
        assert_eq!(merged[reserved_id].title, "They / Them");
    }

    #[test]
    fn pair_identifier_is_canonicalized() {
        let handler = EnglishHandler;

        assert_eq!(pair_identifier("She", "He", &handler), "she|he");
        assert_eq!(pair_identifier("She's", "He's", &handler), "she’s|he’s");
        assert_eq!(pair_identifier("Ms", "Mr", &handler), "ms.|mr.");
    }
}
