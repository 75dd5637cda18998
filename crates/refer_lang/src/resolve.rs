//! Tag resolution: rewriting gendered pairs and expanding template tags.

use refer_stbl::StringTable;
use tracing::{instrument, warn};

use crate::error::{Error, Result};
use crate::handlers::LanguageHandler;
use crate::prefs::PreferenceStore;
use crate::pronouns::{merged_pronoun_sets, pair_identifier, PairValue, PronounSetTable};
use crate::tags::{detect_gendered_tags, GenderTagMatch, SINGLE_REGULAR_TAG, SINGLE_TAG};
use crate::tokens::{format_number, Token};

/// Nested localized strings deeper than this fail resolution instead of recursing further.
const MAX_NESTING_DEPTH: usize = 8;

/// Produce the display text for a gendered string, or `None` when the game's own,
/// unmodified text should be used instead.
///
/// `None` is returned when no Sim in `tokens` has a pronoun-set selection, and when the
/// rewritten text contains a tag this resolver cannot expand; both are expected conditions,
/// not failures. `text_key` selects per-string case overrides inside pronoun sets, and
/// `strings` backs the nested-string and object-catalog lookups of the template pass.
#[instrument(skip(text, tokens, prefs, custom_sets, handler, strings))]
pub fn resolve_gendered_text(
    text_key: u32,
    text: &str,
    tokens: &[Token],
    prefs: &dyn PreferenceStore,
    custom_sets: &PronounSetTable,
    handler: &dyn LanguageHandler,
    strings: &StringTable,
) -> Option<String> {
    let any_selection = tokens.iter().any(|token| match token {
        Token::Sim { id, .. } => !prefs.set_selection(*id).is_empty(),
        _ => false,
    });

    if !any_selection {
        return None;
    }

    let corrected = correct_gendered_pairs(text_key, text, tokens, prefs, custom_sets, handler);

    match resolve_template(&corrected, tokens, handler, strings) {
        Ok(resolved) => Some(resolved),
        Err(error) => {
            warn!(%error, "could not resolve a localization string, using the original text");
            None
        }
    }
}

/// Expand the template tags of a string against its token sequence.
///
/// Fails with [`Error::UnsupportedTag`] when a tag names an operation its token's type does
/// not support, and with [`Error::UnresolvedTag`] when any tag-shaped span survives the
/// pass. Callers treat both as "fall back to the unresolved text".
pub fn resolve_template(
    text: &str,
    tokens: &[Token],
    handler: &dyn LanguageHandler,
    strings: &StringTable,
) -> Result<String> {
    let resolved = resolve_regular_tags(text, tokens, handler, strings, 0)?;

    if SINGLE_TAG.is_match(&resolved) {
        return Err(Error::UnresolvedTag);
    }

    Ok(resolved)
}

/// Rewrite every eligible gendered pair of `text` left to right.
///
/// Text outside matched spans is copied verbatim. A pair whose token is out of range or not
/// a Sim has its span consumed with nothing substituted, but still counts one occurrence
/// for case-table indexing.
fn correct_gendered_pairs(
    text_key: u32,
    text: &str,
    tokens: &[Token],
    prefs: &dyn PreferenceStore,
    custom_sets: &PronounSetTable,
    handler: &dyn LanguageHandler,
) -> String {
    let (_, matches) = detect_gendered_tags(text);
    let merged_sets = merged_pronoun_sets(custom_sets, handler);

    let mut corrected = String::with_capacity(text.len());
    let mut cursor = 0usize;

    for (occurrence, tag_match) in matches.iter().enumerate() {
        corrected.push_str(&text[cursor..tag_match.start]);
        cursor = tag_match.end;

        if let Some(replacement) = pair_replacement(
            text_key,
            occurrence,
            tag_match,
            tokens,
            prefs,
            &merged_sets,
            handler,
        ) {
            corrected.push_str(&replacement);
        }
    }

    corrected.push_str(&text[cursor..]);
    corrected
}

/// Resolve one eligible pair to its replacement text; `None` when the pair's token is
/// missing or not a Sim.
fn pair_replacement(
    text_key: u32,
    occurrence: usize,
    tag_match: &GenderTagMatch,
    tokens: &[Token],
    prefs: &dyn PreferenceStore,
    merged_sets: &PronounSetTable,
    handler: &dyn LanguageHandler,
) -> Option<String> {
    let token = tokens.get(tag_match.token_index() as usize)?;

    let Token::Sim { id, is_female, .. } = token else {
        return None;
    };

    let (female_text, male_text) = tag_match.female_male_texts();

    let default_side = || {
        if *is_female {
            female_text.to_owned()
        } else {
            male_text.to_owned()
        }
    };

    // The fallback selector reads like the selection: female side, male side, or default.
    let apply_selector = |selector: Option<i64>| match selector {
        Some(0) => female_text.to_owned(),
        Some(1) => male_text.to_owned(),
        _ => default_side(),
    };

    let fallback = prefs.fallback(*id);
    let fallback = fallback.trim().parse::<i64>().ok();

    let selection = prefs.set_selection(*id).to_lowercase();

    let replacement = match selection.as_str() {
        "" => default_side(),
        "0" => female_text.to_owned(),
        "1" => male_text.to_owned(),
        set_id => {
            let selected_set = merged_sets
                .iter()
                .find(|(id, _)| id.to_lowercase() == set_id)
                .map(|(_, set)| set);

            let Some(selected_set) = selected_set else {
                return Some(default_side());
            };

            let pair_key = pair_identifier(female_text, male_text, handler);

            match selected_set.pairs.get(&pair_key) {
                None => apply_selector(fallback),
                Some(PairValue::Selector(side)) => apply_selector(Some(*side)),
                Some(PairValue::Literal(literal)) => {
                    if literal.trim().is_empty() {
                        apply_selector(fallback)
                    } else {
                        literal.clone()
                    }
                }
                Some(PairValue::Cases(case_table)) => {
                    let case_text = case_table
                        .cases
                        .get(&text_key)
                        .and_then(|case_list| case_list.get(occurrence))
                        .and_then(Option::as_deref);

                    match case_text {
                        Some(case_text) => case_text.to_owned(),
                        None => match &case_table.default {
                            Some(default_text) => default_text.clone(),
                            None => apply_selector(fallback),
                        },
                    }
                }
            }
        }
    };

    Some(replacement)
}

/// Expand regular `{<tokenIndex>.<TagName>}` tags by type-directed dispatch on the token.
///
/// An out-of-range token index consumes the tag's span without substituting anything.
fn resolve_regular_tags(
    text: &str,
    tokens: &[Token],
    handler: &dyn LanguageHandler,
    strings: &StringTable,
    depth: usize,
) -> Result<String> {
    if depth > MAX_NESTING_DEPTH {
        return Err(Error::NestingTooDeep(MAX_NESTING_DEPTH));
    }

    let unsupported = |tag: &str, token_kind: &'static str| Error::UnsupportedTag {
        tag: tag.to_owned(),
        token_kind,
    };

    let mut resolved = String::with_capacity(text.len());
    let mut cursor = 0usize;

    for captures in SINGLE_REGULAR_TAG.captures_iter(text) {
        let whole = captures.get(0).unwrap();
        resolved.push_str(&text[cursor..whole.start()]);
        cursor = whole.end();

        let tag_name = &captures[2];

        let Some(token) = captures[1]
            .parse::<usize>()
            .ok()
            .and_then(|index| tokens.get(index))
        else {
            continue;
        };

        match token {
            Token::Sim {
                first_name,
                last_name,
                full_name_key,
                ..
            } => match tag_name {
                "SimFirstName" => resolved.push_str(first_name),
                "SimLastName" => resolved.push_str(last_name),
                "SimName" => {
                    let full_name = if *full_name_key != 0 {
                        strings.text(*full_name_key).map(str::to_owned)
                    } else {
                        None
                    };

                    let full_name = full_name
                        .unwrap_or_else(|| handler.sim_full_name(first_name, last_name));
                    resolved.push_str(&full_name);
                }
                _ => return Err(unsupported(tag_name, "sim")),
            },

            Token::RawString { value } => {
                if tag_name == "String" {
                    resolved.push_str(value);
                } else {
                    return Err(unsupported(tag_name, "raw text"));
                }
            }

            Token::Number { value } => match tag_name {
                "Number" => resolved.push_str(&format_number(*value)),
                "Money" => resolved.push_str(&handler.money_string(*value)),
                _ => return Err(unsupported(tag_name, "number")),
            },

            Token::Nested {
                hash,
                tokens: nested_tokens,
            } => {
                if let Some(nested_text) = strings.text(*hash) {
                    let nested =
                        resolve_regular_tags(nested_text, nested_tokens, handler, strings, depth + 1)?;
                    resolved.push_str(&nested);
                }
            }

            Token::Object {
                custom_name,
                custom_description,
                catalog_name_key,
                catalog_description_key,
            } => {
                let object_text = match tag_name {
                    "ObjectName" => {
                        if !custom_name.is_empty() {
                            Some(custom_name.clone())
                        } else {
                            strings.text(*catalog_name_key).map(str::to_owned)
                        }
                    }
                    "ObjectDescription" => {
                        if !custom_description.is_empty() {
                            Some(custom_description.clone())
                        } else {
                            strings.text(*catalog_description_key).map(str::to_owned)
                        }
                    }
                    "ObjectCatalogName" => strings.text(*catalog_name_key).map(str::to_owned),
                    "ObjectCatalogDescription" => {
                        strings.text(*catalog_description_key).map(str::to_owned)
                    }
                    _ => return Err(unsupported(tag_name, "object")),
                };

                if let Some(object_text) = object_text {
                    resolved.push_str(&object_text);
                }
            }
        }
    }

    resolved.push_str(&text[cursor..]);
    Ok(resolved)
}
