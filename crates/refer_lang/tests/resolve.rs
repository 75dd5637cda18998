use pretty_assertions::assert_eq;
use refer_lang::{
    custom_sets_from_json, resolve_gendered_text, EnglishHandler, MemoryPreferences,
    PronounSetTable, Token,
};
use refer_stbl::StringTable;
use tracing_test::traced_test;

fn resolve(
    text_key: u32,
    text: &str,
    tokens: &[Token],
    prefs: &MemoryPreferences,
    custom_sets: &PronounSetTable,
) -> Option<String> {
    resolve_gendered_text(
        text_key,
        text,
        tokens,
        prefs,
        custom_sets,
        &EnglishHandler,
        &StringTable::default(),
    )
}

fn they_set() -> PronounSetTable {
    custom_sets_from_json(
        r#"{ "my-set": { "Title": "Custom", "Set": { "she|he": "they" } } }"#,
    )
    .unwrap()
}

#[traced_test]
#[test]
fn a_selected_set_replaces_the_pair() {
    let mut prefs = MemoryPreferences::new();
    prefs.select(1, "my-set");

    let resolved = resolve(
        7,
        "{F0.She}{M0.He} left",
        &[Token::sim(1, "Bella", "Goth", true)],
        &prefs,
        &they_set(),
    );

    assert_eq!(resolved.as_deref(), Some("they left"));
}

#[traced_test]
#[test]
fn no_selection_on_any_sim_returns_none() {
    let prefs = MemoryPreferences::new();

    let resolved = resolve(
        7,
        "{F0.She}{M0.He} left",
        &[Token::sim(1, "Bella", "Goth", true)],
        &prefs,
        &they_set(),
    );

    assert_eq!(resolved, None);
}

#[traced_test]
#[test]
fn set_lookup_is_case_insensitive() {
    let mut prefs = MemoryPreferences::new();
    prefs.select(1, "MY-SET");

    let resolved = resolve(
        7,
        "{F0.She}{M0.He} left",
        &[Token::sim(1, "Bella", "Goth", false)],
        &prefs,
        &they_set(),
    );

    assert_eq!(resolved.as_deref(), Some("they left"));
}

#[traced_test]
#[test]
fn forced_sides_pick_one_tag_text() {
    let tokens = [Token::sim(1, "Bella", "Goth", true)];

    let mut prefs = MemoryPreferences::new();
    prefs.select(1, "0");
    let female_side = resolve(7, "{F0.She}{M0.He} left", &tokens, &prefs, &they_set());
    assert_eq!(female_side.as_deref(), Some("She left"));

    prefs.select(1, "1");
    let male_side = resolve(7, "{F0.She}{M0.He} left", &tokens, &prefs, &they_set());
    assert_eq!(male_side.as_deref(), Some("He left"));
}

#[traced_test]
#[test]
fn an_unknown_set_id_keeps_the_default_side() {
    let mut prefs = MemoryPreferences::new();
    prefs.select(1, "no-such-set");

    let resolved = resolve(
        7,
        "{F0.She}{M0.He} left",
        &[Token::sim(1, "Bella", "Goth", false)],
        &prefs,
        &they_set(),
    );

    assert_eq!(resolved.as_deref(), Some("He left"));
}

#[traced_test]
#[test]
fn unselected_sims_keep_their_default_side() {
    // Only Sim 1 has a selection; Sim 0's pair still resolves, to its own default side.
    let tokens = [
        Token::sim(10, "Bob", "Pancakes", false),
        Token::sim(11, "Eliza", "Pancakes", true),
    ];

    let mut prefs = MemoryPreferences::new();
    prefs.select(11, "my-set");

    let resolved = resolve(
        7,
        "{F0.She}{M0.He} waved at {F1.She}{M1.He}",
        &tokens,
        &prefs,
        &they_set(),
    );

    assert_eq!(resolved.as_deref(), Some("He waved at they"));
}

#[traced_test]
#[test]
fn a_missing_pair_follows_the_fallback_selector() {
    // The set only covers she|he, so her|him falls back.
    let tokens = [Token::sim(1, "Bella", "Goth", false)];

    let mut prefs = MemoryPreferences::new();
    prefs.select(1, "my-set");
    prefs.set_fallback(1, "0");

    let resolved = resolve(
        7,
        "give {F0.her}{M0.him} the keys",
        &tokens,
        &prefs,
        &they_set(),
    );

    assert_eq!(resolved.as_deref(), Some("give her the keys"));

    // Without a fallback selector the Sim's default side wins.
    prefs.set_fallback(1, "");
    let resolved = resolve(
        7,
        "give {F0.her}{M0.him} the keys",
        &tokens,
        &prefs,
        &they_set(),
    );

    assert_eq!(resolved.as_deref(), Some("give him the keys"));
}

#[traced_test]
#[test]
fn case_tables_index_by_occurrence() {
    let sets = custom_sets_from_json(
        r#"{
            "my-set": {
                "Title": "Custom",
                "Set": {
                    "she’s|he’s": { "Cases": { "42": ["they’re", "they’ve"] } }
                }
            }
        }"#,
    )
    .unwrap();

    let tokens = [Token::sim(1, "Bella", "Goth", true)];

    let mut prefs = MemoryPreferences::new();
    prefs.select(1, "my-set");
    prefs.set_fallback(1, "1");

    let text = "{F0.She's}{M0.He's} here. {F0.She's}{M0.He's} done. {F0.She's}{M0.He's} late.";

    // Two listed occurrences, then out of range falls back to the subject's selector.
    let resolved = resolve(42, text, &tokens, &prefs, &sets);
    assert_eq!(
        resolved.as_deref(),
        Some("they’re here. they’ve done. He's late.")
    );

    // A different string key misses the case list entirely.
    let resolved = resolve(43, text, &tokens, &prefs, &sets);
    assert_eq!(resolved.as_deref(), Some("He's here. He's done. He's late."));
}

#[traced_test]
#[test]
fn case_tables_fall_back_to_their_default_text() {
    let sets = custom_sets_from_json(
        r#"{
            "my-set": {
                "Title": "Custom",
                "Set": {
                    "she’s|he’s": { "Default": "they’re", "Cases": { "42": [null] } }
                }
            }
        }"#,
    )
    .unwrap();

    let tokens = [Token::sim(1, "Bella", "Goth", true)];

    let mut prefs = MemoryPreferences::new();
    prefs.select(1, "my-set");

    // The listed occurrence is null, so the table's default text applies.
    let resolved = resolve(42, "{F0.She's}{M0.He's} here", &tokens, &prefs, &sets);
    assert_eq!(resolved.as_deref(), Some("they’re here"));
}

#[traced_test]
#[test]
fn built_in_they_them_set_resolves_end_to_end() {
    let tokens = [Token::sim(1, "Bella", "Goth", true)];

    let mut prefs = MemoryPreferences::new();
    prefs.select(1, EnglishHandler::THEY_THEM_SET_ID);

    let resolved = resolve(
        7,
        "{F0.She}{M0.He} lost {F0.her}{M0.his} phone",
        &tokens,
        &prefs,
        &PronounSetTable::new(),
    );

    assert_eq!(resolved.as_deref(), Some("they lost their phone"));
}

#[traced_test]
#[test]
fn template_tags_resolve_after_the_gendered_pass() {
    let tokens = [Token::sim(1, "Bella", "Goth", true)];

    let mut prefs = MemoryPreferences::new();
    prefs.select(1, "my-set");

    let resolved = resolve(
        7,
        "{F0.She}{M0.He} waved at {0.SimFirstName}",
        &tokens,
        &prefs,
        &they_set(),
    );

    assert_eq!(resolved.as_deref(), Some("they waved at Bella"));
}

#[traced_test]
#[test]
fn an_unsupported_tag_degrades_to_none() {
    let tokens = [Token::sim(1, "Bella", "Goth", true)];

    let mut prefs = MemoryPreferences::new();
    prefs.select(1, "my-set");

    let resolved = resolve(
        7,
        "{F0.She}{M0.He} did {0.SomethingWeird}",
        &tokens,
        &prefs,
        &they_set(),
    );

    assert_eq!(resolved, None);
}
